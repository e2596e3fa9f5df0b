//! History conversion pipeline with explicit stages.
//!
//! 1. **Load**: read command, data and client-type codes and the barcode index
//! 2. **Discover**: resolve the hist files to convert
//! 3. **Convert**: translate each line and stream the records to JSON
//!
//! Line numbers run across all files of a run so missing-code reports stay
//! unambiguous.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, trace, warn};

use hist_ingest::{
    DATA_CODE_EXTRAS, SymphonyPaths, list_hist_files, load_barcode_index, load_client_types,
    load_code_table, open_hist_file,
};
use hist_model::{BarcodeIndex, CodeDomain, CodeTable};
use hist_output::{OutputFormat, RecordWriter, create_output_file, output_path_for};
use hist_transform::{TranslationTables, Translator};

use crate::logging::redact_value;

// ============================================================================
// Stage 1: Load
// ============================================================================

/// Where the code tables come from. Unset paths fall back to the Unicorn
/// layout.
#[derive(Debug, Clone, Default)]
pub struct SourceConfig {
    pub unicorn: SymphonyPaths,
    pub command_codes: Option<PathBuf>,
    pub data_codes: Option<PathBuf>,
    pub client_codes: Option<PathBuf>,
    pub item_barcodes: Option<PathBuf>,
}

impl SourceConfig {
    pub fn new(unicorn: SymphonyPaths) -> Self {
        Self {
            unicorn,
            ..Self::default()
        }
    }

    pub fn command_codes_path(&self) -> PathBuf {
        self.command_codes
            .clone()
            .unwrap_or_else(|| self.unicorn.command_codes())
    }

    pub fn data_codes_path(&self) -> PathBuf {
        self.data_codes
            .clone()
            .unwrap_or_else(|| self.unicorn.data_codes())
    }
}

/// Table sizes as loaded, before translation adds placeholders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub command_codes: usize,
    pub data_codes: usize,
    pub client_types: usize,
    pub items: usize,
    pub malformed_items: usize,
}

#[derive(Debug)]
pub struct LoadResult {
    pub tables: TranslationTables,
    pub counts: TableCounts,
}

/// Load the command and data tables, with the built-in data code extras
/// merged in.
pub fn load_code_tables(config: &SourceConfig) -> Result<(CodeTable, CodeTable)> {
    let command_path = config.command_codes_path();
    let commands = load_code_table(&command_path, CodeDomain::Command)
        .with_context(|| format!("load command codes from {}", command_path.display()))?;

    let data_path = config.data_codes_path();
    let mut data = load_code_table(&data_path, CodeDomain::Data)
        .with_context(|| format!("load data codes from {}", data_path.display()))?;
    let added = data
        .extend_missing(DATA_CODE_EXTRAS)
        .context("merge built-in data codes")?;
    debug!(added, "merged built-in data codes");

    Ok((commands, data))
}

pub fn load(config: &SourceConfig) -> Result<LoadResult> {
    let start = Instant::now();
    let (commands, data) = load_code_tables(config)?;

    let client_types = match &config.client_codes {
        Some(path) => load_client_types(path)
            .with_context(|| format!("load client types from {}", path.display()))?,
        None => CodeTable::new(CodeDomain::ClientType),
    };

    let (barcodes, malformed_items) = match &config.item_barcodes {
        Some(path) => {
            let load = load_barcode_index(path)
                .with_context(|| format!("load item barcodes from {}", path.display()))?;
            (load.index, load.malformed)
        }
        None => {
            warn!("no item barcode file given; item IDs will not be converted into barcodes");
            (BarcodeIndex::new(), 0)
        }
    };

    let counts = TableCounts {
        command_codes: commands.len(),
        data_codes: data.len(),
        client_types: client_types.len(),
        items: barcodes.len(),
        malformed_items,
    };
    info!(
        command_codes = counts.command_codes,
        data_codes = counts.data_codes,
        client_types = counts.client_types,
        items = counts.items,
        duration_ms = start.elapsed().as_millis(),
        "load complete"
    );

    let tables = TranslationTables::new(commands, data)
        .with_client_types(client_types)
        .with_barcodes(barcodes);
    Ok(LoadResult { tables, counts })
}

// ============================================================================
// Stage 2: Discover
// ============================================================================

/// A hist file that could not be resolved or converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub hist_file: PathBuf,
    pub message: String,
}

/// Resolve the requested hist files. With `all`, every hist file in the
/// Unicorn hist directory is added after the named ones.
pub fn discover(
    unicorn: &SymphonyPaths,
    names: &[PathBuf],
    all: bool,
) -> Result<(Vec<PathBuf>, Vec<FileFailure>)> {
    let mut files = Vec::new();
    let mut failures = Vec::new();
    for name in names {
        match unicorn.resolve_hist_file(name) {
            Ok(path) => files.push(path),
            Err(error) => failures.push(FileFailure {
                hist_file: name.clone(),
                message: error.to_string(),
            }),
        }
    }
    if all {
        let hist_dir = unicorn.hist_dir();
        let listed = list_hist_files(&hist_dir)
            .with_context(|| format!("list hist files in {}", hist_dir.display()))?;
        for path in listed {
            if !files.contains(&path) {
                files.push(path);
            }
        }
    }
    if files.is_empty() && failures.is_empty() {
        bail!("no hist files to convert; pass --hist-file or --all");
    }
    debug!(files = files.len(), unresolved = failures.len(), "discover complete");
    Ok((files, failures))
}

// ============================================================================
// Stage 3: Convert
// ============================================================================

/// Where converted records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    Directory(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub destination: Destination,
}

/// Counts for one converted hist file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStats {
    /// Lines read, blank ones included.
    pub lines: u64,
    pub records: u64,
    pub errors: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    pub hist_file: PathBuf,
    /// `None` when written to stdout.
    pub output: Option<PathBuf>,
    pub stats: FileStats,
}

/// Translate lines and write each record. `line_no` holds the number of the
/// last line seen and is advanced for every line, blank or not.
pub fn translate_lines<I, W>(
    translator: &mut Translator,
    lines: I,
    writer: &mut RecordWriter<W>,
    line_no: &mut u64,
) -> Result<FileStats>
where
    I: IntoIterator<Item = hist_ingest::Result<String>>,
    W: Write,
{
    let mut stats = FileStats::default();
    for line in lines {
        let line = line?;
        *line_no += 1;
        stats.lines += 1;
        if line.trim().is_empty() {
            continue;
        }
        trace!(line = *line_no, raw = redact_value(&line), "translating");
        let translation = translator.translate(*line_no, &line);
        if !translation.is_complete() {
            debug!(line = *line_no, raw = redact_value(&line), "record incomplete");
        }
        stats.errors += translation.errors as u64;
        stats.records += 1;
        writer.write_record(&translation.record)?;
    }
    Ok(stats)
}

/// Reject output shapes that cannot hold `file_count` files. Several JSON
/// arrays back to back on stdout are not one JSON document.
pub fn check_output(output: &OutputConfig, file_count: usize) -> Result<()> {
    if output.destination == Destination::Stdout
        && output.format == OutputFormat::Array
        && file_count > 1
    {
        bail!(
            "--stdout writes one JSON array per file; use --mongo or --output-dir to convert {file_count} files"
        );
    }
    Ok(())
}

/// Convert one hist file to JSON. A file that fails partway leaves no output
/// file behind.
pub fn convert_file(
    translator: &mut Translator,
    hist_file: &Path,
    output: &OutputConfig,
    line_no: &mut u64,
) -> Result<ConvertedFile> {
    let start = Instant::now();
    let reader = open_hist_file(hist_file)?;
    let (stats, output_path) = match &output.destination {
        Destination::Stdout => {
            let mut writer = RecordWriter::new(io::stdout().lock(), output.format);
            let stats = translate_lines(translator, reader, &mut writer, line_no)?;
            writer.finish()?;
            (stats, None)
        }
        Destination::Directory(dir) => {
            let path = output_path_for(hist_file, dir)?;
            let mut writer = RecordWriter::new(create_output_file(&path)?, output.format);
            let written = match translate_lines(translator, reader, &mut writer, line_no) {
                Ok(stats) => writer.finish().map(|_| stats).map_err(anyhow::Error::from),
                Err(err) => Err(err),
            };
            match written {
                Ok(stats) => (stats, Some(path)),
                Err(err) => {
                    if let Err(remove_err) = std::fs::remove_file(&path) {
                        warn!(
                            path = %path.display(),
                            error = %remove_err,
                            "could not remove partial output"
                        );
                    }
                    return Err(err);
                }
            }
        }
    };
    info!(
        hist_file = %hist_file.display(),
        records = stats.records,
        errors = stats.errors,
        duration_ms = start.elapsed().as_millis(),
        "convert complete"
    );
    Ok(ConvertedFile {
        hist_file: hist_file.to_path_buf(),
        output: output_path,
        stats,
    })
}
