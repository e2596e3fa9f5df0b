use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{error, info_span};

use hist_cli::pipeline::{
    Destination, FileFailure, OutputConfig, SourceConfig, check_output, convert_file, discover,
    load, load_code_tables,
};
use hist_ingest::{SymphonyPaths, load_client_types};
use hist_model::{CodeDomain, CodeTable, FormatOptions};
use hist_output::OutputFormat;
use hist_transform::Translator;

use crate::cli::{ConvertArgs, SourceArgs};
use crate::summary::apply_table_style;
use crate::types::RunResult;

fn source_config(args: &SourceArgs) -> SourceConfig {
    SourceConfig {
        command_codes: args.cmd_codes.clone(),
        data_codes: args.data_codes.clone(),
        client_codes: args.client_codes.clone(),
        ..SourceConfig::new(SymphonyPaths::new(&args.unicorn_path))
    }
}

pub fn run_codes(args: &SourceArgs) -> Result<()> {
    let config = source_config(args);
    let (commands, data) = load_code_tables(&config)?;
    let clients = match &config.client_codes {
        Some(path) => load_client_types(path)
            .with_context(|| format!("load client types from {}", path.display()))?,
        None => CodeTable::new(CodeDomain::ClientType),
    };
    let mut table = Table::new();
    table.set_header(vec!["Domain", "Code", "Definition"]);
    apply_table_style(&mut table);
    for codes in [&commands, &data, &clients] {
        let domain = codes.domain().to_string();
        for (code, definition) in codes.iter() {
            table.add_row(vec![domain.as_str(), code, definition]);
        }
    }
    println!("{table}");
    Ok(())
}

pub fn run_convert(args: &ConvertArgs) -> Result<RunResult> {
    let run_span = info_span!("convert", unicorn = %args.source.unicorn_path.display());
    let _run_guard = run_span.enter();

    let config = SourceConfig {
        item_barcodes: args.item_barcodes.clone(),
        ..source_config(&args.source)
    };
    let loaded = load(&config)?;
    let (files, mut failures) = discover(&config.unicorn, &args.hist_files, args.all)?;

    let output = OutputConfig {
        format: if args.mongo {
            OutputFormat::Lines
        } else {
            OutputFormat::Array
        },
        destination: if args.stdout {
            Destination::Stdout
        } else {
            Destination::Directory(args.output_dir.clone())
        },
    };

    check_output(&output, files.len())?;

    let mut translator = Translator::new(loaded.tables, FormatOptions::default());
    let mut line_no = 0u64;
    let mut converted = Vec::new();
    for hist_file in files {
        let file_span = info_span!("hist_file", path = %hist_file.display());
        let _file_guard = file_span.enter();
        match convert_file(&mut translator, &hist_file, &output, &mut line_no) {
            Ok(file) => converted.push(file),
            Err(err) => {
                error!(error = %format!("{err:#}"), "conversion failed");
                failures.push(FileFailure {
                    hist_file,
                    message: format!("{err:#}"),
                });
            }
        }
    }

    Ok(RunResult {
        counts: loaded.counts,
        failures,
        records: converted.iter().map(|file| file.stats.records).sum(),
        errors: converted.iter().map(|file| file.stats.errors).sum(),
        missing: translator.missing_codes().clone(),
        files: converted,
        json_on_stdout: args.stdout,
    })
}
