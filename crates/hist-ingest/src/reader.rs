//! Reading Symphony text files.
//!
//! Symphony writes its logs and code files in ISO-8859-1. History logs are
//! often rotated into gzip archives; those are detected by their magic bytes
//! and decompressed while reading.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use encoding_rs::WINDOWS_1252;
use flate2::read::MultiGzDecoder;

use crate::error::{IngestError, Result};

/// How a hist file is stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

/// Decode ISO-8859-1 bytes.
///
/// Windows-1252 is used as the decoder; it agrees with ISO-8859-1 outside
/// the C1 control range, which Symphony does not write.
pub fn decode_latin1(bytes: &[u8]) -> String {
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// Read a whole text file and split it into lines.
pub fn read_text_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    Ok(decode_latin1(&bytes).lines().map(str::to_string).collect())
}

/// Line iterator over a plain or gzip-compressed hist file.
pub struct HistReader {
    path: PathBuf,
    compression: Compression,
    reader: Box<dyn BufRead + Send>,
    buffer: Vec<u8>,
}

impl HistReader {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }
}

impl std::fmt::Debug for HistReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistReader")
            .field("path", &self.path)
            .field("compression", &self.compression)
            .finish_non_exhaustive()
    }
}

impl Iterator for HistReader {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                while matches!(self.buffer.last(), Some(b'\n' | b'\r')) {
                    self.buffer.pop();
                }
                Some(Ok(decode_latin1(&self.buffer)))
            }
            Err(source) => Some(Err(IngestError::FileRead {
                path: self.path.clone(),
                source,
            })),
        }
    }
}

/// Open a hist file, decompressing it if it is gzip.
pub fn open_hist_file(path: &Path) -> Result<HistReader> {
    let file = File::open(path).map_err(|e| IngestError::from_io(path, e))?;
    let mut reader = BufReader::new(file);
    let compression = {
        let head = reader.fill_buf().map_err(|e| IngestError::from_io(path, e))?;
        detect_compression(head, path)?
    };
    tracing::debug!(path = %path.display(), ?compression, "opened hist file");
    let reader: Box<dyn BufRead + Send> = match compression {
        Compression::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(reader))),
        Compression::None => Box::new(reader),
    };
    Ok(HistReader {
        path: path.to_path_buf(),
        compression,
        reader,
        buffer: Vec::new(),
    })
}

fn detect_compression(head: &[u8], path: &Path) -> Result<Compression> {
    match head {
        [0x1f, 0x8b, ..] => Ok(Compression::Gzip),
        [0x1f, 0x9d, ..] => Err(IngestError::UnsupportedCompression {
            path: path.to_path_buf(),
            format: "compress (LZW)",
        }),
        _ => Ok(Compression::None),
    }
}
