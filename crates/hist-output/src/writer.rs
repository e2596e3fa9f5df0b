//! Streaming record writer.

use std::io::Write;

use hist_model::Record;

use crate::error::Result;

/// Shape of the JSON written for a hist file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One JSON array holding every record.
    #[default]
    Array,
    /// One JSON object per line, as `mongoimport` expects.
    Lines,
}

/// Writes records one at a time so a hist file never has to be held in
/// memory. Call [`RecordWriter::finish`] to close the array.
#[derive(Debug)]
pub struct RecordWriter<W: Write> {
    inner: W,
    format: OutputFormat,
    written: u64,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W, format: OutputFormat) -> Self {
        Self {
            inner,
            format,
            written: 0,
        }
    }

    /// Number of records written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        match self.format {
            OutputFormat::Array => {
                let lead: &[u8] = if self.written == 0 { b"[\n" } else { b",\n" };
                self.inner.write_all(lead)?;
                serde_json::to_writer(&mut self.inner, record)?;
            }
            OutputFormat::Lines => {
                serde_json::to_writer(&mut self.inner, record)?;
                self.inner.write_all(b"\n")?;
            }
        }
        self.written += 1;
        Ok(())
    }

    /// Close the document, flush, and hand back the sink.
    pub fn finish(mut self) -> Result<W> {
        if self.format == OutputFormat::Array {
            let tail: &[u8] = if self.written == 0 { b"[]\n" } else { b"\n]\n" };
            self.inner.write_all(tail)?;
        }
        self.inner.flush()?;
        tracing::debug!(records = self.written, format = ?self.format, "output finished");
        Ok(self.inner)
    }
}
