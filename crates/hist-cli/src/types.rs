use hist_cli::pipeline::{ConvertedFile, FileFailure, TableCounts};
use hist_model::MissingCodeTracker;

#[derive(Debug)]
pub struct RunResult {
    pub counts: TableCounts,
    pub files: Vec<ConvertedFile>,
    pub failures: Vec<FileFailure>,
    /// Totals over files converted in full.
    pub records: u64,
    pub errors: u64,
    pub missing: MissingCodeTracker,
    /// JSON went to stdout, so the summary must not.
    pub json_on_stdout: bool,
}

impl RunResult {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
