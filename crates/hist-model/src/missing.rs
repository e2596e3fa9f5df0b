use std::collections::{BTreeMap, BTreeSet};

/// Data codes without a definition, keyed by the line they first appeared on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingCodeTracker {
    by_line: BTreeMap<u64, BTreeSet<String>>,
}

impl MissingCodeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `code` on `line`. Returns false if it was already recorded there.
    pub fn register(&mut self, line: u64, code: impl Into<String>) -> bool {
        self.by_line.entry(line).or_default().insert(code.into())
    }

    /// `(line, code)` pairs ordered by line, then code.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &str)> {
        self.by_line
            .iter()
            .flat_map(|(line, codes)| codes.iter().map(move |code| (*line, code.as_str())))
    }

    /// Number of `(line, code)` pairs.
    pub fn len(&self) -> usize {
        self.by_line.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }
}
