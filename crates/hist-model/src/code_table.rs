//! Two-character code tables.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{HistError, Result};

/// Prefix of the field name synthesized for data codes with no definition.
const PLACEHOLDER_PREFIX: &str = "data_code_";

/// Whether `name` was synthesized for an undefined data code.
pub fn is_placeholder(name: &str) -> bool {
    name.starts_with(PLACEHOLDER_PREFIX)
}

/// Which Symphony code file a table was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeDomain {
    /// Transaction types (`cmdcode`).
    Command,
    /// Field tags (`datacode`).
    Data,
    /// User client types (hold client table).
    ClientType,
}

impl fmt::Display for CodeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeDomain::Command => write!(f, "command"),
            CodeDomain::Data => write!(f, "data"),
            CodeDomain::ClientType => write!(f, "client type"),
        }
    }
}

impl CodeDomain {
    /// Command and data codes are exactly 2 characters. Client types are
    /// site-defined numbers of any width, so only emptiness is rejected.
    pub fn accepts(self, code: &str) -> bool {
        match self {
            CodeDomain::Command | CodeDomain::Data => code.chars().count() == 2,
            CodeDomain::ClientType => !code.is_empty(),
        }
    }
}

/// Field name used for a data code that has no definition.
pub fn placeholder_name(code: &str) -> String {
    format!("{PLACEHOLDER_PREFIX}{code}")
}

/// Case-sensitive mapping from a 2-character code to its definition.
///
/// For data codes the definition is a snake-case field name; for command
/// codes it is the human-readable transaction label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    domain: CodeDomain,
    entries: BTreeMap<String, String>,
}

impl CodeTable {
    pub fn new(domain: CodeDomain) -> Self {
        Self {
            domain,
            entries: BTreeMap::new(),
        }
    }

    /// Build a table from `(code, definition)` pairs. Later pairs replace
    /// earlier ones with the same code.
    pub fn try_from_pairs<I, K, V>(domain: CodeDomain, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new(domain);
        for (code, definition) in pairs {
            table.insert(code, definition)?;
        }
        Ok(table)
    }

    pub fn domain(&self) -> CodeDomain {
        self.domain
    }

    /// Insert or replace a definition, returning the previous one.
    pub fn insert(
        &mut self,
        code: impl Into<String>,
        definition: impl Into<String>,
    ) -> Result<Option<String>> {
        let code = code.into();
        if !self.domain.accepts(&code) {
            return Err(HistError::InvalidCode {
                domain: self.domain.to_string(),
                code,
            });
        }
        Ok(self.entries.insert(code, definition.into()))
    }

    /// Add every pair whose code is not already defined. Returns how many
    /// were added.
    pub fn extend_missing<I, K, V>(&mut self, pairs: I) -> Result<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut added = 0;
        for (code, definition) in pairs {
            let code = code.into();
            if self.entries.contains_key(&code) {
                continue;
            }
            self.insert(code, definition)?;
            added += 1;
        }
        Ok(added)
    }

    pub fn resolve(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Define `code` as `data_code_<code>` and return that name.
    ///
    /// Once inserted, later lookups of the same code resolve normally, so an
    /// unknown code is reported only where it first appears.
    pub fn insert_placeholder(&mut self, code: &str) -> String {
        let name = placeholder_name(code);
        self.entries.insert(code.to_string(), name.clone());
        name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(code, definition)| (code.as_str(), definition.as_str()))
    }
}
