//! Field tokenizer for history lines.

/// One separator-delimited token of a history line.
///
/// The first two characters are the data code and the remainder is the
/// value. Tokens shorter than two characters have no code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawField<'a> {
    text: &'a str,
}

impl<'a> RawField<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// The 2-character code, or `None` for short tokens.
    pub fn code(&self) -> Option<&'a str> {
        let code = &self.text[..self.code_end()];
        (code.chars().count() == 2).then_some(code)
    }

    /// Everything after the code. Empty for short tokens.
    pub fn value(&self) -> &'a str {
        &self.text[self.code_end()..]
    }

    /// Byte offset just past the second character.
    fn code_end(&self) -> usize {
        self.text
            .char_indices()
            .nth(2)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    /// Whether the token carries nothing to translate: it has no code, or
    /// its code is the end-of-record marker.
    pub fn is_inert(&self, end_of_record: &str) -> bool {
        match self.code() {
            Some(code) => code == end_of_record,
            None => true,
        }
    }
}

/// Split `line` on `separator`, keeping empty tokens so positions are stable.
pub fn tokenize(line: &str, separator: char) -> Vec<RawField<'_>> {
    line.split(separator).map(RawField::new).collect()
}
