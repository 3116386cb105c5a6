// Output accumulator for expanded URIs

use std::fmt;

use super::charclass::percent_encode_byte;

/// Append-only text buffer.
///
/// Backed by a `String`, so growth is amortized and nothing handed out earlier can
/// observe a reallocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    text: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
        }
    }

    pub fn append_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    pub fn append_char(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn append_pct_byte(&mut self, b: u8) {
        self.text.extend(percent_encode_byte(b));
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for OutputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
