// Load-time options

use majka_core::Encoding;

use crate::DEFAULT_MAX_WORD_LENGTH;

/// Options fixed when a dictionary is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsaOptions {
    /// Encoding of queries and emitted records.
    pub encoding: Encoding,
    /// Queries longer than this many bytes are truncated.
    pub max_word_length: usize,
}

impl Default for FsaOptions {
    fn default() -> Self {
        Self {
            encoding: Encoding::Utf8,
            max_word_length: DEFAULT_MAX_WORD_LENGTH,
        }
    }
}

impl FsaOptions {
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_max_word_length(mut self, max_word_length: usize) -> Self {
        self.max_word_length = max_word_length;
        self
    }
}
