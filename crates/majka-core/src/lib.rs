//! Alphabet data and text conversion for the majka lookup engine.
//!
//! Dictionaries store words in a single-byte alphabet (ISO-8859-2). This
//! crate owns everything that knows about that alphabet:
//!
//! - [`charset`] -- the accented letters the engine understands
//! - [`tables`] -- lookup tables derived from the letter data (case folding,
//!   diacritic stripping, UTF-8 expansion and its reverse)
//! - [`encoding`] -- query normalization and output re-expansion

pub mod charset;
pub mod encoding;
pub mod tables;

pub use encoding::Encoding;
pub use tables::{AccentTable, CodeTables};

/// Error raised while converting query text into the internal alphabet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("unsupported byte {byte:#04x} at offset {offset}")]
    UnsupportedByte { byte: u8, offset: usize },
}
