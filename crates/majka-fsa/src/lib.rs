//! Lookup engine for majka finite-state dictionaries.
//!
//! A dictionary is a compiled automaton storing `surface:payload` strings
//! with shared prefixes collapsed. Given a word form, the engine walks the
//! automaton (optionally tolerating case and missing diacritics) and decodes
//! each matching payload into a `LEMMA:TAG` record.
//!
//! # Architecture
//!
//! - [`format`] -- Binary header parsing and validation
//! - [`image`] -- Owned automaton body loaded from disk or memory
//! - [`walker`] -- Node addressing and sibling iteration
//! - [`flags`] -- Query flags
//! - [`options`] -- Load-time options
//! - [`search`] -- Exact, diacritic-tolerant and compound traversal
//! - [`decode`] -- Record layouts selected by the dictionary's record type
//! - [`results`] -- Caller-owned output arena and record views
//! - [`fsa`] -- The [`Fsa`] handle tying it all together

use std::path::PathBuf;

pub mod decode;
pub mod flags;
pub mod format;
pub mod fsa;
pub mod image;
pub mod options;
pub mod results;
pub mod search;
pub mod walker;

pub use flags::SearchFlags;
pub use fsa::{DictionaryInfo, Fsa};
pub use options::FsaOptions;
pub use results::{Analysis, Record, ResultArena};

pub use majka_core::Encoding;

/// Error type for dictionary loading and lookup.
#[derive(Debug, thiserror::Error)]
pub enum FsaError {
    #[error("cannot read dictionary file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("file too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("invalid dictionary file (bad magic number)")]
    InvalidFormat,
    #[error("unsupported fsa format revision {0} (expected {expected})", expected = format::FSA_REVISION)]
    UnsupportedFsaVersion(u8),
    #[error("unsupported dictionary version {0} (expected {expected})", expected = format::DICT_VERSION_MAJOR)]
    UnsupportedDictVersion(u8),
    #[error("invalid address field width {0}")]
    InvalidAddressWidth(u8),
    #[error("cannot interpret dictionary of record type {0}")]
    UnsupportedRecordType(u8),
    #[error("malformed record for type {record_type}: {reason}")]
    FormatAnomaly { record_type: u8, reason: &'static str },
}

/// Separator between the surface form and its payload, and between the
/// lemma and tag of emitted records.
pub const SEPARATOR: u8 = b':';

/// Default limit on query length, in bytes of the caller's encoding.
pub const DEFAULT_MAX_WORD_LENGTH: usize = 100;

/// Longest candidate path the search follows before treating the automaton
/// as malformed. Real dictionaries stay far below it.
pub const MAX_PATH_LENGTH: usize = 1024;
