// Fsa: a loaded dictionary and the query entry points.
//
// The handle owns the image, the code tables and the load options. Queries
// borrow them through a lightweight `Engine` built per call, so a single
// `Fsa` can serve any number of threads without locking.

use std::path::Path;

use log::{info, warn};
use majka_core::CodeTables;

use crate::decode::{RecordDecoder, RecordType};
use crate::flags::SearchFlags;
use crate::image::DictionaryImage;
use crate::options::FsaOptions;
use crate::results::{Analysis, ResultArena};
use crate::search::{CompoundStarts, Engine};
use crate::walker::Walker;
use crate::FsaError;

/// Largest capacity [`Fsa::new_arena`] reserves before the first query.
pub const MAX_ARENA_RESERVE: usize = 1 << 20;

/// Header facts about a loaded dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryInfo {
    pub record_type: u8,
    pub address_width: usize,
    pub version_minor: u16,
    pub max_result: u16,
    pub max_results_count: u16,
    pub max_results_size: u32,
    /// Automaton body length in bytes.
    pub body_len: usize,
    /// Whether the dictionary has compound-prefix and suffix regions.
    pub has_compounds: bool,
}

/// A loaded morphological dictionary.
///
/// Immutable after construction. `find` and `lookup` take `&self` and keep
/// all per-query state on the caller's side.
pub struct Fsa {
    image: DictionaryImage,
    tables: CodeTables,
    options: FsaOptions,
    compound: Option<CompoundStarts>,
}

impl std::fmt::Debug for Fsa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fsa")
            .field("header", self.image.header())
            .field("options", &self.options)
            .field("compound", &self.compound.is_some())
            .finish()
    }
}

impl Fsa {
    /// Load a dictionary file with default options.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FsaError> {
        Self::load_with_options(path, FsaOptions::default())
    }

    pub fn load_with_options(path: impl AsRef<Path>, options: FsaOptions) -> Result<Self, FsaError> {
        let image = DictionaryImage::load(path)?;
        Ok(Self::new(image, options))
    }

    /// Build from a complete dictionary file held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FsaError> {
        Self::from_bytes_with_options(data, FsaOptions::default())
    }

    pub fn from_bytes_with_options(data: &[u8], options: FsaOptions) -> Result<Self, FsaError> {
        let image = DictionaryImage::from_bytes(data)?;
        Ok(Self::new(image, options))
    }

    fn new(image: DictionaryImage, options: FsaOptions) -> Self {
        let record_type = image.header().record_type;
        if RecordType::from_code(record_type).is_none() {
            warn!("dictionary has unknown record type {record_type}; lookups that match will fail");
        }
        let compound = CompoundStarts::find(&Walker::new(&image));
        if compound.is_some() {
            info!("dictionary has compound regions");
        }
        Self {
            image,
            tables: CodeTables::new(),
            options,
            compound,
        }
    }

    fn engine(&self) -> Engine<'_> {
        Engine {
            walker: Walker::new(&self.image),
            tables: &self.tables,
            decoder: RecordDecoder::new(
                self.image.header().record_type,
                self.options.encoding,
                &self.tables,
            ),
            encoding: self.options.encoding,
            max_word_length: self.options.max_word_length,
            compound: self.compound,
        }
    }

    /// Look up `word` and write one `LEMMA:TAG` record per match into `out`.
    ///
    /// `out` is cleared first. Returns the number of records written; zero
    /// matches is a normal outcome. Fails only when the dictionary itself
    /// turns out to be malformed (unknown record type, broken record).
    pub fn find(&self, word: &[u8], out: &mut ResultArena, flags: SearchFlags) -> Result<usize, FsaError> {
        out.clear();
        self.engine().find(word, flags, out)
    }

    /// Convenience wrapper around [`find`](Self::find) returning owned
    /// lemma and tag strings.
    pub fn lookup(&self, word: &str, flags: SearchFlags) -> Result<Vec<Analysis>, FsaError> {
        let mut out = self.new_arena();
        self.find(word.as_bytes(), &mut out, flags)?;
        Ok(out.iter().map(|r| r.to_analysis()).collect())
    }

    /// Arena sized by [`max_results_size`](Self::max_results_size), capped at
    /// [`MAX_ARENA_RESERVE`] bytes up front. The arena still grows past the
    /// cap when a query needs it.
    pub fn new_arena(&self) -> ResultArena {
        ResultArena::with_capacity(self.max_results_size().min(MAX_ARENA_RESERVE))
    }

    /// Bytes a caller should reserve for one query's output: the header's
    /// hint plus room for the longest query and its normalized copy.
    pub fn max_results_size(&self) -> usize {
        let scratch = self.options.max_word_length.saturating_add(2).saturating_mul(2);
        (self.image.header().max_results_size as usize).saturating_add(scratch)
    }

    pub fn options(&self) -> &FsaOptions {
        &self.options
    }

    pub fn info(&self) -> DictionaryInfo {
        let h = self.image.header();
        DictionaryInfo {
            record_type: h.record_type,
            address_width: h.address_width,
            version_minor: h.version_minor,
            max_result: h.max_result,
            max_results_count: h.max_results_count,
            max_results_size: h.max_results_size,
            body_len: self.image.len(),
            has_compounds: self.compound.is_some(),
        }
    }
}
