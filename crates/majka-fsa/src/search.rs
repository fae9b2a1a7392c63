// Query traversal: exact, diacritic-tolerant and compound search
//
// Every query owns its scratch state (normalized query, candidate path,
// match count). The dictionary side is read-only, so any number of queries
// may run against one `Fsa` at the same time.

use log::{debug, trace};
use majka_core::{CodeTables, Encoding};

use crate::decode::RecordDecoder;
use crate::flags::SearchFlags;
use crate::results::ResultArena;
use crate::walker::{Node, Walker};
use crate::{FsaError, MAX_PATH_LENGTH, SEPARATOR};

/// Letter of the root child starting the compound-prefix region.
pub const COMPOUND_PREFIX: u8 = b'!';
/// Letter of the root child starting the compound-suffix region.
pub const COMPOUND_SUFFIX: u8 = b'^';

/// Start nodes of the two compound regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompoundStarts {
    pub prefix: Node,
    pub suffix: Node,
}

impl CompoundStarts {
    /// Find the `!` and `^` nodes among the root's children. Both must be
    /// present for compound search to be enabled.
    pub fn find(walker: &Walker<'_>) -> Option<Self> {
        let root = walker.start();
        let marker = |letter| walker.children(root).find(|&n| walker.letter(n) == letter);
        Some(Self {
            prefix: marker(COMPOUND_PREFIX)?,
            suffix: marker(COMPOUND_SUFFIX)?,
        })
    }
}

/// Read-only view of a loaded dictionary shared by all queries.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'d> {
    pub walker: Walker<'d>,
    pub tables: &'d CodeTables,
    pub decoder: RecordDecoder<'d>,
    pub encoding: Encoding,
    pub max_word_length: usize,
    pub compound: Option<CompoundStarts>,
}

/// Per-query state.
struct Search<'d, 'o> {
    engine: Engine<'d>,
    /// Path of letters from the start node to the current position.
    candidate: Vec<u8>,
    /// Length of the normalized query without the trailing separator.
    surface_len: usize,
    count: usize,
    out: &'o mut ResultArena,
}

impl Engine<'_> {
    /// Run one query, appending a record per match to `out`.
    ///
    /// Returns the number of records appended. Input the alphabet cannot
    /// represent is not an error: the query simply has no matches.
    pub fn find(
        &self,
        word: &[u8],
        flags: SearchFlags,
        out: &mut ResultArena,
    ) -> Result<usize, FsaError> {
        let max = self.max_word_length;
        // Room for the query, its separator and one completion letter.
        let scratch = word.len().min(max).saturating_add(2);
        let mut query = Vec::with_capacity(scratch);
        if let Err(e) = self
            .encoding
            .normalize_into(self.tables, word, max, &mut query)
        {
            debug!("query not representable in dictionary alphabet: {e}");
            return Ok(0);
        }
        if word.len() > max && !word[..max].contains(&0) {
            debug!("query truncated to {max} bytes");
        }

        let tables = self.tables;
        let uppercase = !flags
            .intersects(SearchFlags::IGNORE_CASE | SearchFlags::DISALLOW_LOWERCASE)
            && query.iter().skip(1).any(|&b| tables.lower(b) != b);
        let surface_len = query.len();
        query.push(SEPARATOR);

        let mut search = Search {
            engine: *self,
            candidate: Vec::with_capacity(scratch),
            surface_len,
            count: 0,
            out,
        };
        let start = self.walker.start();

        match flags.accent_table() {
            Some(table) => {
                let accents = tables.accent(table);
                if flags.contains(SearchFlags::IGNORE_CASE) {
                    lowercase(tables, &mut query);
                }
                search.with_case_retries(&mut query, uppercase, flags, |s, q| {
                    s.accent_word(q, 0, start, None, accents)
                })?;
                if search.count == 0 {
                    if let Some(compound) = self.compound {
                        debug!("no direct match, trying compound split (diacritic-tolerant)");
                        search.accent_word(
                            &query,
                            0,
                            compound.prefix,
                            Some(compound.suffix),
                            accents,
                        )?;
                    }
                }
            }
            None => {
                search.with_case_retries(&mut query, uppercase, flags, |s, q| {
                    s.find_word(q, 0, start)
                })?;
                if search.count == 0 {
                    if let Some(compound) = self.compound {
                        debug!("no direct match, trying compound split");
                        search.compound(&query, compound)?;
                    }
                }
            }
        }

        Ok(search.count)
    }
}

fn lowercase(tables: &CodeTables, bytes: &mut [u8]) {
    for b in bytes {
        *b = tables.lower(*b);
    }
}

impl Search<'_, '_> {
    /// Run `pass` on the query as given, then with everything after the
    /// first letter lowercased (only when the query had uppercase there),
    /// then with the first letter lowercased too. Stops at the first
    /// variant that matches.
    fn with_case_retries<F>(
        &mut self,
        query: &mut [u8],
        uppercase: bool,
        flags: SearchFlags,
        mut pass: F,
    ) -> Result<(), FsaError>
    where
        F: FnMut(&mut Self, &[u8]) -> Result<(), FsaError>,
    {
        pass(self, &*query)?;
        if self.count > 0 {
            trace!("{} matches as given", self.count);
            return Ok(());
        }

        let tables = self.engine.tables;
        if uppercase {
            lowercase(tables, &mut query[1..]);
            pass(self, &*query)?;
            if self.count > 0 {
                trace!("{} matches with tail lowercased", self.count);
                return Ok(());
            }
        }

        if !flags.contains(SearchFlags::DISALLOW_LOWERCASE) {
            let first = query[0];
            let lower = tables.lower(first);
            if lower != first {
                query[0] = lower;
                pass(self, &*query)?;
                if self.count > 0 {
                    trace!("{} matches with first letter lowercased", self.count);
                }
            }
        }
        Ok(())
    }

    /// Exact traversal: follow the first sibling matching each query letter
    /// starting below `from`, then enumerate completions.
    fn find_word(&mut self, query: &[u8], level: usize, from: Node) -> Result<(), FsaError> {
        let walker = self.engine.walker;
        self.candidate.truncate(level);
        let mut node = from;
        for (i, &q) in query.iter().enumerate() {
            let Some(hit) = walker.children(node).find(|&n| walker.letter(n) == q) else {
                return Ok(());
            };
            self.candidate.push(q);
            if i + 1 == query.len() {
                return self.complete(hit);
            }
            node = hit;
        }
        Ok(())
    }

    /// Diacritic-tolerant traversal. Every sibling whose letter equals the
    /// query letter, or maps to it through `accents`, is explored.
    ///
    /// With a `secondary` start, the query must be consumed across a
    /// separator transition into that region before completions count.
    fn accent_word(
        &mut self,
        query: &[u8],
        level: usize,
        from: Node,
        secondary: Option<Node>,
        accents: &[u8; 256],
    ) -> Result<(), FsaError> {
        let Some((&q, rest)) = query.split_first() else {
            return Ok(());
        };
        let walker = self.engine.walker;
        for node in walker.children(from) {
            let letter = walker.letter(node);
            if q == letter || q == accents[letter as usize] {
                self.candidate.truncate(level);
                self.candidate.push(letter);
                if rest.is_empty() && secondary.is_none() {
                    self.complete(node)?;
                } else {
                    self.accent_word(rest, level + 1, node, secondary, accents)?;
                }
            } else if letter == SEPARATOR {
                if let Some(second) = secondary {
                    self.accent_word(query, level, second, None, accents)?;
                }
            }
        }
        self.candidate.truncate(level);
        Ok(())
    }

    /// Enumerate every path below `node`, decoding each final one.
    fn complete(&mut self, node: Node) -> Result<(), FsaError> {
        let walker = self.engine.walker;
        let child = walker.child(node);
        if child == Node::ROOT {
            return Ok(());
        }
        let depth = self.candidate.len();
        if depth >= MAX_PATH_LENGTH {
            return Err(FsaError::FormatAnomaly {
                record_type: self.engine.decoder.code(),
                reason: "candidate path exceeds maximum length",
            });
        }
        for sibling in walker.siblings(child) {
            self.candidate.truncate(depth);
            self.candidate.push(walker.letter(sibling));
            if walker.is_final(sibling) {
                self.emit()?;
            }
            self.complete(sibling)?;
        }
        self.candidate.truncate(depth);
        Ok(())
    }

    /// Greedy walk through the compound-prefix region. Wherever the prefix
    /// walked so far may end (a separator follows), the rest of the query
    /// is looked up exactly in the suffix region.
    fn compound(&mut self, query: &[u8], starts: CompoundStarts) -> Result<(), FsaError> {
        let walker = self.engine.walker;
        self.candidate.clear();
        let mut node = starts.prefix;
        for (i, &q) in query.iter().enumerate() {
            let Some(hit) = walker.children(node).find(|&n| walker.letter(n) == q) else {
                return Ok(());
            };
            self.candidate.push(q);
            if i + 1 == query.len() {
                return Ok(());
            }
            node = hit;
            if walker.children(node).any(|n| walker.letter(n) == SEPARATOR) {
                self.find_word(&query[i + 1..], i + 1, starts.suffix)?;
                self.candidate.truncate(i + 1);
            }
        }
        Ok(())
    }

    fn emit(&mut self) -> Result<(), FsaError> {
        let mark = self.out.begin();
        let decoded =
            self.engine
                .decoder
                .decode(&self.candidate, self.surface_len, self.out.buffer());
        if let Err(e) = decoded {
            self.out.rollback(mark);
            return Err(e);
        }
        self.out.commit();
        self.count += 1;
        Ok(())
    }
}
