// Record decoding: candidate path -> `LEMMA:TAG`
//
// A candidate path is `surface ':' payload`, where the surface has the
// length of the normalized query. Payloads are edit scripts: small counts
// are stored as single bytes offset from 'A', literal text is stored as-is.

use log::error;
use majka_core::{CodeTables, Encoding};

use crate::{FsaError, SEPARATOR};

/// Base character of a compact count byte.
const COUNT_BASE: u8 = b'A';

/// Added to a layout code for dictionaries that also encode a removable or
/// insertable prefix.
pub const PREFIX_FLAG: u8 = 128;

/// What the automaton maps from and to; the digits are the layout codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// 1: word form -> lemma and tag
    WordToLemmaTag,
    /// 2: word form -> lemma
    Word,
    /// 3: lemma and tag -> word form
    LemmaTagToWord,
    /// 4: lemma -> word form and tag
    LemmaToWordTag,
    /// 5: lemma -> word form
    LemmaToWord,
    /// 6: word form -> lemma, no tag
    WordToLemma,
    /// 7: word form -> word form
    WordToWord,
}

/// Dictionary-wide record type: a layout plus the prefix variant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordType {
    pub layout: Layout,
    pub prefixed: bool,
}

impl RecordType {
    /// Decode a header record type; `None` for codes outside the fourteen
    /// known layouts.
    pub fn from_code(code: u8) -> Option<Self> {
        let prefixed = code & PREFIX_FLAG != 0;
        let layout = match code & !PREFIX_FLAG {
            1 => Layout::WordToLemmaTag,
            2 => Layout::Word,
            3 => Layout::LemmaTagToWord,
            4 => Layout::LemmaToWordTag,
            5 => Layout::LemmaToWord,
            6 => Layout::WordToLemma,
            7 => Layout::WordToWord,
            _ => return None,
        };
        Some(Self { layout, prefixed })
    }

    pub fn code(self) -> u8 {
        let base = match self.layout {
            Layout::WordToLemmaTag => 1,
            Layout::Word => 2,
            Layout::LemmaTagToWord => 3,
            Layout::LemmaToWordTag => 4,
            Layout::LemmaToWord => 5,
            Layout::WordToLemma => 6,
            Layout::WordToWord => 7,
        };
        if self.prefixed { base | PREFIX_FLAG } else { base }
    }
}

/// Turns matched candidate paths into output records.
#[derive(Debug, Clone, Copy)]
pub struct RecordDecoder<'a> {
    code: u8,
    encoding: Encoding,
    tables: &'a CodeTables,
}

/// Byte sink applying the output encoding.
struct Writer<'a, 'b> {
    out: &'b mut Vec<u8>,
    encoding: Encoding,
    tables: &'a CodeTables,
}

impl Writer<'_, '_> {
    /// Re-expand and append.
    fn text(&mut self, src: &[u8]) {
        self.encoding.expand_into(self.tables, src, self.out);
    }

    /// Final segment: re-expand and terminate the record.
    fn rest(&mut self, src: &[u8]) {
        self.text(src);
        self.out.push(0);
    }

    /// Final segment whose part after the first separator (the tag) is
    /// copied verbatim.
    fn rest_with_tag(&mut self, src: &[u8]) {
        self.encoding
            .expand_head_into(self.tables, src, SEPARATOR, self.out);
        self.out.push(0);
    }

    fn end(&mut self) {
        self.out.push(0);
    }
}

/// Count stored at `i`; bytes past the end read as NUL.
#[inline]
fn count(c: &[u8], i: usize) -> isize {
    c.get(i).copied().unwrap_or(0) as isize - COUNT_BASE as isize
}

/// `len` bytes from `start`, clamped to the path.
#[inline]
fn span(c: &[u8], start: usize, len: isize) -> &[u8] {
    let start = start.min(c.len());
    let end = start.saturating_add(len.max(0) as usize).min(c.len());
    &c[start..end]
}

#[inline]
fn tail(c: &[u8], start: usize) -> &[u8] {
    &c[start.min(c.len())..]
}

impl<'a> RecordDecoder<'a> {
    pub fn new(code: u8, encoding: Encoding, tables: &'a CodeTables) -> Self {
        Self {
            code,
            encoding,
            tables,
        }
    }

    /// Raw record type code from the dictionary header.
    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_code(self.code)
    }

    /// Append exactly one NUL-terminated record for `candidate` to `out`.
    ///
    /// `surface_len` is the length of the normalized query. On error nothing
    /// meaningful is left in `out`; callers roll back to their mark.
    pub fn decode(
        &self,
        candidate: &[u8],
        surface_len: usize,
        out: &mut Vec<u8>,
    ) -> Result<(), FsaError> {
        let Some(record_type) = self.record_type() else {
            error!(
                "invalid dictionary: cannot interpret file of record type {}",
                self.code
            );
            return Err(FsaError::UnsupportedRecordType(self.code));
        };

        let c = candidate;
        let l = surface_len;
        let mut w = Writer {
            out,
            encoding: self.encoding,
            tables: self.tables,
        };

        match (record_type.layout, record_type.prefixed) {
            (Layout::WordToLemmaTag | Layout::LemmaToWordTag, false) => {
                w.text(span(c, 0, l as isize - count(c, l + 1)));
                w.rest_with_tag(tail(c, l + 2));
            }
            (
                Layout::Word | Layout::LemmaToWord | Layout::WordToLemma | Layout::WordToWord,
                false,
            ) => {
                w.text(span(c, 0, l as isize - count(c, l + 1)));
                w.rest(tail(c, l + 2));
            }
            (Layout::LemmaTagToWord, false) => {
                let (first, second) = self.generation_split(c, l, &mut w)?;
                w.text(span(c, 0, first as isize - count(c, second + 1)));
                w.rest(tail(c, second + 2));
            }
            (Layout::WordToLemmaTag, true) => {
                let prefix_len = count(c, l + 1);
                let kept = (l as isize - prefix_len - count(c, l + 2)).max(0);
                w.text(span(c, prefix_len.max(0) as usize, kept));
                w.rest_with_tag(tail(c, l + 3));
            }
            (Layout::Word, true) => {
                w.text(span(c, 0, l as isize));
                w.end();
            }
            (Layout::LemmaTagToWord, true) => {
                let (first, second) = self.generation_split(c, l, &mut w)?;
                let prefix_len = count(c, second + 1);
                w.text(span(c, second + 2, prefix_len));
                let p = prefix_len.max(0) as usize;
                w.text(span(c, 0, first as isize - count(c, second + p + 2)));
                w.rest(tail(c, second + p + 3));
            }
            (Layout::LemmaToWordTag | Layout::LemmaToWord, true) => {
                let prefix_len = count(c, l + 1);
                w.text(span(c, l + 2, prefix_len));
                let p = prefix_len.max(0) as usize;
                w.text(span(c, 0, l as isize - count(c, l + p + 2)));
                if record_type.layout == Layout::LemmaToWordTag {
                    w.rest_with_tag(tail(c, l + p + 3));
                } else {
                    w.rest(tail(c, l + p + 3));
                }
            }
            (Layout::WordToLemma, true) => {
                let prefix_len = count(c, l + 1);
                w.text(span(
                    c,
                    prefix_len.max(0) as usize,
                    l as isize - prefix_len - count(c, l + 2),
                ));
                w.rest(tail(c, l + 3));
            }
            (Layout::WordToWord, true) => {
                let added = count(c, l + 1);
                w.text(span(c, l + 2, added));
                let a = added.max(0) as usize;
                let removed = count(c, l + 2 + a);
                w.text(span(
                    c,
                    removed.max(0) as usize,
                    l as isize - removed - count(c, l + 3 + a),
                ));
                w.rest(tail(c, l + a + 4));
            }
        }
        Ok(())
    }

    /// Locate the two separators of a type-3 path and emit the explicit
    /// segment between them.
    ///
    /// `first` is the first separator in the path. When the query itself
    /// carried no separator, `first` is the one matched after the surface
    /// and the stored segment up to and including the second separator is
    /// written out first. Otherwise the query supplied that part and the
    /// second separator is the matched one at `surface_len`.
    fn generation_split(
        &self,
        c: &[u8],
        surface_len: usize,
        w: &mut Writer<'_, '_>,
    ) -> Result<(usize, usize), FsaError> {
        let first = c
            .iter()
            .position(|&b| b == SEPARATOR)
            .ok_or(FsaError::FormatAnomaly {
                record_type: self.code,
                reason: "path has no separator",
            })?;
        if first != surface_len {
            return Ok((first, surface_len));
        }
        let second = c[first + 1..]
            .iter()
            .position(|&b| b == SEPARATOR)
            .map(|p| first + 1 + p)
            .ok_or(FsaError::FormatAnomaly {
                record_type: self.code,
                reason: "missing explicit segment separator",
            })?;
        w.text(span(c, first + 1, (second - first) as isize));
        Ok((first, second))
    }
}
