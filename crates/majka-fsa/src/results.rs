// Output arena and record views

use crate::SEPARATOR;

/// Caller-owned output arena.
///
/// Each match is appended as one NUL-terminated `LEMMA:TAG` record. Size it
/// with [`Fsa::max_results_size`](crate::Fsa::max_results_size) (or use
/// [`Fsa::new_arena`](crate::Fsa::new_arena)) before the first query so no
/// query reallocates it.
#[derive(Debug, Clone, Default)]
pub struct ResultArena {
    bytes: Vec<u8>,
    count: usize,
}

impl ResultArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            count: 0,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Drop all records, keeping the allocation.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.count = 0;
    }

    /// Raw arena contents: records each followed by a NUL byte.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Iterate records in the order they were written.
    pub fn iter(&self) -> impl Iterator<Item = Record<'_>> {
        self.bytes
            .split(|&b| b == 0)
            .take(self.count)
            .map(Record)
    }

    /// Start a record; returns a mark for [`rollback`](Self::rollback).
    pub(crate) fn begin(&mut self) -> usize {
        self.bytes.len()
    }

    pub(crate) fn buffer(&mut self) -> &mut Vec<u8> {
        &mut self.bytes
    }

    /// Finish the record started by `begin`.
    pub(crate) fn commit(&mut self) {
        self.count += 1;
    }

    pub(crate) fn rollback(&mut self, mark: usize) {
        self.bytes.truncate(mark);
    }
}

/// One record in a [`ResultArena`], without its NUL terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a>(&'a [u8]);

impl<'a> Record<'a> {
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// Bytes before the first separator (the whole record if there is none).
    pub fn lemma(&self) -> &'a [u8] {
        match self.split_at_separator() {
            Some((lemma, _)) => lemma,
            None => self.0,
        }
    }

    /// Bytes after the first separator. The tag is opaque dictionary data.
    pub fn tag(&self) -> Option<&'a [u8]> {
        self.split_at_separator().map(|(_, tag)| tag)
    }

    pub fn to_analysis(&self) -> Analysis {
        Analysis {
            lemma: String::from_utf8_lossy(self.lemma()).into_owned(),
            tag: self.tag().map(|t| String::from_utf8_lossy(t).into_owned()),
        }
    }

    fn split_at_separator(&self) -> Option<(&'a [u8], &'a [u8])> {
        let pos = self.0.iter().position(|&b| b == SEPARATOR)?;
        Some((&self.0[..pos], &self.0[pos + 1..]))
    }
}

impl std::fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.0))
    }
}

/// Owned lemma/tag pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Analysis {
    pub lemma: String,
    pub tag: Option<String>,
}
