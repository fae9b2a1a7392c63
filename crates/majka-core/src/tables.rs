// Lookup tables derived from the letter data in `charset`.

use crate::charset::{LETTERS, to_lower};

/// Byte written for codes that have no mapping in the UTF-8 tables.
pub const UNMAPPED: u8 = b' ';

/// First UTF-8 lead byte handled by the reverse tables.
const FIRST_LEAD: u8 = 0xC3;

/// Number of UTF-8 lead bytes (`0xC3..=0xC5`) handled by the reverse tables.
const LEAD_COUNT: usize = 3;

/// Selects the table used by diacritic-tolerant matching.
///
/// A dictionary letter `c` matches a query letter `q` when `q == c` or
/// `q == table[c]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccentTable {
    /// Accented letters map to their bare letter, case preserved.
    StripDiacritics = 0,
    /// Letters map to their lowercase form.
    Lowercase = 1,
    /// Letters map to their bare lowercase form.
    LowercaseStripDiacritics = 2,
}

/// Read-only tables for case folding, diacritic stripping and conversion
/// between UTF-8 and the internal single-byte alphabet.
///
/// Built once per loaded dictionary and shared by all queries.
#[derive(Clone)]
pub struct CodeTables {
    accent: [[u8; 256]; 3],
    lower: [u8; 256],
    first: [u8; 256],
    second: [u8; 256],
    reverse: [[u8; 256]; LEAD_COUNT],
}

impl std::fmt::Debug for CodeTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeTables")
            .field("letters", &LETTERS.len())
            .finish_non_exhaustive()
    }
}

impl Default for CodeTables {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeTables {
    pub fn new() -> Self {
        let mut strip = identity();
        let mut lower = identity();
        let mut first = [UNMAPPED; 256];
        let mut second = [UNMAPPED; 256];
        let mut reverse = [[UNMAPPED; 256]; LEAD_COUNT];

        for (i, slot) in lower.iter_mut().enumerate() {
            *slot = to_lower(i as u8);
        }

        for l in LETTERS {
            strip[l.upper as usize] = l.base;
            strip[l.lower as usize] = l.base.to_ascii_lowercase();

            for (code, ch) in [(l.upper, l.upper_char), (l.lower, l.lower_char)] {
                let mut buf = [0u8; 4];
                let bytes = ch.encode_utf8(&mut buf).as_bytes();
                first[code as usize] = bytes[0];
                second[code as usize] = bytes[1];
                reverse[(bytes[0] - FIRST_LEAD) as usize][bytes[1] as usize] = code;
            }
        }

        let mut both = identity();
        for (i, slot) in both.iter_mut().enumerate() {
            *slot = strip[lower[i] as usize];
        }

        Self {
            accent: [strip, lower, both],
            lower,
            first,
            second,
            reverse,
        }
    }

    /// Lowercase an internal byte.
    #[inline]
    pub fn lower(&self, b: u8) -> u8 {
        self.lower[b as usize]
    }

    #[inline]
    pub fn accent(&self, table: AccentTable) -> &[u8; 256] {
        &self.accent[table as usize]
    }

    /// UTF-8 bytes emitted for an internal byte `>= 0x80`.
    #[inline]
    pub fn expansion(&self, b: u8) -> [u8; 2] {
        [self.first[b as usize], self.second[b as usize]]
    }

    /// Internal byte for a two-byte UTF-8 sequence.
    ///
    /// Returns `None` when `lead` is not one of the supported lead bytes.
    /// Unknown continuation bytes under a supported lead map to a space.
    #[inline]
    pub fn reverse(&self, lead: u8, cont: u8) -> Option<u8> {
        let row = lead.checked_sub(FIRST_LEAD)? as usize;
        self.reverse.get(row).map(|r| r[cont as usize])
    }
}

fn identity() -> [u8; 256] {
    let mut t = [0u8; 256];
    for (i, slot) in t.iter_mut().enumerate() {
        *slot = i as u8;
    }
    t
}
