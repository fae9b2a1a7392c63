// Query flags

use std::ops::{BitOr, BitOrAssign};

use majka_core::AccentTable;

/// Bitset selecting how a query is matched.
///
/// The bit values are part of the public interface (the command-line tool
/// and bindings pass them through as plain integers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SearchFlags(u8);

impl SearchFlags {
    /// Exact matching only.
    pub const NONE: SearchFlags = SearchFlags(0);
    /// Let a plain letter in the query match its accented forms.
    pub const ADD_DIACRITICS: SearchFlags = SearchFlags(1);
    /// Match regardless of letter case ("john" finds "John").
    pub const IGNORE_CASE: SearchFlags = SearchFlags(2);
    /// Never retry an uppercase query in lowercase.
    pub const DISALLOW_LOWERCASE: SearchFlags = SearchFlags(4);

    const ALL: u8 = 0b111;

    /// Build flags from raw bits, dropping unknown bits.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        SearchFlags(bits & Self::ALL)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: SearchFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: SearchFlags) -> bool {
        self.0 & other.0 != 0
    }

    /// Table used by diacritic-tolerant matching, or `None` for exact
    /// matching.
    pub fn accent_table(self) -> Option<AccentTable> {
        let diacritics = self.contains(Self::ADD_DIACRITICS);
        let case = self.contains(Self::IGNORE_CASE);
        match (diacritics, case) {
            (true, false) => Some(AccentTable::StripDiacritics),
            (false, true) => Some(AccentTable::Lowercase),
            (true, true) => Some(AccentTable::LowercaseStripDiacritics),
            (false, false) => None,
        }
    }
}

impl BitOr for SearchFlags {
    type Output = SearchFlags;

    fn bitor(self, rhs: SearchFlags) -> SearchFlags {
        SearchFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for SearchFlags {
    fn bitor_assign(&mut self, rhs: SearchFlags) {
        self.0 |= rhs.0;
    }
}
