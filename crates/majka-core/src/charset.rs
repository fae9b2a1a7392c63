// Accented letters of the internal single-byte alphabet (ISO-8859-2).

/// An uppercase/lowercase pair of accented letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letter {
    /// ISO-8859-2 code of the uppercase form.
    pub upper: u8,
    /// ISO-8859-2 code of the lowercase form.
    pub lower: u8,
    /// Character emitted for `upper` in UTF-8 output.
    pub upper_char: char,
    /// Character emitted for `lower` in UTF-8 output.
    pub lower_char: char,
    /// Uppercase ASCII letter left after removing the diacritic.
    pub base: u8,
}

const fn letter(upper: u8, lower: u8, upper_char: char, lower_char: char, base: u8) -> Letter {
    Letter {
        upper,
        lower,
        upper_char,
        lower_char,
        base,
    }
}

/// Every accented letter the engine folds, strips and re-expands.
///
/// Codes outside this table are passed through unchanged by the diacritic
/// tables and expand to a space in UTF-8 output.
pub const LETTERS: &[Letter] = &[
    letter(0xA1, 0xB1, '\u{0104}', '\u{0105}', b'A'), // Ąą
    letter(0xA3, 0xB3, '\u{0141}', '\u{0142}', b'L'), // Łł
    letter(0xA5, 0xB5, '\u{013D}', '\u{013E}', b'L'), // Ľľ
    letter(0xA6, 0xB6, '\u{015A}', '\u{015B}', b'S'), // Śś
    letter(0xA9, 0xB9, '\u{0160}', '\u{0161}', b'S'), // Šš
    letter(0xAA, 0xBA, '\u{015E}', '\u{015F}', b'S'), // Şş
    letter(0xAB, 0xBB, '\u{0164}', '\u{0165}', b'T'), // Ťť
    letter(0xAC, 0xBC, '\u{0179}', '\u{017A}', b'Z'), // Źź
    letter(0xAE, 0xBE, '\u{017D}', '\u{017E}', b'Z'), // Žž
    letter(0xAF, 0xBF, '\u{017B}', '\u{017C}', b'Z'), // Żż
    letter(0xC0, 0xE0, '\u{0154}', '\u{0155}', b'R'), // Ŕŕ
    letter(0xC1, 0xE1, '\u{00C1}', '\u{00E1}', b'A'), // Áá
    letter(0xC2, 0xE2, '\u{00C2}', '\u{00E2}', b'A'), // Ââ
    letter(0xC3, 0xE3, '\u{0102}', '\u{0103}', b'A'), // Ăă
    letter(0xC4, 0xE4, '\u{00C4}', '\u{00E4}', b'A'), // Ää
    letter(0xC5, 0xE5, '\u{0139}', '\u{013A}', b'L'), // Ĺĺ
    letter(0xC6, 0xE6, '\u{0106}', '\u{0107}', b'C'), // Ćć
    letter(0xC7, 0xE7, '\u{00C7}', '\u{00E7}', b'C'), // Çç
    letter(0xC8, 0xE8, '\u{010C}', '\u{010D}', b'C'), // Čč
    letter(0xC9, 0xE9, '\u{00C9}', '\u{00E9}', b'E'), // Éé
    letter(0xCA, 0xEA, '\u{0118}', '\u{0119}', b'E'), // Ęę
    letter(0xCB, 0xEB, '\u{00CB}', '\u{00EB}', b'E'), // Ëë
    letter(0xCC, 0xEC, '\u{011A}', '\u{011B}', b'E'), // Ěě
    letter(0xCD, 0xED, '\u{00CD}', '\u{00ED}', b'I'), // Íí
    letter(0xCE, 0xEE, '\u{00CE}', '\u{00EE}', b'I'), // Îî
    letter(0xCF, 0xEF, '\u{010E}', '\u{010F}', b'D'), // Ďď
    // Đđ in ISO-8859-2, but dictionaries round-trip it through U+00D0/U+00F0.
    letter(0xD0, 0xF0, '\u{00D0}', '\u{00F0}', b'D'),
    letter(0xD1, 0xF1, '\u{0143}', '\u{0144}', b'N'), // Ńń
    letter(0xD2, 0xF2, '\u{0147}', '\u{0148}', b'N'), // Ňň
    letter(0xD3, 0xF3, '\u{00D3}', '\u{00F3}', b'O'), // Óó
    letter(0xD4, 0xF4, '\u{00D4}', '\u{00F4}', b'O'), // Ôô
    letter(0xD5, 0xF5, '\u{0150}', '\u{0151}', b'O'), // Őő
    letter(0xD6, 0xF6, '\u{00D6}', '\u{00F6}', b'O'), // Öö
    letter(0xD8, 0xF8, '\u{0158}', '\u{0159}', b'R'), // Řř
    letter(0xD9, 0xF9, '\u{016E}', '\u{016F}', b'U'), // Ůů
    letter(0xDA, 0xFA, '\u{00DA}', '\u{00FA}', b'U'), // Úú
    letter(0xDB, 0xFB, '\u{0170}', '\u{0171}', b'U'), // Űű
    letter(0xDC, 0xFC, '\u{00DC}', '\u{00FC}', b'U'), // Üü
    letter(0xDD, 0xFD, '\u{00DD}', '\u{00FD}', b'Y'), // Ýý
    letter(0xDE, 0xFE, '\u{0162}', '\u{0163}', b'T'), // Ţţ
];

/// Lowercase a byte of the internal alphabet.
///
/// Folds ASCII `A-Z` and the two ISO-8859-2 uppercase blocks (`0xA1..=0xAF`
/// and `0xC0..=0xDE`) by their fixed distance to the lowercase block. The
/// block rules also move a few non-letters (`0xD7` to `0xF7`), which the
/// dictionaries rely on.
#[inline]
pub const fn to_lower(b: u8) -> u8 {
    match b {
        b'A'..=b'Z' => b + (b'a' - b'A'),
        0xA1..=0xAF => b + 0x10,
        0xC0..=0xDE => b + 0x20,
        _ => b,
    }
}

/// Returns `true` if lowercasing changes the byte.
#[inline]
pub const fn is_upper(b: u8) -> bool {
    to_lower(b) != b
}
