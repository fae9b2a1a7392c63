// Conversion between caller text and the internal single-byte alphabet.

use crate::EncodingError;
use crate::tables::CodeTables;

/// Text encoding used for queries and emitted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// Queries and records are UTF-8; accented letters are converted to and
    /// from the internal alphabet.
    #[default]
    Utf8,
    /// Queries and records are ISO-8859-2 and pass through unchanged.
    Latin2,
}

impl Encoding {
    /// Append the internal form of `input` to `out`.
    ///
    /// Reads at most `max_len` input bytes and stops early at a NUL byte. A
    /// two-byte UTF-8 sequence whose lead byte is the last one allowed is
    /// still completed, so `out` never ends in half a letter.
    ///
    /// In UTF-8 mode, ASCII is copied, lead bytes `0xC3..=0xC5` consume one
    /// continuation byte and every other byte `>= 0x80` is rejected.
    pub fn normalize_into(
        self,
        tables: &CodeTables,
        input: &[u8],
        max_len: usize,
        out: &mut Vec<u8>,
    ) -> Result<(), EncodingError> {
        let limit = input.len().min(max_len);
        let mut i = 0;
        while i < limit {
            let b = input[i];
            if b == 0 {
                break;
            }
            match self {
                Encoding::Latin2 => out.push(b),
                Encoding::Utf8 if b < 0x80 => out.push(b),
                Encoding::Utf8 => {
                    let cont = input.get(i + 1).copied().unwrap_or(0);
                    let code = tables
                        .reverse(b, cont)
                        .ok_or(EncodingError::UnsupportedByte { byte: b, offset: i })?;
                    out.push(code);
                    i += 1;
                }
            }
            i += 1;
        }
        Ok(())
    }

    /// Append `src` to `out`, re-expanding internal bytes `>= 0x80`.
    pub fn expand_into(self, tables: &CodeTables, src: &[u8], out: &mut Vec<u8>) {
        match self {
            Encoding::Latin2 => out.extend_from_slice(src),
            Encoding::Utf8 => {
                for &b in src {
                    if b > 0x7F {
                        out.extend_from_slice(&tables.expansion(b));
                    } else {
                        out.push(b);
                    }
                }
            }
        }
    }

    /// Like [`expand_into`](Self::expand_into), but only up to the first
    /// `stop` byte; `stop` and everything after it are copied verbatim.
    pub fn expand_head_into(self, tables: &CodeTables, src: &[u8], stop: u8, out: &mut Vec<u8>) {
        let split = src.iter().position(|&b| b == stop).unwrap_or(src.len());
        self.expand_into(tables, &src[..split], out);
        out.extend_from_slice(&src[split..]);
    }
}
