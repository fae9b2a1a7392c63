// Dictionary binary format: header parsing, validation

use bytemuck::{Pod, Zeroable};

use crate::FsaError;

/// Magic bytes at the start of every dictionary file.
pub const MAGIC: [u8; 4] = *b"\\fsa";

/// Supported automaton format revision.
pub const FSA_REVISION: u8 = 5;

/// Supported dictionary container major version.
pub const DICT_VERSION_MAJOR: u8 = 1;

/// Size of the dictionary header in bytes.
pub const HEADER_SIZE: usize = 20;

/// Header as stored on disk.
///
/// Multi-byte fields are little-endian byte arrays so the struct has no
/// alignment requirement and can be read from any offset.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawHeader {
    pub magic: [u8; 4],
    pub revision: u8,
    pub filler: u8,
    pub annotation_separator: u8,
    /// Low 4 bits: width of the child address field. High bits reserved.
    pub address_field: u8,
    pub record_type: u8,
    pub version_major: u8,
    pub version_minor: [u8; 2],
    pub max_result: [u8; 2],
    pub max_results_count: [u8; 2],
    pub max_results_size: [u8; 4],
}

const _: () = assert!(size_of::<RawHeader>() == HEADER_SIZE);

/// Parsed and validated dictionary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Selects the record layout used to decode matches.
    pub record_type: u8,
    /// Bytes used to encode a child address (1..=8).
    pub address_width: usize,
    /// Stored but not used by lookup.
    pub annotation_separator: u8,
    pub version_minor: u16,
    pub max_result: u16,
    pub max_results_count: u16,
    /// Output arena size hint, excluding query scratch space.
    pub max_results_size: u32,
}

/// Parses and validates the 20-byte header at the start of `data`.
///
/// Checks run in file order: magic, format revision, container version,
/// then the address field width.
pub fn parse_header(data: &[u8]) -> Result<Header, FsaError> {
    if data.len() < HEADER_SIZE {
        return Err(FsaError::TooShort {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }

    let raw: RawHeader = bytemuck::pod_read_unaligned(&data[..HEADER_SIZE]);

    if raw.magic != MAGIC {
        return Err(FsaError::InvalidFormat);
    }
    if raw.revision != FSA_REVISION {
        return Err(FsaError::UnsupportedFsaVersion(raw.revision));
    }
    if raw.version_major != DICT_VERSION_MAJOR {
        return Err(FsaError::UnsupportedDictVersion(raw.version_major));
    }

    let width = raw.address_field & 0x0F;
    if width == 0 || width as usize > size_of::<u64>() {
        return Err(FsaError::InvalidAddressWidth(width));
    }

    Ok(Header {
        record_type: raw.record_type,
        address_width: width as usize,
        annotation_separator: raw.annotation_separator,
        version_minor: u16::from_le_bytes(raw.version_minor),
        max_result: u16::from_le_bytes(raw.max_result),
        max_results_count: u16::from_le_bytes(raw.max_results_count),
        max_results_size: u32::from_le_bytes(raw.max_results_size),
    })
}

/// A minimal valid file: header with the given record type and address
/// width, followed by `body`.
#[cfg(test)]
pub(crate) fn test_file(record_type: u8, width: u8, body: &[u8]) -> Vec<u8> {
    let mut buf = vec![0u8; HEADER_SIZE];
    buf[..4].copy_from_slice(&MAGIC);
    buf[4] = FSA_REVISION;
    buf[7] = width;
    buf[8] = record_type;
    buf[9] = DICT_VERSION_MAJOR;
    buf.extend_from_slice(body);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_header(record_type: u8, width: u8) -> Vec<u8> {
        let mut buf = test_file(record_type, width, &[]);
        buf[5] = b'_';
        buf[6] = b'+';
        buf[10..12].copy_from_slice(&3u16.to_le_bytes());
        buf[12..14].copy_from_slice(&40u16.to_le_bytes());
        buf[14..16].copy_from_slice(&12u16.to_le_bytes());
        buf[16..20].copy_from_slice(&4096u32.to_le_bytes());
        buf
    }

    #[test]
    fn parse_valid_header() {
        let header = parse_header(&make_header(1, 3)).unwrap();
        assert_eq!(header.record_type, 1);
        assert_eq!(header.address_width, 3);
        assert_eq!(header.annotation_separator, b'+');
        assert_eq!(header.version_minor, 3);
        assert_eq!(header.max_result, 40);
        assert_eq!(header.max_results_count, 12);
        assert_eq!(header.max_results_size, 4096);
    }

    #[test]
    fn reserved_width_bits_are_ignored() {
        let header = parse_header(&make_header(129, 0xA2)).unwrap();
        assert_eq!(header.address_width, 2);
        assert_eq!(header.record_type, 129);
    }

    #[test]
    fn reject_too_short() {
        let err = parse_header(&[0u8; 8]).unwrap_err();
        assert!(matches!(
            err,
            FsaError::TooShort {
                expected: 20,
                actual: 8
            }
        ));
    }

    #[test]
    fn reject_invalid_magic() {
        let mut data = make_header(1, 3);
        data[1] = b'F';
        assert!(matches!(parse_header(&data), Err(FsaError::InvalidFormat)));
    }

    #[test]
    fn reject_revision() {
        let mut data = make_header(1, 3);
        data[4] = 6;
        assert!(matches!(
            parse_header(&data),
            Err(FsaError::UnsupportedFsaVersion(6))
        ));
    }

    #[test]
    fn reject_container_version() {
        let mut data = make_header(1, 3);
        data[9] = 2;
        assert!(matches!(
            parse_header(&data),
            Err(FsaError::UnsupportedDictVersion(2))
        ));
    }

    #[test]
    fn reject_zero_width() {
        let data = make_header(1, 0xF0);
        assert!(matches!(
            parse_header(&data),
            Err(FsaError::InvalidAddressWidth(0))
        ));
    }

    #[test]
    fn unknown_record_type_is_not_a_header_error() {
        // Record types are checked when the first match is decoded.
        assert!(parse_header(&make_header(42, 2)).is_ok());
    }
}
