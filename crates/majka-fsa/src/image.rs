// Owned dictionary image: validated header plus the automaton body.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info};

use crate::FsaError;
use crate::format::{self, HEADER_SIZE, Header};

/// Zero bytes appended after the body so fixed-width address reads near the
/// end never leave the buffer.
pub const BODY_PADDING: usize = size_of::<u64>();

/// Immutable automaton image.
///
/// Created once at load, never mutated afterwards. Offset 0 of the body is
/// the automaton root.
#[derive(Clone)]
pub struct DictionaryImage {
    header: Header,
    /// Body bytes followed by `BODY_PADDING` zero bytes.
    body: Vec<u8>,
}

impl std::fmt::Debug for DictionaryImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryImage")
            .field("header", &self.header)
            .field("body_len", &self.len())
            .finish()
    }
}

impl DictionaryImage {
    /// Read a dictionary file.
    ///
    /// Any failure to open or read the file (including a file too short to
    /// hold the header) is reported as [`FsaError::Io`] carrying the path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FsaError> {
        let path = path.as_ref();
        let io_err = |source| FsaError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let file_len = file.metadata().map_err(io_err)?.len() as usize;

        let mut head = [0u8; HEADER_SIZE];
        file.read_exact(&mut head).map_err(io_err)?;
        let header = format::parse_header(&head)?;

        let body_len = file_len.saturating_sub(HEADER_SIZE);
        let mut body = vec![0u8; body_len + BODY_PADDING];
        file.read_exact(&mut body[..body_len]).map_err(io_err)?;

        info!(
            "loaded dictionary {}: {} bytes, record type {}, address width {}",
            path.display(),
            body_len,
            header.record_type,
            header.address_width
        );
        Ok(Self { header, body })
    }

    /// Build an image from a complete in-memory dictionary file.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FsaError> {
        let header = format::parse_header(data)?;
        let body_len = data.len() - HEADER_SIZE;
        let mut body = Vec::with_capacity(body_len + BODY_PADDING);
        body.extend_from_slice(&data[HEADER_SIZE..]);
        body.resize(body_len + BODY_PADDING, 0);
        debug!("dictionary image from memory: {body_len} bytes");
        Ok(Self { header, body })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Body bytes, including the trailing zero padding.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Nominal body length (without padding).
    pub fn len(&self) -> usize {
        self.body.len() - BODY_PADDING
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
