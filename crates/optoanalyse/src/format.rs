//! Version tag dispatch and header parsing for the two OptoAnalyse layouts.
//!
//! Version 256 stores a pointer at offset 4; the width and height sit in the
//! four bytes immediately before the location it resolves to, and pixel data
//! follows. The metadata between the pointer field and the width varies in
//! length between software releases, so nothing past offset 6 is fixed.
//!
//! Version 257 has fixed offsets: width at 2, height at 4, samples from 6.

use crate::endian::read_u16_le;
use crate::error::{Error, Result};

/// Version tag of the pointer-indexed layout.
pub const VERSION_POINTER_INDEXED: u16 = 256;
/// Version tag of the fixed-offset layout.
pub const VERSION_FIXED_OFFSET: u16 = 257;

/// Byte offset of the intensity pointer in a version 256 file.
pub const METADATA_LENGTH_POSITION: usize = 4;
/// First byte after the version 256 pointer field.
pub const POINTER_INDEXED_METADATA_START: usize = METADATA_LENGTH_POSITION + 2;

/// Byte offset of the width field in a version 257 file.
pub const FIXED_OFFSET_WIDTH: usize = 2;
/// Byte offset of the height field in a version 257 file.
pub const FIXED_OFFSET_HEIGHT: usize = 4;
/// Byte offset of the first sample in a version 257 file.
pub const FIXED_OFFSET_DATA_START: usize = 6;

/// Divisor applied to version 257 samples (stored as thousandths).
pub const MILLI_SCALE: f64 = 1000.0;

/// Format version read from the leading tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatVersion {
    /// Tag 256: header located through the intensity pointer, `u16` samples.
    PointerIndexed,
    /// Tag 257: fixed header offsets, `i32` samples in thousandths.
    FixedOffset,
    /// Any other tag.
    Unknown(u16),
}

impl FormatVersion {
    pub fn from_tag(tag: u16) -> Self {
        match tag {
            VERSION_POINTER_INDEXED => FormatVersion::PointerIndexed,
            VERSION_FIXED_OFFSET => FormatVersion::FixedOffset,
            other => FormatVersion::Unknown(other),
        }
    }

    pub fn tag(self) -> u16 {
        match self {
            FormatVersion::PointerIndexed => VERSION_POINTER_INDEXED,
            FormatVersion::FixedOffset => VERSION_FIXED_OFFSET,
            FormatVersion::Unknown(tag) => tag,
        }
    }

    /// Sample encoding for this version, or `None` for an unknown tag.
    pub fn sample_type(self) -> Option<SampleType> {
        match self {
            FormatVersion::PointerIndexed => Some(SampleType::U16),
            FormatVersion::FixedOffset => Some(SampleType::I32),
            FormatVersion::Unknown(_) => None,
        }
    }
}

/// On-disk encoding of one intensity sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    U16,
    I32,
}

impl SampleType {
    /// Size of one sample in bytes.
    pub fn size(self) -> usize {
        match self {
            SampleType::U16 => 2,
            SampleType::I32 => 4,
        }
    }
}

/// Parsed header of a supported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: FormatVersion,
    pub width: u16,
    pub height: u16,
    /// Byte offset of the first sample.
    pub data_start: usize,
    /// Raw intensity pointer (version 256 only).
    pub pointer: Option<u16>,
}

impl Header {
    pub fn sample_type(&self) -> SampleType {
        // Headers are only built for supported versions.
        self.version.sample_type().unwrap_or(SampleType::U16)
    }

    /// Number of whole samples available in `bytes` after `data_start`.
    pub fn available_samples(&self, bytes: &[u8]) -> usize {
        bytes.len().saturating_sub(self.data_start) / self.sample_type().size()
    }

    /// Opaque metadata between the pointer field and the width field.
    ///
    /// Empty for version 257 and for a version 256 pointer that leaves no
    /// room for metadata.
    pub fn metadata<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        match self.pointer {
            Some(pointer) => bytes
                .get(POINTER_INDEXED_METADATA_START..pointer as usize)
                .unwrap_or(&[]),
            None => &[],
        }
    }
}

/// Read a `u16` header field, treating bytes past the end of the buffer as
/// zero. A field that is partly or wholly missing therefore yields a small
/// or zero dimension, which the reshape rejects.
fn field_u16(bytes: &[u8], offset: usize) -> u16 {
    let mut field = [0u8; 2];
    let available = bytes.get(offset..).unwrap_or(&[]);
    let n = available.len().min(2);
    field[..n].copy_from_slice(&available[..n]);
    read_u16_le(&field)
}

/// Read the version tag at offset 0.
pub fn detect_version(bytes: &[u8]) -> Result<FormatVersion> {
    bytes
        .get(0..2)
        .map(|tag| FormatVersion::from_tag(read_u16_le(tag)))
        .ok_or(Error::UnexpectedEof)
}

/// Parse the header of a version 256 or 257 file.
///
/// Returns `Error::UnexpectedEof` when the buffer cannot hold the version
/// tag and `Error::UnsupportedVersion` for any tag other than 256 or 257.
/// Fields past the end of the buffer read as zero.
pub fn parse_header(bytes: &[u8]) -> Result<Header> {
    let version = detect_version(bytes)?;
    match version {
        FormatVersion::PointerIndexed => {
            let pointer = field_u16(bytes, METADATA_LENGTH_POSITION);
            let data_start = pointer as usize + METADATA_LENGTH_POSITION;
            let width = field_u16(bytes, data_start - 4);
            let height = field_u16(bytes, data_start - 2);
            Ok(Header {
                version,
                width,
                height,
                data_start,
                pointer: Some(pointer),
            })
        }
        FormatVersion::FixedOffset => Ok(Header {
            version,
            width: field_u16(bytes, FIXED_OFFSET_WIDTH),
            height: field_u16(bytes, FIXED_OFFSET_HEIGHT),
            data_start: FIXED_OFFSET_DATA_START,
            pointer: None,
        }),
        FormatVersion::Unknown(tag) => {
            tracing::warn!(tag, "unsupported OptoAnalyse version tag");
            Err(Error::UnsupportedVersion(tag))
        }
    }
}
