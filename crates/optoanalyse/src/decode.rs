//! Intensity data decoding.
//!
//! Converts a complete file buffer into an [`IntensityGrid`], dispatching on
//! the version tag. Decoding never touches the file system.

use alloc::vec::Vec;

use crate::endian::{collect_i32_le, collect_u16_le};
use crate::error::{Error, Result};
use crate::format::{parse_header, FormatVersion, Header, MILLI_SCALE};
use crate::grid::{Grid, IntensityGrid};

/// Decode an OptoAnalyse file held entirely in memory.
///
/// Fails with `Error::UnsupportedVersion` for an unknown tag,
/// `Error::UnexpectedEof` when the buffer cannot hold the tag, and
/// `Error::ShapeMismatch` when the samples cannot be reshaped into
/// `height` x `width`. Header fields past the end of the buffer read as
/// zero and so end in a shape mismatch. Bytes after the last whole sample
/// are ignored.
pub fn decode(bytes: &[u8]) -> Result<IntensityGrid> {
    let header = parse_header(bytes)?;
    decode_with_header(bytes, &header)
}

/// Decode the sample region described by an already parsed header.
pub fn decode_with_header(bytes: &[u8], header: &Header) -> Result<IntensityGrid> {
    let raw = bytes.get(header.data_start..).unwrap_or(&[]);
    let height = header.height as usize;
    let width = header.width as usize;

    let grid = match header.version {
        FormatVersion::FixedOffset => {
            let samples: Vec<f64> = collect_i32_le(raw)
                .into_iter()
                .map(|v| f64::from(v) / MILLI_SCALE)
                .collect();
            IntensityGrid::Scaled(Grid::from_shape_vec(height, width, samples)?)
        }
        FormatVersion::PointerIndexed => {
            IntensityGrid::Counts(Grid::from_shape_vec(height, width, collect_u16_le(raw))?)
        }
        FormatVersion::Unknown(tag) => return Err(Error::UnsupportedVersion(tag)),
    };

    tracing::debug!(
        version = header.version.tag(),
        width,
        height,
        dropped_bytes = raw.len() % header.sample_type().size(),
        "decoded OptoAnalyse intensity data"
    );
    Ok(grid)
}

/// Decode a version 256 buffer into raw counts.
///
/// A version 257 buffer fails with `Error::VersionMismatch`.
pub fn decode_counts(bytes: &[u8]) -> Result<Grid<u16>> {
    match decode(bytes)? {
        IntensityGrid::Counts(grid) => Ok(grid),
        IntensityGrid::Scaled(_) => Err(Error::VersionMismatch {
            expected: FormatVersion::PointerIndexed.tag(),
            found: FormatVersion::FixedOffset.tag(),
        }),
    }
}

/// Decode a version 257 buffer into scaled values.
///
/// A version 256 buffer fails with `Error::VersionMismatch`.
pub fn decode_scaled(bytes: &[u8]) -> Result<Grid<f64>> {
    match decode(bytes)? {
        IntensityGrid::Scaled(grid) => Ok(grid),
        IntensityGrid::Counts(_) => Err(Error::VersionMismatch {
            expected: FormatVersion::FixedOffset.tag(),
            found: FormatVersion::PointerIndexed.tag(),
        }),
    }
}
