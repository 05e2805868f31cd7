//! Building OptoAnalyse byte streams.
//!
//! Produces files in either layout from raw parts, or re-encodes a decoded
//! [`IntensityGrid`] in the layout matching its version.

use alloc::vec::Vec;

use crate::endian::{extend_i32_le, extend_u16_le, write_u16_le};
use crate::error::{Error, Result};
use crate::format::{
    MILLI_SCALE, POINTER_INDEXED_METADATA_START, VERSION_FIXED_OFFSET, VERSION_POINTER_INDEXED,
};
use crate::grid::IntensityGrid;

fn to_u16_field(field: &'static str, value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| Error::FieldOverflow { field, value })
}

/// Build a version 256 file.
///
/// The pointer is set so that the width and height directly follow
/// `metadata`. Bytes 2..4 are written as zero. `samples` is written as given;
/// its length is not checked against `width * height`.
pub fn encode_pointer_indexed(
    metadata: &[u8],
    width: u16,
    height: u16,
    samples: &[u16],
) -> Result<Vec<u8>> {
    let pointer = to_u16_field("pointer", POINTER_INDEXED_METADATA_START + metadata.len())?;

    let mut out = Vec::with_capacity(pointer as usize + 4 + samples.len() * 2);
    out.resize(POINTER_INDEXED_METADATA_START, 0u8);
    write_u16_le(&mut out[0..], VERSION_POINTER_INDEXED);
    write_u16_le(&mut out[4..], pointer);
    out.extend_from_slice(metadata);
    extend_u16_le(&mut out, &[width, height]);
    extend_u16_le(&mut out, samples);
    Ok(out)
}

/// Build a version 257 file. Samples are stored as thousandths.
pub fn encode_fixed_offset(width: u16, height: u16, samples: &[i32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(6 + samples.len() * 4);
    extend_u16_le(&mut out, &[VERSION_FIXED_OFFSET, width, height]);
    extend_i32_le(&mut out, samples);
    out
}

/// Re-encode a decoded grid in the layout of its version.
///
/// Counts are written with no metadata. Scaled values are multiplied by 1000
/// and rounded to the nearest integer; values outside the `i32` range
/// saturate.
pub fn encode(grid: &IntensityGrid) -> Result<Vec<u8>> {
    let width = to_u16_field("width", grid.width())?;
    let height = to_u16_field("height", grid.height())?;
    match grid {
        IntensityGrid::Counts(g) => encode_pointer_indexed(&[], width, height, g.as_slice()),
        IntensityGrid::Scaled(g) => {
            let samples: Vec<i32> = g
                .as_slice()
                .iter()
                .map(|&v| libm::round(v * MILLI_SCALE) as i32)
                .collect();
            Ok(encode_fixed_offset(width, height, &samples))
        }
    }
}
