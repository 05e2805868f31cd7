//! Little-endian byte conversion for OptoAnalyse data.
//!
//! Every multi-byte integer in both file layouts is stored least-significant
//! byte first. This module provides scalar reads and writes plus bulk
//! conversion of sample regions into native-endian vectors.

use alloc::vec::Vec;

use bytemuck::pod_collect_to_vec;

/// Read a little-endian `u16` from the first 2 bytes of the slice.
#[inline]
pub fn read_u16_le(buf: &[u8]) -> u16 {
    u16::from_le_bytes([buf[0], buf[1]])
}

/// Read a little-endian `i32` from the first 4 bytes of the slice.
#[inline]
pub fn read_i32_le(buf: &[u8]) -> i32 {
    i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]])
}

/// Write a `u16` in little-endian format into the first 2 bytes of the slice.
#[inline]
pub fn write_u16_le(buf: &mut [u8], val: u16) {
    buf[..2].copy_from_slice(&val.to_le_bytes());
}

/// Write an `i32` in little-endian format into the first 4 bytes of the slice.
#[inline]
pub fn write_i32_le(buf: &mut [u8], val: i32) {
    buf[..4].copy_from_slice(&val.to_le_bytes());
}

// --- Bulk conversions ---
//
// Trailing bytes that do not form a whole element are ignored, so a region
// ending mid-sample yields only its complete samples.

/// Collect consecutive little-endian `u16` values from `raw`.
pub fn collect_u16_le(raw: &[u8]) -> Vec<u16> {
    let whole = raw.len() - raw.len() % 2;
    let mut values: Vec<u16> = pod_collect_to_vec(&raw[..whole]);
    for v in &mut values {
        *v = u16::from_le(*v);
    }
    values
}

/// Collect consecutive little-endian `i32` values from `raw`.
pub fn collect_i32_le(raw: &[u8]) -> Vec<i32> {
    let whole = raw.len() - raw.len() % 4;
    let mut values: Vec<i32> = pod_collect_to_vec(&raw[..whole]);
    for v in &mut values {
        *v = i32::from_le(*v);
    }
    values
}

/// Append `u16` values to `out` in little-endian order.
pub fn extend_u16_le(out: &mut Vec<u8>, values: &[u16]) {
    out.reserve(values.len() * 2);
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

/// Append `i32` values to `out` in little-endian order.
pub fn extend_i32_le(out: &mut Vec<u8>, values: &[i32]) {
    out.reserve(values.len() * 4);
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
}
