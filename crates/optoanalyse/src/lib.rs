#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod decode;
pub mod encode;
pub mod endian;
pub mod error;
pub mod format;
pub mod grid;

#[cfg(feature = "std")]
pub mod file;

#[cfg(feature = "array")]
mod array;

pub use decode::decode;
pub use error::{Error, Result};
pub use format::{FormatVersion, Header};
pub use grid::{Grid, IntensityGrid};

#[cfg(feature = "std")]
pub use file::{read_intensity, IntensityReader};
