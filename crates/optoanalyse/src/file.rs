//! File loading, delimited-text export, and the path-based entry point.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::decode::decode;
use crate::error::{Error, Result};
use crate::grid::{Grid, IntensityGrid};

/// Extension used for exported text files unless another is requested.
pub const DEFAULT_EXTENSION: &str = "csv";

/// Field separator of exported text files.
pub const EXPORT_DELIMITER: char = '\t';

/// Read the whole file at `path` into memory.
///
/// Any failure to open or read the file is reported as `Error::NotFound`
/// naming the requested path.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let not_found = |source: std::io::Error| Error::NotFound {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(not_found)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(not_found)?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded OptoAnalyse file");
    Ok(bytes)
}

/// A sample that can be written as a text field.
pub trait TextSample {
    fn write_text<W: Write>(&self, out: &mut W) -> std::io::Result<()>;
}

impl TextSample for u16 {
    fn write_text<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        write!(out, "{self}")
    }
}

impl TextSample for f64 {
    fn write_text<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        // Whole numbers keep one fractional digit so scaled data reads as real.
        if self.is_finite() && self.fract() == 0.0 {
            write!(out, "{self:.1}")
        } else {
            write!(out, "{self}")
        }
    }
}

fn write_grid<T: TextSample, W: Write>(grid: &Grid<T>, out: &mut W, delimiter: char) -> Result<()> {
    let mut sep = [0u8; 4];
    let sep = delimiter.encode_utf8(&mut sep).as_bytes();
    for row in grid.rows() {
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                out.write_all(sep)?;
            }
            value.write_text(out)?;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Write `grid` as delimited text: one line per row, no header, no index.
pub fn write_delimited<W: Write>(grid: &IntensityGrid, out: &mut W, delimiter: char) -> Result<()> {
    match grid {
        IntensityGrid::Counts(g) => write_grid(g, out, delimiter),
        IntensityGrid::Scaled(g) => write_grid(g, out, delimiter),
    }
}

/// Path of the text export for `input`: its extension replaced by `extension`.
pub fn export_path<P: AsRef<Path>>(input: P, extension: &str) -> PathBuf {
    input.as_ref().with_extension(extension)
}

/// Write `grid` as tab-separated text next to `input`, replacing its
/// extension. An existing file at the target path is overwritten.
pub fn export<P: AsRef<Path>>(grid: &IntensityGrid, input: P, extension: &str) -> Result<PathBuf> {
    let target = export_path(input, extension);
    let mut out = BufWriter::new(File::create(&target)?);
    write_delimited(grid, &mut out, EXPORT_DELIMITER)?;
    out.flush()?;

    tracing::info!(path = %target.display(), rows = grid.height(), "exported intensity data");
    Ok(target)
}

/// Path-based entry point: load, decode, and optionally export.
#[derive(Debug, Clone)]
pub struct IntensityReader {
    save_to_file: bool,
    extension: String,
}

impl Default for IntensityReader {
    fn default() -> Self {
        IntensityReader {
            save_to_file: false,
            extension: String::from(DEFAULT_EXTENSION),
        }
    }
}

impl IntensityReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also write the decoded grid as text next to the input file.
    pub fn save_to_file(mut self, save: bool) -> Self {
        self.save_to_file = save;
        self
    }

    /// Extension of the exported text file, without the leading dot.
    pub fn extension(mut self, extension: &str) -> Self {
        self.extension = String::from(extension);
        self
    }

    /// Load and decode the file at `path`, exporting it if requested.
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<IntensityGrid> {
        let path = path.as_ref();
        let grid = decode(&load(path)?)?;
        if self.save_to_file {
            export(&grid, path, &self.extension)?;
        }
        Ok(grid)
    }
}

/// Load and decode `path`; when `save_to_file` is set, also export it with
/// the given extension.
pub fn read_intensity<P: AsRef<Path>>(
    path: P,
    save_to_file: bool,
    extension: &str,
) -> Result<IntensityGrid> {
    IntensityReader::new()
        .save_to_file(save_to_file)
        .extension(extension)
        .read(path)
}
