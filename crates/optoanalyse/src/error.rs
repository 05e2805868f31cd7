/// All errors that can occur while decoding, encoding or exporting
/// OptoAnalyse intensity files.
#[derive(Debug)]
pub enum Error {
    /// The buffer is too short to hold the version tag.
    UnexpectedEof,
    /// The version tag at offset 0 is neither 256 nor 257.
    UnsupportedVersion(u16),
    /// The file is a supported version, but not the one the caller asked for.
    VersionMismatch { expected: u16, found: u16 },
    /// The decoded samples cannot be reshaped into `height` x `width`.
    ShapeMismatch {
        height: usize,
        width: usize,
        samples: usize,
    },
    /// A value does not fit the header field it must be written to.
    FieldOverflow { field: &'static str, value: usize },
    /// The input file could not be opened or read.
    #[cfg(feature = "std")]
    NotFound {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    /// An I/O error from the standard library.
    #[cfg(feature = "std")]
    Io(std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::UnexpectedEof => write!(f, "unexpected end of data"),
            Error::UnsupportedVersion(tag) => {
                write!(f, "unsupported OptoAnalyse format version: {tag}")
            }
            Error::VersionMismatch { expected, found } => {
                write!(f, "expected format version {expected}, found {found}")
            }
            Error::ShapeMismatch {
                height,
                width,
                samples,
            } => write!(
                f,
                "cannot reshape {samples} samples into {height} rows x {width} columns"
            ),
            Error::FieldOverflow { field, value } => {
                write!(f, "{field} value {value} does not fit a 16-bit field")
            }
            #[cfg(feature = "std")]
            Error::NotFound { path, .. } => {
                write!(f, "no such file or directory: \"{}\"", path.display())
            }
            #[cfg(feature = "std")]
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotFound { source, .. } => Some(source),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unexpected_eof() {
        let e = Error::UnexpectedEof;
        assert_eq!(e.to_string(), "unexpected end of data");
    }

    #[test]
    fn display_unsupported_version() {
        let e = Error::UnsupportedVersion(1);
        assert_eq!(e.to_string(), "unsupported OptoAnalyse format version: 1");
    }

    #[test]
    fn display_version_mismatch() {
        let e = Error::VersionMismatch {
            expected: 256,
            found: 257,
        };
        assert_eq!(e.to_string(), "expected format version 256, found 257");
    }

    #[test]
    fn display_shape_mismatch() {
        let e = Error::ShapeMismatch {
            height: 2,
            width: 3,
            samples: 5,
        };
        assert_eq!(
            e.to_string(),
            "cannot reshape 5 samples into 2 rows x 3 columns"
        );
    }

    #[test]
    fn display_field_overflow() {
        let e = Error::FieldOverflow {
            field: "width",
            value: 70000,
        };
        assert_eq!(e.to_string(), "width value 70000 does not fit a 16-bit field");
    }

    #[cfg(feature = "std")]
    #[test]
    fn display_not_found_names_path() {
        let e = Error::NotFound {
            path: std::path::PathBuf::from("missing.dat"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(e.to_string(), "no such file or directory: \"missing.dat\"");
    }

    #[cfg(feature = "std")]
    #[test]
    fn display_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e = Error::Io(io_err);
        assert_eq!(e.to_string(), "I/O error: denied");
    }

    #[cfg(feature = "std")]
    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::other("oops");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
    }

    #[test]
    fn debug_formatting() {
        let e = Error::UnsupportedVersion(258);
        let debug = format!("{e:?}");
        assert!(debug.contains("UnsupportedVersion"));
        assert!(debug.contains("258"));
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_error_source() {
        use std::error::Error as StdError;

        let e = Error::UnexpectedEof;
        assert!(e.source().is_none());

        let e = Error::NotFound {
            path: std::path::PathBuf::from("x"),
            source: std::io::Error::other("inner"),
        };
        assert!(e.source().is_some());

        let e = Error::Io(std::io::Error::other("inner"));
        assert!(e.source().is_some());
    }
}
