//! Error types for dimension scaling

use dimens_core::ErrorCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for scaler operations.
pub type Result<T> = std::result::Result<T, ScalerError>;

/// Problems with the content of a resource document or one of its values.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The XML grammar could not be loaded
    #[error("XML grammar unavailable: {0}")]
    Grammar(String),

    /// The document is not well-formed
    #[error("malformed resource document at line {line}, column {column}")]
    Malformed {
        /// 1-based line of the first syntax error
        line: usize,
        /// 1-based column of the first syntax error
        column: usize,
    },

    /// A `<dimen>` element has no `name` attribute
    #[error("<dimen> element at line {line} has no name attribute")]
    MissingName {
        /// 1-based line of the element
        line: usize,
    },

    /// The value has fewer characters than the unit suffix
    #[error("value {value:?} is shorter than its {width}-character unit suffix")]
    ValueTooShort {
        /// The raw value
        value: String,
        /// Expected suffix width
        width: usize,
    },

    /// The value does not end in a unit
    #[error("value {value:?} has no unit suffix")]
    MissingUnit {
        /// The raw value
        value: String,
    },

    /// The magnitude is not a finite number
    #[error("value {value:?} has a non-numeric magnitude {magnitude:?}")]
    InvalidMagnitude {
        /// The raw value
        value: String,
        /// The part left after removing the unit
        magnitude: String,
    },

    /// Scaling overflowed
    #[error("value {value:?} scaled by {factor} is out of range")]
    OutOfRange {
        /// The raw value
        value: String,
        /// Factor that overflowed it
        factor: f64,
    },
}

impl ParseError {
    /// Error code for reports
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Grammar(_) => ErrorCode::Internal,
            Self::Malformed { .. } => ErrorCode::MalformedDocument,
            Self::MissingName { .. } => ErrorCode::MissingAttribute,
            Self::ValueTooShort { .. } | Self::MissingUnit { .. } => ErrorCode::ValueTooShort,
            Self::InvalidMagnitude { .. } | Self::OutOfRange { .. } => ErrorCode::InvalidMagnitude,
        }
    }
}

/// Errors raised while scaling one source file.
#[derive(Debug, Error)]
pub enum ScalerError {
    /// The source document could not be parsed
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// Source file
        path: PathBuf,
        /// What was wrong with it
        #[source]
        source: ParseError,
    },

    /// One dimension value could not be scaled
    #[error("dimension `{name}` in {}: {source}", .path.display())]
    Entry {
        /// Source file
        path: PathBuf,
        /// Name of the offending `<dimen>`
        name: String,
        /// Why it could not be scaled
        #[source]
        source: ParseError,
    },

    /// The source file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Source file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An output directory or file could not be written
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Directory or file being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The source path has no file name to reuse for outputs
    #[error("source path {} has no file name", .0.display())]
    InvalidPath(PathBuf),
}

impl ScalerError {
    /// Error code for reports
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse { source, .. } | Self::Entry { source, .. } => source.code(),
            Self::Read { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => ErrorCode::FileNotFound,
                io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
                _ => ErrorCode::IoError,
            },
            Self::Write { source, .. } => match source.kind() {
                io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
                _ => ErrorCode::WriteFailed,
            },
            Self::InvalidPath(_) => ErrorCode::InvalidPath,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_error_message() {
        let err = ScalerError::Entry {
            path: PathBuf::from("values/dimens.xml"),
            name: "margin".into(),
            source: ParseError::InvalidMagnitude {
                value: "abcdp".into(),
                magnitude: "abc".into(),
            },
        };

        let message = err.to_string();
        assert!(message.contains("margin"));
        assert!(message.contains("values/dimens.xml"));
        assert_eq!(err.code(), ErrorCode::InvalidMagnitude);
    }

    #[test]
    fn test_write_error_code() {
        let err = ScalerError::Write {
            path: PathBuf::from("out/values-large/dimens.xml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        };
        assert_eq!(err.code(), ErrorCode::PermissionDenied);
    }
}
