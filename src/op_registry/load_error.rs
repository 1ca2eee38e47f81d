use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::protobuf::ProtobufError;

/// Errors that occur when loading a registry dump.
#[derive(Debug)]
pub struct LoadError {
    inner: LoadErrorImpl,
}

impl LoadError {
    /// Return the category of error.
    pub fn kind(&self) -> LoadErrorKind {
        self.inner.kind()
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt(f)
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

impl From<LoadErrorImpl> for LoadError {
    fn from(val: LoadErrorImpl) -> Self {
        Self { inner: val }
    }
}

/// Categories of error when loading a registry dump.
///
/// See [`LoadError::kind`].
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum LoadErrorKind {
    /// An I/O error occurred reading the file.
    IoError,

    /// The file content is not a valid registry dump.
    ParseError,

    /// The file type could not be determined.
    UnknownFileType,
}

/// The internal implementation of [`LoadError`].
#[derive(Debug)]
pub(crate) enum LoadErrorImpl {
    /// An error occurred reading the file from disk.
    ReadFailed(std::io::Error),

    /// The JSON dump is malformed or doesn't match the expected structure.
    JsonParseFailed(serde_json::Error),

    /// An `OpProto` message in a protobuf dump could not be decoded.
    ProtobufParseFailed {
        /// Index of the message in the dump.
        index: usize,
        error: ProtobufError,
    },

    /// The file type of the dump could not be determined.
    UnknownFileType,
}

impl LoadErrorImpl {
    fn kind(&self) -> LoadErrorKind {
        type Kind = LoadErrorKind;

        match self {
            Self::ReadFailed(_) => Kind::IoError,
            Self::JsonParseFailed(_) => Kind::ParseError,
            Self::ProtobufParseFailed { .. } => Kind::ParseError,
            Self::UnknownFileType => Kind::UnknownFileType,
        }
    }

    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadFailed(err) => Some(err),
            Self::JsonParseFailed(err) => Some(err),
            Self::ProtobufParseFailed { error, .. } => Some(error),
            Self::UnknownFileType => None,
        }
    }
}

impl Display for LoadErrorImpl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadFailed(e) => write!(f, "read error: {e}"),
            Self::JsonParseFailed(e) => write!(f, "parse error: {e}"),
            Self::ProtobufParseFailed { index, error } => {
                write!(f, "parse error in operator {index}: {error}")
            }
            Self::UnknownFileType => write!(f, "unknown registry file type"),
        }
    }
}
