//! Error types for reading DBPF archives

use std::io;

use thiserror::Error;

/// Why an archive could not be indexed. Every variant is scoped to a single
/// file; a scan reports it and moves on.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("not a DBPF archive (bad magic)")]
    BadMagic,

    #[error("truncated archive: stream ends inside the {0}")]
    Truncated(&'static str),

    #[error("unsupported DBPF version {major}.{minor} (index {index_major}.{index_minor})")]
    UnsupportedVersion {
        major: u32,
        minor: u32,
        index_major: u32,
        index_minor: u32,
    },

    #[error("invalid index: {entries} entries need {expected} bytes, header declares {declared}")]
    IndexMismatch {
        entries: u32,
        declared: u64,
        expected: u64,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FormatError {
    /// Maps an I/O failure, treating a premature end of stream as truncation
    /// of `what`.
    pub(crate) fn from_io(err: io::Error, what: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            FormatError::Truncated(what)
        } else {
            FormatError::Io(err)
        }
    }

    pub(crate) fn from_binrw(err: binrw::Error, what: &'static str) -> Self {
        match err {
            binrw::Error::Io(e) => Self::from_io(e, what),
            // Plain integer fields only fail on a short buffer.
            _ => FormatError::Truncated(what),
        }
    }

    /// Short machine-friendly name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            FormatError::BadMagic => "bad-magic",
            FormatError::Truncated(_) => "truncated",
            FormatError::UnsupportedVersion { .. } => "unsupported-version",
            FormatError::IndexMismatch { .. } => "index-mismatch",
            FormatError::Io(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;
