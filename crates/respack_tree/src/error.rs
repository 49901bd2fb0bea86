//! Error types that can be emitted from this library

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`zip::result::ZipError`]
    #[error(transparent)]
    ZipError(#[from] zip::result::ZipError),

    /// The archive filename is empty
    #[error("the filename of the archive is empty")]
    EmptyPath,

    /// The archive filename does not point at a regular file
    #[error("the filename \"{}\" does not refer to a regular file", .0.display())]
    NotAFile(PathBuf),

    /// The archive filename has the wrong extension
    #[error("the filename \"{}\" extension name is not .{expected}", path.display())]
    WrongExtension {
        /// Path that was rejected
        path: PathBuf,
        /// Extension the builder was configured with
        expected: String,
    },

    /// The archive reader refused to open the file
    #[error("failed to open archive {}, error = {source}", path.display())]
    #[diagnostic(help("make sure the file is a valid zip archive"))]
    Open {
        /// Path that was opened
        path: PathBuf,
        /// Native error from the reader
        source: zip::result::ZipError,
    },

    /// A single entry could not be opened for reading
    #[error("failed to open file in archive. index : {index}, file name : {name}, error = {source}")]
    EntryOpen {
        /// Position of the entry in the archive
        index: usize,
        /// Full name of the entry
        name: String,
        /// Error reported by the reader
        source: Box<Error>,
    },

    /// A single entry failed while being decompressed
    #[error("failed to read file in archive. index : {index}, file name : {name}, error = {source}")]
    EntryRead {
        /// Position of the entry in the archive
        index: usize,
        /// Full name of the entry
        name: String,
        /// Error reported while reading
        source: std::io::Error,
    },

    /// A single entry yielded fewer bytes than it declared
    #[error("file in archive is truncated. index : {index}, file name : {name}, expected {expected} bytes, read {actual}")]
    EntryTruncated {
        /// Position of the entry in the archive
        index: usize,
        /// Full name of the entry
        name: String,
        /// Declared uncompressed size
        expected: u64,
        /// Bytes actually read
        actual: u64,
    },

    /// The reader has no name for an entry index
    #[error("unable to find the name of entry at index {0}")]
    MissingEntryName(usize),
}

impl Error {
    /// Whether this error aborts a whole build rather than a single entry.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::EmptyPath | Error::NotAFile(_) | Error::WrongExtension { .. } | Error::Open { .. }
        )
    }
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
