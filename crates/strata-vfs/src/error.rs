//! Error types for the overlay filesystem.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for overlay filesystem operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from overlay filesystem operations.
///
/// `NotFound` is the only variant with routing significance: it drives
/// layered-archive fallthrough and the tree's fallback onto a node's
/// own archive. Every other variant propagates to the caller unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// The path does not exist in the archive or subtree it was asked of.
    #[error("not found: {0}")]
    NotFound(String),

    /// No registered backend claimed the source path.
    #[error("unknown archive type: {0}")]
    UnknownArchiveType(PathBuf),

    /// Underlying storage failure, passed through opaquely.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Internal invariant violation. Not expected in normal operation.
    #[error("structural error: {0}")]
    Structural(String),

    /// Multiple archives failed to release during teardown.
    #[error("teardown failed: {} archive(s) failed to close", .0.len())]
    Teardown(Vec<Error>),
}

impl Error {
    /// True if this error means "the path is absent", in any spelling.
    ///
    /// Backends are expected to map their own missing-entry case to
    /// [`Error::NotFound`], but a raw `Io` with `ErrorKind::NotFound`
    /// is recognized too.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            Error::Io(e) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Collapse the failures collected during a teardown pass.
    ///
    /// Zero failures is success, a single failure is returned as-is,
    /// and several are wrapped in [`Error::Teardown`]. Nested teardown
    /// aggregates (a failing subtree inside a failing tree) flatten
    /// into one level.
    pub(crate) fn aggregate(failures: Vec<Error>) -> Result<()> {
        let mut flat = Vec::new();
        for failure in failures {
            match failure {
                Error::Teardown(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }

        match flat.len() {
            0 => Ok(()),
            1 => match flat.pop() {
                Some(only) => Err(only),
                None => Ok(()),
            },
            _ => Err(Error::Teardown(flat)),
        }
    }
}
