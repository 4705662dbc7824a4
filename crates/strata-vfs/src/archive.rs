//! The archive capability — the seam between the mount tree and backends.

use crate::error::Result;
use std::io::Read;

/// A readable byte stream handed out by an archive.
///
/// Each stream is an independent resource owned by the caller; dropping
/// it has no effect on the archive or the mount tree.
pub type ReadStream = Box<dyn Read + Send>;

/// A read-only store that maps internal paths to byte streams.
///
/// Implemented by every backend (directories, zip files, anything
/// registered with [`ArchiveRegistry`]). Paths handed to `open` are
/// normalized, slash-separated, and relative to the archive root; an
/// archive rooted at `/srv/assets` opens `"img/logo.png"` as
/// `/srv/assets/img/logo.png`.
///
/// [`ArchiveRegistry`]: crate::ArchiveRegistry
pub trait Archive: Send {
    /// Open the file at `path` inside the archive for reading.
    ///
    /// A missing entry must be reported as [`Error::NotFound`] — the
    /// mount tree and layered archives route on that variant. Any other
    /// error passes through to the caller untouched.
    ///
    /// [`Error::NotFound`]: crate::Error::NotFound
    fn open(&self, path: &str) -> Result<ReadStream>;

    /// Release the archive's resources.
    ///
    /// The mount tree calls this exactly once per owned archive during
    /// teardown. Backends with nothing to release return `Ok(())`.
    fn close(&mut self) -> Result<()>;
}
