//! The overlay filesystem facade.

use crate::archive::ReadStream;
use crate::error::Result;
use crate::path;
use crate::registry::ArchiveRegistry;
use crate::tree::PathTree;
use std::path::Path;

/// A virtual filesystem assembled from archives mounted into one tree.
///
/// The filesystem starts with a single archive mounted at the root;
/// further archives may be mounted at any virtual directory. Paths may
/// be given absolute or relative — relative paths are taken relative to
/// the root — and are normalized before resolution, so `/x/y`, `x/y`,
/// `./x/y`, and `x\y` all name the same location.
///
/// ```no_run
/// use strata_vfs::{ArchiveRegistry, Vfs};
///
/// # fn main() -> strata_vfs::Result<()> {
/// let mut fs = Vfs::new(ArchiveRegistry::new(), "assets/")?;
/// fs.mount("mnt/sub", "extra/")?;
/// // a file at extra/inner/text.txt is now readable as
/// // mnt/sub/inner/text.txt in the virtual tree.
/// let stream = fs.open("mnt/sub/inner/text.txt")?;
/// # drop(stream);
/// fs.close()?;
/// # Ok(())
/// # }
/// ```
pub struct Vfs {
    registry: ArchiveRegistry,
    root: PathTree,
}

impl Vfs {
    /// Build a filesystem with the archive at `root_source` as its root.
    ///
    /// The registry stays owned by the filesystem and serves every
    /// later [`Vfs::mount`] call.
    pub fn new(registry: ArchiveRegistry, root_source: impl AsRef<Path>) -> Result<Self> {
        let root_source = root_source.as_ref();
        let archive = registry.open(root_source)?;
        tracing::debug!(source = %root_source.display(), "opened root archive");

        Ok(Self {
            registry,
            root: PathTree::with_archive(archive),
        })
    }

    /// Mount the archive at `src` onto the virtual directory `dst`.
    ///
    /// `dst` does not need to exist in the tree yet. Mounting over an
    /// already-mounted point layers the new archive on top: lookups try
    /// it first and fall back to the previous occupants.
    pub fn mount(&mut self, dst: &str, src: impl AsRef<Path>) -> Result<()> {
        let src = src.as_ref();
        let archive = self.registry.open(src)?;
        let dst = path::normalize(dst);
        tracing::debug!(dst = %dst, src = %src.display(), "mounting archive");

        self.root.mount(&dst, archive);
        Ok(())
    }

    /// Open the file at virtual path `p` for reading.
    pub fn open(&self, p: &str) -> Result<ReadStream> {
        self.root.open(&path::normalize(p))
    }

    /// Tear down the filesystem, closing every mounted archive.
    ///
    /// Every archive is released exactly once, even if some fail; the
    /// failures come back aggregated. The filesystem should not be used
    /// afterwards.
    pub fn close(&mut self) -> Result<()> {
        self.root.close()
    }
}

impl std::fmt::Debug for Vfs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vfs")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
