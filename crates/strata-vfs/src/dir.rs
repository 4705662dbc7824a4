//! Plain-directory archive backend.

use crate::archive::{Archive, ReadStream};
use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Archive backed by a directory on the real filesystem.
///
/// Paths opened through the archive are joined under the root, which is
/// canonicalized once at detection time so later opens are unaffected
/// by working-directory changes.
#[derive(Debug, Clone)]
pub struct DirArchive {
    root: PathBuf,
}

impl DirArchive {
    /// Open `root` directly, bypassing the registry.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().canonicalize()?;
        Ok(Self { root })
    }

    /// Registry entry point: claim `source` iff it is a directory.
    pub(crate) fn detect(source: &Path) -> Result<Option<Box<dyn Archive>>> {
        let meta = fs::metadata(source)?;
        if !meta.is_dir() {
            return Ok(None);
        }

        Ok(Some(Box::new(Self::new(source)?)))
    }

    /// The canonicalized directory root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Archive for DirArchive {
    fn open(&self, path: &str) -> Result<ReadStream> {
        match File::open(self.root.join(path)) {
            Ok(file) => Ok(Box::new(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(Error::NotFound(path.to_string()))
            }
            Err(e) => Err(Error::Io(e)),
        }
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
