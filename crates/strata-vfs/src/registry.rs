//! Archive format detection.
//!
//! The registry is an explicit object owned by the [`Vfs`] constructor
//! rather than process-global state: backends are registered with
//! explicit calls before any filesystem is built, so there are no
//! load-order dependencies between backend crates.
//!
//! [`Vfs`]: crate::Vfs

use crate::archive::Archive;
use crate::dir::DirArchive;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

type OpenFn = Box<dyn Fn(&Path) -> Result<Option<Box<dyn Archive>>> + Send + Sync>;

struct Backend {
    magic: Vec<u8>,
    open: OpenFn,
}

/// Registry of known archive formats.
///
/// Each backend is a `(magic, open)` pair. Detection sniffs the source
/// file's leading bytes, skips backends whose magic cannot match, and
/// tries the rest in registration order. A zero-length magic means
/// "always attempt"; the directory backend registers that way and is
/// always first.
pub struct ArchiveRegistry {
    backends: Vec<Backend>,
}

impl Default for ArchiveRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveRegistry {
    /// Create a registry with the directory backend pre-registered.
    pub fn new() -> Self {
        let mut registry = Self {
            backends: Vec::new(),
        };
        registry.register(&[], DirArchive::detect);
        registry
    }

    /// Register an archive format.
    ///
    /// `open` is handed the source path and returns `Ok(Some(_))` to
    /// claim it, `Ok(None)` to decline, or an error to abort detection
    /// — an error from a matching backend is returned to the caller of
    /// the mount that triggered it.
    pub fn register<F>(&mut self, magic: &[u8], open: F)
    where
        F: Fn(&Path) -> Result<Option<Box<dyn Archive>>> + Send + Sync + 'static,
    {
        self.backends.push(Backend {
            magic: magic.to_vec(),
            open: Box::new(open),
        });
    }

    /// Number of registered backends.
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Check if no backends are registered.
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Detect the format of `source` and open it as an archive.
    ///
    /// Fails with [`Error::UnknownArchiveType`] only when every
    /// registered backend declines the source.
    pub fn open(&self, source: &Path) -> Result<Box<dyn Archive>> {
        let header = self.sniff(source)?;

        for backend in &self.backends {
            if !backend.magic.is_empty() && !header.starts_with(&backend.magic) {
                continue;
            }

            if let Some(archive) = (backend.open)(source)? {
                tracing::debug!(source = %source.display(), "backend claimed archive source");
                return Ok(archive);
            }
        }

        Err(Error::UnknownArchiveType(source.to_path_buf()))
    }

    /// Read up to max-magic-length leading bytes of `source`.
    ///
    /// Directories and other non-regular files sniff as empty, leaving
    /// only zero-magic backends in play for them.
    fn sniff(&self, source: &Path) -> Result<Vec<u8>> {
        let want = self.backends.iter().map(|b| b.magic.len()).max().unwrap_or(0);
        if want == 0 {
            return Ok(Vec::new());
        }

        let meta = std::fs::metadata(source)?;
        if !meta.is_file() {
            return Ok(Vec::new());
        }

        let mut header = Vec::with_capacity(want);
        File::open(source)?.take(want as u64).read_to_end(&mut header)?;
        Ok(header)
    }
}

impl std::fmt::Debug for ArchiveRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveRegistry")
            .field("backends", &self.backends.len())
            .finish()
    }
}
