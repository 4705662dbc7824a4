//! Zip archive backend for the strata overlay filesystem.
//!
//! Registration is explicit — there is no global format table:
//!
//! ```no_run
//! use strata_vfs::{ArchiveRegistry, Vfs};
//!
//! # fn main() -> strata_vfs::Result<()> {
//! let mut registry = ArchiveRegistry::new();
//! strata_zip::register(&mut registry);
//!
//! let mut fs = Vfs::new(registry, "root/")?;
//! fs.mount("assets", "bundle.zip")?;
//! # fs.close()
//! # }
//! ```

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Mutex;
use strata_vfs::{Archive, ArchiveRegistry, Error, ReadStream, Result, path};

/// Leading bytes of a local-file-header zip archive.
pub const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Register the zip backend with `registry`.
pub fn register(registry: &mut ArchiveRegistry) {
    registry.register(&ZIP_MAGIC, |source| {
        let archive = ZipArchive::open(source)?;
        Ok(Some(Box::new(archive) as Box<dyn Archive>))
    });
}

/// Archive backed by a zip file.
///
/// Entry lookup normalizes stored entry names before comparison, so
/// archives written with `./`-prefixed or backslashed names still
/// resolve against normalized virtual paths. Opened entries are
/// decompressed eagerly; the returned stream is independent of the
/// archive.
pub struct ZipArchive {
    // The zip reader needs &mut for entry access while `Archive::open`
    // takes &self; close() drops the slot, releasing the file handle.
    inner: Option<Mutex<zip::ZipArchive<File>>>,
}

impl ZipArchive {
    /// Open the zip file at `source`, reading its central directory.
    pub fn open(source: &Path) -> Result<Self> {
        let file = File::open(source)?;
        let reader = zip::ZipArchive::new(file).map_err(zip_error)?;
        tracing::debug!(source = %source.display(), entries = reader.len(), "opened zip archive");

        Ok(Self {
            inner: Some(Mutex::new(reader)),
        })
    }
}

impl Archive for ZipArchive {
    fn open(&self, p: &str) -> Result<ReadStream> {
        let inner = self
            .inner
            .as_ref()
            .ok_or_else(|| Error::Structural("zip archive already closed".to_string()))?;
        let mut reader = inner
            .lock()
            .map_err(|_| Error::Structural("zip archive lock poisoned".to_string()))?;

        // Match against normalized entry names, keeping the stored
        // spelling for the actual lookup.
        let stored = reader
            .file_names()
            .find(|name| path::normalize(name) == p)
            .map(String::from);
        let stored = match stored {
            Some(name) => name,
            None => return Err(Error::NotFound(p.to_string())),
        };

        let mut entry = reader.by_name(&stored).map_err(zip_error)?;
        let mut data = Vec::new();
        entry.read_to_end(&mut data)?;

        Ok(Box::new(Cursor::new(data)))
    }

    fn close(&mut self) -> Result<()> {
        self.inner = None;
        Ok(())
    }
}

fn zip_error(err: zip::result::ZipError) -> Error {
    match err {
        zip::result::ZipError::FileNotFound => Error::NotFound("zip entry".to_string()),
        zip::result::ZipError::Io(e) => Error::Io(e),
        other => Error::Io(std::io::Error::other(other)),
    }
}
