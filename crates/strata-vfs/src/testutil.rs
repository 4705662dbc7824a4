//! In-memory archive fixtures for unit tests.

use crate::archive::{Archive, ReadStream};
use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::io::{self, Cursor};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared close counter, observable after the archive is boxed away.
#[derive(Clone)]
pub(crate) struct Counter(Arc<AtomicUsize>);

impl Counter {
    fn new() -> Self {
        Self(Arc::new(AtomicUsize::new(0)))
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// In-memory [`Archive`] with configurable failures.
pub(crate) struct TestArchive {
    files: HashMap<String, Vec<u8>>,
    open_errors: HashSet<String>,
    fail_close: bool,
    closes: Counter,
}

impl TestArchive {
    pub(crate) fn new() -> Self {
        Self {
            files: HashMap::new(),
            open_errors: HashSet::new(),
            fail_close: false,
            closes: Counter::new(),
        }
    }

    /// Serve `data` at `path`.
    pub(crate) fn with_file(mut self, path: &str, data: &[u8]) -> Self {
        self.files.insert(path.to_string(), data.to_vec());
        self
    }

    /// Fail opens of `path` with a non-NotFound error.
    pub(crate) fn with_open_error(mut self, path: &str) -> Self {
        self.open_errors.insert(path.to_string());
        self
    }

    /// Fail `close` with a structural error (still counted).
    pub(crate) fn with_close_error(mut self) -> Self {
        self.fail_close = true;
        self
    }

    /// Handle to the number of times `close` has run.
    pub(crate) fn close_count(&self) -> Counter {
        self.closes.clone()
    }
}

impl Archive for TestArchive {
    fn open(&self, path: &str) -> Result<ReadStream> {
        if self.open_errors.contains(path) {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("injected failure: {path}"),
            )));
        }

        match self.files.get(path) {
            Some(data) => Ok(Box::new(Cursor::new(data.clone()))),
            None => Err(Error::NotFound(path.to_string())),
        }
    }

    fn close(&mut self) -> Result<()> {
        self.closes.bump();
        if self.fail_close {
            Err(Error::Structural("injected close failure".to_string()))
        } else {
            Ok(())
        }
    }
}
