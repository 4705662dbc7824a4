//! The mount tree: one node per mounted path segment.

use crate::archive::{Archive, ReadStream};
use crate::error::{Error, Result};
use crate::layered::LayeredArchive;
use std::collections::HashMap;

/// A node in the mount hierarchy.
///
/// Each node optionally owns one archive (possibly a [`LayeredArchive`]
/// built up by repeated mounts at the same point) and maps single path
/// segments to child nodes. The tree exclusively owns its archives and
/// releases each exactly once in [`PathTree::close`].
///
/// All paths crossing this type are already normalized (see
/// [`crate::path::normalize`]): slash-separated, no leading slash, with
/// the empty string meaning "this node itself".
#[derive(Default)]
pub(crate) struct PathTree {
    archive: Option<Box<dyn Archive>>,
    children: HashMap<String, PathTree>,
}

impl PathTree {
    /// Create a root node owning `archive`.
    pub(crate) fn with_archive(archive: Box<dyn Archive>) -> Self {
        Self {
            archive: Some(archive),
            children: HashMap::new(),
        }
    }

    /// Mount `archive` at `path` below this node.
    ///
    /// Intermediate nodes are created lazily. An empty `path` targets
    /// this node itself: if it already owns an archive, the new one is
    /// layered on top and the previous occupant (with its own layering
    /// intact) becomes the fallback. Mounting never fails; detector
    /// errors are raised by the caller before this runs.
    pub(crate) fn mount(&mut self, path: &str, archive: Box<dyn Archive>) {
        if path.is_empty() {
            self.archive = Some(match self.archive.take() {
                Some(existing) => Box::new(LayeredArchive::new(archive, existing)),
                None => archive,
            });
            return;
        }

        let (first, rest) = match path.split_once('/') {
            Some((first, rest)) => (first, rest),
            None => (path, ""),
        };

        self.children.entry(first.to_string()).or_default().mount(rest, archive);
    }

    /// Resolve `path` to a readable stream.
    ///
    /// A final segment is answered by this node's own archive, even
    /// when a child subtree of the same name exists. For longer paths
    /// the walk descends into the child named by the first segment; if
    /// no such child is mounted, this node's archive is asked for the
    /// entire unsplit path, which lets an archive whose internal layout
    /// mirrors the directory structure serve nested paths that were
    /// never explicitly mounted.
    pub(crate) fn open(&self, path: &str) -> Result<ReadStream> {
        let (first, rest) = match path.split_once('/') {
            Some((first, rest)) => (first, rest),
            None => {
                return match &self.archive {
                    Some(archive) => archive.open(path),
                    None => Err(Error::NotFound(path.to_string())),
                };
            }
        };

        if let Some(child) = self.children.get(first) {
            return child.open(rest);
        }

        match &self.archive {
            Some(archive) => archive.open(path),
            None => Err(Error::NotFound(path.to_string())),
        }
    }

    /// Tear down this subtree, releasing every owned archive once.
    ///
    /// The pass is arena-style: a failing archive does not abort it.
    /// Children are drained as they close and all failures come back
    /// aggregated, so a second call is a no-op.
    pub(crate) fn close(&mut self) -> Result<()> {
        let mut failures = Vec::new();

        if let Some(mut archive) = self.archive.take() {
            if let Err(e) = archive.close() {
                failures.push(e);
            }
        }

        for (_, mut child) in self.children.drain() {
            if let Err(e) = child.close() {
                failures.push(e);
            }
        }

        Error::aggregate(failures)
    }
}
