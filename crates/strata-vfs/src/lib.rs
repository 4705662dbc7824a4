//! strata-vfs: a layered, read-only virtual filesystem overlay.
//!
//! One logical directory tree is assembled from heterogeneous backing
//! stores — plain directories, zip files, any format registered with
//! the [`ArchiveRegistry`] — mounted at arbitrary virtual paths:
//!
//! ```text
//! /                      # root archive (e.g. a directory)
//! ├── assets/            # zip archive mounted at "assets"
//! └── mods/              # two archives layered at "mods";
//!                        #   the newest mount wins, older ones
//!                        #   remain as fallbacks
//! ```
//!
//! [`Vfs::open`] resolves a virtual path to a readable byte stream,
//! walking the mount tree segment by segment and delegating to the
//! archive that owns the deepest matching mount point.
//!
//! The crate is synchronous and read-only by design: no mutation of the
//! virtual tree, no metadata surface, no stream caching. Mounting and
//! opening are not internally synchronized — perform all mounts before
//! sharing the filesystem across threads, or supply external locking.

mod archive;
mod dir;
mod error;
mod layered;
pub mod path;
mod registry;
#[cfg(test)]
mod testutil;
mod tree;
mod vfs;

pub use archive::{Archive, ReadStream};
pub use dir::DirArchive;
pub use error::{Error, Result};
pub use layered::LayeredArchive;
pub use registry::ArchiveRegistry;
pub use vfs::Vfs;
