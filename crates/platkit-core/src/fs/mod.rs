//! Filesystem helpers for platkit.
//!
//! [`ops`] holds the copy/move/delete/create operations and [`index`] the
//! unique-filename computation ([`index::FilenameIndexer`]) used to pick a
//! free destination name.

pub mod index;
pub mod ops;

pub use index::{DirectoryReader, FilenameIndexer, FsDirectoryReader};
