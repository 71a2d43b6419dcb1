//! platkit core library: small platform helpers.
//!
//! `platkit-core` bundles the filesystem and process utilities used by the
//! `platkit` command-line tool. The centrepiece is
//! [`FilenameIndexer`], which picks a free `name (N).ext` in a directory
//! without stacking suffixes.
//!
//! # Modules
//!
//! - [`fs`] — Copy/move/delete/create operations and unique-filename indexing.
//! - [`process`] — Running scripts and applications as child processes.
//! - [`text`] — String splitting, filtering and numeric checks.
//! - [`config`] — TOML-based user configuration.
//! - [`error`] — Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod config;
pub mod error;
pub mod fs;
pub mod process;
pub mod text;

pub use config::settings::Config;
pub use error::{CoreError, CoreResult};
pub use fs::index::{available_path, available_path_beside, available_path_for};
pub use fs::ops::{contains_string, copy_target, create_folder, delete_target, move_or_rename};
pub use fs::{DirectoryReader, FilenameIndexer, FsDirectoryReader};
pub use process::{run_application, run_script, run_script_output};
