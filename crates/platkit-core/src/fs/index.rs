//! Collision-free file names with ` (N)` suffixes.
//!
//! [`FilenameIndexer::available_path`] turns a wanted `base + extension`
//! into a path that is free in the target directory. When the plain name is
//! taken it appends ` (N)`, where `N` is one more than the highest index
//! already used by siblings that share the same base. Existing suffixes on
//! the wanted name are replaced, never stacked: `report (2)` becomes
//! `report (3)`, not `report (2) (1)`.
//!
//! The result is a point-in-time answer. Nothing is created or reserved, so
//! callers that race other writers must still create the file exclusively.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Read-only view of a directory, as needed by [`FilenameIndexer`].
pub trait DirectoryReader {
    /// Succeeds when `dir` exists and is a directory.
    fn check_directory(&self, dir: &Path) -> io::Result<()>;

    /// Returns `Ok(true)` if anything (file, directory, dangling symlink)
    /// sits at `path` and `Ok(false)` only if nothing does. Any other
    /// failure to tell is an error.
    fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Lists the full file name of every entry directly inside `dir`.
    fn entry_names(&self, dir: &Path) -> io::Result<Vec<String>>;
}

impl<T: DirectoryReader + ?Sized> DirectoryReader for &T {
    fn check_directory(&self, dir: &Path) -> io::Result<()> {
        (**self).check_directory(dir)
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        (**self).exists(path)
    }

    fn entry_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        (**self).entry_names(dir)
    }
}

/// [`DirectoryReader`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectoryReader;

impl DirectoryReader for FsDirectoryReader {
    fn check_directory(&self, dir: &Path) -> io::Result<()> {
        let meta = std::fs::metadata(dir)?;
        if meta.is_dir() {
            Ok(())
        } else {
            Err(io::Error::other(CoreError::NotADirectory(dir.to_path_buf())))
        }
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        // symlink_metadata so a dangling link still counts as taken
        match std::fs::symlink_metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn entry_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for dir_entry in std::fs::read_dir(dir)? {
            let name = dir_entry?.file_name();
            names.push(name.to_string_lossy().into_owned());
        }
        Ok(names)
    }
}

/// Computes free, indexed file names inside a directory.
#[derive(Debug, Clone, Default)]
pub struct FilenameIndexer<R = FsDirectoryReader> {
    reader: R,
}

impl FilenameIndexer<FsDirectoryReader> {
    /// Creates an indexer over the real filesystem.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: DirectoryReader> FilenameIndexer<R> {
    /// Creates an indexer over a custom [`DirectoryReader`].
    pub fn with_reader(reader: R) -> Self {
        Self { reader }
    }

    /// Returns a path in `directory` for `base_name + extension` that no
    /// existing entry occupies.
    ///
    /// If the plain name is free it is returned unchanged and the directory
    /// is not enumerated. Otherwise any trailing ` (...)` is stripped from
    /// `base_name` and the result is `"<base> (<N>)<extension>"`, with `N`
    /// one past the highest numeric index among entries sharing that base
    /// (at least `1`).
    ///
    /// `extension` is appended verbatim and should include its leading dot.
    ///
    /// # Errors
    ///
    /// - [`CoreError::DirectoryAccess`] if `directory` is missing, is not a
    ///   directory, cannot be enumerated, or the wanted name cannot be
    ///   checked for existence.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use platkit_core::FilenameIndexer;
    /// use std::path::Path;
    ///
    /// let indexer = FilenameIndexer::new();
    /// let path = indexer.available_path(Path::new("/tmp"), "notes", ".txt").unwrap();
    /// println!("{}", path.display());
    /// ```
    pub fn available_path(
        &self,
        directory: &Path,
        base_name: &str,
        extension: &str,
    ) -> CoreResult<PathBuf> {
        let access_error = |source| CoreError::DirectoryAccess {
            path: directory.to_path_buf(),
            source,
        };

        self.reader.check_directory(directory).map_err(access_error)?;

        let naive = directory.join(format!("{base_name}{extension}"));
        if !self.reader.exists(&naive).map_err(access_error)? {
            return Ok(naive);
        }

        let base = strip_index(base_name);
        let names = self.reader.entry_names(directory).map_err(access_error)?;

        let highest = names
            .iter()
            .map(|name| entry_stem(name, extension))
            .filter(|stem| strip_index(stem) == base)
            .filter_map(|stem| parse_index(stem))
            .filter_map(|n| n.checked_add(1))
            .fold(1, u64::max);

        let indexed = directory.join(format!("{base} ({highest}){extension}"));
        tracing::debug!(
            "'{}' is taken, using '{}'",
            naive.display(),
            indexed.display()
        );
        Ok(indexed)
    }

    /// Like [`available_path`](Self::available_path), but takes a complete
    /// file name and splits it at its last `.` into base and extension.
    ///
    /// Names whose only dot is the leading one (`.bashrc`) have no extension.
    pub fn available_path_for(&self, directory: &Path, file_name: &str) -> CoreResult<PathBuf> {
        let (base, extension) = split_extension(file_name);
        self.available_path(directory, base, extension)
    }

    /// Returns `path` itself when nothing occupies it, otherwise the next
    /// free indexed name in the same directory.
    ///
    /// A path without a parent component is resolved against `.`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidName`] if `path` has no file name or the name is
    ///   not valid UTF-8. Nothing is looked up in that case.
    /// - [`CoreError::DirectoryAccess`] as for
    ///   [`available_path`](Self::available_path).
    pub fn available_path_beside(&self, path: &Path) -> CoreResult<PathBuf> {
        let file_name = path.file_name().ok_or_else(|| {
            CoreError::InvalidName(format!("'{}' has no file name", path.display()))
        })?;
        let file_name = file_name.to_str().ok_or_else(|| {
            CoreError::InvalidName(format!("'{}' is not valid UTF-8", path.display()))
        })?;
        let directory = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        self.available_path_for(directory, file_name)
    }
}

/// Shorthand for [`FilenameIndexer::available_path`] on the real filesystem.
pub fn available_path(directory: &Path, base_name: &str, extension: &str) -> CoreResult<PathBuf> {
    FilenameIndexer::new().available_path(directory, base_name, extension)
}

/// Shorthand for [`FilenameIndexer::available_path_for`] on the real filesystem.
pub fn available_path_for(directory: &Path, file_name: &str) -> CoreResult<PathBuf> {
    FilenameIndexer::new().available_path_for(directory, file_name)
}

/// Shorthand for [`FilenameIndexer::available_path_beside`] on the real filesystem.
pub fn available_path_beside(path: &Path) -> CoreResult<PathBuf> {
    FilenameIndexer::new().available_path_beside(path)
}

/// Name of a sibling entry with the requested `extension` taken off.
///
/// An entry ending in `extension` loses exactly that suffix, so with an
/// empty extension the whole name is compared (`v1.2 (1)` stays intact).
/// Entries with a different extension lose their last one, which lets
/// `foo (3).md` still raise the index for `foo` + `.txt`.
fn entry_stem<'a>(name: &'a str, extension: &str) -> &'a str {
    if extension.is_empty() {
        return name;
    }
    if let Some(stem) = name.strip_suffix(extension) {
        return stem;
    }
    split_extension(name).0
}

/// Removes a trailing ` (...)` group, keyed on the last `(`.
///
/// Exactly one space before the `(` is dropped when present. The content of
/// the group is not inspected, so `"draft (final)"` strips to `"draft"`.
pub fn strip_index(name: &str) -> &str {
    match name.rfind('(') {
        Some(open) => {
            let head = &name[..open];
            head.strip_suffix(' ').unwrap_or(head)
        }
        None => name,
    }
}

/// Returns the text between the last `(` and the first `)` after it.
pub fn value_between_parentheses(name: &str) -> Option<&str> {
    let open = name.rfind('(')?;
    let rest = &name[open + 1..];
    let close = rest.find(')')?;
    Some(&rest[..close])
}

/// Parses the parenthesised index of `name`, if it is purely decimal digits.
fn parse_index(name: &str) -> Option<u64> {
    let value = value_between_parentheses(name)?;
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // too many digits for u64 is treated like any other non-index text
    value.parse().ok()
}

fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => file_name.split_at(dot),
        _ => (file_name, ""),
    }
}
