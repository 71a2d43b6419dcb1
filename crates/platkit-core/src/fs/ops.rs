//! Copy, move, delete and create operations on files and directories.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Copies a file or directory (recursively) to `dest`.
///
/// Symlinks are copied as symlinks rather than followed. With `overwrite`
/// set, an existing file at `dest` is replaced and an existing directory is
/// merged into; without it, an existing `dest` is an error.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `src` does not exist.
/// - [`CoreError::AlreadyExists`] if `dest` exists and `overwrite` is `false`.
/// - [`CoreError::CopyIntoItself`] if `src` is a directory and `dest` is
///   `src` or lies inside it. Nothing is created.
/// - [`CoreError::NotADirectory`] if `src` is a directory and `dest` is an
///   existing non-directory.
/// - [`CoreError::Io`] for any I/O failure during copy.
pub fn copy_target(src: &Path, dest: &Path, overwrite: bool) -> CoreResult<()> {
    let meta = std::fs::symlink_metadata(src).map_err(|e| CoreError::from_io(src, e))?;

    if std::fs::symlink_metadata(dest).is_ok() && !overwrite {
        return Err(CoreError::AlreadyExists(dest.to_path_buf()));
    }

    if meta.is_dir() {
        let src_real = src.canonicalize()?;
        if resolve_existing_prefix(dest)?.starts_with(&src_real) {
            return Err(CoreError::CopyIntoItself {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
            });
        }
        if std::fs::metadata(dest).is_ok_and(|m| !m.is_dir()) {
            return Err(CoreError::NotADirectory(dest.to_path_buf()));
        }

        copy_dir_recursive(src, dest, 0)?;
        tracing::debug!("copied folder '{}' to '{}'", src.display(), dest.display());
    } else {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if meta.is_symlink() {
            copy_symlink(src, dest)?;
        } else {
            std::fs::copy(src, dest)?;
        }
        tracing::debug!("copied file '{}' to '{}'", src.display(), dest.display());
    }

    Ok(())
}

/// Canonicalizes the longest existing ancestor of `path` and re-appends the
/// components below it, so paths that do not exist yet still compare
/// against real locations.
fn resolve_existing_prefix(path: &Path) -> std::io::Result<PathBuf> {
    let mut missing = Vec::new();
    let mut current = path;
    loop {
        match current.canonicalize() {
            Ok(mut resolved) => {
                resolved.extend(missing.iter().rev());
                return Ok(resolved);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let (Some(parent), Some(name)) = (current.parent(), current.file_name()) else {
                    return Err(e);
                };
                missing.push(name);
                current = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
            }
            Err(e) => return Err(e),
        }
    }
}

/// Maximum recursion depth for copy_dir_recursive to prevent symlink loops.
const MAX_COPY_DEPTH: usize = 64;

fn copy_dir_recursive(src: &Path, dest: &Path, depth: usize) -> CoreResult<()> {
    if depth > MAX_COPY_DEPTH {
        return Err(CoreError::Io(std::io::Error::other(format!(
            "maximum recursion depth ({MAX_COPY_DEPTH}) exceeded during copy"
        ))));
    }

    std::fs::create_dir_all(dest)?;

    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let entry_path = entry.path();
        let target = dest.join(entry.file_name());

        // file_type() does not follow symlinks
        let ft = entry.file_type()?;

        if ft.is_symlink() {
            copy_symlink(&entry_path, &target)?;
        } else if ft.is_dir() {
            copy_dir_recursive(&entry_path, &target, depth + 1)?;
        } else {
            std::fs::copy(&entry_path, &target)?;
        }
    }

    Ok(())
}

fn copy_symlink(src: &Path, dest: &Path) -> CoreResult<()> {
    if std::fs::symlink_metadata(dest).is_ok() {
        std::fs::remove_file(dest)?;
    }
    #[cfg(unix)]
    {
        let link_target = std::fs::read_link(src)?;
        std::os::unix::fs::symlink(&link_target, dest)?;
    }
    #[cfg(not(unix))]
    std::fs::copy(src, dest)?;
    Ok(())
}

/// Moves or renames a file or directory.
///
/// Never replaces an existing `dest`. Attempts a fast `rename` first and
/// falls back to copy + delete when that fails (e.g. across devices).
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `src` does not exist.
/// - [`CoreError::AlreadyExists`] if `dest` already exists.
/// - [`CoreError::Io`] for any I/O failure.
pub fn move_or_rename(src: &Path, dest: &Path) -> CoreResult<()> {
    std::fs::symlink_metadata(src).map_err(|e| CoreError::from_io(src, e))?;

    if std::fs::symlink_metadata(dest).is_ok() {
        return Err(CoreError::AlreadyExists(dest.to_path_buf()));
    }

    let verb = if src.parent() == dest.parent() {
        "renamed"
    } else {
        "moved"
    };

    if let Err(e) = std::fs::rename(src, dest) {
        tracing::debug!("rename failed ({e}), falling back to copy + delete");
        copy_target(src, dest, false)?;
        delete_target(src)?;
    }

    tracing::debug!("{verb} '{}' to '{}'", src.display(), dest.display());
    Ok(())
}

/// Deletes a file, symlink or directory (recursively).
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::Io`] for any I/O failure during deletion.
pub fn delete_target(path: &Path) -> CoreResult<()> {
    // symlink_metadata: a link is removed, never its target
    let meta = std::fs::symlink_metadata(path).map_err(|e| CoreError::from_io(path, e))?;

    if meta.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }

    tracing::debug!("deleted '{}'", path.display());
    Ok(())
}

/// Creates a single new directory at `path`.
///
/// The parent must already exist.
///
/// # Errors
///
/// - [`CoreError::AlreadyExists`] if anything already sits at `path`.
/// - [`CoreError::NotFound`] if the parent directory is missing.
/// - [`CoreError::Io`] for any other I/O failure.
pub fn create_folder(path: &Path) -> CoreResult<()> {
    if std::fs::symlink_metadata(path).is_ok() {
        return Err(CoreError::AlreadyExists(path.to_path_buf()));
    }

    std::fs::create_dir(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            CoreError::NotFound(path.parent().unwrap_or(path).to_path_buf())
        }
        std::io::ErrorKind::AlreadyExists => CoreError::AlreadyExists(path.to_path_buf()),
        _ => CoreError::from_io(path, e),
    })?;

    tracing::debug!("created folder '{}'", path.display());
    Ok(())
}

/// Returns `true` if any line of the text file at `path` contains `needle`.
///
/// Lines that are not valid UTF-8 are compared lossily.
///
/// # Errors
///
/// - [`CoreError::NotFound`] / [`CoreError::PermissionDenied`] if the file
///   cannot be opened.
/// - [`CoreError::Io`] if reading fails part-way.
pub fn contains_string(path: &Path, needle: &str) -> CoreResult<bool> {
    let file = std::fs::File::open(path).map_err(|e| CoreError::from_io(path, e))?;
    let mut reader = std::io::BufReader::new(file);
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(false);
        }
        if String::from_utf8_lossy(&line).contains(needle) {
            return Ok(true);
        }
    }
}
