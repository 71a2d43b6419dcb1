//! Launching scripts and applications as child processes.
//!
//! Shell scripts are run through their interpreter (`sh` for `.sh`,
//! `cmd /C` for `.bat`/`.cmd` on Windows) so they do not need to be
//! executable themselves. Anything else is spawned directly.
//!
//! Arguments are handed to the child exactly as given, one element per
//! argument, with no re-splitting or quoting.
//!
//! Scripts run in the caller's working directory. Applications started with
//! [`run_application`] run in the directory that contains them.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{CoreError, CoreResult};

/// Runs `script` with `args` to completion and returns everything it wrote
/// to stdout.
///
/// Output is decoded lossily as UTF-8. A non-zero exit status is logged but
/// not treated as an error; the captured output is still returned.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `script` does not exist.
/// - [`CoreError::Process`] if the process cannot be started.
pub fn run_script_output<I, S>(script: &Path, args: I) -> CoreResult<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    ensure_exists(script)?;

    let output = script_command(script)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|e| spawn_error(script, e))?;

    if !output.status.success() {
        tracing::warn!("'{}' exited with {}", script.display(), output.status);
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Runs `script` with `args` and returns its exit code.
///
/// With `detached` the script is started and left running; the call returns
/// `Ok(None)` immediately. Otherwise it waits and returns the exit code,
/// which is `None` only if the process was killed by a signal.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `script` does not exist.
/// - [`CoreError::Process`] if the process cannot be started or waited on.
pub fn run_script<I, S>(script: &Path, args: I, detached: bool) -> CoreResult<Option<i32>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    ensure_exists(script)?;
    let mut command = script_command(script);
    command.args(args);
    launch(&mut command, script, !detached)
}

/// Launches `exe` with `args`.
///
/// The child runs with `exe`'s parent directory as its working directory;
/// the caller's own working directory is left untouched. When `wait` is
/// `true` the call blocks and returns the exit code.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `exe` does not exist.
/// - [`CoreError::Process`] if the process cannot be started or waited on.
pub fn run_application<I, S>(exe: &Path, args: I, wait: bool) -> CoreResult<Option<i32>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    ensure_exists(exe)?;

    let mut command = Command::new(exe);
    command.args(args);
    if let Some(dir) = exe.parent().filter(|p| !p.as_os_str().is_empty()) {
        command.current_dir(dir);
    }

    launch(&mut command, exe, wait)
}

fn launch(command: &mut Command, program: &Path, wait: bool) -> CoreResult<Option<i32>> {
    let mut child = command.spawn().map_err(|e| spawn_error(program, e))?;
    tracing::debug!("started '{}' (pid {})", program.display(), child.id());

    if !wait {
        return Ok(None);
    }

    let status = child
        .wait()
        .map_err(|e| CoreError::Process(format!("waiting for '{}': {e}", program.display())))?;
    tracing::debug!("'{}' exited with {status}", program.display());
    Ok(status.code())
}

fn script_command(script: &Path) -> Command {
    let ext = script
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        #[cfg(windows)]
        "bat" | "cmd" => {
            let mut command = Command::new("cmd");
            command.arg("/C").arg(script);
            command
        }
        #[cfg(unix)]
        "sh" => {
            let mut command = Command::new("sh");
            command.arg(script);
            command
        }
        _ => Command::new(script),
    }
}

fn ensure_exists(path: &Path) -> CoreResult<()> {
    std::fs::metadata(path)
        .map(|_| ())
        .map_err(|e| CoreError::from_io(path, e))
}

fn spawn_error(program: &Path, err: std::io::Error) -> CoreError {
    CoreError::Process(format!("failed to start '{}': {err}", program.display()))
}
