//! Handlers for each subcommand.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;
use platkit_core::{available_path_beside, Config};

use crate::cli::Command;

/// Executes `command` with the loaded `config`.
pub fn execute(command: Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Unique { dir, base, ext } => {
            let path = platkit_core::available_path(&dir, &base, &ext)?;
            println!("{}", path.display());
        }
        Command::Copy {
            src,
            dest,
            keep_both,
            no_overwrite,
        } => {
            let dest = resolve_dest(&dest, keep_both || config.files.keep_both)?;
            let overwrite = config.files.overwrite_existing && !no_overwrite;
            platkit_core::copy_target(&src, &dest, overwrite)
                .with_context(|| format!("cannot copy '{}'", src.display()))?;
            println!("{}", dest.display());
        }
        Command::Move {
            src,
            dest,
            keep_both,
        } => {
            let dest = resolve_dest(&dest, keep_both || config.files.keep_both)?;
            platkit_core::move_or_rename(&src, &dest)
                .with_context(|| format!("cannot move '{}'", src.display()))?;
            println!("{}", dest.display());
        }
        Command::Delete { path } => {
            platkit_core::delete_target(&path)
                .with_context(|| format!("cannot delete '{}'", path.display()))?;
        }
        Command::Mkdir { path } => {
            platkit_core::create_folder(&path)
                .with_context(|| format!("cannot create folder '{}'", path.display()))?;
        }
        Command::Contains { file, needle } => {
            let found = platkit_core::contains_string(&file, &needle)?;
            println!("{found}");
        }
        Command::Run {
            output,
            detach,
            command,
        } => {
            let (program, args) = command
                .split_first()
                .context("no program given to run")?;
            run(Path::new(program), args, output, detach || !config.process.wait)?
        }
    }
    Ok(())
}

/// Runs `program` in the current directory, with or without arguments.
fn run(program: &Path, args: &[OsString], output: bool, detach: bool) -> anyhow::Result<()> {
    if output {
        let stdout = platkit_core::run_script_output(program, args)?;
        print!("{stdout}");
        return Ok(());
    }

    let code = platkit_core::run_script(program, args, detach)?;

    match code {
        Some(code) => println!("exit code: {code}"),
        None if detach => tracing::info!("started '{}' in the background", program.display()),
        None => println!("terminated by signal"),
    }
    Ok(())
}

/// With `keep_both`, swaps a taken `dest` for the next free indexed name
/// next to it.
fn resolve_dest(dest: &Path, keep_both: bool) -> anyhow::Result<PathBuf> {
    if !keep_both || std::fs::symlink_metadata(dest).is_err() {
        return Ok(dest.to_path_buf());
    }
    Ok(available_path_beside(dest)?)
}
