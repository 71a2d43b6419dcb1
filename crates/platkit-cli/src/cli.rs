//! Command-line argument definitions using clap.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Filesystem and process helpers.
///
/// `--config` and `--debug` go before the subcommand so they never take
/// arguments meant for a program started with `run`.
#[derive(Parser, Debug)]
#[command(name = "platkit", version, about = "Filesystem and process helpers")]
pub struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "PLATKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a path for BASE + EXT inside DIR that is not taken yet.
    Unique {
        dir: PathBuf,
        base: String,
        /// Extension including the leading dot, e.g. ".txt".
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        ext: String,
    },

    /// Copy a file or directory.
    Copy {
        src: PathBuf,
        dest: PathBuf,
        /// Copy to a free "name (N)" path if DEST is taken.
        #[arg(long)]
        keep_both: bool,
        /// Fail instead of replacing an existing DEST.
        #[arg(long)]
        no_overwrite: bool,
    },

    /// Move or rename a file or directory. Never replaces DEST.
    Move {
        src: PathBuf,
        dest: PathBuf,
        /// Move to a free "name (N)" path if DEST is taken.
        #[arg(long)]
        keep_both: bool,
    },

    /// Delete a file or directory (recursively).
    Delete { path: PathBuf },

    /// Create a new directory.
    Mkdir { path: PathBuf },

    /// Print whether any line of FILE contains NEEDLE.
    Contains { file: PathBuf, needle: String },

    /// Run a script or program in the current directory.
    ///
    /// Flags for `run` itself go before PROGRAM. Everything after PROGRAM is
    /// passed to it unchanged, one argument each.
    Run {
        /// Print the program's stdout instead of its exit code.
        #[arg(long, conflicts_with = "detach")]
        output: bool,
        /// Start the program and return without waiting.
        #[arg(long)]
        detach: bool,
        /// Program to run, followed by its arguments.
        #[arg(
            value_name = "PROGRAM",
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        command: Vec<OsString>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_unique_with_ext() {
        let args = Args::try_parse_from(["platkit", "unique", "/tmp", "foo", "--ext", ".txt"]).unwrap();
        match args.command {
            Command::Unique { dir, base, ext } => {
                assert_eq!(dir, PathBuf::from("/tmp"));
                assert_eq!(base, "foo");
                assert_eq!(ext, ".txt");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    fn run_command(args: Args) -> (bool, bool, Vec<OsString>) {
        match args.command {
            Command::Run {
                output,
                detach,
                command,
            } => (output, detach, command),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_run_trailing_args() {
        let args = Args::try_parse_from(["platkit", "run", "/bin/ls", "-l", "-a"]).unwrap();
        let (_, _, command) = run_command(args);
        assert_eq!(command, ["/bin/ls", "-l", "-a"]);
    }

    #[test]
    fn run_leaves_config_short_flag_to_program() {
        let args = Args::try_parse_from(["platkit", "run", "/bin/ls", "-c", "/"]).unwrap();
        assert!(args.config.is_none());
        let (_, _, command) = run_command(args);
        assert_eq!(command, ["/bin/ls", "-c", "/"]);
    }

    #[test]
    fn run_leaves_own_flags_after_program_to_program() {
        let args =
            Args::try_parse_from(["platkit", "run", "tool", "--debug", "--detach", "--output"])
                .unwrap();
        assert!(!args.debug);
        let (output, detach, command) = run_command(args);
        assert!(!output && !detach);
        assert_eq!(command, ["tool", "--debug", "--detach", "--output"]);
    }

    #[test]
    fn run_flags_before_program() {
        let args = Args::try_parse_from(["platkit", "run", "--detach", "tool", "x"]).unwrap();
        let (output, detach, command) = run_command(args);
        assert!(!output && detach);
        assert_eq!(command, ["tool", "x"]);
    }

    #[test]
    fn run_requires_program() {
        assert!(Args::try_parse_from(["platkit", "run"]).is_err());
        assert!(Args::try_parse_from(["platkit", "run", "--output"]).is_err());
    }

    #[test]
    fn output_conflicts_with_detach() {
        let result = Args::try_parse_from(["platkit", "run", "--output", "--detach", "x.sh"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_before_subcommand() {
        let args =
            Args::try_parse_from(["platkit", "--debug", "-c", "my.toml", "delete", "x"]).unwrap();
        assert!(args.debug);
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
    }

    #[test]
    fn global_flags_after_subcommand_rejected() {
        assert!(Args::try_parse_from(["platkit", "delete", "x", "--debug"]).is_err());
    }
}
