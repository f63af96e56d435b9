use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "gdorganize",
    about = "Reorder GDScript declarations into canonical sections",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct OrganizerCli {
    /// Global: path to config (TOML); default: ./gdorganize.toml, then ~/.gdorganize/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Global: debug logging (same as GDORGANIZE_DEBUG=1)
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue, global = true)]
    pub verbose: bool,

    /// Global: print organizer warnings as file:line diagnostics
    #[arg(long = "pretty-errors", action = ArgAction::SetTrue, global = true)]
    pub pretty_errors: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reorder declarations in place
    ///
    /// Examples:
    ///   gdorganize organize player.gd enemy.gd
    ///   gdorganize organize --check scripts/*.gd
    ///   gdorganize organize - < player.gd
    Organize {
        /// Script files; `-` reads stdin and writes stdout
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<PathBuf>,
        /// Report files that would change, write nothing
        #[arg(long = "check", action = ArgAction::SetTrue)]
        check: bool,
        /// Turn `"""` docstrings into `#` comments first
        #[arg(long = "convert-multiline", action = ArgAction::SetTrue)]
        convert_multiline: bool,
    },

    /// Rewrite top-level `"""` docstrings as `#` comments
    Convert {
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<PathBuf>,
        #[arg(long = "check", action = ArgAction::SetTrue)]
        check: bool,
    },

    /// Print the declaration kind of every line (debug)
    Classify {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
}
