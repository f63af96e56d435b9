//! gdorganize main — organize / convert / classify subcommands.

use clap::Parser; // trait import enables OrganizerCli::parse()

use gdscript_organizer::cli::{Command, OrganizerCli};
use gdscript_organizer::commands;
use gdscript_organizer::config::Config;
use gdscript_organizer::core::debug::init_logger;

fn main() -> anyhow::Result<()> {
    let args = OrganizerCli::parse();
    init_logger(args.verbose);

    let config = Config::load_or_default(&args.config)?;
    let rules = config.rules();

    let code = match args.cmd {
        Command::Organize { inputs, check, convert_multiline } => {
            let opts = commands::organize::Options {
                rules: &rules,
                check,
                convert_multiline: convert_multiline || config.organizer.convert_multiline,
                pretty_errors: args.pretty_errors,
            };
            commands::organize::main(inputs, &opts)?
        }
        Command::Convert { inputs, check } => commands::convert::main(inputs, check)?,
        Command::Classify { input } => {
            commands::classify::main(input, &rules)?;
            0
        }
    };

    // 0 when nothing changed, 1 when --check found files to organize.
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
