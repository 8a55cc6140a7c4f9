//! formprobe: run the contact form suite from the command line
//!
//! ## Usage
//!
//! ```bash
//! formprobe list                                   # Show scenarios
//! formprobe run --form site/contact_form.html      # Run all in headless Chromium
//! formprobe run -s reset_form --headed             # One scenario, visible window
//! formprobe run --mock --format json               # Simulated form, JSON summary
//! ```

use clap::Parser;
use formprobe_cli::{
    check_summary, format_scenario_list, logging, Cli, CliConfig, CliResult, ColorChoice,
    Commands, SuiteCommand, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);

    match cli.command {
        Commands::List => {
            for row in format_scenario_list(config.color.should_color()) {
                println!("{row}");
            }
            Ok(())
        }
        Commands::Run(args) => {
            let config = config.with_format(args.format.into());
            logging::init(
                config.verbosity,
                config.format,
                config.color.should_color(),
            )?;
            let summary = SuiteCommand::new(config).execute(&args)?;
            check_summary(&summary)
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.into();
    CliConfig::new().with_verbosity(verbosity).with_color(color)
}
