//! Pagescope CLI: read page objects against HTML files
//!
//! ## Usage
//!
//! ```bash
//! pagescope check --page login.yaml                       # Validate and show the tree
//! pagescope read --page login.yaml --html login.html      # Read every property
//! pagescope read -p login.yaml --html login.html form.username --format json
//! ```

use clap::Parser;
use pagescope_cli::{
    handlers::{execute_check, execute_read},
    logging, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
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
    logging::init(&config);

    match cli.command {
        Commands::Read(args) => execute_read(&config, &args),
        Commands::Check(args) => execute_check(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new().with_verbosity(verbosity).with_color(color)
}
