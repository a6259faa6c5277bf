use std::process::ExitCode;

use clap::Parser;
use repair_app::platform::{self, Cli};
use repair_core::Outcome;
use repair_logging::repair_error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    platform::logging::initialize(cli.log_destination(), cli.log_level());

    match platform::run_app(&cli) {
        Ok(Outcome::Succeeded) => ExitCode::SUCCESS,
        Ok(Outcome::Failed) => ExitCode::from(1),
        Err(err) => {
            repair_error!("{:#}", err);
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
