//! Entry point for the debug launcher.
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use debug_launcher::{
    cli::{LaunchArgs, ParsedCommand},
    launcher::{self, LaunchExit},
    lib::telemetry,
};

fn main() -> ExitCode {
    match bootstrap() {
        Ok(code) => code,
        Err(exit) => exit.report(),
    }
}

fn bootstrap() -> Result<ExitCode, LaunchExit> {
    telemetry::init_tracing().map_err(LaunchExit::from_error)?;
    let args = LaunchArgs::parse();
    let command = args.into_command().map_err(LaunchExit::from_error)?;

    match command {
        ParsedCommand::Launch(profile) => launcher::run(profile),
        ParsedCommand::MissingCommand => {
            LaunchArgs::command()
                .print_help()
                .map_err(LaunchExit::from_error)?;
            Err(LaunchExit::silent(ExitCode::from(1)))
        }
    }
}
