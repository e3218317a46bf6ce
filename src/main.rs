#![allow(clippy::print_stderr)]

use std::process::ExitCode;

use clap::Parser;

mod cli;

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .init();

    let args = CliArgs::parse();
    match args.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
