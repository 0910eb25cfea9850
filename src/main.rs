//! buildbench CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use buildbench::cli::{Cli, Commands};
use buildbench::commands::{run_calibrate, run_stats, run_time, CommandContext};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> buildbench::Result<String> {
    let cli = Cli::parse();
    let ctx = CommandContext::from_cli(cli.format, cli.verbose);

    match &cli.command {
        Commands::Time(args) => run_time(args, &ctx),
        Commands::Calibrate(args) => run_calibrate(args, &ctx),
        Commands::Stats(args) => run_stats(args, &ctx),
    }
}
