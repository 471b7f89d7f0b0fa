//! AppLogger CLI
//!
//! Command-line interface for checking and exercising an AppLogger setup

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "applogger")]
#[command(about = "AppLogger - telemetry bootstrap diagnostics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve the configuration and report the telemetry gate
    Check(commands::check::CheckArgs),
    /// Emit a sample correlation tree across three components
    Demo(commands::demo::DemoArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(args),
        Commands::Demo(args) => commands::demo::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
