//! Check command
//!
//! Usage: applogger check [--config <FILE>] [--disabled]

use applogger_core::{AppLogger, NoopSink};
use clap::Args;

use super::ConfigArgs;

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Execute check command
pub fn execute(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = AppLogger::builder().sink(NoopSink);
    if let Some(config) = args.config.load()? {
        builder = builder.config(config);
    }
    let app = builder.build()?;

    let gate = app.gate();
    if gate.is_enabled() {
        println!("telemetry: enabled");
    } else {
        println!("telemetry: disabled");
    }
    println!("log level: {}", app.log_level());
    if let Some(source) = gate.key_source() {
        println!("key source: {}", source);
    }
    if let Some(key) = gate.destination_key() {
        let form = if key.is_connection_string() {
            "connection string"
        } else {
            "instrumentation key"
        };
        println!("key form: {}", form);
    }

    Ok(())
}
