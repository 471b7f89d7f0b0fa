//! Demo command
//!
//! Usage: applogger demo [--config <FILE>] [--disabled] [--traceparent <HEADER>]
//!
//! Runs `main`, which calls `package1`, which calls `package2`. Each
//! component builds its own tracer from the caller's context, so every
//! record lands in one correlation tree. With `--traceparent` the tree
//! continues a trace started in another process.

use applogger_core::logging_facility::{init, Profile};
use applogger_core::{AppLogger, CorrelationContext, Dimensions};
use clap::Args;

use super::ConfigArgs;

#[derive(Debug, Args)]
pub struct DemoArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// W3C traceparent of an upstream caller
    #[arg(long)]
    pub traceparent: Option<String>,
}

/// Execute demo command
pub fn execute(args: DemoArgs) -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Production);
    let app = AppLogger::create(args.config.load()?)?;

    let upstream = match &args.traceparent {
        Some(header) => Some(
            CorrelationContext::from_traceparent(header)
                .ok_or_else(|| format!("invalid traceparent: {}", header))?,
        ),
        None => None,
    };
    let tracer = app.get_tracer("main", upstream.as_ref());
    let logger = app
        .get_logger("main", Dimensions::new())
        .with_context(tracer.context());

    logger.info("demo started");
    tracer.in_span("main_work", |span| package1(&app, span.context()));
    logger.info("demo finished");
    app.flush();

    println!("trace_id: {}", tracer.context().trace_id());
    println!("traceparent: {}", tracer.context().traceparent());
    Ok(())
}

fn package1(app: &AppLogger, caller: &CorrelationContext) {
    let tracer = app.get_tracer("package1", Some(caller));
    let logger = app
        .get_logger("package1", Dimensions::new())
        .with_dimension("stage", "fetch")
        .with_context(tracer.context());

    logger.info("fetching");
    tracer.in_span("package1_work", |span| package2(app, span.context()));
}

fn package2(app: &AppLogger, caller: &CorrelationContext) {
    let tracer = app.get_tracer("package2", Some(caller));
    let logger = app
        .get_logger("package2", Dimensions::new())
        .with_context(tracer.context());

    let result: Result<(), &str> = tracer.in_span_result("package2_work", |_| Err("cache miss"));
    if let Err(reason) = result {
        logger.warning(format!("falling back: {}", reason));
    }
}
