use applogger_core::{AppLogger, Configuration, EmptySource, LogLevel, MemorySink};

/// Factory with an open gate writing into a fresh in-memory sink
#[allow(dead_code)]
pub fn enabled_app(level: LogLevel) -> (AppLogger, MemorySink) {
    let sink = MemorySink::new();
    let config = Configuration::new()
        .with_log_level(level)
        .with_destination_key("K1");
    let app = AppLogger::builder()
        .config(config)
        .config_source(EmptySource)
        .sink(sink.clone())
        .build()
        .unwrap();
    (app, sink)
}

/// Factory with a closed gate writing into a fresh in-memory sink
#[allow(dead_code)]
pub fn disabled_app(level: LogLevel) -> (AppLogger, MemorySink) {
    let sink = MemorySink::new();
    let config = Configuration::new()
        .with_log_level(level)
        .with_logging_enabled(false);
    let app = AppLogger::builder()
        .config(config)
        .config_source(EmptySource)
        .sink(sink.clone())
        .build()
        .unwrap();
    (app, sink)
}
