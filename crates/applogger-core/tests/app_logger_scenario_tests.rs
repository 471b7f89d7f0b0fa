#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::HashMap;

use applogger_core::{
    AppLogger, AppLoggerError, Configuration, Dimensions, EmissionError, EmptySource, LogLevel,
    MapSource, MemorySink,
};

fn config_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_warn_threshold_scenario() {
    // Given: {log_level: WARN, logging_enabled: true, destination_key: K1}
    // When: get_logger().info("x") then .warning("y")
    // Then: only "y" is emitted, attributed to component AppLogger
    let config = Configuration::from_map(&config_map(&[
        ("log_level", "WARN"),
        ("logging_enabled", "true"),
        ("destination_key", "K1"),
    ]))
    .unwrap();
    let sink = MemorySink::new();
    let app = AppLogger::builder()
        .config(config)
        .config_source(EmptySource)
        .sink(sink.clone())
        .build()
        .unwrap();

    let logger = app.default_logger();
    logger.info("x");
    assert!(sink.is_empty());

    logger.warning("y");
    let logs = sink.logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].message, "y");
    assert_eq!(logs[0].component_name, "AppLogger");
    assert_eq!(logs[0].severity, LogLevel::Warn);
    assert_eq!(sink.envelopes()[0].instrumentation_key.expose(), "K1");
}

#[test]
fn test_nested_tracer_scenario() {
    // get_tracer("main") -> A; get_tracer("package1", A) -> B
    let app = AppLogger::disabled();
    let a = app.get_tracer("main", None);
    let b = app.get_tracer("package1", Some(a.context()));

    assert!(a.context().parent_span_id().is_none());
    assert_eq!(b.context().trace_id(), a.context().trace_id());
    assert_eq!(b.context().parent_span_id(), Some(a.context().span_id()));
}

#[test]
fn test_disabled_factory_scenario() {
    let app = AppLogger::disabled();
    app.default_logger().info("x");
    assert!(!app.is_enabled());
}

#[test]
fn test_missing_key_fails_construction() {
    let config = Configuration::new().with_logging_enabled(true);
    let err = AppLogger::builder()
        .config(config)
        .config_source(EmptySource)
        .build()
        .unwrap_err();

    assert_eq!(err, AppLoggerError::MissingDestinationKey);
    assert_eq!(err.to_string(), "missing destination key");
}

#[test]
fn test_no_configuration_uses_fallback_store() {
    let sink = MemorySink::new();
    let app = AppLogger::builder()
        .config_source(MapSource::new().with("APPINSIGHTS_INSTRUMENTATIONKEY", "K7"))
        .sink(sink.clone())
        .build()
        .unwrap();

    app.default_logger().info("hello");
    assert_eq!(sink.envelopes()[0].instrumentation_key.expose(), "K7");
}

#[test]
fn test_disabled_config_never_emits() {
    let (app, sink) = common::disabled_app(LogLevel::Debug);
    let logger = app.get_logger("quiet", Dimensions::new());
    let tracer = app.get_tracer("quiet", None);

    for i in 0..100 {
        logger.critical(format!("message {}", i));
        tracer.span("op").close();
    }
    app.flush();

    assert!(sink.is_empty());
    assert_eq!(sink.flush_count(), 0);
}

#[test]
fn test_cross_component_trace_tree() {
    let (app, sink) = common::enabled_app(LogLevel::Info);

    fn package2(app: &AppLogger, parent: &applogger_core::CorrelationContext) {
        let tracer = app.get_tracer("package2", Some(parent));
        let logger = app
            .get_logger("package2", Dimensions::new())
            .with_context(tracer.context());
        tracer.in_span("package2_work", |_| logger.info("in package2"));
    }

    fn package1(app: &AppLogger, parent: &applogger_core::CorrelationContext) {
        let tracer = app.get_tracer("package1", Some(parent));
        tracer.in_span("package1_work", |span| package2(app, span.context()));
    }

    let main = app.get_tracer("main", None);
    main.in_span("main_work", |span| package1(&app, span.context()));

    let deps = sink.dependencies();
    assert_eq!(deps.len(), 3);
    assert!(deps.iter().all(|d| &d.trace_id == main.context().trace_id()));

    // Spans close innermost first
    let (inner, middle, outer) = (&deps[0], &deps[1], &deps[2]);
    assert_eq!(outer.name, "main_work");
    assert_eq!(middle.name, "package1_work");
    assert_eq!(inner.name, "package2_work");
    assert_eq!(outer.parent_span_id.as_ref(), Some(main.context().span_id()));

    let logs = sink.logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].component_name, "package2");
    assert_eq!(logs[0].trace_id.as_ref(), Some(main.context().trace_id()));
    // The package2 tracer node sits between package1's span and package2's span
    assert_eq!(inner.parent_span_id, logs[0].span_id);
}

#[test]
fn test_custom_dimensions_are_merged_into_records() {
    let (app, sink) = common::enabled_app(LogLevel::Debug);
    let mut dims = Dimensions::new();
    dims.insert("team".to_string(), "payments".to_string());

    let logger = app.get_logger("billing", dims);
    logger.debug("charged");

    let log = &sink.logs()[0];
    assert_eq!(log.component_name, "billing");
    assert_eq!(log.custom_dimensions.get("team"), Some(&"payments".to_string()));
}

#[test]
fn test_default_dimensions_are_not_shared() {
    let (app, sink) = common::enabled_app(LogLevel::Debug);
    let first = app.get_logger("a", Dimensions::new()).with_dimension("k", "v");
    let second = app.get_logger("b", Dimensions::new());

    first.info("one");
    second.info("two");

    let logs = sink.logs();
    assert_eq!(logs[0].custom_dimensions.len(), 1);
    assert!(logs[1].custom_dimensions.is_empty());
}

#[test]
fn test_sink_outage_is_invisible_to_callers() {
    let (app, sink) = common::enabled_app(LogLevel::Debug);
    sink.fail_with(Some(EmissionError::SinkUnavailable("collector down".into())));

    let logger = app.default_logger();
    logger.error("lost");
    app.get_tracer("main", None).span("lost").close();
    app.flush();
    assert!(sink.is_empty());

    sink.fail_with(None);
    logger.error("delivered");
    assert_eq!(sink.logs().len(), 1);
}

#[test]
fn test_span_failure_propagates_unchanged() {
    let (app, sink) = common::enabled_app(LogLevel::Info);
    let tracer = app.get_tracer("main", None);

    let result: Result<(), String> =
        tracer.in_span_result("call", |_| Err("downstream failed".to_string()));

    assert_eq!(result, Err("downstream failed".to_string()));
    let deps = sink.dependencies();
    assert_eq!(deps.len(), 1);
    assert!(!deps[0].success);
}

#[test]
fn test_loggers_and_tracers_across_threads() {
    let (app, sink) = common::enabled_app(LogLevel::Info);
    let root = app.get_tracer("main", None);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let app = app.clone();
            let parent = root.context().clone();
            std::thread::spawn(move || {
                let tracer = app.get_tracer(format!("worker{}", i), Some(&parent));
                let logger = app
                    .get_logger(format!("worker{}", i), Dimensions::new())
                    .with_context(tracer.context());
                tracer.in_span("job", |_| logger.info("done"));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(sink.logs().len(), 8);
    assert_eq!(sink.dependencies().len(), 8);
    assert!(sink
        .dependencies()
        .iter()
        .all(|d| &d.trace_id == root.context().trace_id()));
}
