//! Operation boundary macros
//!
//! These macros record the start and end of an operation with the
//! canonical schema fields.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use applogger_core::log_op_start;
/// log_op_start!("create_app_logger");
/// log_op_start!("create_app_logger", component = "main");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use applogger_core::log_op_end;
/// log_op_end!("create_app_logger", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// `$err` is any value with a `code()` method, such as
/// [`crate::AppLoggerError`] or [`crate::EmissionError`].
///
/// # Example
///
/// ```
/// # use applogger_core::{log_op_error, AppLoggerError};
/// let err = AppLoggerError::MissingDestinationKey;
/// log_op_error!("create_app_logger", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let err = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.code = err.code(),
            "{}",
            err
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let err = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.code = err.code(),
            $($field)*,
            "{}",
            err
        );
    }};
}
