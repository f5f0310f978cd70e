//! crates/logging/src/macros.rs
//! Formatting macros for form-filtered output.

/// Formats and emits a message through a logger if its current form is active.
///
/// The arguments are only formatted when the message would be emitted, so
/// suppressed forms cost a resolution and nothing else. Works with
/// [`Logger`](crate::Logger), [`SharedLogger`](crate::SharedLogger) and their
/// guards, and evaluates to the same `io::Result<bool>` as their `out`
/// methods.
///
/// # Example
///
/// ```
/// use logging::{Logger, form_out};
///
/// let mut log = Logger::with_consumer(Vec::<String>::new());
/// log.set_form_log("net", false);
///
/// log.set_type("disk");
/// assert!(form_out!(log, "wrote {} blocks", 3)?);
/// log.set_type("net");
/// assert!(!form_out!(log, "sent {} packets", 9)?);
///
/// assert_eq!(log.consumer(), &["wrote 3 blocks"]);
/// # Ok::<(), std::io::Error>(())
/// ```
#[macro_export]
macro_rules! form_out {
    ($logger:expr, $($arg:tt)+) => {{
        if $logger.is_active() {
            $logger.out(&::std::format!($($arg)+))
        } else {
            ::std::io::Result::<bool>::Ok(false)
        }
    }};
}

/// Emit a tracing event logged under an explicit form.
///
/// Requires the `tracing` feature. The event is routed by
/// [`FormLayer`](crate::FormLayer) regardless of its target.
///
/// # Example
/// ```ignore
/// trace_form!("net", "sent {} packets", count);
/// ```
#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! trace_form {
    ($form:expr, $($arg:tt)+) => {
        ::tracing::info!(form = $form, $($arg)+);
    };
}
