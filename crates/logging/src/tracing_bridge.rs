//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and form-based filtering.
//!
//! [`FormLayer`] is a tracing-subscriber layer that treats every tracing event
//! as a message logged under a form and forwards it to a [`SharedLogger`]
//! when that form resolves to enabled. This lets code instrumented with the
//! standard `tracing` macros be filtered by types and categories.
//!
//! # Form selection
//!
//! - An explicit `form` field on the event wins: `info!(form = "net", "...")`.
//! - Otherwise the last `::` segment of the event target is used, so
//!   `info!(target: "app::net", "...")` and events from a module named `net`
//!   resolve under `net`.
//!
//! Events emitted by the engine's own instrumentation are ignored.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{SharedLogger, init_tracing};
//!
//! let log = SharedLogger::new();
//! log.set_form_log("net", false);
//! init_tracing(log.clone())?;
//!
//! tracing::info!(target: "app::net", "suppressed");
//! tracing::info!(target: "app::disk", "printed");
//! ```

use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::consumer::MessageConsumer;
use crate::form::Form;
use crate::thread_local::SharedLogger;
use crate::trace::TARGET_PREFIX;

/// A tracing layer routing events through form resolution.
pub struct FormLayer<C> {
    logger: SharedLogger<C>,
}

impl<C> FormLayer<C> {
    /// Creates a layer forwarding enabled events to `logger`.
    #[must_use]
    pub const fn new(logger: SharedLogger<C>) -> Self {
        Self { logger }
    }

    /// Borrows the logger events are forwarded to.
    #[must_use]
    pub const fn logger(&self) -> &SharedLogger<C> {
        &self.logger
    }

    /// Map a tracing target to the form it is logged under.
    fn target_to_form(target: &str) -> Option<Form> {
        let segment = target.rsplit("::").next().unwrap_or(target);
        (!segment.is_empty()).then(|| Form::new(segment))
    }
}

impl<C> std::fmt::Debug for FormLayer<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormLayer")
            .field("logger", &self.logger)
            .finish()
    }
}

impl<S, C> Layer<S> for FormLayer<C>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    C: MessageConsumer + Send + 'static,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();
        if target.starts_with(TARGET_PREFIX) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let Some(message) = visitor.message else {
            return;
        };

        let form = visitor
            .form
            .map(|name| Form::new(&name))
            .or_else(|| Self::target_to_form(target));
        // A failing consumer cannot be reported from inside a subscriber.
        let _ = self.logger.out_with_form(form.as_ref(), &message);
    }
}

/// Visitor extracting the message and optional form of an event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    form: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.message = Some(format!("{value:?}")),
            "form" => {
                let rendered = format!("{value:?}");
                self.form = Some(unquote(&rendered).to_owned());
            }
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_owned()),
            "form" => self.form = Some(value.to_owned()),
            _ => {}
        }
    }
}

/// Strips the quotes `Debug` puts around a string recorded with `form = ?name`.
fn unquote(rendered: &str) -> &str {
    rendered
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(rendered)
}

/// Installs a global subscriber that routes events through `logger`.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_tracing<C>(logger: SharedLogger<C>) -> Result<(), TryInitError>
where
    C: MessageConsumer + Send + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(FormLayer::new(logger))
        .try_init()
}

/// Installs a global subscriber combining `filter` with a [`FormLayer`].
///
/// Events rejected by `filter` never reach form resolution.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{SharedLogger, init_tracing_with_filter};
/// use tracing_subscriber::EnvFilter;
///
/// init_tracing_with_filter(SharedLogger::new(), EnvFilter::from_default_env())?;
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_tracing_with_filter<C, F>(logger: SharedLogger<C>, filter: F) -> Result<(), TryInitError>
where
    C: MessageConsumer + Send + 'static,
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(FormLayer::new(logger))
        .try_init()
}
