//! crates/logging/src/logger.rs
//! Single-owner logger combining registry, context stack and consumer.

use std::io;

use logging_sink::MessageSink;

use crate::consumer::MessageConsumer;
use crate::form::Form;
use crate::guard::FormGuard;
use crate::registry::FormRegistry;
use crate::resolver::Resolution;
use crate::stack::FormStack;
use crate::trace;

/// Form-filtered logger.
///
/// Each logger owns its configuration, so independent loggers never share
/// state. Messages passed to [`out`](Self::out) are resolved against the
/// current form and forwarded to the consumer `C` when enabled.
///
/// # Examples
///
/// ```
/// use logging::Logger;
///
/// let mut log = Logger::with_consumer(Vec::<String>::new());
/// log.set_form_log("foo1", true);
/// log.set_form_log("foo2", false);
/// log.categorize("foo", ["foo1", "foo2"]);
///
/// log.set_type("foo1");
/// log.out("foo1 is here!")?;
/// log.set_type("foo2");
/// log.out("foo2 is here!")?;
/// log.reset();
///
/// assert_eq!(log.consumer(), &["foo1 is here!"]);
/// assert_eq!(log.form().map(|form| form.as_str()), Some("foo1"));
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Logger<C = MessageSink<io::Stdout>> {
    registry: FormRegistry,
    stack: FormStack,
    consumer: C,
}

impl Logger {
    /// Creates a logger printing to standard output with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_consumer(MessageSink::stdout())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Logger<C> {
    /// Creates a logger with default settings forwarding to `consumer`.
    #[must_use]
    pub fn with_consumer(consumer: C) -> Self {
        Self::from_parts(FormRegistry::new(), consumer)
    }

    /// Creates a logger from a prepared registry and a consumer.
    #[must_use]
    pub const fn from_parts(registry: FormRegistry, consumer: C) -> Self {
        Self {
            registry,
            stack: FormStack::new(),
            consumer,
        }
    }

    /// Turns logging on; individual forms may still be filtered.
    pub fn on(&mut self) {
        self.registry.set_enabled(true);
    }

    /// Turns logging off; nothing is emitted until [`on`](Self::on).
    pub fn off(&mut self) {
        self.registry.set_enabled(false);
    }

    /// Reports the master switch.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.registry.is_enabled()
    }

    /// Sets the logging behaviour of a type or category.
    ///
    /// See [`FormRegistry::set_form_log`].
    pub fn set_form_log(&mut self, form: &str, enabled: bool) {
        self.registry.set_form_log(form, enabled);
    }

    /// Makes the type `name` the current form.
    pub fn set_type(&mut self, name: &str) {
        self.push(name);
    }

    /// Makes the category `name` the current form.
    ///
    /// Behaves exactly like [`set_type`](Self::set_type); whether the form
    /// acts as a category is decided by the registry.
    pub fn set_category(&mut self, name: &str) {
        self.push(name);
    }

    fn push(&mut self, name: &str) {
        let form = Form::new(name);
        trace::trace_form_entered(&form, self.stack.depth() + 1);
        self.stack.push(form);
    }

    /// Restores the previous form.
    ///
    /// Does nothing when at most one form has been entered, so the first
    /// form stays current for good.
    pub fn reset(&mut self) {
        if let Some(left) = self.stack.reset() {
            trace::trace_form_left(&left, self.stack.current());
        }
    }

    /// Returns the current form.
    #[must_use]
    pub fn form(&self) -> Option<&Form> {
        self.stack.current()
    }

    /// Number of forms currently entered.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Defines `category` as exactly `types`. See [`FormRegistry::categorize`].
    pub fn categorize<I, S>(&mut self, category: &str, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registry.categorize(category, types);
    }

    /// Adds missing `types` to `category`. See [`FormRegistry::add_types`].
    pub fn add_types<I, S>(&mut self, category: &str, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registry.add_types(category, types);
    }

    /// Resolves the current form and reports the deciding rule.
    #[must_use]
    pub fn explain(&self) -> Resolution {
        self.registry.resolve(self.stack.current())
    }

    /// Reports whether a message logged now would be emitted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.explain().emits()
    }

    /// Enters the type `name` for the lifetime of the returned guard.
    ///
    /// Dropping the guard calls [`reset`](Self::reset), so entering the very
    /// first form of a logger leaves it current afterwards.
    pub fn enter_type(&mut self, name: &str) -> FormGuard<'_, C> {
        self.set_type(name);
        FormGuard::new(self)
    }

    /// Enters the category `name` for the lifetime of the returned guard.
    pub fn enter_category(&mut self, name: &str) -> FormGuard<'_, C> {
        self.set_category(name);
        FormGuard::new(self)
    }

    /// Borrows the registry.
    #[must_use]
    pub const fn registry(&self) -> &FormRegistry {
        &self.registry
    }

    /// Mutably borrows the registry.
    #[must_use]
    pub fn registry_mut(&mut self) -> &mut FormRegistry {
        &mut self.registry
    }

    /// Borrows the consumer.
    #[must_use]
    pub const fn consumer(&self) -> &C {
        &self.consumer
    }

    /// Mutably borrows the consumer.
    #[must_use]
    pub fn consumer_mut(&mut self) -> &mut C {
        &mut self.consumer
    }

    /// Consumes the logger and returns the consumer.
    #[must_use]
    pub fn into_consumer(self) -> C {
        self.consumer
    }
}

impl<C> Logger<C>
where
    C: MessageConsumer,
{
    /// Emits `message` if the current form resolves to enabled.
    ///
    /// Returns whether the message reached the consumer. Only consumer
    /// failures produce errors; the decision itself cannot fail.
    pub fn out(&mut self, message: &str) -> io::Result<bool> {
        if !self.is_active() {
            return Ok(false);
        }
        self.consumer.consume(message)?;
        Ok(true)
    }

    /// Emits `message` if `form` is enabled, leaving the context stack alone.
    pub fn out_with_form(&mut self, form: Option<&Form>, message: &str) -> io::Result<bool> {
        if !self.registry.resolve(form).emits() {
            return Ok(false);
        }
        self.consumer.consume(message)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger() -> Logger<Vec<String>> {
        Logger::with_consumer(Vec::<String>::new())
    }

    struct RejectingConsumer;

    impl MessageConsumer for RejectingConsumer {
        fn consume(&mut self, _message: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "consumer closed"))
        }
    }

    #[test]
    fn default_logger_prints_everything() {
        let mut log = logger();
        assert!(log.out("no form").expect("consume"));
        log.set_type("bar");
        assert!(log.out("m").expect("consume"));
        assert_eq!(log.consumer(), &["no form", "m"]);
    }

    #[test]
    fn off_suppresses_without_touching_stack() {
        let mut log = logger();
        log.set_type("bar");
        log.off();

        assert!(!log.is_on());
        assert!(!log.out("m").expect("consume"));
        assert_eq!(log.form(), Some(&Form::new("bar")));

        log.on();
        assert!(log.out("m").expect("consume"));
        assert_eq!(log.consumer().len(), 1);
    }

    #[test]
    fn set_type_and_set_category_normalise_names() {
        let mut log = logger();
        log.set_type("Foo1");
        assert_eq!(log.form(), Some(&Form::new("foo1")));
        log.set_category("METHODS");
        assert_eq!(log.form().map(Form::as_str), Some("methods"));
        assert_eq!(log.depth(), 2);
    }

    #[test]
    fn explicit_type_enable_dominates_disabled_category() {
        let mut log = logger();
        log.set_form_log("foo1", true);
        log.set_form_log("foo2", false);
        log.categorize("foo", ["foo1", "foo2"]);
        log.set_type("foo1");

        assert!(log.out("m").expect("consume"));
    }

    #[test]
    fn explicit_type_disable_suppresses() {
        let mut log = logger();
        log.set_form_log("foo2", false);
        log.categorize("foo", ["foo1", "foo2"]);
        log.set_type("foo2");

        assert!(!log.out("m").expect("consume"));
        assert!(log.consumer().is_empty());
    }

    #[test]
    fn disabled_form_suppresses_whether_type_or_category() {
        let mut log = logger();
        log.set_form_log("foo", false);
        log.set_type("foo");
        assert!(!log.out("m").expect("consume"));

        log.categorize("foo", ["foo1"]);
        assert!(!log.out("m").expect("consume"));
    }

    #[test]
    fn reset_restores_previous_form_and_keeps_root() {
        let mut log = logger();
        log.set_type("a");
        log.set_type("b");

        log.reset();
        assert_eq!(log.form(), Some(&Form::new("a")));
        log.reset();
        assert_eq!(log.form(), Some(&Form::new("a")));
    }

    #[test]
    fn is_active_does_not_emit() {
        let mut log = logger();
        log.set_form_log("quiet", false);
        log.set_type("quiet");

        assert!(!log.is_active());
        assert!(log.consumer().is_empty());
    }

    #[test]
    fn from_parts_uses_prepared_registry() {
        let mut registry = FormRegistry::new();
        registry.set_form_log("unspecified", false);
        let mut log = Logger::from_parts(registry, Vec::new());

        assert!(!log.out("m").expect("consume"));
        assert!(!log.registry().unspecified_default());

        log.registry_mut().set_unspecified_default(true);
        assert!(log.out("m").expect("consume"));
        assert_eq!(log.into_consumer(), ["m"]);
    }

    #[test]
    fn out_with_form_ignores_current_form() {
        let mut log = logger();
        log.set_form_log("quiet", false);
        log.set_type("quiet");

        assert!(log.out_with_form(Some(&Form::new("other")), "a").expect("consume"));
        assert!(!log.out_with_form(Some(&Form::new("QUIET")), "b").expect("consume"));
        assert!(log.out_with_form(None, "c").expect("consume"));
        assert_eq!(log.form(), Some(&Form::new("quiet")));
        assert_eq!(log.consumer(), &["a", "c"]);
    }

    #[test]
    fn consumer_mut_allows_draining() {
        let mut log = logger();
        log.out("first").expect("consume");
        let drained: Vec<String> = log.consumer_mut().drain(..).collect();

        assert_eq!(drained, ["first"]);
        assert!(log.consumer().is_empty());
    }

    #[test]
    fn consumer_failure_propagates_from_out() {
        let mut log = Logger::with_consumer(RejectingConsumer);
        let error = log.out("m").expect_err("consumer fails");
        assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);

        let error = log.out_with_form(None, "m").expect_err("consumer fails");
        assert_eq!(error.to_string(), "consumer closed");
    }

    #[test]
    fn suppressed_message_never_reaches_failing_consumer() {
        let mut log = Logger::with_consumer(RejectingConsumer);
        log.set_form_log("quiet", false);
        log.set_type("quiet");

        assert!(!log.out("m").expect("suppressed before consuming"));
    }
}
