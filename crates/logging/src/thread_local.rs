//! crates/logging/src/thread_local.rs
//! Thread-safe logger with a shared registry and per-thread context stacks.

use std::cell::RefCell;
use std::io;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use logging_sink::MessageSink;
use rustc_hash::FxHashMap;

use crate::consumer::MessageConsumer;
use crate::form::Form;
use crate::registry::FormRegistry;
use crate::resolver::Resolution;
use crate::stack::FormStack;
use crate::trace;

static NEXT_LOGGER_ID: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static STACKS: RefCell<FxHashMap<u64, ThreadStack>> = RefCell::new(FxHashMap::default());
}

/// Context stack of one logger on one thread.
///
/// `owner` points at the logger's registry; once every clone is gone the
/// entry is dead and the next new entry on the thread prunes it.
struct ThreadStack {
    owner: Weak<RwLock<FormRegistry>>,
    stack: FormStack,
}

impl ThreadStack {
    fn is_live(&self) -> bool {
        self.owner.strong_count() > 0
    }
}

/// Logger that can be cloned across threads.
///
/// Clones share one [`FormRegistry`] (behind a read-write lock, since
/// configuration is rare compared to resolution) and one consumer (behind a
/// mutex). The context stack is private to each thread: a form entered on one
/// thread is never current on another, and a thread that has not entered any
/// form resolves with no current form.
///
/// # Examples
///
/// ```
/// use logging::SharedLogger;
/// use std::thread;
///
/// let log = SharedLogger::with_consumer(Vec::<String>::new());
/// log.set_form_log("worker", false);
/// log.set_type("main");
///
/// let worker = log.clone();
/// thread::spawn(move || {
///     worker.set_type("worker");
///     worker.out("suppressed").unwrap();
/// })
/// .join()
/// .unwrap();
///
/// log.out("printed")?;
/// assert_eq!(log.form().map(|form| form.into_string()), Some("main".to_owned()));
/// assert_eq!(log.with_consumer_ref(|messages| messages.clone()), ["printed"]);
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct SharedLogger<C = MessageSink<io::Stdout>> {
    id: u64,
    registry: Arc<RwLock<FormRegistry>>,
    consumer: Arc<Mutex<C>>,
}

impl SharedLogger {
    /// Creates a shared logger printing to standard output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_consumer(MessageSink::stdout())
    }
}

impl Default for SharedLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> SharedLogger<C> {
    /// Creates a shared logger with default settings forwarding to `consumer`.
    #[must_use]
    pub fn with_consumer(consumer: C) -> Self {
        Self::from_parts(FormRegistry::new(), consumer)
    }

    /// Creates a shared logger from a prepared registry and a consumer.
    #[must_use]
    pub fn from_parts(registry: FormRegistry, consumer: C) -> Self {
        Self {
            id: NEXT_LOGGER_ID.fetch_add(1, Ordering::Relaxed),
            registry: Arc::new(RwLock::new(registry)),
            consumer: Arc::new(Mutex::new(consumer)),
        }
    }

    /// Runs `f` with shared access to the registry.
    pub fn with_registry<R>(&self, f: impl FnOnce(&FormRegistry) -> R) -> R {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        f(&registry)
    }

    /// Runs `f` with exclusive access to the registry.
    pub fn update_registry<R>(&self, f: impl FnOnce(&mut FormRegistry) -> R) -> R {
        let mut registry = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut registry)
    }

    /// Runs `f` with exclusive access to the consumer.
    pub fn with_consumer_ref<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut consumer = self
            .consumer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut consumer)
    }

    fn with_stack<R>(&self, f: impl FnOnce(&mut FormStack) -> R) -> R {
        STACKS.with(|stacks| {
            let mut stacks = stacks.borrow_mut();
            if !stacks.contains_key(&self.id) {
                stacks.retain(|_, entry| entry.is_live());
            }
            let entry = stacks.entry(self.id).or_insert_with(|| ThreadStack {
                owner: Arc::downgrade(&self.registry),
                stack: FormStack::default(),
            });
            f(&mut entry.stack)
        })
    }

    /// Turns logging on for every clone.
    pub fn on(&self) {
        self.update_registry(|registry| registry.set_enabled(true));
    }

    /// Turns logging off for every clone.
    pub fn off(&self) {
        self.update_registry(|registry| registry.set_enabled(false));
    }

    /// Reports the master switch.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.with_registry(FormRegistry::is_enabled)
    }

    /// Sets the logging behaviour of a type or category.
    pub fn set_form_log(&self, form: &str, enabled: bool) {
        self.update_registry(|registry| registry.set_form_log(form, enabled));
    }

    /// Defines `category` as exactly `types`.
    pub fn categorize<I, S>(&self, category: &str, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update_registry(|registry| registry.categorize(category, types));
    }

    /// Adds missing `types` to `category`.
    pub fn add_types<I, S>(&self, category: &str, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update_registry(|registry| registry.add_types(category, types));
    }

    /// Makes the type `name` the current form of the calling thread.
    pub fn set_type(&self, name: &str) {
        self.push(name);
    }

    /// Makes the category `name` the current form of the calling thread.
    pub fn set_category(&self, name: &str) {
        self.push(name);
    }

    fn push(&self, name: &str) {
        let form = Form::new(name);
        let depth = self.with_stack(|stack| {
            stack.push(form.clone());
            stack.depth()
        });
        trace::trace_form_entered(&form, depth);
    }

    /// Restores the calling thread's previous form, keeping its first one.
    pub fn reset(&self) {
        let changed = self.with_stack(|stack| {
            let left = stack.reset()?;
            Some((left, stack.current().cloned()))
        });
        if let Some((left, restored)) = changed {
            trace::trace_form_left(&left, restored.as_ref());
        }
    }

    /// Returns the calling thread's current form.
    #[must_use]
    pub fn form(&self) -> Option<Form> {
        self.with_stack(|stack| stack.current().cloned())
    }

    /// Number of forms entered on the calling thread.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.with_stack(|stack| stack.depth())
    }

    /// Resolves the calling thread's current form.
    #[must_use]
    pub fn explain(&self) -> Resolution {
        let form = self.form();
        self.explain_form(form.as_ref())
    }

    /// Resolves an explicit form, ignoring the context stack.
    #[must_use]
    pub fn explain_form(&self, form: Option<&Form>) -> Resolution {
        self.with_registry(|registry| registry.resolve(form))
    }

    /// Reports whether a message logged now on this thread would be emitted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.explain().emits()
    }

    /// Enters the type `name` on the calling thread until the guard drops.
    pub fn enter_type(&self, name: &str) -> SharedFormGuard<'_, C> {
        self.set_type(name);
        SharedFormGuard::new(self)
    }

    /// Enters the category `name` on the calling thread until the guard drops.
    pub fn enter_category(&self, name: &str) -> SharedFormGuard<'_, C> {
        self.set_category(name);
        SharedFormGuard::new(self)
    }
}

impl<C> SharedLogger<C>
where
    C: MessageConsumer,
{
    /// Emits `message` if the calling thread's current form is enabled.
    pub fn out(&self, message: &str) -> io::Result<bool> {
        let form = self.form();
        self.out_with_form(form.as_ref(), message)
    }

    /// Emits `message` if `form` is enabled, regardless of the context stack.
    pub fn out_with_form(&self, form: Option<&Form>, message: &str) -> io::Result<bool> {
        if !self.explain_form(form).emits() {
            return Ok(false);
        }
        self.with_consumer_ref(|consumer| consumer.consume(message))?;
        Ok(true)
    }
}

impl<C> Clone for SharedLogger<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            registry: Arc::clone(&self.registry),
            consumer: Arc::clone(&self.consumer),
        }
    }
}

impl<C> Drop for SharedLogger<C> {
    fn drop(&mut self) {
        // Entries on other threads are pruned by their next new entry or
        // released when those threads exit.
        if Arc::strong_count(&self.registry) == 1 {
            let _ = STACKS.try_with(|stacks| {
                if let Ok(mut stacks) = stacks.try_borrow_mut() {
                    stacks.remove(&self.id);
                }
            });
        }
    }
}

#[cfg(test)]
fn thread_stack_count() -> usize {
    STACKS.with(|stacks| stacks.borrow().len())
}

impl<C> std::fmt::Debug for SharedLogger<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedLogger")
            .field("id", &self.id)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// RAII guard returned by [`SharedLogger::enter_type`] and
/// [`SharedLogger::enter_category`].
///
/// The guard is bound to the thread that created it, since it restores that
/// thread's context stack on drop.
#[must_use = "dropping the guard immediately restores the previous form"]
pub struct SharedFormGuard<'a, C> {
    logger: &'a SharedLogger<C>,
    _not_send: PhantomData<*const ()>,
}

impl<'a, C> SharedFormGuard<'a, C> {
    const fn new(logger: &'a SharedLogger<C>) -> Self {
        Self {
            logger,
            _not_send: PhantomData,
        }
    }
}

impl<C> Drop for SharedFormGuard<'_, C> {
    fn drop(&mut self) {
        self.logger.reset();
    }
}

impl<C> Deref for SharedFormGuard<'_, C> {
    type Target = SharedLogger<C>;

    fn deref(&self) -> &Self::Target {
        self.logger
    }
}
