#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` filters diagnostic output by *form*. A form is a lower-cased name
//! acting either as a *type* (a fine-grained kind of message) or as a
//! *category* (a named group of types). Code marks what it is doing by making
//! a form current, and every message is emitted or suppressed according to
//! how that form resolves against the configured settings.
//!
//! # Design
//!
//! - [`FormRegistry`] stores the master switch, the unspecified default,
//!   explicit per-form settings and category definitions.
//! - [`FormRegistry::resolve`] turns the current form into a [`Resolution`],
//!   recording which rule ([`VerdictSource`]) decided it.
//! - [`FormStack`] remembers entered forms so [`Logger::reset`] can restore
//!   the previous one. The first form entered is never popped.
//! - [`Logger`] bundles a registry, a stack and a [`MessageConsumer`]; each
//!   instance is independent. [`SharedLogger`] shares the registry and
//!   consumer between threads while keeping a context stack per thread.
//! - [`FormGuard`] and [`SharedFormGuard`] scope a form to a block.
//! - [`FormConfig`], [`apply_directive`] and [`parse_category_definition`]
//!   load settings from command-line tokens or JSON documents.
//!
//! With the `tracing` feature the engine reports its own decisions under
//! `formlog::*` targets, and `FormLayer` lets `tracing` events be filtered
//! by form.
//!
//! # Invariants
//!
//! - With the master switch off nothing is emitted.
//! - A form that is a category resolves to its own setting, or enabled.
//! - An explicit type setting overrides every category containing the type.
//! - Without its own setting, a type is enabled by any enabled category and
//!   disabled when its only configured categories are disabled.
//! - Forms nothing decides resolve to the unspecified default, which starts
//!   enabled.
//!
//! # Errors
//!
//! Resolution cannot fail. Emitting a message surfaces the consumer's
//! [`std::io::Error`]; configuration parsing reports [`ConfigError`].
//!
//! # Examples
//!
//! ```
//! use logging::Logger;
//!
//! let mut log = Logger::with_consumer(Vec::<String>::new());
//! log.set_form_log("foo2", false);
//! log.set_form_log("bar", false);
//! log.categorize("foo", ["foo1", "foo2"]);
//!
//! log.set_type("foo1");
//! log.out("foo1 is here!")?;
//! {
//!     let mut scope = log.enter_type("foo2");
//!     scope.out("foo2 is here!")?;
//! }
//! log.set_category("bar");
//! log.out("bar is here!")?;
//!
//! assert_eq!(log.consumer(), &["foo1 is here!"]);
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # See also
//!
//! - [`logging_sink`] for the line-oriented writer used by default.

mod config;
mod consumer;
mod error;
mod form;
mod guard;
mod logger;
mod macros;
mod registry;
mod resolver;
mod setting;
mod stack;
mod thread_local;
mod trace;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{FormConfig, apply_directive, parse_category_definition, parse_directive};
pub use consumer::MessageConsumer;
pub use error::ConfigError;
pub use form::{Form, UNSPECIFIED};
pub use guard::FormGuard;
pub use logger::Logger;
pub use logging_sink::{LineMode, MessageSink};
pub use registry::FormRegistry;
pub use resolver::{Resolution, VerdictSource};
pub use setting::Setting;
pub use stack::FormStack;
pub use thread_local::{SharedFormGuard, SharedLogger};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{FormLayer, init_tracing, init_tracing_with_filter};
