#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the line-oriented writer used as the console
//! consumer of the `formlog` workspace. A message that survives form
//! resolution is handed to a [`MessageSink`], which streams the text into an
//! arbitrary [`std::io::Write`] implementor.
//!
//! # Design
//!
//! The crate exposes [`MessageSink`], a lightweight wrapper around a writer
//! together with a [`LineMode`]. Callers control whether rendered messages
//! end with a newline by selecting the mode; the default prints each message
//! on its own line, matching the behaviour of a plain console logger.
//!
//! # Invariants
//!
//! - The sink never copies message payloads; the borrowed text is written
//!   directly to the underlying writer.
//! - `LineMode::WithNewline` appends exactly one `\n` per message, even when
//!   the message itself already contains line breaks.
//!
//! # Errors
//!
//! All operations surface [`std::io::Error`] values originating from the
//! underlying writer.
//!
//! # Examples
//!
//! Stream two messages into an in-memory buffer and inspect the output:
//!
//! ```
//! use logging_sink::{LineMode, MessageSink};
//!
//! let mut sink = MessageSink::new(Vec::new());
//! sink.write("foo1 is here!").unwrap();
//! sink.write("foo2 is here!").unwrap();
//!
//! let output = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(output, "foo1 is here!\nfoo2 is here!\n");
//!
//! // Render a final message without appending a newline.
//! let mut final_sink = MessageSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);
//! final_sink.write("completed").unwrap();
//! assert_eq!(final_sink.into_inner(), b"completed".to_vec());
//! ```
//!
//! # See also
//!
//! - `logging` crate for form resolution and the `MessageConsumer` trait
//!   implemented for [`MessageSink`].

mod line_mode;
mod sink;

pub use line_mode::LineMode;
pub use sink::MessageSink;
