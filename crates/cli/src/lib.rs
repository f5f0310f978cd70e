#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-end of the `formlog` workspace.
//! It builds a form registry from a JSON configuration file and command-line
//! directives, then either reports how individual forms resolve or filters
//! `FORM: message` lines read from standard input.
//!
//! # Design
//!
//! The crate exposes [`run`] and [`run_with`] as entry points. Both accept an
//! iterator of arguments together with handles for the standard streams so
//! tests can drive the complete program in memory. A
//! [`clap`](https://docs.rs/clap/) command definition parses the options;
//! help and version output use fixed text.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes.
//! - Configuration is applied in a fixed order: file, categories, type
//!   additions, form directives, `--off`.
//!
//! # Errors
//!
//! Invalid arguments, directives, category definitions and configuration
//! documents exit with code `1`. Failures reading input or configuration files
//! and writing output exit with code `2`. Diagnostics are written to standard
//! error prefixed with `formlog:`.
//!
//! # Examples
//!
//! ```
//! use cli::run_with;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run_with(
//!     ["formlog", "-f", "-net", "net", "disk"],
//!     std::io::empty(),
//!     &mut stdout,
//!     &mut stderr,
//! );
//!
//! assert_eq!(exit_code, 0);
//! assert_eq!(stdout, b"net: disabled\ndisk: enabled\n");
//! assert!(stderr.is_empty());
//! ```
//!
//! # See also
//!
//! - [`logging`] for the registry and resolver.
//! - `src/bin/formlog.rs` for the binary that wires [`run`] into `main`.

use std::ffi::OsString;
use std::io::{self, BufRead, Write};

use logging::MessageSink;

mod arguments;
mod execution;

use arguments::{PROGRAM_NAME, parse_args};

/// Test utilities exposed for integration tests.
///
/// **Warning**: Not part of the stable public API.
#[doc(hidden)]
pub mod test_utils {
    pub use crate::arguments::{ParsedArgs, parse_args};
}

/// Runs the CLI with the process's standard input.
///
/// Returns the process exit code; see [`run_with`].
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    run_with(arguments, io::stdin().lock(), stdout, stderr)
}

/// Runs the CLI using the provided argument iterator and stream handles.
///
/// The function returns the process exit code that should be used by the
/// caller. On success, `0` is returned.
pub fn run_with<I, S, In, Out, Err>(
    arguments: I,
    stdin: In,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    In: BufRead,
    Out: Write,
    Err: Write,
{
    let mut stderr_sink = MessageSink::new(stderr);
    let parsed = match parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => {
            report(&mut stderr_sink, &error.to_string());
            return 1;
        }
    };

    match execution::execute(&parsed, stdin, stdout) {
        Ok(()) => 0,
        Err(error) => {
            report(&mut stderr_sink, &error.to_string());
            error.exit_code()
        }
    }
}

/// Writes a diagnostic line to the supplied sink.
///
/// A failed diagnostic write has nowhere left to be reported and is ignored.
fn report<W: Write>(sink: &mut MessageSink<W>, text: &str) {
    let line = format!("{PROGRAM_NAME}: {}", text.trim_end());
    let _ = sink.write(&line);
}
