use std::fmt;

use crate::line_mode::LineMode;

mod constructors;
mod writing;

/// Streaming sink that writes log messages into an [`std::io::Write`] target.
///
/// The sink owns the underlying writer together with the [`LineMode`] that
/// decides whether each message is terminated by a newline. A sink wrapping
/// [`std::io::Stdout`] is the console consumer used by default when a logger
/// is constructed without an explicit destination.
///
/// # Examples
///
/// Collect messages into a [`Vec<u8>`] with newline terminators:
///
/// ```
/// use logging_sink::MessageSink;
///
/// let mut sink = MessageSink::new(Vec::new());
///
/// sink.write("connecting")?;
/// sink.write("connected")?;
///
/// let output = String::from_utf8(sink.into_inner()).unwrap();
/// assert_eq!(output.lines().count(), 2);
/// assert!(output.ends_with('\n'));
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone)]
pub struct MessageSink<W> {
    writer: W,
    line_mode: LineMode,
}

impl<W> MessageSink<W> {
    /// Returns the current [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Mutably borrows the underlying writer.
    #[must_use]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }
}

impl<W> fmt::Debug for MessageSink<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageSink")
            .field("writer", &self.writer)
            .field("line_mode", &self.line_mode)
            .finish()
    }
}
