use super::MessageSink;
use crate::line_mode::LineMode;
use std::io;

impl<W> MessageSink<W> {
    /// Creates a new sink that appends a newline after each message.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub const fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self { writer, line_mode }
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl MessageSink<io::Stdout> {
    /// Creates the console consumer: one message per line on standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W> Default for MessageSink<W>
where
    W: Default,
{
    fn default() -> Self {
        Self::new(W::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sink_appends_newlines() {
        let sink = MessageSink::new(Vec::<u8>::new());
        assert_eq!(sink.line_mode(), LineMode::WithNewline);
    }

    #[test]
    fn default_sink_uses_default_writer() {
        let sink: MessageSink<Vec<u8>> = MessageSink::default();
        assert!(sink.get_ref().is_empty());
        assert_eq!(sink.line_mode(), LineMode::WithNewline);
    }

    #[test]
    fn console_constructor_appends_newlines() {
        assert!(MessageSink::stdout().line_mode().append_newline());
    }
}
