use super::MessageSink;
use std::io::{self, Write};

impl<W> MessageSink<W>
where
    W: Write,
{
    fn render_message(&mut self, message: &str, append_newline: bool) -> io::Result<()> {
        self.writer.write_all(message.as_bytes())?;
        if append_newline {
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Writes a single message using the sink's current [`LineMode`].
    pub fn write(&mut self, message: &str) -> io::Result<()> {
        self.render_message(message, self.line_mode.append_newline())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
