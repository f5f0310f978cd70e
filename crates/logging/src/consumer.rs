//! crates/logging/src/consumer.rs
//! Destinations for messages that pass form resolution.

use std::io::{self, Write};

use logging_sink::MessageSink;

/// Receives every message whose form resolves to enabled.
///
/// The default consumer is a [`MessageSink`] over standard output, printing
/// one message per line. Tests typically collect into a `Vec<String>`.
pub trait MessageConsumer {
    /// Accepts a single message.
    fn consume(&mut self, message: &str) -> io::Result<()>;
}

impl<W> MessageConsumer for MessageSink<W>
where
    W: Write,
{
    fn consume(&mut self, message: &str) -> io::Result<()> {
        self.write(message)
    }
}

impl MessageConsumer for Vec<String> {
    fn consume(&mut self, message: &str) -> io::Result<()> {
        self.push(message.to_owned());
        Ok(())
    }
}

impl<C> MessageConsumer for &mut C
where
    C: MessageConsumer + ?Sized,
{
    fn consume(&mut self, message: &str) -> io::Result<()> {
        (**self).consume(message)
    }
}

impl<C> MessageConsumer for Box<C>
where
    C: MessageConsumer + ?Sized,
{
    fn consume(&mut self, message: &str) -> io::Result<()> {
        (**self).consume(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed<C: MessageConsumer>(mut consumer: C) -> io::Result<()> {
        consumer.consume("first")?;
        consumer.consume("second")
    }

    #[test]
    fn vec_collects_messages() {
        let mut messages = Vec::new();
        feed(&mut messages).expect("collect");
        assert_eq!(messages, ["first", "second"]);
    }

    #[test]
    fn message_sink_writes_lines() {
        let mut sink = MessageSink::new(Vec::new());
        feed(&mut sink).expect("write");
        assert_eq!(sink.into_inner(), b"first\nsecond\n".to_vec());
    }

    #[test]
    fn boxed_consumer_forwards() {
        let boxed: Box<dyn MessageConsumer> = Box::new(Vec::<String>::new());
        feed(boxed).expect("forward");
    }
}
