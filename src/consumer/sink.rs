//! Downstream delivery seam
//!
//! The consumer forwards each decoded, token-stamped message to an
//! injectable sink. What "downstream" means is the embedder's business;
//! the stdout sink is the default stand-in.

use std::io::{self, Write};

use super::StampedMessage;

/// Receives decoded messages from the streaming mode.
pub trait MessageSink {
    /// Delivers one message. An error ends the consumption loop.
    fn deliver(&mut self, message: &StampedMessage) -> io::Result<()>;
}

/// Writes each payload to stdout as a lossy UTF-8 line.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl MessageSink for StdoutSink {
    fn deliver(&mut self, message: &StampedMessage) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(
            stdout,
            "{}\t{}",
            message.stream_token,
            String::from_utf8_lossy(&message.payload)
        )
    }
}
