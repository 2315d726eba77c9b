use tokio::io::{AsyncRead, AsyncWrite};

use crate::{command, event};

use super::common::{json_lines, write_json_line, BoxedStream};

/// [CommandStream] is a stream of [crate::command::Command]s typed by the user or a script
///
/// # Cancel Safety
///
/// This stream is cancel-safe, meaning that it can be used in [tokio::select!]
/// without the risk of missing commands.
pub type CommandStream = BoxedStream<anyhow::Result<command::Command>>;

/// [EventWriter] is a wrapper around an output stream which writes [crate::event::Event]s as JSON lines
pub struct EventWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> EventWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Send a [crate::event::Event] to the backing output
    ///
    /// # Cancel Safety
    ///
    /// This method is not cancellation safe. If it is used as the event
    /// in a [tokio::select!] statement and some other
    /// branch completes first, then the provided [crate::event::Event] may have been
    /// partially written, but future calls to `write` will start over
    /// from the beginning of the buffer. Causing undefined behaviour.
    pub async fn write(&mut self, event: &event::Event) -> anyhow::Result<()> {
        write_json_line(&mut self.writer, event).await
    }
}

/// Splits an input and an output into a stream of commands and an event writer.
///
/// # Arguments
///
/// - `reader` - Where commands are read from, usually stdin
/// - `writer` - Where events are written to, usually stdout
pub fn split<R, W>(reader: R, writer: W) -> (CommandStream, EventWriter<W>)
where
    R: AsyncRead + Send + Unpin + 'static,
    W: AsyncWrite + Unpin,
{
    (json_lines(reader, "input"), EventWriter::new(writer))
}
