use tokio::io::{AsyncRead, AsyncWrite};

use crate::{command, event};

use super::common::{json_lines, write_json_line, BoxedStream};

/// [EventStream] is a stream of [crate::event::Event]s emitted by a console
///
/// # Cancel Safety
///
/// This stream is cancel-safe, meaning that it can be used in [tokio::select!]
/// without the risk of missing events.
pub type EventStream = BoxedStream<anyhow::Result<event::Event>>;

/// [CommandWriter] is a wrapper around an output stream which writes [crate::command::Command]s as JSON lines
pub struct CommandWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> CommandWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Send a [crate::command::Command] to the console
    ///
    /// # Cancel Safety
    ///
    /// This method is not cancellation safe, see [super::console::EventWriter::write].
    pub async fn write(&mut self, command: &command::Command) -> anyhow::Result<()> {
        write_json_line(&mut self.writer, command).await
    }
}

/// Splits the console's output and input into a stream of events and a command writer.
pub fn split<R, W>(reader: R, writer: W) -> (EventStream, CommandWriter<W>)
where
    R: AsyncRead + Send + Unpin + 'static,
    W: AsyncWrite + Unpin,
{
    (json_lines(reader, "console"), CommandWriter::new(writer))
}
