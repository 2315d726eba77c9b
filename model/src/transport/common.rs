use std::pin::Pin;

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_stream::{wrappers::LinesStream, Stream, StreamExt};

pub const NEW_LINE: &[u8; 1] = b"\n";

pub type BoxedStream<Item> = Pin<Box<dyn Stream<Item = Item> + Send>>;

/// Turns a byte stream into a stream of values, one JSON document per line.
/// Blank lines are skipped so hand written scripts can be spaced out.
pub fn json_lines<R, T>(reader: R, side: &'static str) -> BoxedStream<anyhow::Result<T>>
where
    R: AsyncRead + Send + Unpin + 'static,
    T: DeserializeOwned + Send + 'static,
{
    Box::pin(
        LinesStream::new(BufReader::new(reader).lines())
            .filter(|line| !matches!(line, Ok(line) if line.trim().is_empty()))
            .map(move |line| {
                line.with_context(|| format!("could not read line from the {}", side))
                    .and_then(|line| {
                        serde_json::from_str::<T>(&line).with_context(|| {
                            format!("failed to deserialize line from the {}", side)
                        })
                    })
            }),
    )
}

/// Serializes a value as a single JSON line and writes it out
pub async fn write_json_line<W, T>(writer: &mut W, value: &T) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut serialized_bytes = serde_json::to_vec(value)?;
    serialized_bytes.extend_from_slice(NEW_LINE);

    writer.write_all(serialized_bytes.as_slice()).await?;
    writer.flush().await?;

    Ok(())
}
