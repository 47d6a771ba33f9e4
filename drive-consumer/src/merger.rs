use async_channel::Receiver;
use fare_core::FareResult;
use snafu::ResultExt;
use tokio::{
    io::{AsyncWrite, AsyncWriteExt, BufWriter},
    sync::oneshot,
};
use tracing::instrument;

use crate::error::{Result, error::WriteOutputSnafu};

/// Sole writer of the output sink. Drains the shared result channel and
/// appends one line per drive, in result arrival order, until the completion
/// signal arrives.
pub struct ResultMerger {
    receiver: Receiver<FareResult>,
    done: oneshot::Receiver<()>,
}

impl ResultMerger {
    pub fn new(receiver: Receiver<FareResult>, done: oneshot::Receiver<()>) -> ResultMerger {
        ResultMerger { receiver, done }
    }

    /// Runs until the completion signal (or channel closure), then flushes
    /// the sink. Returns the number of result lines written.
    #[instrument(skip_all)]
    pub async fn run(mut self, sink: impl AsyncWrite + Unpin) -> Result<u64> {
        let mut writer = BufWriter::new(sink);
        let mut written = 0;

        loop {
            tokio::select! {
                result = self.receiver.recv() => match result {
                    Ok(result) => {
                        write_result(&mut writer, &result).await?;
                        written += 1;
                    }
                    // All senders are gone, no further results can arrive.
                    Err(_) => break,
                },
                _ = &mut self.done => {
                    // Results queued before the signal must still be
                    // delivered.
                    self.receiver.close();
                    while let Ok(result) = self.receiver.try_recv() {
                        write_result(&mut writer, &result).await?;
                        written += 1;
                    }
                    break;
                }
            }
        }

        writer.flush().await.context(WriteOutputSnafu)?;
        Ok(written)
    }
}

async fn write_result(
    writer: &mut (impl AsyncWrite + Unpin),
    result: &FareResult,
) -> Result<()> {
    writer
        .write_all(format!("{result}\n").as_bytes())
        .await
        .context(WriteOutputSnafu)
}
