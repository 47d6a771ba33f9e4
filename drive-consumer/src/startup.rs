use async_channel::Sender;
use fare_core::FareResult;
use futures::StreamExt;
use snafu::{OptionExt, ResultExt};
use tokio::{
    fs::File,
    io::{AsyncRead, AsyncWrite},
    sync::oneshot,
    task::JoinSet,
};
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing::{info, instrument, warn};

use crate::{
    error::{
        Result,
        error::{
            CreateOutputSnafu, OpenInputSnafu, ReadLineSnafu, ResultChannelClosedSnafu,
            TaskJoinSnafu,
        },
    },
    merger::ResultMerger,
    processor::process_batch,
    segmenter::{DriveBatch, DriveSegmenter},
    settings::Settings,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineSummary {
    /// Drive batches sealed by the segmenter.
    pub drives: u64,
    /// Result lines written by the merger.
    pub results_written: u64,
}

pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> App {
        App { settings }
    }

    /// Runs the full pipeline against the configured input and output
    /// files. Failing to open either is fatal for the whole run.
    pub async fn run(self) -> Result<PipelineSummary> {
        let input = File::open(&self.settings.input)
            .await
            .context(OpenInputSnafu {
                path: &self.settings.input,
            })?;
        let output = File::create(&self.settings.output)
            .await
            .context(CreateOutputSnafu {
                path: &self.settings.output,
            })?;

        self.run_streams(input, output).await
    }

    /// Scans the source sequentially, spawning one fare task per sealed
    /// drive batch without ever waiting on a spawned task, then joins all
    /// tasks before signalling the merger that no further results arrive.
    #[instrument(skip_all, fields(app.num_drives))]
    pub async fn run_streams(
        &self,
        source: impl AsyncRead + Unpin,
        sink: impl AsyncWrite + Send + Unpin + 'static,
    ) -> Result<PipelineSummary> {
        let (sender, receiver) = async_channel::bounded(self.settings.result_buffer_size);
        let (done_sender, done_receiver) = oneshot::channel();

        let merger = tokio::spawn(ResultMerger::new(receiver, done_receiver).run(sink));

        let mut tasks = JoinSet::new();
        let mut segmenter = DriveSegmenter::new();
        let mut drives = 0;

        let mut lines = FramedRead::new(source, LinesCodec::new());
        while let Some(line) = lines.next().await {
            let line = line.context(ReadLineSnafu)?;
            if let Some(batch) = segmenter.push(line) {
                drives += 1;
                spawn_fare_task(&mut tasks, batch, sender.clone());
            }
        }
        if let Some(batch) = segmenter.finish() {
            drives += 1;
            spawn_fare_task(&mut tasks, batch, sender.clone());
        }

        // Counted-completion barrier over the fan-out.
        while let Some(joined) = tasks.join_next().await {
            joined.context(TaskJoinSnafu)??;
        }

        drop(sender);
        // The merger drains results queued ahead of the signal before
        // terminating.
        let _ = done_sender.send(());
        let results_written = merger.await.context(TaskJoinSnafu)??;

        tracing::Span::current().record("app.num_drives", drives);
        info!("processed {drives} drives, wrote {results_written} results");

        Ok(PipelineSummary {
            drives,
            results_written,
        })
    }
}

fn spawn_fare_task(
    tasks: &mut JoinSet<Result<()>>,
    batch: DriveBatch,
    sender: Sender<FareResult>,
) {
    tasks.spawn(async move {
        match process_batch(&batch) {
            Some(result) => sender
                .send(result)
                .await
                .ok()
                .context(ResultChannelClosedSnafu),
            None => {
                warn!(
                    "drive {} had fewer than two valid samples, no fare emitted",
                    batch.drive_id
                );
                Ok(())
            }
        }
    });
}
