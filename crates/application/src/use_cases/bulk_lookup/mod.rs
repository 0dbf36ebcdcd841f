//! Bulk reverse lookups: fan out one task per input line, fan results back
//! in through a single channel.

mod collector;
mod dispatcher;
mod lookup_task;
mod task_set;

pub use collector::Collector;
pub use dispatcher::{DispatchReport, Dispatcher};
pub use lookup_task::LookupTask;
pub use task_set::TaskSet;

use crate::ports::ResolverHandle;
use ferrous_ptr_domain::{DispatchConfig, LookupSummary};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct BulkLookupUseCase {
    dispatcher: Dispatcher,
}

impl BulkLookupUseCase {
    pub fn new(resolver: ResolverHandle, config: DispatchConfig) -> Self {
        Self {
            dispatcher: Dispatcher::new(resolver, config),
        }
    }

    /// Runs the whole batch: dispatch, wait for every task, close the result
    /// stream, and stream results to `output` concurrently with all of it.
    ///
    /// Only an output write error is returned, and it is returned as soon as
    /// it happens. Per-address failures and input read errors end up in the
    /// summary.
    pub async fn execute<R, W>(&self, input: R, output: &mut W) -> std::io::Result<LookupSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let dispatcher = &self.dispatcher;

        let producer = async move {
            let report = dispatcher.run(input, &results_tx).await;
            let mut summary = LookupSummary {
                dispatched: report.dispatched,
                input_error: report.input_error,
                ..Default::default()
            };

            debug!(
                outstanding = report.tasks.len(),
                "Waiting for outstanding lookups"
            );
            report.tasks.wait_all(&mut summary).await;

            // Every task has finished, so this is the last sender.
            drop(results_tx);
            summary
        };

        let collector = Collector::drain(results_rx, output);
        tokio::pin!(producer);
        tokio::pin!(collector);

        // An output error ends the run early: dropping the producer stops
        // reading input and aborts every outstanding task.
        let (summary, written) = tokio::select! {
            summary = &mut producer => (summary, collector.await?),
            written = &mut collector => match written {
                Ok(written) => (producer.await, written),
                Err(e) => {
                    warn!(error = %e, "Failed to write results, abandoning outstanding lookups");
                    return Err(e);
                }
            },
        };

        info!(
            dispatched = summary.dispatched,
            resolved = summary.resolved,
            failed = summary.failed,
            lines = written,
            "Reverse lookups complete"
        );

        Ok(summary)
    }
}
