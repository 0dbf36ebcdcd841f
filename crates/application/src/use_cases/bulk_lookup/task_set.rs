use ferrous_ptr_domain::{LookupOutcome, LookupSummary};
use std::future::Future;
use tokio::sync::OwnedSemaphorePermit;
use tokio::task::JoinSet;
use tracing::warn;

/// Outstanding lookup tasks. Grows on dispatch, shrinks as tasks are joined.
pub struct TaskSet {
    tasks: JoinSet<LookupOutcome>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self {
            tasks: JoinSet::new(),
        }
    }

    /// Spawns `task` onto the runtime. A permit, when given, is held until the
    /// task completes.
    pub fn spawn<F>(&mut self, task: F, permit: Option<OwnedSemaphorePermit>)
    where
        F: Future<Output = LookupOutcome> + Send + 'static,
    {
        self.tasks.spawn(async move {
            let outcome = task.await;
            drop(permit);
            outcome
        });
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Joins every task, folding outcomes into `summary`. Returns only once
    /// the set is empty.
    pub async fn wait_all(mut self, summary: &mut LookupSummary) {
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(outcome) => summary.record(&outcome),
                Err(e) => {
                    warn!(error = %e, "Lookup task did not complete");
                    summary.failed += 1;
                }
            }
        }
    }
}

impl Default for TaskSet {
    fn default() -> Self {
        Self::new()
    }
}
