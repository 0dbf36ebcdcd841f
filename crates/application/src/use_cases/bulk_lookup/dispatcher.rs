use super::lookup_task::LookupTask;
use super::task_set::TaskSet;
use crate::ports::ResolverHandle;
use ferrous_ptr_domain::{DispatchConfig, LookupRequest, LookupResult};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, error};

/// What the dispatch loop leaves behind once input is exhausted.
pub struct DispatchReport {
    pub tasks: TaskSet,
    pub dispatched: u64,
    pub input_error: Option<String>,
}

/// Reads addresses line by line and launches one lookup task per line.
pub struct Dispatcher {
    resolver: ResolverHandle,
    config: DispatchConfig,
    limiter: Option<Arc<Semaphore>>,
}

impl Dispatcher {
    pub fn new(resolver: ResolverHandle, config: DispatchConfig) -> Self {
        let limiter = config
            .max_in_flight
            .map(|limit| Arc::new(Semaphore::new(limit.max(1))));

        Self {
            resolver,
            config,
            limiter,
        }
    }

    /// Dispatches until end of input or the first read error. Does not wait
    /// for the launched tasks.
    pub async fn run<R>(
        &self,
        mut input: R,
        results: &mpsc::UnboundedSender<LookupResult>,
    ) -> DispatchReport
    where
        R: AsyncBufRead + Unpin,
    {
        let mut line = Vec::new();
        let mut tasks = TaskSet::new();
        let mut dispatched = 0u64;
        let mut input_error = None;
        let wait = self.config.wait();

        loop {
            line.clear();
            let address = match input.read_until(b'\n', &mut line).await {
                Ok(0) => break,
                Ok(_) => decode_line(&line),
                Err(e) => {
                    error!(error = %e, dispatched, "Failed to read input");
                    input_error = Some(e.to_string());
                    break;
                }
            };

            let permit = match &self.limiter {
                Some(limiter) => limiter.clone().acquire_owned().await.ok(),
                None => None,
            };

            let task = LookupTask::new(self.resolver.clone(), results.clone());
            tasks.spawn(task.run(LookupRequest::new(address)), permit);
            dispatched += 1;

            if let Some(wait) = wait {
                tokio::time::sleep(wait).await;
            }
        }

        debug!(
            dispatched,
            outstanding = tasks.len(),
            "Input exhausted"
        );

        DispatchReport {
            tasks,
            dispatched,
            input_error,
        }
    }
}

/// Strips the line terminator (LF or CRLF). Bytes that are not UTF-8 are
/// replaced rather than rejected; the resolver decides what is an address.
fn decode_line(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}
