use ferrous_ptr_domain::LookupResult;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

/// Writes results to the output in arrival order.
pub struct Collector;

impl Collector {
    /// Drains `results` until the channel is closed and empty, writing one
    /// line per result. Returns the number of lines written.
    pub async fn drain<W>(
        mut results: mpsc::UnboundedReceiver<LookupResult>,
        output: &mut W,
    ) -> std::io::Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let mut written = 0u64;

        while let Some(result) = results.recv().await {
            let line = format!("{}\n", result);
            output.write_all(line.as_bytes()).await?;
            output.flush().await?;
            written += 1;
        }

        output.flush().await?;
        Ok(written)
    }
}
