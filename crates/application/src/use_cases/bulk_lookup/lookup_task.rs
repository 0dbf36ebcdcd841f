use crate::ports::ResolverHandle;
use ferrous_ptr_domain::{LookupOutcome, LookupRequest, LookupResult};
use tokio::sync::mpsc;
use tracing::debug;

/// One reverse lookup for one input address.
pub struct LookupTask {
    resolver: ResolverHandle,
    results: mpsc::UnboundedSender<LookupResult>,
}

impl LookupTask {
    pub fn new(resolver: ResolverHandle, results: mpsc::UnboundedSender<LookupResult>) -> Self {
        Self { resolver, results }
    }

    /// Issues exactly one lookup and forwards every name, in resolver order.
    ///
    /// Failures produce no results; they are only visible in the returned
    /// outcome and at debug level.
    pub async fn run(self, request: LookupRequest) -> LookupOutcome {
        let LookupRequest { address } = request;

        match self.resolver.reverse_lookup(&address).await {
            Ok(names) => {
                let mut emitted = 0;
                for name in names {
                    if self
                        .results
                        .send(LookupResult::new(address.as_str(), name))
                        .is_err()
                    {
                        debug!(address = %address, "Result stream closed, dropping remaining names");
                        break;
                    }
                    emitted += 1;
                }

                debug!(address = %address, names = emitted, "PTR lookup successful");
                LookupOutcome::Resolved {
                    address,
                    names: emitted,
                }
            }
            Err(e) => {
                debug!(
                    address = %address,
                    resolver = %self.resolver.describe(),
                    error = %e,
                    "PTR lookup failed"
                );
                LookupOutcome::Failed { address, error: e }
            }
        }
    }
}
