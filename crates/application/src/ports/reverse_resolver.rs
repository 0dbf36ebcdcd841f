use async_trait::async_trait;
use ferrous_ptr_domain::DomainError;
use std::sync::Arc;

#[async_trait]
pub trait ReverseResolver: Send + Sync {
    /// Resolves `address` to every name the resolver returns, in its order.
    ///
    /// `address` is the raw input line; rejecting malformed input is up to
    /// the implementation.
    async fn reverse_lookup(&self, address: &str) -> Result<Vec<String>, DomainError>;

    /// Short label used in logs, e.g. `system` or `udp://9.9.9.9:53`.
    fn describe(&self) -> String;
}

/// Read-only resolver shared by every lookup task.
pub type ResolverHandle = Arc<dyn ReverseResolver>;
