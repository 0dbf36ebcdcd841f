use crate::dns::UpstreamPtrResolver;
use crate::system::SystemPtrResolver;
use ferrous_ptr_application::ports::ResolverHandle;
use ferrous_ptr_domain::ResolverConfig;
use std::sync::Arc;
use tracing::info;

/// Builds the resolver every lookup task shares.
///
/// No network I/O happens here; sockets are opened per lookup.
pub fn bind(config: &ResolverConfig) -> ResolverHandle {
    let handle: ResolverHandle = match config.endpoint() {
        Some(endpoint) => Arc::new(UpstreamPtrResolver::new(
            endpoint,
            config.protocol,
            config.timeout(),
        )),
        None => {
            let system = SystemPtrResolver::new(config.timeout());
            info!(
                nameservers = system.nameserver_count(),
                "Using system resolver configuration"
            );
            Arc::new(system)
        }
    };

    info!(resolver = %handle.describe(), "Resolver bound");
    handle
}
