//! Ferrous PTR Domain Layer
pub mod config;
pub mod errors;
pub mod lookup;
pub mod lookup_protocol;
pub mod reverse_name;

pub use config::{CliOverrides, Config, ConfigError, DispatchConfig, LoggingConfig, ResolverConfig};
pub use errors::DomainError;
pub use lookup::{LookupOutcome, LookupRequest, LookupResult, LookupSummary};
pub use lookup_protocol::LookupProtocol;
pub use reverse_name::{absolute_name, ip_to_reverse_domain};
