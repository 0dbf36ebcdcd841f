pub mod resolv_conf;
pub mod system_resolver;

pub use system_resolver::SystemPtrResolver;
