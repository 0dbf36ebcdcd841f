mod reverse_resolver;

pub use reverse_resolver::{ResolverHandle, ReverseResolver};
