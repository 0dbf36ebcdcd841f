//! Ferrous PTR Infrastructure Layer
pub mod binding;
pub mod dns;
pub mod system;

pub use binding::bind;
