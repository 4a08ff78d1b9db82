//! DNS Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

pub mod netlify;

pub use netlify::NetlifyProvider;
