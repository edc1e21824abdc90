//! Cross-cutting service plumbing: tracing setup, request-id layers and serde
//! helpers.

pub mod middleware;
pub mod serde;
pub mod tracing;
