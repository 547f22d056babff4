//! Retry module
//! - policy.rs: capped, jittered exponential backoff for provider calls

pub mod policy;

pub use policy::*;
