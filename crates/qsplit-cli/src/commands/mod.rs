//! CLI command implementations.

pub mod common;
pub mod dialects;
pub mod distribute;
pub mod export;
pub mod partition;
pub mod version;
