//! CLI command implementations

pub mod config;
pub mod palette;
pub mod replay;
