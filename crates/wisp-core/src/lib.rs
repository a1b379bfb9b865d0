//! Wisp Core - Foundational types for the Wisp trail engine
//!
//! This crate provides the core types that all other Wisp crates depend on:
//! - `ParticleId` / `IdAllocator` - Monotonic particle identifiers
//! - `Vec2`, `Color` - Viewport-space and color types
//! - `Theme` - The two page themes
//! - Error types and Result alias

mod error;
mod id;
mod theme;
mod types;

pub use error::{Result, WispError};
pub use id::{IdAllocator, ParticleId};
pub use theme::Theme;
pub use types::{Color, Vec2};
