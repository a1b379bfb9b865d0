//! Runtime system trait

use crate::event_bus::EventBus;
use wisp_core::Result;

/// A system that can be ticked by the host loop
///
/// `update` drains whatever the host queued on the bus since the last frame,
/// then advances time-based state by `dt` seconds.
pub trait RuntimeSystem {
    /// Called once before the first update
    fn initialize(&mut self) -> Result<()>;

    /// Called once per step with the pending events and elapsed time
    fn update(&mut self, events: &mut EventBus, dt: f64) -> Result<()>;

    /// Called when the system is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
