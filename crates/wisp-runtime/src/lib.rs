//! Wisp Runtime - Event loop infrastructure
//!
//! Provides the building blocks a host uses to drive the trail engine:
//! - `FrameClock` - fixed-timestep accumulator, real-time or manually advanced
//! - `TrailEvent` / `EventBus` - ordered queue of pointer, theme, and expiry events
//! - `RuntimeSystem` - trait for systems ticked by the host loop

mod clock;
mod event;
mod event_bus;
mod system;

pub use clock::FrameClock;
pub use event::TrailEvent;
pub use event_bus::EventBus;
pub use system::RuntimeSystem;
