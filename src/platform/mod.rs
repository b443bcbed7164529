//! Platform abstraction layer
//!
//! Handles device differences for:
//! - Input events (pointer/touch or keyboard -> tick intent and commands)
//! - Time (fixed-step accumulator)

pub mod clock;
pub mod input;

pub use clock::FixedStep;
pub use input::{Key, KeyState, PointerState};
