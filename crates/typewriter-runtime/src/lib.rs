#![forbid(unsafe_code)]

//! Typewriter runtime
//!
//! Drives `typewriter-core` engines against real or virtual time.
//!
//! # Key Components
//!
//! - [`TypewriterHandle`] - one engine on its own driver thread, with
//!   hooks, snapshot watchers, `reset()` and reconfiguration
//! - [`Hooks`] - `on_text_change` / `on_complete` callbacks
//! - [`Stage`] - many instances following one motion preference
//! - [`TypewriterSimulator`] - deterministic virtual-clock runner for tests
//! - [`StopSignal`] - cancellable wait used by the driver threads

pub mod driver;
pub mod simulator;
pub mod stage;
pub mod timer;

pub use driver::{Hooks, TypewriterHandle};
pub use simulator::{Frame, TimedEvent, TypewriterSimulator};
pub use stage::{InstanceId, Stage};
pub use timer::StopSignal;
