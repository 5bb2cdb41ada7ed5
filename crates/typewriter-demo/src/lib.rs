#![forbid(unsafe_code)]

//! Terminal showcase for the typewriter engine.
//!
//! - [`cli`]: hand-parsed flags over `TYPEWRITER_DEMO_*` variables
//! - [`showcase`]: titled SDUI pages (built-in or from a file)
//! - [`app`]: stage of running blocks and the frame loop
//! - [`render`]: frame layout as plain lines
//! - [`session`]: raw-mode / alternate-screen guard
//! - [`logging`]: `TYPEWRITER_LOG` file subscriber

pub mod app;
pub mod cli;
pub mod logging;
pub mod render;
pub mod session;
pub mod showcase;
