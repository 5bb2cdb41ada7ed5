#![forbid(unsafe_code)]

//! Core: typewriter text animation engine.
//!
//! - [`text`]: non-empty text sequences and grapheme-aware prefixes
//! - [`variant`]: named variants and the policy they resolve to
//! - [`config`]: timing, caller options, environment overrides
//! - [`machine`]: the phase state machine and the [`Typewriter`] engine
//! - [`cursor`]: cursor visibility contract for presentation layers
//! - [`motion`]: injected reduced-motion preference
//! - `sdui` (feature `sdui`): declarative JSON block spec
//!
//! ```
//! use std::time::Duration;
//! use typewriter_core::{Typewriter, TypewriterOptions, Variant};
//!
//! let opts = TypewriterOptions::new(["Hi", "Yo"])
//!     .variant(Variant::Rotation)
//!     .type_speed(Duration::from_millis(10));
//! let mut tw = Typewriter::from_options(&opts, false);
//! tw.advance(Duration::from_millis(20));
//! assert_eq!(tw.display_text(), "Hi");
//! ```

pub mod config;
pub mod cursor;
pub mod machine;
pub mod motion;
pub mod text;
pub mod variant;

#[cfg(feature = "sdui")]
pub mod sdui;

pub use config::{EngineConfig, Timing, TypewriterOptions};
pub use cursor::{CursorSpec, CursorStyle};
pub use machine::{Phase, Typewriter, TypewriterEvent, TypewriterSnapshot};
pub use motion::MotionPreference;
pub use text::TextSequence;
pub use variant::{Variant, VariantPolicy};
