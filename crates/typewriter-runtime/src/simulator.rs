#![forbid(unsafe_code)]

//! Deterministic typewriter simulator for testing.
//!
//! `TypewriterSimulator` runs an engine on a virtual clock, fires one
//! transition at a time at its exact due time, and records a timeline of
//! frames and events. No threads, no sleeping.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use typewriter_core::{TypewriterOptions, Variant};
//! use typewriter_runtime::simulator::TypewriterSimulator;
//!
//! let opts = TypewriterOptions::new("Done")
//!     .variant(Variant::OneTime)
//!     .type_speed(Duration::from_millis(10));
//! let mut sim = TypewriterSimulator::new(&opts, false);
//! assert!(sim.run_until_complete(Duration::from_secs(1)));
//! assert_eq!(sim.texts(), ["", "D", "Do", "Don", "Done"]);
//! ```

use std::time::Duration;

use typewriter_core::machine::MAX_TRANSITIONS_PER_ADVANCE;
use typewriter_core::{EngineConfig, Phase, Typewriter, TypewriterEvent, TypewriterOptions};

/// Observable state at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub at: Duration,
    pub display_text: String,
    pub phase: Phase,
}

/// Event with the virtual time it fired at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedEvent {
    pub at: Duration,
    pub event: TypewriterEvent,
}

/// Virtual-clock runner recording frames and events.
#[derive(Debug, Clone)]
pub struct TypewriterSimulator {
    typewriter: Typewriter,
    now: Duration,
    frames: Vec<Frame>,
    events: Vec<TimedEvent>,
}

impl TypewriterSimulator {
    #[must_use]
    pub fn new(options: &TypewriterOptions, system_reduced_motion: bool) -> Self {
        Self::from_typewriter(Typewriter::from_options(options, system_reduced_motion))
    }

    #[must_use]
    pub fn from_config(config: EngineConfig) -> Self {
        Self::from_typewriter(Typewriter::new(config))
    }

    fn from_typewriter(typewriter: Typewriter) -> Self {
        let mut sim = Self {
            typewriter,
            now: Duration::ZERO,
            frames: Vec::new(),
            events: Vec::new(),
        };
        sim.record();
        sim
    }

    /// Append a frame if the observable state changed, and collect events.
    fn record(&mut self) {
        let display_text = self.typewriter.display_text();
        let phase = self.typewriter.phase();
        let changed = self
            .frames
            .last()
            .is_none_or(|f| f.display_text != display_text || f.phase != phase);
        if changed {
            self.frames.push(Frame {
                at: self.now,
                display_text: display_text.to_string(),
                phase,
            });
        }
        let at = self.now;
        self.events.extend(
            self.typewriter
                .drain_events()
                .into_iter()
                .map(|event| TimedEvent { at, event }),
        );
    }

    /// Advance the virtual clock by `span`, firing due transitions in order.
    ///
    /// Returns the number of transitions fired. A chain of zero-delay fires
    /// longer than [`MAX_TRANSITIONS_PER_ADVANCE`] stops the run early at
    /// the current instant.
    pub fn run_for(&mut self, span: Duration) -> usize {
        let end = self.now.saturating_add(span);
        let mut fired = 0;
        let mut stalled = 0;
        while let Some(next) = self.typewriter.time_to_next() {
            let at = self.now.saturating_add(next);
            if at > end {
                break;
            }
            self.typewriter.fire_pending();
            self.now = at;
            fired += 1;
            self.record();
            if next.is_zero() {
                stalled += 1;
                if stalled >= MAX_TRANSITIONS_PER_ADVANCE {
                    tracing::warn!(at = ?self.now, "simulator stopped a zero-delay chain");
                    return fired;
                }
            } else {
                stalled = 0;
            }
        }
        self.typewriter.advance(end - self.now);
        self.now = end;
        fired
    }

    /// Run until complete or until `limit` of virtual time has passed.
    ///
    /// Returns whether the run completed.
    pub fn run_until_complete(&mut self, limit: Duration) -> bool {
        let deadline = self.now.saturating_add(limit);
        while !self.typewriter.is_complete() {
            let Some(next) = self.typewriter.time_to_next() else {
                break;
            };
            if self.now.saturating_add(next) > deadline {
                self.run_for(deadline - self.now);
                break;
            }
            self.run_for(next);
        }
        self.typewriter.is_complete()
    }

    /// Reset the engine and record the resulting frame.
    pub fn reset(&mut self) {
        self.typewriter.reset();
        self.record();
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[must_use]
    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    /// Distinct display texts in order (consecutive duplicates collapsed).
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for frame in &self.frames {
            if out.last() != Some(&frame.display_text.as_str()) {
                out.push(&frame.display_text);
            }
        }
        out
    }

    /// First time `display_text` equalled `text`.
    #[must_use]
    pub fn first_time_showing(&self, text: &str) -> Option<Duration> {
        self.frames
            .iter()
            .find(|f| f.display_text == text)
            .map(|f| f.at)
    }

    #[must_use]
    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }
}
