#![forbid(unsafe_code)]

//! Engine configuration: timing, caller options, and environment overrides.
//!
//! [`TypewriterOptions`] is what a caller (or an SDUI spec) supplies.
//! [`TypewriterOptions::resolve`] runs the variant policy and produces the
//! [`EngineConfig`] a [`Typewriter`](crate::machine::Typewriter) runs with.
//!
//! # Environment Variables
//!
//! [`EnvOverrides::from_env`] reads:
//!
//! - `TYPEWRITER_TYPE_SPEED_MS` (ms per character)
//! - `TYPEWRITER_DELETE_SPEED_MS` (ms per character)
//! - `TYPEWRITER_PAUSE_MS`
//! - `TYPEWRITER_DELETE_DELAY_MS`
//! - `TYPEWRITER_START_DELAY_MS`
//! - `TYPEWRITER_SPEED_SCALE` (float multiplier applied to every duration)
//! - `TYPEWRITER_REDUCED_MOTION` (bool)
//!
//! Malformed values are collected as [`ConfigError`] diagnostics and
//! otherwise ignored.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::text::TextSequence;
use crate::variant::{Variant, VariantPolicy};

const ENV_TYPE_SPEED: &str = "TYPEWRITER_TYPE_SPEED_MS";
const ENV_DELETE_SPEED: &str = "TYPEWRITER_DELETE_SPEED_MS";
const ENV_PAUSE: &str = "TYPEWRITER_PAUSE_MS";
const ENV_DELETE_DELAY: &str = "TYPEWRITER_DELETE_DELAY_MS";
const ENV_START_DELAY: &str = "TYPEWRITER_START_DELAY_MS";
const ENV_SPEED_SCALE: &str = "TYPEWRITER_SPEED_SCALE";
const ENV_REDUCED_MOTION: &str = "TYPEWRITER_REDUCED_MOTION";

/// Convert a millisecond value into a [`Duration`], clamping anomalies.
///
/// Negative, NaN and infinite inputs become [`Duration::ZERO`].
#[must_use]
pub fn duration_from_ms(ms: f64) -> Duration {
    if !ms.is_finite() || ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_nanos((ms * 1_000_000.0).round() as u64)
}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Per-run durations. All values are non-negative by construction.
///
/// A zero `type_speed`/`delete_speed` means "instant".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Delay before each revealed character.
    pub type_speed: Duration,
    /// Delay before each erased character.
    pub delete_speed: Duration,
    /// Hold at full text before moving on.
    pub pause_duration: Duration,
    /// Extra hold in the pausing phase before erasing starts.
    pub delete_delay: Duration,
    /// One-time delay before the very first character.
    pub start_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            type_speed: Duration::from_millis(50),
            delete_speed: Duration::from_millis(30),
            pause_duration: Duration::from_millis(1000),
            delete_delay: Duration::from_millis(1000),
            start_delay: Duration::ZERO,
        }
    }
}

impl Timing {
    /// Every duration zero. Used for the reduced-motion short-circuit.
    pub const INSTANT: Self = Self {
        type_speed: Duration::ZERO,
        delete_speed: Duration::ZERO,
        pause_duration: Duration::ZERO,
        delete_delay: Duration::ZERO,
        start_delay: Duration::ZERO,
    };

    /// Build timing from raw millisecond values, clamping each one.
    #[must_use]
    pub fn from_millis(
        type_speed: f64,
        delete_speed: f64,
        pause_duration: f64,
        delete_delay: f64,
        start_delay: f64,
    ) -> Self {
        Self {
            type_speed: duration_from_ms(type_speed),
            delete_speed: duration_from_ms(delete_speed),
            pause_duration: duration_from_ms(pause_duration),
            delete_delay: duration_from_ms(delete_delay),
            start_delay: duration_from_ms(start_delay),
        }
    }

    /// Multiply every duration by `factor` (clamped to be non-negative).
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        let factor = if factor.is_finite() && factor > 0.0 {
            factor
        } else {
            0.0
        };
        let scale =
            |d: Duration| Duration::from_nanos((d.as_nanos() as f64 * factor).round() as u64);
        Self {
            type_speed: scale(self.type_speed),
            delete_speed: scale(self.delete_speed),
            pause_duration: scale(self.pause_duration),
            delete_delay: scale(self.delete_delay),
            start_delay: scale(self.start_delay),
        }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Caller-facing configuration for one typewriter.
///
/// ```
/// use std::time::Duration;
/// use typewriter_core::config::TypewriterOptions;
/// use typewriter_core::variant::Variant;
///
/// let opts = TypewriterOptions::new(["Build", "Ship"])
///     .variant(Variant::Rotation)
///     .type_speed(Duration::from_millis(80));
/// let config = opts.resolve(false);
/// assert!(config.looping);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TypewriterOptions {
    pub texts: TextSequence,
    pub variant: Variant,
    pub timing: Timing,
    /// Raw loop request; only the custom variant honours it.
    pub looping: bool,
    /// Explicit per-instance reduced-motion override.
    pub reduce_motion: bool,
}

impl TypewriterOptions {
    /// Options with default timing, `basic` variant and `loop = true`.
    pub fn new(texts: impl Into<TextSequence>) -> Self {
        Self {
            texts: texts.into(),
            variant: Variant::default(),
            timing: Timing::default(),
            looping: true,
            reduce_motion: false,
        }
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub fn type_speed(mut self, d: Duration) -> Self {
        self.timing.type_speed = d;
        self
    }

    #[must_use]
    pub fn delete_speed(mut self, d: Duration) -> Self {
        self.timing.delete_speed = d;
        self
    }

    #[must_use]
    pub fn pause_duration(mut self, d: Duration) -> Self {
        self.timing.pause_duration = d;
        self
    }

    #[must_use]
    pub fn delete_delay(mut self, d: Duration) -> Self {
        self.timing.delete_delay = d;
        self
    }

    #[must_use]
    pub fn start_delay(mut self, d: Duration) -> Self {
        self.timing.start_delay = d;
        self
    }

    #[must_use]
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    #[must_use]
    pub fn reduce_motion(mut self, reduce: bool) -> Self {
        self.reduce_motion = reduce;
        self
    }

    /// Run the variant policy and produce the engine configuration.
    ///
    /// `system_reduced_motion` is the injected platform preference; it is
    /// OR-ed with the explicit override.
    #[must_use]
    pub fn resolve(&self, system_reduced_motion: bool) -> EngineConfig {
        let reduce = self.reduce_motion || system_reduced_motion;
        let policy = VariantPolicy::resolve(self.variant, &self.texts, self.looping, reduce);
        let timing = if policy.settled {
            Timing::INSTANT
        } else {
            self.timing
        };
        tracing::debug!(
            variant = %self.variant,
            texts = policy.texts.len(),
            looping = policy.looping,
            should_delete = policy.should_delete,
            settled = policy.settled,
            "typewriter options resolved"
        );
        EngineConfig {
            texts: policy.texts,
            timing,
            looping: policy.looping,
            should_delete: policy.should_delete,
            settled: policy.settled,
        }
    }
}

/// Resolved parameters for one engine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub texts: TextSequence,
    pub timing: Timing,
    pub looping: bool,
    pub should_delete: bool,
    /// Show the final text immediately; no animation frames.
    pub settled: bool,
}

impl EngineConfig {
    /// Direct construction, bypassing the variant policy.
    pub fn new(
        texts: impl Into<TextSequence>,
        timing: Timing,
        looping: bool,
        should_delete: bool,
    ) -> Self {
        Self {
            texts: texts.into(),
            timing,
            looping,
            should_delete,
            settled: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Environment overrides
// ---------------------------------------------------------------------------

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Overrides read from the environment. `None` leaves a value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub type_speed: Option<Duration>,
    pub delete_speed: Option<Duration>,
    pub pause_duration: Option<Duration>,
    pub delete_delay: Option<Duration>,
    pub start_delay: Option<Duration>,
    pub speed_scale: Option<f64>,
    pub reduce_motion: Option<bool>,
}

/// Overrides plus parse diagnostics.
#[derive(Debug, Clone, Default)]
pub struct EnvParse {
    pub overrides: EnvOverrides,
    pub errors: Vec<ConfigError>,
}

impl EnvOverrides {
    /// Parse overrides from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with_diagnostics().overrides
    }

    /// Parse overrides and return diagnostics for malformed values.
    #[must_use]
    pub fn from_env_with_diagnostics() -> EnvParse {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Parse overrides through an injectable getter.
    pub fn from_env_with<F>(mut get: F) -> EnvParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut overrides = EnvOverrides::default();
        let mut errors = Vec::new();

        let mut read_ms = |key: &str, field: &'static str, errors: &mut Vec<ConfigError>| {
            let value = get(key)?;
            match parse_ms(&value) {
                Some(ms) => Some(duration_from_ms(ms)),
                None => {
                    errors.push(ConfigError::new(
                        field,
                        value,
                        "expected non-negative milliseconds",
                    ));
                    None
                }
            }
        };

        overrides.type_speed = read_ms(ENV_TYPE_SPEED, "type_speed", &mut errors);
        overrides.delete_speed = read_ms(ENV_DELETE_SPEED, "delete_speed", &mut errors);
        overrides.pause_duration = read_ms(ENV_PAUSE, "pause_duration", &mut errors);
        overrides.delete_delay = read_ms(ENV_DELETE_DELAY, "delete_delay", &mut errors);
        overrides.start_delay = read_ms(ENV_START_DELAY, "start_delay", &mut errors);

        if let Some(value) = get(ENV_SPEED_SCALE) {
            match parse_ms(&value) {
                Some(scale) => overrides.speed_scale = Some(scale),
                None => errors.push(ConfigError::new(
                    "speed_scale",
                    value,
                    "expected non-negative number",
                )),
            }
        }

        if let Some(value) = get(ENV_REDUCED_MOTION) {
            match parse_bool(&value) {
                Some(parsed) => overrides.reduce_motion = Some(parsed),
                None => errors.push(ConfigError::new(
                    "reduce_motion",
                    value,
                    "expected bool (1/0/true/false)",
                )),
            }
        }

        for error in &errors {
            tracing::warn!(%error, "ignoring malformed typewriter environment override");
        }

        EnvParse { overrides, errors }
    }

    /// Apply the overrides on top of caller options.
    #[must_use]
    pub fn apply(&self, mut options: TypewriterOptions) -> TypewriterOptions {
        let t = &mut options.timing;
        if let Some(d) = self.type_speed {
            t.type_speed = d;
        }
        if let Some(d) = self.delete_speed {
            t.delete_speed = d;
        }
        if let Some(d) = self.pause_duration {
            t.pause_duration = d;
        }
        if let Some(d) = self.delete_delay {
            t.delete_delay = d;
        }
        if let Some(d) = self.start_delay {
            t.start_delay = d;
        }
        if let Some(scale) = self.speed_scale {
            options.timing = options.timing.scaled(scale);
        }
        if let Some(reduce) = self.reduce_motion {
            options.reduce_motion = options.reduce_motion || reduce;
        }
        options
    }
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[inline]
fn parse_ms(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_timing_matches_documented_values() {
        let t = Timing::default();
        assert_eq!(t.type_speed, ms(50));
        assert_eq!(t.delete_speed, ms(30));
        assert_eq!(t.pause_duration, ms(1000));
        assert_eq!(t.delete_delay, ms(1000));
        assert_eq!(t.start_delay, Duration::ZERO);
    }

    #[test]
    fn negative_and_nan_clamp_to_zero() {
        assert_eq!(duration_from_ms(-5.0), Duration::ZERO);
        assert_eq!(duration_from_ms(f64::NAN), Duration::ZERO);
        assert_eq!(duration_from_ms(f64::INFINITY), Duration::ZERO);
        assert_eq!(duration_from_ms(12.0), ms(12));

        let t = Timing::from_millis(-1.0, f64::NAN, 100.0, -0.5, 7.0);
        assert_eq!(t.type_speed, Duration::ZERO);
        assert_eq!(t.delete_speed, Duration::ZERO);
        assert_eq!(t.pause_duration, ms(100));
        assert_eq!(t.delete_delay, Duration::ZERO);
        assert_eq!(t.start_delay, ms(7));
    }

    #[test]
    fn scaled_multiplies_every_duration() {
        let t = Timing::default().scaled(2.0);
        assert_eq!(t.type_speed, ms(100));
        assert_eq!(t.pause_duration, ms(2000));
        assert_eq!(Timing::default().scaled(-3.0), Timing::INSTANT);
    }

    #[test]
    fn options_defaults() {
        let opts = TypewriterOptions::new("Hi");
        assert_eq!(opts.variant, Variant::Basic);
        assert!(opts.looping);
        assert!(!opts.reduce_motion);
        assert_eq!(opts.timing, Timing::default());
    }

    #[test]
    fn resolve_keeps_timing_without_reduced_motion() {
        let opts = TypewriterOptions::new(["a", "b"])
            .variant(Variant::Rotation)
            .type_speed(ms(10));
        let config = opts.resolve(false);
        assert_eq!(config.timing.type_speed, ms(10));
        assert!(!config.settled);
        assert_eq!(config.texts.len(), 2);
    }

    #[test]
    fn resolve_system_preference_forces_instant_timing() {
        let opts = TypewriterOptions::new(["a", "b"]).variant(Variant::Rotation);
        let config = opts.resolve(true);
        assert!(config.settled);
        assert_eq!(config.timing, Timing::INSTANT);
        assert_eq!(config.texts, TextSequence::single("b"));
    }

    #[test]
    fn explicit_override_also_settles() {
        let config = TypewriterOptions::new("x").reduce_motion(true).resolve(false);
        assert!(config.settled);
    }

    #[test]
    fn env_overrides_parse_and_apply() {
        let parse = EnvOverrides::from_env_with(env_of(&[
            ("TYPEWRITER_TYPE_SPEED_MS", "20"),
            ("TYPEWRITER_PAUSE_MS", "250"),
            ("TYPEWRITER_REDUCED_MOTION", "yes"),
        ]));
        assert!(parse.errors.is_empty());
        let opts = parse.overrides.apply(TypewriterOptions::new("x"));
        assert_eq!(opts.timing.type_speed, ms(20));
        assert_eq!(opts.timing.pause_duration, ms(250));
        assert_eq!(opts.timing.delete_speed, ms(30));
        assert!(opts.reduce_motion);
    }

    #[test]
    fn env_scale_applies_after_absolute_values() {
        let parse = EnvOverrides::from_env_with(env_of(&[
            ("TYPEWRITER_TYPE_SPEED_MS", "20"),
            ("TYPEWRITER_SPEED_SCALE", "0.5"),
        ]));
        let opts = parse.overrides.apply(TypewriterOptions::new("x"));
        assert_eq!(opts.timing.type_speed, ms(10));
        assert_eq!(opts.timing.pause_duration, ms(500));
    }

    #[test]
    fn env_false_does_not_clear_explicit_override() {
        let parse = EnvOverrides::from_env_with(env_of(&[("TYPEWRITER_REDUCED_MOTION", "0")]));
        let opts = parse
            .overrides
            .apply(TypewriterOptions::new("x").reduce_motion(true));
        assert!(opts.reduce_motion);
    }

    #[test]
    fn env_malformed_values_are_reported() {
        let parse = EnvOverrides::from_env_with(env_of(&[
            ("TYPEWRITER_TYPE_SPEED_MS", "fast"),
            ("TYPEWRITER_DELETE_DELAY_MS", "-4"),
            ("TYPEWRITER_REDUCED_MOTION", "maybe"),
        ]));
        assert_eq!(parse.errors.len(), 3);
        assert_eq!(parse.overrides, EnvOverrides::default());
        let fields: Vec<_> = parse.errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"type_speed"));
        assert!(fields.contains(&"delete_delay"));
        assert!(fields.contains(&"reduce_motion"));
        assert_eq!(
            parse.errors[0].to_string(),
            "type_speed=fast (expected non-negative milliseconds)"
        );
    }

    #[test]
    fn parse_bool_spellings() {
        assert_eq!(parse_bool("On"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("nah"), None);
    }
}
