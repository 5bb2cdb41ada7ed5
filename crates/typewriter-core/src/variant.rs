#![forbid(unsafe_code)]

//! Variant policy: maps a named variant onto concrete engine behaviour.
//!
//! | variant | texts | loop | delete |
//! |---|---|---|---|
//! | basic | first only | false | false |
//! | delete-retype | first only | true | true |
//! | rotation / infinite | all | true | true |
//! | one-time | all | false | false |
//! | custom (anything else) | all | caller's `loop` | `len > 1` |
//!
//! Reduced motion overrides the whole table: the final text of the caller's
//! sequence is shown at once, with no looping, no deletion and zero timing.

use std::fmt;

use crate::text::TextSequence;

/// Named behaviour preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Type the first text once.
    #[default]
    Basic,
    /// Type, erase and retype the first text forever.
    DeleteRetype,
    /// Cycle through every text forever.
    Rotation,
    /// Same behaviour as [`Variant::Rotation`].
    Infinite,
    /// Type every text once, in order, without erasing.
    OneTime,
    /// No preset: the caller's `loop` applies and deletion is on for lists.
    Custom,
}

impl Variant {
    /// Parse a variant name. Never fails: unknown names map to [`Variant::Custom`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Self::Basic,
            "delete-retype" | "delete_retype" | "deleteretype" => Self::DeleteRetype,
            "rotation" => Self::Rotation,
            "infinite" => Self::Infinite,
            "one-time" | "one_time" | "onetime" => Self::OneTime,
            _ => Self::Custom,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::DeleteRetype => "delete-retype",
            Self::Rotation => "rotation",
            Self::Infinite => "infinite",
            Self::OneTime => "one-time",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete behaviour derived from a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantPolicy {
    /// Texts the engine will actually type.
    pub texts: TextSequence,
    /// Restart after the last text is erased.
    pub looping: bool,
    /// Erase between texts.
    pub should_delete: bool,
    /// Reduced motion: show the final text immediately, no frames.
    pub settled: bool,
}

impl VariantPolicy {
    /// Resolve `variant` against the caller's texts and `loop` flag.
    ///
    /// `reduce_motion` must already combine the explicit override with the
    /// system preference.
    #[must_use]
    pub fn resolve(
        variant: Variant,
        texts: &TextSequence,
        loop_requested: bool,
        reduce_motion: bool,
    ) -> Self {
        if reduce_motion {
            return Self {
                texts: texts.last_only(),
                looping: false,
                should_delete: false,
                settled: true,
            };
        }

        let (texts, looping, should_delete) = match variant {
            Variant::Basic => (texts.first_only(), false, false),
            Variant::DeleteRetype => (texts.first_only(), true, true),
            Variant::Rotation | Variant::Infinite => (texts.clone(), true, true),
            Variant::OneTime => (texts.clone(), false, false),
            Variant::Custom => (texts.clone(), loop_requested, texts.len() > 1),
        };

        Self {
            texts,
            looping,
            should_delete,
            settled: false,
        }
    }
}
