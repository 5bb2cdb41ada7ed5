#![forbid(unsafe_code)]

//! Cursor presentation contract.
//!
//! The engine does not draw a cursor; it exposes `is_typing`, `is_deleting`
//! and `display_text`. This module turns those flags plus a [`CursorSpec`]
//! into "is the glyph visible right now", so every presentation layer makes
//! the same decision.
//!
//! | condition | visible |
//! |---|---|
//! | `show == false` | never |
//! | reduced motion | only when neither typing nor deleting; never blinks |
//! | typing or deleting | always (solid) |
//! | idle, `blink` | on for the first half of each [`BLINK_PERIOD`] |
//! | idle, no blink | always |

use std::fmt;
use std::time::Duration;

use crate::machine::TypewriterSnapshot;

/// One full on/off blink cycle.
pub const BLINK_PERIOD: Duration = Duration::from_secs(1);

/// Cursor glyph style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    /// Vertical bar (|).
    #[default]
    Line,
    /// Block (█).
    Block,
    /// Underscore (_).
    Underscore,
    /// Caller-supplied glyph.
    Custom(char),
}

impl CursorStyle {
    /// Glyph drawn for this style.
    #[must_use]
    pub fn char(&self) -> char {
        match self {
            Self::Line => '|',
            Self::Block => '█',
            Self::Underscore => '_',
            Self::Custom(ch) => *ch,
        }
    }

    /// Parse a style name. `custom` takes its glyph from `custom_char`
    /// (falling back to the line glyph).
    #[must_use]
    pub fn parse(value: &str, custom_char: Option<char>) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "line" | "bar" => Some(Self::Line),
            "block" => Some(Self::Block),
            "underscore" | "underline" => Some(Self::Underscore),
            "custom" => Some(Self::Custom(custom_char.unwrap_or('|'))),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Block => "block",
            Self::Underscore => "underscore",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for CursorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cursor configuration for one typewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorSpec {
    pub show: bool,
    pub blink: bool,
    pub style: CursorStyle,
}

impl Default for CursorSpec {
    fn default() -> Self {
        Self {
            show: true,
            blink: true,
            style: CursorStyle::default(),
        }
    }
}

impl CursorSpec {
    /// A spec that never draws a cursor.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            show: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn style(mut self, style: CursorStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn blink(mut self, blink: bool) -> Self {
        self.blink = blink;
        self
    }

    /// Whether the glyph is drawn for `snapshot` at time `now`.
    ///
    /// `now` is any monotonic clock reading; only its phase within
    /// [`BLINK_PERIOD`] matters.
    #[must_use]
    pub fn is_visible(
        &self,
        snapshot: &TypewriterSnapshot,
        reduced_motion: bool,
        now: Duration,
    ) -> bool {
        if !self.show {
            return false;
        }
        let active = snapshot.is_typing || snapshot.is_deleting;
        if reduced_motion {
            return !active;
        }
        if active || !self.blink {
            return true;
        }
        blink_phase_on(now)
    }

    /// Whether the cursor animates at all under the given preference.
    #[must_use]
    pub fn blinks(&self, reduced_motion: bool) -> bool {
        self.show && self.blink && !reduced_motion
    }
}

/// On for the first half of each blink period.
#[must_use]
pub fn blink_phase_on(now: Duration) -> bool {
    let period = BLINK_PERIOD.as_nanos();
    (now.as_nanos() % period) < period / 2
}

/// Join the revealed text and, when visible, the cursor glyph.
#[must_use]
pub fn render_line(snapshot: &TypewriterSnapshot, cursor: &CursorSpec, visible: bool) -> String {
    let mut out = String::with_capacity(snapshot.display_text.len() + 4);
    out.push_str(&snapshot.display_text);
    if visible && cursor.show {
        out.push(cursor.style.char());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Phase;

    fn snap(typing: bool, deleting: bool) -> TypewriterSnapshot {
        TypewriterSnapshot {
            display_text: "Hi".into(),
            current_text_index: 0,
            is_complete: false,
            is_typing: typing,
            is_deleting: deleting,
            phase: if deleting {
                Phase::Deleting
            } else {
                Phase::Typing
            },
        }
    }

    const ON: Duration = Duration::from_millis(100);
    const OFF: Duration = Duration::from_millis(700);

    #[test]
    fn style_glyphs() {
        assert_eq!(CursorStyle::Line.char(), '|');
        assert_eq!(CursorStyle::Block.char(), '█');
        assert_eq!(CursorStyle::Underscore.char(), '_');
        assert_eq!(CursorStyle::Custom('▌').char(), '▌');
    }

    #[test]
    fn style_parse() {
        assert_eq!(CursorStyle::parse("block", None), Some(CursorStyle::Block));
        assert_eq!(
            CursorStyle::parse("custom", Some('█')),
            Some(CursorStyle::Custom('█'))
        );
        assert_eq!(
            CursorStyle::parse("custom", None),
            Some(CursorStyle::Custom('|'))
        );
        assert_eq!(CursorStyle::parse("wavy", None), None);
    }

    #[test]
    fn hidden_cursor_never_visible() {
        let c = CursorSpec::hidden();
        assert!(!c.is_visible(&snap(true, false), false, ON));
        assert!(!c.is_visible(&snap(false, false), true, ON));
        assert_eq!(render_line(&snap(false, false), &c, true), "Hi");
    }

    #[test]
    fn solid_while_animating() {
        let c = CursorSpec::default();
        assert!(c.is_visible(&snap(true, false), false, OFF));
        assert!(c.is_visible(&snap(false, true), false, OFF));
    }

    #[test]
    fn blinks_when_idle() {
        let c = CursorSpec::default();
        assert!(c.is_visible(&snap(false, false), false, ON));
        assert!(!c.is_visible(&snap(false, false), false, OFF));
        let steady = c.blink(false);
        assert!(steady.is_visible(&snap(false, false), false, OFF));
    }

    #[test]
    fn reduced_motion_static_and_only_when_idle() {
        let c = CursorSpec::default();
        assert!(!c.is_visible(&snap(true, false), true, ON));
        assert!(!c.is_visible(&snap(false, true), true, ON));
        assert!(c.is_visible(&snap(false, false), true, ON));
        assert!(c.is_visible(&snap(false, false), true, OFF));
        assert!(!c.blinks(true));
        assert!(c.blinks(false));
    }

    #[test]
    fn render_appends_glyph() {
        let c = CursorSpec::default().style(CursorStyle::Block);
        assert_eq!(render_line(&snap(true, false), &c, true), "Hi█");
        assert_eq!(render_line(&snap(true, false), &c, false), "Hi");
    }
}
