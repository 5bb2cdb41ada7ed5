#![forbid(unsafe_code)]

//! Declarative SDUI specification for the typewriter block.
//!
//! A server sends JSON such as:
//!
//! ```json
//! {
//!   "type": "TypewriterText",
//!   "variant": "rotation",
//!   "texts": ["Build amazing websites", "Ship products faster"],
//!   "typeSpeed": 80,
//!   "cursorStyle": "line"
//! }
//! ```
//!
//! [`TypewriterSpec`] deserializes it and lowers it into
//! [`TypewriterOptions`] and a [`CursorSpec`]. Styling keys (`textSize`,
//! `textColor`, `fontWeight`, `alignment`, ...) are accepted and ignored.
//!
//! Only built with the `sdui` feature, so its tests need it too:
//! `cargo test -p typewriter-core --features sdui`. A workspace-wide
//! `cargo test` enables it through `typewriter-demo`.

use std::fmt;

use serde::Deserialize;

use crate::config::{TypewriterOptions, duration_from_ms};
use crate::cursor::{CursorSpec, CursorStyle};
use crate::text::TextSequence;
use crate::variant::Variant;

/// Block type tag expected in the `type` field.
pub const BLOCK_TYPE: &str = "TypewriterText";

/// `texts` may be a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SpecTexts {
    One(String),
    Many(Vec<String>),
}

impl From<&SpecTexts> for TextSequence {
    fn from(texts: &SpecTexts) -> Self {
        match texts {
            SpecTexts::One(text) => TextSequence::single(text.clone()),
            SpecTexts::Many(list) => TextSequence::new(list.iter().cloned()),
        }
    }
}

/// JSON form of one typewriter block. Durations are milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypewriterSpec {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub texts: SpecTexts,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub type_speed: Option<f64>,
    #[serde(default)]
    pub delete_speed: Option<f64>,
    #[serde(default)]
    pub pause_duration: Option<f64>,
    #[serde(default)]
    pub delete_delay: Option<f64>,
    #[serde(default)]
    pub start_delay: Option<f64>,
    #[serde(rename = "loop", default)]
    pub looping: Option<bool>,
    #[serde(default)]
    pub reduce_motion: Option<bool>,
    #[serde(default)]
    pub show_cursor: Option<bool>,
    #[serde(default)]
    pub cursor_blink: Option<bool>,
    #[serde(default)]
    pub cursor_style: Option<String>,
    #[serde(default)]
    pub cursor_char: Option<String>,
}

/// Errors from reading an SDUI spec.
#[derive(Debug)]
pub enum SpecError {
    /// Malformed JSON or a missing/mistyped field.
    Json(serde_json::Error),
    /// The `type` tag names a different block.
    UnexpectedType(String),
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "invalid typewriter spec: {e}"),
            Self::UnexpectedType(kind) => {
                write!(f, "expected block type {BLOCK_TYPE:?}, found {kind:?}")
            }
        }
    }
}

impl std::error::Error for SpecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::UnexpectedType(_) => None,
        }
    }
}

impl From<serde_json::Error> for SpecError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl TypewriterSpec {
    /// Parse one block from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        let spec: Self = serde_json::from_str(json)?;
        spec.check_type()?;
        Ok(spec)
    }

    fn check_type(&self) -> Result<(), SpecError> {
        match &self.kind {
            Some(kind) if kind != BLOCK_TYPE => Err(SpecError::UnexpectedType(kind.clone())),
            _ => Ok(()),
        }
    }

    /// Resolved variant; absent means `basic`.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
            .as_deref()
            .map_or(Variant::default(), Variant::parse)
    }

    /// Lower into engine options. Missing values take the documented
    /// defaults; negative or non-finite durations clamp to zero.
    #[must_use]
    pub fn options(&self) -> TypewriterOptions {
        let mut opts = TypewriterOptions::new(TextSequence::from(&self.texts))
            .variant(self.variant())
            .looping(self.looping.unwrap_or(true))
            .reduce_motion(self.reduce_motion.unwrap_or(false));
        let t = &mut opts.timing;
        if let Some(ms) = self.type_speed {
            t.type_speed = duration_from_ms(ms);
        }
        if let Some(ms) = self.delete_speed {
            t.delete_speed = duration_from_ms(ms);
        }
        if let Some(ms) = self.pause_duration {
            t.pause_duration = duration_from_ms(ms);
        }
        if let Some(ms) = self.delete_delay {
            t.delete_delay = duration_from_ms(ms);
        }
        if let Some(ms) = self.start_delay {
            t.start_delay = duration_from_ms(ms);
        }
        opts
    }

    /// Cursor presentation settings.
    #[must_use]
    pub fn cursor(&self) -> CursorSpec {
        let custom_char = self.cursor_char.as_deref().and_then(|s| s.chars().next());
        let style = match self.cursor_style.as_deref() {
            None => CursorStyle::default(),
            Some(name) => CursorStyle::parse(name, custom_char).unwrap_or_else(|| {
                tracing::warn!(cursor_style = name, "unknown cursor style, using line");
                CursorStyle::default()
            }),
        };
        CursorSpec {
            show: self.show_cursor.unwrap_or(true),
            blink: self.cursor_blink.unwrap_or(true),
            style,
        }
    }
}

/// Parse a page: either a single block object or an array of blocks.
pub fn parse_page(json: &str) -> Result<Vec<TypewriterSpec>, SpecError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let specs: Vec<TypewriterSpec> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    for spec in &specs {
        spec.check_type()?;
    }
    Ok(specs)
}
