#![forbid(unsafe_code)]

//! Text sequences and grapheme-aware prefixes.
//!
//! A [`TextSequence`] is the ordered, non-empty list of strings a typewriter
//! types through. A single string is a one-element sequence. The sequence is
//! immutable once built; changing the texts means building a new engine.
//!
//! "Characters" are extended grapheme clusters, so a revealed prefix never
//! splits an emoji or a base letter from its combining marks.

use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

/// Ordered, non-empty sequence of texts.
///
/// # Invariants
///
/// 1. `len() >= 1` always holds. An empty input normalizes to `[""]`.
/// 2. Contents never change after construction.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TextSequence {
    texts: Vec<String>,
}

impl TextSequence {
    /// Build a sequence from any list of strings.
    ///
    /// An empty list is a caller contract violation; it is normalized to a
    /// single empty string instead of failing.
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let texts: Vec<String> = texts.into_iter().map(Into::into).collect();
        if texts.is_empty() {
            tracing::warn!("empty text sequence normalized to a single empty text");
            return Self::single("");
        }
        Self { texts }
    }

    /// A one-element sequence.
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            texts: vec![text.into()],
        }
    }

    /// Number of texts (always at least 1).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Text at `index`, or `""` when out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> &str {
        self.texts.get(index).map_or("", String::as_str)
    }

    #[must_use]
    pub fn first(&self) -> &str {
        self.get(0)
    }

    #[must_use]
    pub fn last(&self) -> &str {
        self.get(self.texts.len() - 1)
    }

    /// Whether `index` is the final position of the sequence.
    #[inline]
    #[must_use]
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.texts.len()
    }

    /// Iterate the texts in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.texts.iter().map(String::as_str)
    }

    /// Sequence holding only the first text.
    #[must_use]
    pub fn first_only(&self) -> Self {
        Self::single(self.first())
    }

    /// Sequence holding only the last text.
    #[must_use]
    pub fn last_only(&self) -> Self {
        Self::single(self.last())
    }
}

impl fmt::Debug for TextSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.texts).finish()
    }
}

impl From<&str> for TextSequence {
    fn from(text: &str) -> Self {
        Self::single(text)
    }
}

impl From<String> for TextSequence {
    fn from(text: String) -> Self {
        Self::single(text)
    }
}

impl From<Vec<String>> for TextSequence {
    fn from(texts: Vec<String>) -> Self {
        Self::new(texts)
    }
}

impl From<Vec<&str>> for TextSequence {
    fn from(texts: Vec<&str>) -> Self {
        Self::new(texts)
    }
}

impl From<&[&str]> for TextSequence {
    fn from(texts: &[&str]) -> Self {
        Self::new(texts.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for TextSequence {
    fn from(texts: [&str; N]) -> Self {
        Self::new(texts)
    }
}

/// Number of grapheme clusters in `text`.
#[must_use]
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// The first `count` grapheme clusters of `text`.
///
/// Returns the whole text when `count` exceeds its length.
#[must_use]
pub fn grapheme_prefix(text: &str, count: usize) -> &str {
    if count == 0 {
        return "";
    }
    match text.grapheme_indices(true).nth(count) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_string_is_one_element() {
        let seq = TextSequence::from("Hello");
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.first(), "Hello");
        assert_eq!(seq.last(), "Hello");
        assert!(seq.is_last(0));
    }

    #[test]
    fn empty_list_normalizes_to_empty_text() {
        let seq = TextSequence::new(Vec::<String>::new());
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.first(), "");
    }

    #[test]
    fn first_and_last_only() {
        let seq = TextSequence::from(["a", "b", "c"]);
        assert_eq!(seq.first_only(), TextSequence::single("a"));
        assert_eq!(seq.last_only(), TextSequence::single("c"));
        assert!(!seq.is_last(1));
        assert!(seq.is_last(2));
    }

    #[test]
    fn out_of_range_get_is_empty() {
        let seq = TextSequence::from(["a"]);
        assert_eq!(seq.get(5), "");
    }

    #[test]
    fn prefix_counts_graphemes() {
        assert_eq!(grapheme_prefix("Hello", 0), "");
        assert_eq!(grapheme_prefix("Hello", 2), "He");
        assert_eq!(grapheme_prefix("Hello", 5), "Hello");
        assert_eq!(grapheme_prefix("Hello", 99), "Hello");
    }

    #[test]
    fn prefix_keeps_combining_marks_together() {
        let text = "e\u{301}a";
        assert_eq!(grapheme_count(text), 2);
        assert_eq!(grapheme_prefix(text, 1), "e\u{301}");
    }

    #[test]
    fn prefix_keeps_emoji_sequences_together() {
        let text = "👍🏽ok";
        assert_eq!(grapheme_count(text), 3);
        assert_eq!(grapheme_prefix(text, 1), "👍🏽");
    }
}
