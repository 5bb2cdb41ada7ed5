#![forbid(unsafe_code)]

//! Plain-text frame layout for the showcase.
//!
//! Produces one `String` per terminal row; the caller only positions and
//! prints them. Lines are clipped to the terminal width by display cells.

use std::time::Duration;

use typewriter_core::cursor::render_line;
use typewriter_core::{CursorSpec, TypewriterSnapshot, Variant};
use unicode_width::UnicodeWidthChar;

/// One block as the renderer sees it.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    pub title: &'a str,
    pub variant: Variant,
    pub snapshot: &'a TypewriterSnapshot,
    pub cursor: CursorSpec,
    /// Effective reduced-motion value for this block.
    pub reduced_motion: bool,
}

/// Short status tag for the title line.
#[must_use]
pub fn status(snapshot: &TypewriterSnapshot) -> &'static str {
    if snapshot.is_complete {
        "complete"
    } else {
        snapshot.phase.as_str()
    }
}

/// Clip `line` to at most `width` display cells.
#[must_use]
pub fn fit(line: &str, width: u16) -> String {
    let width = usize::from(width);
    let mut used = 0;
    let mut out = String::with_capacity(line.len().min(width * 4));
    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// Lay out the header and every block.
#[must_use]
pub fn frame(rows: &[Row<'_>], reduced_motion: bool, now: Duration, width: u16) -> Vec<String> {
    let motion = if reduced_motion { "reduced" } else { "full" };
    let mut lines = Vec::with_capacity(rows.len() * 3 + 2);
    lines.push(fit(
        &format!("Typewriter showcase | motion: {motion} | m: toggle motion  r: restart  q: quit"),
        width,
    ));
    lines.push(String::new());

    for row in rows {
        lines.push(fit(
            &format!("{} [{} / {}]", row.title, row.variant, status(row.snapshot)),
            width,
        ));
        let visible = row.cursor.is_visible(row.snapshot, row.reduced_motion, now);
        let text = render_line(row.snapshot, &row.cursor, visible);
        lines.push(fit(&format!("  {text}"), width));
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use typewriter_core::{CursorStyle, Phase};

    fn snapshot(text: &str, phase: Phase, complete: bool) -> TypewriterSnapshot {
        TypewriterSnapshot {
            display_text: text.to_string(),
            current_text_index: 0,
            is_complete: complete,
            is_typing: phase == Phase::Typing && !complete,
            is_deleting: phase == Phase::Deleting,
            phase,
        }
    }

    #[test]
    fn fit_counts_display_cells() {
        assert_eq!(fit("hello", 3), "hel");
        assert_eq!(fit("日本語", 5), "日本");
        assert_eq!(fit("abc", 0), "");
        assert_eq!(fit("ab", 10), "ab");
    }

    #[test]
    fn status_prefers_complete() {
        assert_eq!(status(&snapshot("x", Phase::Typing, true)), "complete");
        assert_eq!(status(&snapshot("x", Phase::Deleting, false)), "deleting");
    }

    #[test]
    fn frame_draws_cursor_while_typing() {
        let snap = snapshot("Hel", Phase::Typing, false);
        let rows = [Row {
            title: "Basic",
            variant: Variant::Basic,
            snapshot: &snap,
            cursor: CursorSpec::default().style(CursorStyle::Block),
            reduced_motion: false,
        }];
        let lines = frame(&rows, false, Duration::from_millis(700), 80);
        assert!(lines[0].contains("motion: full"));
        assert_eq!(lines[2], "Basic [basic / typing]");
        assert_eq!(lines[3], "  Hel█");
    }

    #[test]
    fn frame_hides_cursor_when_disabled() {
        let snap = snapshot("Done", Phase::Typing, true);
        let rows = [Row {
            title: "No cursor",
            variant: Variant::Basic,
            snapshot: &snap,
            cursor: CursorSpec::hidden(),
            reduced_motion: true,
        }];
        let lines = frame(&rows, true, Duration::ZERO, 80);
        assert!(lines[0].contains("motion: reduced"));
        assert_eq!(lines[3], "  Done");
    }
}
