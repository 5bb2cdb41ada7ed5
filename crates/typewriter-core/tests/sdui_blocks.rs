#![forbid(unsafe_code)]

//! SDUI blocks driven end to end through the engine.
//!
//! Run: `cargo test -p typewriter-core --features sdui --test sdui_blocks`

use std::time::Duration;

use typewriter_core::sdui::{SpecError, TypewriterSpec, parse_page};
use typewriter_core::{CursorStyle, Typewriter, TypewriterEvent, Variant};

const PAGE: &str = r#"[
    {"type": "TypewriterText", "variant": "one-time", "texts": "Done", "typeSpeed": 10},
    {"type": "TypewriterText", "variant": "rotation", "texts": ["Hi", "Yo"],
     "typeSpeed": 10, "deleteSpeed": 5, "pauseDuration": 100, "deleteDelay": 50,
     "cursorStyle": "block"},
    {"type": "TypewriterText", "variant": "rotation", "reduceMotion": true,
     "texts": ["Smooth", "No animation when preferred"]}
]"#;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn page_parses_in_order() {
    let specs = parse_page(PAGE).unwrap();
    let variants: Vec<Variant> = specs.iter().map(TypewriterSpec::variant).collect();
    assert_eq!(
        variants,
        vec![Variant::OneTime, Variant::Rotation, Variant::Rotation]
    );
    assert_eq!(specs[1].cursor().style, CursorStyle::Block);
}

#[test]
fn one_time_block_types_once_and_completes() {
    let specs = parse_page(PAGE).unwrap();
    let mut tw = Typewriter::from_options(&specs[0].options(), false);
    let mut texts = Vec::new();
    for _ in 0..4 {
        tw.advance(ms(10));
        texts.push(tw.display_text().to_string());
    }
    assert_eq!(texts, ["D", "Do", "Don", "Done"]);

    tw.advance(ms(5_000));
    assert_eq!(tw.display_text(), "Done");
    let events = tw.drain_events();
    let completes = events
        .iter()
        .filter(|e| matches!(e, TypewriterEvent::Completed))
        .count();
    assert_eq!(completes, 1);
}

#[test]
fn rotation_block_follows_its_timings() {
    let specs = parse_page(PAGE).unwrap();
    let mut tw = Typewriter::from_options(&specs[1].options(), false);
    tw.advance(ms(20));
    assert_eq!(tw.display_text(), "Hi");
    tw.advance(ms(160));
    assert_eq!(tw.display_text(), "");
    tw.advance(ms(20));
    assert_eq!(tw.display_text(), "Yo");
    assert!(!tw.is_complete());
}

#[test]
fn reduced_motion_block_shows_final_text_at_once() {
    let specs = parse_page(PAGE).unwrap();
    let tw = Typewriter::from_options(&specs[2].options(), false);
    assert_eq!(tw.display_text(), "No animation when preferred");
    assert!(tw.is_complete());
    assert!(!tw.is_typing());
    assert!(!tw.is_deleting());
}

#[test]
fn foreign_block_in_page_is_rejected() {
    let page = r#"[{"type": "TypewriterText", "texts": "ok"}, {"type": "Image", "texts": "x"}]"#;
    match parse_page(page) {
        Err(SpecError::UnexpectedType(kind)) => assert_eq!(kind, "Image"),
        other => panic!("expected UnexpectedType, got {other:?}"),
    }
}
