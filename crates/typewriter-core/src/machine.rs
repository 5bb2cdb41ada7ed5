#![forbid(unsafe_code)]

//! Phase state machine for the typewriter.
//!
//! The machine is an explicit transition function: [`fire`] takes the state
//! and its config, performs exactly one scheduled transition, and returns the
//! events it produced plus the delay until the next one. [`Typewriter`] owns
//! a state, its single pending delay and an event queue, and drives [`fire`]
//! from either virtual time ([`Typewriter::advance`]) or a real-time driver
//! ([`Typewriter::fire_pending`]).
//!
//! # Phases
//!
//! ```text
//! waiting --start_delay--> typing --type_speed/char--> (full text)
//!   full, no delete, last text   -> complete
//!   full, no delete, more texts  --pause_duration--> typing (next text)
//!   full, delete                 --pause_duration--> pausing
//! pausing --delete_delay--> deleting --delete_speed/char--> (empty)
//!   empty, wrapped and !loop     -> complete
//!   otherwise                    -> typing (next text)
//! ```
//!
//! # Invariants
//!
//! 1. At most one timer is pending at any time.
//! 2. `display_text` is always the first `current_char_index` graphemes of
//!    the active text.
//! 3. [`TypewriterEvent::TextTyped`] fires once per full reveal, never while
//!    deleting.
//! 4. [`TypewriterEvent::Completed`] fires at most once per run; after it no
//!    transition changes the state.
//! 5. `reset()` leaves the machine idle until `restart()`.

use std::fmt;
use std::time::Duration;

use crate::config::{EngineConfig, TypewriterOptions};
use crate::text::{grapheme_count, grapheme_prefix};

/// Upper bound on transitions processed by one [`Typewriter::advance`] call.
///
/// Only reachable with zero-delay looping configs.
pub const MAX_TRANSITIONS_PER_ADVANCE: usize = 10_000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Public phase of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Waiting,
    Typing,
    Pausing,
    Deleting,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Typing => "typing",
            Self::Pausing => "pausing",
            Self::Deleting => "deleting",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the pending timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    /// Leave `waiting` after the start delay.
    Start,
    /// Reveal one more character.
    Reveal,
    /// Hold at full text, then pause or move to the next text.
    Hold,
    /// Leave `pausing` after the delete delay.
    BeginDelete,
    /// Erase one character.
    Erase,
}

/// Milestone emitted by the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypewriterEvent {
    /// A text finished typing (`onTextChange`).
    TextTyped { text: String, index: usize },
    /// A non-looping run reached its end (`onComplete`).
    Completed,
}

/// Result of one transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub events: Vec<TypewriterEvent>,
    /// Delay until the next transition; `None` ends the chain.
    pub next: Option<Duration>,
}

impl Transition {
    fn after(next: Duration) -> Self {
        Self {
            events: Vec::new(),
            next: Some(next),
        }
    }
}

/// Mutable engine state, owned by exactly one machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineState {
    phase: Phase,
    text_index: usize,
    char_index: usize,
    display_text: String,
    complete: bool,
    timer: Option<Timer>,
}

impl EngineState {
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn current_text_index(&self) -> usize {
        self.text_index
    }

    #[must_use]
    pub fn current_char_index(&self) -> usize {
        self.char_index
    }

    #[must_use]
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whether a timer is scheduled.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.timer.is_some()
    }

    fn set_chars(&mut self, text: &str, count: usize) {
        self.char_index = count;
        self.display_text.clear();
        self.display_text.push_str(grapheme_prefix(text, count));
    }

    fn finish(&mut self, events: &mut Vec<TypewriterEvent>) {
        self.complete = true;
        self.timer = None;
        events.push(TypewriterEvent::Completed);
        tracing::debug!(
            text_index = self.text_index,
            display_text = %self.display_text,
            "typewriter complete"
        );
    }
}

// ---------------------------------------------------------------------------
// Transition function
// ---------------------------------------------------------------------------

/// Build the initial state for `config` and the delay until its first fire.
///
/// A settled (reduced-motion) config starts finished: the final text is
/// displayed at once and `TextTyped` + `Completed` are emitted immediately.
#[must_use]
pub fn start(config: &EngineConfig) -> (EngineState, Transition) {
    let mut state = EngineState::default();

    if config.settled {
        let text = config.texts.last();
        state.phase = Phase::Typing;
        state.set_chars(text, grapheme_count(text));
        let mut events = vec![TypewriterEvent::TextTyped {
            text: text.to_string(),
            index: 0,
        }];
        state.finish(&mut events);
        return (state, Transition { events, next: None });
    }

    state.timer = Some(Timer::Start);
    (state, Transition::after(config.timing.start_delay))
}

/// Perform the pending transition of `state`.
///
/// Returns an empty transition when nothing is scheduled or the run is
/// already complete.
pub fn fire(state: &mut EngineState, config: &EngineConfig) -> Transition {
    let Some(timer) = state.timer.take() else {
        return Transition::default();
    };
    if state.complete {
        return Transition::default();
    }

    let timing = &config.timing;
    let texts = &config.texts;
    let mut events = Vec::new();

    let next = match timer {
        Timer::Start => {
            state.phase = Phase::Typing;
            state.timer = Some(Timer::Reveal);
            Some(timing.type_speed)
        }
        Timer::Reveal => {
            let text = texts.get(state.text_index);
            let len = grapheme_count(text);
            if state.char_index < len {
                state.set_chars(text, state.char_index + 1);
            }
            if state.char_index < len {
                state.timer = Some(Timer::Reveal);
                Some(timing.type_speed)
            } else {
                events.push(TypewriterEvent::TextTyped {
                    text: text.to_string(),
                    index: state.text_index,
                });
                if !config.should_delete && texts.is_last(state.text_index) {
                    state.finish(&mut events);
                    None
                } else {
                    state.timer = Some(Timer::Hold);
                    Some(timing.pause_duration)
                }
            }
        }
        Timer::Hold => {
            if config.should_delete {
                state.phase = Phase::Pausing;
                state.timer = Some(Timer::BeginDelete);
                Some(timing.delete_delay)
            } else {
                state.text_index = (state.text_index + 1) % texts.len();
                state.set_chars("", 0);
                state.phase = Phase::Typing;
                state.timer = Some(Timer::Reveal);
                Some(timing.type_speed)
            }
        }
        Timer::BeginDelete => {
            state.phase = Phase::Deleting;
            state.timer = Some(Timer::Erase);
            Some(timing.delete_speed)
        }
        Timer::Erase => {
            if state.char_index > 0 {
                let text = texts.get(state.text_index);
                state.set_chars(text, state.char_index - 1);
            }
            if state.char_index > 0 {
                state.timer = Some(Timer::Erase);
                Some(timing.delete_speed)
            } else {
                let next_index = (state.text_index + 1) % texts.len();
                if next_index == 0 && !config.looping {
                    state.finish(&mut events);
                    None
                } else {
                    state.text_index = next_index;
                    state.phase = Phase::Typing;
                    state.timer = Some(Timer::Reveal);
                    Some(timing.type_speed)
                }
            }
        }
    };

    tracing::trace!(
        phase = %state.phase,
        text_index = state.text_index,
        char_index = state.char_index,
        events = events.len(),
        "typewriter transition"
    );

    Transition { events, next }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Live output consumed by a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypewriterSnapshot {
    pub display_text: String,
    pub current_text_index: usize,
    pub is_complete: bool,
    /// Phase is typing and the run has not completed.
    pub is_typing: bool,
    pub is_deleting: bool,
    pub phase: Phase,
}

impl From<&EngineState> for TypewriterSnapshot {
    fn from(state: &EngineState) -> Self {
        Self {
            display_text: state.display_text.clone(),
            current_text_index: state.text_index,
            is_complete: state.complete,
            is_typing: state.phase == Phase::Typing && !state.complete,
            is_deleting: state.phase == Phase::Deleting,
            phase: state.phase,
        }
    }
}

// ---------------------------------------------------------------------------
// Typewriter
// ---------------------------------------------------------------------------

/// A running typewriter: state, one pending delay, and queued events.
///
/// Construction is the start signal. Time only moves through
/// [`advance`](Self::advance) (virtual clock) or
/// [`fire_pending`](Self::fire_pending) (real-time drivers).
///
/// ```
/// use std::time::Duration;
/// use typewriter_core::config::TypewriterOptions;
/// use typewriter_core::machine::Typewriter;
///
/// let opts = TypewriterOptions::new("Hey").type_speed(Duration::from_millis(10));
/// let mut tw = Typewriter::from_options(&opts, false);
/// tw.advance(Duration::from_millis(20));
/// assert_eq!(tw.display_text(), "He");
/// ```
#[derive(Debug, Clone)]
pub struct Typewriter {
    config: EngineConfig,
    state: EngineState,
    /// Time left on the pending timer.
    remaining: Option<Duration>,
    events: Vec<TypewriterEvent>,
    elapsed: Duration,
}

impl Typewriter {
    /// Start a run with a resolved config.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let (state, transition) = start(&config);
        tracing::debug!(
            texts = config.texts.len(),
            looping = config.looping,
            should_delete = config.should_delete,
            settled = config.settled,
            "typewriter started"
        );
        let mut tw = Self {
            config,
            state,
            remaining: None,
            events: Vec::new(),
            elapsed: Duration::ZERO,
        };
        tw.apply(transition);
        tw
    }

    /// Resolve `options` against the system motion preference and start.
    #[must_use]
    pub fn from_options(options: &TypewriterOptions, system_reduced_motion: bool) -> Self {
        Self::new(options.resolve(system_reduced_motion))
    }

    fn apply(&mut self, transition: Transition) {
        self.events.extend(transition.events);
        self.remaining = transition.next;
    }

    /// Advance virtual time by `dt`, firing every timer that falls due.
    ///
    /// Overshoot past a fire is carried into the next timer, so one large
    /// step and many small ones produce the same state. Returns the number
    /// of transitions fired.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let mut budget = dt;
        let mut fired = 0;
        while let Some(remaining) = self.remaining {
            if remaining > budget {
                self.remaining = Some(remaining - budget);
                budget = Duration::ZERO;
                break;
            }
            budget -= remaining;
            self.fire_now();
            fired += 1;
            if fired >= MAX_TRANSITIONS_PER_ADVANCE {
                tracing::warn!(
                    fired,
                    "typewriter advance hit transition cap; zero-delay loop?"
                );
                break;
            }
        }
        self.elapsed = self.elapsed.saturating_add(dt.saturating_sub(budget));
        fired
    }

    /// Fire the pending timer immediately, regardless of time left.
    ///
    /// Returns `false` when nothing was pending.
    pub fn fire_pending(&mut self) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        self.elapsed = self.elapsed.saturating_add(remaining);
        self.fire_now();
        true
    }

    fn fire_now(&mut self) {
        let transition = fire(&mut self.state, &self.config);
        self.apply(transition);
    }

    /// Time until the pending timer fires; `None` when idle.
    #[must_use]
    pub fn time_to_next(&self) -> Option<Duration> {
        self.remaining
    }

    /// Whether no timer is pending (complete, or reset and not restarted).
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.remaining.is_none()
    }

    /// Cancel the pending timer and return to the initial state.
    ///
    /// No events fire and queued undrained events are discarded. The machine
    /// stays idle until [`restart`](Self::restart).
    pub fn reset(&mut self) {
        self.state = EngineState::default();
        self.remaining = None;
        self.events.clear();
        self.elapsed = Duration::ZERO;
        tracing::debug!("typewriter reset");
    }

    /// Start a fresh run with the same config.
    pub fn restart(&mut self) {
        let (state, transition) = start(&self.config);
        self.state = state;
        self.events.clear();
        self.elapsed = Duration::ZERO;
        self.apply(transition);
        tracing::debug!("typewriter restarted");
    }

    /// Drain queued events. Clears the queue.
    pub fn drain_events(&mut self) -> Vec<TypewriterEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn snapshot(&self) -> TypewriterSnapshot {
        TypewriterSnapshot::from(&self.state)
    }

    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn display_text(&self) -> &str {
        &self.state.display_text
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state.complete
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.state.phase == Phase::Typing && !self.state.complete
    }

    #[must_use]
    pub fn is_deleting(&self) -> bool {
        self.state.phase == Phase::Deleting
    }

    /// Virtual time consumed by fired timers since the last (re)start.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timing;
    use crate::variant::Variant;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn timing(type_ms: u64, delete_ms: u64, pause_ms: u64, delay_ms: u64) -> Timing {
        Timing {
            type_speed: ms(type_ms),
            delete_speed: ms(delete_ms),
            pause_duration: ms(pause_ms),
            delete_delay: ms(delay_ms),
            start_delay: Duration::ZERO,
        }
    }

    fn typed(text: &str, index: usize) -> TypewriterEvent {
        TypewriterEvent::TextTyped {
            text: text.to_string(),
            index,
        }
    }

    #[test]
    fn starts_waiting_and_empty() {
        let tw = Typewriter::new(EngineConfig::new("Hi", Timing::default(), false, false));
        assert_eq!(tw.phase(), Phase::Waiting);
        assert_eq!(tw.display_text(), "");
        assert!(!tw.is_complete());
        assert_eq!(tw.time_to_next(), Some(Duration::ZERO));
    }

    #[test]
    fn start_delay_holds_waiting() {
        let mut t = timing(10, 5, 100, 50);
        t.start_delay = ms(30);
        let mut tw = Typewriter::new(EngineConfig::new("Hi", t, false, false));
        tw.advance(ms(29));
        assert_eq!(tw.phase(), Phase::Waiting);
        tw.advance(ms(1));
        assert_eq!(tw.phase(), Phase::Typing);
        assert_eq!(tw.display_text(), "");
        tw.advance(ms(10));
        assert_eq!(tw.display_text(), "H");
    }

    #[test]
    fn basic_single_completes_after_len_ticks() {
        let opts = TypewriterOptions::new("Hey").type_speed(ms(10));
        let mut tw = Typewriter::from_options(&opts, false);
        tw.advance(Duration::ZERO);
        for (i, expected) in ["H", "He"].iter().enumerate() {
            tw.advance(ms(10));
            assert_eq!(tw.display_text(), *expected, "tick {i}");
            assert!(!tw.is_complete());
        }
        tw.advance(ms(10));
        assert_eq!(tw.display_text(), "Hey");
        assert!(tw.is_complete());
        assert!(tw.is_idle());
        assert_eq!(tw.drain_events(), vec![typed("Hey", 0), TypewriterEvent::Completed]);
    }

    #[test]
    fn one_time_done_scenario() {
        let opts = TypewriterOptions::new("Done")
            .variant(Variant::OneTime)
            .type_speed(ms(50));
        let mut tw = Typewriter::from_options(&opts, false);
        let mut seen = Vec::new();
        for _ in 0..4 {
            tw.advance(ms(50));
            seen.push(tw.display_text().to_string());
            assert!(!tw.is_deleting());
        }
        assert_eq!(seen, ["D", "Do", "Don", "Done"]);
        assert!(tw.is_complete());
        let events = tw.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == TypewriterEvent::Completed)
                .count(),
            1
        );
    }

    #[test]
    fn rotation_scenario_timeline() {
        let opts = TypewriterOptions::new(["Hi", "Yo"])
            .variant(Variant::Rotation)
            .timing(timing(10, 5, 100, 50));
        let mut tw = Typewriter::from_options(&opts, false);

        let checkpoints: &[(u64, &str, Phase)] = &[
            (10, "H", Phase::Typing),
            (20, "Hi", Phase::Typing),
            (119, "Hi", Phase::Typing),
            (120, "Hi", Phase::Pausing),
            (169, "Hi", Phase::Pausing),
            (170, "Hi", Phase::Deleting),
            (175, "H", Phase::Deleting),
            (180, "", Phase::Typing),
            (190, "Y", Phase::Typing),
            (200, "Yo", Phase::Typing),
        ];
        let mut now = 0;
        for &(at, text, phase) in checkpoints {
            tw.advance(ms(at - now));
            now = at;
            assert_eq!(tw.display_text(), text, "at {at}ms");
            assert_eq!(tw.phase(), phase, "at {at}ms");
        }
        assert_eq!(tw.snapshot().current_text_index, 1);
        assert_eq!(tw.drain_events(), vec![typed("Hi", 0), typed("Yo", 1)]);

        // Second cycle: "Yo" erased, wraps to "Hi".
        tw.advance(ms(200));
        assert_eq!(tw.snapshot().current_text_index, 0);
        assert_eq!(tw.drain_events(), vec![typed("Hi", 0)]);
        assert!(!tw.is_complete());
    }

    #[test]
    fn one_time_multiple_texts_skip_deletion() {
        let opts = TypewriterOptions::new(["ab", "c"])
            .variant(Variant::OneTime)
            .timing(timing(10, 5, 100, 50));
        let mut tw = Typewriter::from_options(&opts, false);
        tw.advance(ms(20));
        assert_eq!(tw.display_text(), "ab");
        tw.advance(ms(100));
        assert_eq!(tw.display_text(), "");
        assert_eq!(tw.phase(), Phase::Typing);
        assert_eq!(tw.snapshot().current_text_index, 1);
        tw.advance(ms(10));
        assert_eq!(tw.display_text(), "c");
        assert!(tw.is_complete());
        assert_eq!(
            tw.drain_events(),
            vec![typed("ab", 0), typed("c", 1), TypewriterEvent::Completed]
        );
    }

    #[test]
    fn delete_retype_loops_single_text() {
        let opts = TypewriterOptions::new("ab")
            .variant(Variant::DeleteRetype)
            .timing(timing(10, 5, 100, 50));
        let mut tw = Typewriter::from_options(&opts, false);
        // type 20, hold 100, pause 50, erase 10, retype 20
        tw.advance(ms(180));
        assert_eq!(tw.display_text(), "");
        assert_eq!(tw.phase(), Phase::Typing);
        tw.advance(ms(20));
        assert_eq!(tw.display_text(), "ab");
        assert!(!tw.is_complete());
        assert_eq!(tw.drain_events(), vec![typed("ab", 0), typed("ab", 0)]);
    }

    #[test]
    fn custom_non_looping_list_completes_after_last_erase() {
        let opts = TypewriterOptions::new(["a", "b"])
            .variant(Variant::Custom)
            .looping(false)
            .timing(timing(10, 10, 10, 10));
        let mut tw = Typewriter::from_options(&opts, false);
        // per text: type 10, hold 10, pause 10, erase 10
        tw.advance(ms(80));
        assert!(tw.is_complete());
        assert_eq!(tw.display_text(), "");
        assert_eq!(
            tw.drain_events(),
            vec![typed("a", 0), typed("b", 1), TypewriterEvent::Completed]
        );
    }

    #[test]
    fn completion_is_idempotent() {
        let mut tw = Typewriter::new(EngineConfig::new("ok", timing(1, 1, 1, 1), false, false));
        tw.advance(ms(10));
        assert!(tw.is_complete());
        let before = tw.snapshot();
        let _ = tw.drain_events();
        tw.advance(ms(10_000));
        assert!(!tw.fire_pending());
        assert_eq!(tw.snapshot(), before);
        assert!(tw.drain_events().is_empty());
    }

    #[test]
    fn settled_config_shows_final_text_immediately() {
        let opts = TypewriterOptions::new(["one", "two", "three"]).variant(Variant::Rotation);
        let mut tw = Typewriter::from_options(&opts, true);
        let snap = tw.snapshot();
        assert_eq!(snap.display_text, "three");
        assert!(!snap.is_typing);
        assert!(!snap.is_deleting);
        assert!(snap.is_complete);
        assert!(tw.is_idle());
        tw.advance(ms(60_000));
        assert_eq!(tw.snapshot(), snap);
    }

    #[test]
    fn reset_clears_state_and_stops() {
        let opts = TypewriterOptions::new(["Hi", "Yo"])
            .variant(Variant::Rotation)
            .timing(timing(10, 5, 100, 50));
        let mut tw = Typewriter::from_options(&opts, false);
        tw.advance(ms(175));
        assert_eq!(tw.phase(), Phase::Deleting);

        tw.reset();
        let snap = tw.snapshot();
        assert_eq!(snap.phase, Phase::Waiting);
        assert_eq!(snap.current_text_index, 0);
        assert_eq!(tw.state().current_char_index(), 0);
        assert_eq!(snap.display_text, "");
        assert!(!snap.is_complete);
        assert!(tw.is_idle());
        assert_eq!(tw.pending_event_count(), 0);

        tw.advance(ms(10_000));
        assert_eq!(tw.snapshot(), snap);

        tw.restart();
        tw.advance(ms(10));
        assert_eq!(tw.display_text(), "H");
    }

    #[test]
    fn empty_text_completes_without_reveals() {
        let mut tw = Typewriter::new(EngineConfig::new("", timing(10, 5, 1, 1), false, false));
        tw.advance(ms(10));
        assert!(tw.is_complete());
        assert_eq!(tw.drain_events(), vec![typed("", 0), TypewriterEvent::Completed]);
    }

    #[test]
    fn zero_speed_types_instantly() {
        let mut tw = Typewriter::new(EngineConfig::new("instant", Timing::INSTANT, false, false));
        tw.advance(Duration::ZERO);
        assert_eq!(tw.display_text(), "instant");
        assert!(tw.is_complete());
    }

    #[test]
    fn zero_delay_loop_is_capped() {
        let mut tw = Typewriter::new(EngineConfig::new(["a", "b"], Timing::INSTANT, true, true));
        let fired = tw.advance(Duration::ZERO);
        assert_eq!(fired, MAX_TRANSITIONS_PER_ADVANCE);
        assert!(!tw.is_complete());
    }

    #[test]
    fn large_step_equals_many_small_steps() {
        let config = EngineConfig::new(["Hello", "World"], timing(7, 3, 40, 11), true, true);
        let mut a = Typewriter::new(config.clone());
        let mut b = Typewriter::new(config);
        a.advance(ms(937));
        for _ in 0..937 {
            b.advance(ms(1));
        }
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.drain_events(), b.drain_events());
        assert_eq!(a.elapsed(), b.elapsed());
    }

    #[test]
    fn fire_pending_steps_one_transition() {
        let mut tw = Typewriter::new(EngineConfig::new("ab", timing(10, 5, 1, 1), false, false));
        assert!(tw.fire_pending());
        assert_eq!(tw.phase(), Phase::Typing);
        assert!(tw.fire_pending());
        assert_eq!(tw.display_text(), "a");
        assert_eq!(tw.elapsed(), ms(10));
    }

    #[test]
    fn text_typed_never_fires_while_deleting() {
        let opts = TypewriterOptions::new(["abc", "de"])
            .variant(Variant::Infinite)
            .timing(timing(3, 2, 5, 5));
        let mut tw = Typewriter::from_options(&opts, false);
        for _ in 0..500 {
            tw.advance(ms(1));
            for event in tw.drain_events() {
                assert!(!tw.is_deleting(), "event {event:?} during deletion");
                if let TypewriterEvent::TextTyped { text, .. } = event {
                    assert_eq!(tw.display_text(), text);
                }
            }
        }
    }
}
