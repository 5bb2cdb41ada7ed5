#![forbid(unsafe_code)]

//! Showcase application: a stage of typewriters plus the frame loop.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use typewriter_core::config::EnvOverrides;
use typewriter_core::{CursorSpec, MotionPreference, TypewriterSnapshot, Variant};
use typewriter_runtime::{Hooks, InstanceId, Stage};

use crate::render::{self, Row};
use crate::session::TerminalSession;
use crate::showcase::Entry;

/// Redraw interval; also the input poll timeout.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// What the loop should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug)]
struct Block {
    id: InstanceId,
    title: String,
    variant: Variant,
    cursor: CursorSpec,
    explicit_reduce: bool,
}

/// Running showcase.
#[derive(Debug)]
pub struct App {
    stage: Stage,
    blocks: Vec<Block>,
    started: Instant,
}

impl App {
    /// Start one typewriter per entry, with environment overrides applied.
    pub fn new(
        entries: Vec<Entry>,
        overrides: &EnvOverrides,
        motion: MotionPreference,
    ) -> io::Result<Self> {
        let mut stage = Stage::new(motion);
        let mut blocks = Vec::with_capacity(entries.len());
        for entry in entries {
            let options = overrides.apply(entry.options());
            let explicit_reduce = options.reduce_motion;
            let variant = options.variant;
            let hooks = {
                let title = entry.title.clone();
                let done = entry.title.clone();
                Hooks::new()
                    .on_text_change(move |text, index| {
                        tracing::info!(block = %title, index, text, "text typed");
                    })
                    .on_complete(move || {
                        tracing::info!(block = %done, "block complete");
                    })
            };
            let id = stage.insert(options, hooks)?;
            blocks.push(Block {
                id,
                title: entry.title,
                variant,
                cursor: entry.spec.cursor(),
                explicit_reduce,
            });
        }
        tracing::debug!(blocks = blocks.len(), "showcase started");
        Ok(Self {
            stage,
            blocks,
            started: Instant::now(),
        })
    }

    /// Apply pending motion-preference changes.
    pub fn tick(&mut self) -> io::Result<()> {
        self.stage.pump()?;
        Ok(())
    }

    pub fn toggle_motion(&mut self) -> io::Result<()> {
        let motion = self.stage.motion().clone();
        motion.set(!motion.prefers_reduced_motion());
        self.tick()
    }

    pub fn restart_all(&mut self) -> io::Result<()> {
        self.stage.restart_all()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> io::Result<Control> {
        if key.kind != KeyEventKind::Press {
            return Ok(Control::Continue);
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Control::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(Control::Quit);
            }
            KeyCode::Char('m') => self.toggle_motion()?,
            KeyCode::Char('r') => self.restart_all()?,
            _ => {}
        }
        Ok(Control::Continue)
    }

    /// Title and snapshot of every block, in page order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<(&str, TypewriterSnapshot)> {
        self.blocks
            .iter()
            .filter_map(|b| Some((b.title.as_str(), self.stage.snapshot(b.id)?)))
            .collect()
    }

    /// Lines for one frame at time `now` since start.
    #[must_use]
    pub fn lines(&self, now: Duration, width: u16) -> Vec<String> {
        let reduced = self.stage.prefers_reduced_motion();
        let snapshots: Vec<Option<TypewriterSnapshot>> = self
            .blocks
            .iter()
            .map(|b| self.stage.snapshot(b.id))
            .collect();
        let rows: Vec<Row<'_>> = self
            .blocks
            .iter()
            .zip(&snapshots)
            .filter_map(|(block, snap)| {
                Some(Row {
                    title: &block.title,
                    variant: block.variant,
                    snapshot: snap.as_ref()?,
                    cursor: block.cursor,
                    reduced_motion: block.explicit_reduce || reduced,
                })
            })
            .collect();
        render::frame(&rows, reduced, now, width)
    }

    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Run the frame loop until quit or `exit_after` elapses.
pub fn run(app: &mut App, exit_after: Option<Duration>) -> io::Result<()> {
    let session = TerminalSession::enter()?;
    loop {
        app.tick()?;
        let elapsed = app.elapsed();
        if exit_after.is_some_and(|limit| elapsed >= limit) {
            tracing::debug!(?elapsed, "exit-after elapsed");
            break;
        }

        let (width, height) = session.size()?;
        session.draw(&app.lines(elapsed, width), height)?;

        if event::poll(FRAME_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && app.handle_key(key)? == Control::Quit
        {
            break;
        }
    }
    Ok(())
}
