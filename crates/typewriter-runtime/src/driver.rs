#![forbid(unsafe_code)]

//! Real-time driver: one thread per running typewriter.
//!
//! [`TypewriterHandle::spawn`] builds the engine, publishes its first
//! snapshot and moves it onto a dedicated driver thread. The thread sleeps
//! on a [`StopSignal`] until the single pending timer is due, fires exactly
//! one transition, publishes the new snapshot and then dispatches hooks.
//! The handle never touches the engine; it only reads published snapshots.
//!
//! # Invariants
//!
//! 1. Every run carries a generation number. Teardown bumps the published
//!    generation under the same lock used for publishing, so a driver whose
//!    generation is stale can neither fire, publish nor dispatch again.
//! 2. `reset()`, `restart()`, `reconfigure()` and `Drop` join the old driver
//!    before returning (unless called from that driver's own hook), so no
//!    hook runs after the caller regains control.
//! 3. Hooks run on the driver thread, never while the publish lock is held.
//!
//! # Zero-delay chains
//!
//! A zero delay is fired inline. After [`MAX_ZERO_DELAY_STREAK`] consecutive
//! zero-delay fires the driver sleeps [`ZERO_DELAY_BACKOFF`] so a looping
//! config with all timings at zero cannot pin a core.

use std::fmt;
use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use typewriter_core::{Typewriter, TypewriterEvent, TypewriterOptions, TypewriterSnapshot};

use crate::timer::{StopSignal, StopTrigger};

/// Consecutive zero-delay fires before the driver yields.
pub const MAX_ZERO_DELAY_STREAK: u32 = 256;

/// Sleep inserted after a zero-delay streak.
pub const ZERO_DELAY_BACKOFF: Duration = Duration::from_millis(1);

/// `onTextChange(text, index)`.
pub type TextChangeHook = Box<dyn FnMut(&str, usize) + Send>;

/// `onComplete()`.
pub type CompleteHook = Box<dyn FnMut() + Send>;

/// Caller callbacks, run on the driver thread.
///
/// Hooks survive `reset()`/`restart()`/`reconfigure()`. They must not block
/// on the owning handle: teardown joins the driver thread they run on.
#[derive(Default)]
pub struct Hooks {
    on_text_change: Option<TextChangeHook>,
    on_complete: Option<CompleteHook>,
}

impl Hooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_text_change(mut self, hook: impl FnMut(&str, usize) + Send + 'static) -> Self {
        self.on_text_change = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_complete(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    fn dispatch(&mut self, event: &TypewriterEvent) {
        match event {
            TypewriterEvent::TextTyped { text, index } => {
                if let Some(hook) = self.on_text_change.as_mut() {
                    hook(text, *index);
                }
            }
            TypewriterEvent::Completed => {
                if let Some(hook) = self.on_complete.as_mut() {
                    hook();
                }
            }
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_text_change", &self.on_text_change.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

struct Published {
    snapshot: TypewriterSnapshot,
    /// Generation allowed to publish; bumped on teardown.
    generation: u64,
    watchers: Vec<mpsc::Sender<TypewriterSnapshot>>,
}

impl Published {
    fn publish(&mut self, snapshot: TypewriterSnapshot) {
        if snapshot == self.snapshot {
            return;
        }
        self.watchers.retain(|tx| tx.send(snapshot.clone()).is_ok());
        self.snapshot = snapshot;
    }
}

#[derive(Clone)]
struct Shared {
    published: Arc<Mutex<Published>>,
    hooks: Arc<Mutex<Hooks>>,
}

impl Shared {
    fn new(hooks: Hooks) -> Self {
        Self {
            published: Arc::new(Mutex::new(Published {
                snapshot: TypewriterSnapshot::default(),
                generation: 0,
                watchers: Vec::new(),
            })),
            hooks: Arc::new(Mutex::new(hooks)),
        }
    }

    fn published(&self) -> MutexGuard<'_, Published> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn hooks(&self) -> MutexGuard<'_, Hooks> {
        self.hooks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Driver thread
// ---------------------------------------------------------------------------

struct Driver {
    typewriter: Typewriter,
    shared: Shared,
    generation: u64,
    stop: StopSignal,
}

impl Driver {
    fn is_live(&self) -> bool {
        self.shared.published().generation == self.generation
    }

    /// Publish the engine snapshot. Returns `false` once torn down.
    fn publish(&self) -> bool {
        let mut published = self.shared.published();
        if published.generation != self.generation {
            return false;
        }
        published.publish(self.typewriter.snapshot());
        true
    }

    /// Run hooks for queued events. Returns `false` once torn down.
    fn dispatch(&mut self) -> bool {
        let events = self.typewriter.drain_events();
        if events.is_empty() {
            return true;
        }
        let mut hooks = self.shared.hooks();
        for event in &events {
            if !self.is_live() {
                return false;
            }
            hooks.dispatch(event);
        }
        true
    }

    /// Fire the pending transition, publish it and run hooks.
    ///
    /// A torn-down driver returns `false` without touching the engine.
    fn step(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        self.typewriter.fire_pending();
        self.publish() && self.dispatch()
    }

    fn run(mut self) {
        tracing::debug!(generation = self.generation, "typewriter driver started");
        let mut zero_streak = 0u32;
        let mut live = self.dispatch();

        while live {
            let Some(wait) = self.typewriter.time_to_next() else {
                break;
            };
            let stopped = if wait.is_zero() {
                zero_streak += 1;
                if zero_streak >= MAX_ZERO_DELAY_STREAK {
                    zero_streak = 0;
                    self.stop.wait_timeout(ZERO_DELAY_BACKOFF)
                } else {
                    self.stop.is_stopped()
                }
            } else {
                zero_streak = 0;
                self.stop.wait_timeout(wait)
            };
            if stopped {
                break;
            }
            live = self.step();
        }

        tracing::debug!(
            generation = self.generation,
            complete = self.typewriter.is_complete(),
            "typewriter driver exiting"
        );
    }
}

struct Running {
    trigger: StopTrigger,
    thread: thread::JoinHandle<()>,
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Owner of one running typewriter.
///
/// Dropping the handle tears the driver down and joins it.
pub struct TypewriterHandle {
    options: TypewriterOptions,
    system_reduced_motion: bool,
    shared: Shared,
    running: Option<Running>,
}

impl TypewriterHandle {
    /// Start a typewriter on its own driver thread.
    ///
    /// The returned handle already reports the first snapshot; for a
    /// reduced-motion config that is the final text.
    pub fn spawn(
        options: TypewriterOptions,
        hooks: Hooks,
        system_reduced_motion: bool,
    ) -> io::Result<Self> {
        let mut handle = Self {
            options,
            system_reduced_motion,
            shared: Shared::new(hooks),
            running: None,
        };
        handle.start()?;
        Ok(handle)
    }

    fn start(&mut self) -> io::Result<()> {
        let typewriter = Typewriter::from_options(&self.options, self.system_reduced_motion);
        let generation = {
            let mut published = self.shared.published();
            published.publish(typewriter.snapshot());
            published.generation
        };
        let (stop, trigger) = StopSignal::new();
        let driver = Driver {
            typewriter,
            shared: self.shared.clone(),
            generation,
            stop,
        };
        let thread = thread::Builder::new()
            .name("typewriter-driver".into())
            .spawn(move || driver.run())?;
        self.running = Some(Running { trigger, thread });
        Ok(())
    }

    fn teardown(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };
        {
            let mut published = self.shared.published();
            published.generation = published.generation.wrapping_add(1);
        }
        running.trigger.stop();

        if running.thread.thread().id() == thread::current().id() {
            tracing::debug!("typewriter torn down from its own hook; not joining");
            return;
        }
        if running.thread.join().is_err() {
            tracing::warn!("typewriter driver thread panicked");
        }
        tracing::debug!("typewriter driver stopped");
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TypewriterSnapshot {
        self.shared.published().snapshot.clone()
    }

    /// Receive the current snapshot now and every change after it.
    #[must_use]
    pub fn watch(&self) -> mpsc::Receiver<TypewriterSnapshot> {
        let (tx, rx) = mpsc::channel();
        let mut published = self.shared.published();
        if tx.send(published.snapshot.clone()).is_ok() {
            published.watchers.push(tx);
        }
        rx
    }

    /// Stop the driver and return to the initial snapshot.
    ///
    /// No hook runs after this returns. The instance stays idle until
    /// [`restart`](Self::restart).
    pub fn reset(&mut self) {
        self.teardown();
        self.shared.published().publish(TypewriterSnapshot::default());
        tracing::debug!("typewriter handle reset");
    }

    /// Tear down any current run and start a fresh one.
    pub fn restart(&mut self) -> io::Result<()> {
        self.teardown();
        self.start()
    }

    /// Replace the options. Equivalent to teardown plus a fresh start.
    pub fn reconfigure(&mut self, options: TypewriterOptions) -> io::Result<()> {
        self.teardown();
        self.options = options;
        self.start()
    }

    /// Apply a new system motion preference.
    ///
    /// Restarts the run when the effective reduced-motion value changes and
    /// the instance is started; a reset instance only records the value.
    /// Returns whether a restart happened.
    pub fn set_system_reduced_motion(&mut self, reduced: bool) -> io::Result<bool> {
        let before = self.effective_reduced_motion();
        self.system_reduced_motion = reduced;
        if before == self.effective_reduced_motion() || self.running.is_none() {
            return Ok(false);
        }
        tracing::debug!(
            reduced = self.effective_reduced_motion(),
            "typewriter restarting for motion preference"
        );
        self.restart()?;
        Ok(true)
    }

    /// Explicit override OR-ed with the system preference.
    #[must_use]
    pub fn effective_reduced_motion(&self) -> bool {
        self.options.reduce_motion || self.system_reduced_motion
    }

    #[must_use]
    pub fn options(&self) -> &TypewriterOptions {
        &self.options
    }

    /// Started and not reset (the run may already be complete).
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.running.is_some()
    }

    /// Whether the driver thread is still alive.
    #[must_use]
    pub fn is_driving(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.thread.is_finished())
    }
}

impl Drop for TypewriterHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for TypewriterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypewriterHandle")
            .field("options", &self.options)
            .field("system_reduced_motion", &self.system_reduced_motion)
            .field("started", &self.is_started())
            .finish_non_exhaustive()
    }
}
