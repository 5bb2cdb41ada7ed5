#![forbid(unsafe_code)]

//! Injected "prefers reduced motion" capability.
//!
//! The platform preference is process-wide, so it is modelled as a shared
//! handle passed into whatever builds typewriters, never queried ad hoc.
//! Tests construct one with a fixed value and flip it with
//! [`MotionPreference::set`]; subscribers learn about changes through an
//! `mpsc` channel.
//!
//! # Invariants
//!
//! 1. Subscribers receive a value only when it actually changes.
//! 2. Dropped receivers are pruned on the next notification.
//!
//! # Environment
//!
//! [`MotionPreference::from_env`] reads `TYPEWRITER_REDUCED_MOTION` (bool)
//! and otherwise treats a non-empty `NO_MOTION` as "reduce".

use std::env;
use std::fmt;
use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::parse_bool;

const ENV_REDUCED_MOTION: &str = "TYPEWRITER_REDUCED_MOTION";
const ENV_NO_MOTION: &str = "NO_MOTION";

struct Inner {
    reduced: bool,
    subscribers: Vec<mpsc::Sender<bool>>,
}

/// Shared, observable reduced-motion preference.
#[derive(Clone)]
pub struct MotionPreference {
    inner: Arc<Mutex<Inner>>,
}

impl MotionPreference {
    #[must_use]
    pub fn new(reduced: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                reduced,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Detect the preference from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Detect the preference through an injectable getter.
    pub fn from_env_with<F>(mut get: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let explicit = get(ENV_REDUCED_MOTION).and_then(|v| {
            let parsed = parse_bool(&v);
            if parsed.is_none() {
                tracing::warn!(value = %v, "ignoring malformed {ENV_REDUCED_MOTION}");
            }
            parsed
        });
        let reduced = explicit
            .unwrap_or_else(|| get(ENV_NO_MOTION).is_some_and(|v| !v.trim().is_empty()));
        tracing::debug!(reduced, "motion preference detected");
        Self::new(reduced)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn prefers_reduced_motion(&self) -> bool {
        self.lock().reduced
    }

    /// Update the preference and notify subscribers.
    ///
    /// Returns `true` if the value changed.
    pub fn set(&self, reduced: bool) -> bool {
        let mut inner = self.lock();
        if inner.reduced == reduced {
            return false;
        }
        inner.reduced = reduced;
        inner.subscribers.retain(|tx| tx.send(reduced).is_ok());
        tracing::debug!(
            reduced,
            subscribers = inner.subscribers.len(),
            "motion preference changed"
        );
        true
    }

    /// Receive every future change of the preference.
    #[must_use]
    pub fn subscribe(&self) -> mpsc::Receiver<bool> {
        let (tx, rx) = mpsc::channel();
        self.lock().subscribers.push(tx);
        rx
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

impl Default for MotionPreference {
    fn default() -> Self {
        Self::new(false)
    }
}

impl fmt::Debug for MotionPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("MotionPreference")
            .field("reduced", &inner.reduced)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}
