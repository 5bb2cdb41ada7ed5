#![forbid(unsafe_code)]

//! A stage of independent typewriters sharing one motion preference.
//!
//! The stage subscribes to a [`MotionPreference`] and, on [`Stage::pump`],
//! restarts every instance whose effective reduced-motion value changed.
//! Instances the caller has reset stay idle. An instance whose restart
//! failed is retried on the next pump.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::sync::mpsc;

use typewriter_core::{MotionPreference, TypewriterOptions, TypewriterSnapshot};

use crate::driver::{Hooks, TypewriterHandle};

/// Identifier of an instance on a stage.
pub type InstanceId = u64;

/// Container for several running typewriters.
pub struct Stage {
    motion: MotionPreference,
    changes: mpsc::Receiver<bool>,
    reduced: bool,
    instances: BTreeMap<InstanceId, TypewriterHandle>,
    /// Instances left stopped by a failed restart.
    stalled: BTreeSet<InstanceId>,
    next_id: InstanceId,
}

impl Stage {
    #[must_use]
    pub fn new(motion: MotionPreference) -> Self {
        let changes = motion.subscribe();
        let reduced = motion.prefers_reduced_motion();
        Self {
            motion,
            changes,
            reduced,
            instances: BTreeMap::new(),
            stalled: BTreeSet::new(),
            next_id: 1,
        }
    }

    /// Start a typewriter under the stage's current motion preference.
    pub fn insert(&mut self, options: TypewriterOptions, hooks: Hooks) -> io::Result<InstanceId> {
        let handle = TypewriterHandle::spawn(options, hooks, self.reduced)?;
        let id = self.next_id;
        self.next_id += 1;
        self.instances.insert(id, handle);
        tracing::debug!(instance = id, total = self.instances.len(), "typewriter added to stage");
        Ok(id)
    }

    /// Tear down and drop one instance.
    pub fn remove(&mut self, id: InstanceId) -> bool {
        self.stalled.remove(&id);
        let removed = self.instances.remove(&id).is_some();
        if removed {
            tracing::debug!(instance = id, "typewriter removed from stage");
        }
        removed
    }

    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&TypewriterHandle> {
        self.instances.get(&id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut TypewriterHandle> {
        self.instances.get_mut(&id)
    }

    #[must_use]
    pub fn snapshot(&self, id: InstanceId) -> Option<TypewriterSnapshot> {
        self.instances.get(&id).map(TypewriterHandle::snapshot)
    }

    /// Snapshots of every instance in id order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<(InstanceId, TypewriterSnapshot)> {
        self.instances
            .iter()
            .map(|(id, handle)| (*id, handle.snapshot()))
            .collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = InstanceId> + '_ {
        self.instances.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Motion preference last applied by [`pump`](Self::pump).
    #[must_use]
    pub fn prefers_reduced_motion(&self) -> bool {
        self.reduced
    }

    #[must_use]
    pub fn motion(&self) -> &MotionPreference {
        &self.motion
    }

    /// Apply pending motion-preference changes.
    ///
    /// Every instance is visited even when one fails to restart; the first
    /// error is returned and the failed instances are retried on the next
    /// call. Returns the number of instances restarted.
    pub fn pump(&mut self) -> io::Result<usize> {
        let latest = self
            .changes
            .try_iter()
            .last()
            .filter(|&reduced| reduced != self.reduced);
        if latest.is_none() && self.stalled.is_empty() {
            return Ok(0);
        }
        let reduced = latest.unwrap_or(self.reduced);

        let mut restarted = 0;
        let mut first_error = None;
        for (&id, handle) in &mut self.instances {
            let retry = self.stalled.remove(&id);
            let outcome = handle
                .set_system_reduced_motion(reduced)
                .and_then(|changed| {
                    if retry {
                        handle.restart().map(|()| true)
                    } else {
                        Ok(changed)
                    }
                });
            match outcome {
                Ok(true) => restarted += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(instance = id, error = %e, "typewriter restart failed");
                    self.stalled.insert(id);
                    first_error.get_or_insert(e);
                }
            }
        }
        self.reduced = reduced;
        tracing::debug!(
            reduced,
            restarted,
            stalled = self.stalled.len(),
            total = self.instances.len(),
            "stage applied motion preference"
        );
        match first_error {
            Some(e) => Err(e),
            None => Ok(restarted),
        }
    }

    /// Reset every instance.
    pub fn reset_all(&mut self) {
        self.stalled.clear();
        for handle in self.instances.values_mut() {
            handle.reset();
        }
    }

    /// Restart every instance from its first frame.
    ///
    /// Instances that fail to restart are retried on the next
    /// [`pump`](Self::pump); the first error is returned.
    pub fn restart_all(&mut self) -> io::Result<()> {
        let mut first_error = None;
        for (&id, handle) in &mut self.instances {
            match handle.restart() {
                Ok(()) => {
                    self.stalled.remove(&id);
                }
                Err(e) => {
                    tracing::warn!(instance = id, error = %e, "typewriter restart failed");
                    self.stalled.insert(id);
                    first_error.get_or_insert(e);
                }
            }
        }
        tracing::debug!(count = self.instances.len(), "stage restarted");
        first_error.map_or(Ok(()), Err)
    }

    /// Tear down and drop every instance.
    pub fn clear(&mut self) {
        let count = self.instances.len();
        self.stalled.clear();
        self.instances.clear();
        tracing::debug!(count, "stage cleared");
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("reduced", &self.reduced)
            .field("instances", &self.instances.len())
            .field("stalled", &self.stalled.len())
            .finish()
    }
}
