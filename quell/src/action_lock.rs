// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Explicit mutual exclusion around action bodies.

use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Mutual-exclusion token serializing action bodies.
///
/// Every `schedule` call takes an explicit `ActionLock`; the policies hold it
/// for the duration of the action body and for nothing else. Their own
/// bookkeeping is protected by a separate, policy-scoped lock, so a
/// long-running action never blocks another caller's scheduling decision.
///
/// Clones guard the same critical section: callers that share an action (or a
/// resource the action touches) should share one lock, unrelated call sites
/// should each create their own.
#[derive(Clone, Debug, Default)]
pub struct ActionLock {
    inner: Arc<Mutex<()>>,
}

impl ActionLock {
    /// Create a new, unrelated lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock, blocking the current thread until available.
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.inner.lock()
    }
}
