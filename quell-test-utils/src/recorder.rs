// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Invocation recorder for scheduler tests.

use quell_core::{Action, ActionError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Records action invocations: total count and peak concurrency.
///
/// Cheap to clone; all clones share the same counters. The concurrency gauge
/// is incremented at action-body entry and decremented at exit, so
/// `max_concurrency` verifies the no-overlap property across racing callers
/// sharing one control.
#[derive(Clone, Debug, Default)]
pub struct CallRecorder {
    state: Arc<RecorderState>,
}

#[derive(Debug, Default)]
struct RecorderState {
    calls: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl CallRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed action invocations.
    pub fn count(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    /// Highest number of action bodies ever running at once.
    pub fn max_concurrency(&self) -> usize {
        self.state.max_active.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        let now_active = self.state.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_active.fetch_max(now_active, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.state.active.fetch_sub(1, Ordering::SeqCst);
        self.state.calls.fetch_add(1, Ordering::SeqCst);
    }

    /// An action that records each invocation.
    pub fn action(&self) -> Action {
        let recorder = self.clone();
        Action::infallible(move || {
            recorder.enter();
            recorder.exit();
        })
    }

    /// An action whose body blocks for `busy`, to widen race windows in
    /// overlap tests. Uses a thread sleep: the body models synchronous work.
    pub fn slow_action(&self, busy: Duration) -> Action {
        let recorder = self.clone();
        Action::infallible(move || {
            recorder.enter();
            std::thread::sleep(busy);
            recorder.exit();
        })
    }

    /// An action that records the invocation and then fails with `message`.
    pub fn failing_action(&self, message: &'static str) -> Action {
        let recorder = self.clone();
        Action::new(move || {
            recorder.enter();
            recorder.exit();
            Err(ActionError::from(message))
        })
    }
}
