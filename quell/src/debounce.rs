// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cancel-and-replace debounce: one execution per burst, timed from the last
//! call.
//!
//! Each call records its delay as the latest for the control, superseding any
//! prior one. A continuation that fires and finds itself superseded is a
//! no-op: stale timers are cancelled by reference identity, without a true
//! cancellation primitive.

use crate::action_lock::ActionLock;
use crate::delay::Delay;
use core::time::Duration;
use parking_lot::Mutex;
use quell_core::{Action, CancellationToken, Completion, QuellError};
use std::sync::Arc;

/// Per-call-site control state for debounce.
///
/// Same durability precondition as the other controls: store it in a field
/// that outlives the calls. At most one live (non-superseded) delay is
/// pending at any time.
///
/// The supersession check compares delay identity, which assumes a fixed
/// delay per control across calls. Mixing zero and non-zero delays on one
/// control is a precondition violation and is not checked at runtime.
#[derive(Debug, Default)]
pub struct DebounceControl {
    latest: Arc<Mutex<Option<Delay>>>,
}

impl DebounceControl {
    /// Create an idle control.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` under debounce semantics.
    ///
    /// For any burst of calls each arriving less than `delay` apart, exactly
    /// one execution occurs, `delay` after the last call in the burst. A zero
    /// `delay` executes immediately on a background task, superseding any
    /// pending timer.
    ///
    /// A superseded call's [`Completion`] settles `Ok(())` without the action
    /// having run for it; the burst's outcome surfaces through the last
    /// call's completion.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(
        &self,
        action: Option<Action>,
        lock: &ActionLock,
        delay: Duration,
        token: Option<CancellationToken>,
    ) -> Completion {
        let Some(action) = action else {
            return Completion::completed();
        };
        let token = token.unwrap_or_default();
        if token.is_cancelled() {
            return Completion::canceled();
        }

        if delay.is_zero() {
            // Immediate execution; any pending timer becomes stale.
            *self.latest.lock() = None;

            let completion = Completion::pending();
            let task_completion = completion.clone();
            let lock = lock.clone();
            tokio::spawn(async move {
                if token.is_cancelled() {
                    task_completion.settle(Err(QuellError::Canceled));
                    return;
                }
                let result = {
                    let _guard = lock.lock();
                    action.run()
                };
                task_completion.settle(result.map_err(QuellError::action_boxed));
            });
            return completion;
        }

        let delay_handle = Delay::start(delay);

        // Record as latest before the continuation can observe it; this is
        // what supersedes any prior pending delay.
        *self.latest.lock() = Some(delay_handle.clone());

        let completion = Completion::pending();
        let task_completion = completion.clone();
        let latest_cell = Arc::clone(&self.latest);
        let wait_for = delay_handle;
        let lock = lock.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {
                    // Reset to idle if this delay still owns the slot, so the
                    // next burst starts clean.
                    {
                        let mut latest = latest_cell.lock();
                        if latest
                            .as_ref()
                            .is_some_and(|current| Delay::ptr_eq(current, &wait_for))
                        {
                            *latest = None;
                        }
                    }
                    task_completion.settle(Err(QuellError::Canceled));
                }
                () = wait_for.wait() => {
                    let still_latest = {
                        let mut latest = latest_cell.lock();
                        if latest
                            .as_ref()
                            .is_some_and(|current| Delay::ptr_eq(current, &wait_for))
                        {
                            *latest = None;
                            true
                        } else {
                            false
                        }
                    };

                    if still_latest {
                        let result = {
                            let _guard = lock.lock();
                            action.run()
                        };
                        task_completion.settle(result.map_err(QuellError::action_boxed));
                    } else {
                        // Superseded by a newer call: no-op.
                        task_completion.settle(Ok(()));
                    }
                }
            }
        });
        completion
    }
}
