// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Trailing-edge throttle with an immediate first fire.
//!
//! The first call at an idle control executes on the calling thread right
//! away and opens a cooldown window. Calls landing inside the window coalesce
//! into a single continuation that fires when the window's delay elapses; the
//! continuation then opens the next window. A call arriving after the
//! cooldown expired fires inline again.
//!
//! The inline-vs-background asymmetry (cooldown-expired calls run on the
//! calling thread, coalesced calls run on a timer task) is deliberate and
//! preserved from the original design: calls outside a window should feel
//! immediate.

use crate::action_lock::ActionLock;
use crate::delay::Delay;
use core::time::Duration;
use parking_lot::Mutex;
use quell_core::{Action, CancellationToken, Completion, QuellError};
use std::sync::Arc;

/// Per-call-site control state for the fast throttle.
///
/// Same durability precondition as [`ThrottleControl`](crate::ThrottleControl):
/// store it in a field that outlives the calls. At most one delay/continuation
/// pair is outstanding at any time.
#[derive(Debug, Default)]
pub struct FastThrottleControl {
    state: Arc<Mutex<Option<FastThrottleState>>>,
}

#[derive(Debug)]
struct FastThrottleState {
    delay: Delay,
    continuation: Option<Completion>,
}

/// Branch picked inside the critical section; the action runs after it.
enum Decision {
    FireNow,
    Scheduled(Completion),
    Coalesced,
}

impl FastThrottleControl {
    /// Create an idle control.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` under fast-throttle semantics.
    ///
    /// Guarantees at most one invocation per window that received at least
    /// one call, and at most one outstanding continuation per control. The
    /// branch decision and all bookkeeping mutations happen in one short
    /// critical section over the control's own state lock, distinct from
    /// `lock`; the action body always runs after that critical section has
    /// been released, so one caller's long-running action never blocks
    /// another caller's scheduling decision.
    ///
    /// Returns the continuation's [`Completion`] when this call queued it, an
    /// already-settled marker carrying the action outcome when it fired
    /// inline, and a completed marker when it coalesced into an
    /// already-queued continuation.
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

        let decision = {
            let mut state = self.state.lock();
            match state.as_mut() {
                None => {
                    // First call at this site: open the window, fire inline.
                    *state = Some(FastThrottleState {
                        delay: Delay::start(delay),
                        continuation: None,
                    });
                    Decision::FireNow
                }
                Some(current) if current.delay.is_elapsed() => {
                    // Cooldown expired: reopen the window, fire inline.
                    current.delay = Delay::start(delay);
                    current.continuation = None;
                    Decision::FireNow
                }
                Some(current) => {
                    if current.continuation.is_some() {
                        // A continuation is already queued for this window.
                        Decision::Coalesced
                    } else {
                        let completion = Completion::pending();
                        current.continuation = Some(completion.clone());
                        self.spawn_continuation(
                            current.delay.clone(),
                            action.clone(),
                            lock.clone(),
                            delay,
                            token,
                            completion.clone(),
                        );
                        Decision::Scheduled(completion)
                    }
                }
            }
        };

        match decision {
            Decision::FireNow => {
                let result = {
                    let _guard = lock.lock();
                    action.run()
                };
                Completion::ready(result.map_err(QuellError::action_boxed))
            }
            Decision::Scheduled(completion) => completion,
            Decision::Coalesced => Completion::completed(),
        }
    }

    /// Queue the single continuation for the currently open window.
    fn spawn_continuation(
        &self,
        wait_for: Delay,
        action: Action,
        lock: ActionLock,
        delay: Duration,
        token: CancellationToken,
        completion: Completion,
    ) {
        let state_cell = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {
                    // The cooldown is left to expire naturally; the first
                    // call after expiry reopens the window.
                    completion.settle(Err(QuellError::Canceled));
                }
                () = wait_for.wait() => {
                    let result = {
                        let _guard = lock.lock();
                        action.run()
                    };

                    // Bookkeeping advances regardless of the action outcome:
                    // a failing window must not stall subsequent windows.
                    {
                        let mut state = state_cell.lock();
                        match state.as_mut() {
                            Some(current) => {
                                current.delay = Delay::start(delay);
                                current.continuation = None;
                            }
                            None => {
                                quell_core::error!(
                                    "fast throttle continuation fired with empty control state"
                                );
                            }
                        }
                    }

                    completion.settle(result.map_err(QuellError::action_boxed));
                }
            }
        });
    }
}
