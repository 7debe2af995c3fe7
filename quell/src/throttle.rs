// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Leading-edge throttle: one execution per window, timed from the first call.

use crate::action_lock::ActionLock;
use crate::delay::Delay;
use core::time::Duration;
use parking_lot::Mutex;
use quell_core::{Action, CancellationToken, Completion, QuellError};
use std::sync::Arc;

/// Per-call-site control state for the leading-edge throttle.
///
/// The control must live in a field that outlives the `schedule` calls made
/// with it — a fresh control per call degrades the policy to "always schedule
/// a brand-new delay". This is a documented precondition, not a runtime check.
///
/// `Default` is the idle state; internal state is created lazily on the first
/// call and the control becomes idle again once a window's delay elapses.
#[derive(Debug, Default)]
pub struct ThrottleControl {
    window: Arc<Mutex<Option<ThrottleWindow>>>,
}

/// One open window: either a pending delay or an immediate execution.
#[derive(Clone, Debug)]
enum ThrottleWindow {
    Delayed { delay: Delay, completion: Completion },
    Immediate { completion: Completion },
}

impl ThrottleWindow {
    /// Whether the window no longer absorbs calls.
    ///
    /// A delayed window closes when its delay elapses, not when its action
    /// finishes; an immediate window closes when its execution settles.
    fn is_over(&self) -> bool {
        match self {
            Self::Delayed { delay, .. } => delay.is_elapsed(),
            Self::Immediate { completion } => completion.is_settled(),
        }
    }

    fn completion(&self) -> &Completion {
        match self {
            Self::Delayed { completion, .. } | Self::Immediate { completion } => completion,
        }
    }
}

impl ThrottleControl {
    /// Create an idle control.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` under leading-edge throttle semantics.
    ///
    /// Of any burst of calls arriving within one `delay` window, exactly one
    /// execution occurs, `delay` after the first call that opened the window;
    /// calls during the window are ignored and receive the open window's
    /// [`Completion`]. A zero `delay` executes immediately on a background
    /// task.
    ///
    /// The action body runs under `lock`; `token` aborts a still-pending
    /// window but never interrupts a running action.
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

            *self.window.lock() = Some(ThrottleWindow::Immediate {
                completion: completion.clone(),
            });
            return completion;
        }

        let mut window = self.window.lock();
        if let Some(current) = window.as_ref() {
            if !current.is_over() {
                // A window is already open; this call neither restarts nor
                // extends it.
                return current.completion().clone();
            }
        }

        let delay_handle = Delay::start(delay);
        let completion = Completion::pending();
        let task_delay = delay_handle.clone();
        let task_completion = completion.clone();
        let lock = lock.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {
                    task_completion.settle(Err(QuellError::Canceled));
                }
                () = task_delay.wait() => {
                    let result = {
                        let _guard = lock.lock();
                        action.run()
                    };
                    task_completion.settle(result.map_err(QuellError::action_boxed));
                }
            }
        });

        *window = Some(ThrottleWindow::Delayed {
            delay: delay_handle,
            completion: completion.clone(),
        });
        completion
    }
}
