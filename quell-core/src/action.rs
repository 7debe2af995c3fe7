// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Niladic actions scheduled by the quell policies.

use crate::error::ActionError;
use core::fmt;
use std::sync::Arc;

/// A zero-argument, fallible action.
///
/// Actions are cheap to clone (the body lives behind an `Arc`) so the policies
/// can hand them to delay continuations running on background tasks. An absent
/// action is expressed as `Option<Action> = None`; scheduling `None` is a
/// no-op under every policy.
///
/// # Example
///
/// ```
/// use quell_core::Action;
///
/// let action = Action::infallible(|| println!("recompute"));
/// assert!(action.run().is_ok());
/// ```
#[derive(Clone)]
pub struct Action {
    body: Arc<dyn Fn() -> core::result::Result<(), ActionError> + Send + Sync + 'static>,
}

impl Action {
    /// Create an action from a fallible body.
    pub fn new<F>(body: F) -> Self
    where
        F: Fn() -> core::result::Result<(), ActionError> + Send + Sync + 'static,
    {
        Self {
            body: Arc::new(body),
        }
    }

    /// Create an action from a body that cannot fail.
    pub fn infallible<F>(body: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::new(move || {
            body();
            Ok(())
        })
    }

    /// Invoke the action body on the current thread.
    ///
    /// The caller is responsible for holding the action lock; the body itself
    /// performs no synchronization.
    pub fn run(&self) -> core::result::Result<(), ActionError> {
        (self.body)()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}
