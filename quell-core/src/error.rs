// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the quell scheduling policies.
//!
//! The root [`QuellError`] type is deliberately `Clone`: the outcome of a
//! scheduled window can be observed through every clone of its
//! [`Completion`](crate::Completion), so action faults are carried behind an
//! `Arc` rather than a `Box`.

use std::sync::Arc;

/// Boxed error produced by an action body.
pub type ActionError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Root error type for all quell scheduling operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QuellError {
    /// The window was canceled before its action could start.
    ///
    /// A cancellation signal aborts a still-pending delay or prevents a
    /// not-yet-started execution; it never interrupts an action body that is
    /// already running.
    #[error("Scheduled window canceled before the action could run")]
    Canceled,

    /// The action body returned an error.
    ///
    /// Scheduler bookkeeping has already advanced when this surfaces; a
    /// failing window never stalls subsequent windows.
    #[error("Action error: {0}")]
    Action(Arc<dyn std::error::Error + Send + Sync + 'static>),
}

impl QuellError {
    /// Wrap an action fault.
    pub fn action(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Action(Arc::new(error))
    }

    /// Wrap an already-boxed action fault.
    pub fn action_boxed(error: ActionError) -> Self {
        Self::Action(Arc::from(error))
    }

    /// Whether this error represents cancellation rather than a fault.
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}

/// Result alias for quell operations.
pub type Result<T> = core::result::Result<T, QuellError>;
