// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared, multi-observer completion of a scheduled window.
//!
//! A [`Completion`] is the value returned by every `schedule` call. Coalescing
//! policies hand clones of one `Completion` to every caller that lands in the
//! same window, so it must be observable from multiple places: the outcome is
//! `Clone` and waiters are woken through an [`event_listener::Event`].

use crate::error::QuellError;
use crate::Result;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};
use parking_lot::Mutex;
use std::sync::Arc;

/// Outcome of a scheduled window, settled exactly once.
///
/// A `Completion` can be cloned; all clones observe the same outcome. It is
/// settled by the scheduler when the window's action finishes (or is canceled,
/// or superseded) and can be queried without blocking or awaited.
///
/// # Example
///
/// ```
/// use quell_core::Completion;
///
/// # async fn example() {
/// let completion = Completion::completed();
/// assert!(completion.is_settled());
/// completion.wait().await.unwrap();
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Completion {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    outcome: Mutex<Option<Result<()>>>,
    event: Event,
}

impl Completion {
    /// Create a completion that has not yet settled.
    pub fn pending() -> Self {
        Self {
            inner: Arc::new(Inner {
                outcome: Mutex::new(None),
                event: Event::new(),
            }),
        }
    }

    /// Create a completion already settled with the given outcome.
    pub fn ready(outcome: Result<()>) -> Self {
        let completion = Self::pending();
        completion.settle(outcome);
        completion
    }

    /// Create a completion already settled with `Ok(())`.
    ///
    /// This is the marker returned for no-op schedules (absent action,
    /// coalesced call).
    pub fn completed() -> Self {
        Self::ready(Ok(()))
    }

    /// Create a completion already settled as canceled.
    pub fn canceled() -> Self {
        Self::ready(Err(QuellError::Canceled))
    }

    /// Settle the completion, waking all waiters.
    ///
    /// The first settle wins; later calls are ignored and return `false`.
    pub fn settle(&self, outcome: Result<()>) -> bool {
        {
            let mut slot = self.inner.outcome.lock();
            if slot.is_some() {
                crate::warn!("Completion::settle called on an already-settled completion");
                return false;
            }
            *slot = Some(outcome);
        }

        // Wake ALL waiters, not just one; the completion is multi-observer.
        self.inner.event.notify(usize::MAX);
        true
    }

    /// Check whether the completion has settled (non-blocking).
    pub fn is_settled(&self) -> bool {
        self.inner.outcome.lock().is_some()
    }

    /// The settled outcome, or `None` if still pending (non-blocking).
    pub fn outcome(&self) -> Option<Result<()>> {
        self.inner.outcome.lock().clone()
    }

    /// Wait asynchronously until the completion settles.
    ///
    /// If already settled, this resolves immediately with the outcome.
    pub fn wait(&self) -> Settled<'_> {
        Settled {
            completion: self,
            listener: None,
        }
    }

    /// Whether two handles observe the same underlying completion.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

/// Future returned by [`Completion::wait()`].
pub struct Settled<'a> {
    completion: &'a Completion,
    listener: Option<EventListener>,
}

impl Future for Settled<'_> {
    type Output = Result<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<()>> {
        // Fast path: already settled.
        if let Some(outcome) = self.completion.outcome() {
            return Poll::Ready(outcome);
        }

        if self.listener.is_none() {
            self.listener = Some(self.completion.inner.event.listen());

            // Re-check after registering: settle() may have run between the
            // first check and listen().
            if let Some(outcome) = self.completion.outcome() {
                return Poll::Ready(outcome);
            }
        }

        match Pin::new(self.listener.as_mut().unwrap()).poll(cx) {
            Poll::Ready(()) => {
                self.listener = None;
                // Notified; the outcome is now present.
                match self.completion.outcome() {
                    Some(outcome) => Poll::Ready(outcome),
                    None => {
                        // Spurious wake; re-register on the next poll.
                        cx.waker().wake_by_ref();
                        Poll::Pending
                    }
                }
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
