// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The delay primitive underlying all three policies.
//!
//! A [`Delay`] completes after a fixed duration on a background timer task.
//! Unlike a plain sleep future it supports the two extra queries the policies
//! need: a non-blocking "already elapsed?" check and reference-identity
//! comparison (debounce supersedes stale timers by identity, not by value).

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use event_listener::Event;
use std::sync::Arc;

/// A deferred completion after a fixed duration.
///
/// Clones share the same underlying timer: they elapse together and compare
/// equal under [`Delay::ptr_eq`].
///
/// Timing is best effort; the delay elapses no earlier than the requested
/// duration but may elapse later under load.
///
/// # Example
///
/// ```no_run
/// use core::time::Duration;
/// use quell::Delay;
///
/// # async fn example() {
/// let delay = Delay::start(Duration::from_millis(50));
/// assert!(!delay.is_elapsed());
/// delay.wait().await;
/// assert!(delay.is_elapsed());
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Delay {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    elapsed: AtomicBool,
    event: Event,
}

impl Delay {
    /// Start a new delay.
    ///
    /// Must be called from within a Tokio runtime; the timer runs on a spawned
    /// background task.
    pub fn start(duration: Duration) -> Self {
        let inner = Arc::new(Inner {
            elapsed: AtomicBool::new(false),
            event: Event::new(),
        });

        let timer = Arc::clone(&inner);
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            timer.elapsed.store(true, Ordering::Release);
            timer.event.notify(usize::MAX);
        });

        Self { inner }
    }

    /// Check whether the delay has already elapsed (non-blocking).
    pub fn is_elapsed(&self) -> bool {
        self.inner.elapsed.load(Ordering::Acquire)
    }

    /// Wait asynchronously until the delay elapses.
    ///
    /// Resolves immediately if already elapsed.
    pub async fn wait(&self) {
        loop {
            if self.is_elapsed() {
                return;
            }

            let listener = self.inner.event.listen();

            // Re-check after registering: the timer may have fired between
            // the first check and listen().
            if self.is_elapsed() {
                return;
            }

            listener.await;
        }
    }

    /// Chain a continuation that runs on a background task once the delay
    /// elapses.
    pub fn on_complete<F>(&self, continuation: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.clone();
        tokio::spawn(async move {
            delay.wait().await;
            continuation();
        });
    }

    /// Reference-identity comparison: whether two handles denote the same
    /// underlying timer.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}
