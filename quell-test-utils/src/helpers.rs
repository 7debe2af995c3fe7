// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cooperative scheduling helpers for virtual-clock tests.

use std::time::Duration;

/// Yield repeatedly so spawned timer and continuation tasks get to run.
///
/// Under a paused clock, yielding keeps the runtime busy without letting it
/// auto-advance time, which makes "nothing fired yet" assertions reliable:
/// call `settle` after each `schedule` or `advance`, then inspect counters.
pub async fn settle() {
    for _ in 0..64 {
        tokio::task::yield_now().await;
    }
}

/// Advance the paused Tokio clock and let woken tasks run.
pub async fn advance_and_settle(duration: Duration) {
    tokio::time::advance(duration).await;
    settle().await;
}

/// Advance the paused Tokio clock by whole milliseconds and let woken tasks
/// run.
pub async fn advance_ms(millis: u64) {
    advance_and_settle(Duration::from_millis(millis)).await;
}
