// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::time::Duration;
use quell::{ActionLock, DebounceControl};
use quell_core::{CancellationToken, QuellError};
use quell_test_utils::{advance_ms, settle, CallRecorder};

const DELAY: Duration = Duration::from_millis(100);

#[tokio::test(start_paused = true)]
async fn test_debounce_burst_fires_once_after_last_call() -> anyhow::Result<()> {
    // Arrange
    let control = DebounceControl::new();
    let lock = ActionLock::new();
    let recorder = CallRecorder::new();

    // Act: calls at t=0, t=30, t=60
    let first = control.schedule(Some(recorder.action()), &lock, DELAY, None);
    settle().await;
    advance_ms(30).await;
    let second = control.schedule(Some(recorder.action()), &lock, DELAY, None);
    settle().await;
    advance_ms(30).await;
    let third = control.schedule(Some(recorder.action()), &lock, DELAY, None);
    settle().await;

    // Assert: the first two timers fire superseded (t=100, t=130), no action
    advance_ms(99).await;
    assert_eq!(recorder.count(), 0);
    assert!(matches!(first.outcome(), Some(Ok(()))));
    assert!(matches!(second.outcome(), Some(Ok(()))));

    // t=160: exactly one invocation, timed from the last call
    advance_ms(1).await;
    assert_eq!(recorder.count(), 1);
    assert!(matches!(third.outcome(), Some(Ok(()))));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_single_call_fires_after_delay() -> anyhow::Result<()> {
    // Arrange
    let control = DebounceControl::new();
    let lock = ActionLock::new();
    let recorder = CallRecorder::new();

    // Act
    let completion = control.schedule(Some(recorder.action()), &lock, DELAY, None);
    settle().await;
    advance_ms(99).await;
    assert_eq!(recorder.count(), 0);
    advance_ms(1).await;

    // Assert
    assert_eq!(recorder.count(), 1);
    assert!(matches!(completion.outcome(), Some(Ok(()))));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_handle_resets_between_bursts() -> anyhow::Result<()> {
    // Arrange
    let control = DebounceControl::new();
    let lock = ActionLock::new();
    let recorder = CallRecorder::new();

    // Act: first burst
    control.schedule(Some(recorder.action()), &lock, DELAY, None);
    settle().await;
    advance_ms(50).await;
    control.schedule(Some(recorder.action()), &lock, DELAY, None);
    settle().await;
    advance_ms(100).await;
    assert_eq!(recorder.count(), 1);

    // Second, independent burst: timing unaffected by the first
    advance_ms(500).await;
    control.schedule(Some(recorder.action()), &lock, DELAY, None);
    settle().await;
    advance_ms(99).await;
    assert_eq!(recorder.count(), 1);
    advance_ms(1).await;

    // Assert
    assert_eq!(recorder.count(), 2);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_zero_delay_executes_on_background_task() -> anyhow::Result<()> {
    // Arrange
    let control = DebounceControl::new();
    let lock = ActionLock::new();
    let recorder = CallRecorder::new();

    // Act
    let completion = control.schedule(Some(recorder.action()), &lock, Duration::ZERO, None);
    assert_eq!(recorder.count(), 0);
    settle().await;

    // Assert
    assert_eq!(recorder.count(), 1);
    assert!(matches!(completion.outcome(), Some(Ok(()))));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_none_action_is_noop() -> anyhow::Result<()> {
    // Arrange
    let control = DebounceControl::new();
    let lock = ActionLock::new();

    // Act & Assert
    let completion = control.schedule(None, &lock, DELAY, None);
    assert!(matches!(completion.outcome(), Some(Ok(()))));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_cancellation_prevents_execution() -> anyhow::Result<()> {
    // Arrange
    let control = DebounceControl::new();
    let lock = ActionLock::new();
    let recorder = CallRecorder::new();
    let token = CancellationToken::new();

    // Act
    let completion = control.schedule(Some(recorder.action()), &lock, DELAY, Some(token.clone()));
    settle().await;
    token.cancel();
    settle().await;
    advance_ms(200).await;

    // Assert: never invoked, canceled outcome
    assert_eq!(recorder.count(), 0);
    assert!(matches!(
        completion.outcome(),
        Some(Err(QuellError::Canceled))
    ));

    // The handle is idle again; a fresh burst behaves normally
    control.schedule(Some(recorder.action()), &lock, DELAY, None);
    settle().await;
    advance_ms(100).await;
    assert_eq!(recorder.count(), 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_action_fault_propagates() -> anyhow::Result<()> {
    // Arrange
    let control = DebounceControl::new();
    let lock = ActionLock::new();
    let recorder = CallRecorder::new();

    // Act
    let failing = control.schedule(Some(recorder.failing_action("boom")), &lock, DELAY, None);
    settle().await;
    advance_ms(100).await;

    // Assert
    assert_eq!(recorder.count(), 1);
    assert!(matches!(failing.outcome(), Some(Err(QuellError::Action(_)))));

    // Subsequent bursts are unaffected
    let next = control.schedule(Some(recorder.action()), &lock, DELAY, None);
    settle().await;
    advance_ms(100).await;
    assert_eq!(recorder.count(), 2);
    assert!(matches!(next.outcome(), Some(Ok(()))));

    Ok(())
}
