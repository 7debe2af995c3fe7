// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use quell_core::{Completion, QuellError};

#[tokio::test]
async fn test_pending_completion_settles_once() -> anyhow::Result<()> {
    // Arrange
    let completion = Completion::pending();
    assert!(!completion.is_settled());
    assert!(completion.outcome().is_none());

    // Act
    assert!(completion.settle(Ok(())));
    assert!(!completion.settle(Err(QuellError::Canceled)));

    // Assert: first settle wins
    assert!(completion.is_settled());
    assert!(matches!(completion.outcome(), Some(Ok(()))));
    completion.wait().await?;

    Ok(())
}

#[tokio::test]
async fn test_clones_observe_the_same_outcome() -> anyhow::Result<()> {
    // Arrange
    let completion = Completion::pending();
    let observer = completion.clone();
    assert!(Completion::ptr_eq(&completion, &observer));

    // Act
    completion.settle(Err(QuellError::Canceled));

    // Assert
    assert!(matches!(observer.outcome(), Some(Err(QuellError::Canceled))));
    assert!(observer.wait().await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_wait_wakes_when_settled_from_another_task() -> anyhow::Result<()> {
    // Arrange
    let completion = Completion::pending();
    let settler = completion.clone();

    // Act
    let waiter = tokio::spawn(async move { completion.wait().await });
    tokio::task::yield_now().await;
    settler.settle(Ok(()));

    // Assert
    waiter.await??;

    Ok(())
}

#[tokio::test]
async fn test_ready_markers() -> anyhow::Result<()> {
    // Act & Assert
    let completed = Completion::completed();
    assert!(matches!(completed.outcome(), Some(Ok(()))));

    let canceled = Completion::canceled();
    match canceled.outcome() {
        Some(Err(error)) => assert!(error.is_canceled()),
        other => panic!("expected canceled outcome, got {other:?}"),
    }

    let faulted = Completion::ready(Err(QuellError::action_boxed("boom".into())));
    assert!(matches!(faulted.outcome(), Some(Err(QuellError::Action(_)))));

    Ok(())
}

#[tokio::test]
async fn test_distinct_completions_are_not_identical() -> anyhow::Result<()> {
    // Arrange
    let a = Completion::completed();
    let b = Completion::completed();

    // Assert
    assert!(!Completion::ptr_eq(&a, &b));

    Ok(())
}
