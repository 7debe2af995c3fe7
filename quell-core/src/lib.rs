// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core types shared by the quell scheduling policies.
//!
//! This crate holds the leaf building blocks — actions, completions,
//! cancellation, errors — and no scheduling logic. The policies themselves
//! live in the `quell` crate.

pub mod action;
pub mod cancellation_token;
pub mod completion;
pub mod error;
pub mod logging;

pub use self::action::Action;
pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::completion::{Completion, Settled};
pub use self::error::{ActionError, QuellError, Result};
