// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Test utilities and fixtures for the quell scheduling policies.
//!
//! For development and testing only, not for production code. Provides the
//! [`CallRecorder`] used to count action invocations and verify the
//! no-overlap property, and cooperative settling helpers for virtual-clock
//! tests.

pub mod helpers;
pub mod recorder;

pub use self::helpers::{advance_and_settle, advance_ms, settle};
pub use self::recorder::CallRecorder;
