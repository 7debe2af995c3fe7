// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Rate-limiting and coalescing scheduler for niladic actions.
//!
//! Three temporal policies, each driven through a caller-owned control
//! handle:
//!
//! - [`ThrottleControl`] — leading edge: one execution per window, timed from
//!   the first call that opened it.
//! - [`FastThrottleControl`] — trailing edge with an immediate first fire:
//!   the first call executes right away, later calls coalesce into one
//!   cooldown-gated execution.
//! - [`DebounceControl`] — cancel-and-replace: one execution per burst, timed
//!   from the last call, stale timers superseded by identity.
//!
//! All policies are correct under true parallel execution: bookkeeping is
//! guarded by narrow, policy-scoped locks, while the action body runs under a
//! separate, caller-supplied [`ActionLock`].
//!
//! # Example
//!
//! ```no_run
//! use core::time::Duration;
//! use quell::{ActionLock, FastThrottleControl};
//! use quell_core::Action;
//!
//! # async fn example() {
//! // The control must outlive the calls; keep it in a field.
//! let control = FastThrottleControl::new();
//! let lock = ActionLock::new();
//! let action = Action::infallible(|| println!("recompute"));
//!
//! // First call fires immediately; a burst coalesces into one more fire.
//! for _ in 0..10 {
//!     control.schedule(Some(action.clone()), &lock, Duration::from_millis(50), None);
//! }
//! # }
//! ```

pub mod action_lock;
pub mod debounce;
pub mod delay;
pub mod fast_throttle;
pub mod throttle;

pub use self::action_lock::ActionLock;
pub use self::debounce::DebounceControl;
pub use self::delay::Delay;
pub use self::fast_throttle::FastThrottleControl;
pub use self::throttle::ThrottleControl;
