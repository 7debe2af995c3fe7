// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Mandelbrot compute collaborator and the input-driven render driver that
//! exercises the quell fast-throttle policy.

pub mod compute;
pub mod driver;

pub use self::compute::{compute_mandelbrot, FractalParams};
pub use self::driver::{Frame, InputEvent, Presenter, RenderDriver};
