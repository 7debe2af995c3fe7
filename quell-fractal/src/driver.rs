// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Input-driven render driver.
//!
//! On every input change (pan, zoom, resize) the driver schedules a recompute
//! through the fast-throttle policy: the first change renders immediately, a
//! storm of changes coalesces into one trailing render per cooldown window.
//! The driver owns the durable control handle; the scheduler stays agnostic
//! to how frames reach the presentation layer.

use crate::compute::{compute_mandelbrot, FractalParams};
use core::time::Duration;
use parking_lot::Mutex;
use quell::{ActionLock, FastThrottleControl};
use quell_core::{Action, Completion};
use std::sync::Arc;

/// A single input change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ZoomIn,
    ZoomOut,
    Resized { width: usize, height: usize },
}

/// One rendered intensity buffer.
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    /// Row-major normalized intensities in `[0, 1]`.
    pub pixels: Vec<f32>,
}

/// Callback receiving finished frames.
///
/// Invoked from the thread the action body runs on; the presenter performs
/// its own marshaling to the display layer.
pub type Presenter = Arc<dyn Fn(Frame) + Send + Sync + 'static>;

/// Owns viewport state and the persistent fast-throttle control handle.
pub struct RenderDriver {
    params: Arc<Mutex<FractalParams>>,
    control: FastThrottleControl,
    lock: ActionLock,
    render: Action,
    throttle: Duration,
    pan_speed: f32,
}

impl RenderDriver {
    /// Create a driver rendering into `presenter`.
    ///
    /// The default throttle delay is zero (render on every cooldown expiry,
    /// coalescing only true bursts) and the default pan speed matches the
    /// original viewer.
    pub fn new(params: FractalParams, presenter: Presenter) -> Self {
        let params = Arc::new(Mutex::new(params));

        let render_params = Arc::clone(&params);
        let render = Action::infallible(move || {
            // Snapshot current parameters at execution time, not at schedule
            // time: a coalesced render picks up the latest input state.
            let snapshot = render_params.lock().clone();
            let pixels = compute_mandelbrot(&snapshot);
            presenter(Frame {
                width: snapshot.width,
                height: snapshot.height,
                pixels,
            });
        });

        Self {
            params,
            control: FastThrottleControl::new(),
            lock: ActionLock::new(),
            render,
            throttle: Duration::ZERO,
            pan_speed: 30_000.0,
        }
    }

    /// Set the fast-throttle cooldown between renders.
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Set the pan step numerator; the effective step is `speed / zoom`.
    pub fn with_pan_speed(mut self, pan_speed: f32) -> Self {
        self.pan_speed = pan_speed;
        self
    }

    /// Current viewport parameters.
    pub fn params(&self) -> FractalParams {
        self.params.lock().clone()
    }

    /// Apply an input change and schedule a recompute.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn handle_input(&self, event: InputEvent) -> Completion {
        {
            let mut params = self.params.lock();
            let step = self.pan_speed / params.zoom;
            match event {
                InputEvent::PanLeft => params.position_x -= step,
                InputEvent::PanRight => params.position_x += step,
                InputEvent::PanUp => params.position_y -= step,
                InputEvent::PanDown => params.position_y += step,
                InputEvent::ZoomIn => params.zoom *= 1.1,
                InputEvent::ZoomOut => params.zoom *= 0.9,
                InputEvent::Resized { width, height } => {
                    params.width = width;
                    params.height = height;
                }
            }
        }

        self.schedule_render()
    }

    /// Schedule a recompute without an input change (e.g. initial render).
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule_render(&self) -> Completion {
        self.control
            .schedule(Some(self.render.clone()), &self.lock, self.throttle, None)
    }
}
