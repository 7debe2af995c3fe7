// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Mandelbrot iteration over a viewport.
//!
//! Pure function of its inputs; no shared state; safe to invoke from any
//! background thread. The scheduler treats it as an opaque action body.

/// Parameters for one compute pass.
#[derive(Clone, Debug, PartialEq)]
pub struct FractalParams {
    /// Viewport width in pixels.
    pub width: usize,
    /// Viewport height in pixels.
    pub height: usize,
    /// Iteration cap per point.
    pub iterations: u32,
    /// Scale factor from pixels to the complex plane.
    pub zoom: f32,
    /// Pan offset along the real axis, in pixel units.
    pub position_x: f32,
    /// Pan offset along the imaginary axis, in pixel units.
    pub position_y: f32,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            iterations: 85,
            zoom: 50.0,
            position_x: 0.0,
            position_y: 0.0,
        }
    }
}

/// Compute a normalized intensity buffer for the viewport.
///
/// Returns `width * height` values in `[0, 1]`, row-major. A point that
/// escapes after `i` iterations maps to `i / iterations`; a point that stays
/// bounded within the iteration cap maps to `0.0`.
///
/// The pixel-to-plane mapping follows the viewer's convention: the viewport
/// center lands at `position / viewport + 0`, and each pixel offsets the
/// center by `1 / zoom`.
pub fn compute_mandelbrot(params: &FractalParams) -> Vec<f32> {
    let iterations = params.iterations.max(1);
    let zoom = params.zoom;

    let lx = params.position_x / params.width as f32;
    let ly = params.position_y / params.height as f32;
    let half_w = (params.width >> 1) as f32;
    let half_h = (params.height >> 1) as f32;

    let mut set = vec![0.0f32; params.width * params.height];
    let mut offset = 0;

    for y in 0..params.height {
        let c_im = ly + (y as f32 - half_h) / zoom;
        for x in 0..params.width {
            let c_re = lx + (x as f32 - half_w) / zoom;

            let mut zx = 0.0f32;
            let mut zy = 0.0f32;
            let mut x2 = 0.0f32;
            let mut y2 = 0.0f32;

            let mut i = 0u32;
            while x2 + y2 <= 4.0 && i < iterations {
                zy = 2.0 * zx * zy + c_im;
                zx = x2 - y2 + c_re;
                x2 = zx * zx;
                y2 = zy * zy;
                i += 1;
            }

            // Points inside the set keep the buffer's default 0.0.
            if i < iterations {
                set[offset] = i as f32 / iterations as f32;
            }

            offset += 1;
        }
    }

    set
}
