//! Breathing / pulse oscillation
//!
//! Memoryless sine math: every frame recomputes the scale from elapsed time,
//! so any driver (vsync loop, fixed-step harness, tests) gets identical
//! results for identical inputs.

use std::f32::consts::TAU;

/// Default breathing amplitude: the mandala swells and shrinks by 5%
pub const DEFAULT_PULSE_AMPLITUDE: f32 = 0.05;

/// Sinusoidal oscillation `amplitude * sin(2*pi*f*t)` with `time` in seconds.
#[inline]
pub fn oscillate(time_s: f32, frequency_hz: f32, amplitude: f32) -> f32 {
    amplitude * (TAU * frequency_hz * time_s).sin()
}

/// Uniform scale factor oscillating around 1.0. Takes milliseconds, since the
/// frame loop accumulates time in ms; exactly 1.0 at t = 0.
#[inline]
pub fn pulse_scale(time_ms: f32, frequency_hz: f32, amplitude: f32) -> f32 {
    1.0 + oscillate(time_ms / 1000.0, frequency_hz, amplitude)
}
