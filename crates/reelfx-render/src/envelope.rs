//! Shared entry and exit curves.
//!
//! Every renderer combines an entry value (spring or fade rising from 0) with
//! an exit value (falling to 0 over the last frames of the window). Visible
//! opacity is the minimum of the two, so a window shorter than entry plus
//! exit never pops to full opacity.

use reelfx_core::{interpolate, spring, Extrapolate, SpringConfig};

/// Spring progress `delay` frames after the window opens.
pub fn delayed_spring(local: f64, delay: f64, fps: f64, config: SpringConfig) -> f64 {
    spring((local - delay).max(0.0), fps, config)
}

/// Linear 0 → 1 over `[0, frames]`.
pub fn fade_in(local: f64, frames: f64) -> f64 {
    interpolate(local, &[0.0, frames], &[0.0, 1.0], Extrapolate::Clamp)
}

/// Linear 0 → 1 over the last `frames` of a window of `duration` frames.
pub fn exit_progress(local: f64, duration: f64, frames: f64) -> f64 {
    interpolate(local, &[duration - frames, duration], &[0.0, 1.0], Extrapolate::Clamp)
}

/// Linear 1 → 0 over the last `frames` of the window.
pub fn fade_out(local: f64, duration: f64, frames: f64) -> f64 {
    1.0 - exit_progress(local, duration, frames)
}

/// Map `progress` in `[0, 1]` onto `[from, to]`.
pub fn lerp(progress: f64, from: f64, to: f64) -> f64 {
    from + (to - from) * progress
}

/// Combined opacity of an entry and an exit curve.
pub fn visible_opacity(enter: f64, exit: f64) -> f64 {
    enter.min(exit).clamp(0.0, 1.0)
}
