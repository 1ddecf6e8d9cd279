//! Range interpolation for frame-driven animation.
//!
//! Overlay renderers describe their motion as values sampled at an integer
//! frame; [`interpolate`] maps a frame through a piecewise-linear input range.

use serde::{Deserialize, Serialize};

/// Behaviour outside the input range of [`interpolate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Extrapolate {
    /// Pin to the first/last output value.
    #[default]
    Clamp,
    /// Continue the slope of the outermost segment.
    Extend,
}

/// Piecewise-linear map of `x` from `input` breakpoints onto `output` values.
///
/// `input` must be non-decreasing and the same length as `output`. A
/// malformed range (empty or mismatched lengths) yields `0.0`; a single
/// breakpoint yields its output value.
pub fn interpolate(x: f64, input: &[f64], output: &[f64], extrapolate: Extrapolate) -> f64 {
    if input.is_empty() || input.len() != output.len() {
        return 0.0;
    }
    let n = input.len();
    if n == 1 {
        return output[0];
    }

    // segment index: the pair (i, i + 1) that brackets x, or the outermost pair
    let i = input[1..n - 1].partition_point(|&edge| edge <= x);
    let (x0, x1) = (input[i], input[i + 1]);
    let (y0, y1) = (output[i], output[i + 1]);

    if extrapolate == Extrapolate::Clamp {
        if x <= input[0] {
            return output[0];
        }
        if x >= input[n - 1] {
            return output[n - 1];
        }
    }

    let span = x1 - x0;
    if span.abs() < f64::EPSILON {
        return if x < x0 { y0 } else { y1 };
    }
    y0 + (y1 - y0) * ((x - x0) / span)
}
