//! Frame timing for frame-accurate overlay playback.
//!
//! Transcript timestamps arrive as float seconds. Everything the renderer
//! and the player see is an integer frame index obtained with
//! `round(seconds * fps)`, so a given timestamp always lands on the same frame.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Frame rate as a rational number (e.g., 30000/1001 for 29.97 fps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRate {
    /// Numerator (e.g., 30000)
    pub numerator: u32,
    /// Denominator (e.g., 1001)
    pub denominator: u32,
}

impl FrameRate {
    /// Create a new frame rate.
    #[inline]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Create an integral frame rate (e.g., 30 fps).
    #[inline]
    pub const fn from_fps(fps: u32) -> Self {
        Self::new(fps, 1)
    }

    /// Convert to frames per second as f64.
    #[inline]
    pub fn to_fps_f64(self) -> f64 {
        self.numerator as f64 / self.denominator.max(1) as f64
    }

    /// Nearest frame for a time in seconds.
    #[inline]
    pub fn frame_at(self, seconds: f64) -> i64 {
        (seconds * self.to_fps_f64()).round() as i64
    }

    /// Time in seconds at the start of `frame`.
    #[inline]
    pub fn seconds_at(self, frame: i64) -> f64 {
        frame as f64 / self.to_fps_f64()
    }

    /// Duration of a single frame in seconds.
    #[inline]
    pub fn frame_duration_secs(self) -> f64 {
        1.0 / self.to_fps_f64()
    }

    /// Common frame rates
    pub const FPS_24: Self = Self::new(24, 1);
    pub const FPS_25: Self = Self::new(25, 1);
    pub const FPS_29_97: Self = Self::new(30000, 1001);
    pub const FPS_30: Self = Self::new(30, 1);
    pub const FPS_60: Self = Self::new(60, 1);
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::FPS_30
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fps = self.to_fps_f64();
        if (fps - fps.round()).abs() < 0.001 {
            write!(f, "{} fps", fps.round() as u32)
        } else {
            write!(f, "{:.3} fps", fps)
        }
    }
}

/// An inclusive `[start, end]` range of frames during which an overlay is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameWindow {
    /// First visible frame (inclusive).
    pub start: i64,
    /// Last visible frame (inclusive).
    pub end: i64,
}

impl FrameWindow {
    /// Create a window from explicit frame bounds.
    #[inline]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Build the window covering `[start_secs, end_secs]` at `rate`.
    pub fn from_seconds(start_secs: f64, end_secs: f64, rate: FrameRate) -> Self {
        Self {
            start: rate.frame_at(start_secs),
            end: rate.frame_at(end_secs),
        }
    }

    /// Check if a frame is within this window.
    #[inline]
    pub fn contains(self, frame: i64) -> bool {
        frame >= self.start && frame <= self.end
    }

    /// Frame offset relative to the window start.
    #[inline]
    pub fn local_frame(self, frame: i64) -> i64 {
        frame - self.start
    }

    /// Window length in frames (`end - start`).
    #[inline]
    pub fn duration(self) -> i64 {
        (self.end - self.start).max(0)
    }

    /// Check if two windows share at least one frame.
    pub fn overlaps(self, other: Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for FrameWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..={}]", self.start, self.end)
    }
}
