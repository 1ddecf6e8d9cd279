//! Damped spring progress for overlay entry animations.
//!
//! A unit mass-spring-damper released from rest at 0 and pulled toward 1.
//! The closed-form solution is evaluated directly at `frame / fps`, so the
//! result depends only on its arguments and replays identically.

use serde::{Deserialize, Serialize};

/// Physical parameters of a spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub mass: f64,
    pub damping: f64,
    pub stiffness: f64,
    /// Clamp the result to `[0, 1]` instead of letting it overshoot.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            damping: 10.0,
            stiffness: 100.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    pub const fn new(damping: f64, stiffness: f64, mass: f64) -> Self {
        Self {
            mass,
            damping,
            stiffness,
            overshoot_clamping: false,
        }
    }

    pub fn with_overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = clamp;
        self
    }

    /// Damping ratio ζ. Below 1 the spring oscillates around its target.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// Spring progress at `frame` for a clip running at `fps`.
///
/// Returns `0.0` for frames before the start and approaches `1.0` as the
/// spring settles. Degenerate configurations (non-positive mass, stiffness
/// or fps) snap straight to `1.0` once the frame is non-negative.
pub fn spring(frame: f64, fps: f64, config: SpringConfig) -> f64 {
    if frame <= 0.0 {
        return 0.0;
    }
    if fps <= 0.0 || config.mass <= 0.0 || config.stiffness <= 0.0 {
        return 1.0;
    }

    let t = frame / fps;
    let omega0 = (config.stiffness / config.mass).sqrt();
    let zeta = config.damping.max(0.0) / (2.0 * (config.stiffness * config.mass).sqrt());

    let displacement = if (zeta - 1.0).abs() < 1e-9 {
        // critically damped
        (-omega0 * t).exp() * (1.0 + omega0 * t)
    } else if zeta < 1.0 {
        let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
        (-zeta * omega0 * t).exp()
            * ((omega1 * t).cos() + (zeta * omega0 / omega1) * (omega1 * t).sin())
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega0 * (zeta - root);
        let r2 = -omega0 * (zeta + root);
        // x(0) = 1, x'(0) = 0 for the displacement from target
        let c2 = r1 / (r1 - r2);
        let c1 = 1.0 - c2;
        c1 * (r1 * t).exp() + c2 * (r2 * t).exp()
    };

    let progress = 1.0 - displacement;
    if config.overshoot_clamping {
        progress.clamp(0.0, 1.0)
    } else {
        progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_starts_at_zero() {
        let cfg = SpringConfig::default();
        assert_eq!(spring(0.0, 30.0, cfg), 0.0);
        assert_eq!(spring(-5.0, 30.0, cfg), 0.0);
    }

    #[test]
    fn test_spring_settles_at_one() {
        for cfg in [
            SpringConfig::new(12.0, 100.0, 0.8),
            SpringConfig::new(8.0, 150.0, 0.5),
            SpringConfig::new(20.0, 100.0, 1.0), // critical
            SpringConfig::new(60.0, 100.0, 1.0), // overdamped
        ] {
            let settled = spring(300.0, 30.0, cfg);
            assert!((settled - 1.0).abs() < 1e-3, "{cfg:?} settled at {settled}");
        }
    }

    #[test]
    fn test_underdamped_overshoots() {
        let cfg = SpringConfig::new(8.0, 200.0, 0.5);
        assert!(cfg.damping_ratio() < 1.0);
        let peak = (1..60)
            .map(|f| spring(f as f64, 30.0, cfg))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);

        let clamped = cfg.with_overshoot_clamping(true);
        let clamped_peak = (1..60)
            .map(|f| spring(f as f64, 30.0, clamped))
            .fold(f64::MIN, f64::max);
        assert!(clamped_peak <= 1.0);
    }

    #[test]
    fn test_overdamped_is_monotonic() {
        let cfg = SpringConfig::new(60.0, 100.0, 1.0);
        let mut prev = 0.0;
        for f in 1..120 {
            let p = spring(f as f64, 30.0, cfg);
            assert!(p >= prev - 1e-12);
            prev = p;
        }
    }

    #[test]
    fn test_degenerate_config_snaps() {
        let cfg = SpringConfig::new(10.0, 0.0, 1.0);
        assert_eq!(spring(1.0, 30.0, cfg), 1.0);
        assert_eq!(spring(1.0, 0.0, SpringConfig::default()), 1.0);
    }
}
