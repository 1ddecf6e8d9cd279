use reelfx_core::SeededRandom;
use reelfx_timeline::{OverlayAssignment, OverlayKind};
use std::f64::consts::{FRAC_PI_2, TAU};

use super::{num_or, prop_or};
use crate::envelope::{fade_in, fade_out, visible_opacity};
use crate::renderer::OverlayRenderer;
use crate::visual::{Particle, RenderContext, Visual, VisualContent};

const MAX_PARTICLES: usize = 200;
/// Random draws reserved per particle.
const DRAWS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Ambient,
    Burst,
    Rain,
}

impl Style {
    fn parse(s: &str) -> Self {
        match s {
            "burst" => Style::Burst,
            "rain" => Style::Rain,
            _ => Style::Ambient,
        }
    }
}

/// Seeded launch parameters of one particle.
struct Seed {
    id: f64,
    angle: f64,
    speed: f64,
    delay: f64,
    size: f64,
    x: f64,
    y: f64,
    drift: f64,
}

impl Seed {
    fn new(style: Style, rng: &SeededRandom, i: usize, count: usize) -> Self {
        let r = |k: u32| rng.at(i as u32 * DRAWS + k);
        let id = i as f64;
        match style {
            Style::Burst => Seed {
                id,
                angle: id / count as f64 * TAU + r(0) * 0.3,
                speed: 2.0 + r(1) * 4.0,
                delay: r(2) * 8.0,
                size: 3.0 + r(3) * 5.0,
                x: 50.0,
                y: 50.0,
                drift: 0.0,
            },
            Style::Rain => Seed {
                id,
                angle: FRAC_PI_2,
                speed: 1.5 + r(1) * 2.5,
                delay: r(2) * 20.0,
                size: 2.0 + r(3) * 4.0,
                x: r(0) * 100.0,
                y: -5.0,
                drift: (r(5) - 0.5) * 1.5,
            },
            Style::Ambient => Seed {
                id,
                angle: -FRAC_PI_2,
                speed: 0.3 + r(4) * 0.6,
                delay: 0.0,
                size: 2.0 + r(2) * 5.0,
                x: r(0) * 100.0,
                y: r(1) * 100.0,
                drift: (r(5) - 0.5) * 0.4,
            },
        }
    }

    /// Position and brightness at `local` frames, `None` before launch.
    fn sample(&self, style: Style, local: f64) -> Option<Particle> {
        let p = (local - self.delay).max(0.0);
        if p <= 0.0 {
            return None;
        }
        let (x, y) = match style {
            Style::Burst => {
                let dist = p * self.speed;
                (50.0 + self.angle.cos() * dist * 0.8, 50.0 + self.angle.sin() * dist * 0.5)
            }
            Style::Rain => (
                self.x + (p * 0.05 + self.id).sin() * self.drift * 15.0,
                self.y + p * self.speed * 0.5,
            ),
            Style::Ambient => (
                self.x + (p * self.drift + self.id).sin() * 12.0,
                self.y - p * self.speed * 0.3,
            ),
        };
        let pulse = (p * 0.1 + self.id * 2.0).sin() * 0.25 + 0.75;
        let in_bounds = (-5.0..=105.0).contains(&x) && (-5.0..=105.0).contains(&y);
        Some(Particle {
            x,
            y,
            size: self.size,
            opacity: if in_bounds { pulse * 0.5 } else { 0.0 },
        })
    }
}

/// Drifting glow particles in one of three motion styles.
pub struct GlowingParticles;

impl OverlayRenderer for GlowingParticles {
    fn name(&self) -> &str {
        "Glowing Particles"
    }

    fn kinds(&self) -> &[OverlayKind] {
        &[OverlayKind::GlowingParticles]
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        overlay: &OverlayAssignment,
        frame: i64,
    ) -> Option<Visual> {
        let f = ctx.local_frame(frame)?;
        let style_name = prop_or(overlay, "style", "ambient");
        let style = Style::parse(style_name);
        let count = (num_or(overlay, "count", 20.0).max(0.0) as usize).min(MAX_PARTICLES);
        let rng = SeededRandom::from_key(&ctx.seed_key());

        let particles = (0..count)
            .filter_map(|i| Seed::new(style, &rng, i, count).sample(style, f))
            .collect();

        let content = VisualContent::Particles {
            color: prop_or(overlay, "color", "#6366f1").to_string(),
            style: style_name.to_string(),
            particles,
        };
        Some(
            Visual::new(OverlayKind::GlowingParticles, content)
                .with_opacity(visible_opacity(fade_in(f, 10.0), fade_out(f, ctx.duration(), 15.0))),
        )
    }
}
