use reelfx_core::{spring, SpringConfig};
use reelfx_timeline::{OverlayAssignment, OverlayKind};

use super::prop_or;
use crate::envelope::{exit_progress, fade_in, lerp, visible_opacity};
use crate::renderer::OverlayRenderer;
use crate::visual::{RenderContext, Visual, VisualContent};

const FADE_IN: SpringConfig = SpringConfig::new(12.0, 100.0, 0.8);
const SLIDE_IN: SpringConfig = SpringConfig::new(14.0, 80.0, 0.8);
const APPEAR: SpringConfig = SpringConfig::new(8.0, 150.0, 0.5);

const EXIT_FRAMES: f64 = 12.0;
const SLIDE_DISTANCE: f64 = 80.0;

/// Animated scene from the illustration catalog.
pub struct Illustration;

impl OverlayRenderer for Illustration {
    fn name(&self) -> &str {
        "Visual Illustration"
    }

    fn kinds(&self) -> &[OverlayKind] {
        &[OverlayKind::VisualIllustration]
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        overlay: &OverlayAssignment,
        frame: i64,
    ) -> Option<Visual> {
        let f = ctx.local_frame(frame)?;

        let transition = prop_or(overlay, "transition", "fade-in");
        let (enter_opacity, enter_scale, translate_y) = match transition {
            "slide-in" => {
                let p = spring(f, ctx.fps, SLIDE_IN);
                (fade_in(f, 6.0), p, (1.0 - p) * SLIDE_DISTANCE)
            }
            "appear" => (if f >= 1.0 { 1.0 } else { 0.0 }, spring(f, ctx.fps, APPEAR), 0.0),
            _ => (fade_in(f, 8.0), spring(f, ctx.fps, FADE_IN), 0.0),
        };

        let exit = exit_progress(f, ctx.duration(), EXIT_FRAMES);
        let display_mode = prop_or(overlay, "displayMode", "overlay");
        // these two modes slide in from above
        let translate_y = match display_mode {
            "fade-down" | "split-top" => -translate_y,
            _ => translate_y,
        };
        let background_dim = match display_mode {
            "full" | "fit" => 0.3,
            _ => 0.15,
        };

        let content = VisualContent::Illustration {
            scene: prop_or(overlay, "scene", "solar-system").to_string(),
            label: prop_or(overlay, "label", "").to_string(),
            color: prop_or(overlay, "color", "#6366f1").to_string(),
            display_mode: display_mode.to_string(),
            background_dim,
        };
        Some(
            Visual::new(OverlayKind::VisualIllustration, content)
                .with_opacity(visible_opacity(enter_opacity, 1.0 - exit))
                .with_scale(enter_scale * lerp(exit, 1.0, 0.85))
                .with_offset(0.0, translate_y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelfx_core::FrameWindow;

    fn ctx() -> RenderContext<'static> {
        RenderContext::new(FrameWindow::new(0, 90), 30.0, "s1", "the rocket launch")
    }

    fn overlay(transition: &str, mode: &str) -> OverlayAssignment {
        OverlayAssignment::with_defaults(OverlayKind::VisualIllustration)
            .with_prop("scene", "rocket-launch")
            .with_prop("transition", transition)
            .with_prop("displayMode", mode)
    }

    #[test]
    fn test_fade_in_entry_and_exit() {
        let o = overlay("fade-in", "full");
        let first = Illustration.render(&ctx(), &o, 0).unwrap();
        assert_eq!(first.opacity, 0.0);
        assert_eq!(first.scale, 0.0);

        let mid = Illustration.render(&ctx(), &o, 45).unwrap();
        assert_eq!(mid.opacity, 1.0);
        assert!((mid.scale - 1.0).abs() < 0.02);

        let last = Illustration.render(&ctx(), &o, 90).unwrap();
        assert_eq!(last.opacity, 0.0);
        assert!(last.scale < 0.86);

        match mid.content {
            VisualContent::Illustration { scene, background_dim, .. } => {
                assert_eq!(scene, "rocket-launch");
                assert_eq!(background_dim, 0.3);
            }
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn test_slide_in_direction_follows_display_mode() {
        let up = Illustration.render(&ctx(), &overlay("slide-in", "fade-up"), 2).unwrap();
        let down = Illustration.render(&ctx(), &overlay("slide-in", "fade-down"), 2).unwrap();
        assert!(up.offset_y > 0.0);
        assert_eq!(down.offset_y, -up.offset_y);
    }

    #[test]
    fn test_appear_is_instant() {
        let o = overlay("appear", "card");
        assert_eq!(Illustration.render(&ctx(), &o, 0).unwrap().opacity, 0.0);
        let v = Illustration.render(&ctx(), &o, 1).unwrap();
        assert_eq!(v.opacity, 1.0);
        match v.content {
            VisualContent::Illustration { background_dim, .. } => assert_eq!(background_dim, 0.15),
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn test_hidden_outside_window() {
        let o = overlay("fade-in", "full");
        assert!(Illustration.render(&ctx(), &o, -1).is_none());
        assert!(Illustration.render(&ctx(), &o, 91).is_none());
    }
}
