use reelfx_core::{spring, SpringConfig};
use reelfx_timeline::{OverlayAssignment, OverlayKind};

use super::prop_or;
use crate::envelope::{delayed_spring, exit_progress, lerp, visible_opacity};
use crate::renderer::OverlayRenderer;
use crate::visual::{RenderContext, Visual, VisualContent};

const BAR: SpringConfig = SpringConfig::new(16.0, 150.0, 0.6);
const PANEL: SpringConfig = SpringConfig::new(14.0, 100.0, 0.7);
const TEXT: SpringConfig = SpringConfig::new(14.0, 100.0, 1.0);

const EXIT_FRAMES: f64 = 15.0;
const EXIT_SLIDE: f64 = -300.0;

/// Name and title strap: accent bar, then panel, then the two text lines.
pub struct LowerThird;

impl OverlayRenderer for LowerThird {
    fn name(&self) -> &str {
        "Lower Third"
    }

    fn kinds(&self) -> &[OverlayKind] {
        &[OverlayKind::LowerThird]
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        overlay: &OverlayAssignment,
        frame: i64,
    ) -> Option<Visual> {
        let f = ctx.local_frame(frame)?;
        let bar = spring(f, ctx.fps, BAR);
        let exit = exit_progress(f, ctx.duration(), EXIT_FRAMES);

        let content = VisualContent::LowerThird {
            name: prop_or(overlay, "name", "Creator").to_string(),
            title: prop_or(overlay, "title", "Title").to_string(),
            color: prop_or(overlay, "color", "#6366f1").to_string(),
            bar,
            panel: delayed_spring(f, 5.0, ctx.fps, PANEL),
            name_reveal: delayed_spring(f, 10.0, ctx.fps, TEXT),
            title_reveal: delayed_spring(f, 16.0, ctx.fps, TEXT),
        };
        Some(
            Visual::new(OverlayKind::LowerThird, content)
                .with_opacity(visible_opacity(bar, 1.0 - exit))
                .with_offset(lerp(exit, 0.0, EXIT_SLIDE), 0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelfx_core::FrameWindow;

    #[test]
    fn test_staggered_reveal() {
        let ctx = RenderContext::new(FrameWindow::new(0, 120), 30.0, "s1", "I'm Ana");
        let o = OverlayAssignment::with_defaults(OverlayKind::LowerThird).with_prop("name", "Ana");
        let v = LowerThird.render(&ctx, &o, 8).unwrap();
        match v.content {
            VisualContent::LowerThird {
                name,
                bar,
                panel,
                name_reveal,
                title_reveal,
                ..
            } => {
                assert_eq!(name, "Ana");
                assert!(bar > panel);
                assert!(panel > 0.0);
                assert_eq!(name_reveal, 0.0);
                assert_eq!(title_reveal, 0.0);
            }
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn test_slides_out_left() {
        let ctx = RenderContext::new(FrameWindow::new(0, 120), 30.0, "s1", "x");
        let o = OverlayAssignment::with_defaults(OverlayKind::LowerThird);
        assert_eq!(LowerThird.render(&ctx, &o, 100).unwrap().offset_x, 0.0);
        let end = LowerThird.render(&ctx, &o, 120).unwrap();
        assert_eq!(end.offset_x, EXIT_SLIDE);
        assert_eq!(end.opacity, 0.0);
    }
}
