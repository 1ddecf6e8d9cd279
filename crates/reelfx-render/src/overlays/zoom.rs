use reelfx_timeline::{OverlayAssignment, OverlayKind};

use super::num_or;
use crate::envelope::{fade_in, fade_out, lerp, visible_opacity};
use crate::renderer::OverlayRenderer;
use crate::visual::{RenderContext, Visual, VisualContent};

const EASE_FRAMES: f64 = 8.0;
const BORDER_OPACITY: f64 = 0.6;

/// Punch-in on the base video, framed by a thin accent border.
pub struct ZoomEffect;

impl OverlayRenderer for ZoomEffect {
    fn name(&self) -> &str {
        "Zoom Effect"
    }

    fn kinds(&self) -> &[OverlayKind] {
        &[OverlayKind::ZoomEffect]
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        overlay: &OverlayAssignment,
        frame: i64,
    ) -> Option<Visual> {
        let f = ctx.local_frame(frame)?;
        let target = num_or(overlay, "scale", 1.3).max(1.0);
        let amount =
            visible_opacity(fade_in(f, EASE_FRAMES), fade_out(f, ctx.duration(), EASE_FRAMES));
        let scale = lerp(amount, 1.0, target);

        Some(
            Visual::new(
                OverlayKind::ZoomEffect,
                VisualContent::Zoom {
                    scale,
                    border_opacity: BORDER_OPACITY * amount,
                },
            )
            .with_opacity(amount)
            .with_scale(scale),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelfx_core::FrameWindow;

    #[test]
    fn test_zoom_eases_in_and_out() {
        let ctx = RenderContext::new(FrameWindow::new(0, 60), 30.0, "s1", "look");
        let o = OverlayAssignment::with_defaults(OverlayKind::ZoomEffect);
        assert_eq!(ZoomEffect.render(&ctx, &o, 0).unwrap().scale, 1.0);
        let mid = ZoomEffect.render(&ctx, &o, 30).unwrap();
        assert!((mid.scale - 1.3).abs() < 1e-9);
        match mid.content {
            VisualContent::Zoom { border_opacity, .. } => {
                assert!((border_opacity - 0.6).abs() < 1e-9)
            }
            other => panic!("unexpected content {other:?}"),
        }
        assert_eq!(ZoomEffect.render(&ctx, &o, 60).unwrap().scale, 1.0);
    }
}
