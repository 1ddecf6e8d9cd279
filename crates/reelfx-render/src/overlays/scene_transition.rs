use reelfx_core::{interpolate, spring, Extrapolate, SpringConfig};
use reelfx_timeline::{OverlayAssignment, OverlayKind};

use super::prop_or;
use crate::envelope::{fade_in, fade_out, lerp, visible_opacity};
use crate::renderer::OverlayRenderer;
use crate::visual::{RenderContext, Visual, VisualContent};

const LINE: SpringConfig = SpringConfig::new(20.0, 80.0, 0.5);

/// Wipe, zoom pulse or light flash marking a change of topic.
pub struct SceneTransition;

impl OverlayRenderer for SceneTransition {
    fn name(&self) -> &str {
        "Scene Transition"
    }

    fn kinds(&self) -> &[OverlayKind] {
        &[OverlayKind::SceneTransition]
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        overlay: &OverlayAssignment,
        frame: i64,
    ) -> Option<Visual> {
        let f = ctx.local_frame(frame)?;
        let dur = ctx.duration();
        let style = prop_or(overlay, "style", "fade");

        let (progress, opacity, scale) = match style {
            "wipe" => {
                let sweep = interpolate(f, &[0.0, dur], &[0.0, 1.0], Extrapolate::Clamp);
                let position = lerp(sweep, -5.0, 105.0);
                (position, visible_opacity(fade_in(f, 3.0), fade_out(f, dur, 3.0)), 1.0)
            }
            "zoom" => {
                let mid = dur / 2.0;
                let pulse = interpolate(f, &[0.0, mid, dur], &[0.0, 1.0, 0.0], Extrapolate::Clamp);
                (pulse, pulse, 1.0)
            }
            _ => {
                let flash = interpolate(
                    f,
                    &[0.0, 3.0, 6.0, 15.0],
                    &[0.0, 1.0, 0.3, 0.0],
                    Extrapolate::Clamp,
                );
                (flash, visible_opacity(flash, fade_out(f, dur, 8.0)), spring(f, ctx.fps, LINE))
            }
        };

        let content = VisualContent::Transition {
            style: style.to_string(),
            color: prop_or(overlay, "color", "#6366f1").to_string(),
            progress,
        };
        Some(
            Visual::new(OverlayKind::SceneTransition, content)
                .with_opacity(opacity)
                .with_scale(scale),
        )
    }
}
