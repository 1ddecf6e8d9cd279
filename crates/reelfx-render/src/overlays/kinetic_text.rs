use reelfx_core::{interpolate, Extrapolate, SpringConfig};
use reelfx_timeline::{OverlayAssignment, OverlayKind};

use super::{prop_or, words};
use crate::envelope::{delayed_spring, exit_progress, fade_in, lerp, visible_opacity};
use crate::renderer::OverlayRenderer;
use crate::visual::{RenderContext, Visual, VisualContent, WordState};

const WORD: SpringConfig = SpringConfig::new(12.0, 280.0, 0.4);
const WORD_STAGGER: f64 = 3.0;
const EXIT_FRAMES: f64 = 18.0;

/// Word-by-word pop of the spoken line.
pub struct KineticText;

impl OverlayRenderer for KineticText {
    fn name(&self) -> &str {
        "Kinetic Text"
    }

    fn kinds(&self) -> &[OverlayKind] {
        &[OverlayKind::KineticText]
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        overlay: &OverlayAssignment,
        frame: i64,
    ) -> Option<Visual> {
        let f = ctx.local_frame(frame)?;
        let text = prop_or(overlay, "text", ctx.text);
        let exit = exit_progress(f, ctx.duration(), EXIT_FRAMES);
        let newest = (f / WORD_STAGGER).floor();

        let words = words(text)
            .into_iter()
            .enumerate()
            .map(|(i, word)| {
                let delay = i as f64 * WORD_STAGGER;
                let pop = delayed_spring(f, delay, ctx.fps, WORD);
                WordState {
                    text: word.to_string(),
                    scale: lerp(pop, 0.3, 1.0),
                    opacity: interpolate(
                        (f - delay).max(0.0),
                        &[0.0, 2.0, 5.0],
                        &[0.0, 0.7, 1.0],
                        Extrapolate::Clamp,
                    ),
                    active: i as f64 == newest,
                    emphasis: false,
                }
            })
            .collect();

        let content = VisualContent::Words {
            color: prop_or(overlay, "color", "#6366f1").to_string(),
            style: prop_or(overlay, "style", "pop").to_string(),
            words,
        };
        Some(
            Visual::new(OverlayKind::KineticText, content)
                .with_opacity(visible_opacity(fade_in(f, 5.0), 1.0 - exit))
                .with_scale(lerp(exit, 1.0, 0.88))
                .with_offset(0.0, lerp(exit, 0.0, 25.0)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelfx_core::FrameWindow;

    #[test]
    fn test_words_pop_in_sequence() {
        let ctx =
            RenderContext::new(FrameWindow::new(0, 90), 30.0, "s1", "this changes everything");
        let o = OverlayAssignment::with_defaults(OverlayKind::KineticText);
        let v = KineticText.render(&ctx, &o, 4).unwrap();
        let VisualContent::Words { words, .. } = v.content else {
            panic!("expected words");
        };
        assert_eq!(words.len(), 3);
        assert!(words[0].opacity > words[1].opacity);
        assert_eq!(words[2].opacity, 0.0);
        assert_eq!(words[2].scale, 0.3);
        assert!(words[1].active);
    }

    #[test]
    fn test_text_prop_overrides_segment() {
        let ctx = RenderContext::new(FrameWindow::new(0, 90), 30.0, "s1", "spoken words here");
        let o = OverlayAssignment::with_defaults(OverlayKind::KineticText)
            .with_prop("text", "BIG NEWS");
        let VisualContent::Words { words, .. } = KineticText.render(&ctx, &o, 40).unwrap().content
        else {
            panic!("expected words");
        };
        let texts: Vec<_> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, ["BIG", "NEWS"]);
    }
}
