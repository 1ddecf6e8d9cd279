use reelfx_core::{interpolate, spring, Extrapolate, SpringConfig};
use reelfx_timeline::{OverlayAssignment, OverlayKind};

use super::{prop_or, words};
use crate::envelope::{delayed_spring, fade_in, fade_out, lerp, visible_opacity};
use crate::renderer::OverlayRenderer;
use crate::visual::{RenderContext, Visual, VisualContent, WordState};

const SUBTITLE_CONTAINER: SpringConfig = SpringConfig::new(12.0, 120.0, 0.8);
const MOTION_CONTAINER: SpringConfig = SpringConfig::new(14.0, 100.0, 0.8);
const MOTION_WORD: SpringConfig = SpringConfig::new(12.0, 180.0, 1.0);

/// Longer-than-three-letter words that are never emphasised.
const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "before", "been", "being", "below", "between", "both",
    "because", "could", "dare", "does", "during", "each", "from", "further", "have", "into", "just",
    "might", "more", "most", "need", "once", "only", "other", "ought", "over", "same", "shall",
    "should", "some", "such", "than", "that", "their", "them", "then", "these", "this", "those",
    "through", "under", "until", "very", "were", "what", "which", "while", "whom", "will", "with",
    "would", "your",
];

/// Whether `word` carries meaning worth emphasising.
fn is_key_word(word: &str) -> bool {
    let clean: String = word
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    clean.len() > 3 && !STOP_WORDS.contains(&clean.as_str())
}

/// Fraction of the window elapsed; a zero-length window counts as finished.
fn progress(local: f64, duration: f64) -> f64 {
    if duration > 0.0 {
        (local / duration).min(1.0)
    } else {
        1.0
    }
}

/// Spoken-word captions for the segment text, highlighting the current word.
///
/// Handles both caption families: `animated-subtitles` staggers words in
/// two frames apart, `transcript-motion` spreads them across the window
/// and emphasises content words.
pub struct Captions;

impl OverlayRenderer for Captions {
    fn name(&self) -> &str {
        "Captions"
    }

    fn kinds(&self) -> &[OverlayKind] {
        &[OverlayKind::AnimatedSubtitles, OverlayKind::TranscriptMotion]
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        overlay: &OverlayAssignment,
        frame: i64,
    ) -> Option<Visual> {
        let f = ctx.local_frame(frame)?;
        let dur = ctx.duration();
        let words = words(ctx.text);
        let count = words.len();
        let current =
            ((progress(f, dur) * count as f64).floor() as usize).min(count.saturating_sub(1));
        let motion = overlay.kind == OverlayKind::TranscriptMotion;
        let frames_per_word = if count > 0 { dur / count as f64 } else { 0.0 };

        let words = words
            .into_iter()
            .enumerate()
            .map(|(i, word)| {
                let (delay, fade_frames) = if motion {
                    ((i as f64 * frames_per_word).floor(), 4.0)
                } else {
                    (i as f64 * 2.0, 5.0)
                };
                let appear = (f - delay).max(0.0);
                let scale = if motion {
                    lerp(delayed_spring(f, delay, ctx.fps, MOTION_WORD), 0.6, 1.0)
                } else {
                    1.0
                };
                WordState {
                    text: word.to_string(),
                    scale,
                    opacity: interpolate(
                        appear,
                        &[0.0, fade_frames],
                        &[0.0, 1.0],
                        Extrapolate::Clamp,
                    ),
                    active: i == current,
                    emphasis: motion && is_key_word(word),
                }
            })
            .collect();

        let (container, default_style) = if motion {
            (MOTION_CONTAINER, "karaoke")
        } else {
            (SUBTITLE_CONTAINER, "default")
        };
        let content = VisualContent::Words {
            color: prop_or(overlay, "highlightColor", prop_or(overlay, "color", "#6366f1"))
                .to_string(),
            style: prop_or(overlay, "style", default_style).to_string(),
            words,
        };
        Some(
            Visual::new(overlay.kind, content)
                .with_opacity(visible_opacity(fade_in(f, 8.0), fade_out(f, dur, 10.0)))
                .with_scale(spring(f, ctx.fps, container)),
        )
    }
}
