//! Built-in overlay renderers.

mod captions;
mod dynamic_broll;
mod emoji;
mod highlight;
mod illustration;
mod kinetic_text;
mod lower_third;
mod media_card;
mod particles;
mod scene_transition;
mod zoom;

pub use captions::Captions;
pub use dynamic_broll::DynamicBroll;
pub use emoji::EmojiReaction;
pub use highlight::HighlightBox;
pub use illustration::Illustration;
pub use kinetic_text::KineticText;
pub use lower_third::LowerThird;
pub use media_card::MediaCard;
pub use particles::GlowingParticles;
pub use scene_transition::SceneTransition;
pub use zoom::ZoomEffect;

use reelfx_timeline::OverlayAssignment;

/// String prop with a fallback for missing or empty values.
pub(crate) fn prop_or<'a>(overlay: &'a OverlayAssignment, key: &str, default: &'a str) -> &'a str {
    overlay.prop_str(key).unwrap_or(default)
}

/// Numeric prop with a fallback.
pub(crate) fn num_or(overlay: &OverlayAssignment, key: &str, default: f64) -> f64 {
    overlay.prop_f64(key).filter(|v| v.is_finite()).unwrap_or(default)
}

/// Whitespace-separated words of `text`.
pub(crate) fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
