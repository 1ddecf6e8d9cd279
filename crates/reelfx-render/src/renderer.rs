//! Renderer contract and registry.

use reelfx_core::FrameRate;
use reelfx_timeline::{OverlayAssignment, OverlayKind, Segment};
use tracing::debug;

use crate::overlays;
use crate::visual::{RenderContext, Visual};

/// Samples one overlay family.
///
/// Implementations must be pure: the same context, overlay and frame always
/// give the same [`Visual`], and `None` is returned for any frame outside
/// `ctx.window`.
pub trait OverlayRenderer: Send + Sync {
    /// Get the renderer name.
    fn name(&self) -> &str;

    /// Overlay kinds this renderer draws.
    fn kinds(&self) -> &[OverlayKind];

    /// Render `overlay` at absolute `frame`.
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        overlay: &OverlayAssignment,
        frame: i64,
    ) -> Option<Visual>;
}

/// Registry of overlay renderers.
pub struct RendererRegistry {
    renderers: Vec<Box<dyn OverlayRenderer>>,
}

impl RendererRegistry {
    /// Create a new registry with all built-in renderers.
    pub fn new() -> Self {
        let mut reg = Self {
            renderers: Vec::new(),
        };
        reg.register(Box::new(overlays::Illustration));
        reg.register(Box::new(overlays::EmojiReaction));
        reg.register(Box::new(overlays::GlowingParticles));
        reg.register(Box::new(overlays::LowerThird));
        reg.register(Box::new(overlays::HighlightBox));
        reg.register(Box::new(overlays::ZoomEffect));
        reg.register(Box::new(overlays::SceneTransition));
        reg.register(Box::new(overlays::KineticText));
        reg.register(Box::new(overlays::MediaCard));
        reg.register(Box::new(overlays::Captions));
        reg.register(Box::new(overlays::DynamicBroll));
        reg
    }

    /// Register a custom renderer. Later registrations take precedence for
    /// the kinds they claim.
    pub fn register(&mut self, renderer: Box<dyn OverlayRenderer>) {
        self.renderers.push(renderer);
    }

    /// Find the renderer for an overlay kind.
    pub fn find_for(&self, kind: OverlayKind) -> Option<&dyn OverlayRenderer> {
        self.renderers
            .iter()
            .rev()
            .find(|r| r.kinds().contains(&kind))
            .map(|r| r.as_ref())
    }

    /// Find a renderer by name.
    pub fn find(&self, name: &str) -> Option<&dyn OverlayRenderer> {
        self.renderers
            .iter()
            .find(|r| r.name() == name)
            .map(|r| r.as_ref())
    }

    /// Get all registered renderer names.
    pub fn names(&self) -> Vec<&str> {
        self.renderers.iter().map(|r| r.name()).collect()
    }

    /// Render `overlay` with whichever renderer handles its kind.
    pub fn render(
        &self,
        ctx: &RenderContext<'_>,
        overlay: &OverlayAssignment,
        frame: i64,
    ) -> Option<Visual> {
        match self.find_for(overlay.kind) {
            Some(renderer) => renderer.render(ctx, overlay, frame),
            None => {
                debug!(kind = %overlay.kind, "no renderer registered");
                None
            }
        }
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a segment's overlay at `frame`, if it has one and is visible.
pub fn render_segment(
    registry: &RendererRegistry,
    segment: &Segment,
    rate: FrameRate,
    frame: i64,
) -> Option<Visual> {
    let overlay = segment.overlay.as_ref()?;
    let ctx =
        RenderContext::new(segment.window(rate), rate.to_fps_f64(), &segment.id, &segment.text);
    registry.render(&ctx, overlay, frame)
}
