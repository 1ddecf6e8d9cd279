//! ReelFX Render - Overlay animation sampling
//!
//! Every overlay kind is rendered by a pure function of its props and the
//! current frame, producing a [`Visual`] description that a host player
//! draws. The compositor stacks the visible overlays for one frame and
//! decides whether the base video stays visible underneath.

pub mod compositor;
pub mod envelope;
pub mod overlays;
pub mod renderer;
pub mod visual;

pub use compositor::{compose_frame, CompositeFrame, CompositeLayer, CompositorConfig};
pub use renderer::{render_segment, OverlayRenderer, RendererRegistry};
pub use visual::{Particle, RenderContext, Visual, VisualContent, WordState};
