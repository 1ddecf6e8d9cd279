//! Integration tests for overlay assignment.
//!
//! Runs the engine against scripted providers and feeds the result through
//! the renderer, exercising reelfx-ai, reelfx-timeline and reelfx-render
//! together.

use async_trait::async_trait;
use reelfx_ai::{AssignmentSource, OverlayEngine, OverlayProvider, ProviderFailure};
use reelfx_core::FrameRate;
use reelfx_render::{compose_frame, CompositorConfig, RendererRegistry, VisualContent};
use reelfx_timeline::{OverlayKind, Segment};
use std::sync::Mutex;
use std::time::Duration;

// ── Helpers ────────────────────────────────────────────────────

fn transcript() -> Vec<Segment> {
    vec![
        Segment::new("s1", 0.0, 3.0, "the rocket launch was incredible"),
        Segment::new("s2", 3.0, 6.0, "um yeah so"),
        Segment::new("s3", 6.0, 9.0, "revenue grew 50 percent"),
    ]
}

fn scene_of(segment: &Segment) -> Option<&str> {
    segment.overlay.as_ref().and_then(|o| o.prop_str("scene"))
}

/// Replays canned replies in order, then fails permanently.
struct Scripted {
    name: &'static str,
    replies: Mutex<Vec<Result<String, ProviderFailure>>>,
}

impl Scripted {
    fn boxed(
        name: &'static str,
        mut replies: Vec<Result<String, ProviderFailure>>,
    ) -> Box<dyn OverlayProvider> {
        replies.reverse();
        Box::new(Self {
            name,
            replies: Mutex::new(replies),
        })
    }

    fn always_failing(name: &'static str) -> Box<dyn OverlayProvider> {
        Self::boxed(name, (0..10).map(|_| Err(ProviderFailure::transient("HTTP 503"))).collect())
    }
}

#[async_trait]
impl OverlayProvider for Scripted {
    fn name(&self) -> &str {
        self.name
    }

    async fn complete(&self, _prompt: &str) -> Result<String, ProviderFailure> {
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(ProviderFailure::permanent("script exhausted")))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn all_providers_failing_falls_back_to_keyword_scenes() {
    let engine = OverlayEngine::with_providers(
        vec![Scripted::always_failing("primary"), Scripted::always_failing("secondary")],
        3,
        Duration::ZERO,
    );
    let report = engine.assign_overlays_for_transcript(&transcript()).await;

    assert_eq!(report.source, AssignmentSource::LocalFallback);
    assert!(report.degraded());
    assert_eq!(report.attempts.len(), 6);
    assert!(report.attempts.iter().all(|a| a.transient));

    assert_eq!(scene_of(&report.segments[0]), Some("rocket-launch"));
    assert!(report.segments[1].overlay.is_none());
    assert_eq!(scene_of(&report.segments[2]), Some("growth-chart"));

    // the assigned illustration is what gets drawn over s1
    let registry = RendererRegistry::new();
    let config = CompositorConfig::default();
    let frame = compose_frame(&report.segments, FrameRate::FPS_30, 45, &registry, &config);
    assert!(frame.show_base_video);
    assert_eq!(frame.layers.len(), 1);
    match &frame.layers[0].visual.content {
        VisualContent::Illustration { scene, display_mode, .. } => {
            assert_eq!(scene, "rocket-launch");
            assert_eq!(display_mode, "full");
        }
        other => panic!("unexpected content {other:?}"),
    }
}

#[tokio::test]
async fn rate_limited_provider_recovers_on_retry() {
    let reply = r#"Here you go:
        [{"segmentId":"s2","type":"visual-illustration",
          "props":{"scene":"camera","label":"Rolling"}},
         {"segmentId":"nope","type":"visual-illustration","props":{"scene":"globe"}}]"#;
    let engine = OverlayEngine::with_providers(
        vec![
            Scripted::boxed(
                "primary",
                vec![Err(ProviderFailure::transient("HTTP 429")), Ok(reply.to_string())],
            ),
            Scripted::always_failing("secondary"),
        ],
        3,
        Duration::ZERO,
    );
    let report = engine.assign_overlays_for_transcript(&transcript()).await;

    assert_eq!(report.source, AssignmentSource::Provider("primary".into()));
    assert!(!report.degraded());
    let trail: Vec<_> = report.attempts.iter().map(|a| (a.provider.as_str(), a.attempt)).collect();
    assert_eq!(trail, [("primary", 1), ("primary", 2)]);

    assert!(report.segments[0].overlay.is_none());
    assert_eq!(scene_of(&report.segments[1]), Some("camera"));
    assert_eq!(report.overlay_count(), 1);

    let registry = RendererRegistry::new();
    let config = CompositorConfig::default();
    let during = compose_frame(&report.segments, FrameRate::FPS_30, 135, &registry, &config);
    assert_eq!(during.layers.len(), 1);
    assert_eq!(during.layers[0].segment_id, "s2");
    let after = compose_frame(&report.segments, FrameRate::FPS_30, 181, &registry, &config);
    assert!(after.is_empty());
}

#[tokio::test]
async fn offline_reaction_request_renders_emoji() {
    let engine = OverlayEngine::offline();
    let overlay = engine
        .assign_overlay_for_prompt("so then he said it", "add a funny reaction")
        .await
        .unwrap();
    assert_eq!(overlay.kind, OverlayKind::EmojiReaction);
    assert_eq!(overlay.prop_str("emoji"), Some("😂"));

    let segments = vec![Segment::new("s1", 0.0, 2.0, "so then he said it").with_overlay(overlay)];
    let registry = RendererRegistry::new();
    let config = CompositorConfig::default();
    let frame = compose_frame(&segments, FrameRate::FPS_30, 20, &registry, &config);
    match &frame.layers[0].visual.content {
        VisualContent::Emoji { emoji, .. } => assert_eq!(emoji, "😂"),
        other => panic!("unexpected content {other:?}"),
    }
    assert_eq!(frame.layers[0].visual.opacity, 1.0);
}

#[tokio::test]
async fn local_assignment_is_deterministic() {
    let segments: Vec<Segment> = (0..12)
        .map(|i| {
            let start = i as f64 * 2.0;
            Segment::new(format!("s{i}"), start, start + 2.0, "and then we kept going")
        })
        .collect();
    let engine = OverlayEngine::offline();
    let a = engine.assign_overlays_for_transcript(&segments).await;
    let b = engine.assign_overlays_for_transcript(&segments).await;
    assert_eq!(a.segments, b.segments);
    assert!(!a.degraded());

    let assigned: Vec<usize> = a
        .segments
        .iter()
        .enumerate()
        .filter(|(_, s)| s.has_overlay())
        .map(|(i, _)| i)
        .collect();
    assert!(assigned.windows(2).all(|w| w[1] - w[0] >= 2));
}
