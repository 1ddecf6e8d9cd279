//! Overlay assignment engine.
//!
//! Two entry points: [`OverlayEngine::assign_overlays_for_transcript`] places
//! illustrations over a whole transcript, and
//! [`OverlayEngine::assign_overlay_for_prompt`] picks one overlay for a single
//! segment from a user instruction. Both try the provider cascade first and
//! fall back to deterministic keyword matching. Neither can fail: provider
//! problems only show up in the attempt log and in
//! [`AssignmentReport::degraded`].

use reelfx_core::{stable_hash, Color};
use reelfx_timeline::{OverlayAssignment, OverlayKind, OverlayProps, Segment};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::cascade::{run_cascade, AttemptRecord, CascadePolicy};
use crate::config::EngineConfig;
use crate::error::AiResult;
use crate::parse::{parse_batch, parse_single, RawOverlay, SuggestionRecord};
use crate::prompt::{batch_prompt, single_prompt};
use crate::provider::{HttpProvider, OverlayProvider, ProviderFailure};
use crate::scenes::{classify, fallback_scene, find_scene, scene_or_fallback, Scene};

/// Minimum distance, in segment positions, between two local assignments.
pub const MIN_SPACING: usize = 2;

/// Longest label derived from segment text.
pub const LABEL_MAX_CHARS: usize = 50;

pub const DISPLAY_MODES: &[&str] = &[
    "full", "fit", "overlay", "card", "fade-up", "fade-down", "split-top", "split-bottom",
];

pub const TRANSITIONS: &[&str] = &["slide-in", "fade-in", "appear"];

/// Kinds a single-segment request may come back with.
pub const SINGLE_ALLOWED: &[OverlayKind] = &[
    OverlayKind::VisualIllustration,
    OverlayKind::GlowingParticles,
    OverlayKind::SceneTransition,
    OverlayKind::EmojiReaction,
];

/// Prompt keywords that ask for an emotional reaction, with the emoji used.
const REACTIONS: &[(&[&str], &str)] = &[
    (&["funny", "laugh", "hilarious", "joke", "humor"], "😂"),
    (&["wow", "surpris", "shock", "omg", "unexpected"], "😮"),
    (&["love", "heart", "adore"], "❤️"),
    (&["sad", "cry", "tears"], "😢"),
    (&["angry", "furious", "annoy"], "😡"),
    (&["awesome", "excit", "hype", "amazing", "incredible"], "🔥"),
    (&["react", "emoji", "emotion", "feel"], "🔥"),
];

/// Where a batch result came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentSource {
    /// Named remote provider.
    Provider(String),
    LocalFallback,
}

/// Outcome of a batch assignment.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentReport {
    pub segments: Vec<Segment>,
    pub source: AssignmentSource,
    pub attempts: Vec<AttemptRecord>,
}

impl AssignmentReport {
    /// True when providers were tried and none produced a usable result.
    pub fn degraded(&self) -> bool {
        self.source == AssignmentSource::LocalFallback && !self.attempts.is_empty()
    }

    pub fn overlay_count(&self) -> usize {
        self.segments.iter().filter(|s| s.has_overlay()).count()
    }
}

/// Assigns overlays to transcript segments.
pub struct OverlayEngine {
    providers: Vec<Box<dyn OverlayProvider>>,
    max_retries: u32,
    retry_delay: Duration,
}

impl OverlayEngine {
    /// Build HTTP providers from `config`.
    ///
    /// Keys are taken as they are; call [`EngineConfig::resolve_keys`] first
    /// to pull them from the environment. Providers that expect an
    /// environment key which is not set are left out.
    pub fn from_config(config: &EngineConfig) -> AiResult<Self> {
        config.validate()?;
        let mut providers: Vec<Box<dyn OverlayProvider>> =
            Vec::with_capacity(config.providers.len());
        for provider in &config.providers {
            if provider.api_key_env.is_some() && !provider.has_key() {
                warn!(provider = %provider.name, "skipping provider without API key");
                continue;
            }
            let http = HttpProvider::new(provider.clone(), config.request_timeout())?;
            providers.push(Box::new(http));
        }
        info!(
            providers = providers.len(),
            max_retries = config.max_retries,
            "overlay engine ready"
        );
        Ok(Self::with_providers(providers, config.max_retries, config.retry_delay()))
    }

    pub fn with_providers(
        providers: Vec<Box<dyn OverlayProvider>>,
        max_retries: u32,
        retry_delay: Duration,
    ) -> Self {
        Self {
            providers,
            max_retries,
            retry_delay,
        }
    }

    /// Engine with no remote providers.
    pub fn offline() -> Self {
        Self::with_providers(Vec::new(), 1, Duration::ZERO)
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    fn policy(&self) -> CascadePolicy {
        CascadePolicy::new(self.providers.len(), self.max_retries)
    }

    /// Place illustrations over a transcript.
    pub async fn assign_overlays_for_transcript(&self, segments: &[Segment]) -> AssignmentReport {
        if segments.is_empty() {
            return AssignmentReport {
                segments: Vec::new(),
                source: AssignmentSource::LocalFallback,
                attempts: Vec::new(),
            };
        }

        // assignment starts from bare segments; stale overlays never leak through
        let segments: Vec<Segment> = segments.iter().map(without_overlay).collect();
        let segments = segments.as_slice();

        let prompt = batch_prompt(segments);
        let run = run_cascade(&self.providers, self.policy(), self.retry_delay, &prompt, |content| {
            let records =
                parse_batch(content).map_err(|e| ProviderFailure::permanent(e.to_string()))?;
            let valid = validate_batch(segments, records);
            if valid.is_empty() {
                Err(ProviderFailure::permanent("no usable suggestions in reply"))
            } else {
                Ok(valid)
            }
        })
        .await;

        let (assigned, source) = match (run.value, run.provider) {
            (Some(overlays), Some(provider)) => {
                info!(
                    provider = %provider,
                    overlays = overlays.len(),
                    "applied provider suggestions"
                );
                (merge_overlays(segments, overlays), AssignmentSource::Provider(provider))
            }
            _ => {
                if !run.attempts.is_empty() {
                    warn!(
                        attempts = run.attempts.len(),
                        "all providers failed, using local assignment"
                    );
                }
                (local_assign(segments), AssignmentSource::LocalFallback)
            }
        };

        AssignmentReport {
            segments: enforce_dominant_type(&assigned),
            source,
            attempts: run.attempts,
        }
    }

    /// Pick one overlay for a segment from a user instruction.
    ///
    /// Returns `None` only when either input is blank.
    pub async fn assign_overlay_for_prompt(
        &self,
        segment_text: &str,
        user_prompt: &str,
    ) -> Option<OverlayAssignment> {
        if segment_text.trim().is_empty() || user_prompt.trim().is_empty() {
            return None;
        }

        let prompt = single_prompt(segment_text, user_prompt);
        let run = run_cascade(&self.providers, self.policy(), self.retry_delay, &prompt, |content| {
            let raw = parse_single(content).map_err(|e| ProviderFailure::permanent(e.to_string()))?;
            validate_single(raw, segment_text, user_prompt)
                .ok_or_else(|| ProviderFailure::permanent("unsupported overlay type in reply"))
        })
        .await;

        match run.value {
            Some(overlay) => Some(overlay),
            None => {
                if !run.attempts.is_empty() {
                    warn!(
                        attempts = run.attempts.len(),
                        "all providers failed, using local suggestion"
                    );
                }
                Some(local_assign_single(segment_text, user_prompt))
            }
        }
    }
}

// ── Validation and repair ───────────────────────────────────────

fn truncated_label(text: &str) -> String {
    text.chars().take(LABEL_MAX_CHARS).collect()
}

fn str_prop<'a>(props: &'a OverlayProps, key: &str) -> Option<&'a str> {
    props.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Props for a freshly chosen illustration.
fn illustration_props(scene: &Scene, label: String) -> OverlayProps {
    let mut props = OverlayProps::new();
    props.insert("scene".into(), scene.id.into());
    props.insert("label".into(), label.into());
    props.insert("color".into(), scene.color.into());
    props.insert("displayMode".into(), "full".into());
    props.insert("transition".into(), "fade-in".into());
    props.insert("soundEffect".into(), "none".into());
    props
}

fn illustration(scene: &Scene, text: &str) -> OverlayAssignment {
    let props = illustration_props(scene, truncated_label(text));
    OverlayAssignment::new(OverlayKind::VisualIllustration, props)
}

/// Scene for a segment that has no valid one: keyword match, else a
/// fallback chosen by the stable hash of the segment id.
fn repair_scene(segment: &Segment) -> &'static Scene {
    classify(&segment.text).map_or_else(
        || fallback_scene(stable_hash(&segment.id) as usize),
        |m| m.scene,
    )
}

/// Fill in or fix every illustration prop for `segment`.
pub fn repair_illustration(mut props: OverlayProps, segment: &Segment) -> OverlayProps {
    let scene = match str_prop(&props, "scene").and_then(find_scene) {
        Some(scene) => scene,
        None => {
            let scene = repair_scene(segment);
            debug!(segment = %segment.id, scene = scene.id, "repaired scene");
            props.insert("scene".into(), scene.id.into());
            scene
        }
    };
    if !props.get("label").is_some_and(Value::is_string) {
        props.insert("label".into(), truncated_label(&segment.text).into());
    }
    if !str_prop(&props, "color").is_some_and(|c| Color::from_hex(c).is_ok()) {
        props.insert("color".into(), scene.color.into());
    }
    if !str_prop(&props, "displayMode").is_some_and(|m| DISPLAY_MODES.contains(&m)) {
        props.insert("displayMode".into(), "full".into());
    }
    if !str_prop(&props, "transition").is_some_and(|t| TRANSITIONS.contains(&t)) {
        props.insert("transition".into(), "fade-in".into());
    }
    if str_prop(&props, "soundEffect").is_none() {
        props.insert("soundEffect".into(), "none".into());
    }
    props
}

/// Keep records for known segments with the illustration type, repaired.
/// The first record for a segment wins.
pub fn validate_batch(
    segments: &[Segment],
    records: Vec<SuggestionRecord>,
) -> HashMap<String, OverlayAssignment> {
    let by_id: HashMap<&str, &Segment> = segments.iter().map(|s| (s.id.as_str(), s)).collect();
    let mut valid = HashMap::new();
    for record in records {
        let Some(segment) = by_id.get(record.segment_id.as_str()) else {
            debug!(segment = %record.segment_id, "dropping suggestion for unknown segment");
            continue;
        };
        if record.kind != OverlayKind::VisualIllustration.as_str() {
            debug!(
                segment = %record.segment_id,
                kind = %record.kind,
                "dropping suggestion with unsupported type"
            );
            continue;
        }
        if valid.contains_key(&record.segment_id) {
            continue;
        }
        let props = repair_illustration(record.props, segment);
        valid.insert(
            record.segment_id,
            OverlayAssignment::new(OverlayKind::VisualIllustration, props),
        );
    }
    valid
}

/// Check a single-overlay reply against the allowed kinds and repair its scene.
pub fn validate_single(
    raw: RawOverlay,
    segment_text: &str,
    user_prompt: &str,
) -> Option<OverlayAssignment> {
    let kind = OverlayKind::from_str(&raw.kind).ok()?;
    if !SINGLE_ALLOWED.contains(&kind) {
        return None;
    }
    let mut props = raw.props;
    let has_scene = str_prop(&props, "scene").is_some_and(|s| find_scene(s).is_some());
    if kind == OverlayKind::VisualIllustration && !has_scene {
        let combined = format!("{segment_text} {user_prompt}");
        let scene = scene_or_fallback(&combined, stable_hash(&combined) as usize);
        props.insert("scene".into(), scene.id.into());
    }
    Some(OverlayAssignment::new(kind, props))
}

fn without_overlay(segment: &Segment) -> Segment {
    Segment {
        overlay: None,
        ..segment.clone()
    }
}

fn merge_overlays(
    segments: &[Segment],
    mut overlays: HashMap<String, OverlayAssignment>,
) -> Vec<Segment> {
    segments
        .iter()
        .map(|segment| match overlays.remove(&segment.id) {
            Some(overlay) => segment.clone().with_overlay(overlay),
            None => segment.clone(),
        })
        .collect()
}

// ── Local fallback ──────────────────────────────────────────────

/// Deterministic assignment: every segment at least [`MIN_SPACING`]
/// positions after the previous assignment gets an illustration, by keyword
/// match or else by rotating through the fallback scenes.
pub fn local_assign(segments: &[Segment]) -> Vec<Segment> {
    let mut last: Option<usize> = None;
    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            if last.is_some_and(|l| index - l < MIN_SPACING) {
                return segment.clone();
            }
            last = Some(index);
            let scene = scene_or_fallback(&segment.text, index);
            segment.clone().with_overlay(illustration(scene, &segment.text))
        })
        .collect()
}

/// Emoji for a prompt that asks for a reaction.
pub fn reaction_emoji(user_prompt: &str) -> Option<&'static str> {
    let lowered = user_prompt.to_lowercase();
    REACTIONS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, emoji)| *emoji)
}

/// Network-free single-segment suggestion.
pub fn local_assign_single(segment_text: &str, user_prompt: &str) -> OverlayAssignment {
    if let Some(hit) = classify(&format!("{segment_text} {user_prompt}")) {
        return illustration(hit.scene, segment_text);
    }
    if let Some(emoji) = reaction_emoji(user_prompt) {
        return OverlayAssignment::with_defaults(OverlayKind::EmojiReaction)
            .with_prop("emoji", emoji)
            .with_prop("size", 80);
    }
    // brain-idea
    illustration(fallback_scene(0), segment_text)
}

/// Convert every overlay that is neither an illustration nor a reaction
/// into an illustration, keeping its label and color when usable. Existing
/// illustrations are repaired so their scene is always in the catalog.
pub fn enforce_dominant_type(segments: &[Segment]) -> Vec<Segment> {
    segments
        .iter()
        .map(|segment| {
            let Some(overlay) = segment.overlay.as_ref() else {
                return segment.clone();
            };
            match overlay.kind {
                OverlayKind::EmojiReaction => return segment.clone(),
                OverlayKind::VisualIllustration => {
                    let props = repair_illustration(overlay.props.clone(), segment);
                    let repaired = OverlayAssignment::new(OverlayKind::VisualIllustration, props);
                    return segment.clone().with_overlay(repaired);
                }
                _ => {}
            }
            let mut props = OverlayProps::new();
            for key in ["label", "color"] {
                if let Some(value) = overlay.props.get(key) {
                    props.insert(key.into(), value.clone());
                }
            }
            debug!(
                segment = %segment.id,
                from = %overlay.kind,
                "converted overlay to illustration"
            );
            let props = repair_illustration(props, segment);
            let converted = OverlayAssignment::new(OverlayKind::VisualIllustration, props);
            segment.clone().with_overlay(converted)
        })
        .collect()
}
