//! ReelFX AI - Overlay suggestion
//!
//! Decides which overlay goes on which transcript segment:
//! - Scene catalog and keyword classifier
//! - Remote suggestion providers with a retry/fallback cascade
//! - Deterministic local assignment when every provider fails
//! - Image search with seeded placeholders
//! - Transcription results and placeholder transcripts

pub mod cascade;
pub mod config;
pub mod engine;
pub mod error;
pub mod images;
pub mod parse;
pub mod prompt;
pub mod provider;
pub mod scenes;
pub mod transcribe;

pub use cascade::{AttemptRecord, CascadePolicy, CascadeState, StepOutcome};
pub use config::{EngineConfig, ImageSearchConfig, ProviderConfig};
pub use engine::{
    enforce_dominant_type, local_assign, local_assign_single, AssignmentReport, AssignmentSource,
    OverlayEngine,
};
pub use error::{AiError, AiResult};
pub use images::{
    placeholder_images, search_images, ImageResult, ImageSearch, ImageSource, PexelsSearch,
};
pub use provider::{classify_status, FailureKind, HttpProvider, OverlayProvider, ProviderFailure};
pub use scenes::{
    classify, find_scene, is_known_scene, Scene, SceneGroup, SceneMatch, FALLBACK_SCENES, SCENES,
};
pub use transcribe::{mock_transcript, resolve_transcript, ResolvedTranscript, TranscriptionResult};
