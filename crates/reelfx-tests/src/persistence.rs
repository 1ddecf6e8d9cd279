//! Integration tests for project files and transcript import.

use reelfx_ai::{resolve_transcript, TranscriptionResult};
use reelfx_render::{compose_frame, CompositorConfig, RendererRegistry};
use reelfx_timeline::{
    EditState, OverlayAssignment, OverlayKind, ProjectFile, ProjectMeta, Segment, TranscriptStatus,
    VideoRef,
};

fn project() -> ProjectFile {
    let segments = vec![
        Segment::new("s1", 0.0, 3.0, "the rocket launch was incredible").with_overlay(
            OverlayAssignment::with_defaults(OverlayKind::VisualIllustration)
                .with_prop("scene", "rocket-launch"),
        ),
        Segment::new("s2", 3.0, 6.0, "um yeah so"),
        Segment::new("s3", 6.0, 9.0, "revenue grew 50 percent")
            .with_overlay(
                OverlayAssignment::with_defaults(OverlayKind::LowerThird).with_prop("name", "Q3"),
            ),
    ];
    let video = VideoRef {
        name: "talk.mp4".into(),
        duration: 9.0,
        ..VideoRef::default()
    };
    ProjectFile::new(ProjectMeta::new("Demo", 0), EditState::new(segments, 9.0, 30), video)
}

#[test]
fn project_round_trips_through_json() {
    let file = project();
    assert_eq!(file.meta.segment_count, 3);
    assert_eq!(file.meta.overlay_count, 2);
    assert_eq!(file.meta.duration, 9.0);

    let restored = ProjectFile::from_json(&file.to_json().unwrap()).unwrap();
    assert_eq!(restored, file);
}

#[test]
fn saved_project_renders_the_same_frames() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.reelfx.json");
    let file = project();
    file.save_to_file(&path).unwrap();
    let loaded = ProjectFile::load_from_file(&path).unwrap();

    let registry = RendererRegistry::new();
    let config = CompositorConfig::default();
    let rate = file.state.frame_rate();
    assert_eq!(loaded.state.frame_rate(), rate);
    for frame in [0, 45, 100, 200, 270] {
        assert_eq!(
            compose_frame(&file.state.segments, rate, frame, &registry, &config),
            compose_frame(&loaded.state.segments, rate, frame, &registry, &config),
        );
    }
}

#[test]
fn bare_state_file_is_migrated() {
    let legacy = r#"{
        "name": "Old talk",
        "videoDuration": 6.0,
        "segments": [
            {"id": "s1", "startTime": 0.0, "endTime": 3.0, "text": "hello there",
             "overlay": {"type": "emoji-reaction", "props": {"emoji": "👋"}}}
        ],
        "playbackSpeed": 1.25
    }"#
    .as_bytes();
    let file = ProjectFile::from_json(legacy).unwrap();
    assert_eq!(file.version, 1);
    assert_eq!(file.meta.name, "Old talk");
    assert_eq!(file.video.duration, 6.0);
    assert_eq!(file.state.playback_speed, 1.25);
    assert_eq!(file.state.overlay_count(), 1);
}

#[test]
fn invalid_segments_are_rejected_on_load() {
    let mut file = project();
    file.state.segments[1].end_time = 2.0;
    let data = serde_json::to_vec(&file).unwrap();
    assert!(ProjectFile::from_json(&data).is_err());

    let future = br#"{"version": 99, "meta": {}, "state": {}, "appVersion": "9.9.9"}"#;
    assert!(ProjectFile::from_json(future).is_err());
}

#[test]
fn transcript_import_builds_a_project() {
    let output = r#"loading model...
        {"segments": [
            {"id": "a", "startTime": 0.0, "endTime": 2.5, "text": "welcome back"},
            {"id": "b", "startTime": 2.5, "endTime": 2.0, "text": "broken"},
            {"id": "c", "startTime": 2.5, "endTime": 5.0, "text": "   "},
            {"id": "d", "startTime": 5.0, "endTime": 8.0, "text": "let's dive in"}
        ], "language": "en"}"#;
    let resolved = resolve_transcript(TranscriptionResult::from_json(output), 8.0);
    assert_eq!(resolved.status, TranscriptStatus::Real);
    let ids: Vec<_> = resolved.segments.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["a", "d"]);

    let mut meta = ProjectMeta::new("Imported", 0);
    meta.transcript_status = resolved.status;
    let state = EditState::new(resolved.segments, 8.0, 30);
    let file = ProjectFile::new(meta, state, VideoRef::default());
    let restored = ProjectFile::from_json(&file.to_json().unwrap()).unwrap();
    assert_eq!(restored.meta.transcript_status, TranscriptStatus::Real);
    assert_eq!(restored.meta.segment_count, 2);
}

#[test]
fn failed_transcription_falls_back_to_placeholder() {
    let resolved = resolve_transcript(Ok(TranscriptionResult::failed("model crashed")), 12.0);
    assert_eq!(resolved.status, TranscriptStatus::MockError);
    assert!(resolved.status.is_mock());
    assert!(!resolved.segments.is_empty());
    assert!(resolved.segments.last().is_some_and(|s| s.end_time <= 12.0));
    assert_eq!(resolved.notice.as_deref(), Some("model crashed"));
}
