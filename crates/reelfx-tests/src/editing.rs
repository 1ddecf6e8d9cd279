//! Integration tests for the edit session, playhead and renderer together.

use reelfx_core::FrameRate;
use reelfx_render::{compose_frame, CompositorConfig, RendererRegistry};
use reelfx_timeline::{
    EditCommand, EditSession, EditState, OverlayAssignment, OverlayKind, PlayerRuntime,
    PlayheadSync, Segment,
};

#[derive(Debug, Default)]
struct FakePlayer {
    frame: i64,
    playing: bool,
    seeks: Vec<i64>,
}

impl PlayerRuntime for FakePlayer {
    fn seek_to(&mut self, frame: i64) {
        self.frame = frame;
        self.seeks.push(frame);
    }

    fn current_frame(&self) -> i64 {
        self.frame
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

fn session() -> EditSession {
    let segments = vec![Segment::new("s1", 0.0, 10.0, "a long opening monologue")];
    EditSession::new(EditState::new(segments, 10.0, 30))
}

fn emoji() -> OverlayAssignment {
    OverlayAssignment::with_defaults(OverlayKind::EmojiReaction).with_prop("emoji", "🔥")
}

fn layers_at(state: &EditState, frame: i64) -> Vec<String> {
    let registry = RendererRegistry::new();
    let config = CompositorConfig::default();
    compose_frame(&state.segments, state.frame_rate(), frame, &registry, &config)
        .layers
        .into_iter()
        .map(|l| l.segment_id)
        .collect()
}

fn split(id: &str, at: f64) -> EditCommand {
    EditCommand::Split {
        segment_id: id.into(),
        at,
    }
}

#[test]
fn split_then_overlay_renders_on_second_half() {
    let mut session = session();
    assert!(session.apply(split("s1", 4.0)));

    let bounds: Vec<_> = session
        .state()
        .segments
        .iter()
        .map(|s| (s.id.as_str(), s.start_time, s.end_time))
        .collect();
    assert_eq!(bounds, [("s1", 0.0, 4.0), ("s1-2", 4.0, 10.0)]);
    assert_eq!(session.state().segments[0].text, "a long opening monologue");
    assert!(session.state().segments[1].text.is_empty());

    assert!(session.apply(EditCommand::ApplyOverlay {
        segment_id: "s1-2".into(),
        overlay: emoji(),
    }));
    assert_eq!(layers_at(session.state(), 150), ["s1-2"]);
    assert!(layers_at(session.state(), 60).is_empty());

    assert!(session.undo());
    assert!(layers_at(session.state(), 150).is_empty());
    assert!(session.redo());
    assert_eq!(layers_at(session.state(), 150), ["s1-2"]);
}

#[test]
fn split_near_edge_is_rejected_without_history() {
    let mut session = session();
    let before = session.state().clone();
    assert!(!session.apply(split("s1", 0.05)));
    assert!(!session.apply(split("s1", 9.95)));
    assert!(!session.apply(split("missing", 5.0)));
    assert_eq!(session.state(), &before);
    assert!(!session.can_undo());
}

#[test]
fn new_edit_discards_redo() {
    let mut session = session();
    session.apply(EditCommand::ApplyOverlay {
        segment_id: "s1".into(),
        overlay: emoji(),
    });
    assert!(session.undo());
    assert!(session.can_redo());

    session.apply(EditCommand::SetText {
        segment_id: "s1".into(),
        text: "rewritten".into(),
    });
    assert!(!session.can_redo());
    assert!(session.state().segments[0].overlay.is_none());
    assert_eq!(session.state().segments[0].text, "rewritten");
}

#[test]
fn batch_is_one_undo_step() {
    let mut session = session();
    let depth = session.history().undo_count();
    session.apply(EditCommand::Batch(vec![
        split("s1", 5.0),
        EditCommand::ApplyOverlay {
            segment_id: "s1".into(),
            overlay: emoji(),
        },
        EditCommand::SetPlaybackSpeed(1.5),
    ]));
    assert_eq!(session.history().undo_count(), depth + 1);
    assert_eq!(session.state().segments.len(), 2);
    assert_eq!(session.state().overlay_count(), 1);

    assert!(session.undo());
    assert_eq!(session.state().segments.len(), 1);
    assert_eq!(session.state().overlay_count(), 0);
    assert_eq!(session.state().playback_speed, 1.0);
}

#[test]
fn playhead_drag_never_touches_history() {
    let mut session = session();
    session.apply(split("s1", 4.0));
    let depth = session.history().undo_count();

    let mut player = FakePlayer::default();
    let mut playhead = PlayheadSync::new(FrameRate::FPS_30, 10.0);
    playhead.begin_drag(&mut player, 1.0);
    playhead.drag_to(&mut player, 3.0);
    playhead.drag_to(&mut player, 4.5);
    assert_eq!(playhead.end_drag(), 3);
    assert_eq!(player.seeks, [30, 90, 135]);

    assert_eq!(session.history().undo_count(), depth);
    let active = playhead.active_segment(&session.state().segments);
    assert_eq!(active.map(|s| s.id.as_str()), Some("s1-2"));

    // seeking past the end clamps to the media duration
    assert_eq!(playhead.seek(&mut player, 42.0), 300);
    assert_eq!(session.history().undo_count(), depth);
}

#[test]
fn click_segment_selects_and_seeks_to_start() {
    let mut session = session();
    session.apply(split("s1", 4.0));
    let mut player = FakePlayer::default();
    let mut playhead = PlayheadSync::new(FrameRate::FPS_30, 10.0);

    let second = session.state().segments[1].clone();
    assert_eq!(playhead.click_segment(&mut player, &second), "s1-2");
    assert_eq!(player.frame, 120);

    assert!(playhead.toggle_play(&mut player));
    player.frame = 150;
    let update = playhead.poll(&player).unwrap();
    assert_eq!(update.current_frame, 150);
    assert!(update.is_playing);
    assert!(playhead.poll(&player).is_none());
}
