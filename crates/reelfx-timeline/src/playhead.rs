//! Playhead synchronization between the player clock and the editor.
//!
//! The player advances on its own; [`PlayheadSync`] polls it every tick and
//! only reports changes that matter, and turns clicks, drags and skips into
//! frame seeks. None of this touches edit history.

use reelfx_core::FrameRate;
use tracing::trace;

use crate::segment::Segment;

/// Minimum time change (seconds) that counts as a playhead update.
pub const POLL_EPSILON: f64 = 0.03;

/// The minimal surface of the player the editor drives.
pub trait PlayerRuntime {
    fn seek_to(&mut self, frame: i64);
    fn current_frame(&self) -> i64;
    fn play(&mut self);
    fn pause(&mut self);
    fn is_playing(&self) -> bool;
}

/// Observed playback state, pushed to observers when it changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackUpdate {
    pub current_time: f64,
    pub current_frame: i64,
    pub is_playing: bool,
}

/// An in-progress playhead drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragGesture {
    origin_time: f64,
    seeks: u32,
}

/// Mirrors the player clock and translates user interactions into seeks.
#[derive(Debug, Clone)]
pub struct PlayheadSync {
    rate: FrameRate,
    /// Media duration in seconds; seeks are clamped into `[0, duration]`.
    duration: f64,
    current_time: f64,
    is_playing: bool,
    drag: Option<DragGesture>,
}

impl PlayheadSync {
    pub fn new(rate: FrameRate, duration: f64) -> Self {
        Self {
            rate,
            duration: duration.max(0.0),
            current_time: 0.0,
            is_playing: false,
            drag: None,
        }
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn current_frame(&self) -> i64 {
        self.rate.frame_at(self.current_time)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn frame_rate(&self) -> FrameRate {
        self.rate
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration.max(0.0);
    }

    /// Jump the player to `seconds`, returning the frame sought to.
    pub fn seek<P: PlayerRuntime + ?Sized>(&mut self, player: &mut P, seconds: f64) -> i64 {
        let target = if seconds.is_finite() {
            seconds.clamp(0.0, self.duration)
        } else {
            0.0
        };
        let frame = self.rate.frame_at(target);
        player.seek_to(frame);
        self.current_time = target;
        trace!(seconds = target, frame, "seek");
        frame
    }

    /// Seek to a fraction `[0, 1]` of the media duration (timeline click).
    pub fn seek_fraction<P: PlayerRuntime + ?Sized>(
        &mut self,
        player: &mut P,
        fraction: f64,
    ) -> i64 {
        let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
        self.seek(player, fraction * self.duration)
    }

    /// Move the playhead relative to its current position.
    pub fn skip<P: PlayerRuntime + ?Sized>(&mut self, player: &mut P, delta_secs: f64) -> i64 {
        self.seek(player, self.current_time + delta_secs)
    }

    /// Select a segment by seeking to its start. Returns the selected id.
    pub fn click_segment<'a, P: PlayerRuntime + ?Sized>(
        &mut self,
        player: &mut P,
        segment: &'a Segment,
    ) -> &'a str {
        self.seek(player, segment.start_time);
        &segment.id
    }

    pub fn toggle_play<P: PlayerRuntime + ?Sized>(&mut self, player: &mut P) -> bool {
        if player.is_playing() {
            player.pause();
        } else {
            player.play();
        }
        self.is_playing = player.is_playing();
        self.is_playing
    }

    /// Read the player clock. Returns an update only when the time moved more
    /// than [`POLL_EPSILON`] or the playing flag flipped.
    pub fn poll<P: PlayerRuntime + ?Sized>(&mut self, player: &P) -> Option<PlaybackUpdate> {
        let frame = player.current_frame();
        let time = self.rate.seconds_at(frame);
        let playing = player.is_playing();

        let moved = (time - self.current_time).abs() > POLL_EPSILON;
        let flipped = playing != self.is_playing;
        if !moved && !flipped {
            return None;
        }
        self.current_time = time;
        self.is_playing = playing;
        Some(PlaybackUpdate {
            current_time: time,
            current_frame: frame,
            is_playing: playing,
        })
    }

    // ── Drag gesture ────────────────────────────────────────────

    /// Start dragging the playhead at `seconds`.
    pub fn begin_drag<P: PlayerRuntime + ?Sized>(&mut self, player: &mut P, seconds: f64) -> i64 {
        let origin_time = self.current_time;
        let frame = self.seek(player, seconds);
        self.drag = Some(DragGesture {
            origin_time,
            seeks: 1,
        });
        frame
    }

    /// Pointer moved during a drag: re-seek. Ignored when no drag is active.
    pub fn drag_to<P: PlayerRuntime + ?Sized>(
        &mut self,
        player: &mut P,
        seconds: f64,
    ) -> Option<i64> {
        self.drag?;
        let frame = self.seek(player, seconds);
        if let Some(drag) = self.drag.as_mut() {
            drag.seeks += 1;
        }
        Some(frame)
    }

    /// Release the drag. Returns the number of seeks it issued.
    pub fn end_drag(&mut self) -> u32 {
        match self.drag.take() {
            Some(drag) => {
                trace!(
                    from = drag.origin_time,
                    to = self.current_time,
                    seeks = drag.seeks,
                    "drag ended"
                );
                drag.seeks
            }
            None => 0,
        }
    }

    /// The segment under the playhead, if any.
    pub fn active_segment<'a>(&self, segments: &'a [Segment]) -> Option<&'a Segment> {
        segments.iter().find(|s| s.contains_time(self.current_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_seek_rounds_to_frame() {
        let mut player = FakePlayer::default();
        let mut sync = PlayheadSync::new(FrameRate::FPS_30, 60.0);
        assert_eq!(sync.seek(&mut player, 1.49), 45);
        assert_eq!(player.frame, 45);
        assert_eq!(sync.seek(&mut player, 100.0), 1800);
        assert_eq!(sync.seek(&mut player, -3.0), 0);
    }

    #[test]
    fn test_poll_filters_small_changes() {
        let mut player = FakePlayer::default();
        let mut sync = PlayheadSync::new(FrameRate::FPS_30, 60.0);
        assert!(sync.poll(&player).is_none());

        // one frame at 30fps is 0.033s, just above the epsilon
        player.frame = 1;
        assert!(sync.poll(&player).is_some());

        sync.seek(&mut player, 2.0);
        assert!(sync.poll(&player).is_none());

        player.playing = true;
        let update = sync.poll(&player).unwrap();
        assert!(update.is_playing);
        assert_eq!(update.current_frame, 60);
    }

    #[test]
    fn test_poll_ignores_subframe_jitter_at_60fps() {
        let mut player = FakePlayer::default();
        let mut sync = PlayheadSync::new(FrameRate::FPS_60, 60.0);
        player.frame = 1; // 0.0167s
        assert!(sync.poll(&player).is_none());
        player.frame = 2; // 0.0333s
        assert!(sync.poll(&player).is_some());
    }

    #[test]
    fn test_drag_reseeks_until_release() {
        let mut player = FakePlayer::default();
        let mut sync = PlayheadSync::new(FrameRate::FPS_30, 60.0);
        assert_eq!(sync.drag_to(&mut player, 5.0), None);

        sync.begin_drag(&mut player, 1.0);
        assert!(sync.is_dragging());
        sync.drag_to(&mut player, 2.0);
        sync.drag_to(&mut player, 3.0);
        assert_eq!(player.seeks, vec![30, 60, 90]);
        assert_eq!(sync.end_drag(), 3);
        assert!(!sync.is_dragging());
        assert_eq!(sync.drag_to(&mut player, 4.0), None);
    }

    #[test]
    fn test_click_segment_and_active_lookup() {
        let segments = vec![
            Segment::new("a", 0.0, 2.0, ""),
            Segment::new("b", 2.0, 4.0, ""),
        ];
        let mut player = FakePlayer::default();
        let mut sync = PlayheadSync::new(FrameRate::FPS_30, 4.0);
        assert_eq!(sync.click_segment(&mut player, &segments[1]), "b");
        assert_eq!(player.frame, 60);
        assert_eq!(sync.active_segment(&segments).map(|s| s.id.as_str()), Some("b"));

        sync.skip(&mut player, -1.5);
        assert_eq!(sync.active_segment(&segments).map(|s| s.id.as_str()), Some("a"));
    }

    #[test]
    fn test_toggle_play() {
        let mut player = FakePlayer::default();
        let mut sync = PlayheadSync::new(FrameRate::FPS_30, 4.0);
        assert!(sync.toggle_play(&mut player));
        assert!(!sync.toggle_play(&mut player));
    }

    #[test]
    fn test_seek_fraction() {
        let mut player = FakePlayer::default();
        let mut sync = PlayheadSync::new(FrameRate::FPS_24, 10.0);
        assert_eq!(sync.seek_fraction(&mut player, 0.5), 120);
        assert_eq!(sync.seek_fraction(&mut player, 2.0), 240);
    }
}
