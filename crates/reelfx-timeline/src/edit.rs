//! Pure edit reducers, edit commands, and the undoable edit session.
//!
//! Every reducer takes the current [`EditState`] by reference and returns a
//! new value; nothing is mutated in place. [`EditSession`] wires the reducers
//! to the [`History`] so that only content edits push snapshots.

use tracing::debug;

use crate::history::{History, HistorySnapshot};
use crate::project::{EditState, TextOverlay, TrimPoints, VideoFilters};
use crate::segment::{OverlayAssignment, Segment};

/// Minimum distance (seconds) between a split point and either segment edge.
pub const SPLIT_EPSILON: f64 = 0.1;

// ── Reducers ────────────────────────────────────────────────────

fn map_segment(state: &EditState, id: &str, f: impl FnOnce(&Segment) -> Segment) -> EditState {
    let Some(pos) = state.segments.iter().position(|s| s.id == id) else {
        return state.clone();
    };
    let mut next = state.clone();
    next.segments[pos] = f(&state.segments[pos]);
    next
}

/// Id for the second half of a split, unique within `segments`.
fn split_id(segments: &[Segment], id: &str) -> String {
    (2..)
        .map(|n| format!("{id}-{n}"))
        .find(|candidate| segments.iter().all(|s| &s.id != candidate))
        .unwrap_or_else(|| format!("{id}-split"))
}

/// Split a segment in two at `at` seconds.
///
/// The first half keeps the text and overlay; the second half starts empty.
/// Split points within [`SPLIT_EPSILON`] of either edge, or outside the
/// segment, leave the state unchanged.
pub fn apply_split(state: &EditState, segment_id: &str, at: f64) -> EditState {
    let Some(pos) = state.segments.iter().position(|s| s.id == segment_id) else {
        return state.clone();
    };
    let original = &state.segments[pos];
    if at <= original.start_time + SPLIT_EPSILON || at >= original.end_time - SPLIT_EPSILON {
        return state.clone();
    }

    let first = Segment {
        end_time: at,
        ..original.clone()
    };
    let second = Segment::new(
        split_id(&state.segments, segment_id),
        at,
        original.end_time,
        String::new(),
    );
    debug!(segment = segment_id, at, new_segment = %second.id, "split segment");

    let mut next = state.clone();
    next.segments.splice(pos..=pos, [first, second]);
    next
}

/// Attach an overlay to a segment, replacing any previous one.
pub fn apply_overlay(state: &EditState, segment_id: &str, overlay: OverlayAssignment) -> EditState {
    map_segment(state, segment_id, |s| Segment {
        overlay: Some(overlay),
        ..s.clone()
    })
}

pub fn clear_overlay(state: &EditState, segment_id: &str) -> EditState {
    map_segment(state, segment_id, |s| Segment {
        overlay: None,
        ..s.clone()
    })
}

pub fn set_segment_text(state: &EditState, segment_id: &str, text: &str) -> EditState {
    map_segment(state, segment_id, |s| Segment {
        text: text.to_string(),
        ..s.clone()
    })
}

/// Move a segment's bounds. Rejected (no-op) unless `start < end`.
pub fn set_segment_times(state: &EditState, segment_id: &str, start: f64, end: f64) -> EditState {
    if !(start.is_finite() && end.is_finite() && start >= 0.0 && start < end) {
        return state.clone();
    }
    let mut next = map_segment(state, segment_id, |s| Segment {
        start_time: start,
        end_time: end,
        ..s.clone()
    });
    next.segments
        .sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    next
}

pub fn delete_segment(state: &EditState, segment_id: &str) -> EditState {
    let mut next = state.clone();
    next.segments.retain(|s| s.id != segment_id);
    next
}

/// Replace the whole segment list, e.g. after a fresh assignment pass.
pub fn replace_segments(state: &EditState, segments: Vec<Segment>) -> EditState {
    EditState {
        segments,
        ..state.clone()
    }
}

pub fn set_filters(state: &EditState, filters: VideoFilters) -> EditState {
    EditState {
        filters: filters.clamped(),
        ..state.clone()
    }
}

/// Trim points are ordered so `in_point <= out_point`.
pub fn set_trim_points(state: &EditState, trim: TrimPoints) -> EditState {
    let (lo, hi) = if trim.in_point <= trim.out_point {
        (trim.in_point, trim.out_point)
    } else {
        (trim.out_point, trim.in_point)
    };
    EditState {
        trim_points: TrimPoints::new(lo.max(0.0), hi.max(0.0)),
        ..state.clone()
    }
}

pub fn set_text_overlays(state: &EditState, overlays: Vec<TextOverlay>) -> EditState {
    EditState {
        text_overlays: overlays,
        ..state.clone()
    }
}

/// Playback speed is kept within 0.1x..4x.
pub fn set_playback_speed(state: &EditState, speed: f64) -> EditState {
    if !speed.is_finite() {
        return state.clone();
    }
    EditState {
        playback_speed: speed.clamp(0.1, 4.0),
        ..state.clone()
    }
}

// ── Edit commands ───────────────────────────────────────────────

/// A discrete content edit, applied through [`EditSession::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    Split { segment_id: String, at: f64 },
    ApplyOverlay { segment_id: String, overlay: OverlayAssignment },
    ClearOverlay { segment_id: String },
    SetText { segment_id: String, text: String },
    SetTimes { segment_id: String, start: f64, end: f64 },
    DeleteSegment { segment_id: String },
    ReplaceSegments(Vec<Segment>),
    SetFilters(VideoFilters),
    SetTrimPoints(TrimPoints),
    SetTextOverlays(Vec<TextOverlay>),
    SetPlaybackSpeed(f64),
    /// Several commands committed as one undo step.
    Batch(Vec<EditCommand>),
}

impl EditCommand {
    /// Produce the state after this command.
    pub fn apply(&self, state: &EditState) -> EditState {
        match self {
            Self::Split { segment_id, at } => apply_split(state, segment_id, *at),
            Self::ApplyOverlay { segment_id, overlay } => {
                apply_overlay(state, segment_id, overlay.clone())
            }
            Self::ClearOverlay { segment_id } => clear_overlay(state, segment_id),
            Self::SetText { segment_id, text } => set_segment_text(state, segment_id, text),
            Self::SetTimes {
                segment_id,
                start,
                end,
            } => set_segment_times(state, segment_id, *start, *end),
            Self::DeleteSegment { segment_id } => delete_segment(state, segment_id),
            Self::ReplaceSegments(segments) => replace_segments(state, segments.clone()),
            Self::SetFilters(filters) => set_filters(state, *filters),
            Self::SetTrimPoints(trim) => set_trim_points(state, *trim),
            Self::SetTextOverlays(overlays) => set_text_overlays(state, overlays.clone()),
            Self::SetPlaybackSpeed(speed) => set_playback_speed(state, *speed),
            Self::Batch(commands) => commands
                .iter()
                .fold(state.clone(), |acc, cmd| cmd.apply(&acc)),
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Split { .. } => "split",
            Self::ApplyOverlay { .. } => "apply_overlay",
            Self::ClearOverlay { .. } => "clear_overlay",
            Self::SetText { .. } => "set_text",
            Self::SetTimes { .. } => "set_times",
            Self::DeleteSegment { .. } => "delete_segment",
            Self::ReplaceSegments(_) => "replace_segments",
            Self::SetFilters(_) => "set_filters",
            Self::SetTrimPoints(_) => "set_trim_points",
            Self::SetTextOverlays(_) => "set_text_overlays",
            Self::SetPlaybackSpeed(_) => "set_playback_speed",
            Self::Batch(_) => "batch",
        }
    }
}

// ── Edit session ────────────────────────────────────────────────

/// Current project state plus its undo history.
///
/// Only commands that actually change the state commit a snapshot; playhead
/// movement never goes through here.
#[derive(Debug, Clone)]
pub struct EditSession {
    state: EditState,
    history: History,
}

impl EditSession {
    pub fn new(state: EditState) -> Self {
        Self::with_history(state, History::default())
    }

    pub fn with_history(state: EditState, mut history: History) -> Self {
        history.reset();
        history.push_snapshot(HistorySnapshot::capture(&state));
        Self { state, history }
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Apply a command. Returns `true` if the state changed.
    pub fn apply(&mut self, command: EditCommand) -> bool {
        let next = command.apply(&self.state);
        if next == self.state {
            debug!(command = command.name(), "edit was a no-op");
            return false;
        }
        self.history.push_snapshot(HistorySnapshot::capture(&next));
        self.state = next;
        debug!(
            command = command.name(),
            undo_depth = self.history.undo_count(),
            "edit committed"
        );
        true
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.state = snapshot.restore_onto(&self.state);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.state = snapshot.restore_onto(&self.state);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replace the state wholesale (e.g. project switch) and drop history.
    pub fn reset(&mut self, state: EditState) {
        self.history.reset();
        self.history.push_snapshot(HistorySnapshot::capture(&state));
        self.state = state;
    }

    pub fn into_state(self) -> EditState {
        self.state
    }
}

// ── Tests ───────────────────────────────────────────────────────
