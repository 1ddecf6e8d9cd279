//! Bounded snapshot history for undo/redo.
//!
//! `past` holds committed states with the current state on top, so an undo
//! moves the top onto `future` and hands back the state beneath it. Redo is
//! then reconstructable without the caller re-pushing anything.

use serde::{Deserialize, Serialize};

use crate::project::{EditState, TextOverlay, TrimPoints, VideoFilters};
use crate::segment::Segment;

/// Default number of undo (and redo) steps kept.
pub const MAX_HISTORY: usize = 30;

/// Captured copy of the undoable parts of [`EditState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    pub segments: Vec<Segment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<VideoFilters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_points: Option<TrimPoints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_overlays: Option<Vec<TextOverlay>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playback_speed: Option<f64>,
}

impl HistorySnapshot {
    /// Snapshot of segments only.
    pub fn segments_only(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            filters: None,
            trim_points: None,
            text_overlays: None,
            playback_speed: None,
        }
    }

    /// Full snapshot of everything undoable in `state`.
    pub fn capture(state: &EditState) -> Self {
        Self {
            segments: state.segments.clone(),
            filters: Some(state.filters),
            trim_points: Some(state.trim_points),
            text_overlays: Some(state.text_overlays.clone()),
            playback_speed: Some(state.playback_speed),
        }
    }

    /// Merge this snapshot over `state`; absent fields keep their current value.
    pub fn restore_onto(&self, state: &EditState) -> EditState {
        EditState {
            segments: self.segments.clone(),
            filters: self.filters.unwrap_or(state.filters),
            trim_points: self.trim_points.unwrap_or(state.trim_points),
            text_overlays: self
                .text_overlays
                .clone()
                .unwrap_or_else(|| state.text_overlays.clone()),
            playback_speed: self.playback_speed.unwrap_or(state.playback_speed),
            fps: state.fps,
        }
    }
}

/// Two bounded stacks of snapshots. Oldest entries are evicted first.
///
/// `past` keeps one slot beyond `max_depth` for the current state, so
/// `max_depth` undo steps are always available.
#[derive(Debug, Clone)]
pub struct History {
    /// Committed snapshots, current state last.
    past: Vec<HistorySnapshot>,
    /// Undone snapshots, next redo last.
    future: Vec<HistorySnapshot>,
    max_depth: usize,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Commit a new state. Clears the redo stack.
    pub fn push_snapshot(&mut self, snapshot: HistorySnapshot) {
        self.future.clear();
        self.push_past(snapshot);
    }

    fn push_past(&mut self, snapshot: HistorySnapshot) {
        self.past.push(snapshot);
        let cap = self.max_depth + 1;
        if self.past.len() > cap {
            let overflow = self.past.len() - cap;
            self.past.drain(..overflow);
        }
    }

    /// Step back one state and return the snapshot to apply.
    ///
    /// Returns `None` when there is no earlier state to return to.
    pub fn undo(&mut self) -> Option<HistorySnapshot> {
        if self.past.len() < 2 {
            return None;
        }
        let current = self.past.pop()?;
        self.push_to_future(current);
        self.past.last().cloned()
    }

    /// Re-apply the most recently undone snapshot.
    pub fn redo(&mut self) -> Option<HistorySnapshot> {
        let next = self.future.pop()?;
        self.push_past(next.clone());
        Some(next)
    }

    /// Push onto the redo stack directly, for callers restoring state themselves.
    pub fn push_to_future(&mut self, snapshot: HistorySnapshot) {
        self.future.push(snapshot);
        if self.future.len() > self.max_depth {
            let overflow = self.future.len() - self.max_depth;
            self.future.drain(..overflow);
        }
    }

    /// The committed state on top of the stack.
    pub fn current(&self) -> Option<&HistorySnapshot> {
        self.past.last()
    }

    pub fn can_undo(&self) -> bool {
        self.past.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Drop all history.
    pub fn reset(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    /// Number of undo steps available.
    pub fn undo_count(&self) -> usize {
        self.past.len().saturating_sub(1)
    }

    pub fn redo_count(&self) -> usize {
        self.future.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}
