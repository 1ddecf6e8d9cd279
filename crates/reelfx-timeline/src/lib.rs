//! ReelFX Timeline - Segment model and editing
//!
//! Implements the editable side of a transcript-driven video:
//! - Segments and the overlays assigned to them
//! - Project state as an immutable value with pure reducers
//! - Bounded snapshot history for undo/redo
//! - Playhead synchronization with the player clock
//! - Versioned project files

pub mod edit;
pub mod history;
pub mod playhead;
pub mod project;
pub mod segment;
pub mod serialization;

pub use edit::{EditCommand, EditSession, SPLIT_EPSILON};
pub use history::{History, HistorySnapshot, MAX_HISTORY};
pub use playhead::{PlaybackUpdate, PlayerRuntime, PlayheadSync, POLL_EPSILON};
pub use project::{
    EditState, ProjectMeta, TextOverlay, TranscriptStatus, TrimPoints, VideoFilters, VideoRef,
};
pub use segment::{
    find_segment, validate_segments, OverlayAssignment, OverlayKind, OverlayProps, Segment,
};
pub use serialization::ProjectFile;
