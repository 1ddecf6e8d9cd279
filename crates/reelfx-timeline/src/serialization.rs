//! Project persistence boundary: versioned JSON with migration.
//!
//! Storage itself belongs to the host; this module only guarantees that a
//! full project snapshot round-trips losslessly.

use reelfx_core::{ReelError, Result};
use serde::{Deserialize, Serialize};

use crate::project::{EditState, ProjectMeta, VideoRef};

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Versioned project file wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    /// Schema version for migration.
    pub version: u32,
    pub meta: ProjectMeta,
    pub state: EditState,
    #[serde(default)]
    pub video: VideoRef,
    /// Application version that wrote this file.
    pub app_version: String,
}

impl ProjectFile {
    /// Wrap a state, refreshing the meta counters from it.
    pub fn new(mut meta: ProjectMeta, state: EditState, video: VideoRef) -> Self {
        meta.refresh(&state);
        meta.duration = video.duration;
        Self {
            version: CURRENT_VERSION,
            meta,
            state,
            video,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| ReelError::Serialization(format!("Failed to serialize project: {}", e)))
    }

    /// Deserialize from JSON bytes, applying migrations if needed.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_slice(data)
            .map_err(|e| ReelError::Serialization(format!("Invalid JSON: {}", e)))?;

        let version = raw.get("version").and_then(|v| v.as_u64()).unwrap_or(0) as u32;

        if version > CURRENT_VERSION {
            return Err(ReelError::Serialization(format!(
                "Project file version {} is newer than supported version {}",
                version, CURRENT_VERSION
            )));
        }

        let migrated = migrate(raw, version)?;

        let file: Self = serde_json::from_value(migrated)
            .map_err(|e| ReelError::Serialization(format!("Failed to parse project: {}", e)))?;
        crate::segment::validate_segments(&file.state.segments)?;
        Ok(file)
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        Ok(())
    }

    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}

/// Apply sequential migrations from `from_version` to CURRENT_VERSION.
fn migrate(mut data: serde_json::Value, from_version: u32) -> Result<serde_json::Value> {
    let mut version = from_version;

    while version < CURRENT_VERSION {
        match version {
            0 => {
                // v0 → v1: the bare editor state becomes `state`, meta is synthesized
                if data.get("version").is_none() {
                    let name = data
                        .get("name")
                        .and_then(|v| v.as_str())
                        .unwrap_or("Untitled Project")
                        .to_string();
                    let duration =
                        data.get("videoDuration").and_then(|v| v.as_f64()).unwrap_or(0.0);
                    let mut meta = ProjectMeta::new(name, 0);
                    meta.duration = duration;
                    let meta = serde_json::to_value(meta)
                        .map_err(|e| ReelError::Serialization(e.to_string()))?;
                    data = serde_json::json!({
                        "version": 1,
                        "meta": meta,
                        "state": data,
                        "video": {
                            "name": "",
                            "mimeType": "video/mp4",
                            "width": 1920,
                            "height": 1080,
                            "duration": duration,
                        },
                        "appVersion": "0.1.0",
                    });
                }
                version = 1;
            }
            _ => {
                return Err(ReelError::Serialization(format!(
                    "No migration path from version {}",
                    version
                )));
            }
        }
    }

    Ok(data)
}
