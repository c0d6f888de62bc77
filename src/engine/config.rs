//! Overlay settings.
//!
//! The defaults reproduce the fixed overlay: 0.1 long, 0.005 thick arrows
//! with 24 segments, anchored at (-0.9, -0.9) in NDC. Hosts may embed a
//! `GizmoConfig` in their own settings or load one from JSON.

use std::path::Path;

use serde::{ Deserialize, Serialize };
use thiserror::Error;

use crate::engine::components::mesh::{ build_arrow_mesh, DEFAULT_SEGMENTS };
use crate::engine::error::GizmoError;

pub const DEFAULT_ARROW_LENGTH: f32 = 0.1;
pub const DEFAULT_ARROW_RADIUS: f32 = 0.005;
/// Bottom-left corner of the screen, in normalized device coordinates.
pub const OVERLAY_ANCHOR: [f32; 2] = [-0.9, -0.9];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read gizmo config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse gizmo config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] GizmoError),
}

/// Flat RGB color per axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AxisColors {
    pub x: [f32; 3],
    pub y: [f32; 3],
    pub z: [f32; 3],
}

impl Default for AxisColors {
    fn default() -> Self {
        Self {
            x: [1.0, 0.0, 0.0],
            y: [0.0, 1.0, 0.0],
            z: [0.0, 0.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GizmoConfig {
    /// Arrow length, also used as the overlay scale factor.
    pub arrow_length: f32,
    pub arrow_radius: f32,
    pub segments: u32,
    pub anchor: [f32; 2],
    pub colors: AxisColors,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            arrow_length: DEFAULT_ARROW_LENGTH,
            arrow_radius: DEFAULT_ARROW_RADIUS,
            segments: DEFAULT_SEGMENTS,
            anchor: OVERLAY_ANCHOR,
            colors: AxisColors::default(),
        }
    }
}

impl GizmoConfig {
    pub fn with_arrow(arrow_length: f32, arrow_radius: f32) -> Self {
        Self {
            arrow_length,
            arrow_radius,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GizmoError> {
        if !self.anchor.iter().all(|c| c.is_finite()) {
            return Err(GizmoError::invalid(format!("anchor must be finite, got {:?}", self.anchor)));
        }
        // Same checks the mesh builder applies, without keeping the mesh.
        build_arrow_mesh(self.arrow_length, self.arrow_radius, self.segments).map(|_| ())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
