/// Startup configuration, read from TOML
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::obj::ObjLimits;
use crate::projection::{Camera, FocalLength};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub limits: ObjLimits,
    pub view: ViewConfig,
}

/// How the mesh is looked at, and how fast things move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Logical screen that projected points land on
    pub screen_width: u32,
    pub screen_height: u32,
    pub camera_distance: f32,
    pub focal_length: f32,
    pub focal_length_floor: f32,
    pub zoom_step: f32,
    /// Radians per second about x, y, z
    pub spin: [f32; 3],
    pub target_fps: u32,
    pub parallel: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            screen_width: 1920,
            screen_height: 1080,
            camera_distance: 4.0,
            focal_length: 200.0,
            focal_length_floor: 200.0,
            zoom_step: 100.0,
            spin: [0.0, 1.0, 0.0],
            target_fps: 60,
            parallel: false,
        }
    }
}

impl ViewConfig {
    pub fn camera(&self) -> Camera {
        Camera::new(self.screen_width, self.screen_height).with_distance(self.camera_distance)
    }

    pub fn focal_length(&self) -> FocalLength {
        FocalLength::new(self.focal_length, self.focal_length_floor, self.zoom_step)
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        let view = &self.view;

        check(limits.max_vertices > 0, "limits.max_vertices", "must be positive")?;
        check(limits.max_edges > 0, "limits.max_edges", "must be positive")?;
        check(
            limits.max_face_vertices >= 2,
            "limits.max_face_vertices",
            "a face needs at least 2 references",
        )?;
        check(
            view.screen_width > 0 && view.screen_height > 0,
            "view.screen_width",
            "screen must have a positive size",
        )?;
        check(
            view.camera_distance.is_finite(),
            "view.camera_distance",
            "must be finite",
        )?;
        check(
            view.focal_length_floor > 0.0 && view.focal_length_floor.is_finite(),
            "view.focal_length_floor",
            "must be positive",
        )?;
        check(
            view.focal_length.is_finite(),
            "view.focal_length",
            "must be finite",
        )?;
        check(view.zoom_step > 0.0, "view.zoom_step", "must be positive")?;
        check(
            view.spin.iter().all(|r| r.is_finite()),
            "view.spin",
            "rates must be finite",
        )?;
        check(view.target_fps > 0, "view.target_fps", "must be positive")?;
        Ok(())
    }
}

fn check(ok: bool, field: &'static str, message: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            message: message.to_string(),
        })
    }
}
