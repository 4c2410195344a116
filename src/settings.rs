use crate::animation::{MAX_FRAME_INTERVAL, MIN_FRAME_INTERVAL};
use crate::error::SettingsError;
use crate::export::DEFAULT_MAX_EXPORT_FRAMES;
use crate::geometry::Size;
use crate::shape::{DEFAULT_SEGMENT_LENGTH, MIN_SHAPE_SIZE};
use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Editor configuration. Missing fields take their defaults when loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Seconds each frame stays on screen during playback and in exports
    pub frame_interval_secs: f64,
    /// Width for new strokes and shapes, also the eraser width
    pub line_width: f64,
    /// Initial size of a placed shape
    pub shape_size: f64,
    /// Length of the strokes a shape edge is cut into
    pub segment_length: f64,
    /// Longest sequence that may be exported
    pub max_export_frames: usize,
    pub canvas_size: Size,
    /// Unmultiplied RGBA
    pub stroke_color: [u8; 4],
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            frame_interval_secs: 0.1,
            line_width: 5.0,
            shape_size: 100.0,
            segment_length: DEFAULT_SEGMENT_LENGTH,
            max_export_frames: DEFAULT_MAX_EXPORT_FRAMES,
            canvas_size: Size::new(390.0, 640.0),
            stroke_color: [0, 0, 0, 255],
        }
    }
}

impl EditorSettings {
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to a JSON file, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> SettingsResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> SettingsResult<()> {
        if !(MIN_FRAME_INTERVAL..=MAX_FRAME_INTERVAL).contains(&self.frame_interval_secs) {
            return Err(SettingsError::Invalid(format!(
                "frame interval {} is outside {MIN_FRAME_INTERVAL}..={MAX_FRAME_INTERVAL}",
                self.frame_interval_secs
            )));
        }
        if self.line_width.is_nan() || self.line_width <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "line width must be positive, got {}",
                self.line_width
            )));
        }
        if self.shape_size.is_nan() || self.shape_size < MIN_SHAPE_SIZE {
            return Err(SettingsError::Invalid(format!(
                "shape size must be at least {MIN_SHAPE_SIZE}, got {}",
                self.shape_size
            )));
        }
        if self.segment_length.is_nan() || self.segment_length <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "segment length must be positive, got {}",
                self.segment_length
            )));
        }
        if self.canvas_size.width <= 0.0 || self.canvas_size.height <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas_size.width, self.canvas_size.height
            )));
        }
        Ok(())
    }

    /// Sets the frame interval, clamped to the allowed range.
    pub fn with_frame_interval(mut self, secs: f64) -> Self {
        self.frame_interval_secs = secs.clamp(MIN_FRAME_INTERVAL, MAX_FRAME_INTERVAL);
        self
    }

    pub fn color(&self) -> Color32 {
        let [r, g, b, a] = self.stroke_color;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}
