use thiserror::Error;

/// Errors from the export pipeline.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The sequence is longer than the export ceiling. Nothing was encoded.
    #[error("{count} frames exceed the export limit of {limit}")]
    TooManyFrames { count: usize, limit: usize },

    #[error("invalid export size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("nothing to export")]
    EmptySequence,

    #[error("failed to rasterize frame: {0}")]
    Raster(String),

    #[error("failed to encode animation: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write animation: {0}")]
    Io(#[from] std::io::Error),

    /// The export was cancelled before it finished.
    #[error("export cancelled")]
    Cancelled,

    /// The export worker went away without reporting a result.
    #[error("export worker stopped unexpectedly")]
    Interrupted,
}

impl ExportError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExportError::Cancelled)
    }

    /// Whether this is a refusal the user can act on rather than a failure.
    pub fn is_policy(&self) -> bool {
        matches!(self, ExportError::TooManyFrames { .. })
    }
}

/// Errors that can occur while loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Errors that can occur during editor state transitions
#[derive(Debug, Error)]
pub enum TransitionError {
    /// Attempted to transition between incompatible states
    #[error("Cannot transition from {from} to {to}")]
    InvalidStateTransition {
        from: &'static str,
        to: &'static str,
    },
}
