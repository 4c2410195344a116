//! Animated GIF export.
//!
//! Frames are rasterized one at a time and streamed into the encoder.
//! Cancellation is checked between frames. Output goes to a temporary file
//! next to the destination and is only moved into place once complete.

mod gif;
mod raster;
mod task;

pub use gif::{encode_gif, write_gif_file};
pub(crate) use gif::write_gif_file_guarded;
pub use raster::rasterize_frame;
pub use task::{ExportHandle, Exporter};

use crate::error::ExportError;
use crate::frame::Frame;
use crate::geometry::Size;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Default ceiling on exported frame count.
pub const DEFAULT_MAX_EXPORT_FRAMES: usize = 100;

/// Cooperative cancellation flag shared between a job and its owner.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Whether both tokens control the same job.
    pub fn same_job(&self, other: &CancelToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// How frames are turned into the animation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Display time of every frame
    pub frame_delay: Duration,
    /// Coordinate space of the strokes
    pub canvas_size: Size,
    /// Output raster width in pixels
    pub width: u32,
    /// Output raster height in pixels
    pub height: u32,
    pub max_frames: usize,
}

impl ExportOptions {
    /// Output at the canvas's own pixel size.
    pub fn new(frame_delay: Duration, canvas_size: Size) -> Self {
        Self {
            frame_delay,
            canvas_size,
            width: canvas_size.width.round().max(0.0) as u32,
            height: canvas_size.height.round().max(0.0) as u32,
            max_frames: DEFAULT_MAX_EXPORT_FRAMES,
        }
    }

    pub fn with_target_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Everything that can be rejected before any frame is drawn.
    pub fn check(&self, frame_count: usize) -> Result<(), ExportError> {
        if frame_count > self.max_frames {
            return Err(ExportError::TooManyFrames {
                count: frame_count,
                limit: self.max_frames,
            });
        }
        if frame_count == 0 {
            return Err(ExportError::EmptySequence);
        }
        let fits = |v: u32| v > 0 && v <= u32::from(u16::MAX);
        if !fits(self.width) || !fits(self.height) {
            return Err(ExportError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.canvas_size.width <= 0.0 || self.canvas_size.height <= 0.0 {
            return Err(ExportError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// A frozen export job: the frames are a snapshot, not the live session.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub frames: Arc<[Frame]>,
    pub options: ExportOptions,
    pub destination: PathBuf,
}

/// A finished animation on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub path: PathBuf,
    pub frame_count: usize,
    pub width: u32,
    pub height: u32,
}
