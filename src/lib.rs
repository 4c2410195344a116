#![warn(clippy::all, rust_2018_idioms)]

pub mod animation;
pub mod command;
pub mod document;
pub mod eraser;
pub mod error;
pub mod event;
pub mod export;
pub mod frame;
pub mod geometry;
pub mod sequence;
pub mod session;
pub mod settings;
pub mod shape;
pub mod state;
pub mod stroke;
pub mod tool;

pub use animation::Playback;
pub use command::{Action, ActionHistory};
pub use document::{Document, FrameCursor};
pub use eraser::{EraseOutcome, erase};
pub use error::{ExportError, SettingsError, TransitionError};
pub use event::{EditorEvent, EventBus, EventHandler, SubscriptionId};
pub use export::{CancelToken, EncodedImage, ExportHandle, ExportOptions, ExportRequest, Exporter};
pub use frame::Frame;
pub use geometry::{Bounds, Point2D, Size};
pub use sequence::{Keyframe, SequenceStyle, WaypointSource, generate_sequence};
pub use session::Session;
pub use settings::EditorSettings;
pub use shape::{ShapeDraft, ShapeKind};
pub use state::{EditorContext, EditorState};
pub use stroke::{Stroke, StrokeBuilder, StrokeStyle};
pub use tool::ToolMode;

// Re-exported so callers can name stroke colors without depending on egui.
pub use egui::Color32;
