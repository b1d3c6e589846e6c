#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod cell;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod file_handler;
pub mod grid;
pub mod input;
pub mod paint;
pub mod raster;
pub mod session;

pub use app::PixelGridApp;
pub use cell::CellState;
pub use color::{Color, hex_to_rgb, random_hex_color, rgb_to_hex};
pub use config::GridConfig;
pub use error::{ConfigError, GridError, GridResult};
pub use event::{EditorEvent, EventBus, EventHandler};
pub use grid::{CellPos, DEFAULT_GRID_SIZE, GridModel, MAX_GRID_SIZE};
pub use input::{DragSession, DragState, PointerEvent};
pub use paint::{Mode, PaintEffect, PaintEngine};
pub use raster::ExportedImage;
pub use session::{EditorSession, Theme, ViewPrefs};
