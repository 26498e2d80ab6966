//! Reorderable icon grid with an optional tray row: long-press an icon, drag
//! it around, and the other icons slide out of the way.

pub mod config;
pub mod engine;
pub mod events;
pub mod geometry;
pub mod gesture;

pub use config::{BoardConfig, ConfigError};
pub use engine::{DragSession, EnginePhase, PendingSwap, Placement, PlacementError, ReorderEngine};
pub use events::{RenderRequest, RenderSink};
pub use geometry::{Point, Region, RegionLayout};
pub use gesture::{GestureController, GestureOutcome, PointerEvent};
