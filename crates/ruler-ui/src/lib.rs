//! Ruler picker core: drag a tape of ticks to pick a value.
//!
//! [`ScaleEngine`] turns pointer displacement into a clamped, snapped integer
//! value and coasts the tape after a fast release. [`TapeLayout`] computes
//! where ticks land for a given viewport, and [`ScaleController`] wires raw
//! pointer events and frame timestamps into the engine.

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod fling;
pub mod frame;
pub mod layout;

pub use config::{FlingConfig, FlingDecay, RangeConfig};
pub use controller::{FrameOutcome, ScaleController};
pub use engine::{AdvanceResult, ScaleEngine, ScrollPhase, ValueChangeListener};
pub use error::ScaleError;
pub use fling::{FlingState, FlingStep};
pub use frame::FrameTicker;
pub use layout::{TapeLayout, Tick, TickKind, TickList, TICK_CULL_MARGIN};

pub use ruler_foundation::{HistoricalSample, PointerEvent, PointerEventKind};
