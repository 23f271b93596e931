//! Input plumbing shared by the ruler picker: pointer events, release
//! velocity estimation and the gesture thresholds derived from the platform.

pub mod gesture_constants;
pub mod pointer;
pub mod velocity_tracker;

pub use gesture_constants::*;
pub use pointer::{HistoricalSample, PointerEvent, PointerEventKind};
pub use velocity_tracker::VelocityTracker1D;
