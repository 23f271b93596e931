//! Test harness for the ruler picker.
//!
//! Everything here runs on synthetic time: [`FlingRobot`] steps flings at a
//! fixed 60 Hz and [`GestureRobot`] stamps pointer events with a virtual
//! uptime, so tests never sleep or depend on the wall clock.

pub mod recorder;
pub mod robot;

pub use recorder::RecordingListener;
pub use robot::{FlingRobot, GestureRobot, FRAME_NANOS};
