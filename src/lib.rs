//! Frame pacing for a headless movement demo.
//!
//! The [`pacing`] module decides between a software frame cap and a hardware
//! vertical-sync divisor. [`engine`] and [`ui`] hold the demo scene and the
//! settings panel that drive it.

pub mod engine;
pub mod error;
pub mod pacing;
pub mod telemetry;
pub mod ui;

pub use error::PacingError;
pub use pacing::{
    recompute_decision, DisplayContext, FramePacingController, PacingDecision, PacingMode,
    PacingRequest, RefreshRate, ScreenMode, SoftwareCap,
};
