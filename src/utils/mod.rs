//! Presentation and logging helpers for drivers of the engine

pub mod display;
pub mod logging;

pub use display::{
    apply_click, density, present, ColorOutput, PresentationAdapter, RunReport, TextRenderer,
    TextStyle,
};
pub use logging::init_logging;
