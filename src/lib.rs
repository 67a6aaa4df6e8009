//! raging-sea library - Animated water surface with live parameter tuning

pub mod camera;
pub mod cli;
pub mod clock;
pub mod overlay;
pub mod panel;
pub mod params;
pub mod preview;
pub mod rendering;
pub mod viewport;
pub mod water;
