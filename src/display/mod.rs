// Display module - Window creation and surface presentation
//
// This module provides:
// - Window creation with scaling support (winit)
// - Surface upload and rendering (pixels)
// - Frame pacing toward a target FPS

pub mod window;

pub use window::{run_viewer, FrameSource, VideoWindow, WindowConfig};
