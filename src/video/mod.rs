// Video module - Frame conversion and surface management
//
// This module provides:
// - Pixel codecs for the three libretro packed formats
// - Row conversion with source pitch handling (rayon-parallel for large frames)
// - The surface store (allocation, resize-on-demand, replacement listeners)
// - The frame pipeline tying them together

pub mod codec;
pub mod convert;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod surface;

pub use codec::{rgb1555_to_bgra, rgb565_to_bgra, xrgb8888_to_bgra, PixelFormat};
pub use convert::convert_into;
pub use error::VideoError;
pub use frame::{FrameData, SourceFrame};
pub use pipeline::VideoPipeline;
pub use surface::{FilterMode, Surface, SurfaceStore};
