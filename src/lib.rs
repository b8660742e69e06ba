// retroframe - libretro-style video frontend library
// Frame conversion and surface management for emulation cores

// Public modules
pub mod config;
pub mod display;
pub mod video;

// Re-export main types for convenience
pub use config::VideoConfig;
pub use display::{run_viewer, VideoWindow, WindowConfig};
pub use video::{
    FilterMode, FrameData, PixelFormat, SourceFrame, Surface, SurfaceStore, VideoError,
    VideoPipeline,
};
