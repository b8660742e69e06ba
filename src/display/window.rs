// Window module - Presents the pipeline's surface on screen
//
// A thin consumer of the video pipeline built on winit and pixels: each
// frame tick it asks the frame source for a new core frame, then uploads
// the converted surface to the GPU. When the surface is replaced (resize or
// filter change) the GPU buffer is re-created to match, detected through
// the surface generation counter.

use crate::video::{Surface, VideoError, VideoPipeline};
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Callback producing and submitting one core frame per tick
pub type FrameSource = Box<dyn FnMut(&mut VideoPipeline) -> Result<(), VideoError>>;

/// Window configuration
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    /// Nominal core width, used to size the window
    pub base_width: u32,
    /// Nominal core height, used to size the window
    pub base_height: u32,
    /// Scale factor (1x, 2x, 3x, 4x, etc.)
    pub scale: u32,
    /// Target frame rate in Hz
    pub target_fps: u32,
    /// Whether to enable VSync
    pub vsync: bool,
}

impl WindowConfig {
    /// Create a new window configuration with default values
    ///
    /// Default: 320x240 base resolution, 3x scale, 60 FPS, VSync enabled
    pub fn new() -> Self {
        Self {
            base_width: 320,
            base_height: 240,
            scale: 3,
            target_fps: 60,
            vsync: true,
        }
    }

    /// Set the nominal core resolution
    pub fn with_base_size(mut self, width: u32, height: u32) -> Self {
        self.base_width = width.max(1);
        self.base_height = height.max(1);
        self
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(1, 8); // Clamp between 1x and 8x
        self
    }

    /// Set the target frame rate
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps.max(1);
        self
    }

    /// Set VSync enabled or disabled
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Get the window width in pixels
    pub fn window_width(&self) -> u32 {
        self.base_width * self.scale
    }

    /// Get the window height in pixels
    pub fn window_height(&self) -> u32 {
        self.base_height * self.scale
    }

    /// Get the frame duration for the target FPS
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.target_fps as u64)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Display window for rendering the converted surface
pub struct VideoWindow {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    config: WindowConfig,
    pipeline: VideoPipeline,
    frame_source: FrameSource,
    shown_generation: u64,
    last_frame_time: Instant,
}

impl VideoWindow {
    /// Create a new display window (window is created when the event loop starts)
    pub fn new(config: WindowConfig, pipeline: VideoPipeline, frame_source: FrameSource) -> Self {
        Self {
            window: None,
            pixels: None,
            config,
            pipeline,
            frame_source,
            shown_generation: u64::MAX,
            last_frame_time: Instant::now(),
        }
    }

    /// Upload the current surface to the pixel buffer and render it
    fn render(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let Some(pixels) = &mut self.pixels else {
            return Ok(());
        };

        let surface: &Surface = self.pipeline.surface();

        // Surface was replaced since the last upload: re-create the GPU
        // buffer to match the new dimensions
        if surface.generation() != self.shown_generation {
            pixels.resize_buffer(surface.width().max(1) as u32, surface.height().max(1) as u32)?;
            self.shown_generation = surface.generation();
        }

        surface.write_rgba(pixels.frame_mut());
        pixels.render()?;
        Ok(())
    }

    /// Check if enough time has passed for the next frame
    fn should_render_frame(&mut self) -> bool {
        let elapsed = self.last_frame_time.elapsed();
        let frame_duration = self.config.frame_duration();

        if elapsed >= frame_duration {
            self.last_frame_time = Instant::now();
            true
        } else {
            false
        }
    }
}

impl ApplicationHandler for VideoWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title(format!(
                "retroframe - {}x{}",
                self.config.window_width(),
                self.config.window_height()
            ))
            .with_inner_size(LogicalSize::new(
                self.config.window_width(),
                self.config.window_height(),
            ))
            .with_resizable(false);

        let window = event_loop
            .create_window(window_attributes)
            .expect("Failed to create window");

        // Wrap window in Arc for shared ownership
        let window = Arc::new(window);
        let window_size = window.inner_size();

        // Create surface texture using Arc<Window> for safe 'static lifetime
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());

        let surface = self.pipeline.surface();
        let pixels = Pixels::new(
            surface.width().max(1) as u32,
            surface.height().max(1) as u32,
            surface_texture,
        )
        .expect("Failed to create pixel buffer");
        self.shown_generation = surface.generation();

        self.window = Some(window);
        self.pixels = Some(pixels);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                println!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                // Produce and render a frame if enough time has passed
                if self.should_render_frame() {
                    if let Err(err) = (self.frame_source)(&mut self.pipeline) {
                        eprintln!("Frame submission error: {}", err);
                        event_loop.exit();
                        return;
                    }

                    if let Err(err) = self.render() {
                        eprintln!("Render error: {}", err);
                        event_loop.exit();
                    }
                }

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Request a redraw
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Create and run the display window
///
/// # Arguments
/// * `config` - Window configuration
/// * `pipeline` - Video pipeline fed by `frame_source`
/// * `frame_source` - Callback producing one core frame per tick
///
/// # Returns
/// Result indicating success or error
pub fn run_viewer(
    config: WindowConfig,
    pipeline: VideoPipeline,
    frame_source: FrameSource,
) -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;

    // Set control flow based on VSync setting
    if config.vsync {
        event_loop.set_control_flow(ControlFlow::Wait);
    } else {
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    let mut viewer = VideoWindow::new(config, pipeline, frame_source);

    println!("Starting display window...");
    println!(
        "  Window size: {}x{}",
        config.window_width(),
        config.window_height()
    );
    println!("  Scale: {}x", config.scale);

    event_loop.run_app(&mut viewer)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_config_defaults() {
        let config = WindowConfig::new();
        assert_eq!(config.scale, 3);
        assert_eq!(config.target_fps, 60);
        assert!(config.vsync);
    }

    #[test]
    fn test_window_config_builder() {
        let config = WindowConfig::new()
            .with_base_size(256, 224)
            .with_scale(12) // clamped to 8
            .with_fps(0) // clamped to 1
            .with_vsync(false);

        assert_eq!(config.base_width, 256);
        assert_eq!(config.base_height, 224);
        assert_eq!(config.scale, 8);
        assert_eq!(config.target_fps, 1);
        assert!(!config.vsync);
        assert_eq!(config.window_width(), 256 * 8);
        assert_eq!(config.window_height(), 224 * 8);
    }

    #[test]
    fn test_frame_duration() {
        let config = WindowConfig::new().with_fps(60);
        assert_eq!(config.frame_duration(), Duration::from_micros(16_666));
    }
}
