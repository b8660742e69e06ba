// retroframe - Main Entry Point
//
// This is a demonstration of the frame pipeline with a generated test
// pattern. In a full frontend, the frame source would be a libretro core's
// video callback instead of the pattern generator below.

use retroframe::video::{FrameData, PixelFormat, SourceFrame};
use retroframe::{run_viewer, VideoConfig, VideoPipeline, WindowConfig};

/// Demo pattern resolution
const PATTERN_WIDTH: usize = 256;
const PATTERN_HEIGHT: usize = 224;

/// Source rows are padded to exercise the pitch handling
const PATTERN_PITCH: usize = PATTERN_WIDTH + 16;

/// Render one animated RGB565 gradient frame into `buffer`
fn fill_pattern(buffer: &mut [u16], tick: u32) {
    for y in 0..PATTERN_HEIGHT {
        for x in 0..PATTERN_WIDTH {
            let r = ((x + tick as usize) / 8 % 32) as u16;
            let g = ((y + tick as usize) / 4 % 64) as u16;
            let b = ((x + y) / 16 % 32) as u16;
            buffer[y * PATTERN_PITCH + x] = (r << 11) | (g << 5) | b;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("retroframe v0.1.0");
    println!("=================");
    println!();

    // Load or create video configuration
    let config_path = "video_config.toml";
    let video_config = VideoConfig::load_or_default(config_path);
    println!("Video configuration loaded from '{}'", config_path);
    println!();

    let window_config = WindowConfig::new()
        .with_base_size(PATTERN_WIDTH as u32, PATTERN_HEIGHT as u32)
        .with_scale(video_config.scale)
        .with_fps(video_config.fps)
        .with_vsync(video_config.vsync);

    let pipeline = VideoPipeline::with_filter_mode(video_config.filter_mode);

    // Frame source: an animated RGB565 gradient with padded rows
    let mut buffer = vec![0u16; PATTERN_PITCH * PATTERN_HEIGHT];
    let mut tick = 0u32;
    let frame_source = Box::new(move |pipeline: &mut VideoPipeline| {
        fill_pattern(&mut buffer, tick);
        tick = tick.wrapping_add(1);

        let frame = SourceFrame::with_pitch(
            PixelFormat::Rgb565,
            FrameData::Packed16(&buffer),
            PATTERN_WIDTH,
            PATTERN_HEIGHT,
            PATTERN_PITCH,
        );
        pipeline.submit_frame(&frame)
    });

    println!("Press the close button or Ctrl+C to exit.");
    println!();

    run_viewer(window_config, pipeline, frame_source)?;

    println!("Display window closed.");
    Ok(())
}
