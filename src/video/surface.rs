// Surface Store - Owns the canonical destination pixel buffer
//
// The store holds exactly one surface at a time. A surface is replaced, not
// resized in place, whenever the requested dimensions or filter mode differ
// from the current ones; consumers that cached a view learn about the
// replacement through the registered listeners (and can cheaply poll the
// generation counter instead).

use log::debug;
use serde::{Deserialize, Serialize};

use super::error::VideoError;

/// Sampling hint attached to a surface
///
/// Mirrors the texture filter of the presentation layer; the store itself
/// only compares it, but a change forces reallocation so the consumer
/// re-creates its texture with the new mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    /// Nearest-neighbor sampling (crisp pixels, the retro default)
    Nearest,

    /// Bilinear sampling
    Linear,
}

impl Default for FilterMode {
    fn default() -> Self {
        FilterMode::Nearest
    }
}

/// Dimensions of the placeholder surface held before the first frame
pub const DEFAULT_SURFACE_WIDTH: usize = 8;
pub const DEFAULT_SURFACE_HEIGHT: usize = 8;

/// An owned, tightly packed BGRA32 pixel buffer
///
/// Row pitch always equals width; the pixel count is exactly
/// `width * height` for the lifetime of the surface.
pub struct Surface {
    width: usize,
    height: usize,
    filter_mode: FilterMode,
    generation: u64,
    pixels: Vec<u32>,
}

impl Surface {
    fn allocate(
        width: usize,
        height: usize,
        filter_mode: FilterMode,
        generation: u64,
    ) -> Result<Self, VideoError> {
        let count = width
            .checked_mul(height)
            .ok_or(VideoError::Allocation { width, height })?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(count)
            .map_err(|_| VideoError::Allocation { width, height })?;
        pixels.resize(count, 0);

        Ok(Self {
            width,
            height,
            filter_mode,
            generation,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    /// Monotonic counter bumped on every replacement
    ///
    /// Two surface views with the same generation are the same allocation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The canonical pixel data, row-major, `width * height` elements
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Write the surface out as R,G,B,A bytes for texture upload
    ///
    /// # Panics
    /// Panics if `output` is shorter than `width * height * 4` bytes.
    pub fn write_rgba(&self, output: &mut [u8]) {
        assert!(
            output.len() >= self.pixels.len() * 4,
            "Output buffer too small for RGBA conversion"
        );

        for (&pixel, out) in self.pixels.iter().zip(output.chunks_exact_mut(4)) {
            out[0] = (pixel >> 16) as u8; // R
            out[1] = (pixel >> 8) as u8; // G
            out[2] = pixel as u8; // B
            out[3] = (pixel >> 24) as u8; // A
        }
    }
}

/// Callback invoked with the new surface after each replacement
pub type SurfaceListener = Box<dyn FnMut(&Surface)>;

/// Owner of the current surface and its replacement notifications
///
/// Not internally synchronized: `ensure` must be driven by a single logical
/// producer, which matches the one-video-callback-per-frame contract of the
/// cores this frontend serves.
pub struct SurfaceStore {
    surface: Surface,
    listeners: Vec<SurfaceListener>,
    generation: u64,
}

impl SurfaceStore {
    /// Create a store holding the default minimal surface
    pub fn new() -> Self {
        let surface = Surface::allocate(
            DEFAULT_SURFACE_WIDTH,
            DEFAULT_SURFACE_HEIGHT,
            FilterMode::default(),
            0,
        )
        .expect("default surface allocation cannot fail");

        Self {
            surface,
            listeners: Vec::new(),
            generation: 0,
        }
    }

    /// The current surface
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Register a replacement listener
    ///
    /// Listeners fire synchronously inside [`SurfaceStore::ensure`], exactly
    /// once per replacement, after the new surface is installed.
    pub fn on_replaced(&mut self, listener: impl FnMut(&Surface) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Return a surface matching the requested shape, reallocating if needed
    ///
    /// When the held surface already matches width, height and filter mode
    /// it is returned untouched and no notification fires. Otherwise a new
    /// surface is allocated first; only once that succeeds is the old one
    /// discarded (replace-on-success), the generation bumped, and every
    /// listener invoked with the replacement.
    ///
    /// # Errors
    /// `VideoError::Allocation` if the new buffer cannot be reserved; the
    /// prior surface stays valid in that case.
    pub fn ensure(
        &mut self,
        width: usize,
        height: usize,
        filter_mode: FilterMode,
    ) -> Result<&mut Surface, VideoError> {
        let matches = self.surface.width == width
            && self.surface.height == height
            && self.surface.filter_mode == filter_mode;
        if matches {
            return Ok(&mut self.surface);
        }

        let replacement = Surface::allocate(width, height, filter_mode, self.generation + 1)?;
        self.generation += 1;

        let old = std::mem::replace(&mut self.surface, replacement);
        debug!(
            "surface replaced: {}x{} ({:?}) -> {}x{} ({:?}), generation {}",
            old.width, old.height, old.filter_mode, width, height, filter_mode, self.generation
        );
        drop(old);

        for listener in &mut self.listeners {
            listener(&self.surface);
        }

        Ok(&mut self.surface)
    }
}

impl Default for SurfaceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_store_starts_with_default_surface() {
        let store = SurfaceStore::new();
        assert_eq!(store.surface().width(), DEFAULT_SURFACE_WIDTH);
        assert_eq!(store.surface().height(), DEFAULT_SURFACE_HEIGHT);
        assert_eq!(store.surface().filter_mode(), FilterMode::Nearest);
        assert_eq!(
            store.surface().pixels().len(),
            DEFAULT_SURFACE_WIDTH * DEFAULT_SURFACE_HEIGHT
        );
    }

    #[test]
    fn test_ensure_matching_is_a_no_op() {
        let mut store = SurfaceStore::new();
        let notifications = Rc::new(Cell::new(0));
        let counter = notifications.clone();
        store.on_replaced(move |_| counter.set(counter.get() + 1));

        store.ensure(320, 240, FilterMode::Nearest).unwrap();
        assert_eq!(notifications.get(), 1);
        let generation = store.surface().generation();

        // Same shape again: same surface, no further notification
        store.ensure(320, 240, FilterMode::Nearest).unwrap();
        assert_eq!(notifications.get(), 1);
        assert_eq!(store.surface().generation(), generation);
    }

    #[test]
    fn test_ensure_resize_fires_one_notification() {
        let mut store = SurfaceStore::new();
        let seen = Rc::new(Cell::new((0usize, 0usize, 0u32)));
        let sink = seen.clone();
        store.on_replaced(move |surface| {
            let (_, _, count) = sink.get();
            sink.set((surface.width(), surface.height(), count + 1));
        });

        store.ensure(256, 224, FilterMode::Nearest).unwrap();
        assert_eq!(seen.get(), (256, 224, 1));
        assert_eq!(store.surface().pixels().len(), 256 * 224);

        store.ensure(512, 448, FilterMode::Nearest).unwrap();
        assert_eq!(seen.get(), (512, 448, 2));
        assert_eq!(store.surface().pixels().len(), 512 * 448);
    }

    #[test]
    fn test_filter_change_forces_reallocation() {
        let mut store = SurfaceStore::new();
        store.ensure(100, 100, FilterMode::Nearest).unwrap();
        let generation = store.surface().generation();

        store.ensure(100, 100, FilterMode::Linear).unwrap();
        assert!(store.surface().generation() > generation);
        assert_eq!(store.surface().filter_mode(), FilterMode::Linear);
        assert_eq!(store.surface().pixels().len(), 100 * 100);
    }

    #[test]
    fn test_replacement_surface_is_zeroed() {
        let mut store = SurfaceStore::new();
        let surface = store.ensure(16, 16, FilterMode::Nearest).unwrap();
        surface.pixels_mut().fill(0xFFFFFFFF);

        let surface = store.ensure(32, 32, FilterMode::Nearest).unwrap();
        assert!(surface.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_allocation_overflow_keeps_prior_surface() {
        let mut store = SurfaceStore::new();
        store.ensure(64, 64, FilterMode::Nearest).unwrap();
        let generation = store.surface().generation();

        let result = store.ensure(usize::MAX, 2, FilterMode::Nearest);
        assert_eq!(
            result.err(),
            Some(VideoError::Allocation {
                width: usize::MAX,
                height: 2
            })
        );
        // Prior surface untouched
        assert_eq!(store.surface().width(), 64);
        assert_eq!(store.surface().generation(), generation);
    }

    #[test]
    fn test_write_rgba_byte_order() {
        let mut store = SurfaceStore::new();
        let surface = store.ensure(1, 1, FilterMode::Nearest).unwrap();
        surface.pixels_mut()[0] = 0x80FF4020; // A=0x80 R=0xFF G=0x40 B=0x20

        let mut out = [0u8; 4];
        store.surface().write_rgba(&mut out);
        assert_eq!(out, [0xFF, 0x40, 0x20, 0x80]);
    }
}
