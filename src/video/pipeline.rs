// Video Pipeline - Public entry point for raw core frames
//
// One call does everything: validate the descriptor, make sure the surface
// matches the frame's shape, convert, and flag the result for the consumer.
// The call blocks until the surface holds the new frame, so frames are
// always processed in submission order.

use log::trace;

use super::convert::convert_into;
use super::error::VideoError;
use super::frame::SourceFrame;
use super::surface::{FilterMode, Surface, SurfaceStore};

/// Frame conversion pipeline and surface owner
///
/// Holds no state beyond the current surface, the active filter mode, and
/// a "frame ready" flag the consumer polls. Not internally synchronized;
/// drive it from a single logical producer.
pub struct VideoPipeline {
    store: SurfaceStore,
    filter_mode: FilterMode,
    frame_ready: bool,
}

impl VideoPipeline {
    pub fn new() -> Self {
        Self {
            store: SurfaceStore::new(),
            filter_mode: FilterMode::default(),
            frame_ready: false,
        }
    }

    pub fn with_filter_mode(filter_mode: FilterMode) -> Self {
        Self {
            store: SurfaceStore::new(),
            filter_mode,
            frame_ready: false,
        }
    }

    /// Convert one raw frame into the surface
    ///
    /// Ensures the surface matches the frame's dimensions and the active
    /// filter mode (replacing it and notifying listeners when it does not),
    /// then converts every row. Synchronous: when this returns `Ok`, the
    /// surface holds the frame and is marked ready.
    ///
    /// The frame's backing memory is only borrowed for the duration of this
    /// call; nothing of it is retained.
    ///
    /// # Errors
    /// Descriptor problems surface as the `VideoError` validation variants;
    /// a failed surface allocation as `VideoError::Allocation`, leaving the
    /// previous surface intact.
    pub fn submit_frame(&mut self, frame: &SourceFrame) -> Result<(), VideoError> {
        frame.validate()?;
        trace!(
            "frame submitted: {} {}x{} pitch {}",
            frame.format,
            frame.width,
            frame.height,
            frame.pitch
        );

        let surface = self
            .store
            .ensure(frame.width, frame.height, self.filter_mode)?;
        convert_into(frame, surface.pixels_mut());

        self.frame_ready = true;
        Ok(())
    }

    /// Set the sampling mode for subsequent frames
    ///
    /// Applied lazily: the surface is reallocated by the next
    /// `submit_frame`, not immediately.
    pub fn set_filter_mode(&mut self, filter_mode: FilterMode) {
        self.filter_mode = filter_mode;
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    /// The current surface
    pub fn surface(&self) -> &Surface {
        self.store.surface()
    }

    /// Whether the surface holds a frame not yet consumed
    pub fn frame_ready(&self) -> bool {
        self.frame_ready
    }

    /// Consume the ready flag, returning the surface if a frame is pending
    pub fn take_frame(&mut self) -> Option<&Surface> {
        if self.frame_ready {
            self.frame_ready = false;
            Some(self.store.surface())
        } else {
            None
        }
    }

    /// Register a callback fired whenever the surface is replaced
    ///
    /// This is the seam the presentation layer uses to re-create its GPU
    /// texture when dimensions or filter mode change.
    pub fn on_surface_replaced(&mut self, listener: impl FnMut(&Surface) + 'static) {
        self.store.on_replaced(listener);
    }
}

impl Default for VideoPipeline {
    fn default() -> Self {
        Self::new()
    }
}
