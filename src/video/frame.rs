// Source Frame - Borrowed view of one raw core frame
//
// The core hands the pipeline a pointer-and-dimensions tuple whose backing
// memory is only valid for the duration of one submit call. That contract
// is expressed here with borrowed slices: a SourceFrame cannot outlive the
// buffer it views, and the pipeline copies everything it needs out of it
// before returning.

use super::codec::PixelFormat;
use super::error::VideoError;

/// Borrowed source pixel data, typed by element width
///
/// The two 16-bit formats share `Packed16`; XRGB8888 uses `Packed32`.
#[derive(Debug, Clone, Copy)]
pub enum FrameData<'a> {
    Packed16(&'a [u16]),
    Packed32(&'a [u32]),
}

impl FrameData<'_> {
    /// Number of source pixel elements in the buffer
    pub fn len(&self) -> usize {
        match self {
            FrameData::Packed16(data) => data.len(),
            FrameData::Packed32(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of one buffer element in bytes
    pub fn element_size(&self) -> usize {
        match self {
            FrameData::Packed16(_) => 2,
            FrameData::Packed32(_) => 4,
        }
    }
}

/// One raw frame as emitted by a core
///
/// `pitch` is the distance between row starts in source pixel units and may
/// exceed `width` when the core pads its scanlines; the padding elements are
/// never read into the output.
#[derive(Debug, Clone, Copy)]
pub struct SourceFrame<'a> {
    pub format: PixelFormat,
    pub data: FrameData<'a>,
    pub width: usize,
    pub height: usize,
    pub pitch: usize,
}

impl<'a> SourceFrame<'a> {
    /// Create a frame descriptor with pitch equal to width (no row padding)
    pub fn packed(format: PixelFormat, data: FrameData<'a>, width: usize, height: usize) -> Self {
        Self::with_pitch(format, data, width, height, width)
    }

    /// Create a frame descriptor with an explicit row pitch
    pub fn with_pitch(
        format: PixelFormat,
        data: FrameData<'a>,
        width: usize,
        height: usize,
        pitch: usize,
    ) -> Self {
        Self {
            format,
            data,
            width,
            height,
            pitch,
        }
    }

    /// Minimum number of source elements the descriptor requires
    ///
    /// The last row only needs `width` elements; its trailing padding may
    /// legitimately be absent from the buffer. Saturating arithmetic keeps
    /// absurd pitch/height combinations from wrapping: a saturated result
    /// exceeds any real slice length, so such descriptors fail validation
    /// as too short instead of overflowing.
    pub fn required_len(&self) -> usize {
        if self.width == 0 || self.height == 0 {
            return 0;
        }
        self.pitch
            .saturating_mul(self.height - 1)
            .saturating_add(self.width)
    }

    /// Check the descriptor against the buffer it views
    ///
    /// Every submitted frame goes through this check; the converter itself
    /// assumes a validated descriptor.
    ///
    /// # Errors
    /// * `PitchTooSmall` if `pitch < width`
    /// * `FormatMismatch` if the buffer element width does not fit `format`
    /// * `FrameTooShort` if the buffer holds fewer elements than
    ///   `pitch * (height - 1) + width`
    pub fn validate(&self) -> Result<(), VideoError> {
        if self.pitch < self.width {
            return Err(VideoError::PitchTooSmall {
                pitch: self.pitch,
                width: self.width,
            });
        }

        if self.data.element_size() != self.format.bytes_per_pixel() {
            return Err(VideoError::FormatMismatch {
                format: self.format,
            });
        }

        let required = self.required_len();
        if self.data.len() < required {
            return Err(VideoError::FrameTooShort {
                required,
                actual: self.data.len(),
            });
        }

        Ok(())
    }
}
