// Video pipeline errors
//
// Codec functions are total and never fail; every failure surface in the
// pipeline is either a bad frame descriptor or a surface allocation.

use super::codec::PixelFormat;

/// Errors that can occur while submitting or converting a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoError {
    /// Row pitch is smaller than the logical width
    PitchTooSmall { pitch: usize, width: usize },

    /// Source buffer holds fewer elements than the descriptor claims
    FrameTooShort { required: usize, actual: usize },

    /// Source buffer element width does not match the format tag
    FormatMismatch { format: PixelFormat },

    /// Destination surface could not be allocated
    Allocation { width: usize, height: usize },
}

impl std::fmt::Display for VideoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoError::PitchTooSmall { pitch, width } => {
                write!(f, "Pitch {} is smaller than frame width {}", pitch, width)
            }
            VideoError::FrameTooShort { required, actual } => {
                write!(
                    f,
                    "Source buffer too short: {} elements required, {} provided",
                    required, actual
                )
            }
            VideoError::FormatMismatch { format } => {
                write!(f, "Source buffer element width does not match {}", format)
            }
            VideoError::Allocation { width, height } => {
                write!(f, "Failed to allocate {}x{} surface", width, height)
            }
        }
    }
}

impl std::error::Error for VideoError {}
