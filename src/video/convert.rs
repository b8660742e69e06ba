// Row Converter - Applies a pixel codec across a whole frame
//
// Rows are independent: each one reads `width` source elements starting at
// `y * pitch` and writes `width` canonical pixels starting at `y * width`.
// That makes the row the unit of parallelism; large frames are partitioned
// across the rayon pool and joined before the call returns, so conversion
// stays synchronous from the caller's point of view.

use rayon::prelude::*;

use super::codec::{rgb1555_to_bgra, rgb565_to_bgra, PixelFormat};
use super::frame::{FrameData, SourceFrame};

/// Frames below this pixel count convert on the calling thread; the pool
/// dispatch overhead is not worth it for tiny surfaces.
const PARALLEL_PIXEL_THRESHOLD: usize = 64 * 64;

/// Convert a whole source frame into a canonical pixel buffer
///
/// The destination must hold exactly `width * height` pixels and the frame
/// descriptor must already have passed [`SourceFrame::validate`]; the
/// pipeline guarantees both before calling in.
pub fn convert_into(frame: &SourceFrame, dst: &mut [u32]) {
    debug_assert_eq!(dst.len(), frame.width * frame.height);

    if frame.width == 0 || frame.height == 0 {
        return;
    }

    match (frame.format, frame.data) {
        (PixelFormat::Rgb1555, FrameData::Packed16(src)) => {
            convert_rows_16(src, dst, frame.width, frame.pitch, rgb1555_to_bgra);
        }
        (PixelFormat::Rgb565, FrameData::Packed16(src)) => {
            convert_rows_16(src, dst, frame.width, frame.pitch, rgb565_to_bgra);
        }
        (PixelFormat::Xrgb8888, FrameData::Packed32(src)) => {
            copy_rows_32(src, dst, frame.width, frame.pitch);
        }
        _ => debug_assert!(false, "frame descriptor was not validated"),
    }
}

fn convert_rows_16(src: &[u16], dst: &mut [u32], width: usize, pitch: usize, codec: fn(u16) -> u32) {
    let convert_row = |y: usize, dst_row: &mut [u32]| {
        let src_row = &src[y * pitch..][..width];
        for (d, &s) in dst_row.iter_mut().zip(src_row) {
            *d = codec(s);
        }
    };

    if dst.len() >= PARALLEL_PIXEL_THRESHOLD {
        dst.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, dst_row)| convert_row(y, dst_row));
    } else {
        for (y, dst_row) in dst.chunks_exact_mut(width).enumerate() {
            convert_row(y, dst_row);
        }
    }
}

/// XRGB8888 already matches the canonical layout; rows are straight copies
/// that drop the source padding.
fn copy_rows_32(src: &[u32], dst: &mut [u32], width: usize, pitch: usize) {
    let copy_row = |y: usize, dst_row: &mut [u32]| {
        dst_row.copy_from_slice(&src[y * pitch..][..width]);
    };

    if dst.len() >= PARALLEL_PIXEL_THRESHOLD {
        dst.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, dst_row)| copy_row(y, dst_row));
    } else {
        for (y, dst_row) in dst.chunks_exact_mut(width).enumerate() {
            copy_row(y, dst_row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(frame: &SourceFrame) -> Vec<u32> {
        frame.validate().unwrap();
        let mut dst = vec![0u32; frame.width * frame.height];
        convert_into(frame, &mut dst);
        dst
    }

    #[test]
    fn test_single_pixel_1555_alpha_only() {
        let src = [0x8000u16];
        let frame = SourceFrame::packed(PixelFormat::Rgb1555, FrameData::Packed16(&src), 1, 1);
        let out = convert(&frame);
        // Alpha byte 0xFF, color bytes all zero
        assert_eq!(out, vec![0xFF000000]);
    }

    #[test]
    fn test_single_pixel_565_red() {
        let src = [0xF800u16];
        let frame = SourceFrame::packed(PixelFormat::Rgb565, FrameData::Packed16(&src), 1, 1);
        let out = convert(&frame);
        assert_eq!(out, vec![0xFFFF0000]);
    }

    #[test]
    fn test_xrgb8888_passthrough() {
        let src = [0x11223344u32, 0x55667788, 0x99AABBCC, 0xDDEEFF00];
        let frame = SourceFrame::packed(PixelFormat::Xrgb8888, FrameData::Packed32(&src), 2, 2);
        assert_eq!(convert(&frame), src.to_vec());
    }

    #[test]
    fn test_pitch_padding_skipped() {
        // 3x2 frame with pitch 5: padding elements carry a sentinel value
        // that must never reach the output
        let sentinel = 0xDEADu16;
        let src = [
            0x0001, 0x0002, 0x0003, sentinel, sentinel, //
            0x0004, 0x0005, 0x0006, sentinel, sentinel,
        ];
        let padded =
            SourceFrame::with_pitch(PixelFormat::Rgb565, FrameData::Packed16(&src), 3, 2, 5);

        let tight_src = [0x0001u16, 0x0002, 0x0003, 0x0004, 0x0005, 0x0006];
        let tight = SourceFrame::packed(PixelFormat::Rgb565, FrameData::Packed16(&tight_src), 3, 2);

        let padded_out = convert(&padded);
        assert_eq!(padded_out, convert(&tight));
        let sentinel_pixel = rgb565_to_bgra(sentinel);
        assert!(padded_out.iter().all(|&p| p != sentinel_pixel));
    }

    #[test]
    fn test_conversion_idempotent() {
        let src: Vec<u16> = (0..64u16).map(|v| v.wrapping_mul(1021)).collect();
        let frame = SourceFrame::packed(PixelFormat::Rgb1555, FrameData::Packed16(&src), 8, 8);
        assert_eq!(convert(&frame), convert(&frame));
    }

    #[test]
    fn test_parallel_path_matches_serial() {
        // 128x64 is above the parallel threshold; check it against a
        // row-by-row serial reference
        let width = 128;
        let height = 64;
        let pitch = width + 16;
        let src: Vec<u16> = (0..pitch * height).map(|v| v as u16).collect();
        let frame = SourceFrame::with_pitch(
            PixelFormat::Rgb565,
            FrameData::Packed16(&src),
            width,
            height,
            pitch,
        );

        let out = convert(&frame);
        for y in 0..height {
            for x in 0..width {
                assert_eq!(out[y * width + x], rgb565_to_bgra(src[y * pitch + x]));
            }
        }
    }

    #[test]
    fn test_zero_sized_frame() {
        let frame = SourceFrame::packed(PixelFormat::Rgb565, FrameData::Packed16(&[]), 0, 0);
        assert_eq!(convert(&frame), Vec::<u32>::new());
    }
}
