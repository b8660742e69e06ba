// Pixel Codec - Packed source pixel to canonical BGRA32 conversion
//
// Libretro cores hand us frames in one of three packed formats. Everything
// downstream (surface storage, texture upload) works on a single canonical
// 32-bit layout, so each format gets one pure conversion function here.
//
// Canonical layout: 0xAARRGGBB in-register, which is B,G,R,A byte order
// in little-endian memory (BGRA32).

use serde::{Deserialize, Serialize};

/// Pixel formats a libretro-style core may emit
///
/// These mirror the three formats of the libretro video callback contract:
/// `RETRO_PIXEL_FORMAT_0RGB1555`, `RETRO_PIXEL_FORMAT_XRGB8888` and
/// `RETRO_PIXEL_FORMAT_RGB565`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 16 bits per pixel: 1-bit alpha, 5 bits each for red/green/blue
    Rgb1555,

    /// 32 bits per pixel: 8 bits per channel, X/alpha passed through
    Xrgb8888,

    /// 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue, no alpha
    Rgb565,
}

impl PixelFormat {
    /// Size of one source pixel in bytes
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgb1555 | PixelFormat::Rgb565 => 2,
            PixelFormat::Xrgb8888 => 4,
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelFormat::Rgb1555 => write!(f, "0RGB1555"),
            PixelFormat::Xrgb8888 => write!(f, "XRGB8888"),
            PixelFormat::Rgb565 => write!(f, "RGB565"),
        }
    }
}

/// Convert one 0RGB1555 pixel to canonical BGRA32
///
/// Bit 15 is alpha, bits 14-10 red, 9-5 green, 4-0 blue. The three 5-bit
/// channels land in the high bits of their output bytes in one shift each,
/// and `(rgb >> 5) & 0x070707` replicates each channel's top three bits
/// into its low bits, which is the per-channel `(c << 3) | (c >> 2)`
/// expansion computed for all three channels at once. The alpha bit maps to
/// 0xFF or 0x00; there is no partial alpha.
#[inline]
pub fn rgb1555_to_bgra(packed: u16) -> u32 {
    let a = (packed as u32) & 0x8000;
    let r = (packed as u32) & 0x7C00;
    let g = (packed as u32) & 0x03E0;
    let b = (packed as u32) & 0x001F;
    let rgb = (r << 9) | (g << 6) | (b << 3);
    (a * 0x1FE00) | rgb | ((rgb >> 5) & 0x070707)
}

/// Convert one RGB565 pixel to canonical BGRA32
///
/// Red and blue expand with `(c << 3) | (c >> 2)`, the 6-bit green channel
/// with `(c << 2) | (c >> 4)`. Output is always fully opaque.
#[inline]
pub fn rgb565_to_bgra(packed: u16) -> u32 {
    let r = ((packed as u32) >> 11) & 0x1F;
    let g = ((packed as u32) >> 5) & 0x3F;
    let b = (packed as u32) & 0x1F;
    let r = (r << 3) | (r >> 2);
    let g = (g << 2) | (g >> 4);
    let b = (b << 3) | (b >> 2);
    (0xFF << 24) | (r << 16) | (g << 8) | b
}

/// Convert one XRGB8888 pixel to canonical BGRA32
///
/// The channel order already matches the canonical layout; the X byte is
/// passed through untouched rather than forced opaque.
#[inline]
pub fn xrgb8888_to_bgra(packed: u32) -> u32 {
    packed
}
