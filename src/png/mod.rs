//! Holds the tools for walking and rewriting a PNG datastream.
//!
//! A PNG is an 8-byte signature followed by a series of "chunks". Each chunk
//! is laid out as:
//! * A 4-byte big-endian length, counting only the data bytes.
//! * A 4-byte chunk type, which is (conventionally) four ASCII letters.
//! * `length` bytes of chunk data.
//! * A 4-byte big-endian CRC, computed over the type and data bytes (but not
//!   the length).
//!
//! The very first chunk is supposed to be the [`IHDR`], which describes the
//! image's dimensions and pixel format. The [`transcode`] function copies a
//! datastream from a reader to a writer one chunk at a time, and if the header
//! says the image is RGBA it's rewritten to say RGB instead. All other chunks,
//! including the compressed image data, are passed along byte-for-byte with
//! their original CRC values.
//!
//! Since the pixel data isn't touched, the output is only a *valid* RGB image
//! if the encoder actually wrote 3-channel scanlines into an RGBA-labeled
//! file. That's the case this tool exists to repair.

mod crc32;
pub use crc32::*;

mod chunk;
pub use chunk::*;

mod ihdr;
pub use ihdr::*;

#[cfg(feature = "std")]
mod transcode;
#[cfg(feature = "std")]
pub use transcode::*;


/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the bytes given start with the PNG signature.
#[inline]
#[must_use]
pub fn is_png_signature(bytes: &[u8]) -> bool {
  bytes.starts_with(&PNG_SIGNATURE)
}
