use bytemuck::{Pod, Zeroable};

use crate::TranscodeError;

/// The data of an image header chunk, exactly as it's laid out in the file.
///
/// This is 13 bytes with an alignment of 1, so it can be read from and written
/// to the chunk data directly. All the multi-byte fields are big-endian, use
/// the accessor methods to get native values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct IHDR {
  width: [u8; 4],
  height: [u8; 4],
  bit_depth: u8,
  color_type: u8,
  compression_method: u8,
  filter_method: u8,
  interlace_method: u8,
}

impl IHDR {
  /// Greyscale
  pub const COLOR_Y: u8 = 0;
  /// Red, green, blue
  pub const COLOR_RGB: u8 = 2;
  /// Palette index
  pub const COLOR_INDEXED: u8 = 3;
  /// Greyscale with alpha
  pub const COLOR_YA: u8 = 4;
  /// Red, green, blue, alpha
  pub const COLOR_RGBA: u8 = 6;

  /// Size of the header data in bytes.
  pub const LEN: usize = 13;

  /// Makes a header from native values.
  #[inline]
  #[must_use]
  pub const fn new(
    width: u32, height: u32, bit_depth: u8, color_type: u8, compression_method: u8,
    filter_method: u8, interlace_method: u8,
  ) -> Self {
    Self {
      width: width.to_be_bytes(),
      height: height.to_be_bytes(),
      bit_depth,
      color_type,
      compression_method,
      filter_method,
      interlace_method,
    }
  }

  /// Image width in pixels.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    u32::from_be_bytes(self.width)
  }
  /// Image height in pixels.
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    u32::from_be_bytes(self.height)
  }
  /// Bits per sample (or per palette index).
  #[inline]
  #[must_use]
  pub const fn bit_depth(&self) -> u8 {
    self.bit_depth
  }
  /// One of the `COLOR_` constants, if the header is valid.
  #[inline]
  #[must_use]
  pub const fn color_type(&self) -> u8 {
    self.color_type
  }
  #[inline]
  #[must_use]
  pub const fn compression_method(&self) -> u8 {
    self.compression_method
  }
  #[inline]
  #[must_use]
  pub const fn filter_method(&self) -> u8 {
    self.filter_method
  }
  #[inline]
  #[must_use]
  pub const fn interlace_method(&self) -> u8 {
    self.interlace_method
  }

  /// The header's serialized bytes.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    bytemuck::bytes_of(self)
  }

  /// If this header is RGBA, gives the same header marked as RGB.
  ///
  /// Every other field is left alone. For any other color type this gives
  /// `None`, meaning the chunk should go through as-is.
  #[inline]
  #[must_use]
  pub const fn without_alpha(self) -> Option<Self> {
    if self.color_type == Self::COLOR_RGBA {
      Some(Self { color_type: Self::COLOR_RGB, ..self })
    } else {
      None
    }
  }
}

impl TryFrom<&[u8]> for IHDR {
  type Error = TranscodeError;
  /// Fails with [`TranscodeError::MalformedHeader`] unless given exactly 13
  /// bytes. The field values themselves aren't validated.
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    bytemuck::try_pod_read_unaligned(data)
      .map_err(|_| TranscodeError::MalformedHeader { len: data.len() })
  }
}
