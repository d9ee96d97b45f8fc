use core::fmt::{Debug, Display, Write as _};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::io::{self, Read, Write};

#[cfg(feature = "alloc")]
use super::png_crc;
#[cfg(feature = "std")]
use crate::{ChunkPart, TranscodeError};

/// The 4-byte type tag of a PNG chunk.
///
/// Any four bytes are accepted. The `Debug` and `Display` impls just `as` cast
/// each byte into a `char`, which is correct for the ASCII letters that real
/// chunk types use.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngChunkType {
  /// Image header
  pub const IHDR: Self = Self(*b"IHDR");
  /// Palette
  pub const PLTE: Self = Self(*b"PLTE");
  /// Image data
  pub const IDAT: Self = Self(*b"IDAT");
  /// Image end
  pub const IEND: Self = Self(*b"IEND");
  /// Transparency
  pub const tRNS: Self = Self(*b"tRNS");

  /// If the "ancillary" bit is clear, decoders must understand this chunk.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    (self.0[0] & 0x20) == 0
  }
}
impl Debug for PngChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('\"')?;
    Display::fmt(self, f)?;
    f.write_char('\"')
  }
}
impl Display for PngChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}
impl From<[u8; 4]> for PngChunkType {
  #[inline]
  #[must_use]
  fn from(array: [u8; 4]) -> Self {
    Self(array)
  }
}

/// One chunk from a PNG, with its data held in an owned buffer.
///
/// The `declared_crc` is whatever CRC the chunk carries. For a chunk read
/// from a stream that's the CRC as read, unchecked. For a chunk built with
/// [`new`](Self::new) or changed with [`set_data`](Self::set_data) it's
/// computed fresh.
#[cfg(feature = "alloc")]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RawPngChunk {
  /// The chunk's type tag.
  pub chunk_type: PngChunkType,
  pub(crate) data: Vec<u8>,
  pub(crate) declared_crc: u32,
}
#[cfg(feature = "alloc")]
impl Debug for RawPngChunk {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawPngChunk")
      .field("chunk_type", &self.chunk_type)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
#[cfg(feature = "alloc")]
impl RawPngChunk {
  /// Makes a chunk with a correct CRC for the type and data given.
  #[inline]
  #[must_use]
  pub fn new(chunk_type: PngChunkType, data: Vec<u8>) -> Self {
    let declared_crc = png_crc(chunk_type, &data);
    Self { chunk_type, data, declared_crc }
  }

  /// The chunk's data bytes.
  #[inline]
  #[must_use]
  pub fn data(&self) -> &[u8] {
    &self.data
  }

  /// The number of data bytes, which is what the length field holds.
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.data.len()
  }

  /// If the chunk has no data bytes.
  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  /// The CRC that this chunk carries.
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }

  /// The CRC computed over the chunk's current type and data.
  #[inline]
  #[must_use]
  pub fn actual_crc(&self) -> u32 {
    png_crc(self.chunk_type, &self.data)
  }

  /// Replaces the data and recomputes the declared CRC to match.
  #[inline]
  pub fn set_data(&mut self, data: Vec<u8>) {
    self.data = data;
    self.declared_crc = self.actual_crc();
  }
}

#[cfg(feature = "std")]
impl RawPngChunk {
  /// Reads the next chunk out of a stream.
  ///
  /// * If the stream is already at its end, gives `Ok(None)`.
  /// * If the stream ends partway through the chunk (including partway through
  ///   the length), that's a [`TranscodeError::TruncatedStream`].
  ///
  /// `chunk_index` is only used to describe errors. The CRC isn't checked.
  pub fn read_from<R: Read + ?Sized>(
    r: &mut R, chunk_index: usize,
  ) -> Result<Option<Self>, TranscodeError> {
    let truncated = |part| TranscodeError::TruncatedStream { chunk_index, part };

    let mut len_bytes = [0_u8; 4];
    match read_up_to(r, &mut len_bytes)? {
      0 => return Ok(None),
      4 => (),
      _ => return Err(truncated(ChunkPart::Length)),
    }
    let len = u32::from_be_bytes(len_bytes);

    let mut type_bytes = [0_u8; 4];
    if read_up_to(r, &mut type_bytes)? != 4 {
      return Err(truncated(ChunkPart::Type));
    }

    // the buffer only grows as bytes arrive
    let mut data = Vec::new();
    (&mut *r).take(u64::from(len)).read_to_end(&mut data)?;
    if data.len() != len as usize {
      return Err(truncated(ChunkPart::Data));
    }

    let mut crc_bytes = [0_u8; 4];
    if read_up_to(r, &mut crc_bytes)? != 4 {
      return Err(truncated(ChunkPart::Crc));
    }

    Ok(Some(Self {
      chunk_type: PngChunkType(type_bytes),
      data,
      declared_crc: u32::from_be_bytes(crc_bytes),
    }))
  }

  /// Writes the chunk in its serialized form: length, type, data, CRC.
  ///
  /// Gives the total number of bytes written.
  pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<u64> {
    let len = u32::try_from(self.data.len()).map_err(|_| {
      io::Error::new(io::ErrorKind::InvalidInput, "chunk data is longer than u32::MAX")
    })?;
    w.write_all(&len.to_be_bytes())?;
    w.write_all(&self.chunk_type.0)?;
    w.write_all(&self.data)?;
    w.write_all(&self.declared_crc.to_be_bytes())?;
    Ok(12 + u64::from(len))
  }
}

/// Reads until `buf` is full or the stream ends, giving the count read.
///
/// Unlike `read_exact`, running out early isn't an error here, so the caller
/// can tell a clean end (0 bytes) from a partial read.
#[cfg(feature = "std")]
pub(crate) fn read_up_to<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
  let mut filled = 0;
  while filled < buf.len() {
    match r.read(&mut buf[filled..]) {
      Ok(0) => break,
      Ok(n) => filled += n,
      Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
      Err(e) => return Err(e),
    }
  }
  Ok(filled)
}
