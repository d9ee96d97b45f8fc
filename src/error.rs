use core::fmt;

use crate::png::PngChunkType;

/// Which field of a chunk was being read when the stream ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChunkPart {
  /// The 4-byte big-endian length.
  Length,
  /// The 4-byte chunk type tag.
  Type,
  /// The chunk's payload bytes.
  Data,
  /// The trailing 4-byte CRC.
  Crc,
}
impl fmt::Display for ChunkPart {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      ChunkPart::Length => "length",
      ChunkPart::Type => "type",
      ChunkPart::Data => "data",
      ChunkPart::Crc => "crc",
    })
  }
}

/// An error from transcoding a PNG datastream.
///
/// The first error stops the whole operation. Anything already written to the
/// sink stays there; cleaning it up is up to the caller.
#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
  /// The first eight bytes were not the PNG signature.
  #[error("not a PNG datastream: signature mismatch")]
  BadSignature,

  /// The stream ended partway through a chunk.
  #[error("stream ended inside chunk {chunk_index} while reading its {part}")]
  TruncatedStream {
    /// Zero-based position of the chunk in the stream.
    chunk_index: usize,
    /// The field that came up short.
    part: ChunkPart,
  },

  /// An `IHDR` chunk's payload was not exactly 13 bytes.
  #[error("IHDR payload must be 13 bytes, found {len}")]
  MalformedHeader {
    /// The payload length that was found.
    len: usize,
  },

  /// A chunk's declared CRC didn't match its contents.
  ///
  /// Only produced when CRC verification is turned on.
  #[error("chunk {chunk_index} ({chunk_type}) declared CRC {declared:#010X}, computed {actual:#010X}")]
  CrcMismatch {
    /// Zero-based position of the chunk in the stream.
    chunk_index: usize,
    /// The chunk's type tag.
    chunk_type: PngChunkType,
    /// The CRC stored in the stream.
    declared: u32,
    /// The CRC computed over the type and data.
    actual: u32,
  },

  /// The source or sink failed for a reason other than running out of bytes.
  #[cfg(feature = "std")]
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
