use std::io::{Read, Write};

use super::*;
use crate::TranscodeError;

/// Settings for [`transcode_with`].
///
/// The `Default` value is what [`transcode`] uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TranscodeOptions {
  /// Check every incoming chunk's CRC before writing it out.
  ///
  /// Off by default. Turning this on makes the transcoder reject inputs with
  /// bad checksums that it would otherwise pass along unchanged.
  pub verify_crc: bool,
}

/// What happened during a successful transcode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TranscodeReport {
  /// Number of chunks written to the sink.
  pub chunks: usize,
  /// If an `IHDR` chunk was rewritten from RGBA to RGB.
  pub header_mutated: bool,
  /// Total bytes written to the sink, signature included.
  pub bytes_written: u64,
}

/// Where a [`Transcoder`] is in the stream.
///
/// There's no `Failed` variant stored: the first error is returned straight
/// out of [`Transcoder::run`], which consumes the transcoder, so nothing more
/// can be read or written after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TranscodeState {
  /// The signature hasn't been checked yet.
  AwaitingSignature,
  /// The signature was good, chunks are being copied.
  Streaming,
  /// The source ran out cleanly at a chunk boundary.
  Done,
}

/// Copies a PNG datastream from a reader to a writer, one chunk at a time.
///
/// Only one chunk is held in memory at once.
#[derive(Debug)]
pub struct Transcoder<R, W> {
  source: R,
  sink: W,
  options: TranscodeOptions,
  state: TranscodeState,
  report: TranscodeReport,
}
impl<R: Read, W: Write> Transcoder<R, W> {
  /// Makes a new transcoder. Nothing is read or written yet.
  #[inline]
  #[must_use]
  pub fn new(source: R, sink: W, options: TranscodeOptions) -> Self {
    Self {
      source,
      sink,
      options,
      state: TranscodeState::AwaitingSignature,
      report: TranscodeReport::default(),
    }
  }

  /// Runs until the source ends cleanly (or the first error), then flushes the
  /// sink.
  pub fn run(mut self) -> Result<TranscodeReport, TranscodeError> {
    while self.state != TranscodeState::Done {
      self.state = match self.state {
        TranscodeState::AwaitingSignature => self.check_signature()?,
        TranscodeState::Streaming => self.copy_chunk()?,
        TranscodeState::Done => TranscodeState::Done,
      };
    }
    self.sink.flush()?;
    Ok(self.report)
  }

  fn check_signature(&mut self) -> Result<TranscodeState, TranscodeError> {
    let mut signature = [0_u8; 8];
    let count = super::chunk::read_up_to(&mut self.source, &mut signature)?;
    if count != signature.len() || signature != PNG_SIGNATURE {
      log::trace!("signature mismatch: {:02X?}", &signature[..count]);
      return Err(TranscodeError::BadSignature);
    }
    log::trace!("signature ok");
    self.sink.write_all(&signature)?;
    self.report.bytes_written += signature.len() as u64;
    Ok(TranscodeState::Streaming)
  }

  fn copy_chunk(&mut self) -> Result<TranscodeState, TranscodeError> {
    let chunk_index = self.report.chunks;
    let Some(mut chunk) = RawPngChunk::read_from(&mut self.source, chunk_index)? else {
      log::debug!("end of stream after {chunk_index} chunks");
      return Ok(TranscodeState::Done);
    };
    log::debug!("chunk {chunk_index}: {} with {} bytes", chunk.chunk_type, chunk.len());

    if self.options.verify_crc {
      let actual = chunk.actual_crc();
      if actual != chunk.declared_crc() {
        return Err(TranscodeError::CrcMismatch {
          chunk_index,
          chunk_type: chunk.chunk_type,
          declared: chunk.declared_crc(),
          actual,
        });
      }
    }

    match chunk.chunk_type {
      PngChunkType::IHDR => {
        let ihdr = IHDR::try_from(chunk.data())?;
        if let Some(rgb) = ihdr.without_alpha() {
          chunk.set_data(rgb.as_bytes().to_vec());
          self.report.header_mutated = true;
          log::info!("Changed color type from RGBA to RGB");
        }
      }
      _ => (),
    }

    self.report.bytes_written += chunk.write_to(&mut self.sink)?;
    self.report.chunks += 1;
    Ok(TranscodeState::Streaming)
  }
}

/// Copies a PNG from `source` to `sink`, marking an RGBA header as RGB.
///
/// * The signature is checked before anything is written.
/// * Every chunk other than an RGBA `IHDR` goes through byte-for-byte,
///   including its original CRC (which isn't checked).
/// * The rewritten `IHDR` keeps all its other fields and gets a new CRC.
///
/// On error, whatever was already written stays in the sink.
#[inline]
pub fn transcode<R: Read, W: Write>(
  source: R, sink: W,
) -> Result<TranscodeReport, TranscodeError> {
  transcode_with(source, sink, TranscodeOptions::default())
}

/// Like [`transcode`], with settings.
#[inline]
pub fn transcode_with<R: Read, W: Write>(
  source: R, sink: W, options: TranscodeOptions,
) -> Result<TranscodeReport, TranscodeError> {
  Transcoder::new(source, sink, options).run()
}
