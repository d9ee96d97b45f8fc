use std::io::{self, Read, Write};

use png_unalpha::{
  png::{
    transcode, transcode_with, PngChunkType, RawPngChunk, TranscodeOptions, IHDR, PNG_SIGNATURE,
  },
  ChunkPart, TranscodeError,
};

fn reference_crc(chunk_type: &[u8; 4], data: &[u8]) -> u32 {
  let mut hasher = crc32fast::Hasher::new();
  hasher.update(chunk_type);
  hasher.update(data);
  hasher.finalize()
}

fn chunk_bytes(chunk_type: &[u8; 4], data: &[u8]) -> Vec<u8> {
  chunk_bytes_with_crc(chunk_type, data, reference_crc(chunk_type, data))
}

fn chunk_bytes_with_crc(chunk_type: &[u8; 4], data: &[u8], crc: u32) -> Vec<u8> {
  let mut v = Vec::new();
  v.extend_from_slice(&(data.len() as u32).to_be_bytes());
  v.extend_from_slice(chunk_type);
  v.extend_from_slice(data);
  v.extend_from_slice(&crc.to_be_bytes());
  v
}

fn png_bytes(chunks: &[Vec<u8>]) -> Vec<u8> {
  let mut v = PNG_SIGNATURE.to_vec();
  for chunk in chunks {
    v.extend_from_slice(chunk);
  }
  v
}

fn ihdr_data(color_type: u8) -> [u8; 13] {
  let mut data = [0_u8; 13];
  data[0..4].copy_from_slice(&10_u32.to_be_bytes());
  data[4..8].copy_from_slice(&20_u32.to_be_bytes());
  data[8] = 8;
  data[9] = color_type;
  data
}

fn sample_png(color_type: u8) -> Vec<u8> {
  png_bytes(&[
    chunk_bytes(b"IHDR", &ihdr_data(color_type)),
    chunk_bytes(b"tEXt", b"Comment\0hello"),
    chunk_bytes(b"IDAT", &super::rand_bytes(300)),
    chunk_bytes(b"IDAT", &super::rand_bytes(17)),
    chunk_bytes(b"IEND", &[]),
  ])
}

fn read_chunks(png: &[u8]) -> Vec<RawPngChunk> {
  assert_eq!(&png[..8], &PNG_SIGNATURE);
  let mut r = &png[8..];
  let mut out = Vec::new();
  while let Some(chunk) = RawPngChunk::read_from(&mut r, out.len()).unwrap() {
    out.push(chunk);
  }
  out
}

fn run(input: &[u8]) -> (Result<png_unalpha::png::TranscodeReport, TranscodeError>, Vec<u8>) {
  let mut output = Vec::new();
  let result = transcode(input, &mut output);
  (result, output)
}

#[test]
fn test_non_rgba_passes_through_unchanged() {
  for color_type in [0, 2, 3, 4] {
    let input = sample_png(color_type);
    let (result, output) = run(&input);
    let report = result.unwrap();
    assert_eq!(output, input, "color type {color_type}");
    assert!(!report.header_mutated);
    assert_eq!(report.chunks, 5);
    assert_eq!(report.bytes_written, input.len() as u64);
  }
}

#[test]
fn test_rgba_header_is_rewritten() {
  let input = sample_png(6);
  let (result, output) = run(&input);
  let report = result.unwrap();
  assert!(report.header_mutated);
  assert_eq!(output.len(), input.len());

  let in_chunks = read_chunks(&input);
  let out_chunks = read_chunks(&output);
  assert_eq!(in_chunks.len(), out_chunks.len());

  let header = &out_chunks[0];
  assert_eq!(header.chunk_type, PngChunkType::IHDR);
  assert_eq!(header.len(), 13);
  assert_eq!(header.data(), &ihdr_data(2));
  let ihdr = IHDR::try_from(header.data()).unwrap();
  assert_eq!(ihdr.width(), 10);
  assert_eq!(ihdr.height(), 20);
  assert_eq!(ihdr.bit_depth(), 8);
  assert_eq!(ihdr.color_type(), 2);
  assert_eq!(ihdr.compression_method(), 0);
  assert_eq!(ihdr.filter_method(), 0);
  assert_eq!(ihdr.interlace_method(), 0);
  assert_eq!(header.declared_crc(), reference_crc(b"IHDR", &ihdr_data(2)));
  assert_ne!(header.declared_crc(), in_chunks[0].declared_crc());

  // everything after the header is byte-identical
  assert_eq!(&output[8 + 25..], &input[8 + 25..]);
  for (a, b) in in_chunks.iter().zip(out_chunks.iter()).skip(1) {
    assert_eq!(a, b);
  }
}

#[test]
fn test_structure_is_preserved() {
  let input = png_bytes(&[
    chunk_bytes(b"IHDR", &ihdr_data(6)),
    chunk_bytes(b"PLTE", &[1, 2, 3, 4, 5, 6]),
    chunk_bytes(b"zzZZ", &super::rand_bytes(40)),
    chunk_bytes(b"IDAT", &[]),
    chunk_bytes(b"IEND", &[]),
  ]);
  let (result, output) = run(&input);
  assert_eq!(result.unwrap().chunks, 5);
  let in_chunks = read_chunks(&input);
  let out_chunks = read_chunks(&output);
  let shape = |chunks: &[RawPngChunk]| -> Vec<(PngChunkType, usize)> {
    chunks.iter().map(|c| (c.chunk_type, c.len())).collect()
  };
  assert_eq!(shape(&in_chunks), shape(&out_chunks));
}

#[test]
fn test_pass_through_keeps_bad_crc() {
  let input = png_bytes(&[
    chunk_bytes(b"IHDR", &ihdr_data(2)),
    chunk_bytes_with_crc(b"IDAT", &[1, 2, 3], 0xDEAD_BEEF),
    chunk_bytes(b"IEND", &[]),
  ]);
  let (result, output) = run(&input);
  assert!(result.is_ok());
  assert_eq!(output, input);
}

#[test]
fn test_verify_crc_rejects_bad_crc() {
  let input = png_bytes(&[
    chunk_bytes(b"IHDR", &ihdr_data(2)),
    chunk_bytes_with_crc(b"IDAT", &[1, 2, 3], 0xDEAD_BEEF),
    chunk_bytes(b"IEND", &[]),
  ]);
  let mut output = Vec::new();
  let options = TranscodeOptions { verify_crc: true };
  match transcode_with(input.as_slice(), &mut output, options) {
    Err(TranscodeError::CrcMismatch { chunk_index, chunk_type, declared, actual }) => {
      assert_eq!(chunk_index, 1);
      assert_eq!(chunk_type, PngChunkType::IDAT);
      assert_eq!(declared, 0xDEAD_BEEF);
      assert_eq!(actual, reference_crc(b"IDAT", &[1, 2, 3]));
    }
    other => panic!("{other:?}"),
  }

  let good = sample_png(6);
  let mut output = Vec::new();
  assert!(transcode_with(good.as_slice(), &mut output, options).unwrap().header_mutated);
}

#[test]
fn test_bad_signature() {
  let mut input = vec![0_u8; 8];
  input.extend_from_slice(&chunk_bytes(b"IHDR", &ihdr_data(6)));
  let (result, output) = run(&input);
  assert!(matches!(result, Err(TranscodeError::BadSignature)));
  assert!(output.is_empty());

  // too short to even hold a signature
  let (result, output) = run(&PNG_SIGNATURE[..5]);
  assert!(matches!(result, Err(TranscodeError::BadSignature)));
  assert!(output.is_empty());

  let (result, _) = run(&[]);
  assert!(matches!(result, Err(TranscodeError::BadSignature)));
}

#[test]
fn test_truncated_data() {
  let mut input = PNG_SIGNATURE.to_vec();
  input.extend_from_slice(&100_u32.to_be_bytes());
  input.extend_from_slice(b"IDAT");
  input.extend_from_slice(&[7; 50]);
  let (result, output) = run(&input);
  match result {
    Err(TranscodeError::TruncatedStream { chunk_index: 0, part: ChunkPart::Data }) => (),
    other => panic!("{other:?}"),
  }
  // the signature was already committed
  assert_eq!(output, PNG_SIGNATURE);
}

#[test]
fn test_truncated_length() {
  let mut input = sample_png(2);
  input.extend_from_slice(&[0, 0]);
  let (result, output) = run(&input);
  match result {
    Err(TranscodeError::TruncatedStream { chunk_index: 5, part: ChunkPart::Length }) => (),
    other => panic!("{other:?}"),
  }
  assert_eq!(output, &input[..input.len() - 2]);
}

#[test]
fn test_truncated_crc() {
  let full = chunk_bytes(b"IEND", &[]);
  let input = png_bytes(&[full[..10].to_vec()]);
  let (result, _) = run(&input);
  assert!(matches!(
    result,
    Err(TranscodeError::TruncatedStream { chunk_index: 0, part: ChunkPart::Crc })
  ));
}

#[test]
fn test_signature_only() {
  let (result, output) = run(&PNG_SIGNATURE);
  let report = result.unwrap();
  assert_eq!(output, PNG_SIGNATURE);
  assert_eq!(report.chunks, 0);
  assert!(!report.header_mutated);
  assert_eq!(report.bytes_written, 8);
}

#[test]
fn test_malformed_header() {
  let input = png_bytes(&[chunk_bytes(b"IHDR", &ihdr_data(6)[..12]), chunk_bytes(b"IEND", &[])]);
  let (result, _) = run(&input);
  assert!(matches!(result, Err(TranscodeError::MalformedHeader { len: 12 })));
}

/// Hands out one byte per `read` call, with an interruption before each.
struct Trickle<'b> {
  bytes: &'b [u8],
  interrupt: bool,
}
impl Read for Trickle<'_> {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    self.interrupt = !self.interrupt;
    if self.interrupt {
      return Err(io::ErrorKind::Interrupted.into());
    }
    match (self.bytes.split_first(), buf.first_mut()) {
      (Some((b, rest)), Some(out)) => {
        *out = *b;
        self.bytes = rest;
        Ok(1)
      }
      _ => Ok(0),
    }
  }
}

#[test]
fn test_short_reads() {
  let input = sample_png(6);
  let mut expected = Vec::new();
  transcode(input.as_slice(), &mut expected).unwrap();

  let mut output = Vec::new();
  let report = transcode(Trickle { bytes: &input, interrupt: false }, &mut output).unwrap();
  assert!(report.header_mutated);
  assert_eq!(output, expected);
}

/// Accepts a fixed number of bytes, then fails.
struct Cramped {
  room: usize,
}
impl Write for Cramped {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    if self.room == 0 {
      return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
    }
    let n = buf.len().min(self.room);
    self.room -= n;
    Ok(n)
  }
  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

#[test]
fn test_sink_failure() {
  let input = sample_png(2);
  let result = transcode(input.as_slice(), Cramped { room: 20 });
  match result {
    Err(TranscodeError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::Other),
    other => panic!("{other:?}"),
  }
}

#[test]
fn test_random_bytes_no_panics() {
  // even totally random data should never panic the transcoder!
  for _ in 0..20 {
    let mut input = PNG_SIGNATURE.to_vec();
    input.extend_from_slice(&super::rand_bytes(1024));
    let (result, output) = run(&input);
    assert!(result.is_err(), "random data transcoded cleanly?");
    assert!(output.starts_with(&PNG_SIGNATURE));
    assert!(output.len() <= input.len());
  }
}
