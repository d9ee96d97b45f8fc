use super::PngChunkType;

const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      if (c & 1) != 0 {
        c = 0xEDB8_8320_u32 ^ (c >> 1);
      } else {
        c >>= 1;
      }
      //
      k += 1;
    }
    out[n] = c;
    //
    n += 1;
  }
  out
}

fn update_crc(mut crc: u32, bytes: &[u8]) -> u32 {
  for &byte in bytes {
    let i = (crc ^ u32::from(byte)) as u8 as usize;
    crc = CRC_TABLE[i] ^ (crc >> 8);
  }
  crc
}

/// Computes the standard CRC-32 (ISO-HDLC) of some bytes.
///
/// This is the same checksum as zlib's `crc32`.
#[inline]
#[must_use]
pub fn crc32(bytes: &[u8]) -> u32 {
  update_crc(u32::MAX, bytes) ^ u32::MAX
}

/// Computes the CRC that a PNG chunk with this type and data should declare.
///
/// The length field is not part of the checksum.
#[inline]
#[must_use]
pub fn png_crc(chunk_type: PngChunkType, data: &[u8]) -> u32 {
  update_crc(update_crc(u32::MAX, &chunk_type.0), data) ^ u32::MAX
}
