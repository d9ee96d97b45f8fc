#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
//#![warn(missing_docs)]

//! A crate for stripping the alpha flag out of a PNG header.
//!
//! The PNG datastream is walked one chunk at a time. Every chunk is written
//! back out exactly as it was read, except for an `IHDR` chunk that declares
//! the RGBA color type: that one has its color type changed to RGB and gets a
//! freshly computed CRC. The pixel data itself is never decompressed.
//!
//! ```no_run
//! # #[cfg(feature = "std")]
//! # fn main() -> Result<(), png_unalpha::TranscodeError> {
//! let mut source = std::io::BufReader::new(std::fs::File::open("in.png")?);
//! let mut sink = std::io::BufWriter::new(std::fs::File::create("out.png")?);
//! let report = png_unalpha::png::transcode(&mut source, &mut sink)?;
//! if report.header_mutated {
//!   println!("Changed color type from RGBA to RGB");
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "std"))]
//! # fn main() {}
//! ```

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod error;
pub use error::*;

pub mod png;
