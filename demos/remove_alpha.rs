use std::{
  fs::File,
  io::{BufReader, BufWriter},
  path::Path,
  process::ExitCode,
};

use png_unalpha::{png::transcode, TranscodeError};

fn remove_alpha(input: &Path, output: &Path) -> Result<bool, TranscodeError> {
  let source = BufReader::new(File::open(input)?);
  let sink = BufWriter::new(File::create(output)?);
  let report = transcode(source, sink)?;
  log::debug!("{report:?}");
  Ok(report.header_mutated)
}

fn main() -> ExitCode {
  env_logger::init();
  let args: Vec<String> = std::env::args().collect();
  let [_, input, output] = args.as_slice() else {
    println!("Usage: remove_alpha <input.png> <output.png>");
    return ExitCode::FAILURE;
  };
  match remove_alpha(Path::new(input), Path::new(output)) {
    Ok(header_mutated) => {
      if header_mutated {
        println!("Changed color type from RGBA to RGB");
      }
      println!("Successfully removed alpha channel: {output}");
      ExitCode::SUCCESS
    }
    Err(e) => {
      println!("Error: {e}");
      println!("Failed to remove alpha channel");
      ExitCode::FAILURE
    }
  }
}
