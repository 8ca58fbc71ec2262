//! CSV input and output tables.
//!
//! Input has a header row, which is skipped, and rows of any length. Output
//! gets a fixed header followed by the reconciled rows.

use std::{
  fs::File,
  io::{Read, Write},
  path::Path,
};

use crate::{Error, Result};

pub const OUTPUT_HEADER: [&str; 11] = [
  "Id",
  "Restaurant",
  "Street 1",
  "Street 2",
  "City",
  "Postcode",
  "CreatedDate",
  "Match",
  "Hygiene Rating",
  "Rating Date",
  "FSA ID",
];

/// Read every data row from comma-separated, double-quoted input.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Vec<String>>> {
  let mut csv_reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .flexible(true)
    .from_reader(reader);

  let mut rows = Vec::new();
  for record in csv_reader.records() {
    rows.push(record?.iter().map(str::to_owned).collect());
  }
  Ok(rows)
}

pub fn read_rows_from_path(path: &Path) -> Result<Vec<Vec<String>>> {
  let file = File::open(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
  read_rows(file)
}

/// Write [`OUTPUT_HEADER`] and then `rows`.
pub fn write_rows<W: Write>(writer: W, rows: &[Vec<String>]) -> Result<()> {
  let mut csv_writer = csv::WriterBuilder::new()
    .flexible(true)
    .terminator(csv::Terminator::CRLF)
    .from_writer(writer);

  csv_writer.write_record(OUTPUT_HEADER)?;
  for row in rows {
    csv_writer.write_record(row)?;
  }
  csv_writer.flush().map_err(csv::Error::from)?;
  Ok(())
}

/// Write the output table to `path`, creating its parent directory.
pub fn write_rows_to_path(path: &Path, rows: &[Vec<String>]) -> Result<()> {
  let io_err = |source: std::io::Error| Error::Io { path: path.to_path_buf(), source };
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent).map_err(io_err)?;
  }
  let file = File::create(path).map_err(io_err)?;
  write_rows(file, rows)
}
