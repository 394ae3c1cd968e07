use crate::results::BrochureRecord;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write brochures as one indented JSON array; non-ASCII text is kept as-is
pub fn save_json(path: impl AsRef<Path>, records: &[BrochureRecord]) -> Result<(), OutputError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Read back a file written by [`save_json`]
pub fn load_json(path: impl AsRef<Path>) -> Result<Vec<BrochureRecord>, OutputError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
