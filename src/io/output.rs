//! JSON artifact writing
//!
//! Artifacts are written to a temporary file next to the destination and
//! renamed into place, so a failed run never leaves a truncated document.

use crate::errors::VarmapError;
use serde::Serialize;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub struct JsonWriter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W, pretty: bool) -> Self {
        Self { writer, pretty }
    }

    /// Serialize `value` followed by a newline and flush.
    pub fn write<T: Serialize + ?Sized>(&mut self, value: &T) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)?;
        } else {
            serde_json::to_writer(&mut self.writer, value)?;
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

/// Atomically replace `path` with the JSON encoding of `value`, creating
/// missing parent directories.
pub fn write_json_atomic<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
    pretty: bool,
) -> Result<(), VarmapError> {
    let fail = |source: io::Error| VarmapError::export_write(path, source);

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(fail)?;

    let mut temp = NamedTempFile::new_in(parent).map_err(fail)?;
    JsonWriter::new(BufWriter::new(temp.as_file_mut()), pretty)
        .write(value)
        .map_err(fail)?;
    temp.as_file().sync_all().map_err(fail)?;
    temp.persist(path).map_err(|e| fail(e.error))?;

    tracing::debug!(path = %path.display(), "wrote artifact");
    Ok(())
}
