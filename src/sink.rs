use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::Result;

/// Destination for normalized tables.
pub trait Sink {
    /// Write every row of `table`, replacing anything written before under
    /// that name.
    fn write<T: Serialize>(&mut self, table: &str, rows: &[T]) -> Result<()>;
}

/// Writes each table to `<dir>/<table>.json` as a pretty-printed array.
#[derive(Debug, Clone)]
pub struct JsonSink {
    dir: PathBuf,
}

impl JsonSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Sink for JsonSink {
    #[instrument(skip(self, rows), fields(dir = %self.dir.display(), rows = rows.len()))]
    fn write<T: Serialize>(&mut self, table: &str, rows: &[T]) -> Result<()> {
        let path = table_path(&self.dir, table, "json")?;
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, rows)?;
        writer.flush()?;
        debug!(path = %path.display(), "wrote json table");
        Ok(())
    }
}

/// Writes each table to `<dir>/<table>.csv` with a header row.
#[derive(Debug, Clone)]
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Sink for CsvSink {
    #[instrument(skip(self, rows), fields(dir = %self.dir.display(), rows = rows.len()))]
    fn write<T: Serialize>(&mut self, table: &str, rows: &[T]) -> Result<()> {
        let path = table_path(&self.dir, table, "csv")?;
        write_csv(File::create(&path)?, rows)?;
        debug!(path = %path.display(), "wrote csv table");
        Ok(())
    }
}

/// Serialize `rows` as CSV; the header comes from the first row's field names.
pub fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn table_path(dir: &Path, table: &str, extension: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    Ok(dir.join(format!("{table}.{extension}")))
}
