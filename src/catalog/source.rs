//! CSV Source Module
//!
//! Resolves table names to files and opens them as CSV readers. Every reader
//! owns its file handle, so the file is closed when the reader is dropped.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::debug;

use super::table::Table;
use super::{CatalogError, CatalogResult};
use crate::config::EngineConfig;

/// Where CSV tables live and how they are read
#[derive(Debug, Clone)]
pub struct CsvSource {
    data_dir: PathBuf,
    delimiter: u8,
}

impl CsvSource {
    pub fn new(data_dir: impl Into<PathBuf>, delimiter: u8) -> Self {
        CsvSource {
            data_dir: data_dir.into(),
            delimiter,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.data_dir.clone(), config.delimiter)
    }

    /// Path of a table. Absolute names are used as they are.
    pub fn resolve(&self, table: &str) -> PathBuf {
        self.data_dir.join(table)
    }

    /// Existence check only, readability is not verified
    pub fn exists(&self, table: &str) -> bool {
        self.resolve(table).exists()
    }

    /// Open a table as a CSV reader positioned before the header row
    pub fn open_reader(&self, table: &str) -> CatalogResult<csv::Reader<File>> {
        let path = self.resolve(table);
        if !path.exists() {
            return Err(CatalogError::NotFound(path));
        }
        let file = File::open(&path).map_err(|source| CatalogError::Open { path: path.clone(), source })?;
        debug!("opened {}", path.display());

        Ok(csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(file))
    }

    /// Read the header row of an open reader into a Table
    pub fn read_header(&self, table: &str, reader: &mut csv::Reader<File>) -> CatalogResult<Table> {
        let headers = reader.headers()?;
        if headers.is_empty() || headers.iter().all(str::is_empty) {
            return Err(CatalogError::EmptyHeader(self.resolve(table)));
        }
        Ok(Table::new(table, headers.iter().map(str::to_string).collect()))
    }

    /// Load only the header of a table; the file is closed before returning
    pub fn load_table(&self, table: &str) -> CatalogResult<Table> {
        let mut reader = self.open_reader(table)?;
        self.read_header(table, &mut reader)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Default for CsvSource {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
