//! Catalog Module
//!
//! Schema metadata for CSV tables: where a table's file lives and which
//! columns its header row declares.

pub mod source;
pub mod table;

// Re-export key types
pub use self::source::CsvSource;
pub use self::table::Table;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating or reading a table's header
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{} has an empty header row", .0.display())]
    EmptyHeader(PathBuf),
}

/// Catalog operation result
pub type CatalogResult<T> = Result<T, CatalogError>;
