// Engine Configuration
//
// Settings shared by semantic analysis and execution.

use std::path::PathBuf;

/// Default header count above which `SELECT *` gets an advisory warning
pub const DEFAULT_WIDE_SELECT_THRESHOLD: usize = 10;

/// Default tolerance for numeric `=` and `!=`
pub const DEFAULT_FLOAT_EPSILON: f64 = 1e-9;

/// Configuration for the query engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory that relative table names are resolved against
    pub data_dir: PathBuf,
    /// CSV field delimiter
    pub delimiter: u8,
    /// `SELECT *` over more header columns than this produces a warning
    pub wide_select_threshold: usize,
    /// Tolerance used when `=`/`!=` fall back to numeric comparison
    pub float_epsilon: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            data_dir: PathBuf::from("."),
            delimiter: b',',
            wide_select_threshold: DEFAULT_WIDE_SELECT_THRESHOLD,
            float_epsilon: DEFAULT_FLOAT_EPSILON,
        }
    }
}

impl EngineConfig {
    /// Default configuration reading tables from `data_dir`
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        EngineConfig {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }
}
