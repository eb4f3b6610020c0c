// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read CV file {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Input path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("No CV documents found in the given inputs")]
    EmptyInput,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Start year {start} must be less than or equal to end year {end}")]
    InvalidYearRange { start: i32, end: i32 },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Layout read before it froze ({ticks_run} of {ticks_total} ticks run)")]
    NotFrozen { ticks_run: usize, ticks_total: usize },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Loading failed: {0}")]
    Load(#[from] LoadError),

    #[error("Analysis rejected: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
