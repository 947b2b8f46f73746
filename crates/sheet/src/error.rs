use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a workbook
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Failed to open workbook {path}: {message}")]
    Open { path: PathBuf, message: String },

    #[error("Failed to read sheet '{sheet}' in {path}: {message}")]
    SheetRead {
        path: PathBuf,
        sheet: String,
        message: String,
    },

    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Sheet already exists: {name}")]
    SheetAlreadyExists { name: String },
}

pub type Result<T> = std::result::Result<T, SheetError>;
