//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// IO error while spooling
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bitmap could not be encoded
    #[error("Bitmap encode failed: {0}")]
    Encode(#[from] image::ImageError),

    /// Named printer does not exist on this machine
    #[error("Printer not found: {0}")]
    NotFound(String),

    /// No printer installed at all
    #[error("No printers available")]
    NoPrinters,

    /// Spooler/shell rejected the job
    #[error("Spooler error: {0}")]
    Spooler(String),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
