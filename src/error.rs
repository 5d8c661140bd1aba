use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures of the terminal host
#[derive(Error, Debug)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not determine the terminal size")]
    UnknownTerminalSize,

    #[error("terminal is {cols}x{rows}, need at least {min_cols}x{min_rows}")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },

    #[error("failed to create log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },
}
