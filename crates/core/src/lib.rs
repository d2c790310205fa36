//! Core shared types and errors (loader-agnostic).

use std::{io, path::PathBuf};

use thiserror::Error;

/// Stream faults. Malformed content never ends up here.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Failed to open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read line {line}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },
}

impl CoreError {
    /// 1-based line at which the stream failed, if the fault happened mid-read.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io { line, .. } => Some(*line),
            Self::Open { .. } => None,
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
