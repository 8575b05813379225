//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum AlignSyncError {
    #[error("Missing input file: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    #[error("Degenerate warping path: {message}")]
    DegenerateWarpingPath { message: String },

    #[error("Global start and end timestamps not found for {0}")]
    MissingGlobalTimestamps(String),

    #[error("Audio error: {message}")]
    Audio { message: String },

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AlignSyncError {
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::MalformedInput { message: msg.into() }
    }

    pub fn degenerate<S: Into<String>>(msg: S) -> Self {
        Self::DegenerateWarpingPath { message: msg.into() }
    }

    pub fn audio<S: Into<String>>(msg: S) -> Self {
        Self::Audio { message: msg.into() }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config { message: msg.into() }
    }
}

pub type Result<T> = std::result::Result<T, AlignSyncError>;

impl From<hound::Error> for AlignSyncError {
    fn from(err: hound::Error) -> Self {
        Self::audio(err.to_string())
    }
}

impl From<ndarray_npy::ReadNpyError> for AlignSyncError {
    fn from(err: ndarray_npy::ReadNpyError) -> Self {
        Self::malformed(format!("npy: {}", err))
    }
}
