//! Error handling for fig2gerber
//!
//! This module provides unified error handling using anyhow for propagation
//! and context, plus a small enum of the fatal conditions that have stable,
//! user-facing identities.

use anyhow::Context;
use std::path::Path;

pub type Result<T> = anyhow::Result<T>;

/// Extension trait for Results to add context with file paths and jobs
pub trait ResultExt<T> {
    /// Add context with file path information
    fn with_path_context<P: AsRef<Path>>(self, operation: &str, path: P) -> Result<T>;

    /// Add context naming the output job being produced
    fn with_job_context(self, job_name: &str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error> + Send + Sync + 'static,
{
    fn with_path_context<P: AsRef<Path>>(self, operation: &str, path: P) -> Result<T> {
        self.map_err(|e| e.into())
            .with_context(|| format!("Failed to {} file: {}", operation, path.as_ref().display()))
    }

    fn with_job_context(self, job_name: &str) -> Result<T> {
        self.map_err(|e| e.into())
            .with_context(|| format!("Error producing {} output", job_name))
    }
}

/// Fatal conditions with stable identities. Catalog misses are not errors
/// anywhere in the pipeline; they resolve to generic apertures or the
/// default drill tool.
#[derive(Debug, thiserror::Error)]
pub enum Fig2GerberError {
    #[error("not an XFig 3.2 drawing (header begins {found:?}, expected {expected:?})")]
    UnsupportedFormat { found: String, expected: String },

    #[error("drawing header ends after {lines} of 9 lines")]
    TruncatedHeader { lines: usize },

    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("polyline declares {expected} points but the drawing ends after {read}")]
    TruncatedPolyline { expected: usize, read: usize },

    #[error("layer range must be between 1 and {max}, got {value}")]
    InvalidLayerRange { value: u32, max: u32 },

    #[error("layer file {path} contains no layers")]
    EmptyLayerFile { path: String },

    #[error("layer file {path} contains {value:?}, which is not a non-negative layer number")]
    InvalidLayerFile { path: String, value: String },
}
