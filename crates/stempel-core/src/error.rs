// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Unified error types for Stempel.

use thiserror::Error;

/// Top-level error type for all Stempel operations.
#[derive(Debug, Error)]
pub enum StempelError {
    // -- Raster errors --
    #[error("cannot process raster: {0}")]
    InvalidRaster(String),

    #[error("image encoding failed: {0}")]
    ImageEncoding(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, StempelError>;
