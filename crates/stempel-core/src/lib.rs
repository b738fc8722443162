// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Stempel — Core types, errors, and configuration shared across all crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{DetectorParams, ExtractionConfig};
pub use error::StempelError;
pub use types::*;
