// SPDX-License-Identifier: PMPL-1.0-or-later
//
// stempel-extract — Region extraction for the Stempel pipeline.
//
// Locates islands of visual ink (stamps, signatures, seals) on mostly-blank
// rasters, crops them out with a padding margin, and packages each crop as an
// independently encodable PNG record. Standalone images get an
// upscale-and-sharpen pre-pass before detection.

pub mod crop;
pub mod detect;
pub mod prepare;
pub mod run;

// Re-export the primary structs so callers can use `stempel_extract::RegionDetector` etc.
pub use crop::{Crop, Cropper};
pub use detect::RegionDetector;
pub use prepare::{Preprocessor, sharpen};
pub use run::ExtractionRun;
