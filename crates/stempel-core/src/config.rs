// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Extraction configuration.

use serde::{Deserialize, Serialize};

use crate::types::SourceKind;

/// Tuning parameters for the region detector.
///
/// Paginated documents and standalone images ship with different minimum
/// region sizes: page rasters are rendered at lower magnification, so the
/// same physical stamp covers fewer pixels there. The two presets are kept
/// independently configurable rather than collapsed into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorParams {
    /// Side length of the square quantization blocks, in pixels.
    pub block_size: u32,
    /// A pixel counts as ink when any RGB channel is below this value.
    pub background_threshold: u8,
    /// Padding margin added around each detected box, in pixels.
    pub pad: u32,
    /// Boxes with width or height at or below this are discarded.
    pub min_region_size: u32,
}

impl DetectorParams {
    /// Preset for rasters rendered from paginated documents.
    pub fn document_page() -> Self {
        Self {
            block_size: 5,
            background_threshold: 240,
            pad: 10,
            min_region_size: 30,
        }
    }

    /// Preset for standalone images (photographs, flat scans).
    ///
    /// Images go through a 2x upscale before detection, so the noise floor
    /// sits higher than on page rasters.
    pub fn photo() -> Self {
        Self {
            min_region_size: 60,
            ..Self::document_page()
        }
    }

    /// Preset matching the given source modality.
    pub fn for_source(kind: SourceKind) -> Self {
        match kind {
            SourceKind::DocumentPage => Self::document_page(),
            SourceKind::Image => Self::photo(),
        }
    }
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self::document_page()
    }
}

/// Persistent extraction settings covering both source modalities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Upscaling factor applied when rendering document pages to rasters.
    pub page_render_scale: f32,
    /// Upscaling factor applied to standalone images before sharpening.
    pub image_upscale_factor: f32,
    /// Strength of the sharpening pre-filter on the image path.
    pub sharpen_amount: f32,
    /// Detector preset for rendered document pages.
    pub page_params: DetectorParams,
    /// Detector preset for standalone images.
    pub image_params: DetectorParams,
}

impl ExtractionConfig {
    /// Detector preset for the given source modality.
    pub fn params_for(&self, kind: SourceKind) -> DetectorParams {
        match kind {
            SourceKind::DocumentPage => self.page_params,
            SourceKind::Image => self.image_params,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            page_render_scale: 2.0,
            image_upscale_factor: 2.0,
            sharpen_amount: 0.5,
            page_params: DetectorParams::document_page(),
            image_params: DetectorParams::photo(),
        }
    }
}
