// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Extraction run — drives the detector over a whole source (all pages of a
// paginated document, or a single standalone image) and accumulates crops
// plus a summary record.

use chrono::Utc;
use image::RgbaImage;
use stempel_core::error::Result;
use stempel_core::{ExtractionConfig, ExtractionSummary};
use tracing::{info, instrument};

use crate::crop::Crop;
use crate::detect::RegionDetector;
use crate::prepare::Preprocessor;

/// Accumulates crops across the pages of one source document.
///
/// Page numbers are assigned in processing order, starting at 1. A standalone
/// image processed through [`ExtractionRun::process_image`] counts as page 1
/// of a one-page document.
pub struct ExtractionRun {
    config: ExtractionConfig,
    crops: Vec<Crop>,
    pages_processed: u32,
    started_at: chrono::DateTime<Utc>,
}

impl ExtractionRun {
    /// Start a run with the given configuration.
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            config,
            crops: Vec::new(),
            pages_processed: 0,
            started_at: Utc::now(),
        }
    }

    /// Detect and crop one rendered document page.
    ///
    /// The raster must already be rendered at the configured scale by the
    /// rasterizing collaborator. Returns the number of crops found on this
    /// page.
    #[instrument(skip(self, raster), fields(page = self.pages_processed + 1))]
    pub fn process_page(&mut self, raster: &RgbaImage) -> Result<usize> {
        let page = self.pages_processed + 1;
        let detector = RegionDetector::new(self.config.page_params);
        let crops = detector.detect_and_crop(raster, page)?;
        let found = crops.len();

        info!(page, found, "Page processed");
        self.pages_processed = page;
        self.crops.extend(crops);
        Ok(found)
    }

    /// Prepare and process a standalone image as a one-page document.
    ///
    /// Applies the upscale-and-sharpen pre-pass before detection, using the
    /// image-modality detector preset.
    #[instrument(skip(self, image))]
    pub fn process_image(&mut self, image: RgbaImage) -> Result<usize> {
        let prepared = Preprocessor::from_image(image)
            .upscale(self.config.image_upscale_factor)
            .sharpen(self.config.sharpen_amount)
            .into_image();

        let page = self.pages_processed + 1;
        let detector = RegionDetector::new(self.config.image_params);
        let crops = detector.detect_and_crop(&prepared, page)?;
        let found = crops.len();

        info!(found, "Standalone image processed");
        self.pages_processed = page;
        self.crops.extend(crops);
        Ok(found)
    }

    /// Crops accumulated so far.
    pub fn crops(&self) -> &[Crop] {
        &self.crops
    }

    /// Finish the run, returning all crops and the summary record.
    pub fn finish(self) -> (Vec<Crop>, ExtractionSummary) {
        let summary = ExtractionSummary {
            pages_processed: self.pages_processed,
            crops_found: self.crops.len(),
            started_at: self.started_at,
            finished_at: Utc::now(),
        };
        info!(
            pages = summary.pages_processed,
            crops = summary.crops_found,
            "Extraction run finished"
        );
        (self.crops, summary)
    }
}
