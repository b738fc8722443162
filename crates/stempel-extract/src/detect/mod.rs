// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Region detection — quantize, label, reconstruct, filter. Finds the
// rectangles on a raster worth cropping out as stamp/signature candidates.

pub mod grid;
pub mod label;

use image::RgbaImage;
use stempel_core::error::{Result, StempelError};
use stempel_core::{DetectorParams, Region};
use tracing::{debug, info, instrument};

use crate::crop::{Crop, Cropper};
use grid::OccupancyGrid;

/// Detects rectangular ink regions on a mostly-blank raster.
///
/// The detector holds no state between calls and borrows each raster
/// read-only, so one instance can serve concurrent invocations across
/// independent rasters.
///
/// ```ignore
/// let detector = RegionDetector::new(DetectorParams::document_page());
/// let crops = detector.detect_and_crop(&raster, 1)?;
/// ```
pub struct RegionDetector {
    params: DetectorParams,
}

impl RegionDetector {
    /// Create a detector with the given tuning parameters.
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    /// The parameters this detector runs with.
    pub fn params(&self) -> DetectorParams {
        self.params
    }

    /// Find candidate regions on a raster.
    ///
    /// Returns the surviving bounding boxes in row-major discovery order of
    /// each cluster's first cell. Zero regions is a valid outcome; only a
    /// zero-sized raster is an error.
    ///
    /// Pipeline: block quantization into an occupancy grid, 8-connected
    /// component labeling, grid-to-pixel box reconstruction, then a minimum
    /// size filter that drops both single-speck noise and (empirically) dense
    /// body-text blocks.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn detect(&self, image: &RgbaImage) -> Result<Vec<Region>> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(StempelError::InvalidRaster(format!(
                "zero-sized raster ({width}x{height})"
            )));
        }

        let occupancy =
            OccupancyGrid::quantize(image, self.params.block_size, self.params.background_threshold);
        let clusters = label::find_clusters(&occupancy);
        debug!(clusters = clusters.len(), "Clusters labeled");

        let block = self.params.block_size;
        let min = self.params.min_region_size;
        let regions: Vec<Region> = clusters
            .iter()
            .map(|c| {
                let x = c.min_x * block;
                let y = c.min_y * block;
                // Block-aligned boxes can overshoot an uneven raster edge;
                // clip so x + w <= width and y + h <= height always hold.
                let w = ((c.max_x - c.min_x + 1) * block).min(width - x);
                let h = ((c.max_y - c.min_y + 1) * block).min(height - y);
                Region::new(x, y, w, h)
            })
            .filter(|r| r.w > min && r.h > min)
            .collect();

        info!(regions = regions.len(), "Region detection complete");
        Ok(regions)
    }

    /// Detect regions and materialize each one as an independent crop.
    ///
    /// `page` is the 1-based page number recorded on every crop. The whole
    /// raster either succeeds (possibly with zero crops) or fails atomically.
    #[instrument(skip(self, image), fields(page))]
    pub fn detect_and_crop(&self, image: &RgbaImage, page: u32) -> Result<Vec<Crop>> {
        let regions = self.detect(image)?;
        let cropper = Cropper::new(self.params.pad);
        let crops = regions
            .iter()
            .map(|&region| cropper.crop(image, region, page))
            .collect();
        Ok(crops)
    }
}

impl Default for RegionDetector {
    fn default() -> Self {
        Self::new(DetectorParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn white(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
    }

    fn fill_black(image: &mut RgbaImage, x0: u32, y0: u32, w: u32, h: u32) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
    }

    fn page_detector() -> RegionDetector {
        RegionDetector::new(DetectorParams::document_page())
    }

    #[test]
    fn blank_page_yields_no_regions() {
        init_tracing();
        let regions = page_detector().detect(&white(100, 100)).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn single_square_yields_one_region() {
        init_tracing();
        let mut image = white(100, 100);
        fill_black(&mut image, 30, 30, 40, 40);

        let regions = page_detector().detect(&image).unwrap();
        assert_eq!(regions, vec![Region::new(30, 30, 40, 40)]);
    }

    #[test]
    fn diagonally_separated_squares_yield_two_regions() {
        let mut image = white(100, 100);
        fill_black(&mut image, 0, 0, 20, 20);
        fill_black(&mut image, 80, 80, 20, 20);

        // Drop the size filter so 20px squares survive.
        let params = DetectorParams {
            min_region_size: 10,
            ..DetectorParams::document_page()
        };
        let regions = RegionDetector::new(params).detect(&image).unwrap();
        assert_eq!(regions.len(), 2);
        assert!(regions.contains(&Region::new(0, 0, 20, 20)));
        assert!(regions.contains(&Region::new(80, 80, 20, 20)));
    }

    #[test]
    fn detect_and_crop_pads_the_single_square() {
        init_tracing();
        let mut image = white(100, 100);
        fill_black(&mut image, 30, 30, 40, 40);

        let crops = page_detector().detect_and_crop(&image, 1).unwrap();
        assert_eq!(crops.len(), 1);
        assert_eq!(crops[0].region, Region::new(20, 20, 60, 60));
        assert_eq!((crops[0].width(), crops[0].height()), (60, 60));
        assert_eq!(crops[0].page, 1);
    }

    #[test]
    fn size_filter_excludes_boxes_at_threshold() {
        // A 30x30 square quantizes to a box of exactly min_region_size.
        let mut image = white(100, 100);
        fill_black(&mut image, 0, 0, 30, 30);
        let regions = page_detector().detect(&image).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn size_filter_includes_boxes_one_block_larger() {
        let mut image = white(100, 100);
        fill_black(&mut image, 0, 0, 31, 31);
        let regions = page_detector().detect(&image).unwrap();
        assert_eq!(regions, vec![Region::new(0, 0, 35, 35)]);
    }

    #[test]
    fn size_filter_drops_narrow_strips() {
        // Wide but short: height fails the filter even though width passes.
        let mut image = white(200, 100);
        fill_black(&mut image, 10, 10, 150, 8);
        let regions = page_detector().detect(&image).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn detection_is_idempotent() {
        let mut image = white(120, 120);
        fill_black(&mut image, 35, 42, 50, 44);

        let detector = page_detector();
        let first = detector.detect(&image).unwrap();
        let second = detector.detect(&image).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn regions_never_exceed_raster_bounds() {
        // Ink flush against the bottom-right corner of an uneven raster.
        let mut image = white(103, 97);
        fill_black(&mut image, 60, 50, 43, 47);

        let regions = page_detector().detect(&image).unwrap();
        assert_eq!(regions.len(), 1);
        let r = regions[0];
        assert!(r.x + r.w <= 103);
        assert!(r.y + r.h <= 97);
    }

    #[test]
    fn zero_sized_raster_is_an_error() {
        let image = RgbaImage::new(0, 0);
        let err = page_detector().detect(&image).unwrap_err();
        assert!(matches!(err, StempelError::InvalidRaster(_)));
    }

    #[test]
    fn empty_result_is_ok_not_error() {
        let result = page_detector().detect(&white(50, 50));
        assert!(matches!(result, Ok(ref v) if v.is_empty()));
    }
}
