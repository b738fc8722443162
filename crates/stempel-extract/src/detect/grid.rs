// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Block quantization — collapses a raster into a coarse boolean occupancy
// grid so the labeling pass never walks individual pixels.

use image::RgbaImage;
use tracing::debug;

/// Coarse occupancy grid derived from a raster.
///
/// Each cell covers a `block_size` x `block_size` pixel block and is marked
/// as content when any pixel in the block fails the near-white background
/// test. Cells at the right/bottom edges cover only the in-bounds remainder.
/// The grid is computed once per detection call and discarded after labeling.
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Quantize a raster into an occupancy grid.
    ///
    /// A pixel counts as ink when any of its RGB channels is strictly below
    /// `background_threshold`; the scan over a block stops at the first ink
    /// pixel found.
    pub fn quantize(image: &RgbaImage, block_size: u32, background_threshold: u8) -> Self {
        let (img_w, img_h) = image.dimensions();
        let width = img_w.div_ceil(block_size);
        let height = img_h.div_ceil(block_size);
        let mut cells = vec![false; (width * height) as usize];

        for by in 0..height {
            for bx in 0..width {
                let x0 = bx * block_size;
                let y0 = by * block_size;
                let x1 = (x0 + block_size).min(img_w);
                let y1 = (y0 + block_size).min(img_h);

                'block: for y in y0..y1 {
                    for x in x0..x1 {
                        let [r, g, b, _] = image.get_pixel(x, y).0;
                        if r < background_threshold
                            || g < background_threshold
                            || b < background_threshold
                        {
                            cells[(by * width + bx) as usize] = true;
                            break 'block;
                        }
                    }
                }
            }
        }

        debug!(
            grid_w = width,
            grid_h = height,
            content_cells = cells.iter().filter(|&&c| c).count(),
            "Raster quantized"
        );

        Self {
            width,
            height,
            cells,
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the cell at grid coordinates `(x, y)` holds content.
    pub fn is_content(&self, x: u32, y: u32) -> bool {
        self.cells[(y * self.width + x) as usize]
    }

    /// Number of content cells in the grid.
    pub fn content_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn white(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn blank_raster_has_no_content_cells() {
        let grid = OccupancyGrid::quantize(&white(100, 100), 5, 240);
        assert_eq!(grid.width(), 20);
        assert_eq!(grid.height(), 20);
        assert_eq!(grid.content_count(), 0);
    }

    #[test]
    fn grid_dimensions_round_up() {
        let grid = OccupancyGrid::quantize(&white(101, 99), 5, 240);
        assert_eq!(grid.width(), 21);
        assert_eq!(grid.height(), 20);
    }

    #[test]
    fn single_ink_pixel_marks_exactly_one_cell() {
        let mut image = white(50, 50);
        image.put_pixel(12, 27, Rgba([0, 0, 0, 255]));

        let grid = OccupancyGrid::quantize(&image, 5, 240);
        assert_eq!(grid.content_count(), 1);
        assert!(grid.is_content(2, 5));
    }

    #[test]
    fn threshold_boundary_channel_at_threshold_is_background() {
        // All channels exactly at the threshold: background.
        let image = RgbaImage::from_pixel(10, 10, Rgba([240, 240, 240, 255]));
        let grid = OccupancyGrid::quantize(&image, 5, 240);
        assert_eq!(grid.content_count(), 0);
    }

    #[test]
    fn threshold_boundary_one_unit_below_is_content() {
        let mut image = white(10, 10);
        // A single channel one unit below the threshold classifies the block.
        image.put_pixel(0, 0, Rgba([255, 239, 255, 255]));
        let grid = OccupancyGrid::quantize(&image, 5, 240);
        assert_eq!(grid.content_count(), 1);
        assert!(grid.is_content(0, 0));
    }

    #[test]
    fn partial_edge_blocks_test_in_bounds_pixels_only() {
        // 7x7 raster, block size 5: the edge blocks are 2 pixels wide/tall.
        let mut image = white(7, 7);
        image.put_pixel(6, 6, Rgba([0, 0, 0, 255]));

        let grid = OccupancyGrid::quantize(&image, 5, 240);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert!(grid.is_content(1, 1));
        assert_eq!(grid.content_count(), 1);
    }

    #[test]
    fn raster_smaller_than_one_block() {
        let mut image = white(3, 3);
        image.put_pixel(1, 1, Rgba([10, 10, 10, 255]));

        let grid = OccupancyGrid::quantize(&image, 5, 240);
        assert_eq!(grid.len(), 1);
        assert!(grid.is_content(0, 0));
    }
}
