// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Pre-detection raster preparation — upscaling and Laplacian sharpening for
// standalone image sources. Faint or anti-aliased ink separates from the
// background much more reliably after a local contrast boost.

use image::{Rgba, RgbaImage, imageops};
use tracing::{debug, info, instrument};

/// Sharpen a raster with a 4-neighbor Laplacian high-pass added back onto the
/// original signal.
///
/// For each pixel, per RGB channel: `result = c + amount * (4c - n - s - e - w)`,
/// clamped to [0, 255]. Neighbors that fall outside the raster reuse the
/// center value, so edge pixels get a reduced-strength response instead of an
/// out-of-bounds read. The alpha channel is copied through untouched.
///
/// All reads come from the input snapshot; results land in a fresh buffer, so
/// no pixel ever observes a partially sharpened neighbor.
#[instrument(skip(image), fields(width = image.width(), height = image.height(), amount))]
pub fn sharpen(image: &RgbaImage, amount: f32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut output = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let center = *image.get_pixel(x, y);
            let north = neighbor_or(image, x as i64, y as i64 - 1, center);
            let south = neighbor_or(image, x as i64, y as i64 + 1, center);
            let east = neighbor_or(image, x as i64 + 1, y as i64, center);
            let west = neighbor_or(image, x as i64 - 1, y as i64, center);

            let boost = |i: usize| -> u8 {
                let c = center.0[i] as f32;
                let ring = north.0[i] as f32
                    + south.0[i] as f32
                    + east.0[i] as f32
                    + west.0[i] as f32;
                (c + amount * (4.0 * c - ring)).clamp(0.0, 255.0) as u8
            };

            output.put_pixel(x, y, Rgba([boost(0), boost(1), boost(2), center.0[3]]));
        }
    }

    debug!("Sharpening pass complete");
    output
}

/// Read a neighbor pixel, substituting the center pixel for coordinates
/// outside the raster.
fn neighbor_or(image: &RgbaImage, x: i64, y: i64, center: Rgba<u8>) -> Rgba<u8> {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        center
    } else {
        *image.get_pixel(x as u32, y as u32)
    }
}

/// Raster preparation pipeline for standalone image sources.
///
/// All operations are non-destructive: each method consumes `self` and
/// returns a new `Preprocessor` wrapping the transformed raster, enabling
/// method chaining.
///
/// ```ignore
/// let raster = Preprocessor::from_image(photo)
///     .upscale(2.0)
///     .sharpen(0.5)
///     .into_image();
/// ```
pub struct Preprocessor {
    /// The current working raster.
    image: RgbaImage,
}

impl Preprocessor {
    /// Wrap an already-decoded raster.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Current raster width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current raster height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Upscale the raster by `factor` using Lanczos3 filtering.
    ///
    /// Factors at or below zero, and factors within rounding distance of 1.0,
    /// leave the raster unchanged.
    #[instrument(skip(self), fields(factor))]
    pub fn upscale(self, factor: f32) -> Self {
        if factor <= 0.0 || (factor - 1.0).abs() < 1e-3 {
            return self;
        }

        let new_w = (self.image.width() as f32 * factor).round() as u32;
        let new_h = (self.image.height() as f32 * factor).round() as u32;
        info!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            new_w,
            new_h,
            "Upscaling image"
        );

        let resized = imageops::resize(
            &self.image,
            new_w.max(1),
            new_h.max(1),
            imageops::FilterType::Lanczos3,
        );
        Self { image: resized }
    }

    /// Apply the Laplacian sharpening filter at the given strength.
    #[instrument(skip(self), fields(amount))]
    pub fn sharpen(self, amount: f32) -> Self {
        info!(amount, "Sharpening image");
        Self {
            image: sharpen(&self.image, amount),
        }
    }

    /// Consume the preprocessor and return the prepared raster.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
