// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Crop materialization — copies each detected region (plus padding) out of
// the source raster into an independently owned, PNG-encodable record.

use image::{ImageFormat, RgbaImage, imageops};
use stempel_core::error::{Result, StempelError};
use stempel_core::{CropId, Region};
use tracing::{debug, instrument};

/// An extracted crop: a freshly allocated copy of one padded region.
///
/// Owns its pixels independently of the source raster. The identifier is
/// unique across all crops of a run, not merely within one page.
#[derive(Debug, Clone)]
pub struct Crop {
    pub id: CropId,
    /// 1-based page the crop was found on; standalone images count as page 1.
    pub page: u32,
    /// The padded region this crop was cut from, in source pixel space.
    pub region: Region,
    image: RgbaImage,
}

impl Crop {
    /// Crop width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Crop height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the crop's pixel buffer.
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Whether both dimensions reach `min_size`.
    ///
    /// The review UI re-filters candidates with a user-adjustable minimum, so
    /// this check has to be answerable after detection without re-running it.
    pub fn meets_min_size(&self, min_size: u32) -> bool {
        self.width() >= min_size && self.height() >= min_size
    }

    /// Encode the crop as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| StempelError::ImageEncoding(format!("PNG encoding failed: {}", err)))?;
        Ok(buffer)
    }

    /// Write the crop to a file. The format is inferred from the extension.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.image.save(path.as_ref()).map_err(|err| {
            StempelError::ImageEncoding(format!(
                "failed to save crop to {}: {}",
                path.as_ref().display(),
                err
            ))
        })
    }
}

/// Materializes detected regions as independent crops with a fixed padding
/// margin.
pub struct Cropper {
    pad: u32,
}

impl Cropper {
    /// Create a cropper with the given padding margin in pixels.
    pub fn new(pad: u32) -> Self {
        Self { pad }
    }

    /// Cut the padded region out of `image` into a freshly allocated raster.
    ///
    /// The padding is clamped to the raster bounds, so the copy never reads
    /// outside the source even when the region touches an edge.
    #[instrument(skip(self, image), fields(%region, page))]
    pub fn crop(&self, image: &RgbaImage, region: Region, page: u32) -> Crop {
        let padded = region.padded(self.pad, image.width(), image.height());
        let view = imageops::crop_imm(image, padded.x, padded.y, padded.w, padded.h);
        let crop = Crop {
            id: CropId::new(),
            page,
            region: padded,
            image: view.to_image(),
        };
        debug!(id = %crop.id, w = crop.width(), h = crop.height(), "Crop materialized");
        crop
    }
}
