// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Core domain types for the Stempel extraction pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an extracted crop.
///
/// Random 128-bit UUIDs guarantee uniqueness across an entire extraction
/// run, including crops produced from the same page in the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropId(pub Uuid);

impl CropId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CropId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CropId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of source a raster came from.
///
/// Paginated documents are rendered page by page at a fixed scale by the
/// rasterizing collaborator; standalone images get an upscale-and-sharpen
/// pre-pass instead. The two modalities carry independent detector presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// One page of a paginated document, rendered to a raster.
    DocumentPage,
    /// A standalone photograph or scan image.
    Image,
}

/// An axis-aligned rectangle in pixel space, produced by the region detector.
///
/// Invariant: `x + w <= source_width` and `y + h <= source_height` for the
/// raster it was detected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Expand by `pad` pixels on every side, clamped to a `width` x `height`
    /// raster. The result never extends outside the raster bounds, even when
    /// the region already touches an edge.
    pub fn padded(&self, pad: u32, width: u32, height: u32) -> Self {
        let sx = self.x.saturating_sub(pad);
        let sy = self.y.saturating_sub(pad);
        let sw = (self.w + 2 * pad).min(width - sx);
        let sh = (self.h + 2 * pad).min(height - sy);
        Self {
            x: sx,
            y: sy,
            w: sw,
            h: sh,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.w, self.h, self.x, self.y)
    }
}

/// Record of one completed extraction run over a whole source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSummary {
    /// Number of pages (or standalone images) processed.
    pub pages_processed: u32,
    /// Total crops produced across all pages.
    pub crops_found: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_ids_are_unique() {
        let ids: Vec<CropId> = (0..64).map(|_| CropId::new()).collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn padded_region_interior() {
        let region = Region::new(30, 30, 40, 40);
        let padded = region.padded(10, 100, 100);
        assert_eq!(padded, Region::new(20, 20, 60, 60));
    }

    #[test]
    fn padded_region_clamps_at_origin() {
        let region = Region::new(5, 0, 20, 20);
        let padded = region.padded(10, 100, 100);
        assert_eq!(padded.x, 0);
        assert_eq!(padded.y, 0);
        // The origin truncates the top/left pad but the full 2*pad growth
        // still applies, extending further right/down instead.
        assert_eq!(padded.w, 40);
        assert_eq!(padded.h, 40);
    }

    #[test]
    fn padded_region_clamps_at_far_edge() {
        let region = Region::new(80, 80, 20, 20);
        let padded = region.padded(10, 100, 100);
        assert_eq!(padded, Region::new(70, 70, 30, 30));
        assert!(padded.x + padded.w <= 100);
        assert!(padded.y + padded.h <= 100);
    }

    #[test]
    fn region_display_format() {
        let region = Region::new(20, 30, 60, 50);
        assert_eq!(region.to_string(), "60x50+20+30");
    }
}
