//! Paginated snapshot export
//!
//! A raster capture of the dashboard is scaled to a fixed width and tiled
//! vertically across as many pages as its height needs. Every page carries
//! the whole image; page `k` shifts it up by `k` page heights, so each page
//! shows the next slice. The result is a page layout that `export::pdf`
//! renders into the final document.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{FinsightError, FinsightResult};

/// File name of the rendered document export
pub const REPORT_DOCUMENT_FILENAME: &str = "income_expense_report.pdf";

/// Page size and image placement, in document units (points)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    /// Width the captured image is scaled to
    pub image_width: f64,
    /// Horizontal offset of the image on every page
    pub margin_left: f64,
}

impl PageGeometry {
    /// Whether the page height and image width can lay out at least one page
    pub fn is_usable(&self) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        positive(self.page_height) && positive(self.image_width)
    }
}

impl Default for PageGeometry {
    /// A4 portrait with a 500-unit image at a 15-unit margin
    fn default() -> Self {
        Self {
            page_width: 595.28,
            page_height: 841.89,
            image_width: 500.0,
            margin_left: 15.0,
        }
    }
}

/// A captured raster with its pixel dimensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    #[serde(serialize_with = "encode_bytes", deserialize_with = "decode_bytes")]
    pub bytes: Vec<u8>,
}

fn encode_bytes<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}

fn decode_bytes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD.decode(encoded).map_err(serde::de::Error::custom)
}

/// Rendering collaborator that rasterises a named surface
pub trait RasterCapture {
    /// Capture the surface, or `None` when it is not available
    fn capture(&self, surface: &str) -> Option<RasterImage>;
}

impl<F> RasterCapture for F
where
    F: Fn(&str) -> Option<RasterImage>,
{
    fn capture(&self, surface: &str) -> Option<RasterImage> {
        self(surface)
    }
}

/// Where the image sits on one page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PagePlacement {
    /// 0-based page number
    pub index: usize,
    pub x: f64,
    /// Negative offsets move the image up so the page shows a lower slice
    pub y: f64,
}

/// Page layout of a paginated snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub geometry: PageGeometry,
    pub image: RasterImage,
    /// Image height after scaling to `geometry.image_width`
    pub scaled_height: f64,
    pub pages: Vec<PagePlacement>,
}

impl SnapshotDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialise the layout as pretty JSON
    pub fn export_json(&self) -> FinsightResult<String> {
        serde_json::to_string_pretty(self).map_err(FinsightError::export)
    }
}

/// Capture a surface and lay it out across pages
///
/// Returns `None`, logging a warning, when the capture produces nothing, the
/// image has a zero dimension, or the page height or image width is not a
/// positive number.
pub fn to_paginated_snapshot(
    surface: &str,
    capture: &dyn RasterCapture,
    geometry: &PageGeometry,
) -> Option<SnapshotDocument> {
    if !geometry.is_usable() {
        tracing::warn!(
            page_height = geometry.page_height,
            image_width = geometry.image_width,
            "page geometry is not usable, skipping snapshot"
        );
        return None;
    }
    let Some(image) = capture.capture(surface) else {
        tracing::warn!(surface, "surface capture returned nothing, skipping snapshot");
        return None;
    };
    if image.width == 0 || image.height == 0 {
        tracing::warn!(
            surface,
            width = image.width,
            height = image.height,
            "captured image is empty, skipping snapshot"
        );
        return None;
    }

    let scaled_height = f64::from(image.height) * geometry.image_width / f64::from(image.width);
    let page_count = (scaled_height / geometry.page_height).ceil() as usize;

    let mut pages = Vec::with_capacity(page_count);
    for index in 0..page_count {
        pages.push(PagePlacement {
            index,
            x: geometry.margin_left,
            y: -(index as f64) * geometry.page_height,
        });
    }

    tracing::debug!(surface, scaled_height, pages = page_count, "laid out snapshot");

    Some(SnapshotDocument {
        geometry: *geometry,
        image,
        scaled_height,
        pages,
    })
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Pixel dimensions from a PNG's `IHDR` chunk
pub fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    Some((width, height))
}

/// Capture backed by PNG files on disk
///
/// The surface name is resolved relative to the base directory; a bare
/// name without extension gets `.png` appended.
#[derive(Debug, Clone)]
pub struct PngFileCapture {
    base_dir: PathBuf,
}

impl PngFileCapture {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn resolve(&self, surface: &str) -> PathBuf {
        let path = self.base_dir.join(surface);
        if path.extension().is_none() {
            path.with_extension("png")
        } else {
            path
        }
    }

    fn read(path: &Path) -> Option<RasterImage> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read capture");
                return None;
            }
        };
        let Some((width, height)) = png_dimensions(&bytes) else {
            tracing::warn!(path = %path.display(), "capture is not a PNG image");
            return None;
        };
        Some(RasterImage {
            width,
            height,
            bytes,
        })
    }
}

impl RasterCapture for PngFileCapture {
    fn capture(&self, surface: &str) -> Option<RasterImage> {
        Self::read(&self.resolve(surface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn image(width: u32, height: u32) -> RasterImage {
        RasterImage {
            width,
            height,
            bytes: vec![1, 2, 3],
        }
    }

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes
    }

    #[test]
    fn test_three_pages_for_tall_capture() {
        let geometry = PageGeometry {
            page_height: 800.0,
            ..PageGeometry::default()
        };
        let capture = |_: &str| Some(image(1000, 4000));

        let doc = to_paginated_snapshot("dashboard", &capture, &geometry).unwrap();

        assert_eq!(doc.scaled_height, 2000.0);
        assert_eq!(doc.page_count(), 3);
        let offsets: Vec<f64> = doc.pages.iter().map(|p| p.y).collect();
        assert_eq!(offsets, vec![0.0, -800.0, -1600.0]);
        assert!(doc.pages.iter().all(|p| p.x == 15.0));
    }

    #[test]
    fn test_exact_multiple_has_no_extra_page() {
        let geometry = PageGeometry {
            page_height: 500.0,
            ..PageGeometry::default()
        };
        let capture = |_: &str| Some(image(500, 1000));

        let doc = to_paginated_snapshot("dashboard", &capture, &geometry).unwrap();
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_short_capture_is_single_page() {
        let capture = |_: &str| Some(image(1000, 10));
        let doc = to_paginated_snapshot("dashboard", &capture, &PageGeometry::default()).unwrap();

        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].y, 0.0);
    }

    #[test]
    fn test_missing_capture_is_noop() {
        let capture = |_: &str| -> Option<RasterImage> { None };
        assert!(to_paginated_snapshot("dashboard", &capture, &PageGeometry::default()).is_none());
    }

    #[test]
    fn test_zero_sized_capture_is_noop() {
        let capture = |_: &str| Some(image(800, 0));
        assert!(to_paginated_snapshot("dashboard", &capture, &PageGeometry::default()).is_none());
    }

    #[test]
    fn test_unusable_geometry_is_noop() {
        let capture = |_: &str| Some(image(10, 10));
        let geometries = [
            PageGeometry {
                page_height: 0.0,
                ..PageGeometry::default()
            },
            PageGeometry {
                page_height: -10.0,
                ..PageGeometry::default()
            },
            PageGeometry {
                page_height: f64::NAN,
                ..PageGeometry::default()
            },
            PageGeometry {
                image_width: 0.0,
                ..PageGeometry::default()
            },
            PageGeometry {
                image_width: f64::INFINITY,
                ..PageGeometry::default()
            },
        ];

        for geometry in geometries {
            assert!(!geometry.is_usable());
            assert!(to_paginated_snapshot("dashboard", &capture, &geometry).is_none());
        }
    }

    #[test]
    fn test_zero_page_height_from_settings_is_noop() {
        let json = r#"{"page": {"page_width": 595.28, "page_height": 0,
                       "image_width": 500, "margin_left": 15}}"#;
        let settings: crate::config::Settings = serde_json::from_str(json).unwrap();
        let capture = |_: &str| Some(image(10, 10));

        assert!(to_paginated_snapshot("dashboard", &capture, &settings.page).is_none());
    }

    #[test]
    fn test_capture_receives_surface_name() {
        let capture = |surface: &str| (surface == "summary").then(|| image(10, 10));
        let geometry = PageGeometry::default();

        assert!(to_paginated_snapshot("summary", &capture, &geometry).is_some());
        assert!(to_paginated_snapshot("other", &capture, &geometry).is_none());
    }

    #[test]
    fn test_png_dimensions() {
        assert_eq!(png_dimensions(&png_header(640, 2400)), Some((640, 2400)));
        assert_eq!(png_dimensions(b"GIF89a not a png at all!"), None);
        assert_eq!(png_dimensions(&PNG_SIGNATURE), None);
    }

    #[test]
    fn test_png_file_capture() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("dashboard.png"), png_header(250, 1000)).unwrap();
        let capture = PngFileCapture::new(temp_dir.path());

        let raster = capture.capture("dashboard").unwrap();
        assert_eq!((raster.width, raster.height), (250, 1000));
        assert!(capture.capture("missing").is_none());

        let doc = to_paginated_snapshot("dashboard", &capture, &PageGeometry::default()).unwrap();
        assert_eq!(doc.scaled_height, 2000.0);
        assert_eq!(doc.page_count(), 3);
    }

    #[test]
    fn test_document_json_carries_image_bytes() {
        let capture = |_: &str| Some(image(10, 10));
        let doc = to_paginated_snapshot("dashboard", &capture, &PageGeometry::default()).unwrap();

        let json = doc.export_json().unwrap();
        assert!(json.contains("\"AQID\""));

        let back: SnapshotDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
