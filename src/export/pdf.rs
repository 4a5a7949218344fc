//! PDF rendering of a paginated snapshot
//!
//! Each [`PagePlacement`] becomes one page of the layout's page size with
//! the full capture drawn on it. Layout offsets are measured from the top
//! of the page, PDF coordinates from the bottom, so the image's bottom edge
//! lands at `page_height - y - scaled_height`.
//!
//! [`PagePlacement`]: super::snapshot::PagePlacement

use std::io::{Cursor, Write};

use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{Image, ImageTransform, Mm, PdfDocument, Pt};

use crate::error::{FinsightError, FinsightResult};

use super::snapshot::SnapshotDocument;

/// Title stored in the document metadata
pub const REPORT_DOCUMENT_TITLE: &str = "Income and Expense Report";

const LAYER_NAME: &str = "Snapshot";

/// Points per inch; drawing the image at this resolution makes one pixel one point
const POINTS_PER_INCH: f32 = 72.0;

fn to_mm(points: f64) -> Mm {
    Mm::from(Pt(points as f32))
}

fn decode_png(bytes: &[u8]) -> FinsightResult<Image> {
    let decoder = PngDecoder::new(Cursor::new(bytes)).map_err(FinsightError::export)?;
    Image::try_from(decoder).map_err(FinsightError::export)
}

/// Render the snapshot's pages into PDF bytes
pub fn render_snapshot_pdf(document: &SnapshotDocument) -> FinsightResult<Vec<u8>> {
    let geometry = &document.geometry;
    let page_width = to_mm(geometry.page_width);
    let page_height = to_mm(geometry.page_height);
    let scale = (geometry.image_width / f64::from(document.image.width)) as f32;

    let (pdf, first_page, first_layer) =
        PdfDocument::new(REPORT_DOCUMENT_TITLE, page_width, page_height, LAYER_NAME);
    let mut first = Some((first_page, first_layer));

    for placement in &document.pages {
        let (page, layer) = match first.take() {
            Some(indices) => indices,
            None => pdf.add_page(page_width, page_height, LAYER_NAME),
        };
        let bottom = geometry.page_height - placement.y - document.scaled_height;

        decode_png(&document.image.bytes)?.add_to_layer(
            pdf.get_page(page).get_layer(layer),
            ImageTransform {
                translate_x: Some(to_mm(placement.x)),
                translate_y: Some(to_mm(bottom)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(POINTS_PER_INCH),
                ..Default::default()
            },
        );
    }

    let bytes = pdf
        .save_to_bytes()
        .map_err(|e| FinsightError::Export(format!("Failed to render PDF: {:?}", e)))?;
    tracing::debug!(pages = document.page_count(), bytes = bytes.len(), "rendered snapshot PDF");
    Ok(bytes)
}

/// Render the snapshot as PDF into any writer
pub fn write_snapshot_pdf<W: Write + ?Sized>(
    document: &SnapshotDocument,
    writer: &mut W,
) -> FinsightResult<()> {
    let bytes = render_snapshot_pdf(document)?;
    writer.write_all(&bytes).map_err(FinsightError::export)
}
