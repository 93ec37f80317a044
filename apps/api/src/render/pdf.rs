//! PDF serialization of a [`Document`] via `printpdf`.

use std::io::Cursor;
use std::path::PathBuf;

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};
use thiserror::Error;

use crate::render::document::{
    Document, DrawOp, FontWeight, Rgb, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
};

const LAYER_NAME: &str = "Layer 1";
/// Horizontal offset of the second strike used to fake a bold weight.
const FAUX_BOLD_OFFSET_MM: f32 = 0.12;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Font not found at path: {0}")]
    FontMissing(PathBuf),

    #[error("Failed to read font {path}: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Font could not be registered: {0}")]
    Font(String),

    #[error("PDF serialization failed: {0}")]
    Pdf(String),
}

/// Where the single document face comes from.
#[derive(Debug, Clone)]
pub enum FontSource {
    /// A TrueType file with full Latin Extended coverage (č, ć, ž, š, đ, ...).
    File(PathBuf),
    /// The writer's built-in Helvetica. WinAnsi only; used where no TTF is available.
    Builtin,
}

/// Serializes the document to PDF bytes, registering `font` as its only face.
pub fn write_pdf(
    document: &Document,
    font: &FontSource,
    title: &str,
) -> Result<Vec<u8>, DocumentError> {
    let (pdf, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);

    let font_ref = match font {
        FontSource::File(path) => {
            if !path.exists() {
                return Err(DocumentError::FontMissing(path.clone()));
            }
            let bytes = std::fs::read(path).map_err(|source| DocumentError::FontRead {
                path: path.clone(),
                source,
            })?;
            pdf.add_external_font(Cursor::new(bytes))
                .map_err(|e| DocumentError::Font(e.to_string()))?
        }
        FontSource::Builtin => pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| DocumentError::Font(e.to_string()))?,
    };

    let mut targets = vec![(first_page, first_layer)];
    for _ in 1..document.page_count() {
        targets.push(pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME));
    }

    for (page, (page_idx, layer_idx)) in document.pages().iter().zip(targets) {
        let layer = pdf.get_page(page_idx).get_layer(layer_idx);
        for op in &page.ops {
            draw_op(&layer, &font_ref, op);
        }
    }

    pdf.save_to_bytes()
        .map_err(|e| DocumentError::Pdf(e.to_string()))
}

fn draw_op(layer: &PdfLayerReference, font: &IndirectFontRef, op: &DrawOp) {
    match op {
        DrawOp::Text {
            x,
            baseline,
            text,
            size_pt,
            weight,
            color,
        } => {
            layer.set_fill_color(to_pdf_color(*color));
            let y = Mm(PAGE_HEIGHT_MM - baseline);
            layer.use_text(text.as_str(), *size_pt, Mm(*x), y, font);
            if *weight == FontWeight::Bold {
                layer.use_text(text.as_str(), *size_pt, Mm(*x + FAUX_BOLD_OFFSET_MM), y, font);
            }
        }
        DrawOp::Rule {
            x1,
            y1,
            x2,
            y2,
            color,
            thickness_pt,
        } => {
            layer.set_outline_color(to_pdf_color(*color));
            layer.set_outline_thickness(*thickness_pt);
            layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(*x1), Mm(PAGE_HEIGHT_MM - y1)), false),
                    (Point::new(Mm(*x2), Mm(PAGE_HEIGHT_MM - y2)), false),
                ],
                is_closed: false,
            });
        }
    }
}

fn to_pdf_color(Rgb(r, g, b): Rgb) -> printpdf::Color {
    printpdf::Color::Rgb(printpdf::Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}
