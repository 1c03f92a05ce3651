//! PDF exporter — turns a page layout into a single-page A4 document.
//!
//! The preview is drawn as native vector text rather than a rasterized
//! bitmap, so the export keeps selectable text while preserving the same
//! geometry contract: one A4 portrait page in millimeter units, a uniform
//! `min(pageW/w, pageH/h)` scale so the whole canvas fits without
//! distortion, equal margins on both axes, and every preview hyperlink
//! registered as a clickable annotation at its converted rectangle. One bad
//! link region (or an undecodable photo) is skipped with a warning; it never
//! aborts the export.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use thiserror::Error;
use tracing::warn;

use crate::layout::font_metrics::FontStyle;
use crate::layout::{LinkRegion, PageLayout, PxRect};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
const PT_PER_MM: f32 = 72.0 / 25.4;
/// Fraction of the font size from the top of a line box down to the baseline.
const BASELINE_RATIO: f32 = 0.8;
const JPEG_QUALITY: u8 = 90;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: the preview is empty")]
    EmptyPreview,

    #[error("PDF assembly error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unusable link region: {0}")]
    BadLink(&'static str),

    #[error("unusable profile image: {0}")]
    BadImage(&'static str),
}

// ────────────────────────────────────────────────────────────────────────────
// Page transform
// ────────────────────────────────────────────────────────────────────────────

/// Maps preview pixels onto the A4 page: one uniform scale plus centering
/// offsets, shared by text, image, and link rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTransform {
    /// Millimeters per preview pixel.
    pub scale: f32,
    pub offset_x_mm: f32,
    pub offset_y_mm: f32,
}

/// Computes the uniform fit of a `width_px` x `height_px` canvas onto A4.
pub fn fit_to_page(width_px: f32, height_px: f32) -> PageTransform {
    let scale = (PAGE_WIDTH_MM / width_px).min(PAGE_HEIGHT_MM / height_px);
    PageTransform {
        scale,
        offset_x_mm: (PAGE_WIDTH_MM - width_px * scale) / 2.0,
        offset_y_mm: (PAGE_HEIGHT_MM - height_px * scale) / 2.0,
    }
}

impl PageTransform {
    /// Converts a layout x (px, from the left) to page points.
    pub fn x_pt(&self, x_px: f32) -> f32 {
        (self.offset_x_mm + x_px * self.scale) * PT_PER_MM
    }

    /// Converts a layout y (px, from the top) to page points, flipping into
    /// PDF's bottom-up axis.
    pub fn y_pt(&self, y_px: f32) -> f32 {
        (PAGE_HEIGHT_MM - (self.offset_y_mm + y_px * self.scale)) * PT_PER_MM
    }

    /// Converts a length in layout px to page points.
    pub fn len_pt(&self, px: f32) -> f32 {
        px * self.scale * PT_PER_MM
    }

    /// Converts a layout rectangle to a PDF `[x1 y1 x2 y2]` rect
    /// (lower-left, upper-right).
    pub fn rect_pt(&self, rect: &PxRect) -> [f32; 4] {
        [
            self.x_pt(rect.x),
            self.y_pt(rect.y + rect.height),
            self.x_pt(rect.x + rect.width),
            self.y_pt(rect.y),
        ]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Export
// ────────────────────────────────────────────────────────────────────────────

/// Builds the `resume.pdf` bytes for a laid-out preview.
pub fn export_pdf(layout: &PageLayout) -> Result<Vec<u8>, ExportError> {
    if layout.is_empty() {
        return Err(ExportError::EmptyPreview);
    }
    let transform = fit_to_page(layout.width, layout.height);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let font_bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });

    let mut operations: Vec<Operation> = Vec::new();
    for span in &layout.spans {
        let font = match span.style {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
        };
        let baseline_px = span.y + span.size * BASELINE_RATIO;
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![font.into(), transform.len_pt(span.size).into()],
        ));
        operations.push(Operation::new(
            "Td",
            vec![
                transform.x_pt(span.x).into(),
                transform.y_pt(baseline_px).into(),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_pdf_text(&span.text),
                StringFormat::Literal,
            )],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    let mut xobjects = Dictionary::new();
    if let Some(photo) = &layout.photo {
        match build_photo_xobject(&photo.data_url) {
            Ok(stream) => {
                let image_id = doc.add_object(stream);
                xobjects.set("Im1", Object::Reference(image_id));

                let width_pt = transform.len_pt(photo.rect.width);
                let height_pt = transform.len_pt(photo.rect.height);
                let x_pt = transform.x_pt(photo.rect.x);
                let y_pt = transform.y_pt(photo.rect.y + photo.rect.height);
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new(
                    "cm",
                    vec![
                        width_pt.into(),
                        0.into(),
                        0.into(),
                        height_pt.into(),
                        x_pt.into(),
                        y_pt.into(),
                    ],
                ));
                operations.push(Operation::new("Do", vec!["Im1".into()]));
                operations.push(Operation::new("Q", vec![]));
            }
            Err(e) => warn!("skipping profile photo in export: {e}"),
        }
    }

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));

    let mut resources = dictionary! {
        "Font" => dictionary! {
            "F1" => Object::Reference(font_regular_id),
            "F2" => Object::Reference(font_bold_id),
        },
    };
    if !xobjects.is_empty() {
        resources.set("XObject", Object::Dictionary(xobjects));
    }

    // Link overlays: each region is independent, so one failure only costs
    // that region.
    let mut annotations: Vec<Object> = Vec::new();
    for link in &layout.links {
        match build_link_annotation(link, &transform) {
            Ok(annotation) => annotations.push(Object::Reference(doc.add_object(annotation))),
            Err(e) => warn!("skipping link region for '{}': {e}", link.href),
        }
    }

    let mut page = dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            (PAGE_WIDTH_MM * PT_PER_MM).into(),
            (PAGE_HEIGHT_MM * PT_PER_MM).into(),
        ],
        "Contents" => content_id,
        "Resources" => resources,
    };
    if !annotations.is_empty() {
        page.set("Annots", annotations);
    }
    let page_id = doc.add_object(page);

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

// ────────────────────────────────────────────────────────────────────────────
// Pieces
// ────────────────────────────────────────────────────────────────────────────

fn build_link_annotation(
    link: &LinkRegion,
    transform: &PageTransform,
) -> Result<Dictionary, ExportError> {
    if link.href.trim().is_empty() {
        return Err(ExportError::BadLink("empty target"));
    }
    let [x1, y1, x2, y2] = transform.rect_pt(&link.rect);
    if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) || x2 <= x1 || y2 <= y1 {
        return Err(ExportError::BadLink("degenerate rectangle"));
    }
    Ok(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![x1.into(), y1.into(), x2.into(), y2.into()],
        "Border" => vec![0.into(), 0.into(), 0.into()],
        "A" => dictionary! {
            "Type" => "Action",
            "S" => "URI",
            "URI" => Object::string_literal(link.href.as_str()),
        },
    })
}

/// Decodes a `data:image/...;base64,` URL and re-encodes it as a JPEG
/// XObject stream (DCTDecode).
fn build_photo_xobject(data_url: &str) -> Result<Stream, ExportError> {
    let raw = decode_data_url(data_url)?;
    let decoded = image::load_from_memory(&raw)
        .map_err(|_| ExportError::BadImage("undecodable image data"))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut jpeg = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode(rgb.as_raw(), width, height, image::ColorType::Rgb8)
        .map_err(|_| ExportError::BadImage("JPEG re-encode failed"))?;

    Ok(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    ))
}

fn decode_data_url(data_url: &str) -> Result<Vec<u8>, ExportError> {
    let (meta, payload) = data_url
        .split_once(',')
        .ok_or(ExportError::BadImage("not a data URL"))?;
    if !meta.starts_with("data:image/") || !meta.ends_with(";base64") {
        return Err(ExportError::BadImage("unsupported data URL header"));
    }
    BASE64
        .decode(payload.trim())
        .map_err(|_| ExportError::BadImage("invalid base64 payload"))
}

/// Maps text to the byte range the standard Helvetica encoding covers.
/// Codepoints past 0xFF have no slot and become `?`.
fn encode_pdf_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if code <= 0xFF {
                code as u8
            } else {
                b'?'
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{default_layout_config, LayoutEngine, TextSpan};
    use crate::models::resume::{Contact, ExperienceItem, ProjectItem, ResumeDocument};
    use crate::render::render;

    fn sample_layout() -> PageLayout {
        let doc = ResumeDocument {
            contact: Contact {
                full_name: "Asha Rao".to_string(),
                email: Some("asha@example.com".to_string()),
                github: Some("github.com/asha".to_string()),
                ..Contact::default()
            },
            about: "Engineer.".to_string(),
            experience: vec![ExperienceItem {
                role: "Intern".to_string(),
                company: Some("Acme".to_string()),
                ..ExperienceItem::default()
            }],
            projects: vec![ProjectItem {
                name: "Forge".to_string(),
                repo: Some("github.com/a/forge".to_string()),
                ..ProjectItem::default()
            }],
            ..ResumeDocument::default()
        };
        LayoutEngine::new(default_layout_config()).layout(&render(&doc))
    }

    #[test]
    fn test_fit_to_page_uses_min_scale_and_centers() {
        // Tall canvas: height is the constraint.
        let t = fit_to_page(794.0, 2000.0);
        assert!((t.scale - PAGE_HEIGHT_MM / 2000.0).abs() < 1e-6);
        assert!((t.offset_y_mm).abs() < 1e-4, "constrained axis has no margin");
        let expected_x = (PAGE_WIDTH_MM - 794.0 * t.scale) / 2.0;
        assert!((t.offset_x_mm - expected_x).abs() < 1e-4);

        // Wide canvas: width is the constraint.
        let t = fit_to_page(2000.0, 794.0);
        assert!((t.scale - PAGE_WIDTH_MM / 2000.0).abs() < 1e-6);
        assert!((t.offset_x_mm).abs() < 1e-4);
    }

    #[test]
    fn test_transform_preserves_aspect_ratio() {
        let t = fit_to_page(794.0, 1123.0);
        let w = t.len_pt(100.0);
        let h = t.len_pt(100.0);
        assert!((w - h).abs() < 1e-4, "uniform scale must not distort");
    }

    #[test]
    fn test_rect_conversion_flips_vertical_axis() {
        let t = fit_to_page(794.0, 1123.0);
        let rect = PxRect {
            x: 48.0,
            y: 48.0,
            width: 100.0,
            height: 16.0,
        };
        let [x1, y1, x2, y2] = t.rect_pt(&rect);
        assert!(x2 > x1);
        assert!(y2 > y1, "PDF rect must be lower-left to upper-right");
        // Top of a near-top rect lands near the top of the page.
        assert!(y2 > PAGE_HEIGHT_MM * PT_PER_MM * 0.9);
    }

    #[test]
    fn test_export_produces_pdf_bytes_with_links() {
        let layout = sample_layout();
        assert!(!layout.links.is_empty());
        let bytes = export_pdf(&layout).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        let body = String::from_utf8_lossy(&bytes);
        assert!(body.contains("Helvetica"));
        assert!(body.contains("/Annots"));
        assert!(body.contains("mailto:asha@example.com"));
    }

    #[test]
    fn test_export_empty_layout_is_refused() {
        let layout = PageLayout {
            width: 794.0,
            height: 96.0,
            spans: vec![],
            links: vec![],
            photo: None,
        };
        assert!(matches!(
            export_pdf(&layout),
            Err(ExportError::EmptyPreview)
        ));
    }

    #[test]
    fn test_bad_link_region_is_skipped_not_fatal() {
        let mut layout = sample_layout();
        layout.links.push(LinkRegion {
            href: "  ".to_string(),
            rect: PxRect {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
            },
        });
        layout.links.push(LinkRegion {
            href: "https://example.com".to_string(),
            rect: PxRect {
                x: 10.0,
                y: 10.0,
                width: 0.0,
                height: 0.0,
            },
        });
        // Both regions are unusable; the export still succeeds.
        let bytes = export_pdf(&layout).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_undecodable_photo_is_skipped_not_fatal() {
        let mut layout = sample_layout();
        layout.photo = Some(crate::layout::PhotoSlot {
            data_url: "data:image/png;base64,!!!notbase64!!!".to_string(),
            rect: PxRect {
                x: 650.0,
                y: 48.0,
                width: 96.0,
                height: 96.0,
            },
        });
        let bytes = export_pdf(&layout).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_decode_data_url_rejects_non_image() {
        assert!(decode_data_url("data:text/plain;base64,aGk=").is_err());
        assert!(decode_data_url("plainstring").is_err());
        assert!(decode_data_url("data:image/png;base64,aGk=").is_ok());
    }

    #[test]
    fn test_encode_pdf_text_maps_out_of_range_to_question_mark() {
        assert_eq!(encode_pdf_text("Asha"), b"Asha".to_vec());
        assert_eq!(encode_pdf_text("héllo"), b"h\xe9llo".to_vec());
        assert_eq!(encode_pdf_text("日本"), b"??".to_vec());
    }

    #[test]
    fn test_non_ascii_span_still_exports() {
        let layout = PageLayout {
            width: 794.0,
            height: 200.0,
            spans: vec![TextSpan {
                text: "Café Zürich 東京".to_string(),
                x: 48.0,
                y: 48.0,
                size: 12.0,
                style: FontStyle::Regular,
            }],
            links: vec![],
            photo: None,
        };
        let bytes = export_pdf(&layout).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
