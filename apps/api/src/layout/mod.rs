//! Layout engine — positions the rendered preview on a fixed-width pixel
//! canvas, the geometry the PDF exporter scales onto a page.
//!
//! Output is a flat list of positioned text spans plus one pixel rectangle
//! per hyperlink (and an optional photo slot). Positions are deterministic:
//! the same `RenderedResume` always lays out identically, which is what
//! keeps exported link rectangles aligned with the drawn text.

pub mod font_metrics;

use serde::Serialize;

use crate::render::{Link, RenderedResume};
use font_metrics::{get_metrics, wrap_words, FontStyle};

// ────────────────────────────────────────────────────────────────────────────
// Geometry types
// ────────────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle in preview pixels, `y` growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PxRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One line of text placed on the canvas. `y` is the top of the line box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSpan {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub style: FontStyle,
}

/// A clickable region in preview pixels, pointing at its normalized target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkRegion {
    pub href: String,
    pub rect: PxRect,
}

/// Reserved rectangle for the profile photo, with its source data URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoSlot {
    pub data_url: String,
    pub rect: PxRect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub spans: Vec<TextSpan>,
    pub links: Vec<LinkRegion>,
    pub photo: Option<PhotoSlot>,
}

impl PageLayout {
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty() && self.photo.is_none()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Layout parameters for the preview canvas.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Canvas width in pixels (A4 at 96dpi).
    pub width_px: f32,
    pub margin_px: f32,
    pub name_size: f32,
    pub contact_size: f32,
    pub section_title_size: f32,
    pub primary_size: f32,
    pub meta_size: f32,
    pub body_size: f32,
    /// Line box height as a multiple of font size.
    pub line_height: f32,
    pub photo_size_px: f32,
}

/// Default canvas: 794px wide (A4 at 96dpi), 48px margins.
pub fn default_layout_config() -> LayoutConfig {
    LayoutConfig {
        width_px: 794.0,
        margin_px: 48.0,
        name_size: 26.0,
        contact_size: 11.0,
        section_title_size: 14.0,
        primary_size: 12.0,
        meta_size: 10.5,
        body_size: 11.0,
        line_height: 1.45,
        photo_size_px: 96.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

const SECTION_GAP_PX: f32 = 18.0;
const ENTRY_GAP_PX: f32 = 10.0;
const HEADER_GAP_PX: f32 = 6.0;
const PHOTO_GUTTER_PX: f32 = 16.0;

#[derive(Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        LayoutEngine { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays the rendered preview out on the canvas.
    pub fn layout(&self, resume: &RenderedResume) -> PageLayout {
        let mut page = PageBuilder::new(&self.config);

        // The photo sits top-right; header text narrows to flow beside it.
        let photo = resume.profile_image_data_url.as_ref().map(|data_url| {
            let size = self.config.photo_size_px;
            PhotoSlot {
                data_url: data_url.clone(),
                rect: PxRect {
                    x: self.config.width_px - self.config.margin_px - size,
                    y: self.config.margin_px,
                    width: size,
                    height: size,
                },
            }
        });
        let header_width = match &photo {
            Some(slot) => page.content_width() - slot.rect.width - PHOTO_GUTTER_PX,
            None => page.content_width(),
        };

        if !resume.name.is_empty() {
            page.text_block(
                &resume.name,
                self.config.name_size,
                FontStyle::Bold,
                header_width,
            );
            page.gap(HEADER_GAP_PX);
        }
        if !resume.contact_links.is_empty() {
            page.link_row(
                &resume.contact_links,
                self.config.contact_size,
                header_width,
            );
            page.gap(HEADER_GAP_PX);
        }
        if let Some(about) = &resume.about {
            page.gap(HEADER_GAP_PX);
            page.text_block(about, self.config.body_size, FontStyle::Regular, header_width);
        }

        for section in &resume.sections {
            page.gap(SECTION_GAP_PX);
            page.text_block(
                &section.title,
                self.config.section_title_size,
                FontStyle::Bold,
                page.content_width(),
            );
            page.gap(HEADER_GAP_PX);

            for (i, entry) in section.entries.iter().enumerate() {
                if i > 0 {
                    page.gap(ENTRY_GAP_PX);
                }
                page.text_block(
                    &entry.primary,
                    self.config.primary_size,
                    FontStyle::Bold,
                    page.content_width(),
                );
                if let Some(meta) = &entry.meta {
                    page.text_block(
                        meta,
                        self.config.meta_size,
                        FontStyle::Regular,
                        page.content_width(),
                    );
                }
                for paragraph in &entry.body {
                    page.text_block(
                        paragraph,
                        self.config.body_size,
                        FontStyle::Regular,
                        page.content_width(),
                    );
                }
                if !entry.links.is_empty() {
                    page.link_row(&entry.links, self.config.body_size, page.content_width());
                }
                if !entry.tags.is_empty() {
                    page.text_block(
                        &entry.tags.join(", "),
                        self.config.body_size,
                        FontStyle::Regular,
                        page.content_width(),
                    );
                }
            }
        }

        page.finish(photo)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page builder
// ────────────────────────────────────────────────────────────────────────────

struct PageBuilder<'a> {
    config: &'a LayoutConfig,
    spans: Vec<TextSpan>,
    links: Vec<LinkRegion>,
    y: f32,
}

impl<'a> PageBuilder<'a> {
    fn new(config: &'a LayoutConfig) -> Self {
        PageBuilder {
            config,
            spans: Vec::new(),
            links: Vec::new(),
            y: config.margin_px,
        }
    }

    fn content_width(&self) -> f32 {
        self.config.width_px - 2.0 * self.config.margin_px
    }

    fn advance(&self, size: f32) -> f32 {
        size * self.config.line_height
    }

    fn gap(&mut self, px: f32) {
        self.y += px;
    }

    /// Word-wraps `text` at `max_width_px` and emits one span per line.
    fn text_block(&mut self, text: &str, size: f32, style: FontStyle, max_width_px: f32) {
        let metrics = get_metrics(style);
        for line in wrap_words(text, metrics, max_width_px / size) {
            self.spans.push(TextSpan {
                text: line,
                x: self.config.margin_px,
                y: self.y,
                size,
                style,
            });
            self.y += self.advance(size);
        }
    }

    /// Flows link labels inline, separated by `|`, wrapping to new lines as
    /// needed. Each label gets a `LinkRegion` at its exact rectangle.
    fn link_row(&mut self, links: &[Link], size: f32, max_width_px: f32) {
        let metrics = get_metrics(FontStyle::Regular);
        let sep = "  |  ";
        let sep_width = metrics.measure_str(sep) * size;
        let right_edge = self.config.margin_px + max_width_px;

        let mut x = self.config.margin_px;
        let mut placed_on_line = false;

        for link in links {
            let label_width = metrics.measure_str(&link.label) * size;
            if placed_on_line && x + sep_width + label_width > right_edge {
                self.y += self.advance(size);
                x = self.config.margin_px;
                placed_on_line = false;
            }
            if placed_on_line {
                self.spans.push(TextSpan {
                    text: sep.to_string(),
                    x,
                    y: self.y,
                    size,
                    style: FontStyle::Regular,
                });
                x += sep_width;
            }
            self.spans.push(TextSpan {
                text: link.label.clone(),
                x,
                y: self.y,
                size,
                style: FontStyle::Regular,
            });
            self.links.push(LinkRegion {
                href: link.href.clone(),
                rect: PxRect {
                    x,
                    y: self.y,
                    width: label_width,
                    height: self.advance(size),
                },
            });
            x += label_width;
            placed_on_line = true;
        }
        if placed_on_line {
            self.y += self.advance(size);
        }
    }

    fn finish(self, photo: Option<PhotoSlot>) -> PageLayout {
        let text_bottom = self.y + self.config.margin_px;
        let photo_bottom = photo
            .as_ref()
            .map(|p| p.rect.y + p.rect.height + self.config.margin_px)
            .unwrap_or(0.0);
        PageLayout {
            width: self.config.width_px,
            height: text_bottom.max(photo_bottom),
            spans: self.spans,
            links: self.links,
            photo,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Contact, ExperienceItem, ResumeDocument};
    use crate::render::render;

    fn engine() -> LayoutEngine {
        LayoutEngine::new(default_layout_config())
    }

    fn sample_document() -> ResumeDocument {
        ResumeDocument {
            contact: Contact {
                full_name: "Asha Rao".to_string(),
                email: Some("asha@example.com".to_string()),
                github: Some("github.com/asha".to_string()),
                ..Contact::default()
            },
            about: "Systems engineer focused on storage and networking.".to_string(),
            experience: vec![ExperienceItem {
                role: "Intern".to_string(),
                company: Some("Acme".to_string()),
                description: Some("Built internal tooling for deployment pipelines.".to_string()),
                ..ExperienceItem::default()
            }],
            ..ResumeDocument::default()
        }
    }

    #[test]
    fn test_empty_preview_lays_out_empty() {
        let layout = engine().layout(&render(&ResumeDocument::default()));
        assert!(layout.is_empty());
        assert!(layout.links.is_empty());
    }

    #[test]
    fn test_layout_is_deterministic() {
        let rendered = render(&sample_document());
        assert_eq!(engine().layout(&rendered), engine().layout(&rendered));
    }

    #[test]
    fn test_spans_stay_inside_canvas() {
        let config = default_layout_config();
        let layout = engine().layout(&render(&sample_document()));
        for span in &layout.spans {
            assert!(span.x >= config.margin_px - 1e-3);
            let width =
                font_metrics::get_metrics(span.style).measure_str(&span.text) * span.size;
            assert!(
                span.x + width <= config.width_px - config.margin_px + 1e-2,
                "span '{}' overflows the right margin",
                span.text
            );
        }
        assert!(layout.height > 0.0);
    }

    #[test]
    fn test_one_link_region_per_contact_link() {
        let rendered = render(&sample_document());
        let layout = engine().layout(&rendered);
        assert_eq!(layout.links.len(), rendered.contact_links.len());
        for (region, link) in layout.links.iter().zip(&rendered.contact_links) {
            assert_eq!(region.href, link.href);
            assert!(region.rect.width > 0.0 && region.rect.height > 0.0);
        }
    }

    #[test]
    fn test_vertical_positions_are_monotonic() {
        let layout = engine().layout(&render(&sample_document()));
        let mut last_y = f32::MIN;
        for span in &layout.spans {
            assert!(span.y >= last_y - 1e-3, "spans must not move upward");
            last_y = span.y.max(last_y);
        }
    }

    #[test]
    fn test_photo_reserves_top_right_slot_and_extends_height() {
        let config = default_layout_config();
        let mut doc = ResumeDocument::default();
        doc.profile_image_data_url = Some("data:image/jpeg;base64,AAAA".to_string());
        let layout = engine().layout(&render(&doc));

        let photo = layout.photo.as_ref().unwrap();
        assert_eq!(
            photo.rect.x,
            config.width_px - config.margin_px - config.photo_size_px
        );
        assert_eq!(photo.rect.y, config.margin_px);
        assert!(layout.height >= photo.rect.y + photo.rect.height + config.margin_px);
    }

    #[test]
    fn test_long_about_wraps_to_multiple_lines() {
        let mut doc = sample_document();
        doc.about = "word ".repeat(80).trim().to_string();
        let layout = engine().layout(&render(&doc));
        let body_lines = layout
            .spans
            .iter()
            .filter(|s| s.size == default_layout_config().body_size)
            .count();
        assert!(body_lines > 1, "long about text should wrap");
    }
}
