//! HTML view of the rendered preview.
//!
//! Deliberately plain string building — the preview's visual styling is out
//! of scope, so the markup carries structure only.

use crate::render::{RenderedResume, RenderedSection};

/// Builds a standalone HTML document for the rendered preview.
pub fn render_html(resume: &RenderedResume) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>");
    html.push_str(&escape_html(if resume.name.is_empty() {
        "Resume"
    } else {
        &resume.name
    }));
    html.push_str("</title></head><body>");

    if let Some(src) = &resume.profile_image_data_url {
        html.push_str(&format!(
            "<img class=\"profile\" src=\"{}\" alt=\"profile photo\">",
            escape_html(src)
        ));
    }
    if !resume.name.is_empty() {
        html.push_str(&format!("<h1>{}</h1>", escape_html(&resume.name)));
    }
    if !resume.contact_links.is_empty() {
        html.push_str("<p class=\"contact\">");
        for (i, link) in resume.contact_links.iter().enumerate() {
            if i > 0 {
                html.push_str(" | ");
            }
            html.push_str(&anchor(&link.href, &link.label));
        }
        html.push_str("</p>");
    }
    if let Some(about) = &resume.about {
        html.push_str(&format!("<p class=\"about\">{}</p>", escape_html(about)));
    }
    for section in &resume.sections {
        push_section(&mut html, section);
    }

    html.push_str("</body></html>");
    html
}

fn push_section(html: &mut String, section: &RenderedSection) {
    html.push_str("<section>");
    html.push_str(&format!("<h2>{}</h2>", escape_html(&section.title)));
    for entry in &section.entries {
        html.push_str("<article>");
        html.push_str(&format!("<h3>{}</h3>", escape_html(&entry.primary)));
        if let Some(meta) = &entry.meta {
            html.push_str(&format!("<p class=\"meta\">{}</p>", escape_html(meta)));
        }
        for paragraph in &entry.body {
            html.push_str(&format!("<p>{}</p>", escape_html(paragraph)));
        }
        if !entry.links.is_empty() {
            html.push_str("<p class=\"links\">");
            for (i, link) in entry.links.iter().enumerate() {
                if i > 0 {
                    html.push_str(" | ");
                }
                html.push_str(&anchor(&link.href, &link.label));
            }
            html.push_str("</p>");
        }
        if !entry.tags.is_empty() {
            html.push_str("<ul class=\"tags\">");
            for tag in &entry.tags {
                html.push_str(&format!("<li>{}</li>", escape_html(tag)));
            }
            html.push_str("</ul>");
        }
        html.push_str("</article>");
    }
    html.push_str("</section>");
}

fn anchor(href: &str, label: &str) -> String {
    format!(
        "<a href=\"{}\">{}</a>",
        escape_html(href),
        escape_html(label)
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Contact, ExperienceItem, ResumeDocument};
    use crate::render::render;

    #[test]
    fn test_html_contains_name_and_section() {
        let doc = ResumeDocument {
            contact: Contact {
                full_name: "Asha Rao".to_string(),
                ..Contact::default()
            },
            experience: vec![ExperienceItem {
                role: "Intern".to_string(),
                company: Some("Acme".to_string()),
                ..ExperienceItem::default()
            }],
            ..ResumeDocument::default()
        };
        let html = render_html(&render(&doc));
        assert!(html.contains("<h1>Asha Rao</h1>"));
        assert!(html.contains("<h2>Work Experience</h2>"));
        assert!(html.contains("<h3>Intern | Acme</h3>"));
    }

    #[test]
    fn test_html_escapes_user_content() {
        let doc = ResumeDocument {
            about: "<script>alert(1)</script> & more".to_string(),
            contact: Contact {
                full_name: "A".to_string(),
                ..Contact::default()
            },
            ..ResumeDocument::default()
        };
        let html = render_html(&render(&doc));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp; more"));
    }
}
