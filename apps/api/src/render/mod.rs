//! Preview renderer — a pure function from the resume document to the
//! section-filtered preview model.
//!
//! Each section renders only when at least one of its items has a non-empty
//! trimmed required field; items missing that field are filtered out of the
//! output (but stay in the store, editable). Link fields are normalized
//! before rendering. Re-rendering identical input yields identical output:
//! there is no I/O and no clock anywhere below.

pub mod handlers;
pub mod html;
pub mod links;

use serde::Serialize;

use crate::models::resume::{
    CertificationItem, Contact, EducationItem, ExperienceItem, ProjectItem, ResumeDocument,
};
use crate::render::links::{mailto_link, normalize_url, tel_link};

pub const EXPERIENCE_TITLE: &str = "Work Experience";
pub const PROJECTS_TITLE: &str = "Projects";
pub const CERTIFICATIONS_TITLE: &str = "Certifications";
pub const SKILLS_TITLE: &str = "Skills";
pub const EDUCATION_TITLE: &str = "Education";

// ────────────────────────────────────────────────────────────────────────────
// Rendered model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    /// Text shown for the anchor.
    pub label: String,
    /// Normalized target.
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedEntry {
    /// Headline line, e.g. `Intern | Acme`.
    pub primary: String,
    /// Secondary line: dates, location, issuer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    /// Free-text paragraphs (currently zero or one).
    pub body: Vec<String>,
    pub links: Vec<Link>,
    /// Tag list, e.g. project tech or a skills group.
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub title: String,
    pub entries: Vec<RenderedEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedResume {
    pub name: String,
    pub contact_links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_data_url: Option<String>,
    pub sections: Vec<RenderedSection>,
}

impl RenderedResume {
    /// True when nothing at all would be shown — the exporter treats this as
    /// "no preview mounted" and turns the export into a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.contact_links.is_empty()
            && self.about.is_none()
            && self.profile_image_data_url.is_none()
            && self.sections.is_empty()
    }

    pub fn section(&self, title: &str) -> Option<&RenderedSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Renders the preview model from a document.
pub fn render(doc: &ResumeDocument) -> RenderedResume {
    let mut sections = Vec::new();
    if let Some(section) = experience_section(&doc.experience) {
        sections.push(section);
    }
    if let Some(section) = projects_section(&doc.projects) {
        sections.push(section);
    }
    if let Some(section) = certifications_section(&doc.certifications) {
        sections.push(section);
    }
    if let Some(section) = skills_section(doc) {
        sections.push(section);
    }
    if let Some(section) = education_section(&doc.education) {
        sections.push(section);
    }

    RenderedResume {
        name: doc.contact.full_name.trim().to_string(),
        contact_links: contact_links(&doc.contact, doc.certificates_link.as_deref()),
        about: nonempty_str(&doc.about),
        profile_image_data_url: doc
            .profile_image_data_url
            .as_deref()
            .and_then(nonempty_str),
        sections,
    }
}

fn contact_links(contact: &Contact, certificates_link: Option<&str>) -> Vec<Link> {
    let mut links = Vec::new();
    if let Some(email) = contact.email.as_deref() {
        if let Some(href) = mailto_link(email) {
            links.push(Link {
                label: email.trim().to_string(),
                href,
            });
        }
    }
    if let Some(phone) = contact.phone.as_deref() {
        if let Some(href) = tel_link(phone) {
            links.push(Link {
                label: phone.trim().to_string(),
                href,
            });
        }
    }
    push_labeled(&mut links, "LinkedIn", contact.linkedin.as_deref());
    push_labeled(&mut links, "GitHub", contact.github.as_deref());
    push_labeled(&mut links, "Website", contact.website.as_deref());
    push_labeled(&mut links, "Certificates", certificates_link);
    links
}

fn push_labeled(links: &mut Vec<Link>, label: &str, raw: Option<&str>) {
    if let Some(href) = raw.and_then(normalize_url) {
        links.push(Link {
            label: label.to_string(),
            href,
        });
    }
}

fn experience_section(items: &[ExperienceItem]) -> Option<RenderedSection> {
    let entries: Vec<RenderedEntry> = items
        .iter()
        .filter(|item| !item.role.trim().is_empty())
        .map(|item| RenderedEntry {
            primary: headline(&item.role, item.company.as_deref()),
            meta: join_nonempty(
                &[
                    item.location.as_deref(),
                    date_range(item.start.as_deref(), item.end.as_deref()).as_deref(),
                ],
                " | ",
            ),
            body: paragraph(item.description.as_deref()),
            links: Vec::new(),
            tags: Vec::new(),
        })
        .collect();
    section(EXPERIENCE_TITLE, entries)
}

fn projects_section(items: &[ProjectItem]) -> Option<RenderedSection> {
    let entries: Vec<RenderedEntry> = items
        .iter()
        .filter(|item| !item.name.trim().is_empty())
        .map(|item| {
            let mut links = Vec::new();
            push_labeled(&mut links, "Link", item.link.as_deref());
            push_labeled(&mut links, "Repo", item.repo.as_deref());
            RenderedEntry {
                primary: item.name.trim().to_string(),
                meta: None,
                body: paragraph(item.description.as_deref()),
                links,
                tags: item
                    .tech
                    .as_deref()
                    .map(crate::models::resume::split_tags)
                    .unwrap_or_default(),
            }
        })
        .collect();
    section(PROJECTS_TITLE, entries)
}

fn certifications_section(items: &[CertificationItem]) -> Option<RenderedSection> {
    let entries: Vec<RenderedEntry> = items
        .iter()
        .filter(|item| !item.title.trim().is_empty())
        .map(|item| {
            let mut links = Vec::new();
            push_labeled(&mut links, "Certificate", item.link.as_deref());
            RenderedEntry {
                primary: item.title.trim().to_string(),
                meta: join_nonempty(&[item.issuer.as_deref(), item.year.as_deref()], " | "),
                body: Vec::new(),
                links,
                tags: Vec::new(),
            }
        })
        .collect();
    section(CERTIFICATIONS_TITLE, entries)
}

fn skills_section(doc: &ResumeDocument) -> Option<RenderedSection> {
    if doc.skills.is_empty() {
        return None;
    }
    let mut entries = Vec::new();
    for (label, tags) in [
        ("Tech & Tools", &doc.skills.tech_tools),
        ("Soft Skills", &doc.skills.soft_skills),
    ] {
        let tags: Vec<String> = tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        if !tags.is_empty() {
            entries.push(RenderedEntry {
                primary: label.to_string(),
                meta: None,
                body: Vec::new(),
                links: Vec::new(),
                tags,
            });
        }
    }
    section(SKILLS_TITLE, entries)
}

fn education_section(items: &[EducationItem]) -> Option<RenderedSection> {
    let entries: Vec<RenderedEntry> = items
        .iter()
        .filter(|item| !item.degree.trim().is_empty())
        .map(|item| RenderedEntry {
            primary: headline(&item.degree, item.school.as_deref()),
            meta: join_nonempty(
                &[
                    date_range(item.start.as_deref(), item.end.as_deref()).as_deref(),
                    item.score.as_deref(),
                ],
                " | ",
            ),
            body: Vec::new(),
            links: Vec::new(),
            tags: Vec::new(),
        })
        .collect();
    section(EDUCATION_TITLE, entries)
}

// ────────────────────────────────────────────────────────────────────────────
// Small helpers
// ────────────────────────────────────────────────────────────────────────────

fn section(title: &str, entries: Vec<RenderedEntry>) -> Option<RenderedSection> {
    if entries.is_empty() {
        None
    } else {
        Some(RenderedSection {
            title: title.to_string(),
            entries,
        })
    }
}

/// `Intern` + `Acme` → `Intern | Acme`; a missing second part leaves the
/// first alone.
fn headline(first: &str, second: Option<&str>) -> String {
    match second.map(str::trim).filter(|s| !s.is_empty()) {
        Some(second) => format!("{} | {}", first.trim(), second),
        None => first.trim().to_string(),
    }
}

fn date_range(start: Option<&str>, end: Option<&str>) -> Option<String> {
    let start = start.map(str::trim).filter(|s| !s.is_empty());
    let end = end.map(str::trim).filter(|s| !s.is_empty());
    match (start, end) {
        (Some(s), Some(e)) => Some(format!("{s} - {e}")),
        (Some(s), None) => Some(format!("{s} - Present")),
        (None, Some(e)) => Some(e.to_string()),
        (None, None) => None,
    }
}

fn join_nonempty(parts: &[Option<&str>], sep: &str) -> Option<String> {
    let joined: Vec<&str> = parts
        .iter()
        .filter_map(|p| p.map(str::trim).filter(|s| !s.is_empty()))
        .collect();
    if joined.is_empty() {
        None
    } else {
        Some(joined.join(sep))
    }
}

fn paragraph(text: Option<&str>) -> Vec<String> {
    match text.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => vec![t.to_string()],
        None => Vec::new(),
    }
}

fn nonempty_str(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
