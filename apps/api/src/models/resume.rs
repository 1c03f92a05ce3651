//! The resume document — the single aggregate the whole service edits,
//! previews, and exports. Persisted as one camelCase JSON blob.
//!
//! Required fields (`fullName`, `role`, `name`, `title`, `degree`) may hold
//! empty strings; nothing here validates. The store accepts any conforming
//! shape and the renderer decides what is visible.

use serde::{Deserialize, Deserializer, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Document aggregate
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub contact: Contact,
    pub about: String,
    pub experience: Vec<ExperienceItem>,
    pub projects: Vec<ProjectItem>,
    pub certifications: Vec<CertificationItem>,
    pub skills: Skills,
    pub education: Vec<EducationItem>,
    /// Optional embedded photo as a `data:image/...;base64,` URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_data_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificates_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceItem {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Comma-separated technology list, kept verbatim as entered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationItem {
    pub degree: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Skills — canonical mapping with a legacy string shape accepted on read
// ────────────────────────────────────────────────────────────────────────────

/// Canonical skills shape: two ordered tag lists.
///
/// Old persisted documents carry skills as a single comma-separated string.
/// Deserialization accepts both shapes via [`SkillsRepr`] and always
/// normalizes to this struct; serialization emits only the mapping, so the
/// legacy shape disappears from storage on the next write. The legacy string
/// carries no soft-skill information, so it populates `tech_tools` only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SkillsRepr")]
pub struct Skills {
    pub tech_tools: Vec<String>,
    pub soft_skills: Vec<String>,
}

impl Skills {
    pub fn is_empty(&self) -> bool {
        self.tech_tools.iter().all(|t| t.trim().is_empty())
            && self.soft_skills.iter().all(|t| t.trim().is_empty())
    }
}

/// The two shapes `skills` may take on the wire or in storage.
#[derive(Deserialize)]
#[serde(untagged)]
enum SkillsRepr {
    Grouped {
        #[serde(default, rename = "techTools")]
        tech_tools: Vec<String>,
        #[serde(default, rename = "softSkills")]
        soft_skills: Vec<String>,
    },
    Legacy(String),
}

impl From<SkillsRepr> for Skills {
    fn from(repr: SkillsRepr) -> Self {
        match repr {
            SkillsRepr::Grouped {
                tech_tools,
                soft_skills,
            } => Skills {
                tech_tools,
                soft_skills,
            },
            SkillsRepr::Legacy(raw) => Skills {
                tech_tools: split_tags(&raw),
                soft_skills: Vec::new(),
            },
        }
    }
}

/// Splits a comma-separated tag string, dropping blanks and surrounding space.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Patch — shallow merge at the top-level key
// ────────────────────────────────────────────────────────────────────────────

/// A partial document update. Only the keys present in the request replace
/// the corresponding top-level value; everything else is left untouched.
///
/// The two optional scalar fields use a double `Option` so an explicit JSON
/// `null` clears the stored value while an absent key leaves it alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentPatch {
    pub contact: Option<Contact>,
    pub about: Option<String>,
    pub experience: Option<Vec<ExperienceItem>>,
    pub projects: Option<Vec<ProjectItem>>,
    pub certifications: Option<Vec<CertificationItem>>,
    pub skills: Option<Skills>,
    pub education: Option<Vec<EducationItem>>,
    #[serde(deserialize_with = "double_option")]
    pub profile_image_data_url: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub certificates_link: Option<Option<String>>,
}

impl DocumentPatch {
    /// Applies this patch to `doc`, replacing exactly the keys that are set.
    pub fn apply_to(self, doc: &mut ResumeDocument) {
        if let Some(contact) = self.contact {
            doc.contact = contact;
        }
        if let Some(about) = self.about {
            doc.about = about;
        }
        if let Some(experience) = self.experience {
            doc.experience = experience;
        }
        if let Some(projects) = self.projects {
            doc.projects = projects;
        }
        if let Some(certifications) = self.certifications {
            doc.certifications = certifications;
        }
        if let Some(skills) = self.skills {
            doc.skills = skills;
        }
        if let Some(education) = self.education {
            doc.education = education;
        }
        if let Some(profile_image) = self.profile_image_data_url {
            doc.profile_image_data_url = profile_image;
        }
        if let Some(certificates_link) = self.certificates_link {
            doc.certificates_link = certificates_link;
        }
    }
}

/// Distinguishes an absent key (outer `None`) from an explicit `null`
/// (`Some(None)`), which plain `Option<Option<T>>` deserialization cannot.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_shape() {
        let doc = ResumeDocument::default();
        assert_eq!(doc.contact.full_name, "");
        assert!(doc.contact.email.is_none());
        assert_eq!(doc.about, "");
        assert!(doc.experience.is_empty());
        assert!(doc.projects.is_empty());
        assert!(doc.certifications.is_empty());
        assert!(doc.skills.tech_tools.is_empty());
        assert!(doc.skills.soft_skills.is_empty());
        assert!(doc.education.is_empty());
        assert!(doc.profile_image_data_url.is_none());
        assert!(doc.certificates_link.is_none());
    }

    #[test]
    fn test_document_round_trip_with_grouped_skills() {
        let doc = ResumeDocument {
            contact: Contact {
                full_name: "Asha Rao".to_string(),
                email: Some("asha@example.com".to_string()),
                ..Contact::default()
            },
            about: "Systems engineer.".to_string(),
            experience: vec![ExperienceItem {
                role: "Intern".to_string(),
                company: Some("Acme".to_string()),
                ..ExperienceItem::default()
            }],
            skills: Skills {
                tech_tools: vec!["Rust".to_string(), "Axum".to_string()],
                soft_skills: vec!["Mentoring".to_string()],
            },
            ..ResumeDocument::default()
        };

        let json = serde_json::to_string(&doc).unwrap();
        let recovered: ResumeDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, doc);
    }

    #[test]
    fn test_document_round_trip_with_legacy_skills_string() {
        let json = r#"{
            "contact": {"fullName": "Asha Rao"},
            "skills": "Rust, PostgreSQL, , Docker"
        }"#;
        let doc: ResumeDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.skills.tech_tools, vec!["Rust", "PostgreSQL", "Docker"]);
        assert!(doc.skills.soft_skills.is_empty());

        // Re-serializing emits only the canonical mapping shape.
        let reserialized = serde_json::to_string(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&reserialized).unwrap();
        assert!(value["skills"].is_object());
        let recovered: ResumeDocument = serde_json::from_str(&reserialized).unwrap();
        assert_eq!(recovered, doc);
    }

    #[test]
    fn test_skills_mapping_with_missing_group_defaults_empty() {
        let doc: ResumeDocument =
            serde_json::from_str(r#"{"skills": {"techTools": ["Rust"]}}"#).unwrap();
        assert_eq!(doc.skills.tech_tools, vec!["Rust"]);
        assert!(doc.skills.soft_skills.is_empty());
    }

    #[test]
    fn test_unknown_top_level_keys_are_ignored() {
        // The store accepts any conforming shape; stray keys must not fail.
        let doc: ResumeDocument =
            serde_json::from_str(r#"{"about": "hi", "somethingElse": 42}"#).unwrap();
        assert_eq!(doc.about, "hi");
    }

    #[test]
    fn test_patch_replaces_only_present_keys() {
        let mut doc = ResumeDocument {
            about: "old about".to_string(),
            experience: vec![ExperienceItem {
                role: "Engineer".to_string(),
                ..ExperienceItem::default()
            }],
            ..ResumeDocument::default()
        };

        let patch: DocumentPatch = serde_json::from_str(r#"{"about": "new about"}"#).unwrap();
        patch.apply_to(&mut doc);

        assert_eq!(doc.about, "new about");
        assert_eq!(doc.experience.len(), 1, "absent keys must stay untouched");
    }

    #[test]
    fn test_patch_null_clears_optional_scalar() {
        let mut doc = ResumeDocument {
            profile_image_data_url: Some("data:image/png;base64,AAAA".to_string()),
            certificates_link: Some("example.com/certs".to_string()),
            ..ResumeDocument::default()
        };

        let patch: DocumentPatch =
            serde_json::from_str(r#"{"profileImageDataUrl": null}"#).unwrap();
        patch.apply_to(&mut doc);

        assert!(doc.profile_image_data_url.is_none(), "explicit null clears");
        assert!(
            doc.certificates_link.is_some(),
            "absent key leaves the value alone"
        );
    }

    #[test]
    fn test_split_tags_trims_and_drops_blanks() {
        assert_eq!(split_tags("a, b ,, c "), vec!["a", "b", "c"]);
        assert!(split_tags("  ,  ").is_empty());
        assert!(split_tags("").is_empty());
    }
}
