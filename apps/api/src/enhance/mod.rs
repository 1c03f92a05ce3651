//! Text enhancement — rewrites a free-text field through the LLM client and
//! writes the result back into the store.
//!
//! The enhancer itself is a trait object carried in `AppState`, so tests run
//! against a stub and the provider can be swapped without touching handlers.
//! Every operation ends in an explicit [`EnhanceOutcome`]; failures degrade
//! to "document unchanged", never to an error the form has to surface.

pub mod handlers;
pub mod prompts;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::llm::LlmError;
use crate::models::resume::ResumeDocument;
use crate::store::DocumentStore;

/// The enhancement seam. Implemented by the Gemini client and by test stubs.
#[async_trait]
pub trait TextEnhancer: Send + Sync {
    /// Rewrites `text` for the named field, returning the replacement.
    async fn enhance(&self, field: &str, text: &str) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Field addressing
// ────────────────────────────────────────────────────────────────────────────

/// Address of an enhanceable free-text field: the `about` summary or one
/// list item's description, written as `experience.<i>.description` /
/// `projects.<i>.description`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnhanceField {
    About,
    ExperienceDescription(usize),
    ProjectDescription(usize),
}

impl EnhanceField {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw == "about" {
            return Some(EnhanceField::About);
        }
        let mut parts = raw.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(section), Some(index), Some("description"), None) => {
                let index: usize = index.parse().ok()?;
                match section {
                    "experience" => Some(EnhanceField::ExperienceDescription(index)),
                    "projects" => Some(EnhanceField::ProjectDescription(index)),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Human-readable field name embedded in the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            EnhanceField::About => "professional summary",
            EnhanceField::ExperienceDescription(_) => "work experience description",
            EnhanceField::ProjectDescription(_) => "project description",
        }
    }

    /// Reads the current field text. `None` means the index is out of range.
    pub fn read_from(&self, doc: &ResumeDocument) -> Option<String> {
        match self {
            EnhanceField::About => Some(doc.about.clone()),
            EnhanceField::ExperienceDescription(i) => doc
                .experience
                .get(*i)
                .map(|item| item.description.clone().unwrap_or_default()),
            EnhanceField::ProjectDescription(i) => doc
                .projects
                .get(*i)
                .map(|item| item.description.clone().unwrap_or_default()),
        }
    }

    /// Overwrites the field, touching nothing else in the item. Returns
    /// `false` (and mutates nothing) when the index is out of range.
    pub fn write_to(&self, doc: &mut ResumeDocument, text: String) -> bool {
        match self {
            EnhanceField::About => {
                doc.about = text;
                true
            }
            EnhanceField::ExperienceDescription(i) => match doc.experience.get_mut(*i) {
                Some(item) => {
                    item.description = Some(text);
                    true
                }
                None => false,
            },
            EnhanceField::ProjectDescription(i) => match doc.projects.get_mut(*i) {
                Some(item) => {
                    item.description = Some(text);
                    true
                }
                None => false,
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Store-coupled enhancement
// ────────────────────────────────────────────────────────────────────────────

/// What happened to an enhancement request. Callers see the choice that was
/// made instead of a swallowed error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EnhanceOutcome {
    Applied { enhanced: String },
    SkippedEmpty,
    Failed,
}

/// Reads the field, calls the enhancer, and writes the result back.
///
/// Empty (trimmed) source text short-circuits before any provider request.
/// Any failure logs and leaves the document exactly as it was. Two racing
/// calls on the same field both proceed; the later write wins.
pub async fn enhance_field(
    store: &DocumentStore,
    enhancer: &dyn TextEnhancer,
    field: &EnhanceField,
) -> EnhanceOutcome {
    let Some(current) = field.read_from(&store.get()) else {
        warn!(
            "enhancement target {} is out of range, document unchanged",
            field.label()
        );
        return EnhanceOutcome::Failed;
    };
    let current = current.trim().to_string();
    if current.is_empty() {
        return EnhanceOutcome::SkippedEmpty;
    }

    match enhancer.enhance(field.label(), &current).await {
        Ok(enhanced) => {
            let applied = store.try_update(|doc| field.write_to(doc, enhanced.clone()));
            if applied.is_some() {
                EnhanceOutcome::Applied { enhanced }
            } else {
                warn!(
                    "enhancement target {} disappeared before write-back, document unchanged",
                    field.label()
                );
                EnhanceOutcome::Failed
            }
        }
        Err(e) => {
            // Log the field label and error class only — never the text.
            warn!("enhancement of {} failed, document unchanged: {e}", field.label());
            EnhanceOutcome::Failed
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Test support
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;

    /// Test double: records every call and answers with a canned reply.
    pub struct StubEnhancer {
        reply: Result<String, String>,
        pub calls: Mutex<Vec<(String, String)>>,
    }

    impl StubEnhancer {
        pub fn replying(text: &str) -> Self {
            StubEnhancer {
                reply: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            StubEnhancer {
                reply: Err("provider unavailable".to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().len()
        }
    }

    #[async_trait]
    impl TextEnhancer for StubEnhancer {
        async fn enhance(&self, field: &str, text: &str) -> Result<String, LlmError> {
            self.calls.lock().push((field.to_string(), text.to_string()));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(LlmError::Api {
                    status: 500,
                    message: message.clone(),
                }),
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
