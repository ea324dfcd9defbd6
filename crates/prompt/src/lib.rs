//! # Prompt
//!
//! Chat message types and fixed-slot prompt templates for AI models.
//!
//! ## Messages
//!
//! [`ChatMessage`] and [`MessageRole`] are one-to-one with the OpenAI Chat
//! Completions `messages` array; `llm-client` converts them to API types.
//!
//! ## Templates
//!
//! [`PromptTemplate`] holds a fixed template with named `{slot}` values.
//! Rendering is a single pass over the template: slot values are inserted
//! exactly as given and are never re-scanned, so a value containing `{...}`
//! cannot trigger further substitution.
//!
//! ## External interactions
//!
//! - **AI models**: rendered output is sent to LLM APIs via `llm-client`.

use thiserror::Error;

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of the OpenAI `messages` array.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("missing value for template slot: {0}")]
    MissingSlot(String),

    #[error("unterminated slot in template")]
    UnterminatedSlot,
}

/// A fixed prompt template with named `{slot}` values.
///
/// `{` always opens a slot and must be closed by `}`; a lone `}` is literal text.
/// Rendering inserts each value exactly once, verbatim.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The raw template text.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Renders the template, replacing each `{name}` with the matching value from
    /// `values`. Values the template does not reference are ignored; a referenced
    /// name with no value is an error. Single pass over the template only: inserted
    /// values are never re-substituted.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or(TemplateError::UnterminatedSlot)?;
            let name = &after[..end];
            let value = values
                .iter()
                .find(|(slot, _)| *slot == name)
                .map(|(_, value)| *value)
                .ok_or_else(|| TemplateError::MissingSlot(name.to_string()))?;
            out.push_str(value);
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}
