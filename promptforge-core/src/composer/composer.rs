use std::sync::Arc;

use promptforge_llm::{
    ChatCompletionParametersBuilder, ChatMessage, ChatMessageContent, LlmClient,
};
use regex::Regex;
use tracing::debug;

use super::error::ComposerError;
use super::prompt::framework_prompt;

/// Leading marker the model is instructed to put before its one-line justification
pub(crate) const JUSTIFICATION_PATTERN: &str = r"^\*\*Framework-Wahl:\*\*\s*(.*)";

/// One parsed model response. `raw` stays verbatim for the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPrompt {
    pub raw: String,
    pub justification: String,
    pub body: String,
}

pub struct Composer {
    llm: Arc<LlmClient>,
    model: String,
}

impl Composer {
    pub fn new(llm: Arc<LlmClient>, model: String) -> Self {
        Self { llm, model }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &'static str {
        self.llm.provider_name()
    }

    /// Turn a task description into a framework-structured prompt.
    /// Exactly one request, no retry. Blank input never reaches the provider.
    pub async fn compose(&self, task: &str) -> Result<GeneratedPrompt, ComposerError> {
        if task.trim().is_empty() {
            return Err(ComposerError::EmptyTask);
        }

        let request = ChatCompletionParametersBuilder::default()
            .model(self.model.clone())
            .messages(vec![ChatMessage::User {
                content: ChatMessageContent::Text(framework_prompt(task)),
                name: None,
            }])
            .build()
            .map_err(|e| ComposerError::Request(e.to_string()))?;

        debug!(target: "composer", "requesting prompt for task ({} chars) with {}", task.len(), self.model);

        let response = self.llm.chat(request).await.map_err(|e| {
            let message = e.to_string();
            if message.trim().is_empty() {
                ComposerError::Unknown
            } else {
                ComposerError::Request(message)
            }
        })?;

        let raw = response.choices.into_iter()
            .find_map(|choice| match choice.message {
                ChatMessage::Assistant { content: Some(ChatMessageContent::Text(text)), .. } => Some(text),
                _ => None,
            })
            .ok_or(ComposerError::EmptyResponse)?;

        let (justification, body) = parse_response(&raw);
        debug!(target: "composer", "parsed response: justification {} chars, body {} chars", justification.len(), body.len());

        Ok(GeneratedPrompt { raw, justification, body })
    }
}

/// Split a raw response into (justification, body) on the leading marker.
/// Marker absent at the start leaves the justification empty and the whole
/// trimmed response as body.
pub fn parse_response(raw: &str) -> (String, String) {
    let marker = Regex::new(JUSTIFICATION_PATTERN).unwrap();

    if let Some(captures) = marker.captures(raw) {
        let justification = captures.get(1).map_or("", |m| m.as_str().trim());
        if !justification.is_empty() {
            let matched_end = captures.get(0).map_or(0, |m| m.end());
            let body = raw[matched_end..].trim().to_string();
            return (justification.to_string(), body);
        }
    }

    (String::new(), raw.trim().to_string())
}
