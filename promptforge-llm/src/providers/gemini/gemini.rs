use crate::provider::{LlmProvider, LlmError, ProviderInfo, EnvVar};
use super::api::*;
use async_trait::async_trait;
use reqwest::Client;
use openai_dive::v1::resources::{
    chat::{ChatCompletionParameters, ChatCompletionResponse, ChatMessage, ChatMessageContent, ChatCompletionChoice},
    model::{ListModelResponse, Model},
    shared::{FinishReason, Usage},
};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

pub struct GeminiProvider {
    api_key: String,
    client: Client,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: Client::new(),
        }
    }

    /// Create Gemini provider from environment variables
    /// Returns None if required environment variables are not set
    pub fn from_env() -> Option<Self> {
        std::env::var("GEMINI_API_KEY").ok().map(|api_key| {
            Self::new(api_key)
        })
    }

    pub(crate) fn convert_to_gemini_format(&self, request: &ChatCompletionParameters) -> GenerateContentRequest {
        let mut system_messages = Vec::new();
        let mut contents = Vec::new();

        for msg in &request.messages {
            match msg {
                ChatMessage::System { content, .. } => {
                    system_messages.push(self.extract_content_text(content));
                }
                ChatMessage::User { content, .. } => {
                    contents.push(GeminiContent {
                        role: Some("user".to_string()),
                        parts: vec![GeminiPart { text: self.extract_content_text(content) }],
                    });
                }
                ChatMessage::Developer { content, .. } => {
                    contents.push(GeminiContent {
                        role: Some("user".to_string()),
                        parts: vec![GeminiPart { text: self.extract_content_text(content) }],
                    });
                }
                ChatMessage::Assistant { content, .. } => {
                    let text = content.as_ref().map(|c| self.extract_content_text(c)).unwrap_or_default();
                    if !text.is_empty() {
                        contents.push(GeminiContent {
                            role: Some("model".to_string()),
                            parts: vec![GeminiPart { text }],
                        });
                    }
                }
                // No tool surface on this provider
                ChatMessage::Tool { .. } => {}
            }
        }

        let system_instruction = if system_messages.is_empty() {
            None
        } else {
            Some(GeminiContent {
                role: None,
                parts: vec![GeminiPart { text: system_messages.join("\n\n") }],
            })
        };

        let generation_config = match (request.temperature, request.max_tokens) {
            (None, None) => None,
            (temperature, max_tokens) => Some(GenerationConfig {
                temperature: temperature.map(|t| t as f32),
                max_output_tokens: max_tokens.map(|m| m as u32),
            }),
        };

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    pub(crate) fn convert_from_gemini_format(&self, model: &str, response: GenerateContentResponse) -> Result<ChatCompletionResponse, LlmError> {
        let candidate = response.candidates.into_iter().next()
            .ok_or("Gemini returned no candidates")?;

        let combined_text = candidate.content
            .map(|content| {
                content.parts.into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let content = if combined_text.is_empty() {
            None
        } else {
            Some(ChatMessageContent::Text(combined_text))
        };

        let usage = response.usage_metadata.map(|usage| Usage {
            prompt_tokens: Some(usage.prompt_token_count as u32),
            completion_tokens: Some(usage.candidates_token_count as u32),
            total_tokens: usage.total_token_count as u32,
            prompt_tokens_details: None,
            completion_tokens_details: None,
        });

        Ok(ChatCompletionResponse {
            id: None,
            object: "chat.completion".to_string(),
            created: 0,
            model: response.model_version.unwrap_or_else(|| model.to_string()),
            choices: vec![ChatCompletionChoice {
                index: 0,
                message: ChatMessage::Assistant {
                    content,
                    reasoning: None,
                    reasoning_content: None,
                    refusal: None,
                    name: None,
                    audio: None,
                    tool_calls: None,
                },
                finish_reason: Some(FinishReason::StopSequenceReached),
                logprobs: None,
            }],
            usage,
            service_tier: None,
            system_fingerprint: None,
        })
    }

    /// Surface Google's error.message when the body carries one, the raw body otherwise
    pub(crate) fn extract_error_message(body: &str) -> String {
        match serde_json::from_str::<GeminiErrorEnvelope>(body) {
            Ok(envelope) => envelope.error.message,
            Err(_) => body.to_string(),
        }
    }

    fn extract_content_text(&self, content: &ChatMessageContent) -> String {
        match content {
            ChatMessageContent::Text(text) => text.clone(),
            ChatMessageContent::ContentPart(parts) => {
                parts.iter().filter_map(|part| {
                    match part {
                        openai_dive::v1::resources::chat::ChatMessageContentPart::Text(text_part) => {
                            Some(text_part.text.clone())
                        }
                        _ => None, // Skip images, audio, etc.
                    }
                }).collect::<Vec<_>>().join(" ")
            }
            ChatMessageContent::None => String::new(),
        }
    }

    pub(crate) fn convert_model_list(list: GeminiModelList) -> ListModelResponse {
        let data = list.models.into_iter()
            .filter(|m| m.supported_generation_methods.is_empty()
                || m.supported_generation_methods.iter().any(|method| method == "generateContent"))
            .map(|m| Model {
                // "models/gemini-2.5-flash" -> "gemini-2.5-flash"
                id: m.name.strip_prefix("models/").unwrap_or(&m.name).to_string(),
                object: "model".to_string(),
                created: None,
                owned_by: "google".to_string(),
            })
            .collect();

        ListModelResponse {
            object: "list".to_string(),
            data,
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn models(&self) -> Result<ListModelResponse, LlmError> {
        let response = self.client
            .get(format!("{}/models", GEMINI_API_BASE))
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(format!("Gemini API error: {}", Self::extract_error_message(&error_text)).into());
        }

        let list: GeminiModelList = response.json().await?;
        Ok(Self::convert_model_list(list))
    }

    async fn default_model(&self) -> Result<String, LlmError> {
        // The tool pins one model; no network round-trip needed
        Ok(DEFAULT_GEMINI_MODEL.to_string())
    }

    async fn chat(&self, request: ChatCompletionParameters) -> Result<ChatCompletionResponse, LlmError> {
        let gemini_request = self.convert_to_gemini_format(&request);

        let response = self.client
            .post(format!("{}/models/{}:generateContent", GEMINI_API_BASE, request.model))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(Self::extract_error_message(&error_text).into());
        }

        let gemini_response: GenerateContentResponse = response.json().await?;
        self.convert_from_gemini_format(&request.model, gemini_response)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }

    fn info() -> ProviderInfo {
        ProviderInfo {
            name: "gemini",
            display_name: "Google Gemini (2.5 Flash, 2.5 Pro)",
            env_vars: vec![
                EnvVar::required("GEMINI_API_KEY", "Google AI Studio API key"),
            ],
        }
    }
}
