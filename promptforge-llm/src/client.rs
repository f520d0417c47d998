// llm/client.rs
use super::provider::{LlmProvider, LlmError, ProviderInfo};
use super::providers::{
    gemini::GeminiProvider,
    openai::OpenAIProvider,
    openai_compatible::OpenAICompatibleProvider,
    ollama::OllamaProvider,
};
use openai_dive::v1::resources::{
    chat::{ChatCompletionParameters, ChatCompletionResponse, ChatMessage, ChatMessageContent},
    model::ListModelResponse,
};
use regex::Regex;

#[derive(Debug)]
pub struct LlmClient {
    provider: Box<dyn LlmProvider>,
}

/// Provider Factory related method
impl LlmClient {
    /// Create a Gemini provider from environment variables
    /// Returns None if required environment variables are not set
    pub fn from_env_gemini() -> Option<Self> {
        GeminiProvider::from_env().map(|provider| Self {
            provider: Box::new(provider),
        })
    }

    /// Create an OpenAI provider from environment variables
    /// Returns None if required environment variables are not set
    pub fn from_env_openai() -> Option<Self> {
        OpenAIProvider::from_env().map(|provider| Self {
            provider: Box::new(provider),
        })
    }

    /// Create an OpenAI Compatible provider from environment variables
    /// Returns None if required environment variables are not set
    pub fn from_env_openai_compatible() -> Option<Self> {
        OpenAICompatibleProvider::from_env().map(|provider| Self {
            provider: Box::new(provider),
        })
    }

    /// Create an Ollama provider from environment variables
    /// Returns None if OLLAMA_BASE_URL is not set
    pub fn from_env_ollama() -> Option<Self> {
        OllamaProvider::from_env().map(|provider| Self {
            provider: Box::new(provider),
        })
    }

    pub fn gemini(api_key: String) -> Self {
        Self {
            provider: Box::new(GeminiProvider::new(api_key)),
        }
    }

    pub fn openai(api_key: String) -> Self {
        Self {
            provider: Box::new(OpenAIProvider::new(api_key)),
        }
    }

    pub fn compatible(api_key: String, base_url: String) -> Self {
        Self {
            provider: Box::new(OpenAICompatibleProvider::new(api_key, base_url)),
        }
    }

    pub fn ollama(base_url: String) -> Self {
        Self {
            provider: Box::new(OllamaProvider::new(Some(base_url))),
        }
    }

    /// Get the first available LLM client from environment variables
    /// Returns clients in order of preference
    pub fn first_from_env() -> Option<Self> {
        if let Ok(provider) = std::env::var("PROMPTFORGE_PROVIDER") {
            match provider.as_str() {
                "gemini" => return Self::from_env_gemini(),
                "openai" => return Self::from_env_openai(),
                "openai_compatible" => return Self::from_env_openai_compatible(),
                "ollama" => return Self::from_env_ollama(),
                _ => {} // Fall through to default behavior
            }
        }

        if let Some(client) = Self::from_env_gemini() {
            return Some(client);
        }
        if let Some(client) = Self::from_env_openai() {
            return Some(client);
        }
        if let Some(client) = Self::from_env_openai_compatible() {
            return Some(client);
        }
        if let Some(client) = Self::from_env_ollama() {
            return Some(client);
        }
        None
    }

    /// Get information about all available providers
    pub fn list_providers() -> Vec<ProviderInfo> {
        vec![
            GeminiProvider::info(),
            OpenAIProvider::info(),
            OpenAICompatibleProvider::info(),
            OllamaProvider::info(),
        ]
    }

    /// Create a provider dynamically based on name and environment values
    pub fn create_provider(provider_name: &str, env_values: &std::collections::HashMap<String, String>) -> Result<Self, LlmError> {
        match provider_name {
            "gemini" => {
                let api_key = env_values.get("GEMINI_API_KEY")
                    .ok_or("GEMINI_API_KEY not found")?;
                Ok(Self::gemini(api_key.clone()))
            },
            "openai" => {
                let api_key = env_values.get("OPENAI_API_KEY")
                    .ok_or("OPENAI_API_KEY not found")?;
                Ok(Self::openai(api_key.clone()))
            },
            "openai_compatible" => {
                let api_key = env_values.get("OPENAI_COMPATIBLE_API_KEY")
                    .ok_or("OPENAI_COMPATIBLE_API_KEY not found")?;
                let base_url = env_values.get("OPENAI_COMPATIBLE_BASE_URL")
                    .ok_or("OPENAI_COMPATIBLE_BASE_URL not found")?;
                Ok(Self::compatible(api_key.clone(), base_url.clone()))
            },
            "ollama" => {
                let base_url = env_values.get("OLLAMA_BASE_URL")
                    .cloned()
                    .unwrap_or_else(|| "http://localhost:11434/v1".to_string());
                Ok(Self::ollama(base_url))
            },
            _ => Err(format!("Unknown provider: {}", provider_name).into())
        }
    }
}

/// Provider Delegate
impl LlmClient {
    pub async fn models(&self) -> Result<ListModelResponse, LlmError> {
        self.provider.models().await
    }

    pub async fn default_model(&self) -> Result<String, LlmError> {
        if let Ok(model) = std::env::var("PROMPTFORGE_MODEL") {
            Ok(model)
        } else {
            self.provider.default_model().await
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Get a reference to the underlying provider (for testing)
    pub fn provider(&self) -> &dyn LlmProvider {
        &*self.provider
    }
}

/// Higher level chat client
impl LlmClient {
    pub async fn chat(&self, request: ChatCompletionParameters) -> Result<ChatCompletionResponse, LlmError> {
        let response = self.provider
            .chat(request)
            .await?
            .extract_think_content();

        Ok(response)
    }
}

pub trait ExtractThinkContent {
    /// Extract <think> content from assistant messages and move it to reasoning_content
    fn extract_think_content(self) -> ChatCompletionResponse;
}

impl ExtractThinkContent for ChatCompletionResponse {
    fn extract_think_content(mut self) -> ChatCompletionResponse {
        for choice in &mut self.choices {
            if let ChatMessage::Assistant { reasoning_content, content, .. } = &mut choice.message {
                if let Some(ChatMessageContent::Text(content_text)) = content {
                    let think_regex = Regex::new(r"(?s)<think>(.*?)</think>").unwrap();
                    if let Some(reasoning) = think_regex.captures(content_text).map(|c| c.get(1).unwrap().as_str().trim()) {
                        *reasoning_content = Some(reasoning.to_string());
                        let cleaned = think_regex.replace_all(content_text, "").trim().to_string();
                        *content = if cleaned.is_empty() { None } else { Some(ChatMessageContent::Text(cleaned)) };
                    }
                }
            }
        }
        self
    }
}
