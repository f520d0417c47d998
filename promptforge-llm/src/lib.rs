pub mod client;
pub mod providers;
pub mod provider;

// Re-export our client
pub use client::LlmClient;

// Re-export commonly used openai_dive types for consumers
pub use openai_dive::v1::resources::chat::{
    ChatCompletionParameters,
    ChatCompletionParametersBuilder,
    ChatCompletionResponse,
    ChatMessage,
    ChatMessageContent,
    ChatCompletionChoice,
};
