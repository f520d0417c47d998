use super::api::*;
use super::gemini::GeminiProvider;
use openai_dive::v1::resources::chat::{
    ChatCompletionParametersBuilder, ChatMessage, ChatMessageContent,
};

fn provider() -> GeminiProvider {
    GeminiProvider::new("test-key".to_string())
}

fn request_with_messages(messages: Vec<ChatMessage>) -> openai_dive::v1::resources::chat::ChatCompletionParameters {
    ChatCompletionParametersBuilder::default()
        .model("gemini-2.5-flash".to_string())
        .messages(messages)
        .build()
        .expect("Failed to build ChatCompletionParameters")
}

#[test]
fn test_user_message_maps_to_user_role() {
    let request = request_with_messages(vec![ChatMessage::User {
        content: ChatMessageContent::Text("Erstelle eine Marketing-E-Mail".to_string()),
        name: None,
    }]);

    let converted = provider().convert_to_gemini_format(&request);

    assert_eq!(converted.contents.len(), 1);
    assert_eq!(converted.contents[0].role.as_deref(), Some("user"));
    assert_eq!(converted.contents[0].parts[0].text, "Erstelle eine Marketing-E-Mail");
    assert!(converted.system_instruction.is_none());
}

#[test]
fn test_system_message_becomes_system_instruction() {
    let request = request_with_messages(vec![
        ChatMessage::System {
            content: ChatMessageContent::Text("Du bist ein KI-Coach.".to_string()),
            name: None,
        },
        ChatMessage::User {
            content: ChatMessageContent::Text("Hallo".to_string()),
            name: None,
        },
    ]);

    let converted = provider().convert_to_gemini_format(&request);

    let system = converted.system_instruction.expect("system instruction should be set");
    assert_eq!(system.parts[0].text, "Du bist ein KI-Coach.");
    // System text must not leak into the contents array
    assert_eq!(converted.contents.len(), 1);
}

#[test]
fn test_assistant_message_maps_to_model_role() {
    let request = request_with_messages(vec![
        ChatMessage::User {
            content: ChatMessageContent::Text("Hallo".to_string()),
            name: None,
        },
        ChatMessage::Assistant {
            content: Some(ChatMessageContent::Text("Hier ist Ihr Prompt.".to_string())),
            reasoning: None,
            reasoning_content: None,
            refusal: None,
            name: None,
            audio: None,
            tool_calls: None,
        },
    ]);

    let converted = provider().convert_to_gemini_format(&request);

    assert_eq!(converted.contents.len(), 2);
    assert_eq!(converted.contents[1].role.as_deref(), Some("model"));
}

#[test]
fn test_request_serializes_with_camel_case_keys() {
    let mut request = request_with_messages(vec![ChatMessage::User {
        content: ChatMessageContent::Text("Hallo".to_string()),
        name: None,
    }]);
    request.max_tokens = Some(1024);

    let converted = provider().convert_to_gemini_format(&request);
    let json = serde_json::to_string(&converted).unwrap();

    assert!(json.contains("\"generationConfig\""));
    assert!(json.contains("\"maxOutputTokens\":1024"));
    assert!(!json.contains("max_output_tokens"));
}

#[test]
fn test_response_text_is_extracted() {
    let raw = r#"{
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": "**Framework-Wahl:** CLEAR passt."}, {"text": "\nC – Kontext: ..."}]
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 34, "totalTokenCount": 46},
        "modelVersion": "gemini-2.5-flash"
    }"#;
    let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();

    let response = provider().convert_from_gemini_format("gemini-2.5-flash", parsed).unwrap();

    let choice = response.choices.first().unwrap();
    match &choice.message {
        ChatMessage::Assistant { content: Some(ChatMessageContent::Text(text)), .. } => {
            assert_eq!(text, "**Framework-Wahl:** CLEAR passt.\nC – Kontext: ...");
        }
        other => panic!("Expected assistant text message, got {:?}", other),
    }
    let usage = response.usage.expect("usage should be mapped");
    assert_eq!(usage.prompt_tokens, Some(12));
    assert_eq!(usage.completion_tokens, Some(34));
    assert_eq!(usage.total_tokens, 46);
}

#[test]
fn test_empty_candidate_list_is_an_error() {
    let parsed: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
    let result = provider().convert_from_gemini_format("gemini-2.5-flash", parsed);
    assert!(result.is_err());
}

#[test]
fn test_error_message_extracted_from_envelope() {
    let body = r#"{"error": {"code": 429, "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
    assert_eq!(GeminiProvider::extract_error_message(body), "quota exceeded");
}

#[test]
fn test_error_message_falls_back_to_raw_body() {
    let body = "upstream connect error";
    assert_eq!(GeminiProvider::extract_error_message(body), "upstream connect error");
}

#[test]
fn test_model_list_strips_prefix_and_filters() {
    let raw = r#"{
        "models": [
            {"name": "models/gemini-2.5-flash", "displayName": "Gemini 2.5 Flash", "supportedGenerationMethods": ["generateContent", "countTokens"]},
            {"name": "models/embedding-001", "displayName": "Embedding", "supportedGenerationMethods": ["embedContent"]}
        ]
    }"#;
    let list: GeminiModelList = serde_json::from_str(raw).unwrap();

    let converted = GeminiProvider::convert_model_list(list);

    assert_eq!(converted.data.len(), 1);
    assert_eq!(converted.data[0].id, "gemini-2.5-flash");
    assert_eq!(converted.data[0].owned_by, "google");
}
