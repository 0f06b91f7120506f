//! Story generation against an OpenAI-compatible chat completion endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::stories::config::{OPENAI_API_BASE, OPENAI_API_KEY, OPENAI_MODEL};
use crate::stories::errors::StoryError;
use crate::stories::personas::PersonaRegistry;
use crate::stories::types::Comedian;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub(crate) struct ChatMessage {
    pub(crate) role: String,
    pub(crate) content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Assemble the message list for a generation request: the persona context
/// as the system message, the user's story as the user message.
pub(crate) fn build_messages(
    registry: &PersonaRegistry,
    comedian: Comedian,
    prompt: &str,
) -> Result<Vec<ChatMessage>, StoryError> {
    let persona = registry.get(comedian)?;
    Ok(vec![
        ChatMessage {
            role: "system".to_string(),
            content: persona.context.to_string(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        },
    ])
}

fn get_client() -> Result<reqwest::Client, StoryError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|e| StoryError::Api(e.to_string()))
}

/// Call the completion endpoint and return the narrated story text.
pub(crate) async fn generate_story_text(
    registry: &PersonaRegistry,
    comedian: Comedian,
    prompt: &str,
) -> Result<String, StoryError> {
    if OPENAI_API_KEY.is_empty() {
        return Err(StoryError::NotConfigured);
    }

    let request = ChatRequest {
        model: OPENAI_MODEL.clone(),
        messages: build_messages(registry, comedian, prompt)?,
    };

    let response = get_client()?
        .post(format!("{}/chat/completions", OPENAI_API_BASE.as_str()))
        .bearer_auth(OPENAI_API_KEY.as_str())
        .json(&request)
        .send()
        .await
        .map_err(|e| StoryError::Api(e.to_string()))?;

    match response.status() {
        reqwest::StatusCode::OK => {}
        status => {
            tracing::debug!("Completion response status: {}", status);
            return Err(StoryError::Api(status.to_string()));
        }
    }

    let body: ChatResponse = response
        .json()
        .await
        .map_err(|e| StoryError::Api(e.to_string()))?;

    let story = body
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| StoryError::Api("Empty choices in completion response".to_string()))?;

    Ok(story)
}
