//! Request/response logic for the coffee-consultant chat proxy.
//!
//! Everything here is pure: the caller's ordered turns go in, a fully formed
//! `CreateChatCompletionRequest` comes out, and the provider's response is
//! reduced to the single reply text. The HTTP handler owns the one outbound
//! call and the error mapping.

use async_openai::{
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse,
    },
};
use serde::{Deserialize, Serialize};

pub mod persona;

/// Bounded output length for every completion request.
pub const MAX_COMPLETION_TOKENS: u32 = 300;
/// Moderate sampling randomness, fixed for every request.
pub const COMPLETION_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One message of the caller-supplied conversation history. Ordering is
/// caller-significant; turns are forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

/// Build the outbound completion request: the fixed persona as the system
/// message, followed by the caller's turns in unmodified order.
pub fn create_chat_request(
    model: &str,
    turns: &[ChatTurn],
) -> Result<CreateChatCompletionRequest, OpenAIError> {
    let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(turns.len() + 1);
    messages.push(ChatCompletionRequestSystemMessage::from(persona::COFFEE_CONSULTANT_PROMPT).into());

    for turn in turns {
        let message: ChatCompletionRequestMessage = match turn.role {
            TurnRole::User => {
                ChatCompletionRequestUserMessage::from(turn.content.clone()).into()
            }
            TurnRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(turn.content.clone())
                .build()?
                .into(),
        };
        messages.push(message);
    }

    CreateChatCompletionRequestArgs::default()
        .model(model)
        .messages(messages)
        .max_tokens(MAX_COMPLETION_TOKENS)
        .temperature(COMPLETION_TEMPERATURE)
        .build()
}

/// Extract the first candidate's text from the provider response, if any.
pub fn extract_reply(response: CreateChatCompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
}
