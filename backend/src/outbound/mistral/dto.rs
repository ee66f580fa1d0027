//! Wire DTOs for the chat-completion endpoint.

use serde::{Deserialize, Serialize};

/// One chat message in the request body.
#[derive(Debug, Serialize)]
pub(crate) struct ChatMessageDto<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Request body: `{model, messages: [{role: "user", content: prompt}]}`.
#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequestDto<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessageDto<'a>>,
}

impl<'a> ChatCompletionRequestDto<'a> {
    /// Build a single-turn user request for `prompt`.
    pub fn user_prompt(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: vec![ChatMessageDto {
                role: "user",
                content: prompt,
            }],
        }
    }
}

/// Response body; only `choices[0].message.content` is read.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponseDto {
    #[serde(default)]
    pub choices: Vec<ChoiceDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceDto {
    pub message: ChoiceMessageDto,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessageDto {
    pub content: String,
}

impl ChatCompletionResponseDto {
    /// Extract the first choice's message text, if any.
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
    }
}
