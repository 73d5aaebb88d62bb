//! External text-analysis interface and its OpenAI-compatible implementation.
//!
//! `/analyze` builds a prompt from a user's recent messages and hands it to a
//! [`TextAnalyzer`]; the result comes back as free text.

use async_openai::types::{
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use tracing::{info, instrument};

use storage::MessageRecord;

/// System prompt for the analysis request. Plain text only, so the reply can
/// go straight to Telegram.
const SYSTEM_PROMPT: &str = "You are an analyst of group-chat conversations. \
Answer in plain text without Markdown or any formatting symbols, suitable for \
sending directly as a chat message.";

/// Accepts a prompt, returns free text. The only surface this crate needs
/// from the analysis service.
#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    async fn analyze(&self, prompt: &str) -> anyhow::Result<String>;
}

/// OpenAI-compatible [`TextAnalyzer`]; any endpoint speaking the chat
/// completions API works via `OPENAI_BASE_URL`.
pub struct OpenAiAnalyzer {
    client: Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl OpenAiAnalyzer {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

#[async_trait]
impl TextAnalyzer for OpenAiAnalyzer {
    #[instrument(skip(self, prompt))]
    async fn analyze(&self, prompt: &str) -> anyhow::Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_PROMPT)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                "Analysis completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => anyhow::bail!("No response from analysis model"),
        }
    }
}

/// Builds the analysis prompt from a user's display name and recent messages.
pub fn build_user_prompt(display_name: &str, messages: &[MessageRecord]) -> String {
    let mut prompt = format!(
        "Analyze the chat user {} from their recent messages. Describe their \
communication style, recurring topics and overall tone in three or four \
sentences.\n\nMessages:\n",
        display_name
    );
    for message in messages {
        prompt.push_str("- ");
        prompt.push_str(&message.content);
        prompt.push('\n');
    }
    prompt
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn prompt_includes_name_and_messages() {
        let messages = vec![
            MessageRecord::new(1, -10, "I love borrow checking".to_string(), Utc::now()),
            MessageRecord::new(1, -10, "coffee first".to_string(), Utc::now()),
        ];

        let prompt = build_user_prompt("alice", &messages);

        assert!(prompt.contains("alice"));
        assert!(prompt.contains("- I love borrow checking\n"));
        assert!(prompt.contains("- coffee first\n"));
    }
}
