use anyhow::Result;
use reqwest::Client;
use serde::Serialize;

/// Client for posting text messages to a Feishu (Lark) custom-bot webhook.
pub struct FeishuBot {
    client: Client,
    webhook: String,
}

#[derive(Serialize)]
struct TextMessage {
    msg_type: &'static str,
    content: TextContent,
}

#[derive(Serialize)]
struct TextContent {
    text: String,
}

impl FeishuBot {
    /// Creates a new `FeishuBot` posting to `webhook` through `client`.
    pub fn new(client: Client, webhook: String) -> Self {
        Self { client, webhook }
    }

    /// Sends `text`, prefixed with the local timestamp line.
    pub async fn push_message(&self, text: &str) -> Result<()> {
        let body = envelope(&utils::local_timestamp(), text);
        self.client
            .post(&self.webhook)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

fn envelope(timestamp: &str, text: &str) -> TextMessage {
    TextMessage {
        msg_type: "text",
        content: TextContent {
            text: format!("{}\n{}", timestamp, text),
        },
    }
}
