//! Async HTTP client for the advisory text service
//!
//! Two wire dialects are spoken: Anthropic messages and the OpenAI-style
//! chat completions that most self-hosted gateways accept. The dialect is
//! picked from the endpoint URL. The simulation never waits on this
//! client; callers race it against the tick loop and fall back to static
//! text on any error.

use std::fmt::Display;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};

use crate::core::error::{MeltdownError, Result};

/// Upper bound on a single advisory round trip
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Headlines are one sentence; nothing needs more than this
const MAX_TOKENS: u32 = 64;

const DEFAULT_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";

/// Wire format of the advisory endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Anthropic,
    ChatCompletions,
}

impl Dialect {
    pub fn for_url(url: &str) -> Self {
        if url.contains("anthropic.com") {
            Dialect::Anthropic
        } else {
            Dialect::ChatCompletions
        }
    }

    fn body(self, model: &str, system: &str, user: &str) -> Value {
        match self {
            Dialect::Anthropic => json!({
                "model": model,
                "max_tokens": MAX_TOKENS,
                "system": system,
                "messages": [{ "role": "user", "content": user }],
            }),
            Dialect::ChatCompletions => json!({
                "model": model,
                "max_tokens": MAX_TOKENS,
                "messages": [
                    { "role": "system", "content": system },
                    { "role": "user", "content": user },
                ],
            }),
        }
    }

    fn authorize(self, request: RequestBuilder, api_key: &str) -> RequestBuilder {
        match self {
            Dialect::Anthropic => request
                .header("x-api-key", api_key)
                .header("anthropic-version", "2023-06-01"),
            Dialect::ChatCompletions => request.bearer_auth(api_key),
        }
    }

    /// Pull the generated text out of a response body
    fn reply_text(self, body: &Value) -> Option<&str> {
        let pointer = match self {
            Dialect::Anthropic => "/content/0/text",
            Dialect::ChatCompletions => "/choices/0/message/content",
        };
        body.pointer(pointer).and_then(Value::as_str)
    }
}

/// Reduce a model reply to one displayable line
///
/// Takes the first non-blank line and strips wrapping quotes. Returns
/// `None` when nothing is left.
pub fn headline_text(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let line = line
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '“' | '”'))
        .trim();
    (!line.is_empty()).then(|| line.to_string())
}

fn advisory_error(e: impl Display) -> MeltdownError {
    MeltdownError::AdvisoryError(e.to_string())
}

pub struct LlmClient {
    http: Client,
    api_key: String,
    api_url: String,
    model: String,
    dialect: Dialect,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            dialect: Dialect::for_url(&api_url),
            api_key,
            api_url,
            model,
        }
    }

    /// Client configured from `ADVISOR_API_KEY`, with optional
    /// `ADVISOR_API_URL` and `ADVISOR_MODEL` overrides
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ADVISOR_API_KEY")
            .map_err(|_| advisory_error("ADVISOR_API_KEY not set"))?;
        let api_url = std::env::var("ADVISOR_API_URL").unwrap_or_else(|_| DEFAULT_URL.into());
        let model = std::env::var("ADVISOR_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Ok(Self::new(api_key, api_url, model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Send one system + user exchange and return the cleaned headline
    ///
    /// `Ok(None)` means the service answered but said nothing usable.
    pub async fn complete(&self, system: &str, user: &str) -> Result<Option<String>> {
        let body = self.dialect.body(&self.model, system, user);
        let request = self.http.post(&self.api_url).json(&body);
        let response = self
            .dialect
            .authorize(request, &self.api_key)
            .send()
            .await
            .map_err(advisory_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(advisory_error(format!("{}: {}", status, detail)));
        }

        let reply: Value = response.json().await.map_err(advisory_error)?;
        Ok(self.dialect.reply_text(&reply).and_then(headline_text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_follows_endpoint() {
        let anthropic = LlmClient::new("k".into(), DEFAULT_URL.into(), "m".into());
        assert_eq!(anthropic.dialect(), Dialect::Anthropic);

        let gateway = LlmClient::new(
            "k".into(),
            "https://api.example.com/v1/chat/completions".into(),
            "m".into(),
        );
        assert_eq!(gateway.dialect(), Dialect::ChatCompletions);
        assert_eq!(gateway.model(), "m");
    }

    #[test]
    fn test_request_bodies() {
        let body = Dialect::Anthropic.body("haiku", "be brief", "spin this");
        assert_eq!(body["system"], "be brief");
        assert_eq!(body["messages"][0]["content"], "spin this");
        assert_eq!(body["max_tokens"], MAX_TOKENS);

        let body = Dialect::ChatCompletions.body("gpt", "be brief", "spin this");
        assert!(body.get("system").is_none());
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "spin this");
    }

    #[test]
    fn test_reply_extraction() {
        let anthropic: Value = serde_json::from_str(
            r#"{"content":[{"type":"text","text":"Thermal transition underway."}]}"#,
        )
        .unwrap();
        assert_eq!(
            Dialect::Anthropic.reply_text(&anthropic),
            Some("Thermal transition underway.")
        );

        let chat: Value =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"Shred it."}}]}"#).unwrap();
        assert_eq!(Dialect::ChatCompletions.reply_text(&chat), Some("Shred it."));
        assert_eq!(Dialect::ChatCompletions.reply_text(&anthropic), None);
    }

    #[test]
    fn test_headline_text_cleanup() {
        assert_eq!(
            headline_text("\n  \"Profits are a state of mind.\"\nSecond line").as_deref(),
            Some("Profits are a state of mind.")
        );
        assert_eq!(headline_text("“Mark to market.”").as_deref(), Some("Mark to market."));
        assert_eq!(headline_text("   \n\t"), None);
        assert_eq!(headline_text("\"\""), None);
    }
}
