//! Corporate-spin headlines
//!
//! The advisor never fails: with no client configured, or on any client
//! error, it answers with a fixed fallback line.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::llm::client::LlmClient;
use crate::llm::context::AdvisoryContext;

/// Returned when the service answered with nothing usable
pub const EMPTY_REPLY_FALLBACK: &str = "Data Integrity Compromised.";
/// Returned when the service is unreachable or not configured
pub const OFFLINE_FALLBACK: &str = "Communications Link Severed.";

const SYSTEM_PROMPT: &str = "You write one-line satirical copy for an energy-trading \
     company simulation. Reply with the sentence only, no quotes.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryTopic {
    /// News ticker headline
    Ticker,
    Meltdown,
    Audit,
    Profit,
    /// Executive advice to the player
    Advice,
}

impl AdvisoryTopic {
    pub fn prompt(self, context: &AdvisoryContext) -> String {
        match self {
            AdvisoryTopic::Meltdown => "You are a PR spokesperson for Enron. A nuclear reactor is \
                melting down. Write one darkly funny corporate-speak sentence spinning this \
                disaster as an \"exciting thermal transition\". Max 12 words."
                .to_string(),
            AdvisoryTopic::Audit => "SEC audit coming. You are a panicked CFO. Give a \
                one-sentence instruction to a subordinate about hiding evidence. Max 10 words."
                .to_string(),
            AdvisoryTopic::Profit => "Enron just announced fake profits. You are Ken Lay. Give \
                an arrogant, visionary one-sentence quote about Enron's future. Max 12 words."
                .to_string(),
            AdvisoryTopic::Advice => format!(
                "You are an Enron executive speaking to your successor. The current stock is \
                 {:.0} and audit risk is {:.0}%. Give a very short, confident and slightly \
                 corrupt piece of advice. Max 10 words.",
                context.stock_score, context.audit_risk_percent
            ),
            AdvisoryTopic::Ticker => format!(
                "Write a cryptic, ominous but professional corporate news ticker headline for a \
                 failing energy giant. Context:\n{}\nMax 10 words.",
                context.to_prompt_string()
            ),
        }
    }
}

impl FromStr for AdvisoryTopic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ticker" | "news" => Ok(AdvisoryTopic::Ticker),
            "meltdown" => Ok(AdvisoryTopic::Meltdown),
            "audit" => Ok(AdvisoryTopic::Audit),
            "profit" => Ok(AdvisoryTopic::Profit),
            "advice" => Ok(AdvisoryTopic::Advice),
            other => Err(format!("unknown advisory topic '{}'", other)),
        }
    }
}

/// Pick a topic that fits the current board
pub fn topic_for(context: &AdvisoryContext, meltdown_progress: f64) -> AdvisoryTopic {
    if meltdown_progress > 0.0 {
        AdvisoryTopic::Meltdown
    } else if context.audit_risk_percent >= 70.0 {
        AdvisoryTopic::Audit
    } else {
        AdvisoryTopic::Ticker
    }
}

pub struct Advisor {
    client: Option<LlmClient>,
}

impl Advisor {
    pub fn new(client: Option<LlmClient>) -> Self {
        Self { client }
    }

    /// Advisor configured from the environment, or offline when unset
    pub fn from_env() -> Self {
        match LlmClient::from_env() {
            Ok(client) => {
                tracing::info!(model = client.model(), "Advisory service configured");
                Self::new(Some(client))
            }
            Err(e) => {
                tracing::warn!("{} - headlines use fallback text", e);
                Self::new(None)
            }
        }
    }

    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn is_online(&self) -> bool {
        self.client.is_some()
    }

    /// One line of copy for `topic`; always returns something displayable
    pub async fn headline(&self, context: &AdvisoryContext, topic: AdvisoryTopic) -> String {
        let Some(client) = &self.client else {
            return OFFLINE_FALLBACK.to_string();
        };

        match client.complete(SYSTEM_PROMPT, &topic.prompt(context)).await {
            Ok(Some(text)) => text,
            Ok(None) => EMPTY_REPLY_FALLBACK.to_string(),
            Err(e) => {
                tracing::warn!(?topic, "Advisory request failed: {}", e);
                OFFLINE_FALLBACK.to_string()
            }
        }
    }
}
