//! Place-name extraction through an OpenAI-compatible chat completion API.

use crate::error::LookupError;
use crate::http;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const SYSTEM_PROMPT: &str =
    "You are an AI that extracts only relevant location names from news articles.";

/// Pulls place names out of free text, scoped to a target region.
///
/// `None` means the model produced nothing usable (or the call failed);
/// `Some` always holds at least one name.
pub trait PlaceExtractor: Send + Sync {
    fn extract_locations(&self, text: &str, target_region: &str, category: &str) -> Option<Vec<String>>;
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: Message,
}

#[derive(Deserialize, Debug)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiExtractor {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiExtractor {
    pub fn new(agent: ureq::Agent, api_key: impl Into<String>) -> Self {
        Self {
            agent,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Ask the model and return its raw reply text.
    pub fn try_complete(&self, text: &str, target_region: &str, category: &str) -> Result<String, LookupError> {
        let prompt = build_prompt(text, target_region, category);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: &prompt },
            ],
        };

        let result = self
            .agent
            .post(&http::join(&self.base_url, "/chat/completions"))
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&request);

        let response: ChatResponse = http::decode(result)?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LookupError::InvalidResponse("no message content in completion".into()))
    }
}

impl PlaceExtractor for OpenAiExtractor {
    fn extract_locations(&self, text: &str, target_region: &str, category: &str) -> Option<Vec<String>> {
        match self.try_complete(text, target_region, category) {
            Ok(reply) => {
                let names = parse_locations(&reply);
                info!(region = target_region, category, ?names, "extracted locations");
                names
            }
            Err(e) if e.is_upstream_failure() => {
                error!(region = target_region, category, reason = e.reason(), error = %e, "location extraction failed");
                None
            }
            Err(e) => {
                warn!(region = target_region, category, reason = e.reason(), error = %e, "location extraction failed");
                None
            }
        }
    }
}

/// The user turn: one place, inside the region, most relevant to region + category.
pub fn build_prompt(text: &str, target_region: &str, category: &str) -> String {
    format!(
        "다음 뉴스 기사를 분석하고 '{region}' + '{category}'와 가장 관련된 장소를 오직 한 개만 추출해줘.\n\
         추출된 장소는 반드시 {region} 안에 있어야 해:\n\
         \"{text}\"\n\
         결과는 쉼표로 구분된 리스트로 제공해줘.",
        region = target_region,
        category = category,
        text = text,
    )
}

/// Split a comma-separated reply into trimmed, non-empty names.
pub fn parse_locations(reply: &str) -> Option<Vec<String>> {
    let names: Vec<String> = reply
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}
