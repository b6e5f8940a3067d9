use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::prompt::{
    decision_user_prompt, supervisor_user_prompt, DECISION_SYSTEM_PROMPT,
    SUPERVISOR_SYSTEM_PROMPT,
};
use crate::provider::{DecisionOracle, OracleError, Result, Supervisor};
use research_core::{Action, Turn};

/// Non-streaming client for any OpenAI-compatible `/chat/completions` endpoint.
///
/// Serves as both the decision oracle and the supervisor; the two differ only in
/// prompt and in whether a JSON object is demanded.
pub struct OpenAICompatClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAICompatClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request_body(&self, system: &str, user: &str, json_mode: bool) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "stream": false,
        });

        if json_mode {
            body["response_format"] = serde_json::json!({ "type": "json_object" });
        }

        body
    }

    async fn complete(&self, system: &str, user: &str, json_mode: bool) -> Result<String> {
        let body = self.build_request_body(system, user, json_mode);

        log::debug!(
            "POST {}/chat/completions model={} json_mode={}",
            self.base_url,
            self.model,
            json_mode
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(OracleError::Api(format!("HTTP {}: {}", status, text)));
        }

        let completion: ChatCompletion = serde_json::from_str(&response.text().await?)?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(OracleError::EmptyResponse)
    }
}

#[async_trait]
impl DecisionOracle for OpenAICompatClient {
    async fn decide(&self, turns: &[Turn]) -> Result<Action> {
        let content = self
            .complete(DECISION_SYSTEM_PROMPT, &decision_user_prompt(turns), true)
            .await?;
        parse_action(&content)
    }
}

#[async_trait]
impl Supervisor for OpenAICompatClient {
    async fn think(&self, query: &str, context: &[Turn]) -> Result<Turn> {
        let content = self
            .complete(
                SUPERVISOR_SYSTEM_PROMPT,
                &supervisor_user_prompt(query, context),
                false,
            )
            .await?;
        Ok(Turn::supervisor(content))
    }
}

/// Decode the model's answer into an [`Action`].
///
/// Tolerates a Markdown code fence around the object. Anything that still does not
/// decode to one of the three variants is reported verbatim as unrecognized.
pub fn parse_action(content: &str) -> Result<Action> {
    let payload = strip_code_fence(content.trim());
    serde_json::from_str::<Action>(payload).map_err(|error| {
        log::debug!("Oracle payload did not decode to an action: {}", error);
        OracleError::UnrecognizedAction(content.trim().to_string())
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
