//! OpenAI chat-completions client
//!
//! Classification calls drive the function-calling interface: the request
//! pins `function_call` to the category's shape so the model cannot answer
//! free-form, and runs at low temperature so repeated runs produce stable
//! true/false decisions. Free-text completions (used by the confirmation
//! step) run at a higher temperature.

use crate::oracle::{Oracle, OutputShape};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reviewsentry_core::{Error, Result, RetryPolicy, Verdict};
use serde::{Deserialize, Serialize};
use tracing::debug;

const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Temperature for shape-constrained classification calls
const CLASSIFY_TEMPERATURE: f32 = 0.2;

/// Temperature for free-text confirmation calls
const COMPLETE_TEMPERATURE: f32 = 0.7;

const DEFAULT_CLASSIFY_MODEL: &str = "gpt-4";
const DEFAULT_COMPLETE_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI-backed classification oracle
#[derive(Debug)]
pub struct OpenAiOracle {
    api_key: String,
    http: reqwest::Client,
    base_url: String,
    classify_model: String,
    complete_model: String,
    retry: RetryPolicy,
}

impl OpenAiOracle {
    /// Create a new oracle. Fails fast on an empty API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::config("empty OpenAI api key"));
        }

        Ok(Self {
            api_key,
            http: reqwest::Client::new(),
            base_url: OPENAI_API_URL.to_string(),
            classify_model: DEFAULT_CLASSIFY_MODEL.to_string(),
            complete_model: DEFAULT_COMPLETE_MODEL.to_string(),
            retry: RetryPolicy::outbound(),
        })
    }

    /// Override the API base URL (for proxies and tests)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the classification and completion models
    pub fn with_models(
        mut self,
        classify_model: impl Into<String>,
        complete_model: impl Into<String>,
    ) -> Self {
        self.classify_model = classify_model.into();
        self.complete_model = complete_model.into();
        self
    }

    /// Override the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| Error::config(format!("invalid api key header: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// One chat-completions attempt, without retries.
    async fn chat_once(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %request.model, "OpenAI chat request");

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::oracle(format!("OpenAI request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::oracle(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::oracle(format!("OpenAI response body unreadable: {}", e)))
    }
}

#[async_trait]
impl Oracle for OpenAiOracle {
    async fn classify(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        shape: &OutputShape,
    ) -> Result<Verdict> {
        let request = ChatRequest {
            model: self.classify_model.clone(),
            temperature: CLASSIFY_TEMPERATURE,
            messages: vec![
                WireMessage::system(system_prompt),
                WireMessage::user(user_prompt),
            ],
            functions: Some(vec![FunctionDefinition {
                name: shape.name.to_string(),
                description: shape.description.to_string(),
                parameters: shape.parameters(),
            }]),
            function_call: Some(serde_json::json!({ "name": shape.name })),
        };

        let request = &request;
        self.retry
            .run("oracle classify", move || async move {
                let response = self.chat_once(request).await?;
                parse_verdict(response, shape.name)
            })
            .await
    }

    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.complete_model.clone(),
            temperature: COMPLETE_TEMPERATURE,
            messages: vec![
                WireMessage::system(system_prompt),
                WireMessage::user(user_prompt),
            ],
            functions: None,
            function_call: None,
        };

        let request = &request;
        self.retry
            .run("oracle complete", move || async move {
                let response = self.chat_once(request).await?;
                Ok(response
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|c| c.message.content)
                    .unwrap_or_default())
            })
            .await
    }
}

/// Extract and validate the verdict from a function-calling response.
///
/// Fails closed: a missing function call, a different function name, or
/// arguments that do not fit the verdict shape are all parse errors.
fn parse_verdict(response: ChatResponse, expected_function: &str) -> Result<Verdict> {
    let message = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or_else(|| Error::parse("no choices in response"))?;

    let call = message
        .function_call
        .ok_or_else(|| Error::parse("response carried no function call"))?;

    if call.name != expected_function {
        return Err(Error::parse(format!(
            "model called '{}' instead of '{}'",
            call.name, expected_function
        )));
    }

    serde_json::from_str(&call.arguments).map_err(|e| {
        Error::parse(format!(
            "function arguments do not fit the verdict shape: {}",
            e
        ))
    })
}

// =============================================================================
// Wire structures
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    temperature: f32,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    functions: Option<Vec<FunctionDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

impl WireMessage {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct FunctionDefinition {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    function_call: Option<FunctionCall>,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    arguments: String,
}
