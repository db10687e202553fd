//! AI-assisted content generation
//!
//! A [`Generator`] turns a prompt into text. [`GeminiClient`] talks to a
//! Gemini-style `generateContent` endpoint; tests use stubs.
//!
//! Generation is the only operation that suspends. [`generate_bounded`]
//! wraps any generator with a timeout and a [`CancelSignal`], and
//! [`fill_block`] delivers the result into a block through
//! [`BlockStore::update_content`], so a block deleted while the request was
//! in flight is left alone.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;
use tokio::sync::watch;

use crate::block::BlockId;
use crate::config::Config;
use crate::content::{BlockContent, BlockKind};
use crate::store::BlockStore;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("API key not configured. Set ai_api_key in the config or GIFTWRAP_AI_API_KEY.")]
    MissingApiKey,

    #[error("Request timed out after {}s, please try again", .0.as_secs())]
    Timeout(Duration),

    #[error("Generation cancelled")]
    Cancelled,

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("No response from AI, please try again")]
    EmptyResponse,

    #[error("Failed to parse AI response: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("The {task} assistant works on {expected} blocks, not {found}")]
    WrongBlockType {
        task: &'static str,
        expected: BlockKind,
        found: String,
    },
}

impl GenerateError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, GenerateError::Timeout(_))
    }
}

/// Text generation backend
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate text for `prompt`; with `want_json` the reply is a JSON document
    async fn generate(&self, prompt: &str, want_json: bool) -> Result<String, GenerateError>;
}

// ==================== Cancellation ====================

/// Fires cancellation for every [`CancelSignal`] made from the same pair
#[derive(Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        // Nobody listening just means nothing is in flight
        let _ = self.tx.send(true);
    }
}

#[derive(Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// A signal that never fires
    pub fn never() -> Self {
        cancel_pair().1
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation was requested
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                // Handle dropped without cancelling
                std::future::pending::<()>().await;
            }
        }
    }
}

pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx: Arc::new(tx) }, CancelSignal { rx })
}

/// Run a generator with a deadline and a cancellation signal
///
/// Timeouts and cancellation are reported as their own errors.
pub async fn generate_bounded(
    generator: &dyn Generator,
    prompt: &str,
    want_json: bool,
    timeout: Duration,
    cancel: &mut CancelSignal,
) -> Result<String, GenerateError> {
    if cancel.is_cancelled() {
        return Err(GenerateError::Cancelled);
    }

    tokio::select! {
        result = tokio::time::timeout(timeout, generator.generate(prompt, want_json)) => {
            match result {
                Ok(text) => text,
                Err(_) => {
                    tracing::warn!("AI generation timed out after {:?}", timeout);
                    Err(GenerateError::Timeout(timeout))
                }
            }
        }
        _ = cancel.cancelled() => {
            tracing::debug!("AI generation cancelled");
            Err(GenerateError::Cancelled)
        }
    }
}

// ==================== Tasks ====================

/// Voice of a generated note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    #[default]
    Fun,
    Sweet,
    Poetic,
}

/// One kind of content the assistant can write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiTask {
    /// Message text for a note block
    Note { tone: Tone, keywords: String },
    /// Rhyming hint for a secret block, about its code
    Riddle { answer: String },
    /// Question, options and answer for a quiz block
    Quiz { topic: String },
    /// Question and options for a poll block
    Poll { topic: String },
    /// One more quote for a wisdom block
    Wisdom { topic: String },
}

impl AiTask {
    pub fn name(&self) -> &'static str {
        match self {
            AiTask::Note { .. } => "note",
            AiTask::Riddle { .. } => "riddle",
            AiTask::Quiz { .. } => "quiz",
            AiTask::Poll { .. } => "poll",
            AiTask::Wisdom { .. } => "wisdom",
        }
    }

    /// Block type the task writes into
    pub fn target_kind(&self) -> BlockKind {
        match self {
            AiTask::Note { .. } => BlockKind::Note,
            AiTask::Riddle { .. } => BlockKind::Secret,
            AiTask::Quiz { .. } => BlockKind::Quiz,
            AiTask::Poll { .. } => BlockKind::Poll,
            AiTask::Wisdom { .. } => BlockKind::Wisdom,
        }
    }

    /// Pick the task for a block from its content
    ///
    /// `input` is the user's keywords or topic; riddles ignore it and use
    /// the secret's code. Returns `None` for blocks without an assistant.
    pub fn for_content(content: &BlockContent, input: &str, tone: Tone) -> Option<Self> {
        let input = input.trim().to_string();
        match content {
            BlockContent::Note(_) => Some(AiTask::Note {
                tone,
                keywords: input,
            }),
            BlockContent::Secret(secret) => Some(AiTask::Riddle {
                answer: secret.code.clone(),
            }),
            BlockContent::Quiz(_) => Some(AiTask::Quiz { topic: input }),
            BlockContent::Poll(_) => Some(AiTask::Poll { topic: input }),
            BlockContent::Wisdom(_) => Some(AiTask::Wisdom { topic: input }),
            _ => None,
        }
    }

    pub fn wants_json(&self) -> bool {
        matches!(self, AiTask::Quiz { .. } | AiTask::Poll { .. })
    }

    pub fn prompt(&self) -> String {
        match self {
            AiTask::Note { tone, keywords } => format!(
                "Write a short, {} message for a gift website. Keywords: {}. Max 3 sentences.",
                tone,
                or_default(keywords, "love")
            ),
            AiTask::Riddle { answer } => format!(
                "Create a rhyming riddle for the answer \"{}\". Do not reveal the answer.",
                answer
            ),
            AiTask::Quiz { topic } => format!(
                "Generate a trivia question about \"{}\". Return JSON: {{ \"question\": \"...\", \"options\": [\"A\", \"B\", \"C\", \"D\"], \"correctIndex\": 0 }}",
                topic
            ),
            AiTask::Poll { topic } => format!(
                "Generate a fun poll question about \"{}\". Return JSON: {{ \"question\": \"...\", \"options\": [\"Option 1\", \"Option 2\"] }}",
                topic
            ),
            AiTask::Wisdom { topic } => format!(
                "Generate a short, inspiring daily quote or affirmation about {}.",
                or_default(topic, "friendship")
            ),
        }
    }

    /// Check that `content` is the kind of block this task writes
    pub fn check_target(&self, content: &BlockContent) -> Result<(), GenerateError> {
        let expected = self.target_kind();
        if content.kind() == Some(expected) {
            return Ok(());
        }
        Err(GenerateError::WrongBlockType {
            task: self.name(),
            expected,
            found: content.type_tag().to_string(),
        })
    }

    /// Fold generated output into a block's current content
    pub fn apply(
        &self,
        content: &BlockContent,
        output: &str,
    ) -> Result<BlockContent, GenerateError> {
        self.check_target(content)?;

        let text = output.trim();
        if text.is_empty() {
            return Err(GenerateError::EmptyResponse);
        }

        if self.wants_json() {
            return merge_json(self.target_kind(), content, text);
        }

        let mut updated = content.clone();
        match &mut updated {
            BlockContent::Note(note) => note.text = text.to_string(),
            BlockContent::Secret(secret) => secret.hint = text.to_string(),
            BlockContent::Wisdom(wisdom) => wisdom.quotes.push(text.to_string()),
            _ => {}
        }
        Ok(updated)
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

/// Overlay the fields of a generated JSON object onto existing content
fn merge_json(
    kind: BlockKind,
    content: &BlockContent,
    text: &str,
) -> Result<BlockContent, GenerateError> {
    let generated: Map<String, Value> =
        serde_json::from_str(strip_code_fence(text)).map_err(GenerateError::InvalidJson)?;

    let mut merged = match content.to_value().map_err(GenerateError::InvalidJson)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    merged.extend(generated);

    BlockContent::from_value(kind, Value::Object(merged)).map_err(GenerateError::InvalidJson)
}

/// Models sometimes wrap JSON in a markdown fence even in JSON mode
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Generate content for a block and store it
///
/// A missing block is skipped and a block of the wrong kind is rejected,
/// both before any request is made. The reply is merged into the block's
/// content as it stands when the reply arrives.
/// Returns whether the block was updated.
pub async fn fill_block(
    store: &mut BlockStore,
    id: &BlockId,
    task: &AiTask,
    generator: &dyn Generator,
    timeout: Duration,
    cancel: &mut CancelSignal,
) -> Result<bool, GenerateError> {
    let Some(block) = store.get(id) else {
        tracing::debug!("Block {} not found, skipping generation", id);
        return Ok(false);
    };
    task.check_target(&block.content)?;

    let prompt = task.prompt();
    let output = generate_bounded(generator, &prompt, task.wants_json(), timeout, cancel).await?;

    let Some(block) = store.get(id) else {
        tracing::debug!("Block {} went away during generation", id);
        return Ok(false);
    };
    let content = task.apply(&block.content, &output)?;
    Ok(store.update_content(id, content))
}

// ==================== Gemini client ====================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.trim().is_empty())
    }
}

/// HTTP client for a Gemini-style `generateContent` API
///
/// The client sets no deadline of its own. [`generate_bounded`] owns the
/// timeout so it is always reported as [`GenerateError::Timeout`].
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("giftwrap/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, GenerateError> {
        Self::new(
            config.ai_endpoint.clone(),
            config.ai_model.clone(),
            config.ai_api_key.clone(),
        )
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, prompt: &str, want_json: bool) -> Result<String, GenerateError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(GenerateError::MissingApiKey);
        };

        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: 1024,
                response_mime_type: if want_json {
                    "application/json"
                } else {
                    "text/plain"
                },
            },
        };

        tracing::debug!("Requesting generation from {}", self.model);
        let response = self
            .client
            .post(self.url())
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| format!("API error: {}", status.as_u16()));
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let data: GenerateResponse = response.json().await?;
        data.first_text().ok_or(GenerateError::EmptyResponse)
    }
}
