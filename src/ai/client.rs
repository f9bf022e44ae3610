//! Chat Completion Client
//!
//! Fault-tolerant client for an OpenAI-compatible chat completion endpoint.
//!
//! ## Strategy
//!
//! - Transport outcomes are a tagged variant (`AttemptOutcome`), switched on
//!   explicitly by the retry loop instead of an exception hierarchy
//! - Retryable failures (connection, timeout, rate limit) back off
//!   exponentially; fatal failures (bad model, malformed body, empty content)
//!   return immediately
//! - `complete()` never fails for expected failure modes; it returns a
//!   `CompletionResult` with `success=false` and a plain-language message
//! - One in-flight call per client; callers wanting concurrency run
//!   independent client instances

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tokio::time::{Instant, sleep};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::LlmConfig;
use crate::constants::retry;
use crate::types::{CraftError, Result};

// =============================================================================
// Messages and Results
// =============================================================================

/// Message role in a chat conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message. Order within a conversation is significant;
/// the system message comes first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Wire payload for a chat completion call. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Result of a completion call.
///
/// Exactly one of these holds: content is non-empty and `success` is true,
/// or `success` is false and `error_message` is set. Partial success does
/// not exist.
#[derive(Debug, Clone)]
pub struct CompletionResult {
    /// Generated text; empty on failure
    pub content: String,
    /// Model that answered (from the response when present)
    pub model: String,
    /// Token-count fields reported by the endpoint; possibly empty
    pub usage: BTreeMap<String, u64>,
    /// Total wall time across all attempts, in milliseconds
    pub latency_ms: u64,
    /// Number of retries performed before this result
    pub retry_count: u32,
    pub success: bool,
    pub error_message: Option<String>,
}

impl CompletionResult {
    fn succeeded(reply: ParsedReply, latency_ms: u64, retry_count: u32) -> Self {
        Self {
            content: reply.content,
            model: reply.model,
            usage: reply.usage,
            latency_ms,
            retry_count,
            success: true,
            error_message: None,
        }
    }

    fn failed(
        model: impl Into<String>,
        message: impl Into<String>,
        latency_ms: u64,
        retry_count: u32,
    ) -> Self {
        Self {
            content: String::new(),
            model: model.into(),
            usage: BTreeMap::new(),
            latency_ms,
            retry_count,
            success: false,
            error_message: Some(message.into()),
        }
    }
}

// =============================================================================
// Error Taxonomy
// =============================================================================

/// Classification of a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallErrorKind {
    /// Connection refused or generic network failure (retryable)
    Connection,
    /// Per-attempt timeout fired (retryable)
    Timeout,
    /// Endpoint returned 429 (retryable, distinct user-facing message)
    RateLimited,
    /// Requested model does not exist on the endpoint (fatal)
    ModelNotFound,
    /// Non-200 status other than 404/429, unparseable body, or missing
    /// content field (fatal)
    InvalidResponse,
    /// Response parsed but content is the empty string (fatal)
    NoContent,
}

impl CallErrorKind {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection | Self::Timeout | Self::RateLimited)
    }
}

/// A classified attempt failure with a plain-language message.
///
/// Callers are expected to present `message` directly rather than
/// re-deriving one from the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallError {
    pub kind: CallErrorKind,
    pub message: String,
}

impl std::fmt::Display for CallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl CallError {
    pub fn connection_refused(endpoint: &str) -> Self {
        Self {
            kind: CallErrorKind::Connection,
            message: format!(
                "Cannot connect to the chat endpoint at {}. Please ensure the server is running.",
                endpoint
            ),
        }
    }

    pub fn connection(detail: impl Into<String>) -> Self {
        Self {
            kind: CallErrorKind::Connection,
            message: format!("Connection error: {}", detail.into()),
        }
    }

    pub fn timeout() -> Self {
        Self {
            kind: CallErrorKind::Timeout,
            message: "Request timed out. Try a simpler prompt or increase the timeout in config."
                .to_string(),
        }
    }

    pub fn rate_limited() -> Self {
        Self {
            kind: CallErrorKind::RateLimited,
            message: "Rate limit exceeded. Please wait before retrying.".to_string(),
        }
    }

    pub fn model_not_found(model: &str) -> Self {
        Self {
            kind: CallErrorKind::ModelNotFound,
            message: format!(
                "Model '{}' not found on the endpoint. Check the configured model name.",
                model
            ),
        }
    }

    pub fn invalid_response(detail: impl Into<String>) -> Self {
        Self {
            kind: CallErrorKind::InvalidResponse,
            message: format!("Received an invalid response from the endpoint: {}", detail.into()),
        }
    }

    pub fn no_content() -> Self {
        Self {
            kind: CallErrorKind::NoContent,
            message: "The model returned an empty response. Please try again.".to_string(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

// =============================================================================
// Transport Seam
// =============================================================================

/// Successfully parsed completion body.
#[derive(Debug, Clone)]
pub struct ParsedReply {
    pub content: String,
    pub model: String,
    pub usage: BTreeMap<String, u64>,
}

/// Classified outcome of one transport attempt.
#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    Success(ParsedReply),
    Retryable(CallError),
    Fatal(CallError),
}

/// One request/response exchange with the chat endpoint.
///
/// Implementations classify every outcome themselves; the retry loop only
/// switches on the returned variant.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &CompletionRequest) -> AttemptOutcome;
}

/// HTTP transport against an OpenAI-compatible endpoint.
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: Url,
    model: String,
    api_key: Option<SecretString>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpTransport {
    /// Build the transport, validating the endpoint URL once.
    ///
    /// A URL without both a scheme and a host is a programmer error and
    /// fails here, not per call.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| CraftError::config(format!("Invalid endpoint URL '{}': {}", config.endpoint, e)))?;

        if !endpoint.has_host() {
            return Err(CraftError::config(format!(
                "Invalid endpoint URL '{}': missing host",
                config.endpoint
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CraftError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint,
            model: config.model.clone(),
            api_key: config.api_key.clone().map(SecretString::from),
        })
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &CompletionRequest) -> AttemptOutcome {
        let mut builder = self
            .http
            .post(self.endpoint.clone())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(request);

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return AttemptOutcome::Retryable(CallError::timeout()),
            Err(e) if e.is_connect() => {
                return AttemptOutcome::Retryable(CallError::connection_refused(
                    self.endpoint.as_str(),
                ));
            }
            Err(e) => return AttemptOutcome::Retryable(CallError::connection(e.to_string())),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return match status.as_u16() {
                404 => AttemptOutcome::Fatal(CallError::model_not_found(&self.model)),
                429 => AttemptOutcome::Retryable(CallError::rate_limited()),
                code => {
                    let detail = extract_api_error(&body)
                        .unwrap_or_else(|| format!("HTTP {}", code));
                    AttemptOutcome::Fatal(CallError::invalid_response(format!(
                        "API error: {}",
                        detail
                    )))
                }
            };
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return AttemptOutcome::Retryable(CallError::connection(e.to_string())),
        };

        parse_reply(&body, &self.model)
    }
}

/// Parse a 200 body into a reply, accepting either the OpenAI
/// `choices[0].message.content` shape or a flat `content` field.
pub(crate) fn parse_reply(body: &str, fallback_model: &str) -> AttemptOutcome {
    let data: Value = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(e) => {
            error!(error = %e, "Invalid JSON in completion response");
            return AttemptOutcome::Fatal(CallError::invalid_response("body is not valid JSON"));
        }
    };

    let content = data["choices"][0]["message"]["content"]
        .as_str()
        .or_else(|| data["content"].as_str());

    let content = match content {
        Some(content) => content,
        None => {
            error!("Completion response missing content field");
            return AttemptOutcome::Fatal(CallError::invalid_response(
                "no content field found",
            ));
        }
    };

    if content.is_empty() {
        return AttemptOutcome::Fatal(CallError::no_content());
    }

    let model = data["model"]
        .as_str()
        .unwrap_or(fallback_model)
        .to_string();

    let usage = data["usage"]
        .as_object()
        .map(|map| {
            map.iter()
                .filter_map(|(key, value)| value.as_u64().map(|v| (key.clone(), v)))
                .collect()
        })
        .unwrap_or_default();

    AttemptOutcome::Success(ParsedReply {
        content: content.to_string(),
        model,
        usage,
    })
}

/// Pull `error.message` out of an error body when the endpoint provides one.
fn extract_api_error(body: &str) -> Option<String> {
    let data: Value = serde_json::from_str(body).ok()?;
    data["error"]["message"].as_str().map(str::to_string)
}

// =============================================================================
// Call Observer
// =============================================================================

/// Structured-event collaborator injected into the client.
///
/// Default methods are no-ops so tests can record only what they care
/// about; production uses [`TracingObserver`].
pub trait CallObserver: Send + Sync {
    fn call_started(&self, _model: &str, _message_count: usize) {}
    fn retrying(&self, _attempt: u32, _max_retries: u32, _delay: Duration, _error: &CallError) {}
    fn call_succeeded(&self, _model: &str, _latency_ms: u64, _retry_count: u32) {}
    fn call_failed(&self, _message: &str, _retry_count: u32) {}
}

/// Observer that emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CallObserver for TracingObserver {
    fn call_started(&self, model: &str, message_count: usize) {
        info!(model, message_count, "llm_call_start");
    }

    fn retrying(&self, attempt: u32, max_retries: u32, delay: Duration, error: &CallError) {
        warn!(
            attempt,
            max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "llm_call_retry"
        );
    }

    fn call_succeeded(&self, model: &str, latency_ms: u64, retry_count: u32) {
        info!(model, latency_ms, retry_count, "llm_call_success");
    }

    fn call_failed(&self, message: &str, retry_count: u32) {
        error!(error_message = message, retry_count, "llm_call_failed");
    }
}

// =============================================================================
// Chat Client
// =============================================================================

/// Retrying chat completion client.
///
/// Holds no cross-call state beyond configuration; each `complete()` call
/// owns its own attempt counter and timer.
pub struct ChatClient {
    transport: Arc<dyn ChatTransport>,
    model: String,
    max_retries: u32,
    observer: Arc<dyn CallObserver>,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("model", &self.model)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl ChatClient {
    /// Create a client over HTTP from configuration.
    ///
    /// Fails only for construction-time programmer errors (malformed
    /// endpoint URL); runtime failures are reported via `CompletionResult`.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(
            Arc::new(transport),
            config.model.clone(),
            config.max_retries,
        ))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(
        transport: Arc<dyn ChatTransport>,
        model: impl Into<String>,
        max_retries: u32,
    ) -> Self {
        Self {
            transport,
            model: model.into(),
            max_retries,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the injected event observer.
    pub fn with_observer(mut self, observer: Arc<dyn CallObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Model name this client completes with.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a chat completion request with automatic retry and backoff.
    ///
    /// Retryable failures are retried up to `max_retries` times with
    /// exponential backoff; fatal failures return immediately. The
    /// returned `latency_ms` always covers all attempts from the first
    /// send to the final outcome.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> CompletionResult {
        let start = Instant::now();
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            temperature,
            max_tokens,
        };

        self.observer.call_started(&self.model, messages.len());

        let mut attempt: u32 = 0;
        loop {
            match self.transport.send(&request).await {
                AttemptOutcome::Success(reply) => {
                    let latency_ms = start.elapsed().as_millis() as u64;
                    self.observer
                        .call_succeeded(&reply.model, latency_ms, attempt);
                    return CompletionResult::succeeded(reply, latency_ms, attempt);
                }
                AttemptOutcome::Fatal(err) => {
                    let latency_ms = start.elapsed().as_millis() as u64;
                    self.observer.call_failed(&err.message, attempt);
                    return CompletionResult::failed(
                        self.model.clone(),
                        err.message,
                        latency_ms,
                        attempt,
                    );
                }
                AttemptOutcome::Retryable(err) => {
                    if attempt >= self.max_retries {
                        let message =
                            format!("Max retries exceeded. Last error: {}", err.message);
                        let latency_ms = start.elapsed().as_millis() as u64;
                        self.observer.call_failed(&message, attempt);
                        return CompletionResult::failed(
                            self.model.clone(),
                            message,
                            latency_ms,
                            attempt,
                        );
                    }

                    let delay = backoff_delay(attempt);
                    self.observer
                        .retrying(attempt + 1, self.max_retries, delay, &err);
                    debug!(
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying after backoff"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Probe the endpoint with a minimal one-token completion.
    ///
    /// Reuses the full retry path so connectivity checks cannot drift from
    /// real calls.
    pub async fn test_connection(&self) -> bool {
        let messages = [ChatMessage::user("Hello")];
        self.complete(&messages, 0.0, Some(10)).await.success
    }
}

/// Delay before retry attempt `attempt + 1` (attempt counter is 0-based):
/// `min(max_delay, initial_delay * backoff_factor^attempt)`.
fn backoff_delay(attempt: u32) -> Duration {
    let factor = retry::BACKOFF_FACTOR.powi(attempt.min(31) as i32);
    let delay_ms = (retry::INITIAL_DELAY_MS as f64 * factor) as u64;
    Duration::from_millis(delay_ms.min(retry::MAX_DELAY_SECS * 1_000))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Transport that replays a scripted sequence of outcomes.
    struct ScriptedTransport {
        outcomes: Mutex<Vec<AttemptOutcome>>,
        sends: Mutex<u32>,
    }

    impl ScriptedTransport {
        fn new(outcomes: Vec<AttemptOutcome>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                sends: Mutex::new(0),
            }
        }

        fn sends(&self) -> u32 {
            *self.sends.lock().unwrap()
        }
    }

    #[async_trait]
    impl ChatTransport for ScriptedTransport {
        async fn send(&self, _request: &CompletionRequest) -> AttemptOutcome {
            *self.sends.lock().unwrap() += 1;
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.is_empty() {
                outcomes.push(AttemptOutcome::Retryable(CallError::timeout()));
            }
            outcomes.remove(0)
        }
    }

    fn reply(content: &str) -> ParsedReply {
        ParsedReply {
            content: content.to_string(),
            model: "test-model".to_string(),
            usage: BTreeMap::new(),
        }
    }

    fn client(transport: Arc<ScriptedTransport>, max_retries: u32) -> ChatClient {
        ChatClient::with_transport(transport, "test-model", max_retries)
    }

    #[tokio::test]
    async fn test_success_first_attempt() {
        let transport = Arc::new(ScriptedTransport::new(vec![AttemptOutcome::Success(
            reply("answer"),
        )]));
        let result = client(transport.clone(), 3)
            .complete(&[ChatMessage::user("q")], 0.7, None)
            .await;

        assert!(result.success);
        assert_eq!(result.content, "answer");
        assert_eq!(result.retry_count, 0);
        assert!(result.error_message.is_none());
        assert_eq!(transport.sends(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_then_success() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            AttemptOutcome::Retryable(CallError::timeout()),
            AttemptOutcome::Success(reply("recovered")),
        ]));
        let result = client(transport.clone(), 3)
            .complete(&[ChatMessage::user("q")], 0.7, None)
            .await;

        assert!(result.success);
        assert_eq!(result.retry_count, 1);
        assert_eq!(transport.sends(), 2);
        // One backoff sleep of 1s before the second attempt
        assert!(result.latency_ms >= 1_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_exhausted() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            AttemptOutcome::Retryable(CallError::connection("refused")),
            AttemptOutcome::Retryable(CallError::connection("refused")),
            AttemptOutcome::Retryable(CallError::timeout()),
        ]));
        let result = client(transport.clone(), 2)
            .complete(&[ChatMessage::user("q")], 0.7, None)
            .await;

        assert!(!result.success);
        assert_eq!(result.retry_count, 2);
        assert_eq!(transport.sends(), 3);
        let message = result.error_message.as_deref().unwrap();
        assert!(message.starts_with("Max retries exceeded"));
        assert!(message.contains("timed out"));
        // Backoff slept 1s + 2s across the two retries
        assert!(result.latency_ms >= 3_000);
    }

    #[tokio::test]
    async fn test_fatal_short_circuit() {
        let transport = Arc::new(ScriptedTransport::new(vec![AttemptOutcome::Fatal(
            CallError::model_not_found("test-model"),
        )]));
        let result = client(transport.clone(), 3)
            .complete(&[ChatMessage::user("q")], 0.7, None)
            .await;

        assert!(!result.success);
        assert_eq!(result.retry_count, 0);
        assert_eq!(transport.sends(), 1);
        assert!(
            result
                .error_message
                .as_deref()
                .unwrap()
                .contains("Model 'test-model' not found")
        );
    }

    #[tokio::test]
    async fn test_result_invariant() {
        let ok_transport = Arc::new(ScriptedTransport::new(vec![AttemptOutcome::Success(
            reply("x"),
        )]));
        let ok = client(ok_transport, 0)
            .complete(&[ChatMessage::user("q")], 0.0, None)
            .await;
        assert!(ok.success && !ok.content.is_empty() && ok.error_message.is_none());

        let bad_transport = Arc::new(ScriptedTransport::new(vec![AttemptOutcome::Fatal(
            CallError::no_content(),
        )]));
        let bad = client(bad_transport, 0)
            .complete(&[ChatMessage::user("q")], 0.0, None)
            .await;
        assert!(!bad.success && bad.content.is_empty() && bad.error_message.is_some());
    }

    #[tokio::test]
    async fn test_connection_probe() {
        let transport = Arc::new(ScriptedTransport::new(vec![AttemptOutcome::Success(
            reply("Hi"),
        )]));
        assert!(client(transport, 0).test_connection().await);

        let down = Arc::new(ScriptedTransport::new(vec![AttemptOutcome::Retryable(
            CallError::connection_refused("http://localhost:9"),
        )]));
        assert!(!client(down, 0).test_connection().await);
    }

    #[test]
    fn test_backoff_schedule() {
        assert_eq!(backoff_delay(0), Duration::from_secs(1));
        assert_eq!(backoff_delay(1), Duration::from_secs(2));
        assert_eq!(backoff_delay(2), Duration::from_secs(4));
        assert_eq!(backoff_delay(4), Duration::from_secs(16));
        // Capped at 30s from the sixth retry on
        assert_eq!(backoff_delay(5), Duration::from_secs(30));
        assert_eq!(backoff_delay(10), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_reply_openai_shape() {
        let body = r#"{
            "model": "remote-model",
            "choices": [{"message": {"content": "hello"}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3}
        }"#;
        match parse_reply(body, "fallback") {
            AttemptOutcome::Success(reply) => {
                assert_eq!(reply.content, "hello");
                assert_eq!(reply.model, "remote-model");
                assert_eq!(reply.usage.get("prompt_tokens"), Some(&12));
                assert_eq!(reply.usage.get("completion_tokens"), Some(&3));
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_reply_flat_shape() {
        let body = r#"{"content": "flat answer"}"#;
        match parse_reply(body, "fallback") {
            AttemptOutcome::Success(reply) => {
                assert_eq!(reply.content, "flat answer");
                assert_eq!(reply.model, "fallback");
                assert!(reply.usage.is_empty());
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_reply_missing_content_is_fatal() {
        match parse_reply(r#"{"choices": []}"#, "m") {
            AttemptOutcome::Fatal(err) => assert_eq!(err.kind, CallErrorKind::InvalidResponse),
            other => panic!("expected fatal, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_reply_empty_content_is_fatal() {
        match parse_reply(r#"{"content": ""}"#, "m") {
            AttemptOutcome::Fatal(err) => assert_eq!(err.kind, CallErrorKind::NoContent),
            other => panic!("expected fatal, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_reply_invalid_json_is_fatal() {
        match parse_reply("not json at all", "m") {
            AttemptOutcome::Fatal(err) => assert_eq!(err.kind, CallErrorKind::InvalidResponse),
            other => panic!("expected fatal, got {:?}", other),
        }
    }

    #[test]
    fn test_error_kind_retryability() {
        assert!(CallErrorKind::Connection.is_retryable());
        assert!(CallErrorKind::Timeout.is_retryable());
        assert!(CallErrorKind::RateLimited.is_retryable());
        assert!(!CallErrorKind::ModelNotFound.is_retryable());
        assert!(!CallErrorKind::InvalidResponse.is_retryable());
        assert!(!CallErrorKind::NoContent.is_retryable());
    }

    #[test]
    fn test_endpoint_validation() {
        let mut config = LlmConfig::default();
        config.endpoint = "not a url".to_string();
        assert!(HttpTransport::new(&config).is_err());

        config.endpoint = "http://localhost:11434/v1/chat/completions".to_string();
        assert!(HttpTransport::new(&config).is_ok());
    }

    #[test]
    fn test_request_serialization_omits_absent_max_tokens() {
        let request = CompletionRequest {
            model: "m".to_string(),
            messages: vec![ChatMessage::system("s"), ChatMessage::user("u")],
            temperature: 0.7,
            max_tokens: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
    }
}
