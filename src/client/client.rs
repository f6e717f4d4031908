//! HTTP transport for the API
//!
//! Consumes fully-built request records from [`crate::api`] and handles
//! endpoint routing, authentication headers, retries, and response decoding.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::config::ClientConfig;
use crate::api::audio::{Transcription, TranscriptionRequest, Translation, TranslationRequest};
use crate::api::chat::{ChatCompletion, ChatCompletionRequest};
use crate::api::file::{File, FileId, FilePayload, FileSource, FileUpload};
use crate::api::model::{DeleteResponse, ListResponse, Model, ModelId};
use crate::error::{ApiErrorBody, DeserializationError, OpenAIError, Result};

/// Error envelope returned by the API on failure
#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

/// Client for the OpenAI API
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client from a configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(OpenAIError::Config("API key is empty".to_string()));
        }

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| OpenAIError::Config(format!("Invalid base URL: {e}")))?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| OpenAIError::Config(format!("Invalid API key: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        if let Some(organization) = &config.organization {
            let value = HeaderValue::from_str(organization)
                .map_err(|e| OpenAIError::Config(format!("Invalid organization: {e}")))?;
            headers.insert("OpenAI-Organization", value);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .default_headers(headers)
            .build()
            .map_err(|e| OpenAIError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            base_url,
            http,
        })
    }

    /// Create a client configured from the environment
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create chat completion
    pub async fn chat_completion(&self, request: &ChatCompletionRequest) -> Result<ChatCompletion> {
        let url = self.endpoint("chat/completions")?;
        debug!(model = %request.model, messages = request.messages.len(), "create chat completion");
        self.send_with_retry("ChatCompletion", || self.http.post(url.clone()).json(request))
            .await
    }

    /// Create transcription.
    ///
    /// Decodes "json" and "verbose_json" responses; the plain-text output
    /// formats are not supported by this method.
    pub async fn transcription(&self, request: &TranscriptionRequest) -> Result<Transcription> {
        let url = self.endpoint("audio/transcriptions")?;
        let audio = load_payload(&request.audio).await?;
        debug!(model = %request.model, file = %request.audio.name, "create transcription");
        self.send_with_retry("Transcription", || {
            let mut form = Form::new()
                .part(
                    "file",
                    Part::bytes(audio.clone()).file_name(request.audio.name.clone()),
                )
                .text("model", request.model.to_string());
            if let Some(prompt) = &request.prompt {
                form = form.text("prompt", prompt.clone());
            }
            if let Some(format) = &request.response_format {
                form = form.text("response_format", format.clone());
            }
            if let Some(temperature) = request.temperature {
                form = form.text("temperature", temperature.to_string());
            }
            if let Some(language) = &request.language {
                form = form.text("language", language.clone());
            }
            self.http.post(url.clone()).multipart(form)
        })
        .await
    }

    /// Create translation (to English)
    pub async fn translation(&self, request: &TranslationRequest) -> Result<Translation> {
        let url = self.endpoint("audio/translations")?;
        let audio = load_payload(&request.audio).await?;
        debug!(model = %request.model, file = %request.audio.name, "create translation");
        self.send_with_retry("Translation", || {
            let mut form = Form::new()
                .part(
                    "file",
                    Part::bytes(audio.clone()).file_name(request.audio.name.clone()),
                )
                .text("model", request.model.to_string());
            if let Some(prompt) = &request.prompt {
                form = form.text("prompt", prompt.clone());
            }
            if let Some(format) = &request.response_format {
                form = form.text("response_format", format.clone());
            }
            if let Some(temperature) = request.temperature {
                form = form.text("temperature", temperature.to_string());
            }
            self.http.post(url.clone()).multipart(form)
        })
        .await
    }

    /// Upload file
    pub async fn upload_file(&self, request: &FileUpload) -> Result<File> {
        let url = self.endpoint("files")?;
        let payload = load_payload(&request.file).await?;
        debug!(file = %request.file.name, purpose = %request.purpose.0, "upload file");
        self.send_with_retry("File", || {
            let form = Form::new()
                .part(
                    "file",
                    Part::bytes(payload.clone()).file_name(request.file.name.clone()),
                )
                .text("purpose", request.purpose.0.clone());
            self.http.post(url.clone()).multipart(form)
        })
        .await
    }

    /// List files
    pub async fn files(&self) -> Result<Vec<File>> {
        let url = self.endpoint("files")?;
        let list: ListResponse<File> = self
            .send_with_retry("ListResponse<File>", || self.http.get(url.clone()))
            .await?;
        Ok(list.data)
    }

    /// Retrieve file
    pub async fn file(&self, id: &FileId) -> Result<File> {
        let url = self.endpoint(&format!("files/{}", id.0))?;
        self.send_with_retry("File", || self.http.get(url.clone())).await
    }

    /// Delete file
    pub async fn delete_file(&self, id: &FileId) -> Result<DeleteResponse> {
        let url = self.endpoint(&format!("files/{}", id.0))?;
        self.send_with_retry("DeleteResponse", || self.http.delete(url.clone()))
            .await
    }

    /// List models
    pub async fn models(&self) -> Result<Vec<Model>> {
        let url = self.endpoint("models")?;
        let list: ListResponse<Model> = self
            .send_with_retry("ListResponse<Model>", || self.http.get(url.clone()))
            .await?;
        Ok(list.data)
    }

    /// Retrieve model
    pub async fn model(&self, id: &ModelId) -> Result<Model> {
        let url = self.endpoint(&format!("models/{}", id.0))?;
        self.send_with_retry("Model", || self.http.get(url.clone())).await
    }

    /// Resolve a path against the base URL
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| OpenAIError::Config(format!("Invalid endpoint {path}: {e}")))
    }

    /// Send a request, retrying retryable failures with doubling backoff.
    ///
    /// `make` rebuilds the request for every attempt; multipart bodies are
    /// not reusable across sends.
    async fn send_with_retry<T, F>(&self, entity: &'static str, mut make: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnMut() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            let error = match self.send_once(entity, make()).await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if !error.is_retryable() {
                return Err(error);
            }
            if attempt >= self.config.max_retries {
                return Err(OpenAIError::Timeout(format!(
                    "retry budget exhausted after {} attempts: {error}",
                    attempt + 1
                )));
            }

            let backoff = backoff_delay(attempt);
            warn!(%error, attempt, backoff_ms = backoff.as_millis() as u64, "retrying request");
            tokio::time::sleep(backoff).await;
            attempt += 1;
        }
    }

    /// One request-response exchange, decoding success and error bodies
    async fn send_once<T>(&self, entity: &'static str, request: reqwest::RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return serde_json::from_slice(&body)
                .map_err(|e| DeserializationError::new(entity, e).into());
        }

        let error = match serde_json::from_slice::<ErrorEnvelope>(&body) {
            Ok(envelope) => OpenAIError::Api {
                status: status.as_u16(),
                message: envelope.error.message.clone(),
                body: Some(envelope.error),
            },
            Err(_) => OpenAIError::Api {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
                body: None,
            },
        };
        Err(error)
    }
}

/// Doubling backoff, capped at 32s so user-supplied retry budgets cannot
/// overflow the shift
pub(crate) fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(500u64 << attempt.min(6))
}

/// Read a file handle into memory; the model layer never does this itself
async fn load_payload(source: &FileSource) -> Result<Vec<u8>> {
    match &source.payload {
        FilePayload::Path(path) => Ok(tokio::fs::read(path).await?),
        FilePayload::Bytes(bytes) => Ok(bytes.to_vec()),
    }
}
