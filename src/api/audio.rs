//! Audio transcription and translation types
//!
//! Both requests go out as multipart forms: the audio payload travels as a
//! file part and every other set field as a text part, so none of the request
//! types serialize the audio handle itself.

use serde::{Deserialize, Serialize};

use super::file::FileSource;
use super::model::ModelId;
use super::schema::{require, FieldSpec, Schema};
use crate::error::ValidationError;

/// Request for the create transcription operation
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionRequest {
    /// Audio to transcribe; flac, mp3, mp4, mpeg, mpga, m4a, ogg, wav, or webm
    pub audio: FileSource,
    /// ID of the model to use (e.g. "whisper-1")
    pub model: ModelId,
    /// Text to guide the model's style or continue a previous segment
    pub prompt: Option<String>,
    /// Output format: "json", "text", "srt", "verbose_json", or "vtt"
    pub response_format: Option<String>,
    /// Sampling temperature, 0 to 1
    pub temperature: Option<f64>,
    /// Language of the input audio, ISO-639-1
    pub language: Option<String>,
}

impl Schema for TranscriptionRequest {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("file"),
        FieldSpec::required("model"),
        FieldSpec::optional("prompt"),
        FieldSpec::optional("response_format"),
        FieldSpec::optional("temperature"),
        FieldSpec::optional("language"),
    ];
}

impl TranscriptionRequest {
    /// Request with the two required fields; all optional fields absent
    pub fn new(audio: FileSource, model: ModelId) -> Self {
        Self {
            audio,
            model,
            prompt: None,
            response_format: None,
            temperature: None,
            language: None,
        }
    }

    /// Builder for incremental construction
    pub fn builder() -> TranscriptionRequestBuilder {
        TranscriptionRequestBuilder::default()
    }
}

/// Builder of [`TranscriptionRequest`] instances
#[derive(Debug, Clone, Default)]
pub struct TranscriptionRequestBuilder {
    audio: Option<FileSource>,
    model: Option<ModelId>,
    prompt: Option<String>,
    response_format: Option<String>,
    temperature: Option<f64>,
    language: Option<String>,
}

impl TranscriptionRequestBuilder {
    /// Audio to transcribe
    pub fn audio(mut self, audio: FileSource) -> Self {
        self.audio = Some(audio);
        self
    }

    /// ID of the model to use
    pub fn model(mut self, model: ModelId) -> Self {
        self.model = Some(model);
        self
    }

    /// Text to guide the model's style
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Output format
    pub fn response_format(mut self, response_format: impl Into<String>) -> Self {
        self.response_format = Some(response_format.into());
        self
    }

    /// Sampling temperature, 0 to 1
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Language of the input audio, ISO-639-1
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Finalize into an immutable [`TranscriptionRequest`]
    pub fn build(&self) -> Result<TranscriptionRequest, ValidationError> {
        Ok(TranscriptionRequest {
            audio: require::<TranscriptionRequest, _>("file", &self.audio)?,
            model: require::<TranscriptionRequest, _>("model", &self.model)?,
            prompt: self.prompt.clone(),
            response_format: self.response_format.clone(),
            temperature: self.temperature,
            language: self.language.clone(),
        })
    }
}

/// Request for the create translation operation (translates to English)
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    /// Audio to translate
    pub audio: FileSource,
    /// ID of the model to use (e.g. "whisper-1")
    pub model: ModelId,
    /// Text to guide the model's style; should be in English
    pub prompt: Option<String>,
    /// Output format: "json", "text", "srt", "verbose_json", or "vtt"
    pub response_format: Option<String>,
    /// Sampling temperature, 0 to 1
    pub temperature: Option<f64>,
}

impl Schema for TranslationRequest {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("file"),
        FieldSpec::required("model"),
        FieldSpec::optional("prompt"),
        FieldSpec::optional("response_format"),
        FieldSpec::optional("temperature"),
    ];
}

impl TranslationRequest {
    /// Request with the two required fields; all optional fields absent
    pub fn new(audio: FileSource, model: ModelId) -> Self {
        Self {
            audio,
            model,
            prompt: None,
            response_format: None,
            temperature: None,
        }
    }

    /// Builder for incremental construction
    pub fn builder() -> TranslationRequestBuilder {
        TranslationRequestBuilder::default()
    }
}

/// Builder of [`TranslationRequest`] instances
#[derive(Debug, Clone, Default)]
pub struct TranslationRequestBuilder {
    audio: Option<FileSource>,
    model: Option<ModelId>,
    prompt: Option<String>,
    response_format: Option<String>,
    temperature: Option<f64>,
}

impl TranslationRequestBuilder {
    /// Audio to translate
    pub fn audio(mut self, audio: FileSource) -> Self {
        self.audio = Some(audio);
        self
    }

    /// ID of the model to use
    pub fn model(mut self, model: ModelId) -> Self {
        self.model = Some(model);
        self
    }

    /// Text to guide the model's style
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Output format
    pub fn response_format(mut self, response_format: impl Into<String>) -> Self {
        self.response_format = Some(response_format.into());
        self
    }

    /// Sampling temperature, 0 to 1
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Finalize into an immutable [`TranslationRequest`]
    pub fn build(&self) -> Result<TranslationRequest, ValidationError> {
        Ok(TranslationRequest {
            audio: require::<TranslationRequest, _>("file", &self.audio)?,
            model: require::<TranslationRequest, _>("model", &self.model)?,
            prompt: self.prompt.clone(),
            response_format: self.response_format.clone(),
            temperature: self.temperature,
        })
    }
}

/// Segment-level detail in a verbose response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment ID
    pub id: u32,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Text for this segment
    pub text: String,
}

/// Response of the create transcription operation.
///
/// Only `text` is present for the default "json" format; the rest arrives
/// with "verbose_json".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    /// Transcribed text
    pub text: String,
    /// Detected or supplied language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Audio duration in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Segment-level detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
}

/// Response of the create translation operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    /// Translated text, in English
    pub text: String,
    /// Source language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Audio duration in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Segment-level detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
}
