//! # OpenAI-RS
//!
//! A typed Rust client for the OpenAI API: chat completions, audio
//! transcription and translation, file uploads, and models.
//!
//! The heart of the crate is the [`api`] module — immutable request and
//! response records mirroring the JSON wire schema, with builders that
//! validate required fields before construction. The [`client`] module is a
//! thin transport on top: it consumes built records and handles routing,
//! authentication, retries, and response decoding.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use openai_rs::api::{ChatCompletionRequest, ChatMessage, ModelId};
//! use openai_rs::client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::from_env()?;
//!
//!     let request = ChatCompletionRequest::builder()
//!         .model(ModelId::from("gpt-4"))
//!         .message(ChatMessage::system("You are a helpful assistant."))
//!         .message(ChatMessage::user("Hello, how are you?"))
//!         .build()?;
//!
//!     let completion = client.chat_completion(&request).await?;
//!     if let Some(content) = &completion.choices[0].message.content {
//!         println!("{content}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Transcription
//!
//! ```rust,no_run
//! use openai_rs::api::{FileSource, ModelId, TranscriptionRequest};
//! use openai_rs::client::Client;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::from_env()?;
//! let request = TranscriptionRequest::new(
//!     FileSource::path("micro-machines.wav"),
//!     ModelId::from("whisper-1"),
//! );
//! let transcription = client.transcription(&request).await?;
//! println!("{}", transcription.text);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod error;

// Re-exports for convenience
pub use client::{Client, ClientConfig, ConfigBuilder};
pub use error::{DeserializationError, OpenAIError, Result, ValidationError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.contains('.'));
    }
}
