//! Request and response model layer
//!
//! Immutable records mirroring the API's JSON wire schema, plus builders that
//! accumulate optional fields and validate required ones at finalization.
//! Absent optional fields are omitted from serialized output entirely, never
//! emitted as null. Nothing in this module performs I/O.

pub mod audio;
pub mod chat;
pub mod file;
pub mod model;
pub mod schema;


pub use audio::{
    Segment, Transcription, TranscriptionRequest, TranscriptionRequestBuilder, Translation,
    TranslationRequest, TranslationRequestBuilder,
};
pub use chat::{
    ChatChoice, ChatCompletion, ChatCompletionFunction, ChatCompletionRequest,
    ChatCompletionRequestBuilder, ChatMessage, ChatMessageBuilder, ChatRole, FinishReason,
    FunctionCall, FunctionMode, Usage,
};
pub use file::{File, FileId, FilePayload, FileSource, FileUpload, FileUploadBuilder, Purpose};
pub use model::{DeleteResponse, ListResponse, Model, ModelId};
pub use schema::{FieldSpec, Schema};
