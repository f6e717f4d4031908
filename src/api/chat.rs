//! Chat completion request and response types

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::ModelId;
use super::schema::{require, FieldSpec, Schema};
use crate::error::{DeserializationError, ValidationError};

/// The role of the author of a message.
///
/// Kept open (a newtype over the wire string rather than a closed enum) so
/// responses carrying roles introduced after this crate still deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatRole(pub String);

impl ChatRole {
    /// System instruction author
    pub const SYSTEM: &'static str = "system";
    /// End-user author
    pub const USER: &'static str = "user";
    /// Model author
    pub const ASSISTANT: &'static str = "assistant";
    /// Function-result author
    pub const FUNCTION: &'static str = "function";

    /// System role
    pub fn system() -> Self {
        Self(Self::SYSTEM.to_string())
    }

    /// User role
    pub fn user() -> Self {
        Self(Self::USER.to_string())
    }

    /// Assistant role
    pub fn assistant() -> Self {
        Self(Self::ASSISTANT.to_string())
    }

    /// Function role
    pub fn function() -> Self {
        Self(Self::FUNCTION.to_string())
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChatRole {
    fn from(role: &str) -> Self {
        Self(role.to_string())
    }
}

impl From<String> for ChatRole {
    fn from(role: String) -> Self {
        Self(role)
    }
}

/// The name and arguments of a function call generated by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the function to call
    pub name: String,
    /// Arguments as a JSON-encoded string, as produced by the model
    pub arguments: String,
}

impl FunctionCall {
    /// Create a function call payload
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Decode the argument string into a JSON value.
    ///
    /// The model emits arguments as an embedded JSON document; it is not
    /// guaranteed to be valid JSON.
    pub fn arguments_json(&self) -> Result<serde_json::Value, DeserializationError> {
        serde_json::from_str(&self.arguments)
            .map_err(|e| DeserializationError::new("FunctionCall.arguments", e))
    }
}

/// A message to generate chat completions for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the author of this message
    pub role: ChatRole,
    /// The contents of the message; absent for a pure function-call message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// The name of the author of this message.
    ///
    /// Required by the API when `role` is `function`, in which case it names
    /// the function whose response is in `content`. May contain a-z, A-Z,
    /// 0-9, and underscores, with a maximum length of 64 characters. The
    /// server enforces this; the client stays permissive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// A function invocation issued by the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

impl Schema for ChatMessage {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("role"),
        FieldSpec::optional("content"),
        FieldSpec::optional("name"),
        FieldSpec::optional("function_call"),
    ];
}

impl ChatMessage {
    /// Message with only a role; all optional fields absent
    pub fn new(role: ChatRole) -> Self {
        Self {
            role,
            content: None,
            name: None,
            function_call: None,
        }
    }

    /// User message with text content
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::new(ChatRole::user())
        }
    }

    /// System message with text content
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::new(ChatRole::system())
        }
    }

    /// Assistant message with text content
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::new(ChatRole::assistant())
        }
    }

    /// Builder for incremental construction
    pub fn builder() -> ChatMessageBuilder {
        ChatMessageBuilder::default()
    }
}

/// Builder of [`ChatMessage`] instances.
///
/// Slots default to absent; `build` validates that `role` is set. The builder
/// stays usable afterwards, so further configuration and additional `build`
/// calls produce further independent messages.
#[derive(Debug, Clone, Default)]
pub struct ChatMessageBuilder {
    role: Option<ChatRole>,
    content: Option<String>,
    name: Option<String>,
    function_call: Option<FunctionCall>,
}

impl ChatMessageBuilder {
    /// The role of the author of this message
    pub fn role(mut self, role: ChatRole) -> Self {
        self.role = Some(role);
        self
    }

    /// The contents of the message
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// The name of the author of this message
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// A function invocation issued by the model
    pub fn function_call(mut self, function_call: FunctionCall) -> Self {
        self.function_call = Some(function_call);
        self
    }

    /// Finalize into an immutable [`ChatMessage`]
    pub fn build(&self) -> Result<ChatMessage, ValidationError> {
        Ok(ChatMessage {
            role: require::<ChatMessage, _>("role", &self.role)?,
            content: self.content.clone(),
            name: self.name.clone(),
            function_call: self.function_call.clone(),
        })
    }
}

/// A function the model may call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionFunction {
    /// Function name; the API applies the same charset rule as message names
    pub name: String,
    /// What the function does, used by the model to decide when to call it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameters as a JSON Schema object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// Controls how the model responds to function calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionMode {
    /// The model does not call a function
    None,
    /// The model picks between responding and calling a function
    Auto,
    /// Force a call to the named function
    #[serde(untagged)]
    Named {
        /// Name of the function to call
        name: String,
    },
}

/// Request for the create chat completion operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// ID of the model to use
    pub model: ModelId,
    /// The messages to generate chat completions for
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature, 0 to 2
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling mass, 0 to 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Number of choices to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    /// Up to 4 sequences where the API stops generating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Presence penalty, -2 to 2
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    /// Frequency penalty, -2 to 2
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    /// Token-ID to bias mapping, -100 to 100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<HashMap<String, f64>>,
    /// End-user identifier for abuse monitoring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Functions the model may call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<ChatCompletionFunction>>,
    /// Function-call mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionMode>,
}

impl Schema for ChatCompletionRequest {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("model"),
        FieldSpec::required("messages"),
        FieldSpec::optional("temperature"),
        FieldSpec::optional("top_p"),
        FieldSpec::optional("n"),
        FieldSpec::optional("stop"),
        FieldSpec::optional("max_tokens"),
        FieldSpec::optional("presence_penalty"),
        FieldSpec::optional("frequency_penalty"),
        FieldSpec::optional("logit_bias"),
        FieldSpec::optional("user"),
        FieldSpec::optional("functions"),
        FieldSpec::optional("function_call"),
    ];
}

impl ChatCompletionRequest {
    /// Request with the two required fields; all optional fields absent
    pub fn new(model: ModelId, messages: Vec<ChatMessage>) -> Self {
        Self {
            model,
            messages,
            temperature: None,
            top_p: None,
            n: None,
            stop: None,
            max_tokens: None,
            presence_penalty: None,
            frequency_penalty: None,
            logit_bias: None,
            user: None,
            functions: None,
            function_call: None,
        }
    }

    /// Builder for incremental construction
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::default()
    }
}

/// Builder of [`ChatCompletionRequest`] instances
#[derive(Debug, Clone, Default)]
pub struct ChatCompletionRequestBuilder {
    model: Option<ModelId>,
    messages: Option<Vec<ChatMessage>>,
    temperature: Option<f64>,
    top_p: Option<f64>,
    n: Option<u32>,
    stop: Option<Vec<String>>,
    max_tokens: Option<u32>,
    presence_penalty: Option<f64>,
    frequency_penalty: Option<f64>,
    logit_bias: Option<HashMap<String, f64>>,
    user: Option<String>,
    functions: Option<Vec<ChatCompletionFunction>>,
    function_call: Option<FunctionMode>,
}

impl ChatCompletionRequestBuilder {
    /// ID of the model to use
    pub fn model(mut self, model: ModelId) -> Self {
        self.model = Some(model);
        self
    }

    /// The messages to generate chat completions for
    pub fn messages(mut self, messages: Vec<ChatMessage>) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Append one message
    pub fn message(mut self, message: ChatMessage) -> Self {
        self.messages.get_or_insert_with(Vec::new).push(message);
        self
    }

    /// Sampling temperature, 0 to 2
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Nucleus sampling mass, 0 to 1
    pub fn top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Number of choices to generate
    pub fn n(mut self, n: u32) -> Self {
        self.n = Some(n);
        self
    }

    /// Stop sequences
    pub fn stop(mut self, stop: Vec<String>) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Maximum number of tokens to generate
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Presence penalty, -2 to 2
    pub fn presence_penalty(mut self, presence_penalty: f64) -> Self {
        self.presence_penalty = Some(presence_penalty);
        self
    }

    /// Frequency penalty, -2 to 2
    pub fn frequency_penalty(mut self, frequency_penalty: f64) -> Self {
        self.frequency_penalty = Some(frequency_penalty);
        self
    }

    /// Token-ID to bias mapping
    pub fn logit_bias(mut self, logit_bias: HashMap<String, f64>) -> Self {
        self.logit_bias = Some(logit_bias);
        self
    }

    /// End-user identifier
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Functions the model may call
    pub fn functions(mut self, functions: Vec<ChatCompletionFunction>) -> Self {
        self.functions = Some(functions);
        self
    }

    /// Function-call mode
    pub fn function_call(mut self, function_call: FunctionMode) -> Self {
        self.function_call = Some(function_call);
        self
    }

    /// Finalize into an immutable [`ChatCompletionRequest`]
    pub fn build(&self) -> Result<ChatCompletionRequest, ValidationError> {
        Ok(ChatCompletionRequest {
            model: require::<ChatCompletionRequest, _>("model", &self.model)?,
            messages: require::<ChatCompletionRequest, _>("messages", &self.messages)?,
            temperature: self.temperature,
            top_p: self.top_p,
            n: self.n,
            stop: self.stop.clone(),
            max_tokens: self.max_tokens,
            presence_penalty: self.presence_penalty,
            frequency_penalty: self.frequency_penalty,
            logit_bias: self.logit_bias.clone(),
            user: self.user.clone(),
            functions: self.functions.clone(),
            function_call: self.function_call.clone(),
        })
    }
}

/// The reason the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinishReason(pub String);

impl FinishReason {
    /// Natural stop or stop sequence hit
    pub const STOP: &'static str = "stop";
    /// Token limit reached
    pub const LENGTH: &'static str = "length";
    /// The model issued a function call
    pub const FUNCTION_CALL: &'static str = "function_call";
}

/// Token accounting for one completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the generated completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u32>,
    /// Prompt plus completion
    pub total_tokens: u32,
}

/// One generated completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice {
    /// Position within the response
    pub index: u32,
    /// The generated message
    pub message: ChatMessage,
    /// Why generation stopped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

/// Response of the create chat completion operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    /// Unique completion ID
    pub id: String,
    /// Creation time, seconds since the epoch
    pub created: u64,
    /// Model that produced the completion
    pub model: ModelId,
    /// Generated choices
    pub choices: Vec<ChatChoice>,
    /// Token accounting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}
