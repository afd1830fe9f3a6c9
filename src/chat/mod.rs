//! # Chat Module
//!
//! Wire types for the external AI proxy interface and the core-facing result
//! of a chat request.
//!
//! A request carries the shared access key, the NPC id (resolved server-side
//! to a system prompt and tool declarations), and the exact conversation log.
//! The response envelope either wraps one model message or an error string;
//! the dispatcher converts either shape into a [`ChatResult`] event payload so
//! the core always sees a well-formed completion.

pub mod client;

pub use client::{ChatService, HttpChatService, ScriptedChatService};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which side of the conversation authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A function invocation requested by the model.
///
/// `args` is an opaque, loosely-typed payload; the action resolver is the only
/// place that inspects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

/// The acknowledgment payload describing an action's outcome, sent back to
/// the model as part of the next request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    pub response: Value,
}

/// One piece of a message: plain text, a function call, or a function
/// response. Serializes externally tagged in camelCase, matching the proxy
/// wire format (`{"text": ...}`, `{"functionCall": ...}`,
/// `{"functionResponse": ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    Text(String),
    FunctionCall(FunctionCall),
    FunctionResponse(FunctionResponse),
}

/// One conversation entry in the log sent to the AI service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Message {
    /// Creates a plain-text user message.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::Text(text.into())],
        }
    }

    /// Creates a plain-text model message.
    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part::Text(text.into())],
        }
    }

    /// Creates the user-role message carrying a function response back to the
    /// model.
    pub fn function_response(name: impl Into<String>, response: Value) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::FunctionResponse(FunctionResponse {
                name: name.into(),
                response,
            })],
        }
    }

    /// Returns the first function call carried by this message, if any.
    pub fn function_call(&self) -> Option<&FunctionCall> {
        self.parts.iter().find_map(|part| match part {
            Part::FunctionCall(call) => Some(call),
            _ => None,
        })
    }

    /// Returns the concatenated text parts of this message.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

/// One chat request to the AI proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub access_key: String,
    pub npc_id: String,
    pub contents: Vec<Message>,
}

/// The successful payload of a chat response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    pub content: Message,
}

/// The response envelope returned by the AI proxy.
///
/// On success `response` is populated; on failure `error` is. An invalid
/// access key surfaces as a failure with no further detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    /// Collapses the envelope into the core-facing result. A success envelope
    /// missing its payload counts as a failure; the core must never receive a
    /// half-formed completion.
    pub fn into_result(self) -> ChatResult {
        if self.success {
            match self.response {
                Some(body) => ChatResult::Success(body.content),
                None => ChatResult::Failure("empty success response".to_string()),
            }
        } else {
            ChatResult::Failure(
                self.error
                    .unwrap_or_else(|| "unspecified chat error".to_string()),
            )
        }
    }
}

/// Outcome of a chat request as the core consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatResult {
    /// The model produced one reply message
    Success(Message),
    /// The request failed; the dialog is abandoned
    Failure(String),
}
