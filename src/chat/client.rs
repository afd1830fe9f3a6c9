//! # Chat Clients
//!
//! The `ChatService` seam between the dispatcher and the AI proxy, with an
//! HTTP implementation for real sessions and a scripted one for offline runs
//! and tests.

use crate::chat::{ChatRequest, ChatResponse, ChatResult, Message};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

/// A service that turns one chat request into one result.
///
/// Implementations must never fail at the type level: transport and protocol
/// errors are folded into [`ChatResult::Failure`] so the core always receives
/// a well-formed completion event.
pub trait ChatService: Send + Sync {
    /// Sends one request and resolves to its outcome.
    fn send(&self, request: ChatRequest) -> impl Future<Output = ChatResult> + Send;
}

/// Chat service backed by the HTTP proxy in front of the generative-AI API.
///
/// The proxy resolves the NPC id to its system prompt and tool declarations
/// and checks the shared access key; an invalid key comes back as an ordinary
/// failure envelope with no further detail.
pub struct HttpChatService {
    endpoint: String,
    access_key: String,
    client: reqwest::Client,
}

impl HttpChatService {
    /// Creates a service posting to the given proxy endpoint.
    pub fn new(endpoint: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            client: reqwest::Client::new(),
        }
    }
}

impl ChatService for HttpChatService {
    async fn send(&self, mut request: ChatRequest) -> ChatResult {
        request.access_key = self.access_key.clone();
        let response = match self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                log::warn!("chat request transport failure: {}", error);
                return ChatResult::Failure(error.to_string());
            }
        };
        let envelope: ChatResponse = match response.json().await {
            Ok(envelope) => envelope,
            Err(error) => {
                log::warn!("chat response decode failure: {}", error);
                return ChatResult::Failure(error.to_string());
            }
        };
        envelope.into_result()
    }
}

/// Chat service that replays a fixed queue of results, then falls back to a
/// canned text reply. Used by the offline demo mode and by tests.
pub struct ScriptedChatService {
    replies: Mutex<VecDeque<ChatResult>>,
    fallback: String,
}

impl ScriptedChatService {
    /// Creates a service that replays `replies` in order.
    pub fn new(replies: Vec<ChatResult>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fallback: "Hmm. Tell me more.".to_string(),
        }
    }

    /// Sets the text returned once the scripted replies run out.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }
}

impl ChatService for ScriptedChatService {
    async fn send(&self, _request: ChatRequest) -> ChatResult {
        let next = match self.replies.lock() {
            Ok(mut queue) => queue.pop_front(),
            Err(_) => None,
        };
        next.unwrap_or_else(|| ChatResult::Success(Message::model_text(&self.fallback)))
    }
}
