//! Conversation state for the OceanMind assistant.
//!
//! A session owns an append-only, chronologically ordered transcript. Every
//! user turn produces exactly one model reply; backend failures surface as
//! fixed reply strings rather than errors, so a session can never lose a turn.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use oceanmind_core::{ChatMessage, Role};
use oceanmind_genai::{GenAiError, GenerativeClient, HistoryTurn};

/// Greeting appended as the first model message of every session.
pub const WELCOME_MESSAGE: &str = "Hello! I am OceanMind AI. Ask me about current ocean \
                                   conditions, specific alerts, or marine conservation.";

/// Reply when no API credential is configured.
pub const CREDENTIAL_MISSING_REPLY: &str = "API Key missing.";

/// Reply when the backend call fails.
pub const BACKEND_FAILURE_REPLY: &str = "Connection error.";

/// An ordered chat transcript bound to a generative backend.
pub struct ConversationSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    messages: Vec<ChatMessage>,
    history_window: usize,
    client: Option<Arc<dyn GenerativeClient>>,
}

impl ConversationSession {
    /// Starts a session containing only the welcome message.
    ///
    /// `history_window` bounds how many prior messages are replayed to the
    /// backend on each turn; zero means the full transcript.
    pub fn new(client: Option<Arc<dyn GenerativeClient>>, history_window: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            messages: vec![ChatMessage::new(Role::Model, WELCOME_MESSAGE)],
            history_window,
            client,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Appends a user message and returns the created record.
    pub fn append_user_turn(&mut self, text: impl Into<String>) -> ChatMessage {
        let message = ChatMessage::new(Role::User, text);
        self.messages.push(message.clone());
        message
    }

    /// Records a user turn and obtains the model reply for it.
    ///
    /// The transcript always grows by exactly two messages, user first, and
    /// the reply references only the transcript as it stood when the turn was
    /// recorded. This method never fails; error conditions become fixed reply
    /// text.
    pub async fn request_reply(&mut self, text: impl Into<String>) -> ChatMessage {
        let text = text.into();
        self.append_user_turn(&text);
        let history = self.history_for_backend();

        let reply = match &self.client {
            None => CREDENTIAL_MISSING_REPLY.to_string(),
            Some(client) => match client.converse(&history, &text).await {
                Ok(reply) => reply,
                Err(GenAiError::MissingCredential) => CREDENTIAL_MISSING_REPLY.to_string(),
                Err(err) => {
                    tracing::error!(session = %self.id, error = %err, "chat turn failed");
                    BACKEND_FAILURE_REPLY.to_string()
                }
            },
        };

        let message = ChatMessage::new(Role::Model, reply);
        self.messages.push(message.clone());
        message
    }

    /// History turns to replay to the backend, excluding the user message of
    /// the turn in flight (it travels separately as the new message).
    fn history_for_backend(&self) -> Vec<HistoryTurn> {
        let prior = &self.messages[..self.messages.len().saturating_sub(1)];
        let window = if self.history_window == 0 {
            prior
        } else {
            let start = prior.len().saturating_sub(self.history_window);
            &prior[start..]
        };
        window
            .iter()
            .map(|m| HistoryTurn {
                role: m.role,
                text: m.text.clone(),
            })
            .collect()
    }
}
