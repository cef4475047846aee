//! Conversation sessions for the OceanMind assistant.

pub mod session;

pub use session::{
    ConversationSession, BACKEND_FAILURE_REPLY, CREDENTIAL_MISSING_REPLY, WELCOME_MESSAGE,
};
