//! Error types for the conversational core.

/// Errors surfaced at the boundary between the core and its renderer.
///
/// Sending and resolving never fail; these cover draft validation and
/// lookups by id or index.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("session not found: {0}")]
    SessionNotFound(String),
    #[error("attachment index {index} out of range for {len} attachments")]
    AttachmentOutOfRange { index: usize, len: usize },
    #[error("suggestion {index} out of range for {len} suggestions")]
    SuggestionOutOfRange { index: usize, len: usize },
}
