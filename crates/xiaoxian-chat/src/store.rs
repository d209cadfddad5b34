//! Session store: the single owner of every transcript.
//!
//! All mutation goes through [`SessionStore::send`], [`SessionStore::select`],
//! [`SessionStore::reset`] and [`SessionStore::set_active_tab`]. Renderers
//! only read.

use std::sync::Arc;

use xiaoxian_core::{
    ChatConfig, ChatSession, Clock, IdGenerator, Message, SessionOrder, SystemClock, TabType, Tool,
};

use crate::error::ChatError;
use crate::resolver::ResponseResolver;

/// Result of a [`SessionStore::send`].
#[derive(Debug, Clone, PartialEq)]
pub struct SendOutcome {
    /// Session the pair was appended to.
    pub session_id: String,
    /// Whether the send created that session.
    pub created: bool,
    /// The assistant reply that was appended.
    pub reply: Message,
}

/// Ordered chat sessions plus the active-session pointer and active tab.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Vec<ChatSession>,
    active_session_id: Option<String>,
    active_tab: TabType,
    resolver: ResponseResolver,
    ids: IdGenerator,
    clock: Arc<dyn Clock>,
    config: ChatConfig,
}

impl SessionStore {
    /// Create an empty store on the system clock.
    pub fn new(config: ChatConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an empty store on the given clock.
    pub fn with_clock(config: ChatConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Vec::new(),
            active_session_id: None,
            active_tab: TabType::default(),
            resolver: ResponseResolver::new(),
            ids: IdGenerator::new(),
            clock,
            config,
        }
    }

    /// Replace the response rule table.
    pub fn with_resolver(mut self, resolver: ResponseResolver) -> Self {
        self.resolver = resolver;
        self
    }

    // -----------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------

    /// Append a user message and its synthesised reply.
    ///
    /// Goes to the active session if there is one, otherwise a new session
    /// titled after `text` is created, put at the front and made active.
    /// Both messages are built before any state changes, so observers only
    /// ever see complete pairs.
    pub fn send(&mut self, text: &str, tool: Option<&Tool>) -> SendOutcome {
        let user_message = Message::user(self.next_id(), text, self.display_time());
        let reply = self
            .resolver
            .resolve(text, tool, self.next_id(), self.display_time());
        let now = self.clock.now_millis();

        let existing = self
            .active_session_id
            .as_deref()
            .and_then(|id| self.sessions.iter().position(|s| s.id == id));

        let outcome = match existing {
            Some(index) => {
                let session = &mut self.sessions[index];
                session.messages.push(user_message);
                session.messages.push(reply.clone());
                session.updated_at = now;
                tracing::debug!(
                    session_id = %session.id,
                    messages = session.messages.len(),
                    "Appended message pair"
                );
                SendOutcome {
                    session_id: session.id.clone(),
                    created: false,
                    reply,
                }
            }
            None => {
                let session = ChatSession {
                    id: self.next_id(),
                    title: session_title(
                        text,
                        self.config.title_max_chars,
                        &self.config.title_ellipsis,
                    ),
                    messages: vec![user_message, reply.clone()],
                    updated_at: now,
                };
                let session_id = session.id.clone();
                tracing::info!(session_id = %session_id, title = %session.title, "Created chat session");
                self.sessions.insert(0, session);
                self.active_session_id = Some(session_id.clone());
                SendOutcome {
                    session_id,
                    created: true,
                    reply,
                }
            }
        };

        if self.config.session_order == SessionOrder::Recent {
            // Stable, so sessions updated in the same millisecond keep their order.
            self.sessions
                .sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        }

        outcome
    }

    /// Make `id` the active session and switch to the conversation tab.
    ///
    /// An unknown id clears the active session instead, so the view lands
    /// on the new-chat screen, and is reported as
    /// [`ChatError::SessionNotFound`].
    pub fn select(&mut self, id: &str) -> Result<(), ChatError> {
        self.active_tab = TabType::Xiaoxian;
        if self.sessions.iter().any(|s| s.id == id) {
            tracing::debug!(session_id = %id, "Selected session");
            self.active_session_id = Some(id.to_string());
            Ok(())
        } else {
            tracing::warn!(session_id = %id, "Selected unknown session; clearing active session");
            self.active_session_id = None;
            Err(ChatError::SessionNotFound(id.to_string()))
        }
    }

    /// Leave the active session and return to the conversation tab.
    ///
    /// No session is removed.
    pub fn reset(&mut self) {
        tracing::debug!(previous = ?self.active_session_id, "Reset to new chat");
        self.active_session_id = None;
        self.active_tab = TabType::Xiaoxian;
    }

    pub fn set_active_tab(&mut self, tab: TabType) {
        tracing::debug!(from = %self.active_tab, to = %tab, "Switched tab");
        self.active_tab = tab;
    }

    // -----------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------

    /// All sessions in sidebar order.
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn session(&self, id: &str) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn active_session_id(&self) -> Option<&str> {
        self.active_session_id.as_deref()
    }

    pub fn active_session(&self) -> Option<&ChatSession> {
        self.active_session_id
            .as_deref()
            .and_then(|id| self.session(id))
    }

    pub fn active_tab(&self) -> TabType {
        self.active_tab
    }

    pub fn resolver(&self) -> &ResponseResolver {
        &self.resolver
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    // -- Private helpers --

    fn next_id(&self) -> String {
        self.ids.next(self.clock.as_ref())
    }

    fn display_time(&self) -> String {
        self.clock.format_now(&self.config.time_format)
    }
}

/// Session title: the first `max_chars` characters of `text`, with
/// `ellipsis` appended when anything was cut.
pub fn session_title(text: &str, max_chars: usize, ellipsis: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}{}", head, ellipsis)
    } else {
        head
    }
}

// =============================================================================
// Tests
// =============================================================================
