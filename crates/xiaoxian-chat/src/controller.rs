//! Event-driven front door to the conversation core.
//!
//! A renderer sends [`AppEvent`]s to [`ChatController::dispatch`] and draws
//! whatever [`ChatController::snapshot`] returns. It never touches the store
//! or the draft directly.

use serde::Serialize;
use xiaoxian_core::{ChatSession, TabType, Tool, XiaoxianConfig};

use crate::composer::{Attachment, Composer};
use crate::error::ChatError;
use crate::store::{SendOutcome, SessionStore};
use crate::suggestions::follow_up_questions;

/// Everything the user can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Send text directly, bypassing the draft.
    SendMessage { text: String, tool: Option<Tool> },
    /// Send the current draft.
    SubmitDraft,
    /// Send the n-th follow-up suggestion with the selected tool. The draft
    /// is left as it is.
    AskSuggestion(usize),
    SelectSession(String),
    ResetToNewChat,
    SetActiveTab(TabType),
    /// `None` deselects the current tool.
    SelectTool(Option<Tool>),
    SetDraft(String),
    Attach(Vec<Attachment>),
    RemoveAttachment(usize),
}

/// Read-only view of the whole UI state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub sessions: Vec<ChatSession>,
    pub active_session_id: Option<String>,
    pub active_session: Option<ChatSession>,
    pub active_tab: TabType,
    pub selected_tool: Option<Tool>,
    pub draft: String,
    pub attachments: Vec<Attachment>,
    pub suggestions: Vec<String>,
    pub can_send: bool,
}

impl ViewState {
    /// True when the conversation tab should show the welcome screen.
    pub fn is_new_chat(&self) -> bool {
        self.active_session.is_none()
    }
}

/// Owns the session store and the draft.
#[derive(Debug)]
pub struct ChatController {
    store: SessionStore,
    composer: Composer,
}

impl ChatController {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            composer: Composer::new(),
        }
    }

    /// Controller on the system clock, configured from `config`.
    pub fn from_config(config: &XiaoxianConfig) -> Self {
        Self::new(SessionStore::new(config.chat.clone()))
    }

    /// Apply one event.
    ///
    /// Returns the send outcome for events that append messages.
    pub fn dispatch(&mut self, event: AppEvent) -> Result<Option<SendOutcome>, ChatError> {
        match event {
            AppEvent::SendMessage { text, tool } => {
                Ok(Some(self.store.send(&text, tool.as_ref())))
            }
            AppEvent::SubmitDraft => {
                let outgoing = self.composer.take_outgoing()?;
                Ok(Some(
                    self.store.send(&outgoing.content, outgoing.tool.as_ref()),
                ))
            }
            AppEvent::AskSuggestion(index) => {
                let tool = self.composer.tool().cloned();
                let suggestions = follow_up_questions(tool.as_ref());
                let text = suggestions.get(index).ok_or(ChatError::SuggestionOutOfRange {
                    index,
                    len: suggestions.len(),
                })?;
                Ok(Some(self.store.send(text, tool.as_ref())))
            }
            AppEvent::SelectSession(id) => self.store.select(&id).map(|()| None),
            AppEvent::ResetToNewChat => {
                self.store.reset();
                Ok(None)
            }
            AppEvent::SetActiveTab(tab) => {
                self.store.set_active_tab(tab);
                Ok(None)
            }
            AppEvent::SelectTool(Some(tool)) => {
                self.composer.select_tool(tool);
                Ok(None)
            }
            AppEvent::SelectTool(None) => {
                self.composer.clear_tool();
                Ok(None)
            }
            AppEvent::SetDraft(text) => {
                self.composer.set_text(text);
                Ok(None)
            }
            AppEvent::Attach(files) => {
                tracing::debug!(count = files.len(), "Attached files");
                self.composer.attach(files);
                Ok(None)
            }
            AppEvent::RemoveAttachment(index) => {
                self.composer.remove_attachment(index).map(|_| None)
            }
        }
    }

    pub fn snapshot(&self) -> ViewState {
        let selected_tool = self.composer.tool().cloned();
        ViewState {
            sessions: self.store.sessions().to_vec(),
            active_session_id: self.store.active_session_id().map(str::to_string),
            active_session: self.store.active_session().cloned(),
            active_tab: self.store.active_tab(),
            suggestions: follow_up_questions(selected_tool.as_ref())
                .iter()
                .map(|s| s.to_string())
                .collect(),
            selected_tool,
            draft: self.composer.text().to_string(),
            attachments: self.composer.attachments().to_vec(),
            can_send: self.composer.can_send(),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }
}

// =============================================================================
// Tests
// =============================================================================
