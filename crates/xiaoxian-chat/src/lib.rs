//! Conversation core for the Xiaoxian assistant demo.
//!
//! Provides the keyword rule table that synthesises assistant replies, the
//! session store that owns every transcript, the composer that turns a draft
//! into a send, and the static catalogues shown on the task and admin tabs.

pub mod composer;
pub mod controller;
pub mod dashboard;
pub mod error;
pub mod fixtures;
pub mod resolver;
pub mod rules;
pub mod store;
pub mod suggestions;
pub mod task_center;

pub use composer::{truncate_file_name, Attachment, Composer, FileKind, OutgoingMessage};
pub use controller::{AppEvent, ChatController, ViewState};
pub use dashboard::AdminDashboard;
pub use error::ChatError;
pub use resolver::{Reply, ResolveInput, ResponseResolver, ResponseRule};
pub use store::{session_title, SendOutcome, SessionStore};
pub use suggestions::follow_up_questions;
pub use task_center::{TaskCenter, TaskFile, TaskStatus};
