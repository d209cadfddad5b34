use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::XiaoxianError;

// =============================================================================
// Enums
// =============================================================================

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Payload shape of a message, used by renderers to pick a widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Plain text bubble.
    #[default]
    Text,
    /// A single order rendered as a rich card.
    OrderCard,
    /// An aggregate of matching orders with a link to the order center.
    OrderSummary,
}

/// Top-level view selected in the sidebar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabType {
    /// The assistant conversation view.
    #[default]
    Xiaoxian,
    /// The task center listing processed files.
    Tasks,
    /// The admin dashboard.
    Admin,
}

impl fmt::Display for TabType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabType::Xiaoxian => write!(f, "xiaoxian"),
            TabType::Tasks => write!(f, "tasks"),
            TabType::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for TabType {
    type Err = XiaoxianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xiaoxian" | "chat" => Ok(TabType::Xiaoxian),
            "tasks" | "task" => Ok(TabType::Tasks),
            "admin" => Ok(TabType::Admin),
            other => Err(XiaoxianError::Config(format!("unknown tab: {}", other))),
        }
    }
}

/// A user-selected mode that biases response selection.
///
/// Serialised as the tool's display name, which is also what the input chips
/// show.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tool {
    /// 订单查询
    OrderQuery,
    /// 文件处理
    FileProcessing,
    /// Any other tool, carried by name.
    Other(String),
}

impl Tool {
    pub const ORDER_QUERY_NAME: &'static str = "订单查询";
    pub const FILE_PROCESSING_NAME: &'static str = "文件处理";

    /// Display name of the tool.
    pub fn name(&self) -> &str {
        match self {
            Tool::OrderQuery => Self::ORDER_QUERY_NAME,
            Tool::FileProcessing => Self::FILE_PROCESSING_NAME,
            Tool::Other(name) => name,
        }
    }

    /// Tools offered as chips under the input box.
    pub fn builtin() -> [Tool; 2] {
        [Tool::OrderQuery, Tool::FileProcessing]
    }

    /// A name that is empty or only whitespace selects nothing.
    pub fn is_blank(&self) -> bool {
        self.name().trim().is_empty()
    }

    /// Look up a tool by name; blank names mean "no tool".
    ///
    /// Names are compared exactly, so a padded `" 订单查询 "` is some other
    /// tool rather than order query.
    pub fn from_name(name: &str) -> Option<Tool> {
        Some(Tool::from(name)).filter(|t| !t.is_blank())
    }
}

impl From<&str> for Tool {
    fn from(name: &str) -> Self {
        match name {
            Self::ORDER_QUERY_NAME => Tool::OrderQuery,
            Self::FILE_PROCESSING_NAME => Tool::FileProcessing,
            other => Tool::Other(other.to_string()),
        }
    }
}

impl From<String> for Tool {
    fn from(name: String) -> Self {
        Tool::from(name.as_str())
    }
}

impl From<Tool> for String {
    fn from(tool: Tool) -> Self {
        tool.name().to_string()
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Order payloads
// =============================================================================

/// One line item of an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Thumbnail URL.
    pub image: String,
    pub title: String,
    /// SKU description (size, colour, ...).
    pub sku: String,
    /// Unit price as displayed, e.g. `"135.00"`.
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Display payload for a single order card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    pub date: String,
    pub order_id: String,
    pub shop_name: String,
    pub status: String,
    pub items: Vec<OrderItem>,
    pub total_amount: String,
    pub shipping_fee: String,
    /// Buttons offered on the card, e.g. `修改地址`.
    pub actions: Vec<String>,
}

/// Aggregate over the orders matching a query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryData {
    pub total: u32,
    pub date_range: String,
    pub categories: Vec<String>,
}

// =============================================================================
// Messages and sessions
// =============================================================================

/// A single transcript entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    /// Local wall-clock time, formatted for display (`HH:MM` by default).
    pub timestamp: String,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_data: Option<OrderData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_summary_data: Option<OrderSummaryData>,
}

impl Message {
    /// Build a plain text message from the user.
    pub fn user(id: impl Into<String>, content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::User,
            content: content.into(),
            timestamp: timestamp.into(),
            kind: MessageKind::Text,
            order_data: None,
            order_summary_data: None,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

/// One continuous conversation thread.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    /// Sidebar label derived from the first user message.
    pub title: String,
    pub messages: Vec<Message>,
    /// Epoch milliseconds of the last append.
    pub updated_at: i64,
}

impl ChatSession {
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
