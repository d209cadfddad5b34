//! The draft being written: text, selected tool and pending attachments.
//!
//! Attachments are opaque handles. Nothing is uploaded; their names are
//! folded into the outgoing text and the handles are dropped once the draft
//! is sent.

use serde::{Deserialize, Serialize};
use xiaoxian_core::Tool;

use crate::error::ChatError;

/// Marker placed in front of the attached file names.
const UPLOADED_FILES_LABEL: &str = "已上传文件";

// =============================================================================
// Attachments
// =============================================================================

/// Broad file category used to pick an icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// .xlsx, .xls, .csv
    Spreadsheet,
    Pdf,
    /// .doc, .docx
    Document,
    Other,
}

impl FileKind {
    /// Classify by file extension, case-insensitively.
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if [".xlsx", ".xls", ".csv"].iter().any(|ext| lower.ends_with(ext)) {
            FileKind::Spreadsheet
        } else if lower.ends_with(".pdf") {
            FileKind::Pdf
        } else if lower.ends_with(".doc") || lower.ends_with(".docx") {
            FileKind::Document
        } else {
            FileKind::Other
        }
    }
}

/// A file handle attached to the draft.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    pub size_bytes: u64,
    /// MIME type as reported by the picker, e.g. `image/png`.
    pub mime_type: String,
}

impl Attachment {
    pub fn new(name: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_name(&self.name)
    }

    /// Images get a thumbnail preview instead of an icon.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Name shortened to fit a chip of the given display width.
    pub fn display_name(&self, max_width: usize) -> String {
        truncate_file_name(&self.name, max_width)
    }

    /// Human-readable size, e.g. `2.4 MB`.
    pub fn display_size(&self) -> String {
        human_size(self.size_bytes)
    }
}

/// Shorten `name` for display.
///
/// Characters beyond U+00FF are counted as width 2, everything else as 1.
/// As soon as the running width exceeds `max_width`, the characters kept so
/// far are returned with `...` appended.
pub fn truncate_file_name(name: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut kept = String::new();
    for c in name.chars() {
        width += if u32::from(c) > 0xFF { 2 } else { 1 };
        if width > max_width {
            kept.push_str("...");
            return kept;
        }
        kept.push(c);
    }
    kept
}

/// Format a byte count with binary units.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

// =============================================================================
// Composer
// =============================================================================

/// A draft ready to be handed to the session store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub content: String,
    pub tool: Option<Tool>,
}

/// Input box state.
#[derive(Clone, Debug, Default)]
pub struct Composer {
    text: String,
    tool: Option<Tool>,
    attachments: Vec<Attachment>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Select `tool`. A blank-named tool clears the selection.
    pub fn select_tool(&mut self, tool: Tool) {
        if tool.is_blank() {
            self.clear_tool();
            return;
        }
        tracing::debug!(tool = %tool, "Tool selected");
        self.tool = Some(tool);
    }

    pub fn clear_tool(&mut self) {
        self.tool = None;
    }

    pub fn tool(&self) -> Option<&Tool> {
        self.tool.as_ref()
    }

    /// Add files to the draft, after any already attached.
    pub fn attach<I>(&mut self, files: I)
    where
        I: IntoIterator<Item = Attachment>,
    {
        self.attachments.extend(files);
    }

    /// Remove and return the attachment at `index`.
    pub fn remove_attachment(&mut self, index: usize) -> Result<Attachment, ChatError> {
        if index >= self.attachments.len() {
            return Err(ChatError::AttachmentOutOfRange {
                index,
                len: self.attachments.len(),
            });
        }
        Ok(self.attachments.remove(index))
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Whether there is anything to send: non-blank text or at least one file.
    pub fn can_send(&self) -> bool {
        !self.text.trim().is_empty() || !self.attachments.is_empty()
    }

    /// Build the outgoing message and clear the draft.
    ///
    /// The text is trimmed and attached file names are appended as
    /// `[已上传文件: a, b]`. The selected tool stays selected.
    pub fn take_outgoing(&mut self) -> Result<OutgoingMessage, ChatError> {
        if !self.can_send() {
            return Err(ChatError::EmptyMessage);
        }

        let text = self.text.trim();
        let content = if self.attachments.is_empty() {
            text.to_string()
        } else {
            let names = self
                .attachments
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            if text.is_empty() {
                format!("[{}: {}]", UPLOADED_FILES_LABEL, names)
            } else {
                format!("{} [{}: {}]", text, UPLOADED_FILES_LABEL, names)
            }
        };

        self.text.clear();
        self.attachments.clear();

        Ok(OutgoingMessage {
            content,
            tool: self.tool.clone(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
