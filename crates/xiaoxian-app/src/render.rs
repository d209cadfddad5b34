//! Plain-text rendering of the view state for the terminal.

use std::fmt::Write;

use xiaoxian_chat::dashboard::AdminDashboard;
use xiaoxian_chat::{Attachment, FileKind, TaskFile, ViewState};
use xiaoxian_core::{ChatSession, Message, MessageKind, OrderData, OrderSummaryData, TabType, Tool};

const ASSISTANT_NAME: &str = "小仙";

/// Greeting shown when no session is active.
pub const WELCOME: &str = "你好，我是小仙，你的智能采购助手。选择一个工具开始吧！";

pub fn message(msg: &Message) -> String {
    let speaker = if msg.is_user() { "你" } else { ASSISTANT_NAME };
    let mut out = format!("[{}] {}: {}", msg.timestamp, speaker, msg.content);
    match msg.kind {
        MessageKind::Text => {}
        MessageKind::OrderCard => {
            if let Some(order) = &msg.order_data {
                out.push('\n');
                out.push_str(&order_card(order));
            }
        }
        MessageKind::OrderSummary => {
            if let Some(summary) = &msg.order_summary_data {
                out.push('\n');
                out.push_str(&order_summary(summary));
            }
        }
    }
    out
}

pub fn order_card(order: &OrderData) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  ┌ {}  订单号: {}", order.date, order.order_id);
    let _ = writeln!(out, "  │ {}  [{}]", order.shop_name, order.status);
    for item in &order.items {
        let _ = write!(out, "  │ {} ({}) ¥{} x{}", item.title, item.sku, item.price, item.quantity);
        if let Some(original) = &item.original_price {
            let _ = write!(out, " 原价¥{}", original);
        }
        if !item.tags.is_empty() {
            let _ = write!(out, " {}", item.tags.join("/"));
        }
        out.push('\n');
    }
    let _ = writeln!(out, "  │ 实付款 ¥{} (含运费 ¥{})", order.total_amount, order.shipping_fee);
    let _ = write!(out, "  └ {}", order.actions.join(" | "));
    out
}

pub fn order_summary(summary: &OrderSummaryData) -> String {
    format!(
        "  ▸ {} 笔订单 · {} · {}",
        summary.total,
        summary.date_range,
        summary.categories.join("、")
    )
}

/// Icon shown in front of an attachment chip.
pub fn attachment_icon(attachment: &Attachment) -> &'static str {
    if attachment.is_image() {
        return "[图]";
    }
    match attachment.kind() {
        FileKind::Spreadsheet => "[表]",
        FileKind::Pdf => "[PDF]",
        FileKind::Document => "[文]",
        FileKind::Other => "[件]",
    }
}

/// Numbered follow-up questions, as picked by `/ask <n>`.
pub fn suggestions(items: &[String]) -> String {
    let numbered = items
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}.{}", i + 1, q))
        .collect::<Vec<_>>()
        .join(" / ");
    format!("猜你想问: {}", numbered)
}

/// Tool chips offered under the input box.
pub fn tool_list(selected: Option<&Tool>) -> String {
    Tool::builtin()
        .iter()
        .map(|t| {
            let marker = if Some(t) == selected { "*" } else { " " };
            format!("{} {}", marker, t)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn session_list(sessions: &[ChatSession], active: Option<&str>) -> String {
    if sessions.is_empty() {
        return "(暂无历史对话)".to_string();
    }
    sessions
        .iter()
        .map(|s| {
            let marker = if Some(s.id.as_str()) == active { "*" } else { " " };
            format!("{} {}  {} ({} 条)", marker, s.id, s.title, s.message_count())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn task_list(files: &[&TaskFile]) -> String {
    if files.is_empty() {
        return "(没有匹配的文件)".to_string();
    }
    files
        .iter()
        .map(|f| {
            format!(
                "{:>2}. {}  {}  {}  {}",
                f.id,
                f.name,
                f.size,
                f.date,
                f.status.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn dashboard(d: &AdminDashboard) -> String {
    let mut out = String::new();
    for s in &d.stats {
        let _ = writeln!(out, "{}: {} ({})", s.title, s.value, s.trend);
    }
    let _ = writeln!(out, "\n最近日志 ({} 条失败):", d.error_count());
    for l in &d.logs {
        let _ = writeln!(out, "  {} {} {} [{}]", l.time, l.user, l.action, l.status.label());
    }
    let _ = writeln!(out, "\n快捷操作: {}", d.quick_actions.join(" | "));
    let _ = writeln!(out, "\n系统状态: {}", d.health_label);
    for h in &d.health {
        let _ = writeln!(out, "  {}: {}", h.label, h.display_value());
    }
    out.trim_end().to_string()
}

/// The conversation pane plus the composer line.
pub fn view(state: &ViewState, attachment_width: usize) -> String {
    let mut out = String::new();
    match state.active_tab {
        TabType::Xiaoxian => match &state.active_session {
            Some(session) => {
                let _ = writeln!(out, "== {} ==", session.title);
                for m in &session.messages {
                    let _ = writeln!(out, "{}", message(m));
                }
                if session.last_message().is_some_and(Message::is_assistant) {
                    let _ = writeln!(out, "{}", suggestions(&state.suggestions));
                }
            }
            None => {
                let _ = writeln!(out, "{}", WELCOME);
                let _ = writeln!(out, "{}", suggestions(&state.suggestions));
            }
        },
        tab => {
            let _ = writeln!(out, "(当前页面: {}，输入 /{} 查看内容)", tab, tab);
        }
    }

    let tool = state
        .selected_tool
        .as_ref()
        .map(|t| format!("[{}] ", t))
        .unwrap_or_default();
    let files = state
        .attachments
        .iter()
        .enumerate()
        .map(|(i, a)| {
            format!(
                "{}:{}{}({})",
                i + 1,
                attachment_icon(a),
                a.display_name(attachment_width),
                a.display_size()
            )
        })
        .collect::<Vec<_>>()
        .join(" ");
    if !tool.is_empty() || !files.is_empty() {
        let _ = writeln!(out, "> {}{}", tool, files);
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use xiaoxian_chat::{AppEvent, Attachment, ChatController, SessionStore, TaskCenter};
    use xiaoxian_core::{ChatConfig, FixedClock, Tool};

    fn controller() -> ChatController {
        ChatController::new(SessionStore::with_clock(
            ChatConfig::default(),
            Arc::new(FixedClock::from_millis(1_700_000_000_000)),
        ))
    }

    #[test]
    fn test_new_chat_shows_welcome() {
        let text = view(&controller().snapshot(), 10);
        assert!(text.starts_with(WELCOME));
        assert!(text.contains("你都有什么功能呢？"));
    }

    #[test]
    fn test_order_card_rendered_under_reply() {
        let mut c = controller();
        c.dispatch(AppEvent::SendMessage {
            text: "最新订单".into(),
            tool: None,
        })
        .unwrap();
        let text = view(&c.snapshot(), 10);
        assert!(text.contains("订单号: 5074394691916891024"));
        assert!(text.contains("实付款 ¥274.00"));
        assert!(text.contains("修改地址"));
    }

    #[test]
    fn test_summary_rendered() {
        let mut c = controller();
        c.dispatch(AppEvent::SendMessage {
            text: "订单".into(),
            tool: None,
        })
        .unwrap();
        assert!(view(&c.snapshot(), 10).contains("15 笔订单 · 近3个月 · 办公用品、劳保用品"));
    }

    #[test]
    fn test_composer_line_shows_tool_and_files() {
        let mut c = controller();
        c.dispatch(AppEvent::SelectTool(Some(Tool::FileProcessing))).unwrap();
        c.dispatch(AppEvent::Attach(vec![Attachment::new("2024年第一季度销售报表.xlsx", 2048, "")]))
            .unwrap();
        let text = view(&c.snapshot(), 10);
        assert!(text.contains("> [文件处理] 1:[表]2024年第一...(2.0 KB)"));
    }

    #[test]
    fn test_attachment_icons() {
        assert_eq!(attachment_icon(&Attachment::new("a.png", 1, "image/png")), "[图]");
        assert_eq!(attachment_icon(&Attachment::new("a.pdf", 1, "application/pdf")), "[PDF]");
        assert_eq!(attachment_icon(&Attachment::new("a.docx", 1, "")), "[文]");
        assert_eq!(attachment_icon(&Attachment::new("a.zip", 1, "")), "[件]");
    }

    #[test]
    fn test_suggestions_are_numbered() {
        let text = view(&controller().snapshot(), 10);
        assert!(text.contains("猜你想问: 1.你可以陪我聊天解闷吗？ / 2.你都有什么功能呢？"));
    }

    #[test]
    fn test_tool_list_marks_selected() {
        assert_eq!(tool_list(Some(&Tool::FileProcessing)), "  订单查询\n* 文件处理");
        assert_eq!(tool_list(None).lines().count(), 2);
    }

    #[test]
    fn test_other_tab_hint() {
        let mut c = controller();
        c.dispatch(AppEvent::SetActiveTab(TabType::Tasks)).unwrap();
        assert!(view(&c.snapshot(), 10).contains("/tasks"));
    }

    #[test]
    fn test_session_list_marks_active() {
        let mut c = controller();
        let outcome = c
            .dispatch(AppEvent::SendMessage {
                text: "你好".into(),
                tool: None,
            })
            .unwrap()
            .unwrap();
        let state = c.snapshot();
        let text = session_list(&state.sessions, state.active_session_id.as_deref());
        assert!(text.starts_with(&format!("* {}", outcome.session_id)));
        assert!(text.contains("(2 条)"));
        assert_eq!(session_list(&[], None), "(暂无历史对话)");
    }

    #[test]
    fn test_task_list_and_dashboard() {
        let tasks = TaskCenter::demo();
        let text = task_list(&tasks.search("pdf"));
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("已完成"));
        assert_eq!(task_list(&[]), "(没有匹配的文件)");

        let d = dashboard(&AdminDashboard::demo());
        assert!(d.contains("今日对话数: 1,284 (+12.5%)"));
        assert!(d.contains("(1 条失败)"));
        assert!(d.contains("CPU 使用率: 32%"));
    }
}
