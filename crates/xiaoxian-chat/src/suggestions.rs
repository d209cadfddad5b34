//! Quick follow-up questions offered under the latest reply.

use xiaoxian_core::Tool;

const ORDER_QUERY_SUGGESTIONS: [&str; 3] = [
    "有哪些预警订单？",
    "帮我查一下最新订单",
    "帮我查一下某个订单详情",
];

const SMALL_TALK_SUGGESTIONS: [&str; 3] = [
    "你可以陪我聊天解闷吗？",
    "你都有什么功能呢？",
    "你能给我讲个笑话吗？",
];

/// Suggestions for the currently selected tool.
pub fn follow_up_questions(tool: Option<&Tool>) -> &'static [&'static str] {
    match tool {
        Some(Tool::OrderQuery) => &ORDER_QUERY_SUGGESTIONS,
        _ => &SMALL_TALK_SUGGESTIONS,
    }
}
