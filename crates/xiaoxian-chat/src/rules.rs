//! Built-in keyword rules.
//!
//! Evaluated in order:
//! 1. `order_detail`: order context plus a single-order qualifier
//! 2. `order_summary`: order context
//! 3. `tool_guidance`: no tool selected, or a blank tool name
//! 4. `tool_prompt`: any other tool

use xiaoxian_core::Tool;

use crate::fixtures::{demo_order, demo_order_summary};
use crate::resolver::{Reply, ResolveInput, ResponseRule};

/// Substring that puts a message in order context regardless of tool.
pub const ORDER_KEYWORD: &str = "订单";

/// Qualifiers that narrow an order query to a single order.
pub const SINGLE_ORDER_QUALIFIERS: [&str; 3] = ["最新", "详情", "单个"];

pub const ORDER_CARD_CAPTION: &str = "为您查询到最新的订单信息：";

pub const ORDER_SUMMARY_CAPTION: &str = "为您查询到近期共有 15 笔相关订单，主要集中在办公用品和劳保用品类目。您可以点击下方卡片跳转至订单中心查看完整列表。";

pub const TOOL_GUIDANCE: &str = "您好！为了更高效、准确地为您服务，建议您先在输入框下方选择对应的专属工具（如“订单查询”或“文件处理”），然后再告诉我您的具体需求哦~";

/// Prompt shown when a non-order tool is selected.
pub fn tool_prompt(tool: &Tool) -> String {
    format!(
        "您已选择【{}】工具，请告诉我您的具体需求，或上传相关文件。",
        tool.name()
    )
}

fn in_order_context(input: &ResolveInput<'_>) -> bool {
    input.tool_is(&Tool::OrderQuery) || input.text.contains(ORDER_KEYWORD)
}

/// The default rule table.
pub fn default_rules() -> Vec<ResponseRule> {
    vec![
        ResponseRule::new(
            "order_detail",
            |input| in_order_context(input) && input.contains_any(&SINGLE_ORDER_QUALIFIERS),
            |_| Reply::order_card(ORDER_CARD_CAPTION, demo_order()),
        ),
        ResponseRule::new("order_summary", in_order_context, |_| {
            Reply::order_summary(ORDER_SUMMARY_CAPTION, demo_order_summary())
        }),
        ResponseRule::new(
            "tool_guidance",
            |input| !input.has_tool(),
            |_| Reply::text(TOOL_GUIDANCE),
        ),
        ResponseRule::new(
            "tool_prompt",
            |_| true,
            |input| match input.tool {
                Some(tool) if !tool.is_blank() => Reply::text(tool_prompt(tool)),
                _ => Reply::text(TOOL_GUIDANCE),
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_prompt_format() {
        assert_eq!(
            tool_prompt(&Tool::FileProcessing),
            "您已选择【文件处理】工具，请告诉我您的具体需求，或上传相关文件。"
        );
    }

    #[test]
    fn test_order_context_by_tool_or_keyword() {
        let tool = Tool::OrderQuery;
        assert!(in_order_context(&ResolveInput::new("随便", Some(&tool))));
        assert!(in_order_context(&ResolveInput::new("我的订单", None)));
        assert!(!in_order_context(&ResolveInput::new("我的快递", None)));
        let other = Tool::FileProcessing;
        assert!(!in_order_context(&ResolveInput::new("表格", Some(&other))));
    }

    #[test]
    fn test_summary_caption_mentions_total() {
        assert!(ORDER_SUMMARY_CAPTION.contains("15 笔"));
    }

    #[test]
    fn test_guidance_names_both_tools() {
        assert!(TOOL_GUIDANCE.contains(Tool::ORDER_QUERY_NAME));
        assert!(TOOL_GUIDANCE.contains(Tool::FILE_PROCESSING_NAME));
    }

    #[test]
    fn test_default_rules_count() {
        assert_eq!(default_rules().len(), 4);
    }
}
