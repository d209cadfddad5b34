//! Response resolution: maps user text and the selected tool to a reply.
//!
//! Resolution walks an ordered rule table and the first rule whose
//! predicate matches produces the reply. The table is data, so new rules
//! can be added without touching the dispatch loop.

use std::fmt;

use xiaoxian_core::{Message, MessageKind, OrderData, OrderSummaryData, Role, Tool};

use crate::rules;

// =============================================================================
// Input and output
// =============================================================================

/// What a rule gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct ResolveInput<'a> {
    pub text: &'a str,
    pub tool: Option<&'a Tool>,
}

impl<'a> ResolveInput<'a> {
    pub fn new(text: &'a str, tool: Option<&'a Tool>) -> Self {
        Self { text, tool }
    }

    /// Whether a tool with a non-blank name is selected.
    pub fn has_tool(&self) -> bool {
        self.tool.is_some_and(|t| !t.is_blank())
    }

    /// Whether the given tool is the selected one.
    pub fn tool_is(&self, tool: &Tool) -> bool {
        self.tool == Some(tool)
    }

    /// Whether the text contains any of the keywords.
    pub fn contains_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.text.contains(k))
    }
}

/// An assistant reply before it is stamped with an id and time.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub content: String,
    pub kind: MessageKind,
    pub order_data: Option<OrderData>,
    pub order_summary_data: Option<OrderSummaryData>,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: MessageKind::Text,
            order_data: None,
            order_summary_data: None,
        }
    }

    pub fn order_card(caption: impl Into<String>, order: OrderData) -> Self {
        Self {
            content: caption.into(),
            kind: MessageKind::OrderCard,
            order_data: Some(order),
            order_summary_data: None,
        }
    }

    pub fn order_summary(caption: impl Into<String>, summary: OrderSummaryData) -> Self {
        Self {
            content: caption.into(),
            kind: MessageKind::OrderSummary,
            order_data: None,
            order_summary_data: Some(summary),
        }
    }

    /// Turn the reply into an assistant message.
    pub fn into_message(self, id: impl Into<String>, timestamp: impl Into<String>) -> Message {
        Message {
            id: id.into(),
            role: Role::Assistant,
            content: self.content,
            timestamp: timestamp.into(),
            kind: self.kind,
            order_data: self.order_data,
            order_summary_data: self.order_summary_data,
        }
    }
}

// =============================================================================
// Rules
// =============================================================================

type Predicate = Box<dyn Fn(&ResolveInput<'_>) -> bool + Send + Sync>;
type Responder = Box<dyn Fn(&ResolveInput<'_>) -> Reply + Send + Sync>;

/// A named predicate → reply pair.
pub struct ResponseRule {
    name: String,
    predicate: Predicate,
    responder: Responder,
}

impl ResponseRule {
    pub fn new<P, R>(name: impl Into<String>, predicate: P, responder: R) -> Self
    where
        P: Fn(&ResolveInput<'_>) -> bool + Send + Sync + 'static,
        R: Fn(&ResolveInput<'_>) -> Reply + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
            responder: Box::new(responder),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, input: &ResolveInput<'_>) -> bool {
        (self.predicate)(input)
    }

    pub fn respond(&self, input: &ResolveInput<'_>) -> Reply {
        (self.responder)(input)
    }
}

impl fmt::Debug for ResponseRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseRule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// ResponseResolver
// =============================================================================

/// Ordered rule table; first match wins.
#[derive(Debug)]
pub struct ResponseResolver {
    rules: Vec<ResponseRule>,
}

impl Default for ResponseResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseResolver {
    /// Resolver with the built-in order, guidance and tool rules.
    pub fn new() -> Self {
        Self {
            rules: rules::default_rules(),
        }
    }

    /// Resolver with a caller-supplied table.
    pub fn with_rules(rules: Vec<ResponseRule>) -> Self {
        Self { rules }
    }

    /// Insert a rule ahead of every existing rule.
    pub fn push_front(&mut self, rule: ResponseRule) {
        self.rules.insert(0, rule);
    }

    /// Append a rule after every existing rule.
    pub fn push_back(&mut self, rule: ResponseRule) {
        self.rules.push(rule);
    }

    /// Names of the rules in evaluation order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(ResponseRule::name).collect()
    }

    /// Name of the rule that would answer this input, if any.
    pub fn matching_rule(&self, text: &str, tool: Option<&Tool>) -> Option<&str> {
        let input = ResolveInput::new(text, tool);
        self.rules
            .iter()
            .find(|r| r.matches(&input))
            .map(ResponseRule::name)
    }

    /// Compute the reply for the input without stamping it.
    ///
    /// Total: if no rule matches (only possible with a custom table), the
    /// tool guidance text is returned.
    pub fn reply_for(&self, text: &str, tool: Option<&Tool>) -> Reply {
        let input = ResolveInput::new(text, tool);
        match self.rules.iter().find(|r| r.matches(&input)) {
            Some(rule) => {
                tracing::debug!(rule = rule.name(), tool = ?tool.map(Tool::name), "Response rule matched");
                rule.respond(&input)
            }
            None => {
                tracing::warn!("No response rule matched; falling back to tool guidance");
                Reply::text(rules::TOOL_GUIDANCE)
            }
        }
    }

    /// Resolve the input into an assistant message with the given id and
    /// display timestamp.
    pub fn resolve(
        &self,
        text: &str,
        tool: Option<&Tool>,
        id: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Message {
        self.reply_for(text, tool).into_message(id, timestamp)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ResponseResolver {
        ResponseResolver::new()
    }

    #[test]
    fn test_default_rule_order() {
        assert_eq!(
            resolver().rule_names(),
            vec!["order_detail", "order_summary", "tool_guidance", "tool_prompt"]
        );
    }

    #[test]
    fn test_resolve_stamps_id_and_time() {
        let msg = resolver().resolve("你好", None, "42", "09:30");
        assert_eq!(msg.id, "42");
        assert_eq!(msg.timestamp, "09:30");
        assert_eq!(msg.role, Role::Assistant);
    }

    #[test]
    fn test_order_keyword_with_latest_gives_card() {
        let reply = resolver().reply_for("帮我查一下最新订单", None);
        assert_eq!(reply.kind, MessageKind::OrderCard);
        assert_eq!(reply.content, rules::ORDER_CARD_CAPTION);
        assert!(reply.order_data.is_some());
        assert!(reply.order_summary_data.is_none());
    }

    #[test]
    fn test_order_keyword_with_each_qualifier_gives_card() {
        for text in ["订单详情", "单个订单", "最新的订单"] {
            let reply = resolver().reply_for(text, None);
            assert_eq!(reply.kind, MessageKind::OrderCard, "text: {}", text);
        }
    }

    #[test]
    fn test_order_keyword_without_qualifier_gives_summary() {
        let reply = resolver().reply_for("帮我查一下相关订单", None);
        assert_eq!(reply.kind, MessageKind::OrderSummary);
        assert_eq!(reply.order_summary_data.as_ref().map(|s| s.total), Some(15));
        assert!(reply.order_data.is_none());
    }

    #[test]
    fn test_order_tool_without_keyword_gives_summary() {
        let reply = resolver().reply_for("有哪些预警", Some(&Tool::OrderQuery));
        assert_eq!(reply.kind, MessageKind::OrderSummary);
    }

    #[test]
    fn test_order_tool_with_qualifier_but_no_keyword_gives_card() {
        let reply = resolver().reply_for("看看最新的", Some(&Tool::OrderQuery));
        assert_eq!(reply.kind, MessageKind::OrderCard);
    }

    #[test]
    fn test_qualifier_without_order_context_is_not_a_card() {
        let reply = resolver().reply_for("最新消息", None);
        assert_eq!(reply.kind, MessageKind::Text);
        assert_eq!(reply.content, rules::TOOL_GUIDANCE);
    }

    #[test]
    fn test_no_tool_gives_guidance_verbatim() {
        let reply = resolver().reply_for("你好", None);
        assert_eq!(reply.kind, MessageKind::Text);
        assert_eq!(reply.content, rules::TOOL_GUIDANCE);
    }

    #[test]
    fn test_file_tool_prompt_embeds_name() {
        let reply = resolver().reply_for("帮我整理一下", Some(&Tool::FileProcessing));
        assert_eq!(reply.kind, MessageKind::Text);
        assert!(reply.content.contains("文件处理"));
        assert_eq!(
            reply.content,
            "您已选择【文件处理】工具，请告诉我您的具体需求，或上传相关文件。"
        );
    }

    #[test]
    fn test_custom_tool_prompt_embeds_name() {
        let tool = Tool::Other("知识库".into());
        let reply = resolver().reply_for("查一下类目", Some(&tool));
        assert!(reply.content.contains("【知识库】"));
    }

    #[test]
    fn test_blank_tool_name_gives_guidance() {
        for name in ["", "   "] {
            let tool = Tool::from(name);
            let reply = resolver().reply_for("你好", Some(&tool));
            assert_eq!(reply.content, rules::TOOL_GUIDANCE, "tool name: {:?}", name);
        }
        assert_eq!(resolver().matching_rule("你好", Some(&Tool::from(""))), Some("tool_guidance"));
    }

    #[test]
    fn test_padded_order_tool_name_is_another_tool() {
        let tool = Tool::from(" 订单查询 ");
        let reply = resolver().reply_for("有哪些预警", Some(&tool));
        assert_eq!(reply.kind, MessageKind::Text);
        assert!(reply.content.contains("【 订单查询 】"));
    }

    #[test]
    fn test_order_keyword_wins_over_file_tool() {
        let reply = resolver().reply_for("订单导出", Some(&Tool::FileProcessing));
        assert_eq!(reply.kind, MessageKind::OrderSummary);
    }

    #[test]
    fn test_empty_text_is_total() {
        assert_eq!(resolver().reply_for("", None).content, rules::TOOL_GUIDANCE);
        assert_eq!(
            resolver().reply_for("", Some(&Tool::OrderQuery)).kind,
            MessageKind::OrderSummary
        );
    }

    #[test]
    fn test_matching_rule_names() {
        let r = resolver();
        assert_eq!(r.matching_rule("最新订单", None), Some("order_detail"));
        assert_eq!(r.matching_rule("订单", None), Some("order_summary"));
        assert_eq!(r.matching_rule("hi", None), Some("tool_guidance"));
        assert_eq!(r.matching_rule("hi", Some(&Tool::FileProcessing)), Some("tool_prompt"));
    }

    #[test]
    fn test_push_front_overrides_defaults() {
        let mut r = resolver();
        r.push_front(ResponseRule::new(
            "greeting",
            |input| input.text.contains("你好"),
            |_| Reply::text("你好！我是小仙。"),
        ));
        assert_eq!(r.reply_for("你好", None).content, "你好！我是小仙。");
        // Other inputs still reach the defaults.
        assert_eq!(r.reply_for("订单", None).kind, MessageKind::OrderSummary);
    }

    #[test]
    fn test_empty_table_falls_back_to_guidance() {
        let r = ResponseResolver::with_rules(Vec::new());
        assert_eq!(r.reply_for("订单", None).content, rules::TOOL_GUIDANCE);
        assert!(r.matching_rule("订单", None).is_none());
    }

    #[test]
    fn test_push_back_is_unreachable_after_catch_all() {
        let mut r = resolver();
        r.push_back(ResponseRule::new("never", |_| true, |_| Reply::text("never")));
        assert_ne!(r.reply_for("随便", Some(&Tool::FileProcessing)).content, "never");
    }

    #[test]
    fn test_rule_debug_shows_name() {
        let rule = ResponseRule::new("x", |_| true, |_| Reply::text(""));
        assert!(format!("{:?}", rule).contains("\"x\""));
    }
}
