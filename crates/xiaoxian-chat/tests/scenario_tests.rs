//! End-to-end conversation scenarios driven through the public API.
//!
//! Each test builds its own store on a fixed or manual clock.

use std::sync::Arc;

use xiaoxian_chat::rules::{ORDER_CARD_CAPTION, TOOL_GUIDANCE};
use xiaoxian_chat::{AppEvent, Attachment, ChatController, ResponseResolver, SessionStore};
use xiaoxian_core::{
    ChatConfig, FixedClock, ManualClock, MessageKind, Role, SessionOrder, TabType, Tool,
};

// =============================================================================
// Helpers
// =============================================================================

const BASE_MILLIS: i64 = 1_771_400_000_000;

fn store() -> SessionStore {
    SessionStore::with_clock(ChatConfig::default(), Arc::new(FixedClock::from_millis(BASE_MILLIS)))
}

/// Texts mixing the order keyword, qualifiers and unrelated words.
const ORDER_DETAIL_TEXTS: [&str; 5] = [
    "帮我查一下最新订单",
    "订单详情",
    "单个订单怎么看",
    "把最新的订单发我",
    "我想看某个订单详情",
];

const ORDER_SUMMARY_TEXTS: [&str; 4] = [
    "帮我查一下相关订单",
    "订单",
    "有哪些预警订单？",
    "上个月的订单汇总",
];

const PLAIN_TEXTS: [&str; 5] = ["你好", "", "最新消息", "帮我整理一下表格", "hello"];

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn order_keyword_with_qualifier_resolves_to_card() {
    let resolver = ResponseResolver::new();
    for text in ORDER_DETAIL_TEXTS {
        for tool in [None, Some(Tool::OrderQuery), Some(Tool::FileProcessing)] {
            let msg = resolver.resolve(text, tool.as_ref(), "1", "00:00");
            assert_eq!(msg.kind, MessageKind::OrderCard, "text: {}", text);
            assert!(msg.order_data.is_some());
        }
    }
}

#[test]
fn order_keyword_without_qualifier_resolves_to_summary() {
    let resolver = ResponseResolver::new();
    for text in ORDER_SUMMARY_TEXTS {
        let msg = resolver.resolve(text, None, "1", "00:00");
        assert_eq!(msg.kind, MessageKind::OrderSummary, "text: {}", text);
        assert_eq!(msg.order_summary_data.map(|s| s.total), Some(15));
    }
}

#[test]
fn no_keyword_and_no_tool_resolves_to_guidance() {
    let resolver = ResponseResolver::new();
    for text in PLAIN_TEXTS {
        let msg = resolver.resolve(text, None, "1", "00:00");
        assert_eq!(msg.kind, MessageKind::Text);
        assert_eq!(msg.content, TOOL_GUIDANCE);
    }
}

#[test]
fn no_keyword_with_file_tool_names_the_tool() {
    let resolver = ResponseResolver::new();
    for text in PLAIN_TEXTS {
        let msg = resolver.resolve(text, Some(&Tool::FileProcessing), "1", "00:00");
        assert!(msg.content.contains("文件处理"), "text: {}", text);
    }
}

// =============================================================================
// Store
// =============================================================================

#[test]
fn every_send_appends_user_then_assistant() {
    let mut store = store();
    let texts = ["你好", "订单", "最新订单", "随便聊聊"];
    for (i, text) in texts.iter().enumerate() {
        store.send(text, None);
        let session = store.active_session().unwrap();
        assert_eq!(session.messages.len(), (i + 1) * 2);
        let tail = &session.messages[session.messages.len() - 2..];
        assert_eq!(tail[0].role, Role::User);
        assert_eq!(tail[0].content, *text);
        assert_eq!(tail[1].role, Role::Assistant);
    }
    assert_eq!(store.sessions().len(), 1);
}

#[test]
fn first_send_creates_one_prepended_session_with_title() {
    let mut store = store();
    let long = "这是一条非常非常长的消息，用来测试会话标题是否会被正确截断并加上省略号";
    let first = store.send("短消息", None);
    store.reset();
    let second = store.send(long, None);

    assert_eq!(store.sessions().len(), 2);
    assert_eq!(store.sessions()[0].id, second.session_id);
    assert_eq!(store.sessions()[1].id, first.session_id);
    assert_eq!(store.sessions()[1].title, "短消息");

    let expected: String = long.chars().take(20).collect::<String>() + "...";
    assert_eq!(store.sessions()[0].title, expected);
}

#[test]
fn scenario_latest_order_with_order_tool() {
    let mut store = store();
    let outcome = store.send("帮我查一下最新订单", Some(&Tool::OrderQuery));
    assert!(outcome.created);
    let session = store.active_session().unwrap();
    assert_eq!(session.messages.len(), 2);
    assert_eq!(session.messages[1].kind, MessageKind::OrderCard);
    assert_eq!(session.messages[1].content, ORDER_CARD_CAPTION);
}

#[test]
fn scenario_related_orders_without_tool() {
    let mut store = store();
    let outcome = store.send("帮我查一下相关订单", None);
    assert_eq!(outcome.reply.kind, MessageKind::OrderSummary);
    assert_eq!(outcome.reply.order_summary_data.as_ref().map(|s| s.total), Some(15));
}

#[test]
fn scenario_greeting_without_tool() {
    let mut store = store();
    let outcome = store.send("你好", None);
    assert_eq!(outcome.reply.content, TOOL_GUIDANCE);
    assert_eq!(outcome.reply.kind, MessageKind::Text);
}

#[test]
fn scenario_select_then_reset_keeps_sessions() {
    let mut store = store();
    let a = store.send("一", None).session_id;
    store.send("一又一", None);
    store.reset();
    store.send("二", None);

    store.select(&a).unwrap();
    store.set_active_tab(TabType::Tasks);
    store.reset();

    assert!(store.active_session_id().is_none());
    assert_eq!(store.active_tab(), TabType::Xiaoxian);
    let counts: Vec<usize> = store.sessions().iter().map(|s| s.message_count()).collect();
    assert_eq!(counts, vec![2, 4]);
}

#[test]
fn ids_strictly_increase_across_rapid_sends() {
    let mut store = store();
    for _ in 0..20 {
        store.send("订单", None);
    }
    let ids: Vec<i64> = store
        .active_session()
        .unwrap()
        .messages
        .iter()
        .map(|m| m.id.parse().unwrap())
        .collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert!(ids[0] >= BASE_MILLIS);
}

#[test]
fn recent_order_moves_updated_session_to_front() {
    let clock = Arc::new(ManualClock::from_millis(BASE_MILLIS));
    let config = ChatConfig {
        session_order: SessionOrder::Recent,
        ..ChatConfig::default()
    };
    let mut store = SessionStore::with_clock(config, clock.clone());

    let older = store.send("早", None).session_id;
    store.reset();
    clock.advance_millis(1_000);
    let newer = store.send("晚", None).session_id;
    assert_eq!(store.sessions()[0].id, newer);

    clock.advance_millis(1_000);
    store.select(&older).unwrap();
    store.send("再聊", None);
    assert_eq!(store.sessions()[0].id, older);
}

// =============================================================================
// Controller
// =============================================================================

#[test]
fn controller_draft_round_trip_through_ui_events() {
    let mut c = ChatController::new(store());
    c.dispatch(AppEvent::SelectTool(Some(Tool::FileProcessing))).unwrap();
    c.dispatch(AppEvent::SetDraft("帮我汇总".into())).unwrap();
    c.dispatch(AppEvent::Attach(vec![
        Attachment::new("华东大区采购需求汇总.xlsx", 3_355_443, "application/vnd.ms-excel"),
        Attachment::new("备注.pdf", 1_024, "application/pdf"),
    ]))
    .unwrap();
    c.dispatch(AppEvent::RemoveAttachment(1)).unwrap();

    let outcome = c.dispatch(AppEvent::SubmitDraft).unwrap().unwrap();
    assert!(outcome.reply.content.contains("【文件处理】"));

    let view = c.snapshot();
    let session = view.active_session.unwrap();
    assert_eq!(session.messages[0].content, "帮我汇总 [已上传文件: 华东大区采购需求汇总.xlsx]");
    assert!(view.attachments.is_empty());
    assert_eq!(view.selected_tool, Some(Tool::FileProcessing));
}

#[test]
fn controller_tab_switch_does_not_touch_sessions() {
    let mut c = ChatController::new(store());
    c.dispatch(AppEvent::SendMessage {
        text: "你好".into(),
        tool: None,
    })
    .unwrap();
    let before = c.snapshot().active_session_id;
    c.dispatch(AppEvent::SetActiveTab(TabType::Admin)).unwrap();
    let view = c.snapshot();
    assert_eq!(view.active_tab, TabType::Admin);
    assert_eq!(view.active_session_id, before);
    assert_eq!(view.sessions.len(), 1);
}
