//! Demonstration payloads returned by the order rules.

use xiaoxian_core::{OrderData, OrderItem, OrderSummaryData};

const DEMO_ITEM_TITLE: &str =
    "JEEPSPIRIT吉普纯棉运动套装男春秋款加绒立领中老年休闲跑步服 [交易快照]";

fn demo_tags() -> Vec<String> {
    ["退货宝", "极速退款", "7天无理由退货"]
        .iter()
        .map(|t| t.to_string())
        .collect()
}

/// The single order shown for "latest order" / "order details" queries.
pub fn demo_order() -> OrderData {
    OrderData {
        date: "2026-02-18".to_string(),
        order_id: "5074394691916891024".to_string(),
        shop_name: "JEEP SPIRIT品牌福建总店".to_string(),
        status: "买家已付款".to_string(),
        items: vec![
            OrderItem {
                image: "https://picsum.photos/seed/jeep1/80/80".to_string(),
                title: DEMO_ITEM_TITLE.to_string(),
                sku: "XL[【推荐120-140斤】];黑色【直筒套装】".to_string(),
                price: "135.00".to_string(),
                original_price: Some("169.00".to_string()),
                quantity: 1,
                tags: demo_tags(),
            },
            OrderItem {
                image: "https://picsum.photos/seed/jeep2/80/80".to_string(),
                title: DEMO_ITEM_TITLE.to_string(),
                sku: "XL[【推荐120-140斤】];深蓝色【直筒套装】".to_string(),
                price: "139.00".to_string(),
                original_price: Some("169.00".to_string()),
                quantity: 1,
                tags: demo_tags(),
            },
        ],
        total_amount: "274.00".to_string(),
        shipping_fee: "0.00".to_string(),
        actions: vec!["修改地址".to_string()],
    }
}

/// The aggregate shown for general order queries.
pub fn demo_order_summary() -> OrderSummaryData {
    OrderSummaryData {
        total: 15,
        date_range: "近3个月".to_string(),
        categories: vec!["办公用品".to_string(), "劳保用品".to_string()],
    }
}
