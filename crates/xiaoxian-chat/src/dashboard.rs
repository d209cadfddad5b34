//! Admin dashboard snapshot: usage stats, recent logs and system health.
//!
//! All figures are fixed demo values.

use serde::{Deserialize, Serialize};

/// A headline metric with its trend against the previous period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    /// Signed percentage, e.g. `+12.5%`.
    pub trend: String,
    pub is_positive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
    Success,
    Error,
}

impl LogStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LogStatus::Success => "成功",
            LogStatus::Error => "失败",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// `HH:MM:SS`
    pub time: String,
    pub user: String,
    pub action: String,
    pub status: LogStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthBar {
    pub label: String,
    pub value: u32,
    /// Unit shown after the value, `%` unless stated otherwise.
    pub suffix: String,
}

impl HealthBar {
    fn new(label: &str, value: u32, suffix: &str) -> Self {
        Self {
            label: label.to_string(),
            value,
            suffix: suffix.to_string(),
        }
    }

    pub fn display_value(&self) -> String {
        format!("{}{}", self.value, self.suffix)
    }
}

/// Everything the admin tab renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub stats: Vec<StatCard>,
    pub logs: Vec<LogEntry>,
    pub quick_actions: Vec<String>,
    pub health: Vec<HealthBar>,
    pub health_label: String,
}

impl Default for AdminDashboard {
    fn default() -> Self {
        Self::demo()
    }
}

impl AdminDashboard {
    pub fn demo() -> Self {
        let stat = |title: &str, value: &str, trend: &str, is_positive: bool| StatCard {
            title: title.to_string(),
            value: value.to_string(),
            trend: trend.to_string(),
            is_positive,
        };
        let log = |time: &str, user: &str, action: &str, status: LogStatus| LogEntry {
            time: time.to_string(),
            user: user.to_string(),
            action: action.to_string(),
            status,
        };

        Self {
            stats: vec![
                stat("今日对话数", "1,284", "+12.5%", true),
                stat("活跃用户", "342", "+5.2%", true),
                stat("处理文件数", "89", "-2.1%", false),
                stat("API调用次数", "45.2k", "+18.4%", true),
            ],
            logs: vec![
                log("10:42:15", "张三 (采购部)", "触发了【订单查询】工具", LogStatus::Success),
                log("10:38:22", "李四 (销售部)", "上传了文件【Q3报价单.xlsx】", LogStatus::Success),
                log("10:15:05", "王五 (运营部)", "知识库查询：商品四级类目", LogStatus::Success),
                log("09:55:12", "赵六 (仓储部)", "API调用超时 (ERP接口)", LogStatus::Error),
                log("09:30:45", "系统自动", "同步最新供应链数据", LogStatus::Success),
                log("09:12:33", "张三 (采购部)", "触发了【文件处理】工具", LogStatus::Success),
            ],
            quick_actions: ["知识库管理", "提示词配置", "工具箱设置", "权限管理"]
                .iter()
                .map(|a| a.to_string())
                .collect(),
            health: vec![
                HealthBar::new("CPU 使用率", 32, "%"),
                HealthBar::new("内存使用率", 68, "%"),
                HealthBar::new("API 响应延迟", 15, "ms"),
                HealthBar::new("存储空间", 85, "%"),
            ],
            health_label: "正常".to_string(),
        }
    }

    /// Number of failed log entries.
    pub fn error_count(&self) -> usize {
        self.logs
            .iter()
            .filter(|l| l.status == LogStatus::Error)
            .count()
    }

    /// Log entries whose user or action contains `query`.
    pub fn log_search(&self, query: &str) -> Vec<&LogEntry> {
        let needle = query.trim();
        self.logs
            .iter()
            .filter(|l| needle.is_empty() || l.user.contains(needle) || l.action.contains(needle))
            .collect()
    }
}
