//! Task center: results of earlier file-processing runs.
//!
//! The list is fixed demo content; nothing is ever processed.

use serde::{Deserialize, Serialize};

use crate::composer::FileKind;

/// Processing state of a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Completed,
}

impl TaskStatus {
    /// Label shown on the status badge.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "已完成",
        }
    }
}

/// One processed file available for download.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFile {
    pub id: u32,
    pub name: String,
    /// Display size, e.g. `2.4 MB`.
    pub size: String,
    /// `YYYY-MM-DD HH:MM`
    pub date: String,
    pub kind: FileKind,
    pub status: TaskStatus,
}

impl TaskFile {
    fn completed(id: u32, name: &str, size: &str, date: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            size: size.to_string(),
            date: date.to_string(),
            kind: FileKind::from_name(name),
            status: TaskStatus::Completed,
        }
    }

    /// Date part only, for compact rows.
    pub fn day(&self) -> &str {
        self.date.split(' ').next().unwrap_or(&self.date)
    }
}

/// The task list shown on the tasks tab.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaskCenter {
    files: Vec<TaskFile>,
}

impl Default for TaskCenter {
    fn default() -> Self {
        Self::demo()
    }
}

impl TaskCenter {
    pub fn new(files: Vec<TaskFile>) -> Self {
        Self { files }
    }

    /// The five demo results.
    pub fn demo() -> Self {
        Self::new(vec![
            TaskFile::completed(1, "2024年第一季度销售报表.xlsx", "2.4 MB", "2024-03-15 14:30"),
            TaskFile::completed(2, "供应商合作协议模板_v2.pdf", "1.1 MB", "2024-03-14 09:15"),
            TaskFile::completed(3, "商品类目映射表_最新版.csv", "856 KB", "2024-03-12 16:45"),
            TaskFile::completed(4, "华东大区采购需求汇总.xlsx", "3.2 MB", "2024-03-10 11:20"),
            TaskFile::completed(5, "新员工入职培训手册.pdf", "5.6 MB", "2024-03-08 15:00"),
        ])
    }

    pub fn files(&self) -> &[TaskFile] {
        &self.files
    }

    /// Files whose name contains `query`, ignoring case. A blank query
    /// matches everything.
    pub fn search(&self, query: &str) -> Vec<&TaskFile> {
        let needle = query.trim().to_lowercase();
        self.files
            .iter()
            .filter(|f| needle.is_empty() || f.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn get(&self, id: u32) -> Option<&TaskFile> {
        self.files.iter().find(|f| f.id == id)
    }
}
