//! REPL line parsing.

use std::str::FromStr;

use xiaoxian_chat::{AppEvent, Attachment};
use xiaoxian_core::{TabType, Tool};

const DEFAULT_MIME: &str = "application/octet-stream";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: /{0} (try /help)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("{0}")]
    Invalid(String),
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: type it into the draft and submit.
    Say(String),
    /// Send the n-th follow-up suggestion (zero-based), leaving the draft alone.
    Ask(usize),
    /// Show the built-in tools.
    ListTools,
    /// Forwarded to the controller as-is.
    Event(AppEvent),
    ListSessions,
    Tasks(String),
    Admin,
    Json,
    Help,
    Quit,
    /// Blank line.
    Nothing,
}

pub const HELP: &str = "\
命令:
  <text>                      发送消息
  /tool [名称|none]           选择或取消工具，不带参数时列出工具
  /ask <序号>                 发送第 n 个推荐问题 (从 1 开始)
  /attach <文件名> <字节数> [mime]  添加附件
  /detach <序号>              移除附件 (从 1 开始)
  /new                        新建对话
  /select <id>                打开历史对话
  /sessions                   列出历史对话
  /tab <xiaoxian|tasks|admin> 切换页面
  /tasks [关键词]             搜索任务中心
  /admin                      查看管理后台
  /json                       以 JSON 打印当前状态
  /help                       显示帮助
  /quit                       退出";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(if line.is_empty() {
                Command::Nothing
            } else {
                Command::Say(line.to_string())
            });
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match name {
            "tool" => match args.as_slice() {
                [] => Ok(Command::ListTools),
                ["none"] => Ok(Command::Event(AppEvent::SelectTool(None))),
                names => Ok(Command::Event(AppEvent::SelectTool(Tool::from_name(
                    &names.join(" "),
                )))),
            },
            "ask" => match args.as_slice() {
                [n] => match n.parse::<usize>() {
                    Ok(n) if n >= 1 => Ok(Command::Ask(n - 1)),
                    _ => Err(CommandError::Invalid(format!("invalid suggestion number: {}", n))),
                },
                _ => Err(CommandError::Usage("/ask <序号>")),
            },
            "attach" => match args.as_slice() {
                [file, bytes] | [file, bytes, _] => {
                    let size = bytes
                        .parse::<u64>()
                        .map_err(|_| CommandError::Invalid(format!("invalid size: {}", bytes)))?;
                    let mime = args.get(2).copied().unwrap_or(DEFAULT_MIME);
                    Ok(Command::Event(AppEvent::Attach(vec![Attachment::new(
                        *file, size, mime,
                    )])))
                }
                _ => Err(CommandError::Usage("/attach <文件名> <字节数> [mime]")),
            },
            "detach" => match args.as_slice() {
                [n] => match n.parse::<usize>() {
                    Ok(n) if n >= 1 => Ok(Command::Event(AppEvent::RemoveAttachment(n - 1))),
                    _ => Err(CommandError::Invalid(format!("invalid attachment number: {}", n))),
                },
                _ => Err(CommandError::Usage("/detach <序号>")),
            },
            "new" => Ok(Command::Event(AppEvent::ResetToNewChat)),
            "select" => match args.as_slice() {
                [id] => Ok(Command::Event(AppEvent::SelectSession(id.to_string()))),
                _ => Err(CommandError::Usage("/select <id>")),
            },
            "sessions" => Ok(Command::ListSessions),
            "tab" => match args.as_slice() {
                [tab] => TabType::from_str(tab)
                    .map(|t| Command::Event(AppEvent::SetActiveTab(t)))
                    .map_err(|e| CommandError::Invalid(e.to_string())),
                _ => Err(CommandError::Usage("/tab <xiaoxian|tasks|admin>")),
            },
            "tasks" => Ok(Command::Tasks(args.join(" "))),
            "admin" => Ok(Command::Admin),
            "json" => Ok(Command::Json),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
