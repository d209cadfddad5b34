//! Xiaoxian demo binary: composition root.
//!
//! 1. Parse CLI arguments and install the tracing subscriber (stderr)
//! 2. Load configuration from TOML and apply its log level
//! 3. Build the chat controller
//! 4. Either send `--message` lines once, or run the interactive REPL

mod cli;
mod commands;
mod render;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

use xiaoxian_chat::{AppEvent, ChatController, TaskCenter};
use xiaoxian_chat::dashboard::AdminDashboard;
use xiaoxian_core::XiaoxianConfig;

use crate::cli::CliArgs;
use crate::commands::{Command, HELP};

/// What the loop should do after a line.
enum Flow {
    Continue,
    Quit,
}

/// Runtime state shared by the one-shot and REPL paths.
struct App {
    controller: ChatController,
    tasks: TaskCenter,
    dashboard: AdminDashboard,
    json: bool,
    attachment_width: usize,
}

impl App {
    fn new(config: &XiaoxianConfig, json: bool) -> Self {
        Self {
            controller: ChatController::from_config(config),
            tasks: TaskCenter::demo(),
            dashboard: AdminDashboard::demo(),
            json,
            attachment_width: config.attachments.display_width,
        }
    }

    fn print_view(&self) -> Result<(), serde_json::Error> {
        let state = self.controller.snapshot();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&state)?);
        } else {
            println!("{}", render::view(&state, self.attachment_width));
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<Flow, serde_json::Error> {
        let command = match line.parse::<Command>() {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}", e);
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Nothing => {}
            Command::Say(text) => {
                self.apply(AppEvent::SetDraft(text));
                if self.apply(AppEvent::SubmitDraft) {
                    self.print_view()?;
                }
            }
            Command::Ask(index) => {
                if self.apply(AppEvent::AskSuggestion(index)) {
                    self.print_view()?;
                }
            }
            Command::ListTools => {
                let state = self.controller.snapshot();
                println!("{}", render::tool_list(state.selected_tool.as_ref()));
            }
            Command::Event(event) => {
                if self.apply(event) {
                    self.print_view()?;
                }
            }
            Command::ListSessions => {
                let state = self.controller.snapshot();
                println!(
                    "{}",
                    render::session_list(&state.sessions, state.active_session_id.as_deref())
                );
            }
            Command::Tasks(query) => {
                let hits = self.tasks.search(&query);
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&hits)?);
                } else {
                    println!("{}", render::task_list(&hits));
                }
            }
            Command::Admin => {
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&self.dashboard)?);
                } else {
                    println!("{}", render::dashboard(&self.dashboard));
                }
            }
            Command::Json => {
                println!("{}", serde_json::to_string_pretty(&self.controller.snapshot())?);
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Dispatch and report rejected events. Returns whether it was applied.
    fn apply(&mut self, event: AppEvent) -> bool {
        match self.controller.dispatch(event) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Event rejected");
                eprintln!("{}", e);
                false
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Tracing first, so config load failures are reported. stdout carries
    // the conversation, logs go to stderr.
    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    let (filter, filter_handle) = reload::Layer::new(
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(args.bootstrap_log_level())),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Xiaoxian v{}", env!("CARGO_PKG_VERSION"));

    // Config.
    let config_file = args.resolve_config_path();
    let config = XiaoxianConfig::load_or_default(&config_file);
    if args.defers_to_config_log_level(rust_log_set) {
        filter_handle.reload(EnvFilter::new(&config.general.log_level))?;
    }
    tracing::debug!(order = ?config.chat.session_order, "Chat settings");

    let mut app = App::new(&config, args.json);

    if args.is_one_shot() {
        for text in &args.message {
            app.apply(AppEvent::SetDraft(text.clone()));
            app.apply(AppEvent::SubmitDraft);
        }
        app.print_view()?;
        return Ok(());
    }

    println!("{}", render::WELCOME);
    println!("输入 /help 查看命令。");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Flow::Quit = app.handle_line(&line)? {
            break;
        }
    }

    tracing::info!(sessions = app.controller.store().sessions().len(), "Shutting down");
    Ok(())
}
