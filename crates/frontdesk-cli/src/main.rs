//! frontdesk CLI: Command-line interface for the frontdesk chat client

use clap::{Parser, Subcommand};
use frontdesk_engine::{
    ChatRequest, ChatResponse, ChatService, Config, ConversationController, HttpChatService,
};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Terminal chat client for an AI receptionist service
#[derive(Parser)]
#[command(name = "frontdesk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: .frontdesk/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the chat service, overriding config and environment
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat TUI (default when no command specified)
    Tui,

    /// Send one message and print the reply
    Send {
        /// Message text
        text: String,

        /// Continue an existing conversation
        #[arg(long)]
        conversation: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the service to discard a conversation
    Clear {
        /// Conversation id
        conversation_id: String,
    },

    /// Print the effective configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default config file
    Init,
}

const FRONTDESK_DIR: &str = ".frontdesk";

/// Environment variable holding the log filter.
const ENV_LOG: &str = "FRONTDESK_LOG";

const DEFAULT_LOG_FILTER: &str = "frontdesk=info";

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult {
    let tui_mode = matches!(cli.command, None | Some(Commands::Tui));
    init_logging(tui_mode)?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| Path::new(FRONTDESK_DIR).join("config.json"));

    if let Some(Commands::Init) = cli.command {
        return cmd_init(&config_path);
    }

    let config = resolve_config(&config_path, cli.api_url.as_deref())?;
    tracing::debug!(api = %config.api_base_url, path = %config_path.display(), "resolved config");

    let rt = tokio::runtime::Runtime::new()?;
    match cli.command {
        None | Some(Commands::Tui) => {
            let service = Arc::new(HttpChatService::new(&config.api_base_url)?);
            let api_label = service.base_url().to_string();
            let controller = ConversationController::from_config(service, &config);
            rt.block_on(frontdesk_tui::run_tui(controller, api_label))
        }
        Some(Commands::Send {
            text,
            conversation,
            json,
        }) => rt.block_on(cmd_send(&config, &text, conversation, json)),
        Some(Commands::Clear { conversation_id }) => {
            rt.block_on(cmd_clear(&config, &conversation_id))
        }
        Some(Commands::Config { json }) => cmd_config(&config, &config_path, json),
        Some(Commands::Init) => Ok(()),
    }
}

/// Defaults, then the config file, then the environment, then flags.
fn resolve_config(
    path: &Path,
    api_url: Option<&str>,
) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default(path)?;
    config.apply_env()?;
    if let Some(url) = api_url {
        config.api_base_url = url.to_string();
    }
    config.validate()?;
    Ok(config)
}

/// Install the tracing subscriber. The TUI owns the terminal, so it logs to
/// a file; one-shot commands log to stderr.
fn init_logging(tui_mode: bool) -> CliResult {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if tui_mode {
        let log_dir = Path::new(FRONTDESK_DIR).join("logs");
        std::fs::create_dir_all(&log_dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join("frontdesk.log"))?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}

async fn cmd_send(
    config: &Config,
    text: &str,
    conversation: Option<String>,
    json: bool,
) -> CliResult {
    let text = text.trim();
    if text.is_empty() {
        return Err("message is empty".into());
    }

    let service = HttpChatService::new(&config.api_base_url)?;
    let mut request = ChatRequest::new(text, conversation);
    request.user_name.clone_from(&config.user_name);
    request.user_email.clone_from(&config.user_email);

    let call = service.send_message(&request);
    let response = match config.request_timeout() {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| format!("no reply within {}s", limit.as_secs()))??,
        None => call.await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render_reply(&response));
    }
    Ok(())
}

/// Human-readable form of a reply.
fn render_reply(response: &ChatResponse) -> String {
    let mut out = format!("{}\n", response.reply);

    if let Some(id) = &response.conversation_id {
        out.push_str(&format!("\nConversation: {id}\n"));
    }
    if let Some(actions) = response.suggested_actions.as_ref().filter(|a| !a.is_empty()) {
        out.push_str("\nSuggested:\n");
        for action in actions {
            out.push_str(&format!("  - {action}\n"));
        }
    }
    if response.requires_followup {
        out.push_str("\nA staff member will follow up.\n");
    }
    out
}

async fn cmd_clear(config: &Config, conversation_id: &str) -> CliResult {
    let service = HttpChatService::new(&config.api_base_url)?;
    service.clear_conversation(conversation_id).await?;
    println!("Cleared conversation {conversation_id}");
    Ok(())
}

fn cmd_config(config: &Config, path: &Path, json: bool) -> CliResult {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };
    println!("Config file:      {source}");
    println!("API base URL:     {}", config.api_base_url);
    match config.request_timeout() {
        Some(limit) => println!("Request timeout:  {}s", limit.as_secs()),
        None => println!("Request timeout:  disabled"),
    }
    println!(
        "User name:        {}",
        config.user_name.as_deref().unwrap_or("-")
    );
    println!(
        "User email:       {}",
        config.user_email.as_deref().unwrap_or("-")
    );
    Ok(())
}

fn cmd_init(path: &Path) -> CliResult {
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }
    Config::default().save(path)?;
    println!("Created {}", path.display());
    Ok(())
}
