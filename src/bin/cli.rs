//! Portfolio CLI
//!
//! Command-line interface for a running portfolio backend:
//! - Send a contact message
//! - Read the inbox and mark messages read
//! - Check status
//! - Generate a config file

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use portfolio::client::{ClientConfig, ContactApi, HttpContactApi};
use portfolio::store::{ContactFormDraft, ContactMessage};
use portfolio::views::{AdminViewer, ContactForm, MarkReadOutcome, SubmitOutcome};

#[derive(Parser)]
#[command(name = "portfolio-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage contact messages on a portfolio backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (default: PORTFOLIO_BACKEND_URL or http://localhost:8001)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a contact message
    Send {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        subject: String,
        /// Message body
        message: String,
    },

    /// List received messages
    Inbox {
        /// Only show unread messages
        #[arg(short, long)]
        unread: bool,
    },

    /// Mark a message as read
    Read {
        /// Message ID
        id: String,
    },

    /// Show backend status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let client_config = match &cli.api_url {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::default(),
    };
    let base_url = client_config.base_url.clone();
    let api: Arc<dyn ContactApi> = Arc::new(HttpContactApi::new(client_config)?);

    match cli.command {
        Commands::Send {
            name,
            email,
            subject,
            message,
        } => {
            let form = ContactForm::new(api);
            form.fill(ContactFormDraft::new(name, email, subject, message));

            match form.submit().await {
                SubmitOutcome::Sent(sent) => {
                    if cli.format == "json" {
                        println!("{}", serde_json::to_string_pretty(&sent)?);
                    } else {
                        println!("Message sent ({})", sent.id);
                    }
                }
                SubmitOutcome::Rejected(reason) => {
                    eprintln!("{}", reason);
                    std::process::exit(2);
                }
                SubmitOutcome::Failed | SubmitOutcome::Ignored => {
                    eprintln!("{}", form.error().unwrap_or_default());
                    eprintln!("Backend: {}", base_url);
                    std::process::exit(1);
                }
            }
        }

        Commands::Inbox { unread } => {
            let viewer = AdminViewer::mount(api).await;
            let state = viewer.snapshot().await;

            if let Some(error) = &state.error {
                eprintln!("{} from {}", error, base_url);
                std::process::exit(1);
            }

            let messages: Vec<&ContactMessage> = state
                .messages
                .iter()
                .filter(|m| !unread || !m.is_read)
                .collect();

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&messages)?);
            } else if messages.is_empty() {
                println!("No messages yet.");
            } else {
                print_table(&messages);
                println!();
                println!(
                    "Total messages: {} ({} unread)",
                    state.messages.len(),
                    state.unread_count()
                );
            }
        }

        Commands::Read { id } => {
            let viewer = AdminViewer::new(api);
            match viewer.mark_read(&id).await {
                MarkReadOutcome::Marked => println!("Message {} marked as read", id),
                MarkReadOutcome::Failed | MarkReadOutcome::Ignored => {
                    eprintln!("Failed to mark message {} as read", id);
                    std::process::exit(1);
                }
            }
        }

        Commands::Status => {
            let response = reqwest::Client::new()
                .get(format!("{}/health", base_url))
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("Portfolio v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!(
                        "Storage: {}",
                        health["storage"].as_str().unwrap_or("unknown")
                    );
                    if let (Some(total), Some(unread)) =
                        (health["messages"].as_u64(), health["unread"].as_u64())
                    {
                        println!("Messages: {} ({} unread)", total, unread);
                    }
                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("Backend returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to portfolio backend at {}", base_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the server is running:");
                    eprintln!("  cargo run --bin portfolio");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = portfolio::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn print_table(messages: &[&ContactMessage]) {
    println!(
        "{:<36}  {:<6}  {:<16}  {:<24}  {}",
        "ID", "Status", "Received", "From", "Subject"
    );
    println!("{}", "-".repeat(110));

    for m in messages {
        println!(
            "{:<36}  {:<6}  {:<16}  {:<24}  {}",
            m.id,
            if m.is_read { "read" } else { "unread" },
            m.timestamp.format("%Y-%m-%d %H:%M"),
            truncate(&m.email, 24),
            m.subject
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}
