//! SWDialer CLI - Tokens and call tracking
//!
//! Talks to a running swdialer-server over HTTP.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use dialoguer::Input;

use api::{CallRecord, DialerClient, TokenGrant};
use config::Config;

#[derive(Parser)]
#[command(name = "swdialer")]
#[command(about = "SWDialer CLI - Tokens and call tracking", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue a subscriber token
    Token {
        /// Subscriber identity hint
        #[arg(short, long)]
        subscriber_id: Option<String>,
        /// Token reference label
        #[arg(short, long)]
        reference: Option<String>,
    },

    /// Refresh a subscriber token
    Refresh {
        /// Previous token
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Check a token
    Validate {
        token: String,
    },

    /// Log an outbound call
    Dial {
        /// Number to call (will prompt if not provided)
        to: Option<String>,
        /// Caller label (defaults to the configured caller id)
        #[arg(short, long)]
        from: Option<String>,
    },

    /// Mark a call as ended
    End {
        id: String,
    },

    /// Show a call
    Status {
        id: String,
    },

    /// Finished calls, most recent first
    History {
        /// Max results
        #[arg(short, long)]
        limit: Option<usize>,
        /// inbound or outbound
        #[arg(short, long)]
        direction: Option<String>,
    },

    /// Calls in progress
    Active,

    /// Check server health
    Health,

    /// Show or update configuration
    Config {
        /// Server URL
        #[arg(long)]
        base_url: Option<String>,
        /// Default caller label for dial
        #[arg(long)]
        caller_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load()?;
    let client = DialerClient::new(&config.base_url);

    match cli.command {
        Commands::Token { subscriber_id, reference } => {
            let grant = client
                .issue_token(subscriber_id.as_deref(), reference.as_deref())
                .await?;
            print_grant("Token issued", &grant);
        }

        Commands::Refresh { token } => {
            let grant = client.refresh_token(token.as_deref()).await?;
            print_grant("Token refreshed", &grant);
        }

        Commands::Validate { token } => {
            let check = client.validate_token(&token).await?;
            let verdict = if check.valid { "valid".green() } else { "invalid".red() };
            println!("{} Token {} ({})", "✓".green(), verdict, check.message.dimmed());
        }

        Commands::Dial { to, from } => {
            let to = match to {
                Some(t) => t,
                None => Input::new()
                    .with_prompt("Number to call")
                    .interact_text()
                    .context("Failed to read input")?,
            };
            let from = from.unwrap_or_else(|| config.caller_id.clone());

            let call = client.dial(&to, &from).await?;
            println!("{} Call logged", "✓".green());
            print_call(&call);
        }

        Commands::End { id } => {
            let call = client.end_call(&id).await?;
            println!("{} Call ended after {}s", "✓".green(), call.duration);
            print_call(&call);
        }

        Commands::Status { id } => {
            let call = client.call_status(&id).await?;
            print_call(&call);
        }

        Commands::History { limit, direction } => {
            let history = client.history(limit, direction.as_deref()).await?;

            if history.data.is_empty() {
                println!("No calls in history.");
                return Ok(());
            }

            println!(
                "{} ({} of {}):",
                "History".bold(),
                history.data.len().to_string().green(),
                history.total
            );
            for call in &history.data {
                print_call_line(call);
            }
        }

        Commands::Active => {
            let active = client.active().await?;

            if active.count == 0 {
                println!("No active calls.");
                return Ok(());
            }

            println!("{} ({}):", "Active calls".bold(), active.count.to_string().green());
            for call in &active.data {
                print_call_line(call);
            }
        }

        Commands::Health => {
            let report = client.health().await?;
            let status = if report.status == "healthy" {
                report.status.green()
            } else {
                report.status.yellow()
            };

            println!("{} {}", "Server:".bold(), status);
            println!("  server: {}", check_mark(report.checks.server));
            println!("  config: {}", check_mark(report.checks.config));
        }

        Commands::Config { base_url, caller_id } => cmd_config(&mut config, base_url, caller_id)?,
    }

    Ok(())
}

// ============================================
// Output helpers
// ============================================

fn check_mark(ok: bool) -> ColoredString {
    if ok {
        "✓".green()
    } else {
        "✗".red()
    }
}

fn print_grant(title: &str, grant: &TokenGrant) {
    println!("{} {}", "✓".green(), title);
    println!("  Token: {}", grant.token);
    println!(
        "  Expires: {} ({}s)",
        grant.expires_at.to_rfc3339(),
        grant.expires_in
    );
    println!(
        "  Subscriber: {}",
        grant.subscriber_id.as_deref().unwrap_or("-").cyan()
    );
    println!("  Reference: {}", grant.reference);
    println!(
        "  Space: {} ({})",
        grant.space_name,
        grant.project_id.dimmed()
    );
}

fn print_call(call: &CallRecord) {
    println!("  ID: {}", call.id.cyan());
    println!("  {} → {}", call.from, call.to);
    println!("  Direction: {}", call.direction);
    println!("  Status: {}", status_badge(&call.status));
    println!("  Started: {}", call.started_at.to_rfc3339());
    if let Some(ended_at) = call.ended_at {
        println!("  Ended: {} ({}s)", ended_at.to_rfc3339(), call.duration);
    }
}

fn print_call_line(call: &CallRecord) {
    println!(
        "  {} {} {} → {} [{}] {}s {}",
        call.started_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
        call.direction,
        call.from,
        call.to,
        status_badge(&call.status),
        call.duration,
        call.id.dimmed()
    );
}

fn status_badge(status: &str) -> ColoredString {
    match status {
        "ended" => status.dimmed(),
        "ringing" => status.yellow(),
        _ => status.green(),
    }
}

fn cmd_config(config: &mut Config, base_url: Option<String>, caller_id: Option<String>) -> Result<()> {
    if base_url.is_some() || caller_id.is_some() {
        if !config.update(base_url, caller_id) {
            bail!("Nothing to update: values must not be empty");
        }
        config.save()?;
        println!("{} Config saved to {:?}", "✓".green(), Config::config_path()?);
    }

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!("  Caller ID: {}", config.caller_id.cyan());

    Ok(())
}
