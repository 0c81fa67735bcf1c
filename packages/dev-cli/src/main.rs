//! Terminal harness for the reply widget pipeline.
//!
//! Resolves a ticket (CLI flags override the query fallback), runs a full
//! resolution cycle against the real directory service, and prints the
//! session summary plus the generated draft.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use directory_client::DirectoryClient;
use reply_widget::{format_clock_time, trim_text, RandomPicker, Status, Tone, Widget, WidgetConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Parser)]
#[command(name = "reply-dev", about = "Exercise the reply widget pipeline from the terminal")]
struct Args {
    /// Requester email (overrides the query fallback default)
    #[arg(long)]
    email: Option<String>,

    /// Ticket subject
    #[arg(long)]
    subject: Option<String>,

    /// Ticket description
    #[arg(long)]
    description: Option<String>,

    /// Draft tone
    #[arg(long, value_enum, default_value_t = ToneArg::Friendly)]
    tone: ToneArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum ToneArg {
    Friendly,
    Concise,
}

impl From<ToneArg> for Tone {
    fn from(tone: ToneArg) -> Self {
        match tone {
            ToneArg::Friendly => Tone::Friendly,
            ToneArg::Concise => Tone::Concise,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,reply_widget=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = WidgetConfig::from_env().context("Failed to load configuration")?;

    let location = build_location(&config, &args)?;
    let directory = DirectoryClient::new(config.directory_base_url);

    let mut widget = Widget::new(directory, RandomPicker::new()).with_location(location);
    widget.initialize().await;
    widget.set_tone(args.tone.into());

    print_summary(&widget);
    Ok(())
}

/// Fold CLI overrides into a synthetic location URL so the widget's query
/// fallback picks them up, the same way an embedded deployment would.
fn build_location(config: &WidgetConfig, args: &Args) -> Result<String> {
    let base = config
        .location_url
        .as_deref()
        .unwrap_or("https://widget.local/");
    let mut url = Url::parse(base).context("Widget location must be a valid URL")?;

    {
        let mut pairs = url.query_pairs_mut();
        if let Some(email) = &args.email {
            pairs.append_pair("email", email);
        }
        if let Some(subject) = &args.subject {
            pairs.append_pair("subject", subject);
        }
        if let Some(description) = &args.description {
            pairs.append_pair("description", description);
        }
    }
    Ok(url.into())
}

fn print_summary(widget: &Widget<DirectoryClient, RandomPicker>) {
    let state = widget.state();

    let status = match &state.status {
        Status::Ready => "ready".green().bold(),
        Status::NotFound => "not found".yellow().bold(),
        Status::Error(_) => state.status.to_string().red().bold(),
        other => other.to_string().normal(),
    };
    println!("{} {}", "Status:".bold(), status);

    if let Some(ticket) = &state.ticket {
        println!("{} {}", "Ticket:".bold(), trim_text(Some(&ticket.subject), 60));
        println!("        {}", trim_text(Some(&ticket.email), 40).dimmed());
    }

    if let Some(customer) = &state.customer {
        let company = customer
            .company
            .as_ref()
            .map_or("-", |c| c.name.as_str());
        println!(
            "{} {} (#{}) at {}",
            "Customer:".bold(),
            customer.name,
            customer.id,
            company
        );
    }

    if !state.posts.is_empty() {
        println!("{}", "Recent posts:".bold());
        for (i, title) in state.posts.iter().enumerate() {
            println!("  {}. {}", i + 1, trim_text(Some(title), 90));
        }
    }

    if let Some(updated) = state.last_updated_at {
        let local = updated.with_timezone(&Local);
        println!("{} {}", "Updated:".bold(), format_clock_time(&local));
    }

    println!();
    println!("{}", "Reply draft".bold().underline());
    println!("{}", widget.draft());
}
