#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rc_query::{DatePreset, SortOrder, VoteOutcome};
use rollcall_client::{
    api::{HttpRollCallClient, RollCallApi},
    config::Config,
    render,
    session::{LoadState, VoteBrowser},
};

#[derive(Parser)]
#[command(name = "rollcall", about = "Browse politicians, votes and donors")]
struct Cli {
    /// Path to a YAML config file (default: config.yaml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search politicians by name
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Search campaign donors by name
    Donors {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one politician
    Show { id: String },
    /// List a politician's votes, filtered
    Votes {
        id: String,
        /// Bill-type codes to include (repeatable), e.g. --type hr --type s
        #[arg(long = "type")]
        bill_types: Vec<String>,
        /// Free-text search over bill titles and questions
        #[arg(long)]
        search: Option<String>,
        /// Vote outcomes to include (repeatable): yea, nay, present, not-voting
        #[arg(long = "outcome")]
        outcomes: Vec<VoteOutcome>,
        /// Inclusive lower date bound, YYYY-MM-DD
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Inclusive upper date bound, YYYY-MM-DD
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Date preset: last-year, last-2-years, last-5-years, all-time.
        /// Anchored on the politician's most recent recorded vote.
        #[arg(long, conflicts_with_all = ["from", "to"])]
        preset: Option<DatePreset>,
        /// Bill subject/topic
        #[arg(long)]
        subject: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Sort oldest-first instead of the default newest-first
        #[arg(long)]
        asc: bool,
    },
    /// Donation-by-industry breakdown for a politician
    Donations { id: String },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Load and validate configuration first (fail-fast)
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    // Set up logging from config
    std::env::set_var("RUST_LOG", &config.logging.level);
    tracing_subscriber::fmt::init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        "rollcall client starting"
    );

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.api.timeout_secs))
        .build()?;
    let api = Arc::new(HttpRollCallClient::with_client(
        http,
        config.api.base_url,
        config.api.key,
    ));

    match cli.command {
        Command::Search { query, page } => {
            let results = api.search_politicians(&query, page).await?;
            println!("{}", render::politician_table(&results));
        }
        Command::Donors { query, page } => {
            let results = api.search_donors(&query, page).await?;
            println!("{}", render::donor_table(&results));
        }
        Command::Show { id } => {
            let politician = api.get_politician(&id).await?;
            println!(
                "{} - {} ({}-{}), {}",
                politician.id, politician.name, politician.party, politician.state,
                politician.chamber
            );
        }
        Command::Votes {
            id,
            bill_types,
            search,
            outcomes,
            from,
            to,
            preset,
            subject,
            page,
            asc,
        } => {
            let mut browser = VoteBrowser::new(api);
            browser.select_politician(&id).await?;

            let store = Arc::clone(browser.store());
            if !bill_types.is_empty() {
                store.set_bill_types(bill_types.into_iter().collect());
            }
            if let Some(text) = search {
                // One-shot invocation: no keystrokes to debounce
                store.commit_search(text);
            }
            if !outcomes.is_empty() {
                store.set_vote_outcomes(outcomes.into_iter().collect());
            }
            if let Some(preset) = preset {
                store.apply_date_preset(preset);
            }
            if from.is_some() || to.is_some() {
                store.set_date_range(from, to);
            }
            if subject.is_some() {
                store.set_subject(subject);
            }
            if asc {
                store.set_sort_order(SortOrder::Ascending);
            }
            store.set_page(page);

            browser.refresh().await;
            match browser.votes() {
                LoadState::Ready(votes) => println!("{}", render::vote_table(votes)),
                LoadState::Error(message) => anyhow::bail!("vote fetch failed: {message}"),
                LoadState::Pending => anyhow::bail!("vote fetch did not complete"),
            }
        }
        Command::Donations { id } => {
            let politician = api.get_politician(&id).await?;
            let breakdown = api.donation_breakdown(&id).await?;
            println!("Donations by industry for {}:", politician.name);
            println!("{}", render::donation_chart(&breakdown));
        }
    }

    Ok(())
}
