use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use librepolist::listing::github::GitHubListing;
use librepolist::service::BrowseService;
use librepolist::types::{FetchState, Repository};
use librepolist::{Config, RepolistError};

#[derive(Parser, Debug)]
#[command(name = "repo-list")]
#[command(version, about = "List a GitHub user's public repositories")]
#[command(long_about = r#"List a GitHub user's public repositories page by page.

EXAMPLES:
    # First page (30 repositories) of a user
    repo-list octocat

    # Follow pagination for up to 5 pages
    repo-list octocat --pages 5

    # Fetch everything the user has
    repo-list torvalds --all

    # JSON output for scripting
    repo-list octocat --format json
    repo-list octocat --format json | jq '.[] | .name'

    # JSONL output (one JSON object per line)
    repo-list octocat --all --format jsonl

    # Point at a GitHub Enterprise instance or a local stub
    repo-list octocat --base-url http://localhost:8080

OUTPUT FORMATS:
    text  - One repository per line with id and description (default)
    json  - JSON array (complete data structure)
    jsonl - JSON lines, one object per line (streaming-friendly)

EXIT CODES:
    0 - Success (including a user with zero repositories)
    1 - Fetch error (HTTP error status or transport failure)
    2 - Configuration error
    3 - Invalid input
"#)]
struct Args {
    /// GitHub username to list repositories for
    #[arg(value_name = "USERNAME")]
    username: String,

    /// Number of pages to fetch
    #[arg(short, long, default_value = "1", value_name = "N")]
    #[arg(help = "Fetch up to N pages (default: 1)")]
    pages: u32,

    /// Fetch all pages
    #[arg(long, conflicts_with = "pages")]
    #[arg(help = "Follow pagination until the listing is exhausted")]
    all: bool,

    /// Output format
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    #[arg(help = "Output format: text (human-readable), json (array), or jsonl (streaming)")]
    #[arg(value_parser = ["text", "json", "jsonl"])]
    format: String,

    /// Override the API base URL from the config file
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

/// Drive the browse service until the requested number of pages is loaded
/// or the listing is exhausted. Returns the final state.
async fn browse(service: &BrowseService, username: &str, pages: u32, all: bool) -> FetchState {
    let mut state = service.search(username).await;
    let mut fetched = 1u32;

    loop {
        match &state {
            FetchState::Success { has_more, .. } => {
                let want_more = *has_more && (all || fetched < pages);
                if !want_more {
                    return state;
                }
            }
            _ => return state,
        }
        state = service.load_more().await;
        fetched += 1;
    }
}

fn print_text(records: &[Repository]) {
    for record in records {
        match &record.description {
            Some(description) => println!("{:<12} {:<30} {}", record.id, record.name, description),
            None => println!("{:<12} {}", record.id, record.name),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    librepolist::logging::init_default();

    let args = Args::parse();

    tracing::debug!("repo-list started with args: {:?}", args);

    if args.username.trim().is_empty() {
        let error = RepolistError::InvalidInput("username must not be empty".to_string());
        eprintln!("Error: {}", error);
        std::process::exit(error.exit_code());
    }

    // Load configuration; a missing config file just means defaults.
    let mut config = match Config::load_or_default() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error: {}", error);
            std::process::exit(error.exit_code());
        }
    };
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
    }

    let listing = GitHubListing::new(&config.api);
    let service = BrowseService::new(Arc::new(listing));

    // Surface fetch progress on the log while pages are loading.
    let mut events = service.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::debug!("fetch event: {:?}", event);
        }
    });

    let state = browse(&service, &args.username, args.pages.max(1), args.all).await;

    let records = match state {
        FetchState::Success { records, has_more } => {
            if has_more {
                tracing::info!("More pages available; rerun with --all or a higher --pages");
            }
            records
        }
        FetchState::Error { message } => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
        // search() always leaves Success or Error behind
        other => {
            eprintln!("Error: unexpected fetch state {:?}", other);
            std::process::exit(1);
        }
    };

    match args.format.as_str() {
        "json" => {
            let json =
                serde_json::to_string_pretty(&records).context("Failed to serialize records")?;
            println!("{}", json);
        }
        "jsonl" => {
            for record in &records {
                let json = serde_json::to_string(record).context("Failed to serialize record")?;
                println!("{}", json);
            }
        }
        "text" => print_text(&records),
        _ => {
            // Unreachable: clap's value_parser rejects anything else.
            eprintln!("Error: invalid format '{}'", args.format);
            std::process::exit(3);
        }
    }

    Ok(())
}
