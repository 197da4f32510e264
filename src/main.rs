//! Tankobon - local manga library server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tankobon::{
    api::{self, ApiState},
    client::ApiClient,
    config::{ServerConfig, DEFAULT_BIND},
    spread::{Slot, SpreadLayout},
};

/// Local manga library server.
#[derive(Parser)]
#[command(name = "tankobon", about = "Local manga library server with RTL spreads")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Address to bind the server.
        #[arg(long, default_value = DEFAULT_BIND, env = "TANKOBON_BIND")]
        bind: String,

        /// Library root (one directory per manga).
        #[arg(long, env = "TANKOBON_LIBRARY")]
        library: Option<PathBuf>,

        /// Directory of static client assets.
        #[arg(long, env = "TANKOBON_PUBLIC")]
        public: Option<PathBuf>,
    },

    /// List manga titles.
    Manga {
        /// Tankobon server URL.
        #[arg(long, env = "TANKOBON_API_URL", default_value = "http://localhost:5173")]
        api_url: String,
    },

    /// List chapters of a manga.
    Chapters {
        #[arg(long)]
        manga: String,

        /// Tankobon server URL.
        #[arg(long, env = "TANKOBON_API_URL", default_value = "http://localhost:5173")]
        api_url: String,
    },

    /// List pages of a chapter.
    Pages {
        #[arg(long)]
        manga: String,

        #[arg(long)]
        chapter: String,

        /// Tankobon server URL.
        #[arg(long, env = "TANKOBON_API_URL", default_value = "http://localhost:5173")]
        api_url: String,
    },

    /// Print the RTL spread layout of a chapter.
    Spreads {
        #[arg(long)]
        manga: String,

        #[arg(long)]
        chapter: String,

        /// Tankobon server URL.
        #[arg(long, env = "TANKOBON_API_URL", default_value = "http://localhost:5173")]
        api_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tankobon=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            library,
            public,
        } => {
            let mut config = match library {
                Some(root) => ServerConfig::new(root),
                None => ServerConfig::default(),
            }
            .with_bind(bind);
            if let Some(dir) = public {
                config = config.with_public_dir(dir);
            }
            run_server(config).await?;
        }

        Commands::Manga { api_url } => {
            let manga = ApiClient::new(api_url).manga().await?;
            print_names(&manga, "No manga found.");
        }

        Commands::Chapters { manga, api_url } => {
            let chapters = ApiClient::new(api_url).chapters(&manga).await?;
            print_names(&chapters, "No chapters found.");
        }

        Commands::Pages {
            manga,
            chapter,
            api_url,
        } => {
            let pages = ApiClient::new(api_url).pages(&manga, &chapter).await?;
            print_names(&pages, "No pages found.");
        }

        Commands::Spreads {
            manga,
            chapter,
            api_url,
        } => {
            let pages = ApiClient::new(api_url).pages(&manga, &chapter).await?;
            print_spreads(&pages);
        }
    }

    Ok(())
}

/// Run the HTTP server.
async fn run_server(config: ServerConfig) -> Result<()> {
    tracing::info!(
        library = %config.library_root.display(),
        public = ?config.public_dir,
        "Starting Tankobon server..."
    );

    if !config.library_root.is_dir() {
        tracing::warn!(
            library = %config.library_root.display(),
            "Library root is not a directory, listings will be empty"
        );
    }

    let state = Arc::new(ApiState::new(&config));
    api::serve(state, &config.bind).await?;

    Ok(())
}

fn print_names(names: &[String], empty: &str) {
    if names.is_empty() {
        println!("{empty}");
        return;
    }
    for name in names {
        println!("{name}");
    }
}

/// Print one row per spread: left slot, right slot, reading order.
fn print_spreads(pages: &[String]) {
    let layout = SpreadLayout::new(pages);
    if layout.total() == 0 {
        println!("No pages found.");
        return;
    }

    let slot = |slot: Slot| slot.resolve(pages).map(String::as_str).unwrap_or("-");

    println!("{:<8} {:<32} {:<32} {:<10}", "SPREAD", "LEFT", "RIGHT", "PAGES");
    println!("{}", "-".repeat(84));

    for (si, spread) in layout.iter().enumerate() {
        let numbers: Vec<String> = layout
            .page_numbers(si)
            .iter()
            .map(|n| n.to_string())
            .collect();
        println!(
            "{:<8} {:<32} {:<32} {:<10}",
            si + 1,
            slot(spread.left),
            slot(spread.right),
            numbers.join(", ")
        );
    }
}
