//! Pocket Shop CLI - browse the demo catalog and fill a cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the first page of products
//! pocketshop -u emilys -p emilyspass products --limit 10
//!
//! # Search and filter
//! pocketshop products --search phone
//! pocketshop products --category beauty --sort price --desc
//!
//! # Show one product, the categories, or the logged-in profile
//! pocketshop product 1
//! pocketshop categories
//! pocketshop whoami
//!
//! # Log in, fill a cart, print its totals, then log out
//! pocketshop demo --product 1 --product 1 --product 5
//! ```
//!
//! Credentials can also come from `POCKETSHOP_USERNAME` and
//! `POCKETSHOP_PASSWORD`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand, ValueEnum};
use pocketshop_client::ClientConfig;
use pocketshop_client::api::SortField;
use pocketshop_core::Credentials;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "pocketshop")]
#[command(author, version, about = "Pocket Shop command-line shopper")]
struct Cli {
    #[command(flatten)]
    login: LoginArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct LoginArgs {
    /// Account username
    #[arg(short, long, global = true, env = "POCKETSHOP_USERNAME", default_value = "emilys")]
    username: String,

    /// Account password
    #[arg(
        short,
        long,
        global = true,
        env = "POCKETSHOP_PASSWORD",
        hide_env_values = true,
        default_value = "emilyspass"
    )]
    password: String,
}

impl LoginArgs {
    fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Page size
        #[arg(short, long, default_value_t = 30)]
        limit: u32,

        /// Number of products to skip
        #[arg(short, long, default_value_t = 0)]
        skip: u32,

        /// Full-text search
        #[arg(long, conflicts_with = "category")]
        search: Option<String>,

        /// Only products in this category (slug)
        #[arg(short, long)]
        category: Option<String>,

        /// Sort field
        #[arg(long, value_enum)]
        sort: Option<Sort>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Show one product
    Product {
        /// Product id
        id: i64,
    },
    /// List product categories
    Categories,
    /// Show the logged-in profile
    Whoami,
    /// Log in, add products to a cart, and print its totals
    Demo {
        /// Product id to add; repeat to add more than once
        #[arg(long = "product", default_value = "1")]
        products: Vec<i64>,

        /// Add the whole list this many times
        #[arg(long, default_value_t = 1)]
        times: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Sort {
    Title,
    Price,
    Rating,
    Stock,
}

impl From<Sort> for SortField {
    fn from(sort: Sort) -> Self {
        match sort {
            Sort::Title => Self::Title,
            Sort::Price => Self::Price,
            Sort::Rating => Self::Rating,
            Sort::Stock => Self::Stock,
        }
    }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };

    // Sentry before the subscriber so the tracing layer has a client
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pocketshop=info,pocketshop_client=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let credentials = cli.login.credentials();

    match cli.command {
        Commands::Products {
            limit,
            skip,
            search,
            category,
            sort,
            desc,
        } => {
            let listing = commands::catalog::Listing {
                limit,
                skip,
                search,
                category,
                sort: sort.map(SortField::from),
                descending: desc,
            };
            commands::catalog::products(config, &credentials, listing).await?;
        }
        Commands::Product { id } => {
            commands::catalog::product(config, &credentials, id).await?;
        }
        Commands::Categories => commands::catalog::categories(config, &credentials).await?,
        Commands::Whoami => commands::account::whoami(config, &credentials).await?,
        Commands::Demo { products, times } => {
            commands::demo::run(config, &credentials, &products, times).await?;
        }
    }
    Ok(())
}
