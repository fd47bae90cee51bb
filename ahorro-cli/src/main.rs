use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use ahorro_core::time;
use ahorro_core::{BankId, Catalog, Category, FileStore, Filter, Weekday, category_summary};
use ahorro_refresh::{AppState, ProxyFetcher, RefreshOrchestrator, RefreshStatus, ReqwestTransport};

mod config;
mod render;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "ahorro",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("AHORRO_BUILD_SHA"), ")"),
    about = "Bank card promotions browser (BNA, BERSA, Galicia)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List a bank's promotions, best discount first
    List {
        #[arg(long, default_value = "bna")]
        bank: BankId,

        /// Card name (substring match); "Todas" disables the filter
        #[arg(long)]
        card: Option<String>,

        /// Category label, e.g. Supermercado
        #[arg(long)]
        category: Option<String>,

        /// Weekday, e.g. Jueves or JUE
        #[arg(long, conflicts_with = "today")]
        day: Option<Weekday>,

        /// Only promotions valid today
        #[arg(long)]
        today: bool,
    },

    /// Categories present for a bank with their best discount
    Categories {
        #[arg(long, default_value = "bna")]
        bank: BankId,
    },

    /// Cards known for a bank
    Cards {
        #[arg(long, default_value = "bna")]
        bank: BankId,
    },

    /// Scrape BNA and BERSA and merge what succeeds into the stored catalog
    Refresh,

    /// Replace the stored catalog with the bundled snapshot
    Reset,

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.appahorro/config.toml with defaults
    Init,
    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },

        Command::List {
            bank,
            card,
            category,
            day,
            today,
        } => {
            let cfg = config::load_config()?;
            let state = open_state(&cfg)?;
            let day = if today {
                Some(time::today_weekday(&cfg.scrape.timezone)?)
            } else {
                day
            };
            let filter = Filter {
                card: card.filter(|c| !c.eq_ignore_ascii_case("todas")),
                category: category.as_deref().map(parse_category).transpose()?,
                day,
            };
            let catalog = state.catalog();
            print!("{}", render::listing(bank, catalog.bank(bank), &filter));
        }

        Command::Categories { bank } => {
            let cfg = config::load_config()?;
            let state = open_state(&cfg)?;
            let catalog = state.catalog();
            println!("{}\n", render::status_line(bank, catalog.bank(bank)));
            print!("{}", render::summary(&category_summary(&catalog.bank(bank).promotions)));
        }

        Command::Cards { bank } => {
            let cfg = config::load_config()?;
            let state = open_state(&cfg)?;
            for card in &state.catalog().bank(bank).tarjetas {
                println!("{card}");
            }
        }

        Command::Refresh => {
            let cfg = config::load_config()?;
            let state = open_state(&cfg)?;
            let fetcher = ProxyFetcher::new(
                ReqwestTransport::new()?,
                cfg.scrape.relays.clone(),
                cfg.scrape.timeout(),
            );
            let orchestrator = RefreshOrchestrator::new(Box::new(fetcher), cfg.scrape.sources());

            let Some(report) = orchestrator.refresh(&state).await else {
                println!("Ya hay una actualización en curso.");
                return Ok(());
            };

            for o in &report.outcomes {
                if let Ok(n) = o.result {
                    println!("{}: {n} promociones", o.bank.display_name());
                }
            }
            println!("{}", report.notification().message);
            if report.status == RefreshStatus::Failed {
                bail!("refresh failed for every bank");
            }
        }

        Command::Reset => {
            let cfg = config::load_config()?;
            let store = FileStore::new(cfg.data_dir()?);
            Catalog::bundled()?.save(&store)?;
            println!("Restored bundled catalog to {}", store.dir().display());
        }
    }

    Ok(())
}

fn open_state(cfg: &config::Config) -> Result<AppState> {
    let store = FileStore::new(cfg.data_dir()?);
    AppState::load(Box::new(store), &cfg.scrape.timezone)
}

fn parse_category(s: &str) -> Result<Category> {
    let c = Category::from_label(s);
    if c == Category::Otros && !s.trim().eq_ignore_ascii_case("otros") {
        bail!(
            "unknown category '{s}' (one of: {})",
            Category::ALL.map(|c| c.as_str()).join(", ")
        );
    }
    Ok(c)
}
