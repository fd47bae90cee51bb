//! ahorro-refresh: relay fetching, per-bank categorization rules and the refresh orchestrator

pub mod category_rules;
pub mod discount;
pub mod orchestrator;
pub mod pipeline;
pub mod proxy;
pub mod state;

pub use category_rules::categorize;
pub use orchestrator::{
    BankOutcome, Notification, RefreshOrchestrator, RefreshReport, RefreshStatus, Severity,
};
pub use pipeline::{BankSources, fetch_bank, promotions_from_html};
pub use proxy::{PageSource, ProxyFetcher, ReqwestTransport, Transport};
pub use state::AppState;
