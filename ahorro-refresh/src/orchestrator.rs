//! Refresh both scraped banks concurrently and merge what succeeded.

use ahorro_core::{BankId, Catalog, PromoError, Promotion};
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::pipeline::{BankSources, fetch_bank};
use crate::proxy::PageSource;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    /// Every attempted bank succeeded.
    Full,
    /// Some but not all attempted banks succeeded.
    Partial,
    /// No bank succeeded; nothing was changed or persisted.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankOutcome {
    pub bank: BankId,
    /// Number of promotions stored, or the user-facing failure text.
    pub result: Result<usize, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub outcomes: Vec<BankOutcome>,
    pub status: RefreshStatus,
    pub persisted: bool,
}

impl RefreshReport {
    /// "BNA: <message>" for each failed bank.
    pub fn errors(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.result {
                Ok(_) => None,
                Err(msg) => Some(format!("{}: {msg}", o.bank)),
            })
            .collect()
    }

    pub fn notification(&self) -> Notification {
        let errors = self.errors().join(". ");
        match self.status {
            RefreshStatus::Full => Notification {
                message: "✅ Promociones actualizadas correctamente".to_string(),
                severity: Severity::Success,
            },
            RefreshStatus::Partial => Notification {
                message: format!("⚠️ Actualización parcial. {errors}"),
                severity: Severity::Warning,
            },
            RefreshStatus::Failed => Notification {
                message: format!("❌ No se pudo actualizar. Se mantienen los datos guardados. {errors}"),
                severity: Severity::Error,
            },
        }
    }
}

/// Apply settled per-bank results. Successful banks are replaced wholesale;
/// failed banks are left exactly as they were.
pub fn merge_results(
    catalog: &mut Catalog,
    results: Vec<(BankId, Result<Vec<Promotion>, PromoError>)>,
    today: NaiveDate,
) -> (Vec<BankOutcome>, RefreshStatus) {
    let mut outcomes = Vec::with_capacity(results.len());
    for (bank, result) in results {
        let result = match result {
            _ if !bank.is_refreshable() => {
                warn!("{bank} is curated by hand, ignoring scraped result");
                Err(PromoError::Other(format!("{bank} has no scraper")).to_string())
            }
            Ok(promotions) if !promotions.is_empty() => {
                let n = promotions.len();
                catalog.replace_promotions(bank, promotions, today);
                Ok(n)
            }
            Ok(_) => Err(PromoError::ParseEmpty { bank }.to_string()),
            Err(e) => {
                warn!("{bank} refresh failed: {e}");
                Err(e.to_string())
            }
        };
        outcomes.push(BankOutcome { bank, result });
    }

    let ok = outcomes.iter().filter(|o| o.result.is_ok()).count();
    let status = if ok == outcomes.len() && ok > 0 {
        RefreshStatus::Full
    } else if ok > 0 {
        RefreshStatus::Partial
    } else {
        RefreshStatus::Failed
    };
    (outcomes, status)
}

pub struct RefreshOrchestrator {
    source: Box<dyn PageSource>,
    sources: BankSources,
}

impl RefreshOrchestrator {
    pub fn new(source: Box<dyn PageSource>, sources: BankSources) -> Self {
        Self { source, sources }
    }

    /// Refresh BNA and BERSA. Returns `None` without doing anything when a
    /// refresh is already in flight.
    pub async fn refresh(&self, state: &AppState) -> Option<RefreshReport> {
        let Some(_guard) = state.try_begin_refresh() else {
            info!("refresh already in progress, ignoring request");
            return None;
        };

        let source = self.source.as_ref();
        let [first, second] = BankId::REFRESHABLE;
        let (first_result, second_result) = tokio::join!(
            fetch_bank(source, &self.sources, first),
            fetch_bank(source, &self.sources, second),
        );

        let today = state.today();
        let mut catalog = state.catalog_mut();
        let (outcomes, status) = merge_results(
            &mut catalog,
            vec![(first, first_result), (second, second_result)],
            today,
        );

        let mut persisted = false;
        if status != RefreshStatus::Failed {
            match catalog.save(state.store()) {
                Ok(()) => persisted = true,
                Err(e) => warn!("error saving data: {e}"),
            }
        }
        info!("refresh finished: {status:?} (persisted: {persisted})");

        Some(RefreshReport {
            outcomes,
            status,
            persisted,
        })
    }
}
