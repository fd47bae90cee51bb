//! Bank-specific promotion page parsers.

pub mod bersa;
pub mod bna;

use ahorro_core::BankId;
use scraper::Html;
use tracing::debug;

use crate::cascade::{Tier, run_cascade};
use crate::types::PromotionDraft;

pub use bersa::BersaParser;
pub use bna::BnaParser;

/// Turns a bank's promotions page into drafts. An empty result means no tier
/// recognized the page.
pub trait PageParser: Send + Sync {
    fn bank(&self) -> BankId;

    /// First id handed out; later records count up from here.
    fn first_id(&self) -> u32;

    fn tiers(&self) -> &'static [Tier];

    fn parse(&self, html: &str) -> Vec<PromotionDraft> {
        let doc = Html::parse_document(html);
        let outcome = run_cascade(&doc, self.tiers());
        debug!(
            "{}: {} records via tier {:?}",
            self.bank(),
            outcome.records.len(),
            outcome.tier
        );
        outcome
            .records
            .into_iter()
            .zip(self.first_id()..)
            .map(|(raw, id)| PromotionDraft::from_raw(id, raw))
            .collect()
    }
}

/// Parser for a bank, if one exists. Galicia is curated by hand.
pub fn parser_for(bank: BankId) -> Option<&'static dyn PageParser> {
    match bank {
        BankId::Bna => Some(&BnaParser),
        BankId::Bersa => Some(&BersaParser),
        BankId::Galicia => None,
    }
}
