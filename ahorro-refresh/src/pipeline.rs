//! One bank's fetch → parse → categorize run.

use ahorro_core::{BankId, PromoError, Promotion};
use ahorro_ingest::{PageParser, parser_for};
use tracing::info;

use crate::category_rules::categorize;
use crate::discount::discount_from_text;
use crate::proxy::PageSource;

pub const BNA_URL: &str = "https://www.bna.com.ar/Personas/DescuentosYPromociones";
pub const BERSA_URL: &str = "https://www.bancoentrerios.com.ar/personas/beneficios";

/// Where each scraped bank publishes its promotions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankSources {
    pub bna_url: String,
    pub bersa_url: String,
}

impl Default for BankSources {
    fn default() -> Self {
        Self {
            bna_url: BNA_URL.to_string(),
            bersa_url: BERSA_URL.to_string(),
        }
    }
}

impl BankSources {
    pub fn url_for(&self, bank: BankId) -> Option<&str> {
        match bank {
            BankId::Bna => Some(&self.bna_url),
            BankId::Bersa => Some(&self.bersa_url),
            BankId::Galicia => None,
        }
    }
}

/// Turn a page into categorized promotions. Zero records is an error: it means
/// the page layout is no longer recognized, not that the bank has no offers.
pub fn promotions_from_html(bank: BankId, html: &str) -> Result<Vec<Promotion>, PromoError> {
    let parser = parser_for(bank)
        .ok_or_else(|| PromoError::Other(format!("no scraper for {bank}")))?;
    let drafts = PageParser::parse(parser, html);
    if drafts.is_empty() {
        return Err(PromoError::ParseEmpty { bank });
    }
    Ok(drafts
        .into_iter()
        .map(|d| {
            let category = categorize(bank, &d.comercio);
            let discount = discount_from_text(&[d.comercio.as_str(), d.descripcion.as_str()]);
            d.into_promotion(category, discount)
        })
        .collect())
}

pub async fn fetch_bank(
    source: &dyn PageSource,
    sources: &BankSources,
    bank: BankId,
) -> Result<Vec<Promotion>, PromoError> {
    let url = sources
        .url_for(bank)
        .ok_or_else(|| PromoError::Other(format!("no scraper for {bank}")))?;
    let html = source.fetch_text(url).await?;
    let promotions = promotions_from_html(bank, &html)?;
    info!("{bank}: extracted {} promotions", promotions.len());
    Ok(promotions)
}
