//! The persisted catalog: bank id → promotions plus metadata.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::PromoError;
use crate::promotion::Promotion;
use crate::store::{CATALOG_KEY, CatalogStore};

/// Snapshot shipped with the binary, used until a valid catalog is stored.
const BUNDLED_CATALOG: &str = include_str!("../data/promotions.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankId {
    Bna,
    Bersa,
    Galicia,
}

impl BankId {
    pub const ALL: [BankId; 3] = [BankId::Bna, BankId::Bersa, BankId::Galicia];

    /// Banks with a scraper. Galicia is curated by hand.
    pub const REFRESHABLE: [BankId; 2] = [BankId::Bna, BankId::Bersa];

    /// Catalog key.
    pub fn key(&self) -> &'static str {
        match self {
            BankId::Bna => "bna",
            BankId::Bersa => "bersa",
            BankId::Galicia => "galicia",
        }
    }

    /// Short label used in notifications.
    pub fn label(&self) -> &'static str {
        match self {
            BankId::Bna => "BNA",
            BankId::Bersa => "BERSA",
            BankId::Galicia => "Galicia",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BankId::Bna => "Banco Nación",
            BankId::Bersa => "Banco Entre Ríos",
            BankId::Galicia => "Banco Galicia",
        }
    }

    pub fn is_refreshable(&self) -> bool {
        BankId::REFRESHABLE.contains(self)
    }
}

impl fmt::Display for BankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BankId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        BankId::ALL
            .into_iter()
            .find(|b| b.key() == wanted)
            .ok_or_else(|| format!("banco desconocido: {s} (bna, bersa, galicia)"))
    }
}

/// Per-bank state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankCatalog {
    #[serde(default)]
    pub promotions: Vec<Promotion>,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub tarjetas: Vec<String>,
}

/// Every bank key is required; a stored catalog missing one does not parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub bna: BankCatalog,
    pub bersa: BankCatalog,
    pub galicia: BankCatalog,
}

impl Catalog {
    pub fn bundled() -> serde_json::Result<Catalog> {
        serde_json::from_str(BUNDLED_CATALOG)
    }

    pub fn bank(&self, bank: BankId) -> &BankCatalog {
        match bank {
            BankId::Bna => &self.bna,
            BankId::Bersa => &self.bersa,
            BankId::Galicia => &self.galicia,
        }
    }

    fn bank_mut(&mut self, bank: BankId) -> &mut BankCatalog {
        match bank {
            BankId::Bna => &mut self.bna,
            BankId::Bersa => &mut self.bersa,
            BankId::Galicia => &mut self.galicia,
        }
    }

    /// Replace a bank's promotions and stamp `lastUpdated` in one step.
    /// The card list is curated and left as is.
    pub fn replace_promotions(&mut self, bank: BankId, promotions: Vec<Promotion>, today: NaiveDate) {
        let entry = self.bank_mut(bank);
        entry.promotions = promotions;
        entry.last_updated = today.format("%Y-%m-%d").to_string();
    }

    /// Read the stored catalog, falling back to the bundled snapshot when it is
    /// missing, unreadable or lacks a bank key. Never merges the two.
    pub fn load(store: &dyn CatalogStore) -> anyhow::Result<Catalog> {
        match store.get(CATALOG_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Catalog>(&raw) {
                Ok(catalog) => return Ok(catalog),
                Err(e) => warn!("stored catalog rejected, using bundled data: {e}"),
            },
            Ok(None) => {}
            Err(e) => warn!("error loading saved data: {e}"),
        }
        Ok(Catalog::bundled()?)
    }

    pub fn save(&self, store: &dyn CatalogStore) -> Result<(), PromoError> {
        let json = serde_json::to_string(self).map_err(PromoError::storage)?;
        store.set(CATALOG_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_bundled_catalog_parses() {
        let c = Catalog::bundled().unwrap();
        for bank in BankId::ALL {
            assert!(!c.bank(bank).promotions.is_empty(), "{bank} has no promotions");
            assert!(!c.bank(bank).tarjetas.is_empty());
        }
    }

    #[test]
    fn test_missing_bank_key_falls_back_to_bundled() {
        let store = MemoryStore::new();
        store
            .set(
                CATALOG_KEY,
                r#"{"bna": {"promotions": [], "lastUpdated": "2020-01-01", "tarjetas": []},
                    "bersa": {"promotions": [], "lastUpdated": "2020-01-01", "tarjetas": []}}"#,
            )
            .unwrap();

        let loaded = Catalog::load(&store).unwrap();
        assert_eq!(loaded, Catalog::bundled().unwrap());
    }

    #[test]
    fn test_garbage_falls_back_to_bundled() {
        let store = MemoryStore::new();
        store.set(CATALOG_KEY, "{not json").unwrap();
        assert_eq!(Catalog::load(&store).unwrap(), Catalog::bundled().unwrap());

        let unavailable = MemoryStore::unavailable();
        assert_eq!(Catalog::load(&unavailable).unwrap(), Catalog::bundled().unwrap());
    }

    #[test]
    fn test_save_then_load_keeps_stored_data() {
        let store = MemoryStore::new();
        let mut c = Catalog::bundled().unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        c.replace_promotions(BankId::Bna, Vec::new(), today);
        c.save(&store).unwrap();

        let loaded = Catalog::load(&store).unwrap();
        assert_eq!(loaded.bna.last_updated, "2026-03-02");
        assert!(loaded.bna.promotions.is_empty());
        assert_eq!(loaded.galicia, c.galicia);
    }

    #[test]
    fn test_unaccented_weekday_keeps_stored_catalog() {
        let store = MemoryStore::new();
        store
            .set(
                CATALOG_KEY,
                r#"{"bna": {"promotions": [{"id": 1, "comercio": "YPF", "dias": ["Miercoles"]}],
                            "lastUpdated": "2099-01-01", "tarjetas": []},
                    "bersa": {"promotions": [], "lastUpdated": "", "tarjetas": []},
                    "galicia": {"promotions": [], "lastUpdated": "", "tarjetas": []}}"#,
            )
            .unwrap();

        let loaded = Catalog::load(&store).unwrap();
        assert_eq!(loaded.bna.last_updated, "2099-01-01");
        assert_eq!(loaded.bna.promotions[0].dias, vec![crate::Weekday::Miercoles]);
    }

    #[test]
    fn test_bank_id_parsing() {
        assert_eq!("BERSA".parse::<BankId>().unwrap(), BankId::Bersa);
        assert!("santander".parse::<BankId>().is_err());
        assert!(!BankId::Galicia.is_refreshable());
    }
}
