//! ahorro-core: promotion and catalog types, catalog storage and filtering

pub mod catalog;
pub mod error;
pub mod filter;
pub mod promotion;
pub mod store;
pub mod time;

pub use catalog::{BankCatalog, BankId, Catalog};
pub use error::PromoError;
pub use filter::{CategorySummary, Filter, category_summary};
pub use promotion::{ALL_CARDS, Category, DEFAULT_VIGENCIA, Promotion, Tarjetas, Weekday};
pub use store::{CATALOG_KEY, CatalogStore, FileStore, MemoryStore};
