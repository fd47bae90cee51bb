//! Error kinds surfaced by the refresh pipeline and the catalog store.

use crate::catalog::BankId;

/// User-facing text when every relay failed for a page.
pub const FETCH_UNAVAILABLE_MESSAGE: &str = "No se pudo acceder a la página. Probá más tarde.";

#[derive(Debug, thiserror::Error)]
pub enum PromoError {
    /// Every relay failed for `url`. Retried across relays, never across time.
    #[error("No se pudo acceder a la página. Probá más tarde.")]
    FetchUnavailable { url: String },

    /// No extraction tier recognized the page. Not retried.
    #[error("No se pudieron extraer promociones de {bank}. Es posible que la página haya cambiado de formato.")]
    ParseEmpty { bank: BankId },

    /// Persistence read or write failed. Logged, never fatal.
    #[error("Almacenamiento no disponible: {0}")]
    StorageUnavailable(String),

    #[error("{0}")]
    Other(String),
}

impl PromoError {
    pub fn storage(err: impl std::fmt::Display) -> Self {
        PromoError::StorageUnavailable(err.to_string())
    }
}
