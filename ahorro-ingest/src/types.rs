use ahorro_core::{Category, DEFAULT_VIGENCIA, Promotion, Tarjetas};

/// What a single extraction tier pulls out of one page element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub title: String,
    pub description: Option<String>,
    pub vigencia: Option<String>,
}

/// Parser output: a promotion with everything but its category and discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionDraft {
    pub id: u32,
    pub comercio: String,
    pub descripcion: String,
    pub detalle: String,
    pub vigencia: String,
}

impl PromotionDraft {
    pub(crate) fn from_raw(id: u32, raw: RawRecord) -> Self {
        let detalle = raw.description.unwrap_or_default();
        let descripcion = if detalle.is_empty() {
            raw.title.clone()
        } else {
            detalle.clone()
        };
        PromotionDraft {
            id,
            comercio: raw.title,
            descripcion,
            detalle,
            vigencia: raw.vigencia.unwrap_or_else(|| DEFAULT_VIGENCIA.to_string()),
        }
    }

    /// Scraped promotions apply to every card on every day.
    pub fn into_promotion(self, categoria: Category, descuento: Option<u32>) -> Promotion {
        Promotion {
            id: self.id,
            comercio: self.comercio,
            descripcion: self.descripcion,
            detalle: self.detalle,
            tarjetas: Tarjetas::Todas,
            categoria,
            vigencia: self.vigencia,
            descuento,
            dias: Vec::new(),
        }
    }
}
