//! Card / category / day filtering and the per-category discount summary.

use crate::promotion::{Category, Promotion, Weekday};

/// Active filters. `None` means "Todas"/"Todos".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub card: Option<String>,
    pub category: Option<Category>,
    pub day: Option<Weekday>,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.card.is_none() && self.category.is_none() && self.day.is_none()
    }

    pub fn matches(&self, p: &Promotion) -> bool {
        if let Some(card) = &self.card {
            if !p.tarjetas.accepts(card) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if p.categoria != category {
                return false;
            }
        }
        if let Some(day) = self.day {
            if !p.applies_on(day) {
                return false;
            }
        }
        true
    }

    /// Matching promotions, highest discount first. Ties keep catalog order.
    pub fn apply<'a>(&self, promotions: &'a [Promotion]) -> Vec<&'a Promotion> {
        let mut out: Vec<&Promotion> = promotions.iter().filter(|p| self.matches(p)).collect();
        out.sort_by(|a, b| b.discount().cmp(&a.discount()));
        out
    }

    /// Human-readable list of the active filters, e.g. "tarjeta: Visa · día: Lunes".
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(card) = &self.card {
            parts.push(format!("tarjeta: {card}"));
        }
        if let Some(category) = self.category {
            parts.push(format!("rubro: {category}"));
        }
        if let Some(day) = self.day {
            parts.push(format!("día: {day}"));
        }
        parts.join(" · ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: Category,
    pub max_discount: u32,
    pub count: usize,
}

/// Categories present in `promotions`, highest max discount first.
pub fn category_summary(promotions: &[Promotion]) -> Vec<CategorySummary> {
    let mut out: Vec<CategorySummary> = Vec::new();
    for p in promotions {
        match out.iter_mut().find(|s| s.category == p.categoria) {
            Some(s) => {
                s.max_discount = s.max_discount.max(p.discount());
                s.count += 1;
            }
            None => out.push(CategorySummary {
                category: p.categoria,
                max_discount: p.discount(),
                count: 1,
            }),
        }
    }
    out.sort_by(|a, b| b.max_discount.cmp(&a.max_discount));
    out
}
