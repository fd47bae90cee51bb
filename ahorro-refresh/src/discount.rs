//! Discount percentage read from free text ("25% de descuento").

use regex::Regex;
use std::sync::LazyLock;

static PERCENT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(\d{1,3})\s?%").ok());

/// Highest percentage mentioned across `texts`, capped at 100.
pub fn discount_from_text(texts: &[&str]) -> Option<u32> {
    let re = PERCENT.as_ref()?;
    texts
        .iter()
        .flat_map(|t| re.captures_iter(t))
        .filter_map(|c| c[1].parse::<u32>().ok())
        .filter(|n| *n <= 100)
        .max()
}
