//! Plain-text rendering of promotion listings.

use ahorro_core::{BankCatalog, BankId, CategorySummary, Filter, Promotion, Tarjetas};

pub fn status_line(bank: BankId, catalog: &BankCatalog) -> String {
    let updated: &str = if catalog.last_updated.is_empty() {
        "—"
    } else {
        &catalog.last_updated
    };
    format!("{} · Actualizado: {updated}", bank.display_name())
}

pub fn count_line(n: usize) -> String {
    format!("{n} promo{}", if n == 1 { "" } else { "s" })
}

pub fn promotion_block(p: &Promotion) -> String {
    let mut out = format!("{} {}", p.categoria.icon(), p.comercio);
    if p.discount() > 0 {
        out.push_str(&format!("  [{}% OFF]", p.discount()));
    }
    out.push_str(&format!("  [{}]\n", p.categoria));
    out.push_str(&format!("   {}\n", p.description()));
    if !p.detalle.is_empty() && p.detalle != p.description() {
        out.push_str(&format!("   {}\n", p.detalle));
    }
    out.push_str(&format!("   🕒 {}", p.vigencia));
    if !p.applies_every_day() {
        let days: Vec<&str> = p.dias.iter().map(|d| d.abbreviation()).collect();
        out.push_str(&format!(" · {}", days.join(" ")));
    }
    out.push('\n');
    let cards = match &p.tarjetas {
        Tarjetas::Todas => "Todas las tarjetas".to_string(),
        Tarjetas::Cards(cards) => cards.join(", "),
    };
    out.push_str(&format!("   💳 {cards}\n"));
    out
}

pub fn listing(bank: BankId, catalog: &BankCatalog, filter: &Filter) -> String {
    let promos = filter.apply(&catalog.promotions);
    let mut out = format!("{}\n{}\n\n", status_line(bank, catalog), count_line(promos.len()));

    if promos.is_empty() {
        out.push_str("🔍 Sin promociones\n");
        out.push_str("No se encontraron promociones con los filtros seleccionados");
        if !filter.is_empty() {
            out.push_str(&format!(": {}", filter.describe()));
        }
        out.push_str(".\n");
        return out;
    }

    for p in promos {
        out.push_str(&promotion_block(p));
        out.push('\n');
    }
    out
}

pub fn summary(rows: &[CategorySummary]) -> String {
    rows.iter()
        .map(|r| {
            let discount = if r.max_discount > 0 {
                format!(" hasta {}%", r.max_discount)
            } else {
                String::new()
            };
            format!("{} {} ({}){discount}\n", r.category.icon(), r.category, r.count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahorro_core::{Catalog, Category};

    #[test]
    fn test_listing_header_and_empty_state() {
        let catalog = Catalog::bundled().unwrap();
        let filter = Filter {
            category: Some(Category::Viajes),
            ..Default::default()
        };
        let out = listing(BankId::Bna, &catalog.bna, &filter);
        assert!(out.starts_with("Banco Nación · Actualizado: "));
        assert!(out.contains("0 promos"));
        assert!(out.contains("rubro: Viajes"));
    }

    #[test]
    fn test_promotion_block_badges() {
        let catalog = Catalog::bundled().unwrap();
        let ypf = catalog.bna.promotions.iter().find(|p| p.comercio == "YPF").unwrap();
        let block = promotion_block(ypf);
        assert!(block.contains("[20% OFF]"));
        assert!(block.contains("MIÉ"));
        assert_eq!(count_line(1), "1 promo");
    }
}
