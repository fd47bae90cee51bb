//! Deterministic keyword rules mapping a merchant/title to a category.
//!
//! Each bank keeps its own ordered table; the first rule with a keyword
//! contained in the lowercased title wins, otherwise `Otros`.

use ahorro_core::{BankId, Category};

#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub keywords: &'static [&'static str],
    pub category: Category,
}

const fn rule(category: Category, keywords: &'static [&'static str]) -> CategoryRule {
    CategoryRule { keywords, category }
}

pub static BNA_RULES: &[CategoryRule] = &[
    rule(Category::Combustible, &["shell", "ypf", "axion"]),
    rule(Category::Supermercado, &["coto", "vital", "carrefour", "disco", "jumbo"]),
    rule(Category::Indumentaria, &["grimoldi", "montagne", "ropa", "city"]),
    rule(Category::Farmacia, &["farmaplus", "parfum", "farma"]),
    rule(Category::Libreria, &["yenny", "cuspide", "libr"]),
    rule(Category::Entretenimiento, &["juguete", "cine", "teatro"]),
    rule(Category::Tecnologia, &["tienda", "tech", "electro"]),
    rule(Category::Gastronomia, &["mcdonald", "burger", "gastro", "restaur"]),
];

pub static BERSA_RULES: &[CategoryRule] = &[
    rule(Category::Gastronomia, &["mcdonald", "burger", "gastro", "restaur"]),
    rule(
        Category::Viajes,
        &["aerolínea", "aerolinea", "vuelo", "viaj", "transporte", "modo"],
    ),
    rule(Category::Supermercado, &["super", "mayorista"]),
    rule(
        Category::Entretenimiento,
        &["cine", "carnaval", "festival", "experiencia", "recital"],
    ),
    rule(Category::Indumentaria, &["city", "ropa", "indumentaria"]),
    rule(Category::Combustible, &["shell", "ypf", "combust"]),
    rule(Category::Farmacia, &["farma", "parfum"]),
];

/// Rule table for a bank. Galicia has none, so everything is `Otros`.
pub fn rules_for(bank: BankId) -> &'static [CategoryRule] {
    match bank {
        BankId::Bna => BNA_RULES,
        BankId::Bersa => BERSA_RULES,
        BankId::Galicia => &[],
    }
}

pub fn categorize_with(rules: &[CategoryRule], title: &str) -> Category {
    let t = title.to_lowercase();
    rules
        .iter()
        .find(|r| r.keywords.iter().any(|k| t.contains(k)))
        .map(|r| r.category)
        .unwrap_or(Category::Otros)
}

pub fn categorize(bank: BankId, title: &str) -> Category {
    categorize_with(rules_for(bank), title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bna_rules() {
        assert_eq!(categorize(BankId::Bna, "YPF Serviclub"), Category::Combustible);
        assert_eq!(categorize(BankId::Bna, "COTO Digital"), Category::Supermercado);
        assert_eq!(categorize(BankId::Bna, "Librería Santa Fe"), Category::Libreria);
        assert_eq!(categorize(BankId::Bna, "Cinemark"), Category::Entretenimiento);
        assert_eq!(categorize(BankId::Bna, "Burger King"), Category::Gastronomia);
    }

    #[test]
    fn test_bersa_rules() {
        assert_eq!(categorize(BankId::Bersa, "Aerolíneas Argentinas"), Category::Viajes);
        assert_eq!(categorize(BankId::Bersa, "Pagá con MODO"), Category::Viajes);
        assert_eq!(categorize(BankId::Bersa, "Supermercados Changomas"), Category::Supermercado);
        assert_eq!(categorize(BankId::Bersa, "Festival de Jazz"), Category::Entretenimiento);
        assert_eq!(categorize(BankId::Bersa, "Combustibles Puma"), Category::Combustible);
    }

    #[test]
    fn test_tables_are_independent() {
        // "modo" only means travel for BERSA.
        assert_eq!(categorize(BankId::Bna, "MODO"), Category::Otros);
        // Rule order: "restaurante del super" is food for BERSA, groceries never reached.
        assert_eq!(
            categorize(BankId::Bersa, "Restaurante del Super"),
            Category::Gastronomia
        );
        // BNA checks fuel before clothing, BERSA clothing before fuel.
        assert_eq!(categorize(BankId::Bna, "Shell City"), Category::Combustible);
        assert_eq!(categorize(BankId::Bersa, "Shell City"), Category::Indumentaria);
    }

    #[test]
    fn test_unmatched_is_otros_and_deterministic() {
        for bank in BankId::ALL {
            assert_eq!(categorize(bank, "Zapatería Pepe"), Category::Otros);
            assert_eq!(categorize(bank, ""), Category::Otros);
            assert_eq!(categorize(bank, "Coto"), categorize(bank, "Coto"));
        }
        assert_eq!(categorize(BankId::Galicia, "YPF"), Category::Otros);
    }
}
