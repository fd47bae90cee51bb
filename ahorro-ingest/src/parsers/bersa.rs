//! Banco Entre Ríos "Beneficios" page.

use ahorro_core::BankId;
use scraper::Html;

use crate::cascade::{CardSignature, HeadingSignature, Tier, card_records, heading_records};
use crate::parsers::PageParser;
use crate::types::RawRecord;

const CARDS: CardSignature = CardSignature {
    containers: r#".card, .promocion, [class*="beneficio"], [class*="promo"], .slick-slide"#,
    title: "h2, h3, h4, .title, .nombre, strong",
    description: "p, .descripcion, .texto, .detalle",
    vigencia: Some(r#".vigencia, .fecha, [class*="vigencia"]"#),
};

const HEADINGS: HeadingSignature = HeadingSignature {
    heading: "h3",
    sibling_description: false,
    banner: None,
};

fn cards(doc: &Html) -> Vec<RawRecord> {
    card_records(doc, &CARDS)
}

fn headings(doc: &Html) -> Vec<RawRecord> {
    heading_records(doc, &HEADINGS)
}

static TIERS: [Tier; 2] = [
    Tier { name: "cards", extract: cards },
    Tier { name: "headings", extract: headings },
];

pub struct BersaParser;

impl PageParser for BersaParser {
    fn bank(&self) -> BankId {
        BankId::Bersa
    }

    /// Offset so BERSA ids never collide with BNA ids held alongside them.
    fn first_id(&self) -> u32 {
        101
    }

    fn tiers(&self) -> &'static [Tier] {
        &TIERS
    }
}
