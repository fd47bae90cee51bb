//! Banco Nación "Descuentos y Promociones" page.
//!
//! Promotions are usually rendered as carousel slides or promo cards; older
//! layouts list them as bare `<h2>` headings followed by a paragraph.

use ahorro_core::BankId;
use scraper::Html;

use crate::cascade::{CardSignature, HeadingSignature, Tier, card_records, heading_records};
use crate::parsers::PageParser;
use crate::types::RawRecord;

const CARDS: CardSignature = CardSignature {
    containers: r#".promocion, .card-promocion, .slick-slide, [class*="promo"], [class*="beneficio"]"#,
    title: "h2, h3, h4, .title, .comercio, strong",
    description: "p, .descripcion, .desc, .detalle",
    vigencia: None,
};

const HEADINGS: HeadingSignature = HeadingSignature {
    heading: "h2",
    sibling_description: true,
    banner: Some("Descuentos y Promociones"),
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

pub struct BnaParser;

impl PageParser for BnaParser {
    fn bank(&self) -> BankId {
        BankId::Bna
    }

    fn first_id(&self) -> u32 {
        1
    }

    fn tiers(&self) -> &'static [Tier] {
        &TIERS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_promocion_blocks() {
        let html = r#"
<html><body>
  <div class="promocion"><h3>YPF</h3><p>20% en combustible</p></div>
  <div class="promocion"><h3>Coto</h3><p>25% los jueves</p></div>
  <div class="promocion"><h3>Grimoldi</h3><p>6 cuotas sin interés</p></div>
</body></html>"#;

        let drafts = BnaParser.parse(html);
        assert_eq!(drafts.len(), 3);
        let ids: Vec<u32> = drafts.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(drafts[0].comercio, "YPF");
        assert_eq!(drafts[0].descripcion, "20% en combustible");
        assert_eq!(drafts[0].detalle, "20% en combustible");
        assert_eq!(drafts[2].comercio, "Grimoldi");
        assert_eq!(drafts[2].descripcion, "6 cuotas sin interés");
        assert!(drafts.iter().all(|d| d.vigencia == "Vigente"));
    }

    #[test]
    fn test_short_titles_are_dropped_and_ids_stay_sequential() {
        let html = r#"
  <div class="slick-slide"><strong>X</strong></div>
  <div class="slick-slide"><strong>Shell</strong></div>
  <div class="slick-slide"><span>no title</span></div>
  <div class="slick-slide"><strong>Farmaplus</strong><span class="detalle">10% off</span></div>"#;

        let drafts = BnaParser.parse(html);
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].id, 1);
        assert_eq!(drafts[0].comercio, "Shell");
        assert_eq!(drafts[0].descripcion, "Shell");
        assert_eq!(drafts[0].detalle, "");
        assert_eq!(drafts[1].id, 2);
        assert_eq!(drafts[1].descripcion, "10% off");
    }

    #[test]
    fn test_heading_fallback_skips_banner_and_reads_sibling() {
        let html = r#"
<main>
  <h2>Descuentos y Promociones</h2>
  <h2>Carrefour</h2>
  <div>15% de descuento los martes</div>
  <h2>Cine Hoyts</h2>
</main>"#;

        let drafts = BnaParser.parse(html);
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].comercio, "Carrefour");
        assert_eq!(drafts[0].descripcion, "15% de descuento los martes");
        assert_eq!(drafts[0].id, 1);
        assert_eq!(drafts[1].comercio, "Cine Hoyts");
        assert_eq!(drafts[1].descripcion, "Cine Hoyts");
    }

    #[test]
    fn test_card_tier_shadows_headings() {
        let html = r#"
  <h2>Carrefour</h2>
  <div class="card-promocion"><h4>Jumbo</h4></div>"#;
        let drafts = BnaParser.parse(html);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].comercio, "Jumbo");
    }

    #[test]
    fn test_unrecognized_page_is_empty() {
        assert!(BnaParser.parse("<html><body><p>Mantenimiento</p></body></html>").is_empty());
    }
}
