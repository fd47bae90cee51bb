//! Ordered extraction tiers and the structural selectors they share.
//!
//! A tier is a pure function over the parsed document. An empty result means
//! "not recognized, try the next tier".

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::types::RawRecord;

pub type TierFn = fn(&Html) -> Vec<RawRecord>;

#[derive(Clone, Copy)]
pub struct Tier {
    pub name: &'static str,
    pub extract: TierFn,
}

/// Result of running a cascade: the tier that matched, if any, and its records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CascadeOutcome {
    pub tier: Option<&'static str>,
    pub records: Vec<RawRecord>,
}

/// Run tiers in order, stopping at the first one that yields a record.
pub fn run_cascade(doc: &Html, tiers: &[Tier]) -> CascadeOutcome {
    for tier in tiers {
        let records = (tier.extract)(doc);
        if !records.is_empty() {
            debug!("tier {} matched {} records", tier.name, records.len());
            return CascadeOutcome {
                tier: Some(tier.name),
                records,
            };
        }
        debug!("tier {} matched nothing", tier.name);
    }
    CascadeOutcome::default()
}

/// Selectors for widget-style promotion blocks.
pub struct CardSignature {
    pub containers: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub vigencia: Option<&'static str>,
}

/// Selectors for the plain-heading fallback.
pub struct HeadingSignature {
    pub heading: &'static str,
    /// Take the description from the heading's next sibling element.
    pub sibling_description: bool,
    /// Headings containing this text are the page banner, not promotions.
    pub banner: Option<&'static str>,
}

const MIN_CARD_TITLE: usize = 2;
const MIN_HEADING_TITLE: usize = 3;
const MAX_HEADING_TITLE: usize = 99;

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn first_text(el: ElementRef<'_>, sel: &Selector) -> Option<String> {
    el.select(sel)
        .next()
        .map(text_of)
        .filter(|s| !s.is_empty())
}

pub fn card_records(doc: &Html, sig: &CardSignature) -> Vec<RawRecord> {
    let (Some(containers), Some(title_sel), Some(description_sel)) = (
        selector(sig.containers),
        selector(sig.title),
        selector(sig.description),
    ) else {
        return Vec::new();
    };
    let vigencia_sel = sig.vigencia.and_then(selector);

    doc.select(&containers)
        .filter_map(|el| {
            let title = first_text(el, &title_sel)?;
            if title.chars().count() < MIN_CARD_TITLE {
                return None;
            }
            Some(RawRecord {
                title,
                description: first_text(el, &description_sel),
                vigencia: vigencia_sel.as_ref().and_then(|v| first_text(el, v)),
            })
        })
        .collect()
}

pub fn heading_records(doc: &Html, sig: &HeadingSignature) -> Vec<RawRecord> {
    let Some(heading) = selector(sig.heading) else {
        return Vec::new();
    };

    doc.select(&heading)
        .filter_map(|h| {
            let title = text_of(h);
            let len = title.chars().count();
            if !(MIN_HEADING_TITLE..=MAX_HEADING_TITLE).contains(&len) {
                return None;
            }
            if sig.banner.is_some_and(|b| title.contains(b)) {
                return None;
            }
            let description = if sig.sibling_description {
                h.next_siblings()
                    .find_map(ElementRef::wrap)
                    .map(text_of)
                    .filter(|s| !s.is_empty())
            } else {
                None
            };
            Some(RawRecord {
                title,
                description,
                vigencia: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static SECOND_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn one(_: &Html) -> Vec<RawRecord> {
        vec![RawRecord {
            title: "first".to_string(),
            description: None,
            vigencia: None,
        }]
    }

    fn none(_: &Html) -> Vec<RawRecord> {
        Vec::new()
    }

    fn counted(_: &Html) -> Vec<RawRecord> {
        SECOND_CALLS.fetch_add(1, Ordering::SeqCst);
        vec![RawRecord {
            title: "second".to_string(),
            description: None,
            vigencia: None,
        }]
    }

    #[test]
    fn test_first_non_empty_tier_wins() {
        let doc = Html::parse_document("<html></html>");
        let before = SECOND_CALLS.load(Ordering::SeqCst);

        let out = run_cascade(
            &doc,
            &[
                Tier { name: "a", extract: one },
                Tier { name: "b", extract: counted },
            ],
        );
        assert_eq!(out.tier, Some("a"));
        assert_eq!(SECOND_CALLS.load(Ordering::SeqCst), before);

        let out = run_cascade(
            &doc,
            &[
                Tier { name: "a", extract: none },
                Tier { name: "b", extract: counted },
            ],
        );
        assert_eq!(out.tier, Some("b"));
        assert_eq!(out.records[0].title, "second");
        assert_eq!(SECOND_CALLS.load(Ordering::SeqCst), before + 1);
    }

    #[test]
    fn test_empty_when_no_tier_matches() {
        let doc = Html::parse_document("<html></html>");
        let out = run_cascade(&doc, &[Tier { name: "a", extract: none }]);
        assert_eq!(out, CascadeOutcome::default());
    }

    #[test]
    fn test_heading_length_bounds() {
        let long = "x".repeat(100);
        let html = format!("<h2>ab</h2><h2>abc</h2><h2>{long}</h2>");
        let doc = Html::parse_document(&html);
        let sig = HeadingSignature {
            heading: "h2",
            sibling_description: false,
            banner: None,
        };
        let titles: Vec<String> = heading_records(&doc, &sig).into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["abc"]);
    }
}
