//! ahorro-ingest: HTML promotion page parsers built on an ordered cascade of extraction tiers.

pub mod cascade;
pub mod parsers;
pub mod types;

pub use cascade::{CascadeOutcome, Tier, run_cascade};
pub use parsers::{BersaParser, BnaParser, PageParser, parser_for};
pub use types::{PromotionDraft, RawRecord};
