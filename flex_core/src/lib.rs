//! Core logic of the FlexPrice console: calendar billing anchors, listing
//! query encoding, and subscription drafts.

pub mod billing;
pub mod config;
pub mod debounce;
pub mod pricing;
pub mod query;
pub mod subscription;

pub use billing::{BillingPeriod, calculate_anchor, calculate_anchor_for_code};
pub use config::EncoderConfig;
pub use query::{
    FilterCatalog, FilterField, FilterRow, SearchRequest, SortOption, TypedBackendFilter,
    sanitize_filters, sanitize_sorts,
};
