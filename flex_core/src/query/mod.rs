//! Listing query encoding
//!
//! This module turns the filter and sort state of a listing page into the
//! payload sent to the backend's search endpoints:
//! - Field catalogs describing what each page can filter on
//! - Filter rows, their lifecycle, and sanitization
//! - Sort rows and their de-duplication
//! - Search requests with pagination
//! - A debounced session that refetches after edits settle

mod catalog;
mod filter;
mod order;
mod query_errors;
mod search;
mod session;
mod types;

pub mod pages;

// Re-export all public types
pub use catalog::*;
pub use filter::*;
pub use order::*;
pub use query_errors::*;
pub use search::*;
pub use session::*;
pub use types::*;
