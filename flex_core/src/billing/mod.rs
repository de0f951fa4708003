//! Billing periods and calendar anchors

mod anchor;
mod period;

pub use anchor::*;
pub use period::*;
