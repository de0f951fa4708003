//! Filter rows, their lifecycle, and sanitization into backend filters

mod backend;
mod sanitize;
mod state;
mod value;

pub use backend::*;
pub use sanitize::*;
pub use state::*;
pub use value::*;
