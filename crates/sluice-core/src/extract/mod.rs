//! Name extraction over a loaded capture export.
//!
//! Cookies come from `Cookie:`/`Set-Cookie:` header lines; parameters from
//! query strings, form-encoded request bodies and, optionally, JSON keys.
//! The two extractors are independent and may run in either order.

mod cookies;
mod params;

pub use cookies::extract_cookies;
pub use params::{extract_parameters, ParamOptions};
