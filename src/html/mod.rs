//! HTML extraction helpers
//!
//! - `find_tag` / `find_all`: tag lookup with attribute filters
//! - `labeled_field_value`: value lookup in `<dl>` metadata blocks

mod fields;
mod locator;

pub use fields::labeled_field_value;
pub use locator::{element_text, find_all, find_tag, AttrFilter};
