//! Labeled field lookup in definition lists
//!
//! Detail pages carry their metadata as `<dt>Label:</dt><dd>value</dd>`
//! pairs. The value is the first element after the label that has any
//! text, so whitespace nodes or empty separators between the two do not
//! matter. The search stops at the next `<dt>`.

use crate::html::locator::element_text;
use scraper::ElementRef;

/// Finds the value for the `<dt>` whose text is exactly `label`
///
/// Returns `None` when there is no such label, or when nothing between it
/// and the next label carries text.
pub fn labeled_field_value(container: ElementRef<'_>, label: &str) -> Option<String> {
    let label_node = container
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "dt" && element_text(*el).trim() == label)?;

    label_node
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|el| el.value().name() != "dt")
        .map(|el| element_text(el).trim().to_string())
        .find(|text| !text.is_empty())
}
