//! Tag lookup over parsed documents
//!
//! Mirrors the "find first descendant by tag name and attributes" lookup the
//! scrapers rely on. A missing tag is a hard error: it means the page no
//! longer has the shape the scraper was written for.

use crate::FindTagError;
use regex::Regex;
use scraper::node::Element;
use scraper::{ElementRef, Selector};
use std::fmt;

/// A constraint on one attribute of a candidate element
#[derive(Debug, Clone)]
pub enum AttrFilter {
    /// Attribute value equals `value`
    Equals { name: String, value: String },

    /// Attribute value matches `pattern`
    Matches { name: String, pattern: Regex },
}

impl AttrFilter {
    pub fn equals(name: &str, value: &str) -> Self {
        Self::Equals {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn matches(name: &str, pattern: Regex) -> Self {
        Self::Matches {
            name: name.to_string(),
            pattern,
        }
    }

    /// Shorthand for `equals("class", value)`
    pub fn class(value: &str) -> Self {
        Self::equals("class", value)
    }

    /// Shorthand for `equals("id", value)`
    pub fn id(value: &str) -> Self {
        Self::equals("id", value)
    }

    fn name(&self) -> &str {
        match self {
            Self::Equals { name, .. } | Self::Matches { name, .. } => name,
        }
    }

    /// Checks the filter against an element
    ///
    /// `class` is multi-valued: the filter accepts the full attribute value
    /// or any single class token.
    pub fn is_match(&self, element: &Element) -> bool {
        let Some(actual) = element.attr(self.name()) else {
            return false;
        };

        let test = |candidate: &str| match self {
            Self::Equals { value, .. } => candidate == value,
            Self::Matches { pattern, .. } => pattern.is_match(candidate),
        };

        if test(actual) {
            return true;
        }

        self.name() == "class" && actual.split_whitespace().any(test)
    }
}

impl fmt::Display for AttrFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals { name, value } => write!(f, "{}={:?}", name, value),
            Self::Matches { name, pattern } => write!(f, "{}~/{}/", name, pattern.as_str()),
        }
    }
}

fn describe(filters: &[AttrFilter]) -> String {
    let parts: Vec<String> = filters.iter().map(|f| f.to_string()).collect();
    format!("{{{}}}", parts.join(", "))
}

/// Returns every descendant of `root` named `tag` that satisfies all `filters`
pub fn find_all<'a>(root: ElementRef<'a>, tag: &str, filters: &[AttrFilter]) -> Vec<ElementRef<'a>> {
    let Ok(selector) = Selector::parse(tag) else {
        return Vec::new();
    };

    root.select(&selector)
        .filter(|el| filters.iter().all(|f| f.is_match(el.value())))
        .collect()
}

/// Returns the first descendant of `root` named `tag` that satisfies all `filters`
///
/// # Errors
///
/// Returns [`FindTagError`] (and logs it) when no such element exists.
///
/// # Example
///
/// ```
/// use pydoc_scout::html::{find_tag, AttrFilter};
/// use scraper::Html;
///
/// let doc = Html::parse_document(r#"<div class="a b"><p id="x">hi</p></div>"#);
/// let div = find_tag(doc.root_element(), "div", &[AttrFilter::class("b")]).unwrap();
/// let p = find_tag(div, "p", &[AttrFilter::id("x")]).unwrap();
/// assert_eq!(p.text().collect::<String>(), "hi");
/// ```
pub fn find_tag<'a>(
    root: ElementRef<'a>,
    tag: &str,
    filters: &[AttrFilter],
) -> Result<ElementRef<'a>, FindTagError> {
    match find_all(root, tag, filters).into_iter().next() {
        Some(element) => Ok(element),
        None => {
            let err = FindTagError {
                tag: tag.to_string(),
                filters: describe(filters),
            };
            tracing::error!("{}", err);
            Err(err)
        }
    }
}

/// Concatenated text content of an element
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
