//! Page fetching
//!
//! This module contains:
//! - HTTP client construction
//! - A SQLite response cache keyed by URL
//! - `CachedSession`, the "get or refresh" session used by every mode
//! - `fetch_page`, which turns transport failures into `None`

mod cache;
mod client;
mod session;

pub use cache::{CachedResponse, ResponseCache};
pub use client::build_http_client;
pub use session::{fetch_page, CachedSession, Fetch};
