//! Host cookie store infrastructure.
//!
//! A **cookie store** is the host side of `document.cookie`: a single ambient string
//! that can be read in full and written one entry at a time. The host decides how
//! a written entry is merged (by name and path), when expired entries disappear, and
//! which entries a given document gets to see.
//!
//! The [`CookieJar`](crate::cookies::CookieJar) never owns the cookies; it only talks
//! to a store through a [`CookieStoreHandle`](crate::cookies::CookieStoreHandle).
//!
//! This module exports these implementations:
//! - [`InMemoryCookieStore`]: host-compatible store living in memory (tests, native hosts).
//! - [`JsonCookieStore`]: the same semantics, persisted to a single JSON file.
//! - `DocumentCookieStore` (wasm32 only): the browser's own `document.cookie`.
//!
//! ## Example
//! ```rust
//! use gosub_cookies::cookies::{CookieJar, InMemoryCookieStore};
//!
//! let store = InMemoryCookieStore::new();
//! let jar = CookieJar::new(store.clone());
//!
//! jar.write_cookie("theme", "dark", Some(30.0), None);
//! assert_eq!(jar.read_cookie("theme").as_deref(), Some("dark"));
//! ```
#[cfg(target_arch = "wasm32")]
mod document;
mod in_memory;
mod json;

#[cfg(target_arch = "wasm32")]
pub use document::DocumentCookieStore;
pub use in_memory::InMemoryCookieStore;
pub use json::JsonCookieStore;

pub(crate) use in_memory::CookieList;

/// The host's ambient cookie string.
///
/// Implementations must be `Send + Sync` and safe for concurrent use. Neither method
/// reports failure: a host that cannot be reached reads as an empty string and drops
/// writes.
pub trait CookieStore: Send + Sync {
    /// Returns the full serialized cookie string visible to the current document,
    /// formatted as `name1=value1; name2=value2`.
    fn cookie_string(&self) -> String;

    /// Hands one serialized entry (`name=value[; expires=..]; path=..`) to the host.
    ///
    /// The host merges it with any cookie of the same name and path; an entry whose
    /// expiry is not in the future removes that cookie.
    fn set_cookie(&self, entry: &str);
}
