//! Read, write and erase single document cookies by name.
//!
//! The [`CookieJar`](cookies::CookieJar) works over whatever cookie string the host
//! exposes, reached through the [`CookieStore`](cookies::CookieStore) trait:
//! `document.cookie` in a browser, or one of the in-process stores elsewhere.

pub mod config;
pub mod cookies;
pub mod errors;

pub use config::{CookieJarConfig, EntryValidation};
pub use cookies::{CookieJar, CookieStore, CookieStoreHandle};
pub use errors::CookieError;
