//! Cookie core types.
//!
//! This module defines the **type-erased store handle** used by the jar and the
//! serializable [`Cookie`] record that the write operation builds before it is
//! turned into a single cookie-string entry.
//!
//! # Wire format
//! A cookie is handed to the host as exactly one entry:
//!
//! ```text
//! <name>=<value>; expires=<HTTP date>; path=<path>
//! ```
//!
//! The `expires` clause is left out entirely for session cookies. Names and
//! values are written as-is: no percent-encoding and no escaping of `;` or `=`.
//!
//! ```rust
//! use gosub_cookies::cookies::Cookie;
//! use time::macros::datetime;
//!
//! let c = Cookie {
//!     name: "session".into(),
//!     value: "abc123".into(),
//!     expires: Some(datetime!(2026-10-19 10:00 UTC)),
//!     path: "/".into(),
//! };
//! assert_eq!(
//!     c.to_entry().unwrap(),
//!     "session=abc123; expires=Mon, 19 Oct 2026 10:00:00 GMT; path=/"
//! );
//! ```

use crate::cookies::store::CookieStore;
use crate::errors::CookieError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// A handle to a cookie store trait.
///
/// Store implementations must be **`Send + Sync` and internally synchronized**,
/// since callers hold only `&self` when invoking trait methods.
pub type CookieStoreHandle = Arc<dyn CookieStore + Send + Sync>;

/// HTTP date layout used in the `expires` attribute (`Sun, 18 Oct 2026 10:00:00 GMT`).
const HTTP_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Formats `at` as an HTTP date in GMT.
pub fn format_http_date(at: OffsetDateTime) -> Result<String, CookieError> {
    Ok(at.to_offset(UtcOffset::UTC).format(HTTP_DATE)?)
}

/// Parses an HTTP date as produced by [`format_http_date`].
///
/// Returns `None` for anything else; callers treat such cookies as session cookies.
pub fn parse_http_date(s: &str) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(s.trim(), HTTP_DATE)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

/// A cookie as written by the jar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name (case-sensitive).
    pub name: String,

    /// Raw cookie value (not URL-encoded).
    pub value: String,

    /// Absolute expiry. `None` for session cookies.
    #[serde(with = "time::serde::timestamp::option")]
    pub expires: Option<OffsetDateTime>,

    /// Path scoping (e.g., `"/"`).
    pub path: String,
}

impl Cookie {
    /// A session cookie scoped to `path`.
    pub fn new(name: impl Into<String>, value: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires: None,
            path: path.into(),
        }
    }

    pub fn is_session(&self) -> bool {
        self.expires.is_none()
    }

    /// Serializes the cookie into one host cookie-string entry.
    pub fn to_entry(&self) -> Result<String, CookieError> {
        let expires = match self.expires {
            Some(at) => format!("; expires={}", format_http_date(at)?),
            None => String::new(),
        };
        Ok(format!("{}={}{}; path={}", self.name, self.value, expires, self.path))
    }
}
