//! Cookie-string parsing.
//!
//! Two directions are covered here:
//! - [`parse_entries`] splits the ambient `name1=value1; name2=value2` string that a
//!   host returns on read. It is what the jar's read operation scans.
//! - [`parse_set_entry`] splits one written entry (`name=value; expires=..; path=..`)
//!   back into a [`Cookie`]. Host stores use it to merge writes.
//!
//! Neither direction decodes or unescapes anything.

use crate::cookies::cookies::parse_http_date;
use crate::cookies::Cookie;

/// One `name=value` segment of the ambient cookie string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieEntry {
    pub name: String,
    pub value: String,
}

/// Splits a raw cookie string into its entries, in store order.
///
/// Segments are separated by `;` and leading spaces are stripped. The name ends at
/// the first `=`; a segment without `=` becomes an entry with an empty name, which
/// is how hosts expose a nameless cookie. Empty segments are skipped.
pub fn parse_entries(raw: &str) -> Vec<CookieEntry> {
    raw.split(';')
        .map(|segment| segment.trim_start_matches(' '))
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((name, value)) => CookieEntry {
                name: name.to_string(),
                value: value.to_string(),
            },
            None => CookieEntry {
                name: String::new(),
                value: segment.to_string(),
            },
        })
        .collect()
}

/// Returns the value of the first segment that starts with `name=`.
///
/// Leftmost match wins when a name appears more than once.
pub fn find_value<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    raw.split(';')
        .map(|segment| segment.trim_start_matches(' '))
        .find_map(|segment| {
            segment
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
        })
}

/// Parses one written entry into a cookie.
///
/// Attribute names are matched case-insensitively. `expires` values that are not HTTP
/// dates are ignored, leaving a session cookie. A missing or empty `path` yields
/// `default_path`. Unknown attributes are dropped. Returns `None` when the entry has
/// no `=` in its first segment.
pub fn parse_set_entry(entry: &str, default_path: &str) -> Option<Cookie> {
    let mut parts = entry.split(';');
    let (name, value) = parts.next()?.split_once('=')?;

    let mut cookie = Cookie::new(name.trim(), value.trim(), default_path);

    for part in parts {
        let part = part.trim();
        let Some((k, v)) = part.split_once('=') else {
            continue;
        };
        match k.trim().to_ascii_lowercase().as_str() {
            "path" => {
                let v = v.trim();
                if !v.is_empty() {
                    cookie.path = v.to_string();
                }
            }
            "expires" => {
                cookie.expires = parse_http_date(v);
                if cookie.expires.is_none() {
                    log::debug!("Ignoring unparsable expires {v:?} on cookie {:?}", cookie.name);
                }
            }
            _ => {}
        }
    }

    Some(cookie)
}
