//! The document cookie jar.
//!
//! A [`CookieJar`] offers write/read/erase by name over a host's ambient cookie
//! string. It holds no cookies itself: every call goes straight to the injected
//! [`CookieStore`](crate::cookies::CookieStore), so two jars over the same store
//! always agree.
//!
//! ## Notes & limitations
//! - Names and values are not encoded. With the default
//!   [`EntryValidation::PassThrough`] policy a `;` or `=` in a name, or a `;` in a
//!   value, corrupts the host string exactly as it would in a browser.
//! - `days == 0` (or NaN) writes a **session** cookie, not an expired one. Use
//!   [`CookieJar::erase_cookie`] to remove a cookie.
//! - None of the operations fail. Problems are logged and the call becomes a no-op.
use time::Duration;

use crate::config::{CookieJarConfig, EntryValidation};
use crate::cookies::clock::{ClockHandle, SystemClock};
use crate::cookies::parse::{find_value, parse_entries, CookieEntry};
use crate::cookies::{Cookie, CookieStoreHandle};
use crate::errors::CookieError;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Reads, writes and erases single cookies in a host cookie store.
pub struct CookieJar {
    store: CookieStoreHandle,
    clock: ClockHandle,
    config: CookieJarConfig,
}

impl CookieJar {
    /// Creates a jar over `store` using the wall clock and the default configuration.
    pub fn new(store: CookieStoreHandle) -> Self {
        Self::with_config(store, SystemClock::handle(), CookieJarConfig::default())
    }

    pub fn with_config(store: CookieStoreHandle, clock: ClockHandle, config: CookieJarConfig) -> Self {
        Self { store, clock, config }
    }

    pub fn config(&self) -> &CookieJarConfig {
        &self.config
    }

    /// Writes cookie `name` with `value`.
    ///
    /// - `days`: lifetime in days from now. `None`, `0` and NaN give a session cookie;
    ///   a negative value gives an already expired cookie.
    /// - `path`: scope path. `None` or an empty string gives the configured default (`/`).
    ///
    /// The host receives `name=value[; expires=<HTTP date>]; path=<path>`.
    pub fn write_cookie(&self, name: &str, value: &str, days: Option<f64>, path: Option<&str>) {
        if self.config.validation == EntryValidation::Reject {
            if let Err(e) = validate(name, value) {
                log::warn!("Not writing cookie: {e}");
                return;
            }
        }

        let path = path
            .filter(|p| !p.is_empty())
            .unwrap_or(self.config.default_path.as_str());
        let cookie = Cookie {
            name: name.to_string(),
            value: value.to_string(),
            expires: days.and_then(|days| self.expiry_for(days)),
            path: path.to_string(),
        };

        match cookie.to_entry() {
            Ok(entry) => {
                log::debug!("Writing cookie entry {entry:?}");
                self.store.set_cookie(&entry);
            }
            Err(e) => log::error!("Cannot serialize cookie {name:?}: {e}"),
        }
    }

    /// Returns the value of the first cookie named `name` in the host string, if any.
    ///
    /// The value is returned as stored, without decoding.
    pub fn read_cookie(&self, name: &str) -> Option<String> {
        let raw = self.store.cookie_string();
        find_value(&raw, name).map(str::to_string)
    }

    /// Erases cookie `name` by writing it with an empty value and an expiry in the past.
    ///
    /// `path` must match the path the cookie was written with.
    pub fn erase_cookie(&self, name: &str, path: Option<&str>) {
        self.write_cookie(name, "", Some(self.config.erase_offset_days), path);
    }

    /// All `name=value` entries currently visible, in host order.
    pub fn entries(&self) -> Vec<CookieEntry> {
        parse_entries(&self.store.cookie_string())
    }

    /// Absolute expiry for a lifetime of `days`. `None` means a session cookie.
    fn expiry_for(&self, days: f64) -> Option<time::OffsetDateTime> {
        if days == 0.0 || days.is_nan() {
            return None;
        }
        let expires = Duration::checked_seconds_f64(days * SECONDS_PER_DAY)
            .and_then(|lifetime| self.clock.now().checked_add(lifetime));
        if expires.is_none() {
            log::warn!("Cookie lifetime of {days} days is out of range, writing a session cookie");
        }
        expires
    }
}

/// Checks that `name` and `value` survive the `name=value; ...` format unchanged.
pub fn validate(name: &str, value: &str) -> Result<(), CookieError> {
    let bad_name = name.is_empty()
        || name
            .chars()
            .any(|c| c == ';' || c == '=' || c == ',' || c.is_whitespace() || c.is_control());
    if bad_name {
        return Err(CookieError::InvalidName(name.to_string()));
    }
    if value.chars().any(|c| c == ';' || c.is_control()) {
        return Err(CookieError::InvalidValue(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::clock::FixedClock;
    use crate::cookies::store::{CookieStore, InMemoryCookieStore};
    use std::sync::{Arc, Mutex};
    use time::macros::datetime;
    use url::Url;

    /// Records every entry handed to the host and serves a fixed cookie string.
    #[derive(Default)]
    struct RecordingStore {
        raw: Mutex<String>,
        written: Mutex<Vec<String>>,
    }

    impl RecordingStore {
        fn with_raw(raw: &str) -> Arc<Self> {
            let store = Self::default();
            *store.raw.lock().unwrap() = raw.to_string();
            Arc::new(store)
        }

        fn written(&self) -> Vec<String> {
            self.written.lock().unwrap().clone()
        }
    }

    impl CookieStore for RecordingStore {
        fn cookie_string(&self) -> String {
            self.raw.lock().unwrap().clone()
        }

        fn set_cookie(&self, entry: &str) {
            self.written.lock().unwrap().push(entry.to_string());
        }
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn clock() -> Arc<FixedClock> {
        FixedClock::new(datetime!(2026-10-18 10:00 UTC))
    }

    fn jar_over(store: CookieStoreHandle, config: CookieJarConfig) -> CookieJar {
        CookieJar::with_config(store, clock(), config)
    }

    fn host_jar() -> (Arc<InMemoryCookieStore>, CookieJar) {
        let clock = clock();
        let store = InMemoryCookieStore::with_clock(clock.clone());
        let jar = CookieJar::with_config(store.clone(), clock, CookieJarConfig::default());
        (store, jar)
    }

    #[test]
    fn session_cookie_wire_format() {
        init_logger();
        let store = RecordingStore::with_raw("");
        let jar = jar_over(store.clone(), CookieJarConfig::default());

        jar.write_cookie("k", "v", None, None);
        assert_eq!(store.written(), vec!["k=v; path=/"]);
    }

    #[test]
    fn expiring_cookie_wire_format() {
        let store = RecordingStore::with_raw("");
        let jar = jar_over(store.clone(), CookieJarConfig::default());

        jar.write_cookie("k", "v", Some(1.0), Some("/app"));
        jar.write_cookie("half", "v", Some(0.5), None);
        assert_eq!(
            store.written(),
            vec![
                "k=v; expires=Mon, 19 Oct 2026 10:00:00 GMT; path=/app",
                "half=v; expires=Sun, 18 Oct 2026 22:00:00 GMT; path=/",
            ]
        );
    }

    #[test]
    fn zero_days_is_a_session_cookie() {
        let store = RecordingStore::with_raw("");
        let jar = jar_over(store.clone(), CookieJarConfig::default());

        jar.write_cookie("k", "v", Some(0.0), None);
        jar.write_cookie("n", "v", Some(f64::NAN), None);
        assert_eq!(store.written(), vec!["k=v; path=/", "n=v; path=/"]);
    }

    #[test]
    fn out_of_range_days_is_a_session_cookie() {
        let store = RecordingStore::with_raw("");
        let jar = jar_over(store.clone(), CookieJarConfig::default());

        jar.write_cookie("k", "v", Some(f64::INFINITY), None);
        jar.write_cookie("m", "v", Some(1e12), None);
        assert_eq!(store.written(), vec!["k=v; path=/", "m=v; path=/"]);
    }

    #[test]
    fn empty_path_falls_back_to_default() {
        let store = RecordingStore::with_raw("");
        let jar = jar_over(store.clone(), CookieJarConfig::default());

        jar.write_cookie("k", "v", None, Some(""));
        assert_eq!(store.written(), vec!["k=v; path=/"]);
    }

    #[test]
    fn erase_writes_expired_empty_entry() {
        let store = RecordingStore::with_raw("");
        let jar = jar_over(store.clone(), CookieJarConfig::default());

        jar.erase_cookie("k", Some("/app"));
        assert_eq!(
            store.written(),
            vec!["k=; expires=Sat, 17 Oct 2026 10:00:00 GMT; path=/app"]
        );
    }

    #[test]
    fn read_tolerates_extra_spaces() {
        let jar = jar_over(RecordingStore::with_raw("a=1;  b=2"), CookieJarConfig::default());
        assert_eq!(jar.read_cookie("a").as_deref(), Some("1"));
        assert_eq!(jar.read_cookie("b").as_deref(), Some("2"));
        assert_eq!(jar.read_cookie("c"), None);
    }

    #[test]
    fn read_returns_leftmost_duplicate() {
        let jar = jar_over(RecordingStore::with_raw("a=first; a=second"), CookieJarConfig::default());
        assert_eq!(jar.read_cookie("a").as_deref(), Some("first"));
    }

    #[test]
    fn read_does_not_decode() {
        let jar = jar_over(RecordingStore::with_raw("q=a%20b"), CookieJarConfig::default());
        assert_eq!(jar.read_cookie("q").as_deref(), Some("a%20b"));
    }

    #[test]
    fn entries_lists_host_order() {
        let jar = jar_over(RecordingStore::with_raw("b=2; a=1"), CookieJarConfig::default());
        let names: Vec<_> = jar.entries().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn round_trip_through_host() {
        let (_, jar) = host_jar();
        jar.write_cookie("session", "abc123", Some(7.0), None);
        assert_eq!(jar.read_cookie("session").as_deref(), Some("abc123"));
    }

    #[test]
    fn rewrite_replaces_value() {
        let (store, jar) = host_jar();
        jar.write_cookie("k", "1", None, None);
        jar.write_cookie("k", "2", None, None);
        assert_eq!(jar.read_cookie("k").as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unknown_cookie_is_absent() {
        let (_, jar) = host_jar();
        assert_eq!(jar.read_cookie("never"), None);
    }

    #[test]
    fn multiple_cookies_coexist() {
        let (_, jar) = host_jar();
        jar.write_cookie("a", "1", None, None);
        jar.write_cookie("b", "2", None, None);
        assert_eq!(jar.read_cookie("a").as_deref(), Some("1"));
        assert_eq!(jar.read_cookie("b").as_deref(), Some("2"));
    }

    #[test]
    fn default_path_is_root() {
        let (store, jar) = host_jar();
        jar.write_cookie("k", "v", None, None);
        assert_eq!(store.snapshot()[0].path, "/");
    }

    #[test]
    fn zero_days_cookie_is_stored_without_expiry() {
        let (store, jar) = host_jar();
        jar.write_cookie("k", "v", Some(0.0), None);
        assert_eq!(jar.read_cookie("k").as_deref(), Some("v"));
        assert!(store.snapshot()[0].is_session());
    }

    #[test]
    fn erase_removes_cookie_and_is_idempotent() {
        let (store, jar) = host_jar();
        jar.write_cookie("k", "v", Some(3.0), None);
        jar.erase_cookie("k", None);
        assert_eq!(jar.read_cookie("k"), None);

        jar.erase_cookie("k", None);
        assert_eq!(jar.read_cookie("k"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn erase_needs_matching_path() {
        let (store, jar) = host_jar();
        jar.write_cookie("k", "v", None, Some("/"));
        jar.erase_cookie("k", Some("/other"));
        assert_eq!(jar.read_cookie("k").as_deref(), Some("v"));

        jar.erase_cookie("k", Some("/"));
        assert_eq!(jar.read_cookie("k"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn path_scoped_cookie_is_invisible_elsewhere() {
        let clock = clock();
        let root = InMemoryCookieStore::with_clock(clock.clone());
        let under_a = root.for_document(Url::parse("http://localhost/a/index.html").unwrap());
        let under_b = root.for_document(Url::parse("http://localhost/b/index.html").unwrap());

        let jar_a = CookieJar::with_config(under_a, clock.clone(), CookieJarConfig::default());
        let jar_b = CookieJar::with_config(under_b, clock, CookieJarConfig::default());

        jar_a.write_cookie("k", "v", None, Some("/a"));
        assert_eq!(jar_a.read_cookie("k").as_deref(), Some("v"));
        assert_eq!(jar_b.read_cookie("k"), None);
    }

    #[test]
    fn cookie_expires_with_time() {
        let clock = clock();
        let store = InMemoryCookieStore::with_clock(clock.clone());
        let jar = CookieJar::with_config(store, clock.clone(), CookieJarConfig::default());

        jar.write_cookie("k", "v", Some(1.0), None);
        clock.advance(Duration::hours(23));
        assert_eq!(jar.read_cookie("k").as_deref(), Some("v"));
        clock.advance(Duration::hours(1));
        assert_eq!(jar.read_cookie("k"), None);
    }

    #[test]
    fn pass_through_does_not_escape() {
        let store = RecordingStore::with_raw("");
        let jar = jar_over(store.clone(), CookieJarConfig::default());

        jar.write_cookie("a", "x;y", None, None);
        assert_eq!(store.written(), vec!["a=x;y; path=/"]);
    }

    #[test]
    fn reject_policy_skips_corrupting_writes() {
        init_logger();
        let store = RecordingStore::with_raw("");
        let config = CookieJarConfig {
            validation: EntryValidation::Reject,
            ..CookieJarConfig::default()
        };
        let jar = jar_over(store.clone(), config);

        jar.write_cookie("a", "x;y", None, None);
        jar.write_cookie("a=b", "v", None, None);
        jar.write_cookie("", "v", None, None);
        jar.write_cookie("ok", "x=y", None, None);
        jar.erase_cookie("ok", None);
        assert_eq!(
            store.written(),
            vec![
                "ok=x=y; path=/",
                "ok=; expires=Sat, 17 Oct 2026 10:00:00 GMT; path=/",
            ]
        );
    }

    #[test]
    fn validate_reports_the_offending_part() {
        assert!(validate("ok", "fine").is_ok());
        assert!(matches!(validate("bad name", "v"), Err(CookieError::InvalidName(_))));
        assert!(matches!(validate("a,b", "v"), Err(CookieError::InvalidName(_))));
        assert!(validate("n", "a,b").is_ok());
        assert!(matches!(validate("n", "line\nbreak"), Err(CookieError::InvalidValue(_))));
    }

    #[test]
    fn custom_default_path() {
        let store = RecordingStore::with_raw("");
        let config = CookieJarConfig {
            default_path: "/app".into(),
            ..CookieJarConfig::default()
        };
        let jar = jar_over(store.clone(), config);

        jar.write_cookie("k", "v", None, None);
        assert_eq!(store.written(), vec!["k=v; path=/app"]);
    }
}
