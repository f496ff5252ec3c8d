use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use url::Url;

use crate::config::DEFAULT_COOKIE_PATH;
use crate::cookies::clock::{ClockHandle, SystemClock};
use crate::cookies::parse::parse_set_entry;
use crate::cookies::store::CookieStore;
use crate::cookies::Cookie;

const DEFAULT_DOCUMENT: &str = "http://localhost/";

/// Cookies as a host keeps them: keyed by name + path, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct CookieList(Vec<Cookie>);

impl CookieList {
    /// Merges a written entry. Replaces a cookie with the same name and path in place,
    /// or appends. An entry that is already expired removes the cookie instead.
    pub(crate) fn apply(&mut self, entry: &str, now: OffsetDateTime) -> bool {
        let Some(cookie) = parse_set_entry(entry, DEFAULT_COOKIE_PATH) else {
            log::debug!("Host ignored malformed cookie entry {entry:?}");
            return false;
        };

        let existing = self
            .0
            .iter()
            .position(|c| c.name == cookie.name && c.path == cookie.path);

        if cookie.expires.is_some_and(|at| at <= now) {
            if let Some(idx) = existing {
                self.0.remove(idx);
            }
            return true;
        }

        match existing {
            Some(idx) => self.0[idx] = cookie,
            None => self.0.push(cookie),
        }
        true
    }

    /// Drops cookies whose expiry has passed.
    pub(crate) fn purge_expired(&mut self, now: OffsetDateTime) {
        self.0.retain(|c| c.expires.map_or(true, |at| at > now));
    }

    /// The `name=value; ...` string a document at `document_path` gets to see.
    pub(crate) fn visible_string(&self, document_path: &str, now: OffsetDateTime) -> String {
        self.0
            .iter()
            .filter(|c| c.expires.map_or(true, |at| at > now))
            .filter(|c| path_matches(document_path, &c.path))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub(crate) fn cookies(&self) -> &[Cookie] {
        &self.0
    }
}

/// Path-match from RFC 6265 §5.1.4.
fn path_matches(request_path: &str, cookie_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }
    match request_path.strip_prefix(cookie_path) {
        Some(rest) => cookie_path.ends_with('/') || rest.starts_with('/'),
        None => false,
    }
}

/// In‑memory host cookie store.
///
/// Behaves like a browser's cookie store for a single site: writes are merged by
/// name + path, expired entries disappear, and each view only sees the cookies whose
/// path matches its document URL. Views created with [`for_document`](Self::for_document)
/// share the same cookies.
pub struct InMemoryCookieStore {
    /// Cookies shared by every view of this store
    cookies: Arc<RwLock<CookieList>>,
    /// Document this view reads for
    document: Url,
    clock: ClockHandle,
}

impl InMemoryCookieStore {
    /// Creates an empty store viewed from `http://localhost/`, on the wall clock.
    pub fn new() -> Arc<Self> {
        Self::with_clock(SystemClock::handle())
    }

    /// Creates an empty store viewed from `http://localhost/` on the given clock.
    pub fn with_clock(clock: ClockHandle) -> Arc<Self> {
        let document = Url::parse(DEFAULT_DOCUMENT).expect("default document URL is valid");
        Arc::new(Self {
            cookies: Arc::new(RwLock::new(CookieList::default())),
            document,
            clock,
        })
    }

    /// Returns another view over the same cookies, scoped to `document`.
    pub fn for_document(&self, document: Url) -> Arc<Self> {
        Arc::new(Self {
            cookies: self.cookies.clone(),
            document,
            clock: self.clock.clone(),
        })
    }

    pub fn document(&self) -> &Url {
        &self.document
    }

    /// All live cookies regardless of path, in insertion order.
    pub fn snapshot(&self) -> Vec<Cookie> {
        let now = self.clock.now();
        let mut cookies = self.cookies.write().unwrap();
        cookies.purge_expired(now);
        cookies.cookies().to_vec()
    }

    /// Number of live cookies regardless of path.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CookieStore for InMemoryCookieStore {
    fn cookie_string(&self) -> String {
        let now = self.clock.now();
        self.cookies
            .read()
            .unwrap()
            .visible_string(self.document.path(), now)
    }

    fn set_cookie(&self, entry: &str) {
        let now = self.clock.now();
        let mut cookies = self.cookies.write().unwrap();
        if cookies.apply(entry, now) {
            cookies.purge_expired(now);
        }
    }
}
