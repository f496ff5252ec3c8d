//! JSON-backed host cookie store.
//!
//! `JsonCookieStore` keeps the same cookie semantics as
//! [`InMemoryCookieStore`](super::InMemoryCookieStore) but writes the full cookie list
//! to a single JSON file after **every** accepted write, and loads it back on open.
//! This is what a native (non-browser) host uses so cookies survive restarts the
//! way a browser's own cookie store would.
//!
//! ### I/O characteristics & caveats
//! - Every write rewrites the entire file. File writes are not atomic.
//! - [`CookieStore::set_cookie`] cannot fail; save errors are logged and the
//!   in-memory state stays authoritative until the next successful save.
//! - Session cookies are persisted too. The host decides when a session ends, not
//!   this store.
//!
//! ### Example
//! ```no_run
//! use gosub_cookies::cookies::{CookieJar, JsonCookieStore};
//!
//! let store = JsonCookieStore::new("cookies.json".into())?;
//! let jar = CookieJar::new(store);
//! jar.write_cookie("lang", "en", Some(365.0), None);
//! # Ok::<(), gosub_cookies::errors::CookieError>(())
//! ```
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use url::Url;

use crate::cookies::clock::{ClockHandle, SystemClock};
use crate::cookies::store::{CookieList, CookieStore};
use crate::cookies::Cookie;
use crate::errors::CookieError;

/// A JSON-based cookie store that persists cookies across sessions.
pub struct JsonCookieStore {
    /// Path to the JSON file where cookies are stored.
    path: PathBuf,
    /// Cookies as loaded from disk plus any writes since.
    cookies: RwLock<CookieList>,
    /// Document the store reads for.
    document: Url,
    clock: ClockHandle,
}

impl JsonCookieStore {
    /// Opens (or creates) a JSON cookie store at `path`, viewed from `http://localhost/`.
    pub fn new(path: PathBuf) -> Result<Arc<Self>, CookieError> {
        let document = Url::parse("http://localhost/").expect("default document URL is valid");
        Self::open(path, document, SystemClock::handle())
    }

    /// Opens (or creates) a JSON cookie store at `path` for `document`.
    ///
    /// If the file does not exist, an empty list is written to disk. Expired cookies
    /// found in the file are dropped on load.
    pub fn open(path: PathBuf, document: Url, clock: ClockHandle) -> Result<Arc<Self>, CookieError> {
        let mut cookies = if path.exists() {
            Self::load_file(&path)?
        } else {
            let empty = CookieList::default();
            Self::save_file(&path, &empty)?;
            empty
        };
        cookies.purge_expired(clock.now());

        log::debug!("Opened cookie store {} with {} cookies", path.display(), cookies.cookies().len());

        Ok(Arc::new(Self {
            path,
            cookies: RwLock::new(cookies),
            document,
            clock,
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All live cookies regardless of path, in insertion order.
    pub fn snapshot(&self) -> Vec<Cookie> {
        let now = self.clock.now();
        let mut cookies = self.cookies.write().unwrap();
        cookies.purge_expired(now);
        cookies.cookies().to_vec()
    }

    /// Writes the current cookie list to disk.
    pub fn flush(&self) -> Result<(), CookieError> {
        let cookies = self.cookies.read().unwrap();
        Self::save_file(&self.path, &cookies)
    }

    /// Loads and deserializes the cookie file.
    ///
    /// An empty file is read as an empty list.
    fn load_file(path: &Path) -> Result<CookieList, CookieError> {
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(CookieList::default());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    /// Serializes and writes the full cookie file (pretty-printed).
    fn save_file(path: &Path, cookies: &CookieList) -> Result<(), CookieError> {
        let contents = serde_json::to_string_pretty(cookies)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl CookieStore for JsonCookieStore {
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
        if !cookies.apply(entry, now) {
            return;
        }
        cookies.purge_expired(now);

        if let Err(e) = Self::save_file(&self.path, &cookies) {
            log::error!("Cannot persist cookies to {}: {}", self.path.display(), e);
        }
    }
}
