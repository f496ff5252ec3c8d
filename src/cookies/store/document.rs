//! The browser's own cookie store, reached through `document.cookie`.
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::cookies::store::CookieStore;
use crate::errors::CookieError;

/// Binds the jar to `window.document.cookie`.
///
/// The document is looked up on every call, so the store can be created before the
/// page has finished loading.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentCookieStore;

impl DocumentCookieStore {
    pub fn new() -> Self {
        Self
    }

    fn document() -> Result<HtmlDocument, CookieError> {
        let window = web_sys::window()
            .ok_or_else(|| CookieError::HostUnavailable("no window object available".into()))?;
        let document = window
            .document()
            .ok_or_else(|| CookieError::HostUnavailable("window has no document".into()))?;
        document
            .dyn_into::<HtmlDocument>()
            .map_err(|_| CookieError::HostUnavailable("document is not an HTML document".into()))
    }
}

impl CookieStore for DocumentCookieStore {
    fn cookie_string(&self) -> String {
        match Self::document().and_then(|doc| {
            doc.cookie()
                .map_err(|e| CookieError::HostUnavailable(format!("{e:?}")))
        }) {
            Ok(cookies) => cookies,
            Err(e) => {
                log::error!("Cannot read document.cookie: {e}");
                String::new()
            }
        }
    }

    fn set_cookie(&self, entry: &str) {
        let result = Self::document().and_then(|doc| {
            doc.set_cookie(entry)
                .map_err(|e| CookieError::HostUnavailable(format!("{e:?}")))
        });
        if let Err(e) = result {
            log::error!("Cannot write document.cookie: {e}");
        }
    }
}
