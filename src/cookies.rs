//! Cookies: [`CookieJar`], [`CookieStore`] and host backends.

mod clock;
mod cookie_jar;
mod cookies;
mod parse;
mod store;

pub use cookies::format_http_date;
pub use cookies::parse_http_date;
pub use cookies::Cookie;
pub use cookies::CookieStoreHandle;

pub use clock::{Clock, ClockHandle, FixedClock, SystemClock};

pub use cookie_jar::validate;
pub use cookie_jar::CookieJar;

pub use parse::{find_value, parse_entries, parse_set_entry, CookieEntry};

pub use store::CookieStore;
#[cfg(target_arch = "wasm32")]
pub use store::DocumentCookieStore;
pub use store::InMemoryCookieStore;
pub use store::JsonCookieStore;
