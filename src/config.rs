/// Path used when a cookie is written without an explicit path.
pub const DEFAULT_COOKIE_PATH: &str = "/";

/// Day offset used by erase. Any negative value makes the host treat the cookie as expired.
pub const ERASE_OFFSET_DAYS: f64 = -1.0;

/// What the jar does with names and values that would corrupt the serialized cookie string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryValidation {
    /// Hand the entry to the store as-is. The caller is responsible for avoiding `;`, `=` and
    /// control characters.
    #[default]
    PassThrough,
    /// Skip (and log) writes whose name or value would break the `name=value; ...` format.
    Reject,
}

/// Cookie jar configuration
#[derive(Debug, Clone)]
pub struct CookieJarConfig {
    /// Path scope for cookies written without one
    pub default_path: String,
    /// Day offset used when erasing a cookie
    pub erase_offset_days: f64,
    /// Name/value validation policy
    pub validation: EntryValidation,
}

impl Default for CookieJarConfig {
    fn default() -> Self {
        Self {
            default_path: DEFAULT_COOKIE_PATH.to_string(),
            erase_offset_days: ERASE_OFFSET_DAYS,
            validation: EntryValidation::PassThrough,
        }
    }
}
