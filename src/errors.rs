#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    #[error("Invalid cookie name: {0:?}")]
    InvalidName(String),

    #[error("Invalid value for cookie {0:?}")]
    InvalidValue(String),

    #[error("Cannot format cookie date: {0}")]
    DateFormat(#[from] time::error::Format),

    #[error("Cookie store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cookie store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Host cookie store unavailable: {0}")]
    HostUnavailable(String),
}
