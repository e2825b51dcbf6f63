pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Parsing errors
    #[error("{0}")]
    ParsingError(String),
    // Storage errors
    #[error("Storage I/O failed: {0}")]
    StorageIo(#[from] std::io::Error),
    #[error("Storage request failed: {0}")]
    StorageRequest(reqwest::Error),
    #[error("Malformed monitor collection: {0}")]
    Serialization(#[from] serde_json::Error),
    // Email client errors
    #[error("Failed to send email: {0}")]
    SendEmailError(reqwest::Error),
    // Price lookup errors
    #[error("Price lookup failed: {0}")]
    PriceLookup(String),
}
