/// Convenience result type for the fallible edges of the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading configuration.
///
/// Playback itself never fails; see [`Scheduler`](crate::Scheduler).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration values out of range.
    #[error("config error: {0}")]
    Config(String),

    /// Malformed TOML configuration.
    #[cfg(feature = "toml")]
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an [`Error::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
