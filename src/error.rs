use thiserror::Error;

use crate::config::pair::FlagError;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can end a check early.
///
/// None of these are retried: the first one raised is reported on standard
/// error and the process exits with status 1.
#[derive(Debug, Error)]
pub enum Error {
    #[error("url parse error: empty url")]
    EmptyUrl,

    #[error("url parse error: parse {url:?}: {source}")]
    UrlParse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("url parse error: parse {url:?}: invalid URI for request")]
    NotRequestUri { url: String },

    #[error("invalid timeout value: {0}")]
    TimeoutOutOfRange(i64),

    #[error(transparent)]
    Flag(#[from] FlagError),

    #[error("request error: {0}")]
    RequestConstruction(#[source] reqwest::Error),

    #[error("response error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("body read (gzip) error: {0}")]
    BodyRead(#[source] std::io::Error),

    #[error("json marshal error: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("write error: {0}")]
    Write(#[source] std::io::Error),
}

impl Error {
    /// Errors raised before any network I/O is attempted.
    #[must_use]
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Error::EmptyUrl
                | Error::UrlParse { .. }
                | Error::NotRequestUri { .. }
                | Error::TimeoutOutOfRange(_)
                | Error::Flag(_)
        )
    }
}
