use std::time::Duration;

use url::Url;

use crate::config::pair::{AuthFlag, Credentials, HeaderPair};
use crate::error::{Error, Result};

pub const DEFAULT_TIMEOUT: i64 = 10;
pub const MIN_TIMEOUT: i64 = 1;
pub const MAX_TIMEOUT: i64 = 100;

/// A validated check, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    /// The url as given, echoed back in the output.
    pub target: String,
    pub url: Url,
    pub timeout: Duration,
    pub request_headers: Vec<HeaderPair>,
    pub auth: Option<Credentials>,
    pub insecure: bool,
    pub find: Option<String>,
    pub expected_headers: Vec<HeaderPair>,
}

impl CheckRequest {
    /// Validates the url, then the timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyUrl`], [`Error::UrlParse`] or
    /// [`Error::NotRequestUri`] for a bad url and
    /// [`Error::TimeoutOutOfRange`] when `timeout_secs` is outside
    /// `MIN_TIMEOUT..=MAX_TIMEOUT`.
    pub fn new(target: &str, timeout_secs: i64) -> Result<Self> {
        let url = parse_request_url(target)?;

        if !(MIN_TIMEOUT..=MAX_TIMEOUT).contains(&timeout_secs) {
            return Err(Error::TimeoutOutOfRange(timeout_secs));
        }
        let timeout = Duration::from_secs(timeout_secs.unsigned_abs());

        Ok(CheckRequest {
            target: target.to_string(),
            url,
            timeout,
            request_headers: Vec::new(),
            auth: None,
            insecure: false,
            find: None,
            expected_headers: Vec::new(),
        })
    }

    /// Builds a request from unparsed flag values.
    ///
    /// # Errors
    ///
    /// Same as [`CheckRequest::new`], plus [`Error::Flag`] for a malformed
    /// header or auth string. An empty auth string means no basic auth.
    pub fn from_raw<S: AsRef<str>>(
        target: &str,
        timeout_secs: i64,
        request_headers: &[S],
        auth: Option<&str>,
    ) -> Result<Self> {
        let mut request = CheckRequest::new(target, timeout_secs)?;
        request.request_headers = request_headers
            .iter()
            .map(|raw| HeaderPair::parse_request(raw.as_ref()))
            .collect::<std::result::Result<_, _>>()?;
        if let Some(raw) = auth {
            request.auth = AuthFlag::parse(raw)?.0;
        }
        Ok(request)
    }

    #[must_use]
    pub fn with_request_headers(mut self, headers: Vec<HeaderPair>) -> Self {
        self.request_headers = headers;
        self
    }

    #[must_use]
    pub fn with_auth(mut self, auth: Credentials) -> Self {
        self.auth = Some(auth);
        self
    }

    #[must_use]
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    #[must_use]
    pub fn with_find(mut self, text: impl Into<String>) -> Self {
        self.find = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_expected_headers(mut self, headers: Vec<HeaderPair>) -> Self {
        self.expected_headers = headers;
        self
    }
}

/// Accepts absolute urls only: `vigo.io` or `/path` are rejected.
///
/// The text after `<scheme>:` must start with `/`, and the url must not be
/// padded with whitespace or carry control characters, all of which
/// `Url::parse` would otherwise quietly repair.
fn parse_request_url(target: &str) -> Result<Url> {
    if target.is_empty() {
        return Err(Error::EmptyUrl);
    }

    let url = Url::parse(target).map_err(|source| Error::UrlParse {
        url: target.to_string(),
        source,
    })?;

    let has_path_after_scheme = target
        .split_once(':')
        .is_some_and(|(_, rest)| rest.starts_with('/'));

    if target.trim() != target
        || target.contains(|c: char| c.is_ascii_control())
        || !has_path_after_scheme
        || url.cannot_be_a_base()
    {
        return Err(Error::NotRequestUri {
            url: target.to_string(),
        });
    }

    Ok(url)
}
