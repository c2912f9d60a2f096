use crate::check::request::{CheckRequest, DEFAULT_TIMEOUT};
use crate::error::Result;
use crate::output::OutputFormat;

use super::pair::{Credentials, HeaderPair};

/// Options for one run of the tool, built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The positional argument, as typed.
    pub url: Option<String>,
    pub show_help: bool,
    pub show_version: bool,
    pub show_commit_hash: bool,
    pub verbose: bool,
    pub json: bool,
    /// Seconds. Kept signed so out-of-range input reaches validation intact.
    pub timeout: i64,
    pub find: Option<String>,
    pub request_headers: Vec<HeaderPair>,
    pub response_headers: Vec<HeaderPair>,
    pub auth: Option<Credentials>,
    pub skip_verify: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: None,
            show_help: false,
            show_version: false,
            show_commit_hash: false,
            verbose: false,
            json: false,
            timeout: DEFAULT_TIMEOUT,
            find: None,
            request_headers: Vec::new(),
            response_headers: Vec::new(),
            auth: None,
            skip_verify: false,
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Config {
            url: Some(url.into()),
            ..Config::default()
        }
    }

    /// `true` when no URL was given and usage should be shown instead.
    #[must_use]
    pub fn is_missing_url(&self) -> bool {
        self.url.as_deref().is_none_or(str::is_empty)
    }

    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text {
                verbose: self.verbose,
            }
        }
    }

    /// Validates the options into a request.
    ///
    /// Body search and response header expectations only apply to json
    /// output, so they are left out of text mode requests and the body is
    /// never read there.
    ///
    /// # Errors
    ///
    /// Returns an input error when the url or timeout is invalid.
    pub fn check_request(&self) -> Result<CheckRequest> {
        let mut request = CheckRequest::new(self.url.as_deref().unwrap_or_default(), self.timeout)?
            .with_request_headers(self.request_headers.clone())
            .with_insecure(self.skip_verify);

        if let Some(auth) = &self.auth {
            request = request.with_auth(auth.clone());
        }

        if self.json {
            if let Some(find) = self.find.as_deref().filter(|text| !text.is_empty()) {
                request = request.with_find(find);
            }
            request = request.with_expected_headers(self.response_headers.clone());
        }

        Ok(request)
    }
}
