pub mod interpret;
pub mod probe;
pub mod request;
pub mod result;

pub mod prelude {
    pub use super::probe::{Probe, build_client, probe_url};
    pub use super::request::CheckRequest;
    pub use super::result::CheckResult;
}

use std::fmt::Write;

use crate::error::Result;
use prelude::*;

/// Sends the request and interprets the response.
///
/// # Errors
///
/// Any transport or body error; http error statuses are not errors.
pub async fn run(request: &CheckRequest) -> Result<CheckResult> {
    let client = build_client(request)?;
    let probe = probe_url(&client, request).await?;
    interpret::interpret(probe, request).await
}

/// Renders an error with its chain of causes.
///
/// Causes already spelled out by the outer message are skipped.
#[must_use]
pub fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let cause = src.to_string();
        if !s.contains(&cause) {
            let _ = write!(s, "\n\nCaused by: {}", cause);
        }
        err = src;
    }
    s
}
