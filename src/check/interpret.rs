use std::collections::BTreeMap;
use std::io::Read;

use chrono::Utc;
use flate2::read::MultiGzDecoder;
use reqwest::header::{CONTENT_ENCODING, HeaderMap};

use super::probe::Probe;
use super::request::CheckRequest;
use super::result::CheckResult;
use crate::config::pair::HeaderPair;
use crate::error::{Error, Result};

/// Turns a response into a [`CheckResult`].
///
/// The body is only read when there is text to find. Error statuses are
/// results like any other.
///
/// # Errors
///
/// [`Error::Network`] if the body transfer fails, [`Error::BodyRead`] if a
/// gzip body cannot be decoded.
pub async fn interpret(probe: Probe, request: &CheckRequest) -> Result<CheckResult> {
    let Probe { response, elapsed } = probe;
    let status = response.status().as_u16();

    let response_headers = (!request.expected_headers.is_empty())
        .then(|| match_headers(response.headers(), &request.expected_headers));

    let mut result = CheckResult {
        url: request.target.clone(),
        status,
        checked_at: Utc::now(),
        elapsed: elapsed.as_secs_f64() * 1000.0,
        length: 0,
        find: None,
        found: None,
        skip_certificate_check: request.insecure.then_some(true),
        response_headers,
    };

    if let Some(find) = &request.find {
        let gzipped = is_gzip(response.headers());
        let raw = response.bytes().await.map_err(Error::Network)?;
        let body = decode_body(&raw, gzipped)?;

        result.length = body.len();
        result.found = Some(contains(&body, find.as_bytes()));
        result.find = Some(find.clone());

        log::debug!("read {} body bytes (gzip: {gzipped})", body.len());
    }

    Ok(result)
}

#[must_use]
pub fn is_gzip(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_ENCODING)
        .is_some_and(|encoding| encoding.as_bytes() == b"gzip")
}

/// Returns the body as sent by the application, gunzipping it if needed.
///
/// Every gzip member is decoded, not just the first.
///
/// # Errors
///
/// [`Error::BodyRead`] if `gzipped` is set and the bytes are not valid gzip.
pub fn decode_body(raw: &[u8], gzipped: bool) -> Result<Vec<u8>> {
    if !gzipped {
        return Ok(raw.to_vec());
    }
    let mut body = Vec::new();
    MultiGzDecoder::new(raw)
        .read_to_end(&mut body)
        .map_err(Error::BodyRead)?;
    Ok(body)
}

/// Checks each expectation against the first value of the named header.
///
/// Names match case-insensitively, values exactly. A missing header is a
/// `false`, never an error.
#[must_use]
pub fn match_headers(headers: &HeaderMap, expected: &[HeaderPair]) -> BTreeMap<String, bool> {
    expected
        .iter()
        .map(|pair| {
            let matched = headers
                .get(pair.name.as_str())
                .is_some_and(|value| value.as_bytes() == pair.value.as_bytes());
            (pair.map_key(), matched)
        })
        .collect()
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}
