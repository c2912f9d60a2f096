use std::time::{Duration, Instant};

use reqwest::{Client, Response};

use super::request::CheckRequest;
use crate::error::{Error, Result};

const USER_AGENT: &str = concat!("statoo/", env!("CARGO_PKG_VERSION"));

/// The response to a single GET, body still unread.
pub struct Probe {
    pub response: Response,
    pub elapsed: Duration,
}

/// Builds a client for one request.
///
/// Transparent decompression stays off: `Accept-Encoding` is set by hand
/// and gzip bodies are decoded while interpreting the response.
///
/// # Errors
///
/// [`Error::RequestConstruction`] if the TLS backend cannot be initialised.
pub fn build_client(request: &CheckRequest) -> Result<Client> {
    Client::builder()
        .timeout(request.timeout)
        .danger_accept_invalid_certs(request.insecure)
        .user_agent(USER_AGENT)
        .build()
        .map_err(Error::RequestConstruction)
}

/// Headers to send, in order.
///
/// A later header replaces any earlier one with the same name, including
/// the default `Accept-Encoding: gzip`. With basic auth configured any
/// `Authorization` header is dropped so the credentials win.
pub fn effective_headers(request: &CheckRequest) -> Vec<(&str, &str)> {
    let mut headers = vec![("Accept-Encoding", "gzip")];

    for header in &request.request_headers {
        headers.retain(|(name, _)| !name.eq_ignore_ascii_case(&header.name));
        headers.push((header.name.as_str(), header.value.as_str()));
    }

    if request.auth.is_some() {
        headers.retain(|(name, _)| !name.eq_ignore_ascii_case("authorization"));
    }

    headers
}

/// Sends the GET and waits for the response head.
///
/// # Errors
///
/// [`Error::RequestConstruction`] when a header name or value is not valid
/// http, [`Error::Network`] for connection, TLS, DNS or timeout failures.
pub async fn probe_url(client: &Client, request: &CheckRequest) -> Result<Probe> {
    let mut builder = client.get(request.url.clone());

    for (name, value) in effective_headers(request) {
        builder = builder.header(name, value);
    }

    if let Some(auth) = &request.auth {
        builder = builder.basic_auth(&auth.username, Some(&auth.password));
    }

    let req = builder.build().map_err(Error::RequestConstruction)?;

    log::debug!("GET {} (timeout {:?})", request.url, request.timeout);

    let start = Instant::now();
    let response = client.execute(req).await.map_err(Error::Network)?;
    let elapsed = start.elapsed();

    log::info!(
        "{} -> {} in {:.2}ms",
        request.target,
        response.status().as_u16(),
        elapsed.as_secs_f64() * 1000.0
    );

    Ok(Probe { response, elapsed })
}
