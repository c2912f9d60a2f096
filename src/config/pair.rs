use std::fmt;

use thiserror::Error;

/// Which repeatable header flag a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    Request,
    Response,
}

impl fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderKind::Request => f.write_str("request header"),
            HeaderKind::Response => f.write_str("response header"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    #[error("empty {0} value")]
    EmptyHeader(HeaderKind),

    #[error("invalid {kind} value: {value}")]
    MalformedHeader { kind: HeaderKind, value: String },

    // The raw value holds a password, keep it out of the message.
    #[error("invalid basic auth value, expected \"username:password\"")]
    MalformedAuth,
}

/// A `Name: Value` pair given on the command line.
///
/// Used both for headers sent with the request and for the values expected
/// back in the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPair {
    pub name: String,
    pub value: String,
}

impl HeaderPair {
    pub fn parse_request(raw: &str) -> Result<Self, FlagError> {
        Self::parse(raw, HeaderKind::Request)
    }

    pub fn parse_response(raw: &str) -> Result<Self, FlagError> {
        Self::parse(raw, HeaderKind::Response)
    }

    pub fn parse(raw: &str, kind: HeaderKind) -> Result<Self, FlagError> {
        if raw.trim().is_empty() {
            return Err(FlagError::EmptyHeader(kind));
        }
        let (name, value) = split_pair(raw).ok_or_else(|| FlagError::MalformedHeader {
            kind,
            value: raw.trim().to_string(),
        })?;
        Ok(HeaderPair { name, value })
    }

    /// Key used in the `response_headers` json map.
    #[must_use]
    pub fn map_key(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Basic auth `username:password`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn parse(raw: &str) -> Result<Self, FlagError> {
        let (username, password) = split_pair(raw).ok_or(FlagError::MalformedAuth)?;
        Ok(Credentials { username, password })
    }
}

/// Value of the auth flag. An empty value means no basic auth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFlag(pub Option<Credentials>);

impl AuthFlag {
    pub fn parse(raw: &str) -> Result<Self, FlagError> {
        if raw.trim().is_empty() {
            return Ok(AuthFlag(None));
        }
        Credentials::parse(raw).map(|credentials| AuthFlag(Some(credentials)))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Splits `left:right` on its only colon, trimming both sides.
///
/// Returns `None` unless there is exactly one `:` and both trimmed sides are
/// non-empty.
fn split_pair(raw: &str) -> Option<(String, String)> {
    let raw = raw.trim();
    if raw.matches(':').count() != 1 {
        return None;
    }
    let (left, right) = raw.split_once(':')?;
    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left.to_string(), right.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("foo:bar", Some(("foo", "bar")))]
    #[case("Authorization: Bearer TOKEN", Some(("Authorization", "Bearer TOKEN")))]
    #[case("  X-Api-Key :  APIKEY  ", Some(("X-Api-Key", "APIKEY")))]
    #[case("foobar", None)]
    #[case("foo.bar", None)]
    #[case("foo;bar", None)]
    #[case("foo:bar:baz", None)]
    #[case(":bar", None)]
    #[case("foo:", None)]
    #[case("foo:   ", None)]
    #[case("   :bar", None)]
    #[case(":", None)]
    fn test_split_pair(#[case] raw: &str, #[case] expected: Option<(&str, &str)>) {
        let got = split_pair(raw);
        let expected = expected.map(|(l, r)| (l.to_string(), r.to_string()));
        assert_eq!(got, expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_empty_header_is_rejected(#[case] raw: &str) {
        assert_eq!(
            HeaderPair::parse_request(raw),
            Err(FlagError::EmptyHeader(HeaderKind::Request))
        );
        assert_eq!(
            HeaderPair::parse_response(raw),
            Err(FlagError::EmptyHeader(HeaderKind::Response))
        );
    }

    #[test]
    fn test_malformed_header_message() {
        let err = HeaderPair::parse_request(" foo:bar:baz ").unwrap_err();
        assert_eq!(err.to_string(), "invalid request header value: foo:bar:baz");

        let err = HeaderPair::parse_response("foobar").unwrap_err();
        assert_eq!(err.to_string(), "invalid response header value: foobar");
    }

    #[test]
    fn test_map_key() {
        let pair = HeaderPair::parse_response("Server: FakeServer").unwrap();
        assert_eq!(pair.map_key(), "Server=FakeServer");
    }

    #[rstest]
    #[case("foobar")]
    #[case("foo-bar")]
    #[case("user:pa:ss")]
    #[case("user:")]
    fn test_malformed_auth(#[case] raw: &str) {
        assert_eq!(Credentials::parse(raw), Err(FlagError::MalformedAuth));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_empty_auth_flag_means_no_auth(#[case] raw: &str) {
        assert_eq!(AuthFlag::parse(raw), Ok(AuthFlag(None)));
    }

    #[test]
    fn test_auth_flag_still_rejects_malformed_values() {
        assert_eq!(AuthFlag::parse("foobar"), Err(FlagError::MalformedAuth));
        let flag = AuthFlag::parse("user:pass").unwrap();
        assert_eq!(flag.0.map(|c| c.username).as_deref(), Some("user"));
    }

    #[test]
    fn test_auth_is_trimmed_and_hidden_in_debug() {
        let creds = Credentials::parse(" user : secret ").unwrap();
        assert_eq!(creds.username, "user");
        assert_eq!(creds.password, "secret");
        assert!(!format!("{creds:?}").contains("secret"));
    }
}
