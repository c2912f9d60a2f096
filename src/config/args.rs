//! Command line surface.
//!
//! Flags are written Go style with a single dash (`-json`, `-timeout=5`,
//! `-request-header "Accept: */*"`). They are rewritten to the `--long` form
//! before clap parses them, so both spellings work.
use std::ffi::OsString;

use clap::Parser;

use crate::check::request::{DEFAULT_TIMEOUT, MAX_TIMEOUT, MIN_TIMEOUT};

use super::model::Config;
use super::pair::{AuthFlag, HeaderPair};

const EXAMPLES: &str = r#"  examples:

  $ statoo "https://ugur.ozyilmazel.com"
  $ statoo -timeout 30 "https://ugur.ozyilmazel.com"
  $ statoo -verbose "https://ugur.ozyilmazel.com"
  $ statoo -json https://vigo.io
  $ statoo -json -find "Python" https://vigo.io
  $ statoo -request-header "Authorization: Bearer TOKEN" https://vigo.io
  $ statoo -request-header "Authorization: Bearer TOKEN" -request-header "X-Api-Key: APIKEY" https://vigo.io
  $ statoo -auth "user:secret" https://vigo.io
  $ statoo -json -response-header "Server: GitHub.com" https://vigo.io
  $ statoo -json -response-header "Server: GitHub.com" -response-header "Foo: bar" https://vigo.io"#;

/// Flags that consume the following argument when no `=` is used.
const VALUE_FLAGS: &[&str] = &[
    "t",
    "timeout",
    "f",
    "find",
    "request-header",
    "response-header",
    "a",
    "auth",
];

#[derive(Parser, Debug)]
#[command(
    name = "statoo",
    about = "Get the http status of a url, optionally as json with body and response header checks",
    disable_version_flag = true,
    disable_help_flag = true
)]
pub struct Args {
    /// URL to check, or `bash-completion` to print the bash completion script
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Display help
    #[arg(short, long)]
    pub help: bool,

    /// Display version information
    #[arg(long)]
    pub version: bool,

    /// Display build/commit hash
    #[arg(long)]
    pub commithash: bool,

    /// Verbose output, prefixes the status with the url
    #[arg(long)]
    pub verbose: bool,

    /// Provide json output
    #[arg(short, long)]
    pub json: bool,

    #[arg(
        short,
        long,
        default_value_t = DEFAULT_TIMEOUT,
        allow_negative_numbers = true,
        help = format!("Timeout in seconds (min: {MIN_TIMEOUT}, max: {MAX_TIMEOUT})")
    )]
    pub timeout: i64,

    /// Find text in response body if -json is set, case sensitive
    #[arg(short, long, value_name = "TEXT", allow_hyphen_values = true)]
    pub find: Option<String>,

    /// Request header, multiple allowed
    #[arg(long = "request-header", value_name = "NAME: VALUE", value_parser = HeaderPair::parse_request)]
    pub request_headers: Vec<HeaderPair>,

    /// Response header lookup if -json is set, multiple allowed
    #[arg(long = "response-header", value_name = "NAME: VALUE", value_parser = HeaderPair::parse_response)]
    pub response_headers: Vec<HeaderPair>,

    /// Basic auth credentials, empty means none
    #[arg(short, long, value_name = "USERNAME:PASSWORD", value_parser = AuthFlag::parse)]
    pub auth: Option<AuthFlag>,

    /// Skip certificate check and hostname in that certificate
    #[arg(short, long)]
    pub skip: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            url: args.url,
            show_help: args.help,
            show_version: args.version,
            show_commit_hash: args.commithash,
            verbose: args.verbose,
            json: args.json,
            timeout: args.timeout,
            find: args.find,
            request_headers: args.request_headers,
            response_headers: args.response_headers,
            auth: args.auth.and_then(|flag| flag.0),
            skip_verify: args.skip,
        }
    }
}

/// Parses the process arguments (program name first) into a [`Config`].
///
/// # Errors
///
/// Returns the clap error for unknown flags and malformed header or auth
/// values.
pub fn parse_from<I, T>(args: I) -> Result<Config, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    Args::try_parse_from(normalize(args)).map(Config::from)
}

/// The usage text printed for `-help` and when no url is given.
#[must_use]
pub fn usage(version: &str, commit_hash: &str) -> String {
    format!(
        r#"usage: statoo [-flags] URL

  flags:

  -version           display version information ({version})
  -verbose           verbose output (default: false)
  -request-header    request header, multiple allowed, "Key: Value", case sensitive
  -response-header   response header for lookup if -json is set, multiple allowed, "Key: Value"
  -t, -timeout       default timeout in seconds (default: {DEFAULT_TIMEOUT}, min: {MIN_TIMEOUT}, max: {MAX_TIMEOUT})
  -h, -help          display help
  -j, -json          provides json output
  -f, -find          find text in response body if -json is set, case sensitive
  -a, -auth          basic auth "username:password"
  -s, -skip          skip certificate check and hostname in that certificate (default: false)
  -commithash        displays current build/commit hash ({commit_hash})

{EXAMPLES}
"#
    )
}

/// Rewrites single dash long flags into `--long` form.
///
/// Values following a value-taking flag and everything after `--` are
/// passed through untouched.
pub fn normalize<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut expects_value = false;
    let mut terminated = false;

    for (index, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if index == 0 || terminated || expects_value {
            expects_value = false;
            normalized.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };
        if text == "--" {
            terminated = true;
            normalized.push(arg);
            continue;
        }
        let (rewritten, takes_value) = normalize_flag(text);
        expects_value = takes_value;
        normalized.push(rewritten.into());
    }

    normalized
}

fn normalize_flag(arg: &str) -> (String, bool) {
    let Some(body) = arg.strip_prefix('-') else {
        return (arg.to_string(), false);
    };
    let body = body.strip_prefix('-').unwrap_or(body);
    let (name, inline_value) = match body.split_once('=') {
        Some((name, _)) => (name, true),
        None => (body, false),
    };

    // Negative numbers and a lone "-" are values, not flags.
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return (arg.to_string(), false);
    }

    let takes_value = !inline_value && VALUE_FLAGS.contains(&name);
    if name.len() == 1 {
        return (format!("-{body}"), takes_value);
    }
    (format!("--{body}"), takes_value)
}
