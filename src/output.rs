use std::io::Write;

use crate::check::result::CheckResult;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `<status>\n`, prefixed with `<url> -> ` when verbose.
    Text { verbose: bool },
    Json,
}

/// Renders the result and writes it to `out` in one go.
///
/// # Errors
///
/// [`Error::Serialization`] if the json cannot be produced,
/// [`Error::Write`] if the sink rejects it.
pub fn write_result<W: Write>(out: &mut W, result: &CheckResult, format: OutputFormat) -> Result<()> {
    let rendered = render(result, format)?;
    out.write_all(rendered.as_bytes()).map_err(Error::Write)?;
    out.flush().map_err(Error::Write)
}

/// # Errors
///
/// [`Error::Serialization`] if the json cannot be produced.
pub fn render(result: &CheckResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text { verbose: true } => Ok(format!("{} -> {}\n", result.url, result.status)),
        OutputFormat::Text { verbose: false } => Ok(format!("{}\n", result.status)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string(result).map_err(Error::Serialization)?;
            json.push('\n');
            Ok(json)
        }
    }
}
