use std::io::Write;

use crate::check;
use crate::completion::{BASH_COMPLETION, BASH_COMPLETION_ARG};
use crate::config::args;
use crate::config::model::Config;
use crate::error::{Error, Result};
use crate::output::write_result;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const COMMIT_HASH: &str = env!("STATOO_COMMIT_HASH");

/// One run of the command line tool, writing to `out`.
pub struct App<W> {
    config: Config,
    out: W,
}

impl<W: Write> App<W> {
    pub fn new(config: Config, out: W) -> Self {
        App { config, out }
    }

    /// Handles the informational flags, otherwise checks the url.
    ///
    /// With `-help` or without a url the usage text is printed and the run
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Input errors before any request is made, then transport, body and
    /// output errors. Nothing is written to `out` on error.
    pub async fn run(&mut self) -> Result<()> {
        if self.config.show_help {
            return self.print(&args::usage(VERSION, COMMIT_HASH));
        }
        if self.config.show_version {
            return self.print(VERSION);
        }
        if self.config.show_commit_hash {
            return self.print(COMMIT_HASH);
        }
        if self.config.url.as_deref() == Some(BASH_COMPLETION_ARG) {
            return self.print(BASH_COMPLETION);
        }
        if self.config.is_missing_url() {
            return self.print(&args::usage(VERSION, COMMIT_HASH));
        }

        let request = self.config.check_request()?;
        let result = check::run(&request).await?;
        write_result(&mut self.out, &result, self.config.output_format())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text.trim_end()).map_err(Error::Write)
    }
}
