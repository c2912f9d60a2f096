//! `statoo` sends one http GET to a url and reports the status code.
//!
//! With json output it can also search the (gunzipped) response body for a
//! piece of text and compare response headers against expected values.
//!
//! ```no_run
//! # async fn demo() -> statoo::Result<()> {
//! use statoo::check::{self, request::CheckRequest};
//!
//! let request = CheckRequest::new("https://vigo.io", 10)?.with_find("Python");
//! let result = check::run(&request).await?;
//! println!("{} {:?}", result.status, result.found);
//! # Ok(())
//! # }
//! ```
pub mod app;
pub mod check;
pub mod completion;
pub mod config;
pub mod error;
pub mod output;

pub use error::{Error, Result};
