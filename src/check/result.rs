use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one check, in the shape of the json output.
///
/// Fields that do not apply are left out of the json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub url: String,
    pub status: u16,
    pub checked_at: DateTime<Utc>,

    /// Milliseconds until the response head arrived.
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub elapsed: f64,

    /// Decoded body length in bytes, only known when the body was read.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub length: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub find: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found: Option<bool>,

    #[serde(rename = "skipcc", default, skip_serializing_if = "Option::is_none")]
    pub skip_certificate_check: Option<bool>,

    /// `"Name=Value"` to whether the response carried exactly that value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_headers: Option<BTreeMap<String, bool>>,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

fn is_zero_f64(value: &f64) -> bool {
    *value == 0.0
}
