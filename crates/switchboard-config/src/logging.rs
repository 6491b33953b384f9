//! Output format of the service's log records (`LogFormat` in the document).

use serde::{Deserialize, Serialize};
use strum::Display;

/// How log records are rendered on standard error.
///
/// The document spelling and the name shown in the bootstrap log record are
/// the same lower-case word.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LogFormat {
    /// One JSON object per record with event fields flattened.
    Json,
    /// Single-line text for operators reading the terminal.
    #[default]
    Compact,
}
