//! Output format of the server's stderr log stream.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How log events are rendered on stderr.
///
/// Parsing ignores case, so `--log-format JSON` and `SWITCHBOARD_LOG_FORMAT=json`
/// select the same variant.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, with fields flattened.
    #[default]
    Json,
    /// Single-line text for interactive use.
    Compact,
}

/// Error returned when text names no [`LogFormat`].
pub type LogFormatParseError = strum::ParseError;
