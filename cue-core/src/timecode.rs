//! Time codec for subtitle cues.
//!
//! Converts between seconds and the two textual projections cuedeck uses:
//! - display strings (`MM:SS`, or `HH:MM:SS` once the hour is non-zero)
//! - filename tokens (same shape, `:` replaced by `-` because `:` is not
//!   allowed in file names on common platforms)
//!
//! It also parses subtitle-track timestamps (`HH:MM:SS.mmm`, `MM:SS,mmm`, ...)
//! back into seconds. Both `.` and `,` are accepted as the fractional
//! separator since SRT-style sources use the latter.

use std::fmt;
use std::str::FromStr;

use crate::error::CodecError;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * 60;

/// A non-negative, finite number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeCode(f64);

impl TimeCode {
    /// Create a time code, rejecting negative or non-finite values.
    pub fn new(seconds: f64) -> Result<Self, CodecError> {
        check_seconds(seconds)?;
        Ok(Self(seconds))
    }

    /// The raw number of seconds.
    pub fn seconds(self) -> f64 {
        self.0
    }

    /// `MM:SS` or `HH:MM:SS`, truncated to whole seconds.
    pub fn display(self) -> String {
        format_whole(self.0.trunc() as u64, ':')
    }

    /// Same as [`display`](Self::display) with `-` instead of `:`.
    pub fn filename_token(self) -> String {
        format_whole(self.0.trunc() as u64, '-')
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl FromStr for TimeCode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_subtitle_timestamp(s).map(Self)
    }
}

/// Format seconds as `MM:SS`, or `HH:MM:SS` when the hour is non-zero.
///
/// Sub-second precision is dropped: `61.9` formats as `01:01`.
///
/// # Errors
///
/// [`CodecError::InvalidInput`] if `seconds` is negative, NaN or infinite.
pub fn to_display_string(seconds: f64) -> Result<String, CodecError> {
    TimeCode::new(seconds).map(TimeCode::display)
}

/// Format seconds as a filename-safe token (`MM-SS` or `HH-MM-SS`).
///
/// # Errors
///
/// Same as [`to_display_string`].
pub fn to_filename_token(seconds: f64) -> Result<String, CodecError> {
    TimeCode::new(seconds).map(TimeCode::filename_token)
}

/// Parse a subtitle timestamp into seconds.
///
/// The rightmost field is seconds and may carry a fraction (`.` or `,`).
/// Every field to its left is worth 60 times the next one, so `1:00:00`
/// is an hour and a four-field `1:0:0:0` is 60 hours rather than an error.
///
/// # Errors
///
/// [`CodecError::InvalidInput`] if any field is empty, not a number,
/// negative or not finite.
pub fn parse_subtitle_timestamp(text: &str) -> Result<f64, CodecError> {
    let mut total = 0.0;

    for (position, field) in text.split(':').rev().enumerate() {
        let field = field.trim();
        let value: f64 = field.replace(',', ".").parse().map_err(|_| {
            CodecError::invalid(format!("non-numeric field {field:?} in timestamp {text:?}"))
        })?;

        if !value.is_finite() || value < 0.0 {
            return Err(CodecError::invalid(format!(
                "field {field:?} in timestamp {text:?} is out of range"
            )));
        }

        total += value * 60f64.powi(position as i32);
    }

    Ok(total)
}

fn check_seconds(seconds: f64) -> Result<(), CodecError> {
    if !seconds.is_finite() {
        return Err(CodecError::invalid(format!(
            "seconds must be finite, got {seconds}"
        )));
    }
    if seconds < 0.0 {
        return Err(CodecError::invalid(format!(
            "seconds must be non-negative, got {seconds}"
        )));
    }
    Ok(())
}

fn format_whole(total: u64, separator: char) -> String {
    let hours = total / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = total % SECONDS_PER_MINUTE;

    if hours > 0 {
        format!("{hours:02}{separator}{minutes:02}{separator}{secs:02}")
    } else {
        format!("{minutes:02}{separator}{secs:02}")
    }
}
