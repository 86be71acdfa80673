//! Convert cue times.

use anyhow::Result;
use clap::Subcommand;
use cue_core::{parse_subtitle_timestamp, to_display_string, to_filename_token, CodecError};

/// Time conversions.
#[derive(Subcommand, Debug)]
pub enum TimeOp {
    /// Seconds to MM:SS or HH:MM:SS
    Display {
        /// Non-negative number of seconds
        #[arg(allow_hyphen_values = true)]
        seconds: f64,
    },

    /// Seconds to a filename-safe MM-SS or HH-MM-SS token
    Token {
        /// Non-negative number of seconds
        #[arg(allow_hyphen_values = true)]
        seconds: f64,
    },

    /// Subtitle timestamp (e.g. 00:01:02,500) to seconds
    Parse {
        /// Colon-delimited timestamp
        timestamp: String,
    },
}

/// Run the time command.
pub fn run(op: TimeOp) -> Result<()> {
    println!("{}", convert(&op)?);
    Ok(())
}

fn convert(op: &TimeOp) -> Result<String, CodecError> {
    match op {
        TimeOp::Display { seconds } => to_display_string(*seconds),
        TimeOp::Token { seconds } => to_filename_token(*seconds),
        TimeOp::Parse { timestamp } => parse_subtitle_timestamp(timestamp).map(|s| s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_token() {
        assert_eq!(convert(&TimeOp::Display { seconds: 3661.0 }).unwrap(), "01:01:01");
        assert_eq!(convert(&TimeOp::Token { seconds: 61.0 }).unwrap(), "01-01");
    }

    #[test]
    fn parse_prints_plain_seconds() {
        let op = TimeOp::Parse {
            timestamp: "01:02,250".into(),
        };
        assert_eq!(convert(&op).unwrap(), "62.25");
    }

    #[test]
    fn negative_seconds_rejected() {
        assert!(convert(&TimeOp::Display { seconds: -1.0 }).is_err());
    }
}
