//! Build the media file name for a subtitle cue.

use anyhow::{Context, Result};
use cue_core::{cue_file_name, make_file_name, CodecError, MediaExtension, MediaFileName, TimeCode};

/// Run the name command.
pub fn run(
    video: &str,
    extension: MediaExtension,
    at: Option<&str>,
    caption: Option<&str>,
) -> Result<()> {
    let name = file_name(video, extension, at, caption).context("Invalid cue time")?;
    println!("{}", name);
    Ok(())
}

/// `at` may be plain seconds (`62.5`) or a subtitle timestamp (`00:01:02,500`).
fn file_name(
    video: &str,
    extension: MediaExtension,
    at: Option<&str>,
    caption: Option<&str>,
) -> Result<MediaFileName, CodecError> {
    let caption = caption.unwrap_or_default();
    match at {
        Some(text) => {
            let start: TimeCode = text.parse()?;
            cue_file_name(video, extension, start.seconds(), caption)
        }
        None => Ok(make_file_name(video, extension, "", caption)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_from_timestamp() {
        let name = file_name(
            "lesson1.mp4",
            MediaExtension::Jpg,
            Some("00:01:02.500"),
            Some("Hello/World:!"),
        )
        .unwrap();
        assert_eq!(name.as_str(), "lesson1_01-02_Hello_World__.jpg");
    }

    #[test]
    fn name_from_plain_seconds() {
        let name = file_name("ep.mkv", MediaExtension::Wav, Some("3661"), None).unwrap();
        assert_eq!(name.as_str(), "ep_01-01-01.wav");
    }

    #[test]
    fn timestamp_and_seconds_agree() {
        let from_timestamp =
            file_name("ep.mkv", MediaExtension::Jpg, Some("01:02,250"), Some("hi")).unwrap();
        let from_seconds = cue_file_name("ep.mkv", MediaExtension::Jpg, 62.25, "hi").unwrap();
        assert_eq!(from_timestamp, from_seconds);
    }

    #[test]
    fn name_without_time() {
        let name = file_name("clip", MediaExtension::Wav, None, None).unwrap();
        assert_eq!(name.as_str(), "clip.wav");
    }

    #[test]
    fn bad_time_is_rejected() {
        assert!(file_name("clip", MediaExtension::Wav, Some("1:xx"), None).is_err());
        assert!(run("clip", MediaExtension::Wav, Some("-3"), None).is_err());
    }
}
