//! Media file naming for subtitle cues.
//!
//! Every clip or screenshot cuedeck produces for a cue is stored under a name
//! of the form `{base}[_{time}][_{caption}]{ext}`. The name is a pure function
//! of its inputs so it can be used as a cache key: asking again for the same
//! cue yields the same file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::timecode::to_filename_token;

/// Maximum caption characters kept in a file name (after substitution).
pub const MAX_CAPTION_CHARS: usize = 50;

/// Characters that are not allowed in file names on common platforms.
const RESERVED: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Media kinds cuedeck writes next to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaExtension {
    /// Still frame (`.jpg`).
    Jpg,
    /// Audio clip (`.wav`).
    Wav,
}

impl MediaExtension {
    /// The extension including its leading dot.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpg => ".jpg",
            Self::Wav => ".wav",
        }
    }
}

impl fmt::Display for MediaExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaExtension {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "jpg" => Ok(Self::Jpg),
            "wav" => Ok(Self::Wav),
            _ => Err(CodecError::invalid(format!(
                "unsupported media extension {s:?} (expected .jpg or .wav)"
            ))),
        }
    }
}

/// A generated media file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaFileName(String);

impl MediaFileName {
    /// Borrow the file name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MediaFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MediaFileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<MediaFileName> for String {
    fn from(name: MediaFileName) -> Self {
        name.0
    }
}

/// Build the file name for a cue's media.
///
/// - The last extension of `video_name` is dropped (`lesson1.mp4` → `lesson1`).
/// - A non-empty `time_token` is appended as `_{token}`.
/// - A non-empty `caption` has every reserved character replaced with `_`
///   one for one, is cut to [`MAX_CAPTION_CHARS`] characters and appended as
///   `_{caption}`.
/// - `extension` goes last.
///
/// Base name and time token go through the same substitution, so the result
/// never contains `< > : " / \ | ? *`.
pub fn make_file_name(
    video_name: &str,
    extension: MediaExtension,
    time_token: &str,
    caption: &str,
) -> MediaFileName {
    let mut name = sanitize(strip_extension(video_name));

    if !time_token.is_empty() {
        name.push('_');
        name.push_str(&sanitize(time_token));
    }

    if !caption.is_empty() {
        name.push('_');
        name.extend(sanitize(caption).chars().take(MAX_CAPTION_CHARS));
    }

    name.push_str(extension.as_str());
    MediaFileName(name)
}

/// Name the media for a cue starting at `seconds`.
///
/// # Errors
///
/// [`CodecError::InvalidInput`] if `seconds` is negative or not finite.
pub fn cue_file_name(
    video_name: &str,
    extension: MediaExtension,
    seconds: f64,
    caption: &str,
) -> Result<MediaFileName, CodecError> {
    let token = to_filename_token(seconds)?;
    Ok(make_file_name(video_name, extension, &token, caption))
}

/// Drop a trailing `.ext` when `ext` is non-empty and has no `/`.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) => {
            let ext = &name[dot + 1..];
            if ext.is_empty() || ext.contains('/') {
                name
            } else {
                &name[..dot]
            }
        }
        None => name,
    }
}

fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_with_time_and_caption() {
        let name = make_file_name("lesson1.mp4", MediaExtension::Jpg, "01-02", "Hello/World:!");
        assert_eq!(name.as_str(), "lesson1_01-02_Hello_World__.jpg");
    }

    #[test]
    fn bare_name_without_segments() {
        let name = make_file_name("clip", MediaExtension::Wav, "", "");
        assert_eq!(name.as_str(), "clip.wav");
    }

    #[test]
    fn caption_truncated_after_substitution() {
        let caption: String = "a?".repeat(40); // 80 chars
        let name = make_file_name("v.mkv", MediaExtension::Jpg, "", &caption);

        let segment = name
            .as_str()
            .strip_prefix("v_")
            .and_then(|s| s.strip_suffix(".jpg"))
            .unwrap();
        assert_eq!(segment.chars().count(), MAX_CAPTION_CHARS);
        assert_eq!(segment, "a_".repeat(25));
    }

    #[test]
    fn caption_counts_characters_not_bytes() {
        let caption = "字".repeat(60);
        let name = make_file_name("v", MediaExtension::Wav, "", &caption);
        assert_eq!(name.as_str(), format!("v_{}.wav", "字".repeat(50)));
    }

    #[test]
    fn unsafe_caption_collapses_to_underscores() {
        let name = make_file_name("v", MediaExtension::Jpg, "", "<>:\"/\\|?*");
        assert_eq!(name.as_str(), "v__________.jpg");
    }

    #[test]
    fn empty_video_name_starts_with_segments() {
        let name = make_file_name("", MediaExtension::Jpg, "00-05", "hi");
        assert_eq!(name.as_str(), "_00-05_hi.jpg");
    }

    #[test]
    fn only_last_extension_is_stripped() {
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(strip_extension("no_extension"), "no_extension");
        assert_eq!(strip_extension("trailing."), "trailing.");
        assert_eq!(strip_extension(".hidden"), "");
        assert_eq!(strip_extension("dir.v2/file"), "dir.v2/file");
    }

    #[test]
    fn result_never_contains_reserved_characters() {
        let name = make_file_name("a:b/c.mp4", MediaExtension::Wav, "01:02", "x|y");
        assert_eq!(name.as_str(), "a_b_c_01_02_x_y.wav");
        assert!(!name.as_str().contains(RESERVED));
    }

    #[test]
    fn deterministic() {
        let a = make_file_name("ep.mp4", MediaExtension::Jpg, "10-00", "same");
        let b = make_file_name("ep.mp4", MediaExtension::Jpg, "10-00", "same");
        assert_eq!(a, b);
    }

    #[test]
    fn cue_file_name_formats_time() {
        let name = cue_file_name("show.mkv", MediaExtension::Wav, 3661.7, "line").unwrap();
        assert_eq!(name.to_string(), "show_01-01-01_line.wav");
        assert!(cue_file_name("show.mkv", MediaExtension::Wav, -1.0, "").is_err());
    }

    #[test]
    fn extension_parsing() {
        assert_eq!("jpg".parse::<MediaExtension>().unwrap(), MediaExtension::Jpg);
        assert_eq!(".WAV".parse::<MediaExtension>().unwrap(), MediaExtension::Wav);
        assert!("png".parse::<MediaExtension>().is_err());
    }

    #[test]
    fn file_name_serializes_as_plain_string() {
        let name = make_file_name("clip", MediaExtension::Wav, "", "");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"clip.wav\"");
    }
}
