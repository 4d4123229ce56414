//! Extraction of structured metadata from prober diagnostic output.
//!
//! The prober prints a human-readable report to its error stream rather
//! than anything machine-readable, so every field is scraped out of the
//! raw text with a fixed pattern. Each extraction is independent of the
//! others and tolerant of absence: a field that does not appear in the
//! report stays `None` (or `0.0` for the two rate fields) and never
//! raises an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Raw diagnostic output captured from a prober run.
///
/// Opaque and immutable; extraction borrows the text and never mutates it.
#[derive(Debug, Clone)]
pub struct ProbeOutput(String);

impl ProbeOutput {
    pub fn new(text: impl Into<String>) -> Self {
        ProbeOutput(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProbeOutput {
    fn from(text: String) -> Self {
        ProbeOutput(text)
    }
}

static FRAME_RATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?) tb\(r\)").unwrap());
static DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Duration: (\d+):(\d+):(\d+(?:\.\d+)?)").unwrap());
static VIDEO_SIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Video:.+\s(\d+)x(\d+)").unwrap());
static VIDEO_CODEC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Video: (\w+)(?: \([ \w]+\))?").unwrap());
static AUDIO_CODEC: Lazy<Regex> = Lazy::new(|| Regex::new(r"Audio: (\w+)").unwrap());
static SAMPLE_RATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+) Hz").unwrap());
static BITRATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+) kb/s").unwrap());
static CHANNEL_LAYOUT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Audio: .*, (mono|stereo|quad|hexagonal|octagonal|downmix|\d\.[01]|\d+ channels?)")
        .unwrap()
});

/// Structured metadata for the first video and audio stream of a probed
/// file.
///
/// Populated in a single pass over the report text and read-only
/// afterwards. Fields the report does not mention stay absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MediaMetadata {
    /// Total duration in seconds; `0.0` when the report has no Duration line
    pub duration_secs: f64,
    /// Frames per second; `0.0` when the report has no `tb(r)` token
    pub frame_rate: f64,
    /// Codec identifier of the video stream
    pub video_codec: Option<String>,
    /// Frame size as (width, height) in pixels
    pub video_size: Option<(u32, u32)>,
    /// Video stream bitrate in kb/s
    pub video_bitrate_kbps: Option<u32>,
    /// Codec identifier of the audio stream
    pub audio_codec: Option<String>,
    /// Audio sampling frequency in Hz
    pub audio_sample_rate_hz: Option<u32>,
    /// Audio stream bitrate in kb/s
    pub audio_bitrate_kbps: Option<u32>,
    /// Number of audio channels, decoded from the channel-layout token
    pub audio_channels: Option<u32>,
}

impl MediaMetadata {
    /// Run every field extraction over a captured report.
    pub fn extract(output: &ProbeOutput) -> Self {
        let text = output.as_str();
        MediaMetadata {
            duration_secs: duration_secs(text),
            frame_rate: frame_rate(text),
            video_codec: video_codec(text),
            video_size: video_size(text),
            video_bitrate_kbps: video_bitrate(text),
            audio_codec: audio_codec(text),
            audio_sample_rate_hz: audio_sample_rate(text),
            audio_bitrate_kbps: audio_bitrate(text),
            audio_channels: audio_channels(text),
        }
    }
}

/// First `<number> tb(r)` token in the report.
fn frame_rate(text: &str) -> f64 {
    FRAME_RATE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0.0)
}

/// First `Duration: H:MM:SS.ff` timestamp, converted to total seconds.
fn duration_secs(text: &str) -> f64 {
    match DURATION.captures(text) {
        Some(caps) => {
            let hours: f64 = caps[1].parse().unwrap_or(0.0);
            let minutes: f64 = caps[2].parse().unwrap_or(0.0);
            let seconds: f64 = caps[3].parse().unwrap_or(0.0);
            hours * 3600.0 + minutes * 60.0 + seconds
        }
        None => 0.0,
    }
}

/// `<width>x<height>` dimension token on the first `Video:` line.
fn video_size(text: &str) -> Option<(u32, u32)> {
    let caps = VIDEO_SIZE.captures(text)?;
    let width = caps[1].parse().ok()?;
    let height = caps[2].parse().ok()?;
    Some((width, height))
}

/// Codec identifier of the first `Video:` occurrence. A parenthesized
/// profile annotation after the identifier is matched but discarded.
fn video_codec(text: &str) -> Option<String> {
    VIDEO_CODEC.captures(text).map(|caps| caps[1].to_string())
}

/// First `<integer> kb/s` token anywhere in the report. The prober prints
/// the video stream line before the audio stream line, so the first
/// occurrence is the video bitrate.
fn video_bitrate(text: &str) -> Option<u32> {
    BITRATE.captures(text).and_then(|caps| caps[1].parse().ok())
}

/// Codec identifier of the first `Audio:` occurrence.
fn audio_codec(text: &str) -> Option<String> {
    AUDIO_CODEC.captures(text).map(|caps| caps[1].to_string())
}

/// First `<integer> Hz` token in the report.
fn audio_sample_rate(text: &str) -> Option<u32> {
    SAMPLE_RATE.captures(text).and_then(|caps| caps[1].parse().ok())
}

/// Second `<integer> kb/s` token in the report, the audio stream's
/// bitrate by the same positional layout as [`video_bitrate`]. Fewer than
/// two tokens leave the field absent.
fn audio_bitrate(text: &str) -> Option<u32> {
    BITRATE
        .captures_iter(text)
        .nth(1)
        .and_then(|caps| caps[1].parse().ok())
}

/// Channel-layout token on the first `Audio: ...,` line, decoded to a
/// channel count.
fn audio_channels(text: &str) -> Option<u32> {
    let caps = CHANNEL_LAYOUT.captures(text)?;
    decode_channel_layout(&caps[1])
}

/// Map a channel-layout token to a channel count. Tokens outside the
/// recognized set decode to `None`.
fn decode_channel_layout(token: &str) -> Option<u32> {
    match token {
        "mono" => Some(1),
        "stereo" | "downmix" => Some(2),
        "quad" => Some(4),
        "hexagonal" => Some(6),
        "octagonal" => Some(8),
        _ if token.contains("channel") => {
            token.split_whitespace().next().and_then(|n| n.parse().ok())
        }
        _ => {
            // Layout ratios like 5.1: full-range channels plus
            // low-frequency channels, summed.
            let (front, lfe) = token.split_once('.')?;
            let front: u32 = front.parse().ok()?;
            let lfe: u32 = lfe.parse().ok()?;
            Some(front + lfe)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_exact_conversion() {
        assert_eq!(
            duration_secs("  Duration: 00:04:04.84, start: 0.0"),
            4.0 * 60.0 + 4.84
        );
        assert_eq!(duration_secs("Duration: 01:00:00.00"), 3600.0);
        assert_eq!(duration_secs("Duration: 00:00:07.50"), 7.5);
    }

    #[test]
    fn test_duration_absent_is_zero() {
        assert_eq!(duration_secs("no timestamps here"), 0.0);
        assert_eq!(duration_secs(""), 0.0);
    }

    #[test]
    fn test_frame_rate_first_occurrence() {
        let text = "Stream #0.0: Video: h264, 23.98 tb(r)\nStream #0.1: 25.00 tb(r)";
        assert_eq!(frame_rate(text), 23.98);
    }

    #[test]
    fn test_frame_rate_absent_is_zero() {
        assert_eq!(frame_rate("Video: h264, 25 fps"), 0.0);
    }

    #[test]
    fn test_video_size() {
        assert_eq!(
            video_size("Stream #0.0: Video: msmpeg4v2, yuv420p, 368x208, 782 kb/s"),
            Some((368, 208))
        );
        assert_eq!(video_size("Audio: mp3, 44100 Hz"), None);
    }

    #[test]
    fn test_video_codec_discards_profile_annotation() {
        assert_eq!(
            video_codec("Stream #0.0: Video: h264 (High), yuv420p"),
            Some("h264".to_string())
        );
        assert_eq!(video_codec("Video: msmpeg4v2, yuv420p"), Some("msmpeg4v2".to_string()));
        assert_eq!(video_codec("Audio: mp3"), None);
    }

    #[test]
    fn test_audio_codec() {
        assert_eq!(audio_codec("Stream #0.1: Audio: mp3, 44100 Hz"), Some("mp3".to_string()));
        assert_eq!(audio_codec("Video: h264"), None);
    }

    #[test]
    fn test_sample_rate() {
        assert_eq!(audio_sample_rate("Audio: mp3, 44100 Hz, stereo"), Some(44100));
        assert_eq!(audio_sample_rate("Audio: mp3, stereo"), None);
    }

    #[test]
    fn test_single_bitrate_token_is_video_only() {
        let text = "Stream #0.0: Audio: mp3, 44100 Hz, stereo, 192 kb/s";
        assert_eq!(video_bitrate(text), Some(192));
        assert_eq!(audio_bitrate(text), None);
    }

    #[test]
    fn test_two_bitrate_tokens_split_by_position() {
        let text = "Video: msmpeg4v2, 368x208, 782 kb/s\nAudio: mp3, 44100 Hz, stereo, 96 kb/s";
        assert_eq!(video_bitrate(text), Some(782));
        assert_eq!(audio_bitrate(text), Some(96));
    }

    #[test]
    fn test_bitrate_absent() {
        assert_eq!(video_bitrate("Video: h264, 1920x1080"), None);
        assert_eq!(audio_bitrate("Video: h264, 1920x1080"), None);
    }

    #[test]
    fn test_channel_layout_table() {
        assert_eq!(decode_channel_layout("mono"), Some(1));
        assert_eq!(decode_channel_layout("stereo"), Some(2));
        assert_eq!(decode_channel_layout("downmix"), Some(2));
        assert_eq!(decode_channel_layout("quad"), Some(4));
        assert_eq!(decode_channel_layout("hexagonal"), Some(6));
        assert_eq!(decode_channel_layout("octagonal"), Some(8));
        assert_eq!(decode_channel_layout("5.1"), Some(6));
        assert_eq!(decode_channel_layout("7.1"), Some(8));
        assert_eq!(decode_channel_layout("2 channels"), Some(2));
        assert_eq!(decode_channel_layout("1 channel"), Some(1));
    }

    #[test]
    fn test_channel_layout_unrecognized_token() {
        assert_eq!(decode_channel_layout("surround"), None);
        assert_eq!(decode_channel_layout(""), None);
    }

    #[test]
    fn test_channels_require_audio_line() {
        // A layout word outside an Audio: line is not a channel token.
        assert_eq!(audio_channels("Video: h264, stereo"), None);
        assert_eq!(
            audio_channels("Stream #0.1: Audio: dts, 48000 Hz, 5.1, s16"),
            Some(6)
        );
    }

    #[test]
    fn test_channels_absent_without_layout_token() {
        assert_eq!(audio_channels("Audio: pcm_s16le, 8000 Hz"), None);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let output = ProbeOutput::new(
            "Duration: 00:04:04.84\nVideo: msmpeg4v2, 368x208, 782 kb/s, 25.00 tb(r)\n\
             Audio: mp3, 44100 Hz, stereo, 96 kb/s",
        );
        let first = MediaMetadata::extract(&output);
        let second = MediaMetadata::extract(&output);
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_empty_text_yields_defaults() {
        let metadata = MediaMetadata::extract(&ProbeOutput::new(""));
        assert_eq!(metadata, MediaMetadata::default());
        assert_eq!(metadata.duration_secs, 0.0);
        assert_eq!(metadata.frame_rate, 0.0);
    }
}
