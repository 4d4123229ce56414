//! Styled terminal output for the metadata report.

use owo_colors::OwoColorize;
use vidprobe_core::MediaMetadata;

/// Print a section heading with an underline.
pub fn print_heading(text: &str) {
    println!("\n{}", text.bold());
    println!("{}", "=".repeat(text.len()).blue());
}

/// Print an info line with a padded, colored label.
pub fn print_info(label: &str, value: impl std::fmt::Display) {
    // Pad before styling; the escape codes would otherwise count toward
    // the column width.
    let label = format!("{:<15}", format!("{}:", label));
    println!("{} {}", label.bright_cyan(), value);
}

/// Print the two-section metadata report for a probed file.
///
/// Absent fields render as "unknown" so sparse reports (a non-media file,
/// an audio-only file) still produce a complete table.
pub fn print_report(filename: &str, metadata: &MediaMetadata) {
    print_heading("VIDEO INFO");
    print_info("Filename", filename);
    print_info("Video Length", format!("{} seconds", metadata.duration_secs));
    print_info("Video Codec", display_or_unknown(metadata.video_codec.as_deref()));
    print_info("Video Size", display_size(metadata.video_size));
    print_info("Frame Rate", format!("{} fps", metadata.frame_rate));
    print_info("Video Bitrate", display_with_unit(metadata.video_bitrate_kbps, "kb/s"));

    print_heading("AUDIO INFO");
    print_info("Audio Codec", display_or_unknown(metadata.audio_codec.as_deref()));
    print_info("Sampling Freq", display_with_unit(metadata.audio_sample_rate_hz, "Hz"));
    print_info("Audio Bitrate", display_with_unit(metadata.audio_bitrate_kbps, "kb/s"));
    print_info(
        "Channels",
        metadata
            .audio_channels
            .map(|c| c.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    );
    println!();
}

fn display_or_unknown(value: Option<&str>) -> String {
    value.unwrap_or("unknown").to_string()
}

fn display_size(size: Option<(u32, u32)>) -> String {
    match size {
        Some((width, height)) => format!("{}x{}", width, height),
        None => "unknown".to_string(),
    }
}

fn display_with_unit(value: Option<u32>, unit: &str) -> String {
    match value {
        Some(v) => format!("{} {}", v, unit),
        None => "unknown".to_string(),
    }
}
