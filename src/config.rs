use std::str::FromStr;

use crate::subtitle::line::LineStore;
use crate::subtitle::types::{SubtitleError, SubtitleResult};

/// How line text appears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum FadeMode {
    /// Whole line at once
    #[default]
    None = 0,
    /// Character by character
    Typewriter = 1,
}

impl From<u32> for FadeMode {
    fn from(value: u32) -> Self {
        match value {
            1 => FadeMode::Typewriter,
            _ => FadeMode::None,
        }
    }
}

impl FromStr for FadeMode {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(FadeMode::None),
            "typewriter" => Ok(FadeMode::Typewriter),
            _ => Err(SubtitleError::InvalidFadeMode(s.to_string())),
        }
    }
}

/// Author-time playback settings, read-only while playing
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    pub fade_mode: FadeMode,
    /// Reveal at a fixed rate and stretch line lengths to fit
    pub typewriter_consistent_speed: bool,
    /// Enable the audio source only while playing
    pub audio_auto_disable: bool,
    /// Event sent to the listener on pause
    pub pause_event_name: String,
    /// Event sent to the listener when the last line is done
    pub end_event_name: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            fade_mode: FadeMode::None,
            typewriter_consistent_speed: false,
            audio_auto_disable: true,
            pause_event_name: "PausedSubtitles".to_string(),
            end_event_name: "FinishedSubtitles".to_string(),
        }
    }
}

impl PlaybackConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fade_mode(mut self, mode: FadeMode) -> Self {
        self.fade_mode = mode;
        self
    }

    pub fn with_consistent_speed(mut self, consistent: bool) -> Self {
        self.typewriter_consistent_speed = consistent;
        self
    }

    pub fn with_audio_auto_disable(mut self, auto_disable: bool) -> Self {
        self.audio_auto_disable = auto_disable;
        self
    }

    /// Set the listener event names
    pub fn with_event_names(mut self, pause: &str, end: &str) -> Self {
        self.pause_event_name = pause.to_string();
        self.end_event_name = end.to_string();
        self
    }
}

/// Reject negative or non-finite line timings
pub fn validate_lines(lines: &LineStore) -> SubtitleResult<()> {
    for (index, line) in lines.iter().enumerate() {
        check_timing(index, "display_length", line.display_length)?;
        check_timing(index, "post_line_delay", line.post_line_delay)?;
    }
    Ok(())
}

fn check_timing(index: usize, field: &'static str, value: f32) -> SubtitleResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SubtitleError::InvalidTiming { index, field, value })
    }
}
