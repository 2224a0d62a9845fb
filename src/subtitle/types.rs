//! Core types for the subtitle system

/// Error type for subtitle store and configuration operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubtitleError {
    #[error("Line index {index} out of range (store has {len} lines)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid fade mode: {0}. Valid options: none, typewriter")]
    InvalidFadeMode(String),

    #[error("Invalid {field} on line {index}: {value}")]
    InvalidTiming {
        index: usize,
        field: &'static str,
        value: f32,
    },
}

/// Result type for subtitle operations
pub type SubtitleResult<T> = Result<T, SubtitleError>;

/// Placeholder replaced with the local user's display name
pub const PLAYER_NAME_TOKEN: &str = "{PlayerName}";

/// Pause between starting playback and the first loop tick (seconds)
pub const SETTLE_DELAY: f32 = 0.5;

/// Fixed typewriter cadence and per-character floor (seconds)
pub const TYPEWRITER_STEP: f32 = 0.05;

/// Slowest typewriter cadence when timing follows the line length (seconds)
pub const TYPEWRITER_MAX_STEP: f32 = 0.1;

/// Buffer added to every line when typewriter speed is normalised (seconds)
pub const NORMALIZED_LENGTH_BUFFER: f32 = 1.0;

/// Fade-out speed used for very short post-line delays
pub const MAX_FADE_SPEED: f32 = 10.0;

/// Animator float parameter driving fade playback speed
pub const SPEED_MULTIPLIER_PARAM: &str = "SpeedMultiplier";

/// Message logged whenever a callback finds the line index out of range
pub const BROKEN_STATE_MESSAGE: &str =
    "Subtitles have been broken! Call reset_subtitles to fix!";

/// Opaque handle to an audio clip owned by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioHandle {
    /// Host clip identifier
    pub id: u32,
    /// Clip length in seconds, when the host knows it
    pub length: Option<f32>,
}

impl AudioHandle {
    /// Create a handle without a known length
    pub fn new(id: u32) -> Self {
        Self { id, length: None }
    }

    /// Create a handle with a known clip length
    pub fn with_length(id: u32, length: f32) -> Self {
        Self {
            id,
            length: Some(length),
        }
    }
}

/// Named animator states the player transitions between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualState {
    /// Text fade layer at rest, nothing animating
    FadeEmpty,
    /// Fade the line text back in after a delay
    FadeTextIn,
    /// Fade the line text out before a delay
    FadeTextOut,
    /// Open the subtitle panel
    OpenSubtitle,
    /// Close the subtitle panel
    CloseSubtitle,
}

impl VisualState {
    /// Layer-qualified animator state path
    pub fn path(self) -> &'static str {
        match self {
            VisualState::FadeEmpty => "TextFade.Empty",
            VisualState::FadeTextIn => "TextFade.FadeTextIn",
            VisualState::FadeTextOut => "TextFade.FadeTextOut",
            VisualState::OpenSubtitle => "Base Layer.OpenSubtitle",
            VisualState::CloseSubtitle => "Base Layer.CloseSubtitle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtitle_error_display() {
        assert_eq!(
            format!("{}", SubtitleError::IndexOutOfRange { index: 4, len: 2 }),
            "Line index 4 out of range (store has 2 lines)"
        );
        assert_eq!(
            format!("{}", SubtitleError::InvalidFadeMode("fancy".into())),
            "Invalid fade mode: fancy. Valid options: none, typewriter"
        );
        assert_eq!(
            format!(
                "{}",
                SubtitleError::InvalidTiming {
                    index: 1,
                    field: "display_length",
                    value: -2.0
                }
            ),
            "Invalid display_length on line 1: -2"
        );
    }

    #[test]
    fn test_audio_handle() {
        assert_eq!(AudioHandle::new(3).length, None);
        assert_eq!(AudioHandle::with_length(3, 2.5).length, Some(2.5));
    }

    #[test]
    fn test_visual_state_paths() {
        assert_eq!(VisualState::FadeEmpty.path(), "TextFade.Empty");
        assert_eq!(VisualState::FadeTextIn.path(), "TextFade.FadeTextIn");
        assert_eq!(VisualState::FadeTextOut.path(), "TextFade.FadeTextOut");
        assert_eq!(VisualState::OpenSubtitle.path(), "Base Layer.OpenSubtitle");
        assert_eq!(VisualState::CloseSubtitle.path(), "Base Layer.CloseSubtitle");
    }

    #[test]
    fn test_timing_constants() {
        assert_eq!(SETTLE_DELAY, 0.5);
        assert!(TYPEWRITER_STEP < TYPEWRITER_MAX_STEP);
    }
}
