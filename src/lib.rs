// Subtitle playback library
// Line store, playback state machine and deferred scheduling for in-engine subtitles

pub mod config;
pub mod logging;
pub mod subtitle;
pub mod time;

pub use config::{FadeMode, PlaybackConfig};
pub use logging::LogLevel;
pub use subtitle::{
    AudioHandle, Collaborators, EffectLog, LineStore, PlaybackPhase, PlaybackState, SubtitleError,
    SubtitleLine, SubtitlePlayer, SubtitleResult,
};
