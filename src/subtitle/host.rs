//! Host engine collaborators
//!
//! The player never renders, animates or plays audio itself. It drives
//! these traits, which the host implements on top of its own text, animator
//! and audio components.

use super::types::{AudioHandle, VisualState};

/// Text component showing the current line
pub trait TextRenderer: Send {
    /// Replace the whole text content
    fn set_text(&mut self, text: &str);

    /// Cap how many characters are visible (None shows everything)
    fn set_max_visible_characters(&mut self, cap: Option<usize>);
}

/// Animator driving the subtitle panel and text fades
pub trait Animator: Send {
    /// Cross-fade into a state over `blend_seconds`
    fn cross_fade(&mut self, state: VisualState, blend_seconds: f32);

    /// Set a float parameter
    fn set_float(&mut self, name: &str, value: f32);
}

/// Audio source used for voice-over
pub trait AudioOutput: Send {
    /// Enable or disable the source
    fn set_enabled(&mut self, enabled: bool);

    /// Play a clip once on top of whatever is playing
    fn play_one_shot(&mut self, clip: &AudioHandle);
}

/// Optional receiver of pause/end notifications
pub trait EventListener: Send {
    /// Receive a named event with no payload
    fn send_event(&mut self, name: &str);
}

/// Supplies the local user's display name
pub trait IdentityProvider: Send {
    fn display_name(&self) -> String;
}

/// Identity with a fixed name
#[derive(Debug, Clone, Default)]
pub struct FixedIdentity(pub String);

impl FixedIdentity {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl IdentityProvider for FixedIdentity {
    fn display_name(&self) -> String {
        self.0.clone()
    }
}

/// Everything the player talks to.
///
/// Text, animator and identity are required. Audio and the listener are
/// optional; a line with audio but no output logs a warning and plays
/// silently.
pub struct Collaborators {
    pub text: Box<dyn TextRenderer>,
    pub animator: Box<dyn Animator>,
    pub audio: Option<Box<dyn AudioOutput>>,
    pub listener: Option<Box<dyn EventListener>>,
    pub identity: Box<dyn IdentityProvider>,
}

impl Collaborators {
    /// Create with the required collaborators only
    pub fn new(
        text: Box<dyn TextRenderer>,
        animator: Box<dyn Animator>,
        identity: Box<dyn IdentityProvider>,
    ) -> Self {
        Self {
            text,
            animator,
            audio: None,
            listener: None,
            identity,
        }
    }

    /// Attach an audio output
    pub fn with_audio(mut self, audio: Box<dyn AudioOutput>) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Attach an event listener
    pub fn with_listener(mut self, listener: Box<dyn EventListener>) -> Self {
        self.listener = Some(listener);
        self
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("audio", &self.audio.is_some())
            .field("listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}
