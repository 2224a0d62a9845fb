//! Recording collaborators
//!
//! `EffectLog` implements every host trait and records what the player
//! asked for. Clones share one log, so a headless host or a test can hand
//! clones to the player and read the log back while playback runs.

use std::sync::Arc;

use parking_lot::Mutex;

use super::host::{Animator, AudioOutput, Collaborators, EventListener, FixedIdentity, TextRenderer};
use super::types::{AudioHandle, VisualState};

/// One side effect requested by the player
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Text(String),
    VisibleCharacters(Option<usize>),
    CrossFade(VisualState, f32),
    SetFloat(String, f32),
    AudioEnabled(bool),
    OneShot(AudioHandle),
    Event(String),
}

#[derive(Debug, Default)]
struct LogInner {
    effects: Vec<Effect>,
    text: String,
    visible: Option<usize>,
    audio_enabled: bool,
}

/// Shared, cloneable effect log
#[derive(Debug, Clone, Default)]
pub struct EffectLog {
    inner: Arc<Mutex<LogInner>>,
}

impl EffectLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Collaborators that all record into this log, with audio and a
    /// listener attached
    pub fn collaborators(&self, player_name: &str) -> Collaborators {
        Collaborators::new(
            Box::new(self.clone()),
            Box::new(self.clone()),
            Box::new(FixedIdentity::new(player_name)),
        )
        .with_audio(Box::new(self.clone()))
        .with_listener(Box::new(self.clone()))
    }

    fn record(&self, effect: Effect) {
        let mut inner = self.inner.lock();
        match &effect {
            Effect::Text(text) => inner.text = text.clone(),
            Effect::VisibleCharacters(cap) => inner.visible = *cap,
            Effect::AudioEnabled(enabled) => inner.audio_enabled = *enabled,
            _ => {}
        }
        inner.effects.push(effect);
    }

    /// Every effect so far, oldest first
    pub fn effects(&self) -> Vec<Effect> {
        self.inner.lock().effects.clone()
    }

    /// Forget recorded effects (current text and cap are kept)
    pub fn clear(&self) {
        self.inner.lock().effects.clear();
    }

    /// Text currently shown
    pub fn text(&self) -> String {
        self.inner.lock().text.clone()
    }

    /// Current visible-character cap
    pub fn visible_characters(&self) -> Option<usize> {
        self.inner.lock().visible
    }

    /// Whether the audio source is enabled
    pub fn audio_enabled(&self) -> bool {
        self.inner.lock().audio_enabled
    }

    /// Listener events received, oldest first
    pub fn events(&self) -> Vec<String> {
        self.inner
            .lock()
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::Event(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Visual states cross-faded into, oldest first
    pub fn visual_states(&self) -> Vec<VisualState> {
        self.inner
            .lock()
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::CrossFade(state, _) => Some(*state),
                _ => None,
            })
            .collect()
    }

    /// Clips played, oldest first
    pub fn clips_played(&self) -> Vec<AudioHandle> {
        self.inner
            .lock()
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::OneShot(clip) => Some(*clip),
                _ => None,
            })
            .collect()
    }
}

impl TextRenderer for EffectLog {
    fn set_text(&mut self, text: &str) {
        self.record(Effect::Text(text.to_string()));
    }

    fn set_max_visible_characters(&mut self, cap: Option<usize>) {
        self.record(Effect::VisibleCharacters(cap));
    }
}

impl Animator for EffectLog {
    fn cross_fade(&mut self, state: VisualState, blend_seconds: f32) {
        self.record(Effect::CrossFade(state, blend_seconds));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.record(Effect::SetFloat(name.to_string(), value));
    }
}

impl AudioOutput for EffectLog {
    fn set_enabled(&mut self, enabled: bool) {
        self.record(Effect::AudioEnabled(enabled));
    }

    fn play_one_shot(&mut self, clip: &AudioHandle) {
        self.record(Effect::OneShot(*clip));
    }
}

impl EventListener for EffectLog {
    fn send_event(&mut self, name: &str) {
        self.record(Effect::Event(name.to_string()));
    }
}
