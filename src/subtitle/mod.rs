//! Subtitle playback
//!
//! Plays a sequence of subtitle lines with optional voice-over, fades and
//! typewriter reveal on top of host-provided text, animator and audio
//! components.
//!
//! # Architecture
//!
//! - `line` holds the ordered line store
//! - `player` is the playback state machine, driven by `update` each frame
//! - `timing` has the typewriter cadence and fade rules
//! - `host` defines the traits the host engine implements
//! - `recorder` implements those traits by recording every effect
//!
//! # Thread Safety
//!
//! A player is single-threaded: all of its callbacks run inside `update`
//! on the thread that owns it. Only the recorder's shared log is locked.

pub mod host;
pub mod line;
pub mod player;
pub mod recorder;
pub mod state;
pub mod timing;
pub mod types;

pub use host::{Animator, AudioOutput, Collaborators, EventListener, FixedIdentity, IdentityProvider, TextRenderer};
pub use line::{LineStore, SubtitleLine};
pub use player::{PlayerCallback, SubtitlePlayer};
pub use recorder::{Effect, EffectLog};
pub use state::{PlaybackPhase, PlaybackState};
pub use timing::{FadeOut, RevealStep};
pub use types::{AudioHandle, SubtitleError, SubtitleResult, VisualState};
