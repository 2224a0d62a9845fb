//! Playback state

/// Where a player is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    /// Nothing started, or reset
    #[default]
    Idle,
    /// A line is up
    Playing,
    /// Between lines, waiting out the post-line delay
    Delaying,
    /// Halted after a pause-after-line line, waiting for start
    Paused,
    /// Last line done
    Finished,
}

/// State of one player's run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    pub phase: PlaybackPhase,
    /// The previous line faded out and the next one has to fade in
    pub pending_fade_in: bool,
    pub current_line: usize,
    /// Characters revealed so far by the typewriter
    pub characters_shown: usize,
}

impl PlaybackState {
    /// Initial state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a run is in progress (showing a line or between lines)
    pub fn is_playing(&self) -> bool {
        matches!(self.phase, PlaybackPhase::Playing | PlaybackPhase::Delaying)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == PlaybackPhase::Paused
    }

    /// Whether the next line owes a fade-in
    pub fn is_delayed(&self) -> bool {
        self.pending_fade_in
    }

    pub fn is_finished(&self) -> bool {
        self.phase == PlaybackPhase::Finished
    }

    /// Back to the initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_new() {
        let state = PlaybackState::new();
        assert_eq!(state.phase, PlaybackPhase::Idle);
        assert!(!state.is_playing());
        assert!(!state.is_paused());
        assert!(!state.is_delayed());
        assert_eq!(state.current_line, 0);
        assert_eq!(state.characters_shown, 0);
    }

    #[test]
    fn test_is_playing_covers_delay() {
        let mut state = PlaybackState::new();
        state.phase = PlaybackPhase::Playing;
        assert!(state.is_playing());
        state.phase = PlaybackPhase::Delaying;
        assert!(state.is_playing());
        state.phase = PlaybackPhase::Paused;
        assert!(!state.is_playing());
        assert!(state.is_paused());
    }

    #[test]
    fn test_reset() {
        let mut state = PlaybackState {
            phase: PlaybackPhase::Finished,
            pending_fade_in: true,
            current_line: 4,
            characters_shown: 12,
        };
        assert!(state.is_finished());
        state.reset();
        assert_eq!(state, PlaybackState::new());
    }
}
