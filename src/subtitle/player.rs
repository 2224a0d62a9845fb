//! Line playback state machine
//!
//! A run walks the line store one line at a time. Every step after `start`
//! happens in a deferred callback: the player schedules itself on its own
//! `Scheduler` and the host pumps it with `update` once per frame.
//!
//! Each run owns a `RunToken`. Starting a new run or resetting retires the
//! token, which drops every callback the old run still had queued. The
//! callbacks still re-check the line index, since the store can be edited
//! from outside while a run is in flight.

use rand::Rng;

use crate::config::{validate_lines, FadeMode, PlaybackConfig};
use crate::time::{RunToken, Scheduler};
use crate::{log_debug, log_warning};

use super::host::Collaborators;
use super::line::LineStore;
use super::state::{PlaybackPhase, PlaybackState};
use super::timing::{fade_out_for_delay, normalize_display_lengths, reveal_cadence, FadeOut, RevealStep};
use super::types::{
    AudioHandle, SubtitleResult, VisualState, BROKEN_STATE_MESSAGE, SETTLE_DELAY,
    SPEED_MULTIPLIER_PARAM,
};

/// Frames after construction within which the one-shot start-up pass runs
const DELAYED_START_FRAMES: std::ops::Range<u32> = 1..10;

/// Deferred entry points of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCallback {
    /// One-shot pass over line timings after construction
    DelayedStart,
    /// Play effects for the current line and pick the next transition
    PlayLineLoop,
    /// Fade the current line out before advancing
    LineDelay,
    /// Advance to the next line
    PlayNextLine,
    /// Halt after a pause-after-line line
    Pause,
    /// Close out the run
    Finish,
    /// Reveal one more character of the given line
    ShowNextCharacter(usize),
}

/// Plays a line store through the host collaborators
#[derive(Debug)]
pub struct SubtitlePlayer {
    lines: LineStore,
    config: PlaybackConfig,
    host: Collaborators,
    state: PlaybackState,
    scheduler: Scheduler<PlayerCallback>,
    run: RunToken,
    /// Character count of the text currently on screen
    displayed_chars: usize,
}

impl SubtitlePlayer {
    /// Create a player; the start-up pass lands 1 to 9 frames later
    pub fn new(lines: LineStore, config: PlaybackConfig, host: Collaborators) -> SubtitleResult<Self> {
        Self::with_rng(lines, config, host, &mut rand::thread_rng())
    }

    /// Create a player drawing the start-up frame offset from `rng`
    pub fn with_rng<R: Rng + ?Sized>(
        lines: LineStore,
        config: PlaybackConfig,
        host: Collaborators,
        rng: &mut R,
    ) -> SubtitleResult<Self> {
        validate_lines(&lines)?;

        let mut player = Self {
            lines,
            config,
            host,
            state: PlaybackState::new(),
            scheduler: Scheduler::new(),
            run: RunToken::default(),
            displayed_chars: 0,
        };

        player.host.text.set_text("");
        let frames = rng.gen_range(DELAYED_START_FRAMES);
        player
            .scheduler
            .send_delayed_frames(PlayerCallback::DelayedStart, frames, None);

        log_debug!(
            "Subtitle player created with {} lines, start-up pass in {} frames",
            player.lines.len(),
            frames
        );
        Ok(player)
    }

    // External entry points

    /// Start playback, or resume after a pause on the following line.
    ///
    /// Does nothing while a run is in progress. An out-of-range line index
    /// (an empty store, or a store cut short under a paused run) is logged
    /// and leaves the state untouched until `reset_subtitles`.
    pub fn start_playing_lines(&mut self) {
        if self.state.is_playing() {
            return;
        }

        let target = if self.state.is_paused() {
            self.state.current_line + 1
        } else {
            0
        };
        if target >= self.lines.len() {
            log_warning!("{}", BROKEN_STATE_MESSAGE);
            return;
        }

        self.retire_run();
        self.set_audio_enabled(true);

        self.state.phase = PlaybackPhase::Playing;
        self.state.current_line = target;

        self.host.animator.cross_fade(VisualState::FadeEmpty, 0.0);
        match self.config.fade_mode {
            FadeMode::None => self.host.text.set_max_visible_characters(None),
            FadeMode::Typewriter => {
                self.state.characters_shown = 0;
                self.host.text.set_max_visible_characters(Some(0));
            }
        }

        // Show the line now so it does not flicker in with the open animation
        self.show_current_text();
        self.host.animator.cross_fade(VisualState::OpenSubtitle, 0.0);

        log_debug!("Starting subtitles at line {}", target);
        self.send_delayed_seconds(PlayerCallback::PlayLineLoop, SETTLE_DELAY);
    }

    /// Stop everything and return to the initial state
    pub fn reset_subtitles(&mut self) {
        self.set_audio_enabled(false);
        self.retire_run();

        self.state.reset();
        self.displayed_chars = 0;
        self.host.text.set_text("");

        self.host.animator.set_float(SPEED_MULTIPLIER_PARAM, 1.0);
        self.host.animator.cross_fade(VisualState::FadeEmpty, 0.0);
        self.host.animator.cross_fade(VisualState::CloseSubtitle, 0.0);
    }

    /// Replace a line's text
    pub fn change_line(&mut self, index: usize, text: &str) -> SubtitleResult<()> {
        self.lines.set_line_text(index, text)
    }

    /// Alias of `start_playing_lines`
    pub fn start(&mut self) {
        self.start_playing_lines();
    }

    /// Alias of `reset_subtitles`
    pub fn reset(&mut self) {
        self.reset_subtitles();
    }

    /// Advance one host frame and run whatever came due
    pub fn update(&mut self, delta_seconds: f32) {
        for entry in self.scheduler.advance(delta_seconds) {
            if let Some(run) = entry.run {
                if run != self.run {
                    log_debug!("Dropping {:?} from retired run", entry.callback);
                    continue;
                }
            }
            self.dispatch(entry.callback);
        }
    }

    // Accessors

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn lines(&self) -> &LineStore {
        &self.lines
    }

    /// Mutable access to the lines, for edits between runs
    pub fn lines_mut(&mut self) -> &mut LineStore {
        &mut self.lines
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Number of callbacks waiting to fire
    pub fn pending_callbacks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Seconds since the player was created, as seen by `update`
    pub fn elapsed(&self) -> f64 {
        self.scheduler.clock().elapsed()
    }

    // Deferred callbacks

    fn dispatch(&mut self, callback: PlayerCallback) {
        match callback {
            PlayerCallback::DelayedStart => self.delayed_start(),
            PlayerCallback::PlayLineLoop => self.play_line_loop(),
            PlayerCallback::LineDelay => self.line_delay(),
            PlayerCallback::PlayNextLine => self.play_next_line(),
            PlayerCallback::Pause => self.pause_lines(),
            PlayerCallback::Finish => self.finish_playing_lines(),
            PlayerCallback::ShowNextCharacter(line) => self.show_next_character(line),
        }
    }

    fn delayed_start(&mut self) {
        if self.config.typewriter_consistent_speed {
            normalize_display_lengths(&mut self.lines);
        }
    }

    fn play_line_loop(&mut self) {
        let index = self.state.current_line;
        let Some(line) = self.lines.get(index) else {
            log_warning!("{}", BROKEN_STATE_MESSAGE);
            return;
        };
        let audio = line.audio;
        let display_length = line.display_length;
        let pause_after = line.pause_after_line;

        if let Some(clip) = audio {
            self.play_clip(&clip);
        }

        if self.state.pending_fade_in {
            self.host.animator.cross_fade(VisualState::FadeTextIn, 0.0);
        }
        self.state.pending_fade_in = false;
        self.state.phase = PlaybackPhase::Playing;

        let typewriter = self.config.fade_mode == FadeMode::Typewriter;
        if typewriter {
            self.state.characters_shown = 0;
            self.host.text.set_max_visible_characters(Some(0));
        }
        self.show_current_text();
        if typewriter {
            self.show_next_character(index);
        }

        let count = self.lines.len();
        if count == 1 {
            self.send_delayed_seconds(PlayerCallback::Finish, display_length);
        } else if index + 2 <= count {
            let next = if pause_after {
                PlayerCallback::Pause
            } else {
                PlayerCallback::LineDelay
            };
            self.send_delayed_seconds(next, display_length);
        } else {
            self.host.animator.cross_fade(VisualState::FadeEmpty, 0.0);
            self.send_delayed_seconds(PlayerCallback::Finish, display_length);
        }
    }

    fn line_delay(&mut self) {
        if self.state.phase != PlaybackPhase::Playing {
            log_debug!("Skipping line delay, playback is {:?}", self.state.phase);
            return;
        }

        let Some(line) = self.lines.get(self.state.current_line) else {
            log_warning!("{}", BROKEN_STATE_MESSAGE);
            return;
        };
        let delay = line.post_line_delay;

        self.state.pending_fade_in = true;
        self.state.phase = PlaybackPhase::Delaying;

        match fade_out_for_delay(delay) {
            FadeOut::Animate(speed) => {
                self.host.animator.set_float(SPEED_MULTIPLIER_PARAM, speed);
                self.host.animator.cross_fade(VisualState::FadeTextOut, 0.0);
            }
            FadeOut::Blank => {
                self.host.text.set_text("");
                self.displayed_chars = 0;
            }
        }

        self.send_delayed_seconds(PlayerCallback::PlayNextLine, delay);
    }

    fn play_next_line(&mut self) {
        let next = self.state.current_line + 1;
        if next >= self.lines.len() {
            log_warning!("{}", BROKEN_STATE_MESSAGE);
            return;
        }

        self.state.current_line = next;
        self.play_line_loop();
    }

    fn pause_lines(&mut self) {
        if self.state.current_line >= self.lines.len() {
            log_warning!("{}", BROKEN_STATE_MESSAGE);
            return;
        }

        self.set_audio_enabled(false);
        self.state.phase = PlaybackPhase::Paused;

        if let Some(listener) = self.host.listener.as_mut() {
            listener.send_event(&self.config.pause_event_name);
        }

        self.host.animator.set_float(SPEED_MULTIPLIER_PARAM, 1.0);
        self.host.animator.cross_fade(VisualState::FadeEmpty, 0.0);
        self.host.animator.cross_fade(VisualState::CloseSubtitle, 0.0);
    }

    fn finish_playing_lines(&mut self) {
        if self.state.current_line >= self.lines.len() {
            log_warning!("{}", BROKEN_STATE_MESSAGE);
            return;
        }

        self.set_audio_enabled(false);
        self.state.phase = PlaybackPhase::Finished;

        if let Some(listener) = self.host.listener.as_mut() {
            listener.send_event(&self.config.end_event_name);
        }

        self.host.animator.cross_fade(VisualState::CloseSubtitle, 0.0);
    }

    fn show_next_character(&mut self, line_index: usize) {
        // A newer line restarted the reveal
        if line_index != self.state.current_line {
            return;
        }

        let Some(line) = self.lines.get(line_index) else {
            log_warning!("{}", BROKEN_STATE_MESSAGE);
            return;
        };
        let display_length = line.display_length;

        if self.state.characters_shown > self.displayed_chars {
            return;
        }

        self.state.characters_shown += 1;
        self.host
            .text
            .set_max_visible_characters(Some(self.state.characters_shown));

        let callback = PlayerCallback::ShowNextCharacter(line_index);
        match reveal_cadence(
            display_length,
            self.displayed_chars,
            self.config.typewriter_consistent_speed,
        ) {
            RevealStep::Seconds(seconds) => self.send_delayed_seconds(callback, seconds),
            RevealStep::NextFrame => self.send_delayed_frames(callback, 1),
        }
    }

    // Helpers

    fn show_current_text(&mut self) {
        let Some(line) = self.lines.get(self.state.current_line) else {
            return;
        };
        let text = if line.needs_player_name() {
            line.render(&self.host.identity.display_name())
        } else {
            line.text.clone()
        };

        self.displayed_chars = text.chars().count();
        self.host.text.set_text(&text);
    }

    fn play_clip(&mut self, clip: &AudioHandle) {
        match self.host.audio.as_mut() {
            Some(audio) => audio.play_one_shot(clip),
            None => log_warning!("Audio source not assigned!"),
        }
    }

    /// Toggle the audio source when it follows playback
    fn set_audio_enabled(&mut self, enabled: bool) {
        if !self.config.audio_auto_disable {
            return;
        }
        if let Some(audio) = self.host.audio.as_mut() {
            audio.set_enabled(enabled);
        }
    }

    fn retire_run(&mut self) {
        let dropped = self.scheduler.cancel_run(self.run);
        if dropped > 0 {
            log_debug!("Cancelled {} callbacks from run {}", dropped, self.run.generation());
        }
        self.run = self.run.next();
    }

    fn send_delayed_seconds(&mut self, callback: PlayerCallback, seconds: f32) {
        self.scheduler
            .send_delayed_seconds(callback, seconds, Some(self.run));
    }

    fn send_delayed_frames(&mut self, callback: PlayerCallback, frames: u32) {
        self.scheduler
            .send_delayed_frames(callback, frames, Some(self.run));
    }
}
