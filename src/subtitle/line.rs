//! Subtitle lines and the ordered line store
//!
//! Lines are addressed by position; the order is playback order.

use super::types::{AudioHandle, SubtitleError, SubtitleResult, PLAYER_NAME_TOKEN};

/// One subtitle line with its timing and optional voice-over
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubtitleLine {
    /// Line text, may contain `{PlayerName}`
    pub text: String,
    /// Clip played once when the line starts
    pub audio: Option<AudioHandle>,
    /// Seconds the line stays up before advancing
    pub display_length: f32,
    /// Seconds of fade gap after the line (ignored when pausing)
    pub post_line_delay: f32,
    /// Halt after this line until playback is started again
    pub pause_after_line: bool,
}

impl SubtitleLine {
    /// Create a new line
    pub fn new(text: &str, display_length: f32) -> Self {
        Self {
            text: text.to_string(),
            display_length,
            ..Default::default()
        }
    }

    /// Set the post-line delay
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.post_line_delay = delay;
        self
    }

    /// Pause playback after this line
    pub fn with_pause(mut self) -> Self {
        self.pause_after_line = true;
        self
    }

    /// Attach a voice-over clip
    pub fn with_audio(mut self, audio: AudioHandle) -> Self {
        self.set_audio(Some(audio));
        self
    }

    /// Attach or clear the voice-over clip.
    ///
    /// A clip with a known length drives the display length; clearing the
    /// clip zeroes it.
    pub fn set_audio(&mut self, audio: Option<AudioHandle>) {
        match audio {
            Some(handle) => {
                if let Some(length) = handle.length {
                    self.display_length = length;
                }
            }
            None => self.display_length = 0.0,
        }
        self.audio = audio;
    }

    /// Number of characters in the raw text
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Text as shown to the local user
    pub fn render(&self, player_name: &str) -> String {
        self.text.replace(PLAYER_NAME_TOKEN, player_name)
    }

    /// Whether the text needs the local user's name
    pub fn needs_player_name(&self) -> bool {
        self.text.contains(PLAYER_NAME_TOKEN)
    }
}

/// Ordered store of subtitle lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineStore {
    lines: Vec<SubtitleLine>,
}

impl LineStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a store from parallel per-attribute arrays.
    ///
    /// Arrays of mismatched length are cut to the shortest one.
    pub fn from_parallel(
        texts: &[String],
        audio: &[Option<AudioHandle>],
        display_lengths: &[f32],
        delays: &[f32],
        pauses: &[bool],
    ) -> Self {
        let count = texts
            .len()
            .min(audio.len())
            .min(display_lengths.len())
            .min(delays.len())
            .min(pauses.len());

        let lines = (0..count)
            .map(|i| SubtitleLine {
                text: texts[i].clone(),
                audio: audio[i],
                display_length: display_lengths[i],
                post_line_delay: delays[i],
                pause_after_line: pauses[i],
            })
            .collect();

        Self { lines }
    }

    /// Split the store back into parallel arrays
    #[allow(clippy::type_complexity)]
    pub fn into_parallel(
        self,
    ) -> (
        Vec<String>,
        Vec<Option<AudioHandle>>,
        Vec<f32>,
        Vec<f32>,
        Vec<bool>,
    ) {
        let mut texts = Vec::with_capacity(self.lines.len());
        let mut audio = Vec::with_capacity(self.lines.len());
        let mut lengths = Vec::with_capacity(self.lines.len());
        let mut delays = Vec::with_capacity(self.lines.len());
        let mut pauses = Vec::with_capacity(self.lines.len());

        for line in self.lines {
            texts.push(line.text);
            audio.push(line.audio);
            lengths.push(line.display_length);
            delays.push(line.post_line_delay);
            pauses.push(line.pause_after_line);
        }

        (texts, audio, lengths, delays, pauses)
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the store has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get a line
    pub fn get(&self, index: usize) -> Option<&SubtitleLine> {
        self.lines.get(index)
    }

    /// Get a mutable line
    pub fn get_mut(&mut self, index: usize) -> Option<&mut SubtitleLine> {
        self.lines.get_mut(index)
    }

    fn line_mut(&mut self, index: usize) -> SubtitleResult<&mut SubtitleLine> {
        let len = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or(SubtitleError::IndexOutOfRange { index, len })
    }

    /// Replace a line's text in place
    pub fn set_line_text(&mut self, index: usize, text: &str) -> SubtitleResult<()> {
        self.line_mut(index)?.text = text.to_string();
        Ok(())
    }

    /// Attach or clear a line's clip
    pub fn set_audio(&mut self, index: usize, audio: Option<AudioHandle>) -> SubtitleResult<()> {
        self.line_mut(index)?.set_audio(audio);
        Ok(())
    }

    /// Set how long a line stays up
    pub fn set_display_length(&mut self, index: usize, seconds: f32) -> SubtitleResult<()> {
        self.line_mut(index)?.display_length = seconds;
        Ok(())
    }

    /// Set the gap after a line
    pub fn set_post_line_delay(&mut self, index: usize, seconds: f32) -> SubtitleResult<()> {
        self.line_mut(index)?.post_line_delay = seconds;
        Ok(())
    }

    /// Set whether playback pauses after a line
    pub fn set_pause_after_line(&mut self, index: usize, pause: bool) -> SubtitleResult<()> {
        self.line_mut(index)?.pause_after_line = pause;
        Ok(())
    }

    /// Append a line
    pub fn push(&mut self, line: SubtitleLine) {
        self.lines.push(line);
    }

    /// Insert a line before `index` (`index == len` appends)
    pub fn insert(&mut self, index: usize, line: SubtitleLine) -> SubtitleResult<()> {
        if index > self.lines.len() {
            return Err(SubtitleError::IndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        self.lines.insert(index, line);
        Ok(())
    }

    /// Remove and return a line
    pub fn remove(&mut self, index: usize) -> SubtitleResult<SubtitleLine> {
        if index >= self.lines.len() {
            return Err(SubtitleError::IndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(index))
    }

    /// Move a line up (negative `delta`) or down.
    ///
    /// Returns false and leaves the store untouched when the target slot
    /// does not exist.
    pub fn move_line(&mut self, index: usize, delta: isize) -> bool {
        let Some(target) = index.checked_add_signed(delta) else {
            return false;
        };
        if index >= self.lines.len() || target >= self.lines.len() {
            return false;
        }

        let line = self.lines.remove(index);
        self.lines.insert(target, line);
        true
    }

    /// Drop every line from `len` onwards
    pub fn truncate(&mut self, len: usize) {
        self.lines.truncate(len);
    }

    /// Remove all lines
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Iterate over the lines in playback order
    pub fn iter(&self) -> impl Iterator<Item = &SubtitleLine> {
        self.lines.iter()
    }

    /// Iterate mutably over the lines
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SubtitleLine> {
        self.lines.iter_mut()
    }

    /// Time to play every line back to back, pauses aside
    pub fn total_duration(&self) -> f32 {
        let last = self.lines.len().saturating_sub(1);
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                if i < last && !line.pause_after_line {
                    line.display_length + line.post_line_delay
                } else {
                    line.display_length
                }
            })
            .sum()
    }
}

impl FromIterator<SubtitleLine> for LineStore {
    fn from_iter<I: IntoIterator<Item = SubtitleLine>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<SubtitleLine>> for LineStore {
    fn from(lines: Vec<SubtitleLine>) -> Self {
        Self { lines }
    }
}
