//! Timing rules for typewriter reveal and line fades

use super::line::LineStore;
use super::types::{MAX_FADE_SPEED, NORMALIZED_LENGTH_BUFFER, TYPEWRITER_MAX_STEP, TYPEWRITER_STEP};

/// When the next typewriter character should appear
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealStep {
    /// After this many seconds
    Seconds(f32),
    /// On the next frame
    NextFrame,
}

/// Cadence of the typewriter reveal for a line.
///
/// With consistent speed every character takes `TYPEWRITER_STEP`. Otherwise
/// the line's display length is spread over its characters, capped at
/// `TYPEWRITER_MAX_STEP`; anything at or under `TYPEWRITER_STEP` runs once
/// per frame instead of on a sub-frame timer.
pub fn reveal_cadence(display_length: f32, char_count: usize, consistent_speed: bool) -> RevealStep {
    if consistent_speed {
        return RevealStep::Seconds(TYPEWRITER_STEP);
    }

    let step = if char_count == 0 {
        TYPEWRITER_MAX_STEP
    } else {
        (display_length / char_count as f32).min(TYPEWRITER_MAX_STEP)
    };

    if step > TYPEWRITER_STEP {
        RevealStep::Seconds(step)
    } else {
        RevealStep::NextFrame
    }
}

/// Display length for a line under consistent typewriter speed
pub fn normalized_display_length(display_length: f32, char_count: usize) -> f32 {
    let mut length = display_length;
    if char_count > 0 && display_length / (char_count as f32) < TYPEWRITER_STEP {
        length = char_count as f32 * TYPEWRITER_STEP;
    }
    length + NORMALIZED_LENGTH_BUFFER
}

/// Apply `normalized_display_length` to every line in the store
pub fn normalize_display_lengths(lines: &mut LineStore) {
    for line in lines.iter_mut() {
        line.display_length = normalized_display_length(line.display_length, line.char_count());
    }
}

/// How a line fades out before its post-line delay
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeOut {
    /// Run the fade-out animation at this speed multiplier
    Animate(f32),
    /// No time to fade, blank the text at once
    Blank,
}

/// Fade-out for a post-line delay: 1x from one second up, faster towards
/// `MAX_FADE_SPEED` as the delay shrinks to zero.
pub fn fade_out_for_delay(delay: f32) -> FadeOut {
    if delay >= 1.0 {
        FadeOut::Animate(1.0)
    } else if delay > 0.0 {
        FadeOut::Animate(lerp(MAX_FADE_SPEED, 1.0, delay))
    } else {
        FadeOut::Blank
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    from + (to - from) * t
}
