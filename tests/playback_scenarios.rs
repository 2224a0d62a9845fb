//! Playback scenario tests
//!
//! These drive a player frame by frame through full runs and check what
//! the host collaborators were asked to do.

use rand::rngs::StdRng;
use rand::SeedableRng;

use subtitle_system::subtitle::{Effect, VisualState};
use subtitle_system::{
    EffectLog, FadeMode, LineStore, PlaybackConfig, PlaybackPhase, PlaybackState, SubtitleLine,
    SubtitlePlayer,
};

const FRAME: f32 = 0.01;

fn make_player(lines: Vec<SubtitleLine>, config: PlaybackConfig) -> (SubtitlePlayer, EffectLog) {
    let log = EffectLog::new();
    let mut rng = StdRng::seed_from_u64(42);
    let player = SubtitlePlayer::with_rng(
        LineStore::from(lines),
        config,
        log.collaborators("Ava"),
        &mut rng,
    )
    .expect("valid lines");
    (player, log)
}

fn run_for(player: &mut SubtitlePlayer, seconds: f32) {
    let frames = (seconds / FRAME).round() as usize;
    for _ in 0..frames {
        player.update(FRAME);
    }
}

/// Three lines of one second with 0.2s gaps, pausing after the middle one
fn pausing_lines() -> Vec<SubtitleLine> {
    vec![
        SubtitleLine::new("Line zero", 1.0).with_delay(0.2),
        SubtitleLine::new("Line one", 1.0).with_delay(0.2).with_pause(),
        SubtitleLine::new("Line two", 1.0).with_delay(0.2),
    ]
}

#[test]
fn test_single_line_finishes_after_settle_and_length() {
    let (mut player, log) = make_player(
        vec![SubtitleLine::new("Only line", 2.0)],
        PlaybackConfig::default(),
    );

    player.start_playing_lines();
    assert_eq!(log.text(), "Only line");
    assert_eq!(player.state().phase, PlaybackPhase::Playing);

    // 0.5s settle + 2.0s display
    run_for(&mut player, 2.4);
    assert!(player.state().is_playing());
    assert!(log.events().is_empty());

    run_for(&mut player, 0.2);
    assert_eq!(player.state().phase, PlaybackPhase::Finished);
    assert!(!player.state().is_playing());
    assert_eq!(log.events(), vec!["FinishedSubtitles"]);
    assert_eq!(log.visual_states().last(), Some(&VisualState::CloseSubtitle));
    assert!(!log.audio_enabled());
}

#[test]
fn test_pause_after_line_then_resume() {
    let (mut player, log) = make_player(pausing_lines(), PlaybackConfig::default());
    player.start_playing_lines();

    // settle 0.5 + line 0 for 1.0 + gap 0.2
    run_for(&mut player, 1.8);
    assert_eq!(player.state().current_line, 1);
    assert_eq!(player.state().phase, PlaybackPhase::Playing);
    assert_eq!(log.text(), "Line one");

    // line 1 for 1.0, then pause with no gap
    run_for(&mut player, 1.0);
    assert_eq!(player.state().phase, PlaybackPhase::Paused);
    assert_eq!(player.state().current_line, 1);
    assert_eq!(log.events(), vec!["PausedSubtitles"]);
    assert!(!player.state().is_delayed());

    // No auto-advance while paused
    run_for(&mut player, 3.0);
    assert_eq!(player.state().phase, PlaybackPhase::Paused);
    assert_eq!(player.state().current_line, 1);

    player.start_playing_lines();
    assert_eq!(player.state().current_line, 2);
    assert_eq!(log.text(), "Line two");

    run_for(&mut player, 1.4);
    assert!(player.state().is_playing());
    run_for(&mut player, 0.2);
    assert_eq!(player.state().phase, PlaybackPhase::Finished);
    assert_eq!(log.events(), vec!["PausedSubtitles", "FinishedSubtitles"]);
}

#[test]
fn test_changed_line_renders_player_name() {
    let (mut player, log) = make_player(
        vec![
            SubtitleLine::new("Welcome", 1.0).with_delay(0.2),
            SubtitleLine::new("placeholder", 1.0),
        ],
        PlaybackConfig::default(),
    );
    player.change_line(1, "Hello {PlayerName}").unwrap();

    player.start_playing_lines();
    run_for(&mut player, 1.8);

    assert_eq!(player.state().current_line, 1);
    assert_eq!(log.text(), "Hello Ava");
}

#[test]
fn test_truncated_store_freezes_state() {
    let (mut player, _log) = make_player(
        vec![
            SubtitleLine::new("a", 1.0).with_delay(0.2),
            SubtitleLine::new("b", 1.0).with_delay(0.2),
            SubtitleLine::new("c", 1.0),
        ],
        PlaybackConfig::default(),
    );
    player.start_playing_lines();
    run_for(&mut player, 1.8);
    assert_eq!(player.state().current_line, 1);

    player.lines_mut().truncate(1);
    let frozen = *player.state();

    run_for(&mut player, 5.0);
    assert_eq!(*player.state(), frozen);
}

#[test]
fn test_resume_after_truncation_needs_reset() {
    let (mut player, log) = make_player(pausing_lines(), PlaybackConfig::default());
    player.start_playing_lines();
    run_for(&mut player, 2.8);
    assert!(player.state().is_paused());

    player.lines_mut().truncate(2);
    log.clear();
    let frozen = *player.state();

    player.start_playing_lines();
    assert_eq!(*player.state(), frozen);
    assert!(log.effects().is_empty());

    player.reset_subtitles();
    player.start_playing_lines();
    assert_eq!(player.state().current_line, 0);
    assert!(player.state().is_playing());
}

#[test]
fn test_start_then_reset_restores_initial_state() {
    let (mut player, log) = make_player(pausing_lines(), PlaybackConfig::default());
    player.start_playing_lines();
    player.reset_subtitles();

    assert_eq!(*player.state(), PlaybackState::new());
    assert_eq!(log.text(), "");
    assert!(log
        .effects()
        .ends_with(&[
            Effect::CrossFade(VisualState::FadeEmpty, 0.0),
            Effect::CrossFade(VisualState::CloseSubtitle, 0.0),
        ]));
}

#[test]
fn test_reset_mid_delay_drops_stale_callbacks() {
    let (mut player, log) = make_player(pausing_lines(), PlaybackConfig::default());
    player.start_playing_lines();
    run_for(&mut player, 1.6);
    assert_eq!(player.state().phase, PlaybackPhase::Delaying);

    player.reset_subtitles();
    player.start_playing_lines();
    log.clear();

    // The old run's advance would have landed here; only the new run moves
    run_for(&mut player, 0.3);
    assert_eq!(player.state().current_line, 0);
    assert_eq!(player.state().phase, PlaybackPhase::Playing);
    assert!(log.effects().is_empty());
}

#[test]
fn test_restart_after_finish_begins_at_first_line() {
    let (mut player, log) = make_player(
        vec![SubtitleLine::new("a", 0.5).with_delay(0.1), SubtitleLine::new("b", 0.5)],
        PlaybackConfig::default(),
    );
    player.start_playing_lines();
    run_for(&mut player, 2.0);
    assert!(player.state().is_finished());

    player.start_playing_lines();
    assert_eq!(player.state().current_line, 0);
    assert_eq!(log.text(), "a");
}

#[test]
fn test_last_line_fades_to_empty_before_finish() {
    let (mut player, log) = make_player(
        vec![SubtitleLine::new("a", 1.0).with_delay(1.5), SubtitleLine::new("b", 1.0)],
        PlaybackConfig::default(),
    );
    player.start_playing_lines();
    run_for(&mut player, 1.6);
    assert!(log
        .effects()
        .contains(&Effect::SetFloat("SpeedMultiplier".to_string(), 1.0)));

    run_for(&mut player, 1.5);
    assert_eq!(player.state().current_line, 1);
    assert_eq!(log.visual_states().last(), Some(&VisualState::FadeEmpty));

    run_for(&mut player, 1.0);
    assert!(player.state().is_finished());
}

#[test]
fn test_typewriter_resets_per_line_and_grows_monotonically() {
    let config = PlaybackConfig::default().with_fade_mode(FadeMode::Typewriter);
    let (mut player, _log) = make_player(
        vec![
            SubtitleLine::new("first line", 1.0).with_delay(0.3),
            SubtitleLine::new("second", 1.0).with_delay(0.3),
            SubtitleLine::new("third", 1.0),
        ],
        config,
    );
    player.start_playing_lines();

    let mut last_line = player.state().current_line;
    let mut last_shown = player.state().characters_shown;
    let mut lines_seen = 1;

    for _ in 0..500 {
        player.update(FRAME);
        let state = *player.state();
        if state.current_line == last_line {
            assert!(state.characters_shown >= last_shown);
        } else {
            // Line loop zeroes the count, then reveals the first character
            assert!(state.characters_shown <= 1);
            lines_seen += 1;
        }
        last_line = state.current_line;
        last_shown = state.characters_shown;
    }

    assert_eq!(lines_seen, 3);
    assert!(player.state().is_finished());
}

#[test]
fn test_audio_follows_playback() {
    let (mut player, log) = make_player(pausing_lines(), PlaybackConfig::default());
    player.start_playing_lines();
    assert!(log.audio_enabled());

    run_for(&mut player, 2.8);
    assert!(player.state().is_paused());
    assert!(!log.audio_enabled());

    player.start_playing_lines();
    assert!(log.audio_enabled());
}

#[test]
fn test_custom_event_names() {
    let config = PlaybackConfig::default().with_event_names("Halted", "Done");
    let (mut player, log) = make_player(pausing_lines(), config);
    player.start_playing_lines();
    run_for(&mut player, 2.8);
    player.start_playing_lines();
    run_for(&mut player, 2.0);

    assert_eq!(log.events(), vec!["Halted", "Done"]);
}

#[test]
fn test_subtitle_without_listener_still_finishes() {
    let log = EffectLog::new();
    let host = subtitle_system::Collaborators::new(
        Box::new(log.clone()),
        Box::new(log.clone()),
        Box::new(subtitle_system::subtitle::FixedIdentity::new("Ava")),
    );
    let mut player = SubtitlePlayer::new(
        LineStore::from(vec![SubtitleLine::new("solo", 0.5)]),
        PlaybackConfig::default(),
        host,
    )
    .unwrap();

    player.start_playing_lines();
    run_for(&mut player, 1.2);
    assert!(player.state().is_finished());
    assert!(log.events().is_empty());
}
