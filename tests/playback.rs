use frameflow_core::animation::{MAX_FRAME_INTERVAL, MIN_FRAME_INTERVAL};
use frameflow_core::{EditorContext, Playback};
use std::time::Duration;

fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

fn editor_with_frames(count: usize) -> EditorContext {
    let mut editor = EditorContext::default();
    for _ in 1..count {
        editor.append_frame();
    }
    editor
}

#[test]
fn test_playback_needs_two_frames() {
    let mut playback = Playback::new(0.1);
    assert!(!playback.start(1, 0));
    assert!(!playback.is_playing());
    assert!(playback.start(2, 0));
    assert!(!playback.start(2, 0));
}

#[test]
fn test_tick_advances_one_frame_per_interval_and_wraps() {
    let mut playback = Playback::new(0.1);
    let mut cursor = 3;
    playback.start(5, cursor);

    assert_eq!(playback.tick(millis(50), 5, &mut cursor), 0);
    assert_eq!(cursor, 3);
    assert_eq!(playback.tick(millis(50), 5, &mut cursor), 1);
    assert_eq!(cursor, 4);
    assert_eq!(playback.tick(millis(250), 5, &mut cursor), 2);
    assert_eq!(cursor, 1);
    assert_eq!(playback.cursor_before_playback(), Some(3));
}

#[test]
fn test_tick_while_stopped_does_nothing() {
    let mut playback = Playback::default();
    let mut cursor = 0;
    assert_eq!(playback.tick(millis(1000), 5, &mut cursor), 0);
    assert_eq!(cursor, 0);
    assert!(playback.time_until_next_frame().is_none());
}

#[test]
fn test_interval_is_clamped() {
    assert_eq!(Playback::new(0.0).interval(), Duration::from_secs_f64(MIN_FRAME_INTERVAL));
    assert_eq!(Playback::new(5.0).interval(), Duration::from_secs_f64(MAX_FRAME_INTERVAL));
    assert_eq!(Playback::new(f64::NAN).interval(), Duration::from_secs_f64(MIN_FRAME_INTERVAL));
}

#[test]
fn test_stop_lands_on_last_frame_wherever_playback_was() {
    for ticks in 0..12 {
        let mut editor = editor_with_frames(5);
        editor.set_frame_interval(0.1);
        editor.switch_to_frame(1);
        assert!(editor.play());

        for _ in 0..ticks {
            editor.tick(millis(100));
        }
        assert!(editor.stop());
        assert_eq!(editor.cursor().current, 4, "after {ticks} ticks");
        assert!(!editor.is_playing());
    }
}

#[test]
fn test_stop_while_stopped_is_a_no_op() {
    let mut editor = editor_with_frames(3);
    editor.switch_to_frame(0);
    assert!(!editor.stop());
    assert_eq!(editor.cursor().current, 0);
}

#[test]
fn test_playback_does_not_record_history() {
    let mut editor = editor_with_frames(4);
    let undo_len = editor.document().history().undo_len();

    editor.play();
    editor.tick(millis(350));
    editor.stop();

    assert_eq!(editor.document().history().undo_len(), undo_len);
}

#[test]
fn test_single_frame_play_is_refused() {
    let mut editor = EditorContext::default();
    assert!(!editor.play());
    assert_eq!(editor.tick(millis(500)), 0);
}

#[test]
fn test_huge_gap_advances_without_overflow() {
    let mut playback = Playback::new(0.1);
    let mut cursor = 0;
    playback.start(3, cursor);

    assert_eq!(playback.tick(millis(50), 3, &mut cursor), 0);
    let advanced = playback.tick(Duration::MAX, 3, &mut cursor);
    assert!(advanced > 0);
    assert!(cursor < 3);
    assert!(playback.time_until_next_frame().unwrap() <= millis(100));

    // Still ticking normally afterwards.
    let before = cursor;
    playback.tick(millis(100), 3, &mut cursor);
    assert_eq!(cursor, (before + 1) % 3);
}

#[test]
fn test_long_gap_lands_on_the_same_frame_as_stepping() {
    let mut stepped = Playback::new(0.1);
    let mut jumped = Playback::new(0.1);
    let (mut a, mut b) = (1, 1);
    stepped.start(7, a);
    jumped.start(7, b);

    for _ in 0..1234 {
        stepped.tick(millis(100), 7, &mut a);
    }
    assert_eq!(jumped.tick(millis(123_400), 7, &mut b), 1234);
    assert_eq!(a, b);
}
