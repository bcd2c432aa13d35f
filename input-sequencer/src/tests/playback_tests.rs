use super::{
    init_tracing, setup_recording_sequencer, TEST_MAX_DELAY_MS, TEST_MIN_DELAY_MS,
};
use crate::{Chord, InputEvent, KeyCode, KeyTable, MouseButton, Stroke, TimingPolicy};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

fn humanized() -> TimingPolicy {
    TimingPolicy::new(TEST_MIN_DELAY_MS, TEST_MAX_DELAY_MS).unwrap()
}

#[test]
fn test_shared_sequencer_keeps_each_thread_paired() {
    init_tracing();
    let (backend, sequencer) = setup_recording_sequencer(humanized());
    let sequencer = Arc::new(sequencer);

    let handles: Vec<_> = (0..4u16)
        .map(|i| {
            let sequencer = Arc::clone(&sequencer);
            thread::spawn(move || {
                let keys = vec![KeyCode(0x41 + i); 10];
                sequencer.send_sequence(&keys).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let events = backend.events();
    assert_eq!(events.len(), 4 * 10 * 2);
    for i in 0..4u16 {
        let code = KeyCode(0x41 + i);
        let phases: Vec<bool> = events
            .iter()
            .filter_map(|event| match event {
                InputEvent::Key { code: c, is_down } if *c == code => Some(*is_down),
                _ => None,
            })
            .collect();
        assert_eq!(phases.len(), 20);
        assert!(
            phases.chunks(2).all(|pair| pair == [true, false]),
            "key {code} was not strictly paired: {phases:?}"
        );
    }
    info!(events = events.len(), "concurrent playback recorded");
}

#[test]
fn test_panic_while_held_releases_the_key() {
    let (backend, sequencer) = setup_recording_sequencer(TimingPolicy::disabled());
    let shift = KeyCode(0x10);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _hold = sequencer.hold(shift).unwrap();
        panic!("interrupted mid-gesture");
    }));

    assert!(result.is_err());
    assert_eq!(
        backend.events(),
        vec![InputEvent::key_down(shift), InputEvent::key_up(shift)]
    );
}

#[test]
fn test_humanized_click_trace() {
    let (backend, sequencer) = setup_recording_sequencer(humanized());

    let start = Instant::now();
    sequencer.click(MouseButton::Left, 100, 200).unwrap();
    assert!(start.elapsed() >= Duration::from_millis(TEST_MIN_DELAY_MS as u64));

    assert_eq!(
        backend.events(),
        vec![
            InputEvent::CursorMove { x: 100, y: 200 },
            InputEvent::MouseButton {
                button: MouseButton::Left,
                is_down: true,
                x: 100,
                y: 200
            },
            InputEvent::MouseButton {
                button: MouseButton::Left,
                is_down: false,
                x: 100,
                y: 200
            },
        ]
    );
}

#[test]
fn test_parsed_strokes_play_in_order() {
    let keys = KeyTable::windows().unwrap();
    let (backend, sequencer) = setup_recording_sequencer(TimingPolicy::disabled());

    let strokes = keys.parse_strokes("ctrl+a ctrl+c tab").unwrap();
    sequencer.send_strokes(&strokes).unwrap();

    let ctrl = keys.lookup("ctrl").unwrap();
    let a = keys.lookup("a").unwrap();
    let c = keys.lookup("c").unwrap();
    let tab = keys.lookup("tab").unwrap();
    let expected: Vec<InputEvent> = [
        (ctrl, true),
        (a, true),
        (a, false),
        (ctrl, false),
        (ctrl, true),
        (c, true),
        (c, false),
        (ctrl, false),
        (tab, true),
        (tab, false),
    ]
    .into_iter()
    .map(|(code, is_down)| InputEvent::Key { code, is_down })
    .collect();
    assert_eq!(backend.events(), expected);
}

#[test]
fn test_nested_timing_inside_modifier_hold() {
    // The primary key's whole down-delay-up cycle happens inside the hold,
    // so the modifier is held at least as long as one delay.
    let (backend, sequencer) = setup_recording_sequencer(humanized());
    let chord = Chord::new(KeyCode(0x52)).with_modifier(KeyCode(0x10));

    let start = Instant::now();
    sequencer.send_strokes(&[Stroke::Chord(chord)]).unwrap();
    assert!(start.elapsed() >= Duration::from_millis(TEST_MIN_DELAY_MS as u64));
    assert_eq!(backend.events().len(), 4);
}
