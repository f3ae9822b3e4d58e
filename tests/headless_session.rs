// Headless end-to-end tests driving a full session through the public API
// with synthetic timestamps, without a terminal.

use multitap::keymap::Keymap;
use multitap::session::{Key, Session, Timing};

/// Which key produces `c`, and how many in-window taps it takes.
fn taps_for(c: char) -> (char, usize) {
    let keymap = Keymap::default();
    for key in keymap.keys() {
        let candidates = keymap.candidates(key).unwrap();
        if let Some(idx) = candidates.iter().position(|&x| x == c) {
            return (key, idx + 1);
        }
    }
    panic!("no pad key produces {c:?}");
}

/// Multi-tap a whole word, pausing past the cycle window whenever two
/// consecutive characters live on the same key. Leaves the last character
/// in preview for the confirm to flush.
fn type_word(session: &mut Session, word: &str, now: &mut u64) {
    let mut prev_key = None;
    for c in word.chars() {
        let (key, taps) = taps_for(c);
        if prev_key == Some(key) {
            *now += 1100;
        }
        for _ in 0..taps {
            session.key(Key::Pad(key), *now);
            *now += 50;
        }
        prev_key = Some(key);
    }
}

#[test]
fn perfect_three_word_round_scores_24_wpm() {
    let targets = vec!["CODE".to_string(), "GAME".to_string(), "TYPE".to_string()];
    let mut session = Session::new(targets, Keymap::default(), Timing::default());
    assert_eq!(session.total_target_chars(), 12);

    // The clock starts on the first pad press at t=1000
    let mut now = 1000;
    type_word(&mut session, "CODE", &mut now);
    session.key(Key::Confirm, now);

    type_word(&mut session, "GAME", &mut now);
    session.key(Key::Confirm, now);

    type_word(&mut session, "TYPE", &mut now);
    // Last word confirmed exactly 6 seconds after the clock started
    session.key(Key::Confirm, 7000);

    assert!(session.is_finished());
    assert_eq!(session.correct_chars(), 12);

    let summary = session.summary().expect("terminal session has a summary");
    assert_eq!(summary.elapsed_secs, 6.0);
    // (12 / 5) words over 0.1 minutes
    assert_eq!(summary.wpm, 24.0);
    assert_eq!(summary.accuracy, 100.0);
}

#[test]
fn same_key_after_the_window_commits_then_restarts() {
    let mut session = Session::new(
        vec!["AA".to_string()],
        Keymap::default(),
        Timing::default(),
    );

    session.key(Key::Pad('2'), 0); // preview A
    session.key(Key::Pad('2'), 1000); // window elapsed: commits A, fresh preview A

    let snapshot = session.snapshot();
    assert_eq!(snapshot.committed, "A");
    assert_eq!(snapshot.preview, Some('A'));
}

#[test]
fn mistyped_word_still_finishes_with_partial_accuracy() {
    let mut session = Session::new(
        vec!["CODE".to_string()],
        Keymap::default(),
        Timing::default(),
    );

    let mut now = 1000;
    // "CADE": wrong character in second position
    type_word(&mut session, "CADE", &mut now);
    session.key(Key::Confirm, 5000);

    assert!(session.is_finished());
    assert_eq!(session.correct_chars(), 3);
    // 3/4 of the target characters were correct in place
    assert_eq!(session.summary().unwrap().accuracy, 75.0);
}

#[test]
fn confirm_without_typing_scores_zero_and_never_starts_the_clock() {
    let mut session = Session::new(
        vec!["CODE".to_string()],
        Keymap::default(),
        Timing::default(),
    );

    session.key(Key::Confirm, 9999);

    assert!(session.is_finished());
    assert!(!session.has_started());

    let summary = session.summary().unwrap();
    assert_eq!(summary.elapsed_secs, 0.0);
    assert_eq!(summary.wpm, 0.0);
    assert_eq!(summary.accuracy, 0.0);
}

mod runtime_driven {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use multitap::runtime::{Event, FixedTicker, Runner, TestEvents};
    use std::sync::mpsc;
    use std::time::Duration;

    /// Drive a session through the runtime the way the binary does, with a
    /// synthetic clock advanced on every step. Ticks (from the event-source
    /// timeout) are what let the auto-commit fire between same-key letters.
    #[test]
    fn runner_flow_with_auto_commit_completes_a_word() {
        let (tx, rx) = mpsc::channel();
        let runner = Runner::new(
            TestEvents::new(rx),
            FixedTicker::new(Duration::from_millis(2)),
        );
        let mut session = Session::new(
            vec!["HI".to_string()],
            Keymap::default(),
            Timing::default(),
        );

        let mut now: u64 = 0;
        let step = |session: &mut Session, now: &mut u64| {
            *now += 100;
            match runner.step() {
                Event::Tick => session.on_tick(*now),
                Event::Resize => {}
                Event::Key(key) => match key.code {
                    KeyCode::Char(c) if c.is_ascii_digit() => {
                        session.key(Key::Pad(c), *now);
                    }
                    KeyCode::Enter => session.key(Key::Confirm, *now),
                    _ => {}
                },
            }
        };

        // H: two taps on '4'
        for _ in 0..2 {
            tx.send(Event::Key(KeyEvent::new(
                KeyCode::Char('4'),
                KeyModifiers::NONE,
            )))
            .unwrap();
        }
        for _ in 0..20 {
            step(&mut session, &mut now);
            if session.snapshot().committed == "H" {
                break;
            }
        }
        assert_eq!(session.snapshot().committed, "H", "auto-commit never fired");

        // I: three taps on '4', then confirm flushes the preview
        for _ in 0..3 {
            tx.send(Event::Key(KeyEvent::new(
                KeyCode::Char('4'),
                KeyModifiers::NONE,
            )))
            .unwrap();
        }
        tx.send(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))
            .unwrap();
        for _ in 0..10 {
            step(&mut session, &mut now);
            if session.is_finished() {
                break;
            }
        }

        assert!(session.is_finished());
        assert_eq!(session.correct_chars(), 2);
        assert_eq!(session.summary().unwrap().accuracy, 100.0);
    }
}
