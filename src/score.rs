/// Number of positions where the typed text matches the target, compared up
/// to the shorter of the two. Extra typed characters and an untyped target
/// tail score nothing either way.
pub fn correct_chars(target: &str, typed: &str) -> usize {
    target
        .chars()
        .zip(typed.chars())
        .filter(|(expected, got)| expected == got)
        .count()
}

/// Final result record for a completed session. `wpm` and `accuracy` are
/// rounded with `f64::round` (half away from zero).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub elapsed_secs: f64,
    pub wpm: f64,
    pub accuracy: f64,
}

/// Session-level metrics, computed once when the last word is confirmed.
/// The WPM divisor 5 is the usual characters-per-word approximation.
pub fn summarize(
    total_target_chars: usize,
    correct_chars: usize,
    started_at_ms: Option<u64>,
    ended_at_ms: Option<u64>,
) -> Summary {
    let elapsed_secs = match (started_at_ms, ended_at_ms) {
        (Some(start), Some(end)) => end.saturating_sub(start) as f64 / 1000.0,
        _ => 0.0,
    };

    let wpm = if total_target_chars > 0 && elapsed_secs > 0.0 {
        ((total_target_chars as f64 / 5.0) / (elapsed_secs / 60.0)).round()
    } else {
        0.0
    };

    let accuracy = if total_target_chars > 0 {
        ((correct_chars as f64 / total_target_chars as f64) * 100.0).round()
    } else {
        0.0
    };

    Summary {
        elapsed_secs,
        wpm,
        accuracy,
    }
}
