use crate::keymap::Keymap;

/// A tentatively selected character: the key being cycled and the current
/// position in that key's candidate sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Preview {
    key: char,
    index: usize,
}

/// Turns a stream of timestamped pad-key presses into committed text.
///
/// Repeated presses of the same key within the cycle window rotate through
/// the key's candidates; a different key, or the same key after the window
/// has elapsed, commits the pending candidate and starts a fresh one. At
/// most one character is in preview at any time.
#[derive(Debug)]
pub struct InputEngine {
    keymap: Keymap,
    committed: String,
    preview: Option<Preview>,
    last_press_ms: u64,
    cycle_window_ms: u64,
}

impl InputEngine {
    pub fn new(keymap: Keymap, cycle_window_ms: u64) -> Self {
        Self {
            keymap,
            committed: String::new(),
            preview: None,
            last_press_ms: 0,
            cycle_window_ms,
        }
    }

    /// Process a press of a mapped pad key. Unmapped keys are filtered by
    /// the caller; here they are a no-op.
    pub fn press(&mut self, key: char, now_ms: u64) {
        let Some(candidates) = self.keymap.candidates(key) else {
            return;
        };

        match self.preview {
            Some(preview)
                if preview.key == key
                    && now_ms.saturating_sub(self.last_press_ms) < self.cycle_window_ms =>
            {
                // Rapid repeat of the same key: advance the candidate,
                // wrapping past the end of the sequence.
                self.preview = Some(Preview {
                    key,
                    index: (preview.index + 1) % candidates.len(),
                });
            }
            _ => {
                // Different key, or the window elapsed: commit whatever is
                // pending and start over at the first candidate.
                self.flush_preview();
                self.preview = Some(Preview { key, index: 0 });
            }
        }

        self.last_press_ms = now_ms;
    }

    /// Discard the pending preview if there is one; otherwise drop the last
    /// committed character. No-op on empty text.
    pub fn backspace(&mut self) {
        if self.preview.take().is_some() {
            return;
        }
        self.committed.pop();
    }

    /// Commit the pending preview to the text. Idempotent when nothing is
    /// in preview.
    pub fn flush_preview(&mut self) {
        if let Some(preview) = self.preview.take() {
            if let Some(candidates) = self.keymap.candidates(preview.key) {
                self.committed.push(candidates[preview.index]);
            }
        }
    }

    /// Clear all text and preview/timing state, ready for a new word.
    pub fn reset(&mut self) {
        self.committed.clear();
        self.preview = None;
        self.last_press_ms = 0;
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn preview_key(&self) -> Option<char> {
        self.preview.map(|p| p.key)
    }

    pub fn preview_char(&self) -> Option<char> {
        self.preview
            .and_then(|p| self.keymap.candidates(p.key).map(|cs| cs[p.index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: u64 = 1000;

    fn engine() -> InputEngine {
        InputEngine::new(Keymap::default(), WINDOW)
    }

    #[test]
    fn rapid_same_key_cycles_candidates() {
        let mut engine = engine();

        engine.press('2', 0);
        assert_eq!(engine.preview_char(), Some('A'));
        engine.press('2', 100);
        assert_eq!(engine.preview_char(), Some('B'));
        engine.press('2', 200);
        assert_eq!(engine.preview_char(), Some('C'));
        engine.press('2', 300);
        assert_eq!(engine.preview_char(), Some('2'));

        // Wraps back to the first candidate
        engine.press('2', 400);
        assert_eq!(engine.preview_char(), Some('A'));
        assert_eq!(engine.committed(), "");
    }

    #[test]
    fn same_key_after_window_commits_and_restarts() {
        let mut engine = engine();

        engine.press('5', 0);
        assert_eq!(engine.preview_char(), Some('J'));

        engine.press('5', WINDOW);
        assert_eq!(engine.committed(), "J");
        assert_eq!(engine.preview_char(), Some('J'));
    }

    #[test]
    fn different_key_commits_previous_preview() {
        let mut engine = engine();

        engine.press('2', 0);
        engine.press('2', 100); // preview B
        engine.press('3', 200);

        assert_eq!(engine.committed(), "B");
        assert_eq!(engine.preview_char(), Some('D'));
    }

    #[test]
    fn cycling_has_no_press_limit() {
        let mut engine = engine();

        for i in 0..9 {
            engine.press('2', i * 10);
        }
        // 9 presses on a 4-candidate key: index (9 - 1) % 4 == 0
        assert_eq!(engine.preview_char(), Some('A'));
        assert_eq!(engine.committed(), "");
    }

    #[test]
    fn backspace_discards_preview_before_text() {
        let mut engine = engine();

        engine.press('2', 0);
        engine.press('3', 100); // commits A, previews D
        engine.backspace();

        assert_eq!(engine.preview_char(), None);
        assert_eq!(engine.committed(), "A");

        engine.backspace();
        assert_eq!(engine.committed(), "");

        // No-op on empty text
        engine.backspace();
        assert_eq!(engine.committed(), "");
    }

    #[test]
    fn flush_preview_is_idempotent() {
        let mut engine = engine();

        engine.press('8', 0);
        engine.flush_preview();
        assert_eq!(engine.committed(), "T");

        engine.flush_preview();
        assert_eq!(engine.committed(), "T");
        assert_eq!(engine.preview_char(), None);
    }

    #[test]
    fn unmapped_key_is_a_no_op() {
        let mut engine = engine();

        engine.press('2', 0);
        engine.press('x', 100);

        assert_eq!(engine.preview_char(), Some('A'));
        assert_eq!(engine.committed(), "");
    }

    #[test]
    fn reset_clears_text_and_preview() {
        let mut engine = engine();

        engine.press('2', 0);
        engine.press('3', 100);
        engine.reset();

        assert_eq!(engine.committed(), "");
        assert_eq!(engine.preview_char(), None);

        // A press right after reset starts fresh rather than cycling
        engine.press('3', 150);
        assert_eq!(engine.preview_char(), Some('D'));
    }
}
