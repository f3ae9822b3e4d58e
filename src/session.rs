use crate::engine::InputEngine;
use crate::keymap::Keymap;
use crate::scheduler::AutoCommit;
use crate::score::{self, Summary};

/// Timing policy shared by the input engine and the auto-commit scheduler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub cycle_window_ms: u64,
    pub auto_confirm_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            cycle_window_ms: 1000,
            auto_confirm_ms: 1000,
        }
    }
}

/// Key events the session accepts, after the boundary has mapped raw
/// terminal input. Unmapped identifiers never reach this type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Key {
    Pad(char),
    Clear,
    Confirm,
}

/// Read-only view of the session for the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot<'a> {
    pub target: &'a str,
    pub committed: &'a str,
    pub preview: Option<char>,
    /// 0-based index of the word being typed, clamped while finished.
    pub word_index: usize,
    pub word_total: usize,
    pub finished: bool,
}

/// One play-through: the target words, progression through them, and the
/// running score. A restart constructs a brand-new `Session`; the value is
/// never reused across play-throughs.
///
/// The session clock starts on the first pad-key press and runs
/// continuously until the last word is confirmed; `Clear` and `Confirm`
/// never start it.
#[derive(Debug)]
pub struct Session {
    keymap: Keymap,
    engine: InputEngine,
    auto_commit: AutoCommit,
    targets: Vec<String>,
    current: usize,
    correct_chars: usize,
    total_target_chars: usize,
    started_at_ms: Option<u64>,
    ended_at_ms: Option<u64>,
    auto_confirm_ms: u64,
    summary: Option<Summary>,
}

impl Session {
    pub fn new(targets: Vec<String>, keymap: Keymap, timing: Timing) -> Self {
        // Fixed once here, never recomputed mid-session
        let total_target_chars = targets.iter().map(|w| w.chars().count()).sum();

        Self {
            keymap,
            engine: InputEngine::new(keymap, timing.cycle_window_ms),
            auto_commit: AutoCommit::default(),
            targets,
            current: 0,
            correct_chars: 0,
            total_target_chars,
            started_at_ms: None,
            ended_at_ms: None,
            auto_confirm_ms: timing.auto_confirm_ms,
            summary: None,
        }
    }

    /// Route one key event into the session. Events arriving after the last
    /// word was confirmed are ignored.
    pub fn key(&mut self, key: Key, now_ms: u64) {
        if self.is_finished() {
            return;
        }

        match key {
            Key::Pad(k) => self.pad_press(k, now_ms),
            Key::Clear => {
                self.auto_commit.cancel();
                self.engine.backspace();
            }
            Key::Confirm => {
                self.auto_commit.cancel();
                self.confirm_word(now_ms);
            }
        }
    }

    /// Poll the auto-commit slot; called from the runtime tick. A due timer
    /// whose key no longer matches the live preview is discarded.
    pub fn on_tick(&mut self, now_ms: u64) {
        if self.is_finished() {
            return;
        }
        if self.auto_commit.poll(now_ms, self.engine.preview_key()) {
            self.engine.flush_preview();
        }
    }

    fn pad_press(&mut self, key: char, now_ms: u64) {
        // The boundary filters unmapped identifiers already
        if !self.keymap.contains(key) {
            return;
        }

        if self.started_at_ms.is_none() {
            self.started_at_ms = Some(now_ms);
        }

        self.engine.press(key, now_ms);
        self.auto_commit.arm(key, now_ms + self.auto_confirm_ms);
    }

    fn confirm_word(&mut self, now_ms: u64) {
        self.engine.flush_preview();

        let Some(target) = self.targets.get(self.current) else {
            return;
        };
        self.correct_chars += score::correct_chars(target, self.engine.committed());

        self.current += 1;
        if self.current < self.targets.len() {
            // The clock keeps running across words
            self.engine.reset();
        } else {
            self.ended_at_ms = Some(now_ms);
            self.summary = Some(score::summarize(
                self.total_target_chars,
                self.correct_chars,
                self.started_at_ms,
                self.ended_at_ms,
            ));
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current == self.targets.len()
    }

    pub fn has_started(&self) -> bool {
        self.started_at_ms.is_some()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            target: self
                .targets
                .get(self.current)
                .map(String::as_str)
                .unwrap_or_default(),
            committed: self.engine.committed(),
            preview: self.engine.preview_char(),
            word_index: self.current.min(self.targets.len().saturating_sub(1)),
            word_total: self.targets.len(),
            finished: self.is_finished(),
        }
    }

    /// Final result record; `None` until the last word is confirmed.
    pub fn summary(&self) -> Option<Summary> {
        self.summary
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn correct_chars(&self) -> usize {
        self.correct_chars
    }

    pub fn total_target_chars(&self) -> usize {
        self.total_target_chars
    }
}
