use std::time::Duration;

use serde::Serialize;

use super::wrap_index;

pub const TYPE_INTERVAL: Duration = Duration::from_millis(120);
pub const DELETE_INTERVAL: Duration = Duration::from_millis(80);
pub const FULL_TEXT_PAUSE: Duration = Duration::from_millis(1200);
pub const PHRASE_INTERVAL: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Typing,
    Paused,
    Deleting,
}

/// Types a string out one character at a time, holds it, then erases it, forever.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
    phase: Phase,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
            phase: Phase::Typing,
        }
    }

    pub fn text(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    pub fn shown(&self) -> usize {
        self.shown
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advances one step and returns how long to wait before the next one.
    pub fn step(&mut self) -> Duration {
        match self.phase {
            Phase::Typing if self.shown < self.chars.len() => {
                self.shown += 1;
                if self.shown == self.chars.len() {
                    self.phase = Phase::Paused;
                    FULL_TEXT_PAUSE
                } else {
                    TYPE_INTERVAL
                }
            }
            Phase::Typing | Phase::Paused => {
                self.phase = Phase::Deleting;
                DELETE_INTERVAL
            }
            Phase::Deleting if self.shown > 0 => {
                self.shown -= 1;
                DELETE_INTERVAL
            }
            Phase::Deleting => {
                self.phase = Phase::Typing;
                TYPE_INTERVAL
            }
        }
    }
}

impl Typewriter {
    /// State `elapsed` after typing started, the first character landing after
    /// one `TYPE_INTERVAL`.
    pub fn after(text: &str, elapsed: Duration) -> Self {
        let mut typewriter = Self::new(text);
        if typewriter.chars.is_empty() {
            return typewriter;
        }
        let mut next_step = TYPE_INTERVAL;
        while next_step <= elapsed {
            next_step += typewriter.step();
        }
        typewriter
    }
}

/// Cycles through tagline phrases on a fixed interval.
#[derive(Debug, Clone)]
pub struct PhraseRotator {
    len: usize,
    current: usize,
}

impl PhraseRotator {
    pub fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Index shown after `elapsed` since the rotation started.
    pub fn at(&self, elapsed: Duration) -> usize {
        let ticks = (elapsed.as_millis() / PHRASE_INTERVAL.as_millis()) as usize;
        if self.len == 0 {
            0
        } else {
            (self.current + ticks) % self.len
        }
    }

    pub fn advance(&mut self) -> usize {
        self.current = wrap_index(self.current, 1, self.len);
        self.current
    }
}
