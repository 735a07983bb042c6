//! Virtual clock with fire-once, cancellable timers.
//!
//! Every timer is tagged with the [`Token`] of the round that scheduled it.
//! When a round is superseded its token is cancelled, so a late callback can
//! never touch the newer round's state.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay between two objects appearing in the counting reveal.
pub const REVEAL_TICK: Duration = Duration::from_millis(400);
/// How long the success message stays up.
pub const SUCCESS_WINDOW: Duration = Duration::from_millis(2000);
/// How long the try-again message stays up.
pub const TRY_AGAIN_WINDOW: Duration = Duration::from_millis(1500);

/// The fixed delays used by game sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    #[serde(rename = "reveal_tick_ms", with = "millis")]
    pub reveal_tick: Duration,
    #[serde(rename = "success_window_ms", with = "millis")]
    pub success_window: Duration,
    #[serde(rename = "try_again_window_ms", with = "millis")]
    pub try_again_window: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            reveal_tick: REVEAL_TICK,
            success_window: SUCCESS_WINDOW,
            try_again_window: TRY_AGAIN_WINDOW,
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// Identity of the round a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(u64);

#[derive(Debug)]
struct Timer<E> {
    due: Duration,
    seq: u64,
    token: Token,
    event: E,
}

/// A single-threaded timer queue driven by explicit time advancement.
#[derive(Debug)]
pub struct Timeline<E> {
    now: Duration,
    next_seq: u64,
    next_token: u64,
    pending: Vec<Timer<E>>,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            next_token: 0,
            pending: Vec::new(),
        }
    }

    /// Time elapsed since the timeline was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Hand out a fresh token for a new round.
    pub fn issue_token(&mut self) -> Token {
        self.next_token += 1;
        Token(self.next_token)
    }

    /// Fire `event` once, `delay` from now.
    pub fn schedule(&mut self, delay: Duration, token: Token, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Timer {
            due: self.now + delay,
            seq,
            token,
            event,
        });
    }

    /// Drop every pending timer scheduled under `token`.
    pub fn cancel(&mut self, token: Token) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| t.token != token);
        before - self.pending.len()
    }

    /// Drop pending timers whose event matches `pred`.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&E) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| !pred(&t.event));
        before - self.pending.len()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Absolute time at which the next timer fires.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|t| t.due).min()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline. Timers with the same deadline fire in scheduling order.
    ///
    /// Callers loop on this so that callbacks scheduled while handling a
    /// timer fire within the same advance if they fall due.
    pub fn pop_due(&mut self, until: Duration) -> Option<(Token, E)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;
        let timer = self.pending.swap_remove(idx);
        self.now = self.now.max(timer.due);
        Some((timer.token, timer.event))
    }

    /// Move the clock to `until` once every due timer has been popped.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
