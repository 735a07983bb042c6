//! Round generation for the choice games.
//!
//! Distractors sit at small offsets from the correct value with a random
//! sign, are clamped into the display range, and the final choices are
//! shuffled uniformly. Clamping is not followed by a second uniqueness pass.

use rand::seq::SliceRandom;
use rand::Rng;

/// Highest number any game displays.
pub const MAX_NUMBER: u32 = 10;

/// Object shown for each number in the counting and tap games.
pub const NUMBER_OBJECTS: [&str; 10] = ["🍎", "🦁", "⭐", "🌸", "🐠", "🦋", "🌈", "🐢", "🌻", "🎈"];

/// Objects a match round may be drawn with.
pub const MATCH_OBJECTS: [&str; 5] = ["🍎", "🌟", "🦋", "🌸", "🐠"];

/// The object drawn for `n` in the counting and tap games.
pub fn object_for(n: u32) -> &'static str {
    let idx = n.clamp(1, MAX_NUMBER) as usize - 1;
    NUMBER_OBJECTS[idx]
}

/// One selectable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: u32,
    pub correct: bool,
}

/// Produces fresh rounds for a choice game.
pub trait RoundGenerator {
    type Round: ChoiceRound + std::fmt::Debug + Clone;

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Round;
}

/// A round that presents a fixed set of choices.
pub trait ChoiceRound {
    fn choices(&self) -> &[Choice];

    /// The value of the correct choice.
    fn answer(&self) -> u32;
}

/// "Find the group with N objects."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRound {
    pub target: u32,
    pub choices: Vec<Choice>,
    pub object: &'static str,
}

impl ChoiceRound for MatchRound {
    fn choices(&self) -> &[Choice] {
        &self.choices
    }

    fn answer(&self) -> u32 {
        self.target
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MatchGenerator;

impl RoundGenerator for MatchGenerator {
    type Round = MatchRound;

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> MatchRound {
        let target: u32 = rng.gen_range(3..=8);
        let below = target.saturating_sub(rng.gen_range(1..=2)).max(1);
        let above = (target + rng.gen_range(1..=2)).min(MAX_NUMBER);

        let mut choices = vec![
            Choice {
                value: below,
                correct: false,
            },
            Choice {
                value: target,
                correct: true,
            },
            Choice {
                value: above,
                correct: false,
            },
        ];
        choices.shuffle(rng);

        let object = MATCH_OBJECTS[rng.gen_range(0..MATCH_OBJECTS.len())];
        tracing::debug!(answer = target, ?choices, "match round generated");
        MatchRound {
            target,
            choices,
            object,
        }
    }
}

/// A slot in the displayed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Shown(u32),
    Missing,
}

/// "What number is missing?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingRound {
    pub sequence: [u32; 4],
    pub missing_index: usize,
    pub choices: Vec<Choice>,
}

impl MissingRound {
    pub fn missing_value(&self) -> u32 {
        self.sequence[self.missing_index]
    }

    /// The sequence as shown, with the hidden value replaced.
    pub fn slots(&self) -> [Slot; 4] {
        let mut slots = self.sequence.map(Slot::Shown);
        slots[self.missing_index] = Slot::Missing;
        slots
    }
}

impl ChoiceRound for MissingRound {
    fn choices(&self) -> &[Choice] {
        &self.choices
    }

    fn answer(&self) -> u32 {
        self.missing_value()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MissingGenerator;

impl RoundGenerator for MissingGenerator {
    type Round = MissingRound;

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> MissingRound {
        let start: u32 = rng.gen_range(1..=5);
        let sequence = [start, start + 1, start + 2, start + 3];
        // Never the first or last element.
        let missing_index = rng.gen_range(1..=2);
        let value = sequence[missing_index];

        let near = offset(value, 1, rng.gen_bool(0.5));
        let far = offset(value, 2, rng.gen_bool(0.5));

        let mut choices = vec![
            Choice {
                value,
                correct: true,
            },
            Choice {
                value: near,
                correct: false,
            },
            Choice {
                value: far,
                correct: false,
            },
        ];
        choices.shuffle(rng);

        tracing::debug!(?sequence, missing_index, ?choices, "missing round generated");
        MissingRound {
            sequence,
            missing_index,
            choices,
        }
    }
}

/// `value ± by`, never below 1.
fn offset(value: u32, by: u32, down: bool) -> u32 {
    if down {
        value.saturating_sub(by).max(1)
    } else {
        value + by
    }
}
