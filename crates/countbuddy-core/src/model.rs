//! Core data model types for countbuddy.
//!
//! Profiles, game modes, avatars, and the per-mode play counters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The four mini-games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    Counting,
    TapCount,
    MatchNumber,
    MissingNumber,
}

impl GameMode {
    /// All game modes, in menu order.
    pub const ALL: [GameMode; 4] = [
        GameMode::Counting,
        GameMode::TapCount,
        GameMode::MatchNumber,
        GameMode::MissingNumber,
    ];

    /// Identifier used in stored stats and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Counting => "counting",
            GameMode::TapCount => "tapCount",
            GameMode::MatchNumber => "matchNumber",
            GameMode::MissingNumber => "missingNumber",
        }
    }

    /// Human-readable title shown on the dashboard.
    pub fn title(&self) -> &'static str {
        match self {
            GameMode::Counting => "Counting Numbers",
            GameMode::TapCount => "Tap to Count",
            GameMode::MatchNumber => "Match the Number",
            GameMode::MissingNumber => "Missing Number",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(&['-', '_'][..], "").as_str() {
            "counting" | "count" => Ok(GameMode::Counting),
            "tapcount" | "tap" => Ok(GameMode::TapCount),
            "matchnumber" | "match" => Ok(GameMode::MatchNumber),
            "missingnumber" | "missing" => Ok(GameMode::MissingNumber),
            other => Err(format!("unknown game mode: {other}")),
        }
    }
}

/// Avatar symbols offered on the create-profile screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Avatar {
    #[default]
    #[serde(rename = "😊")]
    Smile,
    #[serde(rename = "🌟")]
    Star,
    #[serde(rename = "🦁")]
    Lion,
    #[serde(rename = "🦋")]
    Butterfly,
    #[serde(rename = "🌈")]
    Rainbow,
    #[serde(rename = "🐢")]
    Turtle,
    #[serde(rename = "🌸")]
    Blossom,
    #[serde(rename = "🎈")]
    Balloon,
}

impl Avatar {
    pub const ALL: [Avatar; 8] = [
        Avatar::Smile,
        Avatar::Star,
        Avatar::Lion,
        Avatar::Butterfly,
        Avatar::Rainbow,
        Avatar::Turtle,
        Avatar::Blossom,
        Avatar::Balloon,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Avatar::Smile => "😊",
            Avatar::Star => "🌟",
            Avatar::Lion => "🦁",
            Avatar::Butterfly => "🦋",
            Avatar::Rainbow => "🌈",
            Avatar::Turtle => "🐢",
            Avatar::Blossom => "🌸",
            Avatar::Balloon => "🎈",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Avatar::Smile => "smile",
            Avatar::Star => "star",
            Avatar::Lion => "lion",
            Avatar::Butterfly => "butterfly",
            Avatar::Rainbow => "rainbow",
            Avatar::Turtle => "turtle",
            Avatar::Blossom => "blossom",
            Avatar::Balloon => "balloon",
        }
    }
}

impl fmt::Display for Avatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Avatar {
    type Err = String;

    /// Accepts either the symbol itself or its lowercase name (e.g. "lion").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Avatar::ALL
            .into_iter()
            .find(|a| a.symbol() == s || a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown avatar: {s}"))
    }
}

/// Play counters, one per game mode.
///
/// A struct rather than a map so the four keys can never drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub counting: u32,
    pub tap_count: u32,
    pub match_number: u32,
    pub missing_number: u32,
}

impl GameStats {
    pub fn get(&self, mode: GameMode) -> u32 {
        match mode {
            GameMode::Counting => self.counting,
            GameMode::TapCount => self.tap_count,
            GameMode::MatchNumber => self.match_number,
            GameMode::MissingNumber => self.missing_number,
        }
    }

    pub fn increment(&mut self, mode: GameMode) {
        let slot = match mode {
            GameMode::Counting => &mut self.counting,
            GameMode::TapCount => &mut self.tap_count,
            GameMode::MatchNumber => &mut self.match_number,
            GameMode::MissingNumber => &mut self.missing_number,
        };
        *slot = slot.saturating_add(1);
    }

    /// Iterate `(mode, plays)` in menu order.
    pub fn iter(&self) -> impl Iterator<Item = (GameMode, u32)> + '_ {
        GameMode::ALL.into_iter().map(|mode| (mode, self.get(mode)))
    }

    pub fn total(&self) -> u32 {
        self.iter().map(|(_, plays)| plays).sum()
    }
}

/// A child profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Unique identifier, assigned at creation.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Chosen avatar.
    #[serde(default)]
    pub avatar: Avatar,
    /// Per-mode play counters.
    #[serde(default)]
    pub game_stats: GameStats,
}
