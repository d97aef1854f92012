//! Difficulty tier lookup.
//!
//! The leaderboard codes difficulties as small odd integers. The mapping is a closed
//! enum rather than a table so it cannot be mutated or silently defaulted.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Characteristic used when the service does not report a game mode.
pub const DEFAULT_CHARACTERISTIC: &str = "Standard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Expert,
    ExpertPlus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unknown difficulty tier: {0}")]
pub struct UnknownTier(pub u8);

impl Difficulty {
    pub fn tier(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 3,
            Difficulty::Hard => 5,
            Difficulty::Expert => 7,
            Difficulty::ExpertPlus => 9,
        }
    }

    /// Name as the playlist format expects it.
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
            Difficulty::ExpertPlus => "ExpertPlus",
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = UnknownTier;

    fn try_from(tier: u8) -> Result<Self, Self::Error> {
        match tier {
            1 => Ok(Difficulty::Easy),
            3 => Ok(Difficulty::Normal),
            5 => Ok(Difficulty::Hard),
            7 => Ok(Difficulty::Expert),
            9 => Ok(Difficulty::ExpertPlus),
            other => Err(UnknownTier(other)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps the service's game mode (`SoloStandard`, `SoloOneSaber`, ...) to a playlist characteristic.
pub fn characteristic_from_game_mode(game_mode: Option<&str>) -> String {
    match game_mode {
        Some(mode) => {
            let stripped = mode.strip_prefix("Solo").unwrap_or(mode);
            if stripped.is_empty() {
                DEFAULT_CHARACTERISTIC.to_string()
            } else {
                stripped.to_string()
            }
        }
        None => DEFAULT_CHARACTERISTIC.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tiers_map_to_names() {
        let cases = [
            (1, "Easy"),
            (3, "Normal"),
            (5, "Hard"),
            (7, "Expert"),
            (9, "ExpertPlus"),
        ];
        for (tier, name) in cases {
            let difficulty = Difficulty::try_from(tier).expect("known tier");
            assert_eq!(difficulty.name(), name);
            assert_eq!(difficulty.tier(), tier);
        }
    }

    #[test]
    fn unknown_tiers_are_errors() {
        for tier in [0u8, 2, 4, 6, 8, 10, 255] {
            assert_eq!(Difficulty::try_from(tier), Err(UnknownTier(tier)));
        }
    }

    #[test]
    fn characteristic_strips_solo_prefix() {
        assert_eq!(characteristic_from_game_mode(Some("SoloStandard")), "Standard");
        assert_eq!(characteristic_from_game_mode(Some("SoloOneSaber")), "OneSaber");
        assert_eq!(characteristic_from_game_mode(Some("Lawless")), "Lawless");
        assert_eq!(characteristic_from_game_mode(Some("Solo")), "Standard");
        assert_eq!(characteristic_from_game_mode(None), "Standard");
    }
}
