//! Stock match setups.
//!
//! Each preset is a complete [`CombatConfig`] a server can start from and
//! then override from a config file.

use combat_core::{CombatConfig, GameMode, MatchRules, Ruleset};

/// Named match setups.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MatchPreset {
    Campaign,
    Cooperative,
    FreeForAll,
    Duel,
    TeamDeathmatch,
    CaptureTheFlag,
    ClanArena,
    FreezeTag,
    Instagib,
    /// Every hit heals the shooter.
    Vampire,
}

impl MatchPreset {
    pub fn mode(self) -> GameMode {
        match self {
            MatchPreset::Campaign => GameMode::SinglePlayer,
            MatchPreset::Cooperative => GameMode::Cooperative,
            MatchPreset::FreeForAll | MatchPreset::Instagib | MatchPreset::Vampire => {
                GameMode::FreeForAll
            }
            MatchPreset::Duel => GameMode::Duel,
            MatchPreset::TeamDeathmatch => GameMode::TeamDeathmatch,
            MatchPreset::CaptureTheFlag => GameMode::CaptureTheFlag,
            MatchPreset::ClanArena => GameMode::ClanArena,
            MatchPreset::FreezeTag => GameMode::FreezeTag,
        }
    }

    pub fn config(self) -> CombatConfig {
        let ruleset = match self {
            MatchPreset::ClanArena | MatchPreset::Duel => Ruleset::Quake3Arena,
            _ => Ruleset::Quake2,
        };
        let mut config = CombatConfig::with_rules(MatchRules::new(self.mode(), ruleset));

        match self {
            MatchPreset::CaptureTheFlag => {
                config.rules.quad_hog = true;
            }
            MatchPreset::ClanArena => {
                config.arena.self_damage = false;
            }
            MatchPreset::Instagib => {
                config.rules.instagib = true;
            }
            MatchPreset::Vampire => {
                config.vampiric.enabled = true;
            }
            MatchPreset::Campaign
            | MatchPreset::Cooperative
            | MatchPreset::FreeForAll
            | MatchPreset::Duel
            | MatchPreset::TeamDeathmatch
            | MatchPreset::FreezeTag => {}
        }

        config
    }
}
