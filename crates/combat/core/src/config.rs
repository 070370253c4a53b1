//! Match rules and tunable parameters consumed by the damage pipeline.
//!
//! Everything a server operator can change lives in [`CombatConfig`]; values
//! that size fixed-capacity containers are associated constants.

use crate::error::ConfigError;
use crate::state::ArmorTier;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    pub rules: MatchRules,
    pub damage: DamageScales,
    pub vampiric: VampiricConfig,
    pub knockback: KnockbackConfig,
    pub arena: ArenaConfig,
    pub armor: ArmorRules,
    pub power_armor: PowerArmorConfig,
    pub shield: ShieldConfig,
    pub radius: RadiusConfig,
    pub nuke: NukeConfig,
    pub timing: TimingConfig,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Damage indicators tracked per client per frame.
    pub const MAX_DAMAGE_INDICATORS: usize = 4;
    pub const MAX_TIMED_EFFECTS: usize = 8;

    // ===== fixed rules =====
    /// Hits landing within this distance of an existing indicator merge into it.
    pub const INDICATOR_MERGE_DISTANCE: f32 = 32.0;
    /// Bodies at or below this health are gibbed.
    pub const GIB_HEALTH: i32 = -40;
    pub const MIN_HEALTH: i32 = -999;
    /// Effect counts are sent as a byte.
    pub const MAX_EFFECT_COUNT: i32 = 255;

    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor used by tests and tools.
    pub fn with_rules(rules: MatchRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Checks every tunable for values the pipeline cannot handle.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("damage.friendly_fire_scale", self.damage.friendly_fire_scale)?;
        non_negative("damage.player_scale", self.damage.player_scale)?;
        non_negative("damage.ai_scale", self.damage.ai_scale)?;

        fraction("vampiric.percentile", self.vampiric.percentile)?;
        positive("vampiric.health_max", self.vampiric.health_max as f32)?;

        let kb = &self.knockback;
        non_negative("knockback.scale", kb.scale)?;
        positive("knockback.base", kb.base)?;
        positive("knockback.self_base", kb.self_base)?;
        positive("knockback.min_mass", kb.min_mass as f32)?;
        non_negative("knockback.arena_multiplier", kb.arena_multiplier)?;
        non_negative("knockback.grounded_lift", kb.grounded_lift)?;
        non_negative("knockback.airborne_lift", kb.airborne_lift)?;
        positive("knockback.max_impulse", kb.max_impulse)?;
        positive("knockback.max_speed", kb.max_speed)?;

        positive("arena.damage_per_point", self.arena.damage_per_point as f32)?;

        for (field, table) in [
            ("armor.quake1", &self.armor.quake1),
            ("armor.quake2", &self.armor.quake2),
            ("armor.quake3_arena", &self.armor.quake3_arena),
        ] {
            for tier in ArmorTier::ALL {
                let info = table.get(tier);
                fraction(field, info.normal)?;
                fraction(field, info.energy)?;
            }
        }

        let pa = &self.power_armor;
        if pa.screen_per_cell <= 0 {
            return Err(ConfigError::ZeroPerCell {
                field: "power_armor.screen_per_cell",
            });
        }
        if pa.shield_per_cell <= 0 {
            return Err(ConfigError::ZeroPerCell {
                field: "power_armor.shield_per_cell",
            });
        }
        if pa.shield_per_cell_deathmatch <= 0 {
            return Err(ConfigError::ZeroPerCell {
                field: "power_armor.shield_per_cell_deathmatch",
            });
        }

        fraction("shield.reduction", self.shield.reduction)?;
        non_negative("radius.lift", self.radius.lift)?;
        positive("nuke.near_range", self.nuke.near_range)?;
        positive("nuke.warn_range", self.nuke.warn_range)?;
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidScale { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn fraction(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::FractionOutOfRange { field, value })
    }
}

// ============================================================================
// Match Rules
// ============================================================================

/// Active game mode. Team relationships, scoring and several pipeline stages
/// depend on it.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GameMode {
    SinglePlayer,
    Cooperative,
    #[default]
    FreeForAll,
    Duel,
    TeamDeathmatch,
    CaptureTheFlag,
    ClanArena,
    FreezeTag,
    /// Ball sport; players never hurt each other.
    ProBall,
}

impl GameMode {
    pub fn is_deathmatch(self) -> bool {
        !matches!(self, GameMode::SinglePlayer | GameMode::Cooperative)
    }

    pub fn is_team_mode(self) -> bool {
        matches!(
            self,
            GameMode::TeamDeathmatch
                | GameMode::CaptureTheFlag
                | GameMode::ClanArena
                | GameMode::FreezeTag
                | GameMode::ProBall
        )
    }

    /// Rounds end when a side is wiped out; dead players wait for the round.
    pub fn is_elimination(self) -> bool {
        matches!(self, GameMode::ClanArena | GameMode::FreezeTag)
    }

    pub fn is_arena(self) -> bool {
        self == GameMode::ClanArena
    }

    pub fn deals_no_damage(self) -> bool {
        self == GameMode::ProBall
    }
}

/// Balance ruleset. Selects the armor table and a few knockback tweaks.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Ruleset {
    Quake1,
    #[default]
    Quake2,
    Quake3Arena,
}

/// Single-player difficulty.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Skill {
    Easy,
    #[default]
    Medium,
    Hard,
    Nightmare,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchRules {
    pub mode: GameMode,
    pub ruleset: Ruleset,
    pub skill: Skill,
    pub instagib: bool,
    /// Whoever carries quad damage is fair game for everyone.
    pub quad_hog: bool,
    /// Warmup, intermission and similar phases where players cannot be hurt.
    pub combat_disabled: bool,
    /// Rocket jumps and grenades hurt their owner.
    pub self_damage: bool,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            ruleset: Ruleset::default(),
            skill: Skill::default(),
            instagib: false,
            quad_hog: false,
            combat_disabled: false,
            self_damage: true,
        }
    }
}

impl MatchRules {
    pub fn new(mode: GameMode, ruleset: Ruleset) -> Self {
        Self {
            mode,
            ruleset,
            ..Self::default()
        }
    }
}

// ============================================================================
// Tunables
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageScales {
    /// Applied to damage between teammates. Zero disables friendly fire.
    pub friendly_fire_scale: f32,
    /// Applied to damage dealt by players and the world.
    pub player_scale: f32,
    /// Applied to damage dealt by monsters.
    pub ai_scale: f32,
}

impl Default for DamageScales {
    fn default() -> Self {
        Self {
            friendly_fire_scale: 0.0,
            player_scale: 1.0,
            ai_scale: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VampiricConfig {
    pub enabled: bool,
    /// Fraction of dealt damage returned to the attacker as health.
    pub percentile: f32,
    pub health_max: i32,
}

impl Default for VampiricConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            percentile: 0.5,
            health_max: 300,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KnockbackConfig {
    pub scale: f32,
    /// Impulse constant for hits from someone else.
    pub base: f32,
    /// Impulse constant for self-inflicted hits (rocket jumps).
    pub self_base: f32,
    pub min_mass: i32,
    pub arena_multiplier: f32,
    /// Weight of the up vector blended into the push direction on the ground.
    pub grounded_lift: f32,
    pub airborne_lift: f32,
    pub max_impulse: f32,
    pub max_speed: f32,
    /// Quake III style knockback ceiling; knockback never exceeds the damage either.
    pub ruleset_cap: i32,
    /// Fixed knockback for instagib rail hits.
    pub instagib_rail: i32,
}

impl Default for KnockbackConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            base: 1000.0,
            self_base: 1200.0,
            min_mass: 50,
            arena_multiplier: 1.125,
            grounded_lift: 0.7,
            airborne_lift: 0.35,
            max_impulse: 1600.0,
            max_speed: 2000.0,
            ruleset_cap: 200,
            instagib_rail: 200,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArenaConfig {
    pub self_damage: bool,
    /// Whether self-inflicted damage is absorbed by armor.
    pub self_armor: bool,
    /// Damage dealt to enemies per score point.
    pub damage_per_point: i32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            self_damage: true,
            self_armor: false,
            damage_per_point: 100,
        }
    }
}

/// Fraction of incoming damage one armor tier absorbs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorInfo {
    pub normal: f32,
    pub energy: f32,
}

impl ArmorInfo {
    pub const fn new(normal: f32, energy: f32) -> Self {
        Self { normal, energy }
    }
}

/// Armor protection for every tier under one ruleset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorTable {
    pub jacket: ArmorInfo,
    pub combat: ArmorInfo,
    pub body: ArmorInfo,
}

impl ArmorTable {
    pub const QUAKE1: Self = Self {
        jacket: ArmorInfo::new(0.3, 0.3),
        combat: ArmorInfo::new(0.6, 0.6),
        body: ArmorInfo::new(0.8, 0.8),
    };

    pub const QUAKE2: Self = Self {
        jacket: ArmorInfo::new(0.3, 0.0),
        combat: ArmorInfo::new(0.6, 0.3),
        body: ArmorInfo::new(0.8, 0.6),
    };

    pub const QUAKE3_ARENA: Self = Self {
        jacket: ArmorInfo::new(0.66, 0.66),
        combat: ArmorInfo::new(0.66, 0.66),
        body: ArmorInfo::new(0.66, 0.66),
    };

    /// Same protection for every tier.
    pub const fn uniform(info: ArmorInfo) -> Self {
        Self {
            jacket: info,
            combat: info,
            body: info,
        }
    }

    pub fn get(&self, tier: ArmorTier) -> ArmorInfo {
        match tier {
            ArmorTier::Jacket => self.jacket,
            ArmorTier::Combat => self.combat,
            ArmorTier::Body => self.body,
        }
    }

    pub fn set(&mut self, tier: ArmorTier, info: ArmorInfo) {
        match tier {
            ArmorTier::Jacket => self.jacket = info,
            ArmorTier::Combat => self.combat = info,
            ArmorTier::Body => self.body = info,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArmorRules {
    pub quake1: ArmorTable,
    pub quake2: ArmorTable,
    pub quake3_arena: ArmorTable,
}

impl Default for ArmorRules {
    fn default() -> Self {
        Self {
            quake1: ArmorTable::QUAKE1,
            quake2: ArmorTable::QUAKE2,
            quake3_arena: ArmorTable::QUAKE3_ARENA,
        }
    }
}

impl ArmorRules {
    pub fn table(&self, ruleset: Ruleset) -> &ArmorTable {
        match ruleset {
            Ruleset::Quake1 => &self.quake1,
            Ruleset::Quake2 => &self.quake2,
            Ruleset::Quake3Arena => &self.quake3_arena,
        }
    }

    pub fn table_mut(&mut self, ruleset: Ruleset) -> &mut ArmorTable {
        match ruleset {
            Ruleset::Quake1 => &mut self.quake1,
            Ruleset::Quake2 => &mut self.quake2,
            Ruleset::Quake3Arena => &mut self.quake3_arena,
        }
    }
}

/// Points of damage absorbed per power cell.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PowerArmorConfig {
    pub screen_per_cell: i32,
    pub shield_per_cell: i32,
    pub shield_per_cell_deathmatch: i32,
    /// Minimum cosine between facing and hit direction for the screen to block.
    pub screen_cone: f32,
    /// How long the shell effect stays lit after absorbing a hit.
    pub active_ms: u64,
}

impl Default for PowerArmorConfig {
    fn default() -> Self {
        Self {
            screen_per_cell: 1,
            shield_per_cell: 2,
            shield_per_cell_deathmatch: 1,
            screen_cone: 0.3,
            active_ms: 200,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShieldConfig {
    /// Fraction of the remaining damage removed by the shield tech.
    pub reduction: f32,
}

impl Default for ShieldConfig {
    fn default() -> Self {
        Self { reduction: 0.5 }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RadiusConfig {
    /// Added to the push direction so splash throws bodies upward.
    pub lift: f32,
    /// Horizontal offset of the corner probes in the line-of-sight test.
    pub probe_offset: f32,
}

impl Default for RadiusConfig {
    fn default() -> Self {
        Self {
            lift: 24.0,
            probe_offset: 15.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NukeConfig {
    pub lethal_damage: i32,
    /// Flash warning for victims and clients with a clear view of the blast.
    pub warn_ms: u64,
    pub near_warn_ms: u64,
    pub far_warn_ms: u64,
    pub near_range: f32,
    /// Clients farther than this from the blast see no flash.
    pub warn_range: f32,
}

impl Default for NukeConfig {
    fn default() -> Self {
        Self {
            lethal_damage: 10_000,
            warn_ms: 2000,
            near_warn_ms: 1500,
            far_warn_ms: 1000,
            near_range: 2048.0,
            warn_range: 8192.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    pub pain_debounce_ms: u64,
    /// Silence window after spawn protection swallows a hit.
    pub spawn_protect_grace_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            pain_debounce_ms: 2000,
            spawn_protect_grace_ms: 1000,
        }
    }
}
