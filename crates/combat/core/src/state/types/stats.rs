use glam::Vec3;

use crate::damage::MeansOfDeath;
use crate::state::{EntityId, GameTime};

/// Per-combatant counters the engine increments.
///
/// Owned by the match collaborator for reporting; the engine only ever adds
/// to them (team kills and suicides subtract from `kills`/`score`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub damage_dealt: i32,
    pub damage_received: i32,
    pub team_damage: i32,
    pub kills: i32,
    pub deaths: i32,
    pub suicides: i32,
    pub score: i32,
    /// Clan Arena damage not yet converted into score.
    pub arena_carry: i32,
}

impl CombatStats {
    /// Adds enemy damage to the arena carry and converts whole chunks into score.
    ///
    /// Returns the number of points awarded.
    pub fn carry_arena_damage(&mut self, damage: i32, damage_per_point: i32) -> i32 {
        if damage <= 0 || damage_per_point <= 0 {
            return 0;
        }
        self.arena_carry = self.arena_carry.saturating_add(damage);
        let points = self.arena_carry / damage_per_point;
        self.arena_carry -= points * damage_per_point;
        self.score = self.score.saturating_add(points);
        points
    }
}

/// World-wide counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelStats {
    pub killed_monsters: u32,
}

/// What last hurt a monster badly enough to kill it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageSummary {
    pub blood: i32,
    pub knockback: i32,
    pub attacker: Option<EntityId>,
    pub inflictor: Option<EntityId>,
    pub from: Vec3,
    pub means: Option<MeansOfDeath>,
    pub at: GameTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_carry_awards_whole_points() {
        let mut stats = CombatStats::default();
        assert_eq!(stats.carry_arena_damage(80, 100), 0);
        assert_eq!(stats.carry_arena_damage(150, 100), 2);
        assert_eq!(stats.score, 2);
        assert_eq!(stats.arena_carry, 30);
    }
}
