//! Authoritative combat state.
//!
//! The engine mutates this state only from inside a
//! [`WorldContext`](crate::WorldContext) call; everything else reads it.
pub mod types;

pub use types::{
    AiFlags, ArmorInventory, ArmorTier, ClientState, CombatStats, Combatant, CombatantKind,
    DamageIndicator, DamageIndicators, DamageSummary, DeathState, EntityFlags, EntityId,
    EntityTable, FrameDamage, GameTime, LevelStats, MonsterState, MoveType, ObjectDeath,
    ObjectState, OwnedSphere, PmoveType, PowerArmor, PowerArmorKind, SphereKind, Team,
    TimedEffect, TimedEffectKind, TimedEffects,
};

/// Everything the damage pipeline reads and writes for one level.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    /// Current server time; constant for the duration of a tick.
    pub time: GameTime,
    pub entities: EntityTable,
    pub level: LevelStats,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a combatant and returns its id.
    pub fn spawn(&mut self, combatant: Combatant) -> EntityId {
        let id = combatant.id;
        self.entities.insert(combatant);
        id
    }

    /// Moves the clock forward and sweeps expired timed effects.
    pub fn advance(&mut self, ms: u64) {
        self.time += ms;
        let now = self.time;
        for combatant in self.entities.iter_mut() {
            combatant.effects.clear_expired(now);
        }
    }

    /// Clears per-frame HUD feedback for every client.
    pub fn end_frame(&mut self) {
        for combatant in self.entities.iter_mut() {
            if let Some(client) = combatant.client_mut() {
                client.end_frame();
            }
        }
    }
}
