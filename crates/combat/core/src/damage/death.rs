//! Per-kind death behaviour.

use glam::Vec3;
use tracing::debug;

use super::MeansOfDeath;
use crate::config::CombatConfig;
use crate::state::{Combatant, CombatantKind, EntityFlags, EntityId, GameTime, ObjectDeath};

/// Context handed to a dying entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KillInfo {
    pub inflictor: EntityId,
    pub attacker: EntityId,
    pub damage: i32,
    pub point: Vec3,
    pub means: MeansOfDeath,
    pub now: GameTime,
}

/// What happens to the body after it dies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeathOutcome {
    /// Body stays around and can still be shot.
    Corpse,
    /// Blown apart; nothing left to damage.
    Gibbed,
    Removed,
    /// Explodes, dealing splash damage around its position.
    Detonate { damage: i32, radius: f32 },
}

/// Capability of reacting to being killed.
pub trait Damageable {
    fn on_killed(&mut self, info: &KillInfo) -> DeathOutcome;
}

impl Damageable for Combatant {
    fn on_killed(&mut self, info: &KillInfo) -> DeathOutcome {
        let gib = self.health < CombatConfig::GIB_HEALTH && !self.flags.contains(EntityFlags::NO_GIB);

        let outcome = match &self.kind {
            CombatantKind::Player(client) if client.frozen => DeathOutcome::Corpse,
            CombatantKind::Player(_) | CombatantKind::Monster(_) => {
                if gib {
                    DeathOutcome::Gibbed
                } else {
                    DeathOutcome::Corpse
                }
            }
            CombatantKind::Object(object) => match object.on_death {
                ObjectDeath::Remove => DeathOutcome::Removed,
                ObjectDeath::Explode { damage, radius } => DeathOutcome::Detonate { damage, radius },
            },
        };

        debug!(
            target = %self.id,
            attacker = %info.attacker,
            means = %info.means,
            health = self.health,
            ?outcome,
            "killed"
        );
        outcome
    }
}
