mod armor;
mod combatant;
mod common;
mod effects;
mod entities;
mod feedback;
mod stats;

pub use armor::{ArmorInventory, ArmorTier, PowerArmor, PowerArmorKind};
pub use combatant::{
    AiFlags, ClientState, Combatant, CombatantKind, DeathState, EntityFlags, MonsterState,
    MoveType, ObjectDeath, ObjectState, OwnedSphere, PmoveType, SphereKind,
};
pub use common::{EntityId, GameTime, Team};
pub use effects::{TimedEffect, TimedEffectKind, TimedEffects};
pub use entities::EntityTable;
pub use feedback::{DamageIndicator, DamageIndicators, FrameDamage};
pub use stats::{CombatStats, DamageSummary, LevelStats};
