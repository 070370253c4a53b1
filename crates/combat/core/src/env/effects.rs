//! Fire-and-forget feedback emitted while resolving damage.

use glam::Vec3;

use crate::damage::MeansOfDeath;
use crate::state::EntityId;

/// Temp-entity style impact effect.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ImpactKind {
    Blood,
    MoreBlood,
    Sparks,
    BulletSparks,
    ElectricSparks,
    ScreenSparks,
    ShieldSparks,
}

/// Sounds played when a protection swallows a hit.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProtectionCue {
    BattleSuit,
    Invulnerable,
    SpawnProtection,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEffect {
    Impact {
        kind: ImpactKind,
        point: Vec3,
        normal: Vec3,
        count: u8,
    },
    Protection {
        entity: EntityId,
        cue: ProtectionCue,
    },
    PowerArmorDepleted {
        entity: EntityId,
    },
    /// Owner is being hurt; the sphere may react before the hit lands.
    SphereAlert {
        sphere: EntityId,
        owner: EntityId,
        attacker: EntityId,
    },
    /// A defender sphere fires back at whoever hurt its owner.
    SphereRetaliate {
        sphere: EntityId,
        owner: EntityId,
        attacker: EntityId,
    },
    TeamDamageWarning {
        attacker: EntityId,
        target: EntityId,
        amount: i32,
    },
    Gib {
        entity: EntityId,
        point: Vec3,
    },
    Obituary {
        target: EntityId,
        inflictor: EntityId,
        attacker: EntityId,
        means: MeansOfDeath,
        friendly_fire: bool,
    },
}

impl CombatEffect {
    /// Impact effect whose size follows the damage, saturated to one byte.
    pub fn impact(kind: ImpactKind, point: Vec3, normal: Vec3, amount: i32) -> Self {
        let count = amount.clamp(0, i32::from(u8::MAX));
        Self::Impact {
            kind,
            point,
            normal,
            count: u8::try_from(count).unwrap_or(u8::MAX),
        }
    }
}

/// Receives effects produced by the engine.
pub trait EffectSink {
    fn dispatch(&mut self, effect: CombatEffect);
}

impl EffectSink for Vec<CombatEffect> {
    fn dispatch(&mut self, effect: CombatEffect) {
        self.push(effect);
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EffectSink for NullSink {
    fn dispatch(&mut self, _effect: CombatEffect) {}
}
