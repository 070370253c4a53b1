//! Damage events and their results.

use bitflags::bitflags;
use glam::Vec3;

use crate::state::{Combatant, EntityId};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DamageFlags: u16 {
        /// Bypasses regular and power armor.
        const NO_ARMOR       = 1 << 0;
        const NO_POWER_ARMOR = 1 << 1;
        const NO_KNOCKBACK   = 1 << 2;
        /// Ignores god mode, invulnerability and the other protections.
        const NO_PROTECTION  = 1 << 3;
        /// No directional HUD marker.
        const NO_INDICATOR   = 1 << 4;
        /// Lasers and blasters; armor protects differently.
        const ENERGY         = 1 << 5;
        /// Splash damage from an explosion.
        const RADIUS         = 1 << 6;
        /// Full damage goes through even after armor absorbed some.
        const DESTROY_ARMOR  = 1 << 7;
        const BULLET         = 1 << 8;
    }
}

impl DamageFlags {
    /// Flags forced on damage mirrored back by an empathy shield.
    pub const REFLECTED: Self = Self::NO_PROTECTION
        .union(Self::NO_KNOCKBACK)
        .union(Self::NO_INDICATOR);
}

/// Weapon or hazard responsible for a hit.
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
pub enum MeansOfDeath {
    #[default]
    Unknown,
    Blaster,
    Shotgun,
    SuperShotgun,
    Machinegun,
    Chaingun,
    Grenade,
    GrenadeSplash,
    Rocket,
    RocketSplash,
    Hyperblaster,
    Railgun,
    Bfg,
    BfgBlast,
    HandGrenade,
    Chainfist,
    Telefrag,
    /// Area-wide doomsday device; exempt from friendly-fire scaling.
    Nuke,
    /// Damage mirrored by an empathy shield.
    Empathy,
    Barrel,
    Explosive,
    Water,
    Slime,
    Lava,
    Crush,
    Falling,
    Suicide,
    TriggerHurt,
}

/// Means of death plus whether the hit turned out to be team damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cause {
    pub means: MeansOfDeath,
    pub friendly_fire: bool,
}

impl From<MeansOfDeath> for Cause {
    fn from(means: MeansOfDeath) -> Self {
        Self {
            means,
            friendly_fire: false,
        }
    }
}

/// A single hit, from the caller's point of view.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageEvent {
    pub target: EntityId,
    /// Object that physically dealt the damage (rocket, barrel).
    pub inflictor: EntityId,
    /// Entity credited with the damage.
    pub attacker: EntityId,
    pub direction: Vec3,
    pub point: Vec3,
    pub normal: Vec3,
    pub amount: i32,
    pub knockback: i32,
    pub flags: DamageFlags,
    pub cause: Cause,
}

impl DamageEvent {
    /// Direct hit where the attacker is also the inflictor.
    pub fn new(target: EntityId, attacker: EntityId, amount: i32, means: MeansOfDeath) -> Self {
        Self {
            target,
            inflictor: attacker,
            attacker,
            direction: Vec3::ZERO,
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
            amount,
            knockback: 0,
            flags: DamageFlags::empty(),
            cause: Cause::from(means),
        }
    }

    /// Environmental damage credited to the world.
    pub fn world(target: EntityId, amount: i32, means: MeansOfDeath) -> Self {
        Self::new(target, EntityId::WORLD, amount, means)
    }

    pub fn inflicted_by(mut self, inflictor: EntityId) -> Self {
        self.inflictor = inflictor;
        self
    }

    pub fn with_direction(mut self, direction: Vec3) -> Self {
        self.direction = direction;
        self
    }

    pub fn at_point(mut self, point: Vec3) -> Self {
        self.point = point;
        self
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal;
        self
    }

    pub fn with_knockback(mut self, knockback: i32) -> Self {
        self.knockback = knockback;
        self
    }

    pub fn with_flags(mut self, flags: DamageFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn is_self_inflicted(&self) -> bool {
        self.target == self.attacker
    }

    /// The hit an empathy shield on `shielded` sends back to `attacker`.
    pub fn reflection(shielded: EntityId, attacker: EntityId, point: Vec3, amount: i32) -> Self {
        Self {
            target: attacker,
            inflictor: shielded,
            attacker: shielded,
            direction: Vec3::ZERO,
            point,
            normal: Vec3::ZERO,
            amount,
            knockback: 0,
            flags: DamageFlags::REFLECTED,
            cause: Cause::from(MeansOfDeath::Empathy),
        }
    }
}

/// The object an area effect originates from.
///
/// Projectiles usually are not combatants, so their position travels with
/// the call rather than being looked up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inflictor {
    pub id: EntityId,
    pub origin: Vec3,
    pub mins: Vec3,
    pub maxs: Vec3,
}

impl Inflictor {
    /// Point-sized inflictor.
    pub fn point(id: EntityId, origin: Vec3) -> Self {
        Self {
            id,
            origin,
            mins: Vec3::ZERO,
            maxs: Vec3::ZERO,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.origin + (self.mins + self.maxs) * 0.5
    }
}

impl From<&Combatant> for Inflictor {
    fn from(combatant: &Combatant) -> Self {
        Self {
            id: combatant.id,
            origin: combatant.origin,
            mins: combatant.mins,
            maxs: combatant.maxs,
        }
    }
}

/// What a damage call did to its target.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DamageReport {
    /// Health actually removed (or that would have been, for bodies that
    /// cannot lose health right now).
    pub take: i32,
    /// Absorbed by god mode, invulnerability or another protection.
    pub protection_saved: i32,
    pub power_armor_saved: i32,
    pub armor_saved: i32,
    /// Velocity change applied to the target.
    pub knockback: Option<Vec3>,
    /// The target was alive before this hit and is dead after it.
    pub fatal: bool,
    /// Amount mirrored onto the attacker by an empathy shield.
    pub reflected: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflection_is_shielded_from_further_reflection() {
        let event = DamageEvent::reflection(EntityId(2), EntityId(1), Vec3::ZERO, 7);
        assert_eq!(event.target, EntityId(1));
        assert_eq!(event.attacker, EntityId(2));
        assert!(event.flags.contains(DamageFlags::NO_PROTECTION));
        assert!(event.flags.contains(DamageFlags::NO_KNOCKBACK));
        assert!(event.flags.contains(DamageFlags::NO_INDICATOR));
        assert_eq!(event.knockback, 0);
        assert_eq!(event.cause.means, MeansOfDeath::Empathy);
    }

    #[test]
    fn means_of_death_parse_from_snake_case() {
        assert_eq!(
            "rocket_splash".parse::<MeansOfDeath>(),
            Ok(MeansOfDeath::RocketSplash)
        );
        assert_eq!(MeansOfDeath::TriggerHurt.as_ref(), "trigger_hurt");
    }
}
