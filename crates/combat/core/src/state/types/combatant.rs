//! Damageable entities and their per-kind state.

use bitflags::bitflags;
use glam::Vec3;

use super::{
    ArmorInventory, CombatStats, DamageIndicators, DamageSummary, EntityId, FrameDamage,
    GameTime, PowerArmor, Team, TimedEffectKind, TimedEffects,
};

bitflags! {
    /// Per-entity behaviour switches that the damage pipeline honours.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EntityFlags: u16 {
        const GOD_MODE             = 1 << 0;
        const NO_KNOCKBACK         = 1 << 1;
        /// Bleeds sparks instead of blood.
        const MECHANICAL           = 1 << 2;
        /// Corpse that only takes knockback on the tick it died.
        const ALIVE_KNOCKBACK_ONLY = 1 << 3;
        const NO_GIB               = 1 << 4;
        /// Carries the resistance tech.
        const SHIELD_TECH          = 1 << 5;
        /// Cannot be drained by vampiric attackers.
        const VAMPIRIC_EXEMPT      = 1 << 6;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AiFlags: u8 {
        /// Currently healing the monster stored in `enemy`.
        const MEDIC        = 1 << 0;
        /// Being brought back by a medic.
        const RESURRECTING = 1 << 1;
        /// Friendly to players; not counted towards level kills.
        const GOOD_GUY     = 1 << 2;
        /// Chasing a noise rather than a visible enemy.
        const SOUND_TARGET = 1 << 3;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveType {
    None,
    Noclip,
    /// Brush model moved by the mover code (doors, platforms).
    Push,
    Stop,
    #[default]
    Walk,
    Step,
    Fly,
    Toss,
    Bounce,
}

impl MoveType {
    /// Whether impulses can move this entity.
    pub const fn is_physical(self) -> bool {
        !matches!(
            self,
            MoveType::None | MoveType::Noclip | MoveType::Push | MoveType::Stop
        )
    }
}

/// Player movement state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PmoveType {
    #[default]
    Normal,
    Spectator,
    Dead,
    Gib,
    Freeze,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeathState {
    #[default]
    Alive,
    Dead,
    Gibbed,
    /// Removed from play (exploded, dissolved).
    Destroyed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SphereKind {
    Defender,
    Hunter,
    Vengeance,
}

/// Companion sphere a player owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnedSphere {
    pub id: EntityId,
    pub kind: SphereKind,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectDeath {
    #[default]
    Remove,
    /// Blows up, dealing splash damage around its position.
    Explode { damage: i32, radius: f32 },
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClientState {
    pub pmove: PmoveType,
    /// Frozen in freeze tag; takes no damage but double knockback.
    pub frozen: bool,
    pub knockback_until: GameTime,
    pub frame: FrameDamage,
    pub indicators: DamageIndicators,
    /// Screen flash warning after a nuke.
    pub nuke_until: GameTime,
    pub respawn_requested: bool,
}

impl ClientState {
    /// Clears per-frame feedback once it has been sent.
    pub fn end_frame(&mut self) {
        self.frame = FrameDamage::default();
        self.indicators.clear();
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterState {
    pub ai_flags: AiFlags,
    pub enemy: Option<EntityId>,
    pub old_enemy: Option<EntityId>,
    /// Tick the current enemy was acquired by surprise.
    pub surprise_time: Option<GameTime>,
    pub invincible_until: GameTime,
    /// Medic currently resurrecting this monster.
    pub healer: Option<EntityId>,
    pub summary: DamageSummary,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectState {
    pub on_death: ObjectDeath,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantKind {
    Player(ClientState),
    Monster(MonsterState),
    Object(ObjectState),
}

/// Anything that can be hurt.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: EntityId,
    pub kind: CombatantKind,
    pub take_damage: bool,
    pub health: i32,
    pub max_health: i32,
    /// Overheal consumed before health.
    pub health_bonus: i32,
    pub armor: ArmorInventory,
    pub power_armor: PowerArmor,
    pub origin: Vec3,
    pub mins: Vec3,
    pub maxs: Vec3,
    /// Unit view direction.
    pub facing: Vec3,
    pub velocity: Vec3,
    pub mass: i32,
    pub movetype: MoveType,
    pub on_ground: bool,
    pub flags: EntityFlags,
    pub effects: TimedEffects,
    pub team: Team,
    pub death: DeathState,
    pub dead_time: GameTime,
    pub pain_debounce_until: GameTime,
    pub power_armor_until: GameTime,
    pub sphere: Option<OwnedSphere>,
    pub stats: CombatStats,
}

impl Combatant {
    fn new(id: EntityId, kind: CombatantKind) -> Self {
        Self {
            id,
            kind,
            take_damage: true,
            health: 100,
            max_health: 100,
            health_bonus: 0,
            armor: ArmorInventory::empty(),
            power_armor: PowerArmor::default(),
            origin: Vec3::ZERO,
            mins: Vec3::new(-16.0, -16.0, -24.0),
            maxs: Vec3::new(16.0, 16.0, 32.0),
            facing: Vec3::X,
            velocity: Vec3::ZERO,
            mass: 200,
            movetype: MoveType::Walk,
            on_ground: true,
            flags: EntityFlags::empty(),
            effects: TimedEffects::empty(),
            team: Team::None,
            death: DeathState::Alive,
            dead_time: GameTime::ZERO,
            pain_debounce_until: GameTime::ZERO,
            power_armor_until: GameTime::ZERO,
            sphere: None,
            stats: CombatStats::default(),
        }
    }

    pub fn player(id: EntityId) -> Self {
        Self::new(id, CombatantKind::Player(ClientState::default()))
    }

    pub fn monster(id: EntityId) -> Self {
        Self {
            movetype: MoveType::Step,
            ..Self::new(id, CombatantKind::Monster(MonsterState::default()))
        }
    }

    pub fn object(id: EntityId, on_death: ObjectDeath) -> Self {
        Self {
            health: 10,
            max_health: 10,
            mass: 400,
            movetype: MoveType::Step,
            mins: Vec3::new(-16.0, -16.0, 0.0),
            maxs: Vec3::new(16.0, 16.0, 40.0),
            ..Self::new(id, CombatantKind::Object(ObjectState { on_death }))
        }
    }

    // ===== builders =====

    pub fn at(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self.max_health = self.max_health.max(health);
        self
    }

    pub fn with_team(mut self, team: Team) -> Self {
        self.team = team;
        self
    }

    pub fn with_armor(mut self, armor: ArmorInventory) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_power_armor(mut self, power_armor: PowerArmor) -> Self {
        self.power_armor = power_armor;
        self
    }

    pub fn with_flags(mut self, flags: EntityFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_effect(mut self, kind: TimedEffectKind, expires_at: GameTime) -> Self {
        self.effects.add(kind, expires_at);
        self
    }

    pub fn with_mass(mut self, mass: i32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_bounds(mut self, mins: Vec3, maxs: Vec3) -> Self {
        self.mins = mins;
        self.maxs = maxs;
        self
    }

    pub fn facing(mut self, facing: Vec3) -> Self {
        self.facing = facing.normalize_or_zero();
        self
    }

    pub fn airborne(mut self) -> Self {
        self.on_ground = false;
        self
    }

    pub fn with_sphere(mut self, sphere: OwnedSphere) -> Self {
        self.sphere = Some(sphere);
        self
    }

    // ===== queries =====

    pub fn is_player(&self) -> bool {
        matches!(self.kind, CombatantKind::Player(_))
    }

    pub fn is_monster(&self) -> bool {
        matches!(self.kind, CombatantKind::Monster(_))
    }

    pub fn client(&self) -> Option<&ClientState> {
        match &self.kind {
            CombatantKind::Player(client) => Some(client),
            _ => None,
        }
    }

    pub fn client_mut(&mut self) -> Option<&mut ClientState> {
        match &mut self.kind {
            CombatantKind::Player(client) => Some(client),
            _ => None,
        }
    }

    pub fn monster_state(&self) -> Option<&MonsterState> {
        match &self.kind {
            CombatantKind::Monster(monster) => Some(monster),
            _ => None,
        }
    }

    pub fn monster_state_mut(&mut self) -> Option<&mut MonsterState> {
        match &mut self.kind {
            CombatantKind::Monster(monster) => Some(monster),
            _ => None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.death == DeathState::Alive
    }

    pub fn is_frozen(&self) -> bool {
        self.client().is_some_and(|client| client.frozen)
    }

    /// Invulnerability powerup for players, scripted window for monsters.
    pub fn is_invincible(&self, now: GameTime) -> bool {
        match &self.kind {
            CombatantKind::Player(_) => self.effects.has(TimedEffectKind::Invulnerability, now),
            CombatantKind::Monster(monster) => monster.invincible_until > now,
            CombatantKind::Object(_) => false,
        }
    }

    pub fn abs_min(&self) -> Vec3 {
        self.origin + self.mins
    }

    pub fn abs_max(&self) -> Vec3 {
        self.origin + self.maxs
    }

    /// Centre of the bounding box in world space.
    pub fn center(&self) -> Vec3 {
        self.origin + (self.mins + self.maxs) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_physical_movetypes_reject_impulses() {
        assert!(!MoveType::Push.is_physical());
        assert!(!MoveType::Noclip.is_physical());
        assert!(MoveType::Toss.is_physical());
    }

    #[test]
    fn end_frame_clears_feedback() {
        let mut client = ClientState::default();
        client.frame.blood = 12;
        client.indicators.record(Vec3::ONE, 12, 0, 0);
        client.end_frame();

        assert!(client.frame.is_empty());
        assert!(client.indicators.is_empty());
    }

    #[test]
    fn monster_invincibility_window_is_exclusive() {
        let mut monster = Combatant::monster(EntityId(3));
        if let Some(state) = monster.monster_state_mut() {
            state.invincible_until = GameTime(500);
        }
        assert!(monster.is_invincible(GameTime(499)));
        assert!(!monster.is_invincible(GameTime(500)));
    }
}
