//! Power armor and plate armor absorption.
//!
//! Both stages take the damage still remaining and return how much they
//! absorbed; the caller subtracts it. Power armor always runs first.

use glam::Vec3;
use tracing::trace;

use super::DamageFlags;
use crate::config::{CombatConfig, Ruleset};
use crate::env::{CombatEffect, EffectSink, ImpactKind};
use crate::state::{Combatant, GameTime, PowerArmorKind};

/// Where and how the hit landed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArmorHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub flags: DamageFlags,
    pub now: GameTime,
}

/// Absorbs damage with the target's power screen or shield.
///
/// Energy damage is absorbed at half efficiency and burns cells twice as fast.
pub fn absorb_power_armor(
    target: &mut Combatant,
    hit: &ArmorHit,
    damage: i32,
    config: &CombatConfig,
    effects: &mut dyn EffectSink,
) -> i32 {
    if damage <= 0
        || hit
            .flags
            .intersects(DamageFlags::NO_ARMOR | DamageFlags::NO_POWER_ARMOR)
    {
        return 0;
    }
    if !target.is_player() && !target.is_monster() {
        return 0;
    }
    if !target.power_armor.is_up() {
        return 0;
    }

    let tuning = &config.power_armor;
    let (per_cell, spark, absorbable) = match target.power_armor.kind {
        PowerArmorKind::None => return 0,
        PowerArmorKind::Screen => {
            let toward_hit = (hit.point - target.origin).normalize_or_zero();
            if toward_hit.dot(target.facing) <= tuning.screen_cone {
                return 0;
            }
            (tuning.screen_per_cell, ImpactKind::ScreenSparks, damage / 3)
        }
        PowerArmorKind::Shield => {
            let per_cell = if config.rules.mode.is_deathmatch() {
                tuning.shield_per_cell_deathmatch
            } else {
                tuning.shield_per_cell
            };
            (per_cell, ImpactKind::ShieldSparks, damage)
        }
    };
    if per_cell <= 0 {
        return 0;
    }

    let energy = hit.flags.contains(DamageFlags::ENERGY);
    let mut save = target.power_armor.cells.saturating_mul(per_cell);
    if save <= 0 {
        return 0;
    }
    if energy {
        save = (save / 2).max(1);
    }
    save = save.min(absorbable);
    if save <= 0 {
        return 0;
    }

    let mut used = save / per_cell;
    if energy {
        used *= 2;
    }
    let used = used.max(1).min(target.power_armor.cells);

    effects.dispatch(CombatEffect::impact(spark, hit.point, hit.normal, save));
    target.power_armor_until = hit.now + tuning.active_ms;
    target.power_armor.cells -= used;
    debug_assert!(target.power_armor.cells >= 0);

    if target.power_armor.cells == 0 {
        target.power_armor.active = false;
        effects.dispatch(CombatEffect::PowerArmorDepleted { entity: target.id });
    }

    trace!(target = %target.id, save, cells_used = used, "power armor absorbed");
    save
}

/// Absorbs damage with plate armor from the ruleset's armor table.
pub fn absorb_armor(
    target: &mut Combatant,
    hit: &ArmorHit,
    damage: i32,
    ruleset: Ruleset,
    config: &CombatConfig,
    effects: &mut dyn EffectSink,
) -> i32 {
    if damage <= 0 || hit.flags.contains(DamageFlags::NO_ARMOR) {
        return 0;
    }
    let is_player = target.is_player();
    let Some(tier) = target.armor.active_tier(is_player) else {
        return 0;
    };

    let info = config.armor.table(ruleset).get(tier);
    let fraction = if hit.flags.contains(DamageFlags::ENERGY) {
        info.energy
    } else {
        info.normal
    };
    let pool = target.armor.get(tier);
    let save = ((fraction * damage as f32).ceil() as i32).min(pool);
    if save <= 0 {
        return 0;
    }

    target.armor.set(tier, pool - save);
    if !is_player && target.armor.get(tier) == 0 {
        target.armor.worn = None;
    }

    let spark = if hit.flags.contains(DamageFlags::BULLET) {
        ImpactKind::BulletSparks
    } else {
        ImpactKind::Sparks
    };
    effects.dispatch(CombatEffect::impact(spark, hit.point, hit.normal, save));

    trace!(target = %target.id, %tier, save, "armor absorbed");
    save
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ArmorInfo, GameMode, MatchRules};
    use crate::state::{ArmorInventory, ArmorTier, EntityId, PowerArmor};

    fn hit(flags: DamageFlags) -> ArmorHit {
        ArmorHit {
            point: Vec3::new(10.0, 0.0, 0.0),
            normal: Vec3::ZERO,
            flags,
            now: GameTime(1000),
        }
    }

    fn config_with(mode: GameMode) -> CombatConfig {
        CombatConfig::with_rules(MatchRules::new(mode, Ruleset::Quake2))
    }

    #[test]
    fn armor_rounds_absorption_up() {
        let mut config = config_with(GameMode::FreeForAll);
        let table = config.armor.table_mut(Ruleset::Quake2);
        table.set(ArmorTier::Body, ArmorInfo::new(0.8, 0.6));
        table.set(ArmorTier::Jacket, ArmorInfo::new(0.33, 0.0));

        let mut sink = Vec::new();
        let mut body = Combatant::player(EntityId(1))
            .with_armor(ArmorInventory::wearing(ArmorTier::Body, 100));
        assert_eq!(
            absorb_armor(&mut body, &hit(DamageFlags::empty()), 5, Ruleset::Quake2, &config, &mut sink),
            4
        );

        let mut jacket = Combatant::player(EntityId(2))
            .with_armor(ArmorInventory::wearing(ArmorTier::Jacket, 100));
        assert_eq!(
            absorb_armor(&mut jacket, &hit(DamageFlags::empty()), 5, Ruleset::Quake2, &config, &mut sink),
            2
        );
        assert_eq!(jacket.armor.jacket, 98);
    }

    #[test]
    fn armor_save_is_capped_by_pool_and_clears_worn_tier_for_monsters() {
        let config = config_with(GameMode::SinglePlayer);
        let mut sink = Vec::new();
        let mut monster = Combatant::monster(EntityId(3))
            .with_armor(ArmorInventory::wearing(ArmorTier::Body, 5));

        let save = absorb_armor(
            &mut monster,
            &hit(DamageFlags::BULLET),
            100,
            Ruleset::Quake2,
            &config,
            &mut sink,
        );

        assert_eq!(save, 5);
        assert_eq!(monster.armor.body, 0);
        assert_eq!(monster.armor.worn, None);
        assert!(matches!(
            sink.as_slice(),
            [CombatEffect::Impact {
                kind: ImpactKind::BulletSparks,
                count: 5,
                ..
            }]
        ));
    }

    #[test]
    fn energy_uses_energy_fraction() {
        let config = config_with(GameMode::FreeForAll);
        let mut sink = Vec::new();
        let mut jacket = Combatant::player(EntityId(1))
            .with_armor(ArmorInventory::wearing(ArmorTier::Jacket, 50));

        // Quake 2 jacket armor does nothing against energy weapons.
        let save = absorb_armor(
            &mut jacket,
            &hit(DamageFlags::ENERGY),
            40,
            Ruleset::Quake2,
            &config,
            &mut sink,
        );
        assert_eq!(save, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn shield_cost_depends_on_deathmatch() {
        let mut sink = Vec::new();

        let mut dm = Combatant::player(EntityId(1))
            .with_power_armor(PowerArmor::new(PowerArmorKind::Shield, 100));
        let save = absorb_power_armor(
            &mut dm,
            &hit(DamageFlags::empty()),
            30,
            &config_with(GameMode::FreeForAll),
            &mut sink,
        );
        assert_eq!(save, 30);
        assert_eq!(dm.power_armor.cells, 70);

        let mut sp = Combatant::player(EntityId(2))
            .with_power_armor(PowerArmor::new(PowerArmorKind::Shield, 100));
        let save = absorb_power_armor(
            &mut sp,
            &hit(DamageFlags::empty()),
            30,
            &config_with(GameMode::SinglePlayer),
            &mut sink,
        );
        assert_eq!(save, 30);
        assert_eq!(sp.power_armor.cells, 85);
        assert_eq!(sp.power_armor_until, GameTime(1200));
    }

    #[test]
    fn energy_halves_save_and_doubles_cost() {
        let mut sink = Vec::new();
        let mut target = Combatant::player(EntityId(1))
            .with_power_armor(PowerArmor::new(PowerArmorKind::Shield, 10));

        let save = absorb_power_armor(
            &mut target,
            &hit(DamageFlags::ENERGY),
            30,
            &config_with(GameMode::FreeForAll),
            &mut sink,
        );

        // 10 cells * 1 point = 10, halved for energy.
        assert_eq!(save, 5);
        assert_eq!(target.power_armor.cells, 0);
        assert!(!target.power_armor.active);
        assert!(
            sink.iter()
                .any(|e| matches!(e, CombatEffect::PowerArmorDepleted { .. }))
        );
    }

    #[test]
    fn screen_only_blocks_frontal_hits() {
        let config = config_with(GameMode::FreeForAll);
        let mut sink = Vec::new();
        let mut target = Combatant::player(EntityId(1))
            .facing(Vec3::X)
            .with_power_armor(PowerArmor::new(PowerArmorKind::Screen, 50));

        let mut behind = hit(DamageFlags::empty());
        behind.point = Vec3::new(-10.0, 0.0, 0.0);
        assert_eq!(absorb_power_armor(&mut target, &behind, 30, &config, &mut sink), 0);

        let front = hit(DamageFlags::empty());
        assert_eq!(absorb_power_armor(&mut target, &front, 30, &config, &mut sink), 10);
        assert_eq!(target.power_armor.cells, 40);
    }

    #[test]
    fn armor_bypass_flags_skip_power_armor() {
        let config = config_with(GameMode::FreeForAll);
        let mut sink = Vec::new();
        let mut target = Combatant::player(EntityId(1))
            .with_power_armor(PowerArmor::new(PowerArmorKind::Shield, 50));

        for flags in [DamageFlags::NO_ARMOR, DamageFlags::NO_POWER_ARMOR] {
            assert_eq!(absorb_power_armor(&mut target, &hit(flags), 30, &config, &mut sink), 0);
        }
        assert_eq!(target.power_armor.cells, 50);
    }
}
