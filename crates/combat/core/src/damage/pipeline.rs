//! The damage pipeline.
//!
//! A hit runs through a fixed sequence of modifiers. The order matters:
//! knockback is resolved from the scaled amount before self damage is halved,
//! protections run before armor, and armor runs before the secondary
//! protections. Stages only ever look at the amount still remaining.

use tracing::{debug, trace};

use super::armor::{ArmorHit, absorb_armor, absorb_power_armor};
use super::knockback::{KnockbackInput, apply_knockback};
use super::protection::{ProtectionQuery, ProtectionReason, evaluate_protection};
use super::{DamageEvent, DamageFlags, DamageReport, MeansOfDeath};
use crate::config::{CombatConfig, GameMode, Ruleset, Skill};
use crate::context::WorldContext;
use crate::env::{CombatEffect, ImpactKind, ProtectionCue};
use crate::state::{AiFlags, Combatant, EntityFlags, EntityId, SphereKind, TimedEffectKind};

/// Halves a positive amount without letting it reach zero.
fn halve_floor_one(amount: i32) -> i32 {
    if amount > 0 { (amount / 2).max(1) } else { amount }
}

fn halve_ceil(amount: i32) -> i32 {
    (amount + 1) / 2
}

fn scale_amount(amount: i32, scale: f32) -> i32 {
    if scale <= 0.0 {
        0
    } else {
        (amount as f32 * scale) as i32
    }
}

impl WorldContext<'_> {
    /// Resolves one hit against its target.
    ///
    /// Missing targets and targets that cannot take damage are ignored.
    pub fn damage(&mut self, mut event: DamageEvent) -> DamageReport {
        let mut report = DamageReport::default();
        let now = self.state.time;
        let config = self.env.config;
        let rules = &config.rules;

        // Guard.
        let Some(target) = self.state.entities.get(event.target) else {
            return report;
        };
        if !target.take_damage {
            return report;
        }

        let self_hit = event.is_self_inflicted();
        let attacker = self.state.entities.get(event.attacker);
        let attacker_is_client = attacker.is_some_and(Combatant::is_player);
        let attacker_is_monster = attacker.is_some_and(Combatant::is_monster);
        let attacker_damageable = attacker.is_some_and(|attacker| attacker.take_damage);
        let target_is_client = target.is_player();

        // Friendly fire.
        if !self_hit
            && attacker.is_some_and(|attacker| self.env.teams.same_team(target, attacker, now))
        {
            event.cause.friendly_fire = true;
            if event.cause.means != MeansOfDeath::Nuke {
                event.amount = (event.amount as f32 * config.damage.friendly_fire_scale) as i32;
            }
            debug!(
                target = %event.target,
                attacker = %event.attacker,
                amount = event.amount,
                "friendly fire"
            );
        }

        // Difficulty.
        if rules.mode == GameMode::SinglePlayer && rules.skill == Skill::Easy && target_is_client
        {
            event.amount = halve_floor_one(event.amount);
        }

        // Global scale.
        let scale = if attacker_is_monster {
            config.damage.ai_scale
        } else {
            config.damage.player_scale
        };
        event.amount = scale_amount(event.amount, scale);
        let zero_scale = scale <= 0.0;

        // Defender sphere.
        if target
            .sphere
            .is_some_and(|sphere| sphere.kind == SphereKind::Defender)
        {
            event.amount /= 2;
        }

        // Alpha strike.
        let surprised = !event.flags.contains(DamageFlags::RADIUS)
            && attacker_is_client
            && target.health > 0
            && target
                .monster_state()
                .is_some_and(|monster| monster.enemy.is_none() || monster.surprise_time == Some(now));
        if surprised {
            event.amount = event.amount.saturating_mul(2);
        }

        // Knockback modifiers.
        if rules.ruleset == Ruleset::Quake3Arena {
            event.knockback = event
                .knockback
                .min(event.amount.min(config.knockback.ruleset_cap));
        }
        if target.is_frozen() {
            event.knockback = event.knockback.saturating_mul(2);
        }
        if target.flags.contains(EntityFlags::NO_KNOCKBACK)
            || (target.flags.contains(EntityFlags::ALIVE_KNOCKBACK_ONLY) && target.dead_time != now)
        {
            event.knockback = 0;
        }
        if rules.instagib && event.cause.means == MeansOfDeath::Railgun {
            event.knockback = config.knockback.instagib_rail;
        }

        let self_damage_disabled =
            !rules.self_damage || (rules.mode.is_arena() && !config.arena.self_damage);

        let query = ProtectionQuery {
            has_client: target_is_client,
            combat_disabled: rules.combat_disabled,
            mode_no_damage: rules.mode.deals_no_damage(),
            no_protection: event.flags.contains(DamageFlags::NO_PROTECTION),
            self_damage_disabled: self_hit && self_damage_disabled,
            battle_suit: target.effects.has(TimedEffectKind::BattleSuit, now),
            radius: event.flags.contains(DamageFlags::RADIUS),
            god_mode: target.flags.contains(EntityFlags::GOD_MODE),
            invincible: target.is_invincible(now),
            pain_debounce_expired: target.pain_debounce_until <= now,
        };

        let Some(target) = self.state.entities.get_mut(event.target) else {
            return report;
        };
        if surprised {
            if let Some(monster) = target.monster_state_mut() {
                monster.surprise_time = Some(now);
            }
        }

        report.knockback = apply_knockback(
            target,
            &KnockbackInput {
                magnitude: event.knockback,
                direction: event.direction,
                self_inflicted: self_hit,
                suppressed: event.flags.contains(DamageFlags::NO_KNOCKBACK),
                arena: rules.mode.is_arena(),
            },
            &config.knockback,
            now,
        );

        // Self damage.
        if self_hit {
            event.amount = if self_damage_disabled {
                0
            } else {
                halve_floor_one(event.amount)
            };
        }
        let full_amount = event.amount;
        let mut take = event.amount;
        trace!(target = %event.target, take, knockback = event.knockback, "scaled");

        // Protections.
        let verdict = evaluate_protection(&query);
        let mut vetoed = false;
        if verdict.prevented {
            report.protection_saved = take;
            take = 0;
            vetoed = true;
            debug!(target = %event.target, reason = ?verdict.reason, "damage prevented");
        }
        if let Some(cue) = verdict.cue {
            self.effects.dispatch(CombatEffect::Protection {
                entity: event.target,
                cue,
            });
        }
        if verdict.reset_pain_debounce {
            target.pain_debounce_until = now + config.timing.pain_debounce_ms;
        }
        if verdict.reason == Some(ProtectionReason::GodMode) {
            self.effects.dispatch(CombatEffect::impact(
                ImpactKind::Sparks,
                event.point,
                event.normal,
                report.protection_saved,
            ));
        }

        if target.is_frozen() {
            take = 0;
            vetoed = true;
        }

        let target_health = target.health;
        let vampiric_exempt = target.flags.contains(EntityFlags::VAMPIRIC_EXEMPT);

        // Vampiric drain.
        if config.vampiric.enabled
            && !self_hit
            && !event.cause.friendly_fire
            && !vampiric_exempt
            && take > 0
        {
            self.drain(&event, take, target_health);
        }

        let Some(target) = self.state.entities.get_mut(event.target) else {
            return report;
        };

        // Armor.
        let arena_self_hit = self_hit && rules.mode.is_arena() && !config.arena.self_armor;
        if !vetoed && !arena_self_hit {
            let hit = ArmorHit {
                point: event.point,
                normal: event.normal,
                flags: event.flags,
                now,
            };
            report.power_armor_saved = absorb_power_armor(target, &hit, take, config, self.effects);
            take -= report.power_armor_saved;
            report.armor_saved = absorb_armor(target, &hit, take, rules.ruleset, config, self.effects);
            take -= report.armor_saved;
        }

        // Secondary protections.
        let mut reflect = 0;
        if !vetoed && !event.flags.contains(DamageFlags::NO_PROTECTION) {
            if target.flags.contains(EntityFlags::SHIELD_TECH) && take > 0 {
                take -= (take as f32 * config.shield.reduction) as i32;
            }

            if target.effects.has(TimedEffectKind::SpawnProtection, now) && take > 0 {
                report.protection_saved += take;
                take = 0;
                vetoed = true;
                target.pain_debounce_until = now + config.timing.spawn_protect_grace_ms;
                self.effects.dispatch(CombatEffect::Protection {
                    entity: event.target,
                    cue: ProtectionCue::SpawnProtection,
                });
            }

            if target.effects.has(TimedEffectKind::BattleSuit, now) {
                take = halve_ceil(take);
            }

            if target.effects.has(TimedEffectKind::Empathy, now)
                && !self_hit
                && attacker_damageable
                && take > 0
            {
                take = halve_ceil(take);
                reflect = take;
            }
        }

        // Armor-piercing hits ignore what armor absorbed.
        let god_mode = target.flags.contains(EntityFlags::GOD_MODE);
        if event.flags.contains(DamageFlags::DESTROY_ARMOR) && !god_mode && !vetoed {
            take = full_amount;
        }
        let target_alive = target.is_alive();

        if reflect > 0 {
            debug!(from = %event.target, to = %event.attacker, amount = reflect, "empathy reflection");
            report.reflected = reflect;
            self.damage(DamageEvent::reflection(
                event.target,
                event.attacker,
                event.point,
                reflect,
            ));
        }

        if target_alive && take > 0 {
            self.score_hit(&event, take);
        }

        report.take = take;
        let fatal = self.apply_damage(&event, take);
        debug_assert!(!zero_scale || report.take == 0);
        if fatal {
            report.fatal = true;
            return report;
        }

        self.after_hit(&event, &report);
        report
    }

    /// Heals the attacker by a share of the damage dealt.
    fn drain(&mut self, event: &DamageEvent, take: i32, target_health: i32) {
        let config = &self.env.config.vampiric;
        let drained = take.min(target_health);
        if drained <= 0 {
            return;
        }
        let heal = (drained as f32 * config.percentile).ceil() as i32;
        let Some(attacker) = self.state.entities.get_mut(event.attacker) else {
            return;
        };
        if heal <= 0 || attacker.health <= 0 {
            return;
        }
        let healed = attacker.health.saturating_add(heal).min(config.health_max);
        attacker.health = attacker.health.max(healed);
        trace!(attacker = %event.attacker, heal, health = attacker.health, "vampiric drain");
    }

    /// Attributes damage dealt and received while the target is still alive.
    fn score_hit(&mut self, event: &DamageEvent, take: i32) {
        let config = self.env.config;
        if let Some(target) = self.state.entities.get_mut(event.target) {
            target.stats.damage_received = target.stats.damage_received.saturating_add(take);
        }
        if event.is_self_inflicted() {
            return;
        }
        let Some(attacker) = self.state.entities.get_mut(event.attacker) else {
            return;
        };

        attacker.stats.damage_dealt = attacker.stats.damage_dealt.saturating_add(take);
        if event.cause.friendly_fire {
            attacker.stats.team_damage = attacker.stats.team_damage.saturating_add(take);
            if attacker.is_player() {
                self.effects.dispatch(CombatEffect::TeamDamageWarning {
                    attacker: event.attacker,
                    target: event.target,
                    amount: take,
                });
            }
        } else if config.rules.mode.is_arena() {
            let points = attacker
                .stats
                .carry_arena_damage(take, config.arena.damage_per_point);
            if points > 0 {
                trace!(attacker = %event.attacker, points, "arena damage points");
            }
        }
    }

    /// Bookkeeping for hits the target survived.
    fn after_hit(&mut self, event: &DamageEvent, report: &DamageReport) {
        let now = self.state.time;
        let config = self.env.config;
        let attacker_origin = self.state.entities.get(event.attacker).map(|a| a.origin);
        let attacker_info = self
            .state
            .entities
            .get(event.attacker)
            .map(|attacker| (attacker.is_player(), attacker.is_monster(), attacker.health > 0));

        let Some(target) = self.state.entities.get_mut(event.target) else {
            return;
        };

        // Eliminated bodies dropped below gib health by the world respawn.
        if config.rules.mode.is_elimination()
            && !target.is_alive()
            && target.health < CombatConfig::GIB_HEALTH
            && event.attacker.is_world()
        {
            if let Some(client) = target.client_mut() {
                client.respawn_requested = true;
            }
        }

        if let Some(sphere) = target.sphere {
            if sphere.kind == SphereKind::Defender
                && event.attacker != event.target
                && attacker_info.is_some()
            {
                self.effects.dispatch(CombatEffect::SphereRetaliate {
                    sphere: sphere.id,
                    owner: event.target,
                    attacker: event.attacker,
                });
            }
        }

        if let Some((attacker_is_player, attacker_is_monster, attacker_alive)) = attacker_info {
            if target.health > 0 && attacker_alive && event.attacker != event.target {
                react_to_damage(target, event.attacker, attacker_is_player, attacker_is_monster);
            }
        }

        let Some(client) = target.client_mut() else {
            return;
        };
        let frame = &mut client.frame;
        frame.blood = frame.blood.saturating_add(report.take);
        frame.armor = frame
            .armor
            .saturating_add(report.armor_saved)
            .saturating_add(report.protection_saved);
        frame.power_armor = frame.power_armor.saturating_add(report.power_armor_saved);
        frame.from = event.point;

        let shows_indicator = !event.flags.contains(DamageFlags::NO_INDICATOR)
            && !event.attacker.is_world()
            && !event.inflictor.is_world()
            && (report.take > 0 || report.armor_saved > 0 || report.power_armor_saved > 0);
        if shows_indicator {
            client.indicators.record(
                attacker_origin.unwrap_or(event.point),
                report.take,
                report.armor_saved,
                report.power_armor_saved,
            );
        }
        trace!(target = %event.target, at = %now, frame = ?client.frame, "hud feedback");
    }
}

/// Points a hurt monster at whoever hurt it.
fn react_to_damage(
    target: &mut Combatant,
    attacker: EntityId,
    attacker_is_player: bool,
    attacker_is_monster: bool,
) {
    let Some(monster) = target.monster_state_mut() else {
        return;
    };
    if !attacker_is_player && !attacker_is_monster {
        return;
    }
    if monster.enemy == Some(attacker) {
        return;
    }
    if monster.ai_flags.contains(AiFlags::GOOD_GUY) && attacker_is_player {
        return;
    }

    if attacker_is_player {
        monster.ai_flags.remove(AiFlags::SOUND_TARGET);
    }
    if monster.enemy.is_some() {
        monster.old_enemy = monster.enemy;
    }
    monster.enemy = Some(attacker);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halving_rules() {
        assert_eq!(halve_floor_one(1), 1);
        assert_eq!(halve_floor_one(7), 3);
        assert_eq!(halve_floor_one(0), 0);
        assert_eq!(halve_ceil(7), 4);
        assert_eq!(halve_ceil(1), 1);
        assert_eq!(halve_ceil(0), 0);
    }

    #[test]
    fn zero_or_negative_scale_yields_zero() {
        assert_eq!(scale_amount(1000, 0.0), 0);
        assert_eq!(scale_amount(1000, -2.0), 0);
        assert_eq!(scale_amount(7, 0.5), 3);
    }

    #[test]
    fn good_guys_ignore_players() {
        let mut ally = Combatant::monster(EntityId(2));
        if let Some(monster) = ally.monster_state_mut() {
            monster.ai_flags = AiFlags::GOOD_GUY;
        }
        react_to_damage(&mut ally, EntityId(1), true, false);
        assert_eq!(ally.monster_state().and_then(|m| m.enemy), None);
    }

    #[test]
    fn previous_enemy_is_remembered() {
        let mut monster = Combatant::monster(EntityId(2));
        if let Some(state) = monster.monster_state_mut() {
            state.enemy = Some(EntityId(5));
            state.ai_flags = AiFlags::SOUND_TARGET;
        }
        react_to_damage(&mut monster, EntityId(1), true, false);

        let state = monster.monster_state().cloned().unwrap_or_default();
        assert_eq!(state.enemy, Some(EntityId(1)));
        assert_eq!(state.old_enemy, Some(EntityId(5)));
        assert!(!state.ai_flags.contains(AiFlags::SOUND_TARGET));
    }
}
