//! Health commit and death bookkeeping.

use tracing::debug;

use super::{
    DamageEvent, DamageFlags, Damageable, DeathOutcome, Inflictor, KillInfo, MeansOfDeath,
};
use crate::config::{CombatConfig, GameMode};
use crate::context::WorldContext;
use crate::env::{CombatEffect, ImpactKind};
use crate::state::{AiFlags, Combatant, DamageSummary, DeathState, EntityFlags};

fn impact_kind(target: &Combatant, event: &DamageEvent) -> ImpactKind {
    if target.flags.contains(EntityFlags::MECHANICAL) {
        ImpactKind::ElectricSparks
    } else if target.is_player() || target.is_monster() {
        if event.cause.means == MeansOfDeath::Chainfist {
            ImpactKind::MoreBlood
        } else {
            ImpactKind::Blood
        }
    } else if event.flags.contains(DamageFlags::BULLET) {
        ImpactKind::BulletSparks
    } else {
        ImpactKind::Sparks
    }
}

impl WorldContext<'_> {
    /// Subtracts `take` from the target and runs the death path if it drops
    /// to zero.
    ///
    /// Returns true when the target was alive before the hit and is dead
    /// after it.
    pub(crate) fn apply_damage(&mut self, event: &DamageEvent, take: i32) -> bool {
        let now = self.state.time;
        let config = self.env.config;
        let rules = &config.rules;
        let Some(target) = self.state.entities.get_mut(event.target) else {
            return false;
        };
        if take <= 0 {
            return false;
        }

        let impact = impact_kind(target, event);
        let count = if impact == ImpactKind::MoreBlood {
            CombatConfig::MAX_EFFECT_COUNT
        } else {
            take
        };
        self.effects.dispatch(CombatEffect::impact(
            impact,
            event.point,
            event.normal,
            count,
        ));

        if !(rules.combat_disabled && target.is_player()) {
            let from_bonus = take.min(target.health_bonus.max(0));
            target.health_bonus -= from_bonus;
            target.health = target
                .health
                .saturating_sub(take - from_bonus)
                .max(CombatConfig::MIN_HEALTH);
        }

        if let Some(sphere) = target.sphere {
            if event.attacker != event.target && !event.attacker.is_world() {
                self.effects.dispatch(CombatEffect::SphereAlert {
                    sphere: sphere.id,
                    owner: target.id,
                    attacker: event.attacker,
                });
            }
        }

        if target.health > 0 {
            return false;
        }

        if target.flags.contains(EntityFlags::GOD_MODE) {
            target.health = 1;
            return false;
        }
        if (rules.mode == GameMode::FreezeTag && target.is_player()) || rules.instagib {
            target.health = target.health.max(CombatConfig::GIB_HEALTH + 1);
        }

        let was_alive = target.is_alive();
        if was_alive && (target.is_player() || target.is_monster()) {
            target.flags |= EntityFlags::ALIVE_KNOCKBACK_ONLY;
            target.dead_time = now;
        }
        if let Some(monster) = target.monster_state_mut() {
            monster.summary = DamageSummary {
                blood: take,
                knockback: event.knockback,
                attacker: Some(event.attacker),
                inflictor: Some(event.inflictor),
                from: event.point,
                means: Some(event.cause.means),
                at: now,
            };
        }

        self.killed(event, take);
        was_alive
    }

    /// Death trigger: clamps health, settles AI dependencies, credits the
    /// kill once per life and lets the body decide what remains of it.
    pub(crate) fn killed(&mut self, event: &DamageEvent, damage: i32) {
        let now = self.state.time;
        let config = self.env.config;
        let Some(target) = self.state.entities.get_mut(event.target) else {
            return;
        };

        target.health = target.health.max(CombatConfig::MIN_HEALTH);
        let was_alive = target.is_alive();
        let is_player = target.is_player();
        let is_monster = target.is_monster();

        let mut heal_target = None;
        let mut counts_for_level = false;
        if let Some(monster) = target.monster_state_mut() {
            if monster.ai_flags.contains(AiFlags::MEDIC) {
                heal_target = monster.enemy;
                monster.ai_flags.remove(AiFlags::MEDIC);
            }
            monster.enemy = (!event.attacker.is_world()).then_some(event.attacker);
            counts_for_level = was_alive && !monster.ai_flags.contains(AiFlags::GOOD_GUY);
        }

        if was_alive && config.rules.mode == GameMode::FreezeTag {
            if let Some(client) = target.client_mut() {
                client.frozen = true;
            }
        }

        let info = KillInfo {
            inflictor: event.inflictor,
            attacker: event.attacker,
            damage,
            point: event.point,
            means: event.cause.means,
            now,
        };
        let outcome = target.on_killed(&info);
        match outcome {
            DeathOutcome::Corpse => {
                if was_alive {
                    target.death = DeathState::Dead;
                }
            }
            DeathOutcome::Gibbed => {
                target.death = DeathState::Gibbed;
                target.take_damage = false;
                self.effects.dispatch(CombatEffect::Gib {
                    entity: target.id,
                    point: event.point,
                });
            }
            DeathOutcome::Removed | DeathOutcome::Detonate { .. } => {
                target.death = DeathState::Destroyed;
                target.take_damage = false;
            }
        }
        let blast = Inflictor::from(&*target);

        let patient = heal_target.and_then(|id| self.state.entities.get_mut(id));
        if let Some(patient) = patient.filter(|patient| patient.is_monster()) {
            patient.take_damage = true;
            if let Some(monster) = patient.monster_state_mut() {
                monster.healer = None;
                monster.ai_flags.remove(AiFlags::RESURRECTING);
            }
        }

        if counts_for_level {
            self.state.level.killed_monsters += 1;
        }
        if was_alive {
            self.credit_kill(event, is_player, is_monster);
        }

        if let DeathOutcome::Detonate { damage, radius } = outcome {
            debug!(object = %event.target, damage, radius, "object detonates");
            self.radius_damage(
                blast,
                event.attacker,
                damage,
                None,
                radius,
                DamageFlags::empty(),
                MeansOfDeath::Barrel,
            );
        }
    }

    fn credit_kill(&mut self, event: &DamageEvent, victim_is_player: bool, victim_is_monster: bool) {
        let coop = self.env.config.rules.mode == GameMode::Cooperative;
        let attacker_is_player = self
            .state
            .entities
            .get(event.attacker)
            .is_some_and(Combatant::is_player);
        let suicide = event.is_self_inflicted()
            || event.attacker.is_world()
            || !self.state.entities.contains(event.attacker);

        if victim_is_player {
            if let Some(victim) = self.state.entities.get_mut(event.target) {
                victim.stats.deaths += 1;
                if suicide {
                    victim.stats.suicides += 1;
                    victim.stats.score -= 1;
                }
            }
            if !suicide && attacker_is_player {
                if let Some(attacker) = self.state.entities.get_mut(event.attacker) {
                    let credit = if event.cause.friendly_fire { -1 } else { 1 };
                    attacker.stats.kills += credit;
                    attacker.stats.score += credit;
                }
            }
            self.effects.dispatch(CombatEffect::Obituary {
                target: event.target,
                inflictor: event.inflictor,
                attacker: event.attacker,
                means: event.cause.means,
                friendly_fire: event.cause.friendly_fire,
            });
        } else if victim_is_monster && !suicide && attacker_is_player {
            if let Some(attacker) = self.state.entities.get_mut(event.attacker) {
                attacker.stats.kills += 1;
                if coop {
                    attacker.stats.score += 1;
                }
            }
        }
    }
}
