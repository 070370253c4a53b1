//! Splash damage and the nuke.

use glam::Vec3;
use tracing::trace;

use super::{DamageEvent, DamageFlags, Inflictor, MeansOfDeath};
use crate::context::WorldContext;
use crate::env::{GeometryOracle, TraceMask};
use crate::state::{Combatant, EntityFlags, EntityId, MoveType};

/// Closest point of the box `[min, max]` to `point`.
pub fn closest_point_on_box(point: Vec3, min: Vec3, max: Vec3) -> Vec3 {
    point.clamp(min, max)
}

/// Whether an explosion at `origin` can reach `target`.
///
/// Tries the body centre first, then four probes offset horizontally by
/// `probe` so a corner sticking out from cover can still be hit.
pub fn can_damage(
    geometry: &dyn GeometryOracle,
    inflictor: EntityId,
    origin: Vec3,
    target: &Combatant,
    probe: f32,
) -> bool {
    let reaches = |dest: Vec3| {
        let trace = geometry.trace(origin, dest, TraceMask::MASK_SOLID, Some(inflictor));
        trace.is_clear() || trace.hit == Some(target.id)
    };

    // Brush entities have their origin at the world origin.
    if target.movetype == MoveType::Push {
        return reaches((target.abs_min() + target.abs_max()) * 0.5);
    }

    [
        Vec3::ZERO,
        Vec3::new(probe, probe, 0.0),
        Vec3::new(probe, -probe, 0.0),
        Vec3::new(-probe, probe, 0.0),
        Vec3::new(-probe, -probe, 0.0),
    ]
    .into_iter()
    .any(|offset| reaches(target.origin + offset))
}

impl WorldContext<'_> {
    /// Deals falloff damage to everything the blast can see.
    ///
    /// Returns true when a live client other than the attacker, and not on
    /// its team, was hit.
    #[allow(clippy::too_many_arguments)]
    pub fn radius_damage(
        &mut self,
        inflictor: Inflictor,
        attacker: EntityId,
        amount: i32,
        ignore: Option<EntityId>,
        radius: f32,
        flags: DamageFlags,
        means: MeansOfDeath,
    ) -> bool {
        let now = self.state.time;
        let config = self.env.config;
        let origin = inflictor.center();
        let radius = radius.max(1.0);
        let mut hit_client = false;

        for id in self.state.entities.in_radius(origin, radius) {
            if Some(id) == ignore {
                continue;
            }
            let Some(victim) = self.state.entities.get(id) else {
                continue;
            };
            if !victim.take_damage {
                continue;
            }

            let closest = closest_point_on_box(origin, victim.abs_min(), victim.abs_max());
            let distance = origin.distance(closest);
            if distance >= radius {
                continue;
            }
            let points = amount as f32 * (1.0 - distance / radius);
            if points <= 0.0 {
                continue;
            }
            if !can_damage(
                self.env.geometry,
                inflictor.id,
                origin,
                victim,
                config.radius.probe_offset,
            ) {
                continue;
            }

            let mut direction = victim.origin - origin;
            direction.z += config.radius.lift;

            let attacker_entity = self.state.entities.get(attacker);
            if id != attacker
                && victim.is_player()
                && victim.health > 0
                && attacker_entity.is_some_and(|a| {
                    a.is_player() && !self.env.teams.same_team(victim, a, now)
                })
            {
                hit_client = true;
            }

            let points = points as i32;
            trace!(victim = %id, distance, points, "radius damage");
            self.damage(DamageEvent {
                target: id,
                inflictor: inflictor.id,
                attacker,
                direction,
                point: origin,
                normal: Vec3::ZERO,
                amount: points,
                knockback: points,
                flags: flags | DamageFlags::RADIUS,
                cause: means.into(),
            });
        }

        hit_client
    }

    /// Kills everything inside `radius` and hurts everything out to twice
    /// that, ignoring cover. Clients within `warn_range` get a screen flash
    /// warning.
    pub fn radius_nuke_damage(
        &mut self,
        inflictor: Inflictor,
        attacker: EntityId,
        amount: i32,
        ignore: Option<EntityId>,
        radius: f32,
        means: MeansOfDeath,
    ) {
        let now = self.state.time;
        let config = self.env.config;
        let nuke = &config.nuke;
        let origin = inflictor.center();
        let radius = radius.max(1.0);
        let mut warned = Vec::new();

        for id in self.state.entities.in_radius(origin, radius * 2.0) {
            if Some(id) == ignore {
                continue;
            }
            let Some(victim) = self.state.entities.get_mut(id) else {
                continue;
            };
            if !victim.take_damage {
                continue;
            }

            let center = victim.center();
            let distance = origin.distance(center);
            let points = if distance <= radius {
                if victim.is_player() {
                    victim.flags |= EntityFlags::NO_GIB;
                }
                nuke.lethal_damage
            } else if distance <= radius * 2.0 {
                ((amount as f32 / radius) * (radius * 2.0 - distance)) as i32
            } else {
                continue;
            };
            if points <= 0 {
                continue;
            }

            if let Some(client) = victim.client_mut() {
                client.nuke_until = client.nuke_until.max(now + nuke.warn_ms);
                warned.push(id);
            }

            trace!(victim = %id, distance, points, "nuke damage");
            self.damage(DamageEvent {
                target: id,
                inflictor: inflictor.id,
                attacker,
                direction: center - origin,
                point: origin,
                normal: Vec3::ZERO,
                amount: points,
                knockback: points,
                flags: DamageFlags::RADIUS,
                cause: means.into(),
            });
        }

        for id in self.state.entities.player_ids() {
            if warned.contains(&id) {
                continue;
            }
            let Some(player) = self.state.entities.get(id) else {
                continue;
            };
            let distance = origin.distance(player.origin);
            if distance > nuke.warn_range {
                continue;
            }
            let trace = self.env.geometry.trace(
                origin,
                player.origin,
                TraceMask::MASK_SOLID,
                Some(inflictor.id),
            );
            let hold = if trace.is_clear() {
                nuke.warn_ms
            } else if distance < nuke.near_range {
                nuke.near_warn_ms
            } else {
                nuke.far_warn_ms
            };

            if let Some(client) = self
                .state
                .entities
                .get_mut(id)
                .and_then(Combatant::client_mut)
            {
                client.nuke_until = client.nuke_until.max(now + hold);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{OpenGeometry, SolidBox, SolidBoxes};

    #[test]
    fn closest_point_clamps_to_box() {
        let point = closest_point_on_box(
            Vec3::new(50.0, 0.0, 100.0),
            Vec3::new(-10.0, -10.0, -10.0),
            Vec3::splat(10.0),
        );
        assert_eq!(point, Vec3::new(10.0, 0.0, 10.0));
    }

    #[test]
    fn open_world_is_always_reachable() {
        let target = Combatant::player(EntityId(1)).at(Vec3::new(100.0, 0.0, 0.0));
        assert!(can_damage(&OpenGeometry, EntityId(9), Vec3::ZERO, &target, 15.0));
    }

    #[test]
    fn corner_probe_reaches_partly_covered_body() {
        // Thin post just in front of the target, covering y in [-10, 10].
        let world = SolidBoxes::new(vec![SolidBox::wall(
            Vec3::new(88.0, -10.0, -50.0),
            Vec3::new(92.0, 10.0, 50.0),
        )]);
        let target = Combatant::player(EntityId(1)).at(Vec3::new(100.0, 0.0, 0.0));

        assert!(can_damage(&world, EntityId(9), Vec3::ZERO, &target, 15.0));
        assert!(!can_damage(&world, EntityId(9), Vec3::ZERO, &target, 5.0));
    }

    #[test]
    fn blocking_surface_owned_by_target_counts_as_reached() {
        let world = SolidBoxes::new(vec![
            SolidBox::wall(Vec3::new(40.0, -100.0, -50.0), Vec3::new(60.0, 100.0, 50.0))
                .owned_by(EntityId(1)),
        ]);
        let target = Combatant::player(EntityId(1)).at(Vec3::new(100.0, 0.0, 0.0));
        assert!(can_damage(&world, EntityId(9), Vec3::ZERO, &target, 15.0));
    }
}
