mod common;

use combat_core::damage::Inflictor;
use combat_core::state::{DeathState, ObjectDeath};
use combat_core::{
    CombatConfig, Combatant, DamageEvent, DamageFlags, EntityId, GameTime, MeansOfDeath, SolidBox,
};
use common::Arena;
use glam::Vec3;

const SHOOTER: EntityId = EntityId(1);
const ROCKET: EntityId = EntityId(50);

fn arena() -> Arena {
    let mut arena = Arena::new(CombatConfig::default());
    arena.spawn(Combatant::player(SHOOTER).at(Vec3::new(-1000.0, 0.0, 0.0)));
    arena
}

fn rocket_at(origin: Vec3) -> Inflictor {
    Inflictor::point(ROCKET, origin)
}

#[test]
fn damage_falls_off_with_distance_to_the_box() {
    let mut arena = arena();
    // Near face of the box is 50 units from the blast.
    let victim = arena.spawn(Combatant::player(EntityId(2)).at(Vec3::new(66.0, 0.0, 0.0)));

    let hit_enemy = arena.explode(rocket_at(Vec3::ZERO), SHOOTER, 100, 100.0, MeansOfDeath::RocketSplash);

    assert!(hit_enemy);
    assert_eq!(arena.health(victim), 50);
}

#[test]
fn splash_throws_victims_away_and_upward() {
    let mut arena = arena();
    let victim = arena.spawn(Combatant::player(EntityId(2)).at(Vec3::new(48.0, 0.0, 0.0)));

    arena.explode(rocket_at(Vec3::ZERO), SHOOTER, 100, 128.0, MeansOfDeath::RocketSplash);

    // 32 units out of 128 keeps three quarters.
    let victim = arena.get(victim);
    assert_eq!(victim.health, 25);
    assert!(victim.velocity.x > 0.0);
    assert!(victim.velocity.z > 0.0);
}

#[test]
fn victims_at_the_edge_are_untouched() {
    let mut arena = arena();
    let victim = arena.spawn(Combatant::player(EntityId(2)).at(Vec3::new(116.0, 0.0, 0.0)));

    let hit_enemy = arena.explode(rocket_at(Vec3::ZERO), SHOOTER, 100, 100.0, MeansOfDeath::RocketSplash);

    assert!(!hit_enemy);
    assert_eq!(arena.health(victim), 100);
}

#[test]
fn walls_block_the_blast() {
    let mut arena = arena();
    arena.geometry.push(SolidBox::wall(
        Vec3::new(20.0, -200.0, -200.0),
        Vec3::new(24.0, 200.0, 200.0),
    ));
    let victim = arena.spawn(Combatant::player(EntityId(2)).at(Vec3::new(66.0, 0.0, 0.0)));

    arena.explode(rocket_at(Vec3::ZERO), SHOOTER, 100, 100.0, MeansOfDeath::RocketSplash);

    assert_eq!(arena.health(victim), 100);
}

#[test]
fn the_ignored_entity_is_skipped() {
    let mut arena = arena();
    let victim = arena.spawn(Combatant::player(EntityId(2)).at(Vec3::new(66.0, 0.0, 0.0)));

    arena.with_context(|ctx| {
        ctx.radius_damage(
            rocket_at(Vec3::ZERO),
            SHOOTER,
            100,
            Some(victim),
            100.0,
            DamageFlags::empty(),
            MeansOfDeath::RocketSplash,
        )
    });

    assert_eq!(arena.health(victim), 100);
}

#[test]
fn exploding_barrel_chains_into_splash() {
    let mut arena = arena();
    let barrel = arena.spawn(Combatant::object(
        EntityId(40),
        ObjectDeath::Explode {
            damage: 100,
            radius: 200.0,
        },
    ));
    // Blast comes from the barrel centre at height 20; the victim's near
    // face is 100 units away.
    let victim = arena.spawn(Combatant::player(EntityId(2)).at(Vec3::new(116.0, 0.0, 0.0)));

    let report = arena.hit(DamageEvent::new(barrel, SHOOTER, 20, MeansOfDeath::Shotgun));

    assert!(report.fatal);
    assert_eq!(arena.get(barrel).death, DeathState::Destroyed);
    assert!(!arena.get(barrel).take_damage);
    assert_eq!(arena.health(victim), 50);
    assert_eq!(arena.get(SHOOTER).stats.damage_dealt, 70);
}

#[test]
fn nuke_kills_inside_and_hurts_out_to_twice_the_radius() {
    let mut arena = arena();
    arena.geometry.push(SolidBox::wall(
        Vec3::new(500.0, -200.0, -200.0),
        Vec3::new(510.0, 200.0, 200.0),
    ));
    // Bodies sit so their centres line up with the blast.
    let inside = arena.spawn(Combatant::player(EntityId(2)).at(Vec3::new(50.0, 0.0, -4.0)));
    let outside = arena.spawn(Combatant::player(EntityId(3)).at(Vec3::new(150.0, 0.0, -4.0)));
    let watching = arena.spawn(Combatant::player(EntityId(4)).at(Vec3::new(0.0, 5000.0, 0.0)));
    let near_cover = arena.spawn(Combatant::player(EntityId(5)).at(Vec3::new(1000.0, 0.0, 0.0)));
    let far_cover = arena.spawn(Combatant::player(EntityId(6)).at(Vec3::new(3000.0, 0.0, 0.0)));

    arena.with_context(|ctx| {
        ctx.radius_nuke_damage(rocket_at(Vec3::ZERO), SHOOTER, 100, None, 100.0, MeansOfDeath::Nuke)
    });

    let inside = arena.get(inside);
    assert_eq!(inside.health, CombatConfig::MIN_HEALTH);
    assert_eq!(inside.death, DeathState::Dead);
    assert_eq!(arena.health(outside), 50);

    let flash = |id| arena.get(id).client().map(|client| client.nuke_until);
    assert_eq!(flash(EntityId(2)), Some(GameTime(2000)));
    assert_eq!(flash(outside), Some(GameTime(2000)));
    assert_eq!(flash(watching), Some(GameTime(2000)));
    assert_eq!(flash(near_cover), Some(GameTime(1500)));
    assert_eq!(flash(far_cover), Some(GameTime(1000)));
    assert_eq!(arena.health(near_cover), 100);
}

#[test]
fn nuke_flash_skips_players_out_of_range() {
    let mut arena = arena();
    let range = arena.config.nuke.warn_range;
    let nearby = arena.spawn(Combatant::player(EntityId(2)).at(Vec3::new(0.0, 4000.0, 0.0)));
    let distant =
        arena.spawn(Combatant::player(EntityId(3)).at(Vec3::new(0.0, range + 100.0, 0.0)));

    arena.with_context(|ctx| {
        ctx.radius_nuke_damage(rocket_at(Vec3::ZERO), SHOOTER, 100, None, 100.0, MeansOfDeath::Nuke)
    });

    let flash = |id| arena.get(id).client().map(|client| client.nuke_until);
    assert_eq!(flash(nearby), Some(GameTime(2000)));
    assert_eq!(flash(distant), Some(GameTime::ZERO));
}
