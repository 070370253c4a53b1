#![allow(dead_code)]

use combat_core::damage::Inflictor;
use combat_core::{
    CombatConfig, CombatEffect, CombatEnv, Combatant, DamageEvent, DamageFlags, DamageReport,
    EntityId, MeansOfDeath, ModeTeams, SolidBoxes, WorldContext, WorldState,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One level plus everything a damage call needs.
pub struct Arena {
    pub state: WorldState,
    pub config: CombatConfig,
    pub geometry: SolidBoxes,
    pub effects: Vec<CombatEffect>,
}

impl Arena {
    pub fn new(config: CombatConfig) -> Self {
        init_tracing();
        Self {
            state: WorldState::new(),
            config,
            geometry: SolidBoxes::default(),
            effects: Vec::new(),
        }
    }

    pub fn spawn(&mut self, combatant: Combatant) -> EntityId {
        self.state.spawn(combatant)
    }

    pub fn get(&self, id: EntityId) -> &Combatant {
        self.state
            .entities
            .get(id)
            .unwrap_or_else(|| panic!("{id} is not spawned"))
    }

    pub fn get_mut(&mut self, id: EntityId) -> &mut Combatant {
        self.state
            .entities
            .get_mut(id)
            .unwrap_or_else(|| panic!("{id} is not spawned"))
    }

    pub fn health(&self, id: EntityId) -> i32 {
        self.get(id).health
    }

    pub fn with_context<R>(&mut self, f: impl FnOnce(&mut WorldContext<'_>) -> R) -> R {
        let teams = ModeTeams::new(&self.config.rules);
        let env = CombatEnv::new(&self.geometry, &teams, &self.config);
        let mut ctx = WorldContext::new(&mut self.state, env, &mut self.effects);
        f(&mut ctx)
    }

    pub fn hit(&mut self, event: DamageEvent) -> DamageReport {
        self.with_context(|ctx| ctx.damage(event))
    }

    pub fn explode(
        &mut self,
        inflictor: Inflictor,
        attacker: EntityId,
        amount: i32,
        radius: f32,
        means: MeansOfDeath,
    ) -> bool {
        self.with_context(|ctx| {
            ctx.radius_damage(
                inflictor,
                attacker,
                amount,
                None,
                radius,
                DamageFlags::empty(),
                means,
            )
        })
    }

    pub fn count_effects(&self, matches: impl Fn(&CombatEffect) -> bool) -> usize {
        self.effects.iter().filter(|effect| matches(effect)).count()
    }
}
