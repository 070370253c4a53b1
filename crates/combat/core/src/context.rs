use crate::config::CombatConfig;
use crate::env::{CombatEnv, EffectSink};
use crate::state::{GameTime, WorldState};

/// Mutable world plus collaborators, threaded through every damage call.
///
/// Holding `&mut WorldState` means one context serializes all damage for a
/// tick. Reflected damage and exploding objects re-enter through the same
/// context on the same stack.
pub struct WorldContext<'a> {
    pub state: &'a mut WorldState,
    pub env: CombatEnv<'a>,
    pub effects: &'a mut dyn EffectSink,
}

impl<'a> WorldContext<'a> {
    pub fn new(
        state: &'a mut WorldState,
        env: CombatEnv<'a>,
        effects: &'a mut dyn EffectSink,
    ) -> Self {
        Self {
            state,
            env,
            effects,
        }
    }

    pub fn now(&self) -> GameTime {
        self.state.time
    }

    pub fn config(&self) -> &'a CombatConfig {
        self.env.config
    }
}
