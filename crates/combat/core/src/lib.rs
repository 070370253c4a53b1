//! Damage resolution for an arena shooter.
//!
//! `combat-core` turns a single hit, or an explosion, into health loss,
//! armor depletion, knockback, kill credit and feedback effects. All mutation
//! flows through [`WorldContext`], which borrows the [`WorldState`] for the
//! duration of a call together with the geometry and team oracles and the
//! match [`CombatConfig`].
//!
//! The engine is single threaded and synchronous. Effects are pushed to an
//! [`EffectSink`](env::EffectSink) and never read back.
pub mod config;
pub mod context;
pub mod damage;
pub mod env;
pub mod error;
pub mod state;

pub use config::{
    ArmorInfo, ArmorRules, ArmorTable, CombatConfig, GameMode, MatchRules, Ruleset, Skill,
};
pub use context::WorldContext;
pub use damage::{
    Cause, DamageEvent, DamageFlags, DamageReport, DeathOutcome, Inflictor, MeansOfDeath,
};
pub use env::{
    CombatEffect, CombatEnv, EffectSink, GeometryOracle, ModeTeams, NullSink, OpenGeometry,
    SolidBox, SolidBoxes, TeamOracle, TraceMask, TraceResult,
};
pub use error::{ConfigError, ErrorSeverity, GameError};
pub use state::{
    ArmorInventory, ArmorTier, Combatant, CombatantKind, EntityFlags, EntityId, GameTime,
    PowerArmor, PowerArmorKind, Team, TimedEffectKind, WorldState,
};
