//! Collaborators the engine consults but does not own.
//!
//! Geometry answers line traces, the team oracle answers "are these two
//! allies", and the effect sink receives fire-and-forget feedback.
//! [`CombatEnv`] bundles the read-only pieces with the match configuration.
mod effects;
mod geometry;
mod teams;

pub use effects::{CombatEffect, EffectSink, ImpactKind, NullSink, ProtectionCue};
pub use geometry::{
    GeometryOracle, OpenGeometry, SolidBox, SolidBoxes, TraceMask, TraceResult,
};
pub use teams::{ModeTeams, TeamOracle};

use crate::config::CombatConfig;

/// Read-only environment for one damage call.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    pub geometry: &'a dyn GeometryOracle,
    pub teams: &'a dyn TeamOracle,
    pub config: &'a CombatConfig,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        geometry: &'a dyn GeometryOracle,
        teams: &'a dyn TeamOracle,
        config: &'a CombatConfig,
    ) -> Self {
        Self {
            geometry,
            teams,
            config,
        }
    }
}
