//! Match presets and configuration loaders.
//!
//! This crate houses the static match setups servers start from and loaders
//! for TOML data files:
//! - Match presets (free for all, duel, clan arena, instagib, ...)
//! - Combat configuration (data-driven via TOML)
//! - Armor tables (data-driven via TOML)
//!
//! Everything produced here is a [`combat_core::CombatConfig`] or a piece of
//! one; content never appears in world state.

pub mod presets;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use presets::MatchPreset;

#[cfg(feature = "loaders")]
pub use loaders::{ArmorTableLoader, ConfigLoader, LoadResult};
