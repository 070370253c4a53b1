//! Damage resolution.
//!
//! [`WorldContext::damage`](crate::WorldContext::damage) is the single entry
//! point for direct hits; the area variants in [`radius`] fan out to it. The
//! stage modules are public so tools and tests can exercise one rule at a
//! time.
mod apply;
pub mod armor;
pub mod death;
pub mod event;
pub mod knockback;
mod pipeline;
pub mod protection;
pub mod radius;

pub use armor::{ArmorHit, absorb_armor, absorb_power_armor};
pub use death::{Damageable, DeathOutcome, KillInfo};
pub use event::{Cause, DamageEvent, DamageFlags, DamageReport, Inflictor, MeansOfDeath};
pub use knockback::{KnockbackInput, apply_knockback};
pub use protection::{ProtectionQuery, ProtectionReason, ProtectionVerdict, evaluate_protection};
pub use radius::{can_damage, closest_point_on_box};
