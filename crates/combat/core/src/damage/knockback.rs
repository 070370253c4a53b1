//! Converts a scalar knockback into a velocity change.

use glam::Vec3;
use tracing::{trace, warn};

use crate::config::KnockbackConfig;
use crate::state::{Combatant, GameTime, PmoveType, TimedEffectKind};

/// Shortest and longest time player movement stays in knockback mode.
const KNOCKBACK_TIME_MIN_MS: i32 = 50;
const KNOCKBACK_TIME_MAX_MS: i32 = 200;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnockbackInput {
    pub magnitude: i32,
    pub direction: Vec3,
    pub self_inflicted: bool,
    /// The event carried `NO_KNOCKBACK`.
    pub suppressed: bool,
    /// Clan Arena buff.
    pub arena: bool,
}

/// Pushes `target` and returns the velocity change, or `None` when the hit
/// cannot move it.
pub fn apply_knockback(
    target: &mut Combatant,
    input: &KnockbackInput,
    config: &KnockbackConfig,
    now: GameTime,
) -> Option<Vec3> {
    if input.suppressed || input.magnitude <= 0 || !target.movetype.is_physical() {
        return None;
    }
    if target
        .client()
        .is_some_and(|client| client.pmove != PmoveType::Normal)
    {
        return None;
    }
    if !input.direction.is_finite() {
        return None;
    }
    let dir = input.direction.try_normalize()?;

    let mass = target.mass.max(config.min_mass) as f32;
    let base = if input.self_inflicted {
        config.self_base
    } else {
        config.base
    };
    let mut impulse = base * input.magnitude as f32 / mass * config.scale.max(0.0);
    if input.arena {
        impulse *= config.arena_multiplier;
    }
    impulse = impulse.min(config.max_impulse);
    if impulse <= 0.0 {
        return None;
    }

    let grounded = target.on_ground && !target.effects.has(TimedEffectKind::AntiGrav, now);
    let lift = if grounded {
        config.grounded_lift
    } else {
        config.airborne_lift
    };
    let push_dir = (dir + Vec3::Z * lift).try_normalize().unwrap_or(dir);

    let mut velocity = target.velocity;
    if grounded {
        velocity.z *= 0.5;
    }
    velocity = (velocity + push_dir * impulse).clamp_length_max(config.max_speed);

    if !velocity.is_finite() {
        warn!(
            target = %target.id,
            magnitude = input.magnitude,
            "discarding non-finite knockback"
        );
        return None;
    }

    let delta = velocity - target.velocity;
    target.velocity = velocity;
    trace!(target = %target.id, impulse, ?delta, "knockback");

    if let Some(client) = target.client_mut() {
        client.frame.knockback = client.frame.knockback.saturating_add(input.magnitude);
        let hold = input
            .magnitude
            .saturating_mul(2)
            .clamp(KNOCKBACK_TIME_MIN_MS, KNOCKBACK_TIME_MAX_MS);
        client.knockback_until = now + hold as u64;
    }

    Some(delta)
}
