//! Timed powerups and protections.
//!
//! Effects store `expires_at: GameTime`; an effect counts as active while
//! `now < expires_at`, so expired entries are harmless until swept.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::state::GameTime;

/// Active timed effects on a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedEffects {
    effects: ArrayVec<TimedEffect, { CombatConfig::MAX_TIMED_EFFECTS }>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedEffect {
    pub kind: TimedEffectKind,
    pub expires_at: GameTime,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TimedEffectKind {
    /// Granted on respawn; swallows all damage.
    SpawnProtection,
    /// Immune to splash, halves direct hits.
    BattleSuit,
    /// Halves incoming damage and mirrors the rest onto the attacker.
    Empathy,
    /// Reduced gravity; knockback treats the body as airborne.
    AntiGrav,
    Invulnerability,
    QuadDamage,
}

impl TimedEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn has(&self, kind: TimedEffectKind, now: GameTime) -> bool {
        self.effects
            .iter()
            .any(|e| e.kind == kind && e.expires_at > now)
    }

    /// Returns None if the effect is not active.
    pub fn expires_at(&self, kind: TimedEffectKind, now: GameTime) -> Option<GameTime> {
        self.effects
            .iter()
            .find(|e| e.kind == kind && e.expires_at > now)
            .map(|e| e.expires_at)
    }

    /// Adds an effect, or extends it to the later expiration if present.
    ///
    /// Silently ignored when the set is full.
    pub fn add(&mut self, kind: TimedEffectKind, expires_at: GameTime) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.expires_at = existing.expires_at.max(expires_at);
            return;
        }
        if !self.effects.is_full() {
            self.effects.push(TimedEffect { kind, expires_at });
        }
    }

    pub fn remove(&mut self, kind: TimedEffectKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    pub fn clear_expired(&mut self, now: GameTime) {
        self.effects.retain(|e| e.expires_at > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
