//! Per-frame damage feedback for the HUD.
//!
//! Totals and indicators accumulate over every hit a client takes during one
//! server frame and are cleared by [`ClientState::end_frame`](crate::ClientState::end_frame).

use arrayvec::ArrayVec;
use glam::Vec3;

use crate::config::CombatConfig;

/// Damage a client absorbed during the current frame, by layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameDamage {
    pub blood: i32,
    pub armor: i32,
    pub power_armor: i32,
    pub knockback: i32,
    /// Impact point of the most recent hit.
    pub from: Vec3,
}

impl FrameDamage {
    pub fn is_empty(&self) -> bool {
        self.blood == 0 && self.armor == 0 && self.power_armor == 0 && self.knockback == 0
    }
}

/// One directional damage marker.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageIndicator {
    pub from: Vec3,
    pub health: i32,
    pub armor: i32,
    pub power: i32,
}

/// Bounded set of damage markers for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageIndicators {
    entries: ArrayVec<DamageIndicator, { CombatConfig::MAX_DAMAGE_INDICATORS }>,
}

impl DamageIndicators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates a hit from `from`.
    ///
    /// Sources closer than [`CombatConfig::INDICATOR_MERGE_DISTANCE`] to an
    /// existing marker fold into it. New sources are dropped once the set is
    /// full.
    pub fn record(&mut self, from: Vec3, health: i32, armor: i32, power: i32) {
        let existing = self
            .entries
            .iter()
            .position(|entry| entry.from.distance(from) < CombatConfig::INDICATOR_MERGE_DISTANCE);

        let index = match existing {
            Some(index) => index,
            None => {
                if self.entries.is_full() {
                    return;
                }
                self.entries.push(DamageIndicator {
                    from,
                    ..DamageIndicator::default()
                });
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[index];
        entry.health = entry.health.saturating_add(health);
        entry.armor = entry.armor.saturating_add(armor);
        entry.power = entry.power.saturating_add(power);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DamageIndicator> {
        self.entries.iter()
    }
}
