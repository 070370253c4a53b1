//! Plate armor inventory and energy shields.

/// Plate armor tier, weakest first.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ArmorTier {
    Jacket,
    Combat,
    Body,
}

impl ArmorTier {
    pub const ALL: [ArmorTier; 3] = [ArmorTier::Jacket, ArmorTier::Combat, ArmorTier::Body];
}

/// Armor points held per tier plus the tier the entity is wearing.
///
/// Players may carry points in several tiers and always fight with the
/// strongest one that still has points. Monsters and objects wear exactly the
/// tier in `worn`, which is cleared once its pool runs dry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorInventory {
    pub jacket: i32,
    pub combat: i32,
    pub body: i32,
    pub worn: Option<ArmorTier>,
}

impl ArmorInventory {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Inventory wearing a single tier.
    pub fn wearing(tier: ArmorTier, points: i32) -> Self {
        let mut inventory = Self::default();
        inventory.set(tier, points);
        inventory.worn = Some(tier);
        inventory
    }

    pub fn get(&self, tier: ArmorTier) -> i32 {
        match tier {
            ArmorTier::Jacket => self.jacket,
            ArmorTier::Combat => self.combat,
            ArmorTier::Body => self.body,
        }
    }

    /// Sets a pool, clamping negative values to zero.
    pub fn set(&mut self, tier: ArmorTier, points: i32) {
        let points = points.max(0);
        match tier {
            ArmorTier::Jacket => self.jacket = points,
            ArmorTier::Combat => self.combat = points,
            ArmorTier::Body => self.body = points,
        }
    }

    pub fn total(&self) -> i32 {
        self.jacket + self.combat + self.body
    }

    /// Strongest tier that still has points.
    pub fn best(&self) -> Option<ArmorTier> {
        ArmorTier::ALL
            .into_iter()
            .rev()
            .find(|&tier| self.get(tier) > 0)
    }

    /// Tier that absorbs the next hit.
    pub fn active_tier(&self, is_player: bool) -> Option<ArmorTier> {
        if is_player {
            self.best()
        } else {
            self.worn.filter(|&tier| self.get(tier) > 0)
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum PowerArmorKind {
    #[default]
    None,
    /// Frontal screen; only blocks hits inside the facing cone.
    Screen,
    /// Full-body shield.
    Shield,
}

/// Energy shield fed by a cell pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerArmor {
    pub kind: PowerArmorKind,
    pub cells: i32,
    /// Switched on by its owner.
    pub active: bool,
}

impl PowerArmor {
    pub fn new(kind: PowerArmorKind, cells: i32) -> Self {
        Self {
            kind,
            cells: cells.max(0),
            active: true,
        }
    }

    pub fn is_up(&self) -> bool {
        self.active && self.kind != PowerArmorKind::None && self.cells > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn players_use_strongest_tier_with_points() {
        let mut armor = ArmorInventory::wearing(ArmorTier::Jacket, 25);
        armor.set(ArmorTier::Body, 10);
        assert_eq!(armor.active_tier(true), Some(ArmorTier::Body));
        assert_eq!(armor.active_tier(false), Some(ArmorTier::Jacket));

        armor.set(ArmorTier::Body, 0);
        assert_eq!(armor.active_tier(true), Some(ArmorTier::Jacket));
    }

    #[test]
    fn worn_tier_without_points_absorbs_nothing() {
        let armor = ArmorInventory {
            worn: Some(ArmorTier::Combat),
            ..ArmorInventory::default()
        };
        assert_eq!(armor.active_tier(false), None);
    }

    #[test]
    fn negative_points_clamp_to_zero() {
        let mut armor = ArmorInventory::empty();
        armor.set(ArmorTier::Combat, -5);
        assert_eq!(armor.combat, 0);
        assert_eq!(armor.total(), 0);
    }
}
