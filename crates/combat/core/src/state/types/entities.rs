use std::collections::BTreeMap;

use glam::Vec3;

use super::{Combatant, EntityId};

/// All damageable entities, keyed by id.
///
/// Iteration is in ascending id order so area effects visit victims
/// deterministically.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityTable {
    combatants: BTreeMap<EntityId, Combatant>,
}

impl EntityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a combatant, returning the one it replaced.
    pub fn insert(&mut self, combatant: Combatant) -> Option<Combatant> {
        self.combatants.insert(combatant.id, combatant)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Combatant> {
        self.combatants.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Combatant> {
        self.combatants.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Combatant> {
        self.combatants.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.combatants.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.combatants.values_mut()
    }

    /// Ids of every player, in id order.
    pub fn player_ids(&self) -> Vec<EntityId> {
        self.iter()
            .filter(|combatant| combatant.is_player())
            .map(|combatant| combatant.id)
            .collect()
    }

    /// Ids of entities whose bounding box overlaps the cube of half-size
    /// `radius` around `origin`.
    ///
    /// This is a coarse box query; callers apply their own distance test.
    pub fn in_radius(&self, origin: Vec3, radius: f32) -> Vec<EntityId> {
        let lo = origin - Vec3::splat(radius);
        let hi = origin + Vec3::splat(radius);
        self.iter()
            .filter(|combatant| {
                let min = combatant.abs_min();
                let max = combatant.abs_max();
                min.cmple(hi).all() && max.cmpge(lo).all()
            })
            .map(|combatant| combatant.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_query_uses_bounding_boxes_in_id_order() {
        let mut table = EntityTable::new();
        table.insert(Combatant::player(EntityId(7)).at(Vec3::new(40.0, 0.0, 0.0)));
        table.insert(Combatant::player(EntityId(2)).at(Vec3::new(-30.0, 0.0, 0.0)));
        table.insert(Combatant::player(EntityId(5)).at(Vec3::new(500.0, 0.0, 0.0)));

        // The player at x=40 reaches back to x=24 with its box.
        assert_eq!(
            table.in_radius(Vec3::ZERO, 30.0),
            vec![EntityId(2), EntityId(7)]
        );
    }
}
