//! Line traces against world geometry.

use bitflags::bitflags;
use glam::Vec3;

use crate::state::EntityId;

bitflags! {
    /// Content types a trace collides with.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TraceMask: u8 {
        const SOLID       = 1 << 0;
        const WINDOW      = 1 << 1;
        const PLAYER_CLIP = 1 << 2;
        const MONSTER     = 1 << 3;
    }
}

impl TraceMask {
    /// Anything that stops an explosion.
    pub const MASK_SOLID: Self = Self::SOLID.union(Self::WINDOW);
}

/// Result of a line trace.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceResult {
    /// Portion of the segment travelled before impact, 1.0 if unobstructed.
    pub fraction: f32,
    pub end_pos: Vec3,
    /// Entity owning the surface that was hit.
    pub hit: Option<EntityId>,
}

impl TraceResult {
    pub fn clear(to: Vec3) -> Self {
        Self {
            fraction: 1.0,
            end_pos: to,
            hit: None,
        }
    }

    pub fn is_clear(&self) -> bool {
        self.fraction >= 1.0
    }
}

/// World collision queries.
pub trait GeometryOracle {
    /// Traces a line from `from` to `to`, ignoring surfaces owned by `ignore`.
    fn trace(&self, from: Vec3, to: Vec3, mask: TraceMask, ignore: Option<EntityId>)
    -> TraceResult;
}

/// Geometry with nothing in it.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenGeometry;

impl GeometryOracle for OpenGeometry {
    fn trace(
        &self,
        _from: Vec3,
        to: Vec3,
        _mask: TraceMask,
        _ignore: Option<EntityId>,
    ) -> TraceResult {
        TraceResult::clear(to)
    }
}

/// Axis-aligned solid box.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolidBox {
    pub mins: Vec3,
    pub maxs: Vec3,
    pub contents: TraceMask,
    /// Entity this surface belongs to, if any.
    pub owner: Option<EntityId>,
}

impl SolidBox {
    pub fn wall(mins: Vec3, maxs: Vec3) -> Self {
        Self {
            mins,
            maxs,
            contents: TraceMask::SOLID,
            owner: None,
        }
    }

    pub fn owned_by(mut self, owner: EntityId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Entry fraction of the segment `from + delta * t`, `t` in `[0, 1]`.
    fn intersect(&self, from: Vec3, delta: Vec3) -> Option<f32> {
        let mut enter = 0.0_f32;
        let mut exit = 1.0_f32;

        for axis in 0..3 {
            let origin = from[axis];
            let step = delta[axis];
            let (lo, hi) = (self.mins[axis], self.maxs[axis]);

            if step.abs() <= f32::EPSILON {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / step;
            let mut t0 = (lo - origin) * inv;
            let mut t1 = (hi - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            enter = enter.max(t0);
            exit = exit.min(t1);
            if enter > exit {
                return None;
            }
        }

        Some(enter)
    }
}

/// A world made of solid boxes, tested with the slab method.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolidBoxes {
    pub boxes: Vec<SolidBox>,
}

impl SolidBoxes {
    pub fn new(boxes: Vec<SolidBox>) -> Self {
        Self { boxes }
    }

    pub fn push(&mut self, solid: SolidBox) {
        self.boxes.push(solid);
    }
}

impl GeometryOracle for SolidBoxes {
    fn trace(
        &self,
        from: Vec3,
        to: Vec3,
        mask: TraceMask,
        ignore: Option<EntityId>,
    ) -> TraceResult {
        let delta = to - from;
        let nearest = self
            .boxes
            .iter()
            .filter(|solid| solid.contents.intersects(mask))
            .filter(|solid| ignore.is_none() || solid.owner != ignore)
            .filter_map(|solid| solid.intersect(from, delta).map(|t| (t, solid)))
            .min_by(|a, b| a.0.total_cmp(&b.0));

        match nearest {
            Some((fraction, solid)) => TraceResult {
                fraction,
                end_pos: from + delta * fraction,
                hit: solid.owner,
            },
            None => TraceResult::clear(to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pillar() -> SolidBox {
        SolidBox::wall(Vec3::new(40.0, -10.0, -100.0), Vec3::new(60.0, 10.0, 100.0))
    }

    #[test]
    fn open_geometry_never_blocks() {
        let result = OpenGeometry.trace(Vec3::ZERO, Vec3::X * 100.0, TraceMask::MASK_SOLID, None);
        assert!(result.is_clear());
    }

    #[test]
    fn box_blocks_crossing_segment() {
        let world = SolidBoxes::new(vec![pillar()]);
        let result = world.trace(
            Vec3::ZERO,
            Vec3::new(100.0, 0.0, 0.0),
            TraceMask::MASK_SOLID,
            None,
        );
        assert!((result.fraction - 0.4).abs() < 1e-5);
        assert!((result.end_pos.x - 40.0).abs() < 1e-3);
    }

    #[test]
    fn segment_passing_beside_box_is_clear() {
        let world = SolidBoxes::new(vec![pillar()]);
        let result = world.trace(
            Vec3::new(0.0, 20.0, 0.0),
            Vec3::new(100.0, 20.0, 0.0),
            TraceMask::MASK_SOLID,
            None,
        );
        assert!(result.is_clear());
    }

    #[test]
    fn ignored_owner_and_unmatched_contents_do_not_block() {
        let owned = pillar().owned_by(EntityId(4));
        let mut clip = pillar();
        clip.contents = TraceMask::PLAYER_CLIP;
        let world = SolidBoxes::new(vec![owned, clip]);

        let to = Vec3::new(100.0, 0.0, 0.0);
        assert!(
            world
                .trace(Vec3::ZERO, to, TraceMask::MASK_SOLID, Some(EntityId(4)))
                .is_clear()
        );
        assert_eq!(
            world.trace(Vec3::ZERO, to, TraceMask::MASK_SOLID, None).hit,
            Some(EntityId(4))
        );
    }
}
