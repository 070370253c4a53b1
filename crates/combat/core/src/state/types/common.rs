use std::fmt;

/// Unique identifier for any entity tracked in the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the world itself.
    ///
    /// Environmental hazards (lava, falling, crushers) use it as both
    /// attacker and inflictor. It never has a combatant entry.
    pub const WORLD: Self = Self(0);

    #[inline]
    pub const fn is_world(self) -> bool {
        self.0 == Self::WORLD.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Milliseconds since level start.
///
/// Every damage event within one server frame sees the same `GameTime`, so
/// "this tick" comparisons are plain equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameTime(pub u64);

impl GameTime {
    pub const ZERO: Self = Self(0);

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

impl std::ops::Add<u64> for GameTime {
    type Output = GameTime;
    fn add(self, rhs: u64) -> GameTime {
        GameTime(self.0.saturating_add(rhs))
    }
}

impl std::ops::AddAssign<u64> for GameTime {
    fn add_assign(&mut self, rhs: u64) {
        self.0 = self.0.saturating_add(rhs);
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Team affiliation used by team modes.
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
pub enum Team {
    #[default]
    None,
    Red,
    Blue,
    /// Free-for-all participant; never anyone's teammate.
    Free,
    Spectator,
}

impl Team {
    /// Teams whose members count as allies of each other.
    pub const fn is_side(self) -> bool {
        matches!(self, Team::Red | Team::Blue)
    }
}
