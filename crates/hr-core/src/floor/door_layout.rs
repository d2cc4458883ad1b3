//! Door layouts (template capability) and door masks (realized doors)

use core::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::Direction;
use crate::consts::MAX_DOORS_PER_SIDE;
use crate::errors::ConfigError;

/// How many doorways a room shape can open on each side.
///
/// A layout is a capability: a template with two east doors can still be
/// placed where only one east door is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "DoorCounts", into = "DoorCounts")]
pub struct DoorLayout {
    counts: [u8; 4],
}

/// Serialized form of a layout
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
struct DoorCounts {
    north: u8,
    east: u8,
    south: u8,
    west: u8,
}

impl TryFrom<DoorCounts> for DoorLayout {
    type Error = ConfigError;

    fn try_from(raw: DoorCounts) -> Result<Self, Self::Error> {
        let counts = [raw.north, raw.east, raw.south, raw.west];
        for (direction, count) in Direction::ALL.into_iter().zip(counts) {
            if count > MAX_DOORS_PER_SIDE {
                return Err(ConfigError::DoorCount { direction, count });
            }
        }
        Ok(DoorLayout { counts })
    }
}

impl From<DoorLayout> for DoorCounts {
    fn from(layout: DoorLayout) -> Self {
        let [north, east, south, west] = layout.counts;
        DoorCounts {
            north,
            east,
            south,
            west,
        }
    }
}

impl DoorLayout {
    pub const NONE: DoorLayout = DoorLayout { counts: [0; 4] };
    /// One door on every side
    pub const ALL_SINGLE: DoorLayout = DoorLayout { counts: [1; 4] };
    /// Two doors on every side
    pub const ALL_DOUBLE: DoorLayout = DoorLayout { counts: [2; 4] };

    /// Build a layout; counts above two are clamped
    pub fn new(north: u8, east: u8, south: u8, west: u8) -> Self {
        let clamp = |n: u8| n.min(MAX_DOORS_PER_SIDE);
        Self {
            counts: [clamp(north), clamp(east), clamp(south), clamp(west)],
        }
    }

    pub fn door_count(&self, direction: Direction) -> u8 {
        self.counts[direction as usize]
    }

    pub fn with_count(mut self, direction: Direction, count: u8) -> Self {
        self.counts[direction as usize] = count.min(MAX_DOORS_PER_SIDE);
        self
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| c as u32).sum()
    }

    /// Whether this layout offers at least the doors `required` asks for
    pub fn satisfies(&self, required: &DoorLayout) -> bool {
        Direction::ALL
            .into_iter()
            .all(|d| self.door_count(d) >= required.door_count(d))
    }
}

impl fmt::Display for DoorLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in Direction::ALL {
            write!(f, "{}{}", d.letter(), self.door_count(d))?;
        }
        Ok(())
    }
}

bitflags! {
    /// Realized doorways of a placed room, a primary and a secondary bit per side
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DoorMask: u8 {
        const NORTH = 0x01;
        const NORTH_SECONDARY = 0x02;
        const EAST = 0x04;
        const EAST_SECONDARY = 0x08;
        const SOUTH = 0x10;
        const SOUTH_SECONDARY = 0x20;
        const WEST = 0x40;
        const WEST_SECONDARY = 0x80;
    }
}

impl Serialize for DoorMask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DoorMask {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(DoorMask::from_bits_truncate(bits))
    }
}

impl DoorMask {
    const fn side_bits(direction: Direction) -> (DoorMask, DoorMask) {
        match direction {
            Direction::North => (DoorMask::NORTH, DoorMask::NORTH_SECONDARY),
            Direction::East => (DoorMask::EAST, DoorMask::EAST_SECONDARY),
            Direction::South => (DoorMask::SOUTH, DoorMask::SOUTH_SECONDARY),
            Direction::West => (DoorMask::WEST, DoorMask::WEST_SECONDARY),
        }
    }

    /// Set the bits for `pair_count` doorways on one side
    pub fn set_pair_count(&mut self, direction: Direction, pair_count: u8) {
        let (primary, secondary) = Self::side_bits(direction);
        self.remove(primary | secondary);
        if pair_count >= 1 {
            self.insert(primary);
        }
        if pair_count >= 2 {
            self.insert(secondary);
        }
    }

    pub fn door_count(&self, direction: Direction) -> u8 {
        let (primary, secondary) = Self::side_bits(direction);
        match (self.contains(primary), self.contains(secondary)) {
            (false, _) => 0,
            (true, false) => 1,
            (true, true) => 2,
        }
    }

    pub fn total(&self) -> u32 {
        Direction::ALL
            .into_iter()
            .map(|d| self.door_count(d) as u32)
            .sum()
    }

    pub fn to_layout(self) -> DoorLayout {
        DoorLayout::new(
            self.door_count(Direction::North),
            self.door_count(Direction::East),
            self.door_count(Direction::South),
            self.door_count(Direction::West),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_counts() {
        let layout = DoorLayout::new(3, 1, 0, 9);
        assert_eq!(layout.door_count(Direction::North), 2);
        assert_eq!(layout.door_count(Direction::East), 1);
        assert_eq!(layout.door_count(Direction::South), 0);
        assert_eq!(layout.door_count(Direction::West), 2);
    }

    #[test]
    fn test_satisfies_is_at_least_not_exact() {
        let capability = DoorLayout::new(2, 1, 0, 1);
        assert!(capability.satisfies(&DoorLayout::new(1, 1, 0, 0)));
        assert!(capability.satisfies(&DoorLayout::new(2, 0, 0, 1)));
        assert!(!capability.satisfies(&DoorLayout::new(0, 0, 1, 0)));
        assert!(!capability.satisfies(&DoorLayout::new(0, 2, 0, 0)));
        assert!(DoorLayout::ALL_DOUBLE.satisfies(&DoorLayout::ALL_DOUBLE));
    }

    #[test]
    fn test_layout_json_rejects_triple_doors() {
        let ok: DoorLayout = serde_json::from_str(r#"{"north":2,"west":1}"#).unwrap();
        assert_eq!(ok, DoorLayout::new(2, 0, 0, 1));

        let err = serde_json::from_str::<DoorLayout>(r#"{"east":3}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_mask_pair_counts() {
        let mut mask = DoorMask::empty();
        mask.set_pair_count(Direction::East, 2);
        mask.set_pair_count(Direction::South, 1);
        assert_eq!(mask.door_count(Direction::East), 2);
        assert_eq!(mask.door_count(Direction::South), 1);
        assert_eq!(mask.door_count(Direction::North), 0);
        assert_eq!(mask.total(), 3);

        mask.set_pair_count(Direction::East, 0);
        assert_eq!(mask.door_count(Direction::East), 0);
        assert_eq!(mask.to_layout(), DoorLayout::new(0, 0, 1, 0));
    }
}
