//! Runtime identifiers
//!
//! Room and door ids carry the epoch of the floor they were created on, so
//! an id kept across a rebuild resolves to nothing instead of to whatever
//! now sits at the same index.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A room of one built floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId {
    pub epoch: u32,
    pub index: u32,
}

impl RoomId {
    pub const fn new(epoch: u32, index: u32) -> Self {
        Self { epoch, index }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.epoch, self.index)
    }
}

/// A door of one built floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoorId {
    pub epoch: u32,
    pub index: u32,
}

impl DoorId {
    pub const fn new(epoch: u32, index: u32) -> Self {
        Self { epoch, index }
    }
}

impl fmt::Display for DoorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.epoch, self.index)
    }
}

/// An enemy owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct EnemyId(pub u64);

impl EnemyId {
    pub fn next(self) -> Self {
        EnemyId(self.0 + 1)
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
