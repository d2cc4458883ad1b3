//! Room and door storage for one built floor

use hashbrown::HashMap;
use log::warn;

use super::{DoorId, EnemyId, Room, RoomDoor, RoomId};
use crate::floor::{FloorConfig, GeneratedFloorLayout, GridPos, RoomCategory};

/// Every room and door of the current floor
///
/// Rooms are stored in placement order. Door links live in a side table so
/// that a door never owns its partner.
#[derive(Debug, Clone, Default)]
pub struct FloorArena {
    epoch: u32,
    rooms: Vec<Room>,
    doors: Vec<RoomDoor>,
    links: HashMap<DoorId, DoorId>,
    by_pos: HashMap<GridPos, RoomId>,
}

impl FloorArena {
    pub fn new(epoch: u32) -> Self {
        Self {
            epoch,
            ..Self::default()
        }
    }

    /// Instantiate every placed cell of `layout`, doors unwired
    pub fn assemble(epoch: u32, layout: &GeneratedFloorLayout, config: &FloorConfig) -> Self {
        let mut arena = Self::new(epoch);
        let spacing = config.layout.cell_spacing;

        for (pos, template_id) in layout.placed_rooms() {
            let Some(template) = config.template(template_id) else {
                warn!("template {} at {} is not in the catalog; skipped", template_id, pos);
                continue;
            };

            let origin = pos.to_world(spacing);
            let id = RoomId::new(epoch, arena.rooms.len() as u32);
            let mut room = Room::new(id, pos, origin, template_id, template.category, layout.depth(pos));
            room.spawn_points = template.prefab.spawn_points.iter().map(|&p| origin + p).collect();
            room.player_spawn = origin + template.prefab.player_spawn();

            for placement in template.door_placements() {
                let door_id = DoorId::new(epoch, arena.doors.len() as u32);
                arena.doors.push(RoomDoor::from_placement(door_id, id, origin, &placement));
                room.doors.push(door_id);
            }

            arena.by_pos.insert(pos, id);
            arena.rooms.push(room);
        }
        arena
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn door_count(&self) -> usize {
        self.doors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Rooms in placement order
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn doors(&self) -> &[RoomDoor] {
        &self.doors
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        if id.epoch != self.epoch {
            return None;
        }
        self.rooms.get(id.index as usize)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        if id.epoch != self.epoch {
            return None;
        }
        self.rooms.get_mut(id.index as usize)
    }

    pub fn door(&self, id: DoorId) -> Option<&RoomDoor> {
        if id.epoch != self.epoch {
            return None;
        }
        self.doors.get(id.index as usize)
    }

    pub fn door_mut(&mut self, id: DoorId) -> Option<&mut RoomDoor> {
        if id.epoch != self.epoch {
            return None;
        }
        self.doors.get_mut(id.index as usize)
    }

    pub fn room_at(&self, pos: GridPos) -> Option<RoomId> {
        self.by_pos.get(&pos).copied()
    }

    /// First room of a category, in placement order
    pub fn find_category(&self, category: RoomCategory) -> Option<RoomId> {
        self.rooms.iter().find(|r| r.category == category).map(|r| r.id)
    }

    /// Room tracking `enemy`
    pub fn room_of_enemy(&self, enemy: EnemyId) -> Option<RoomId> {
        self.rooms.iter().find(|r| r.has_enemy(enemy)).map(|r| r.id)
    }

    /// Every live enemy on the floor
    pub fn live_enemies(&self) -> Vec<EnemyId> {
        self.rooms.iter().flat_map(|r| r.enemies()).collect()
    }

    /// Link two doors to each other; any previous partners are released
    pub fn link(&mut self, a: DoorId, b: DoorId) {
        for door in [a, b] {
            if let Some(old) = self.links.remove(&door) {
                self.links.remove(&old);
            }
        }
        self.links.insert(a, b);
        self.links.insert(b, a);
    }

    pub fn partner(&self, door: DoorId) -> Option<DoorId> {
        self.links.get(&door).copied()
    }

    pub fn is_linked(&self, door: DoorId) -> bool {
        self.links.contains_key(&door)
    }

    /// Number of linked door pairs
    pub fn link_count(&self) -> usize {
        self.links.len() / 2
    }

    /// Trigger is live: linked and unlocked
    pub fn is_navigable(&self, door: DoorId) -> bool {
        self.is_linked(door) && self.door(door).is_some_and(|d| !d.locked)
    }

    /// Physically closed: locked, or leading nowhere
    pub fn blocks(&self, door: DoorId) -> bool {
        !self.is_linked(door) || self.door(door).is_none_or(|d| d.locked)
    }

    /// Lock or unlock a door. Unlinked doors stay locked regardless.
    ///
    /// Returns true when the lock state changed.
    pub fn set_door_locked(&mut self, door: DoorId, locked: bool) -> bool {
        let locked = locked || !self.is_linked(door);
        match self.door_mut(door) {
            Some(d) if d.locked != locked => {
                d.locked = locked;
                true
            }
            _ => false,
        }
    }

    /// Lock or unlock every door of a room; returns the doors that changed
    pub fn set_room_locked(&mut self, room: RoomId, locked: bool) -> Vec<DoorId> {
        let doors = self.room(room).map(|r| r.doors.clone()).unwrap_or_default();
        doors
            .into_iter()
            .filter(|&door| self.set_door_locked(door, locked))
            .collect()
    }
}
