//! Room manager: owns the live floor and drives room transitions

use core::mem;

use log::{debug, info, warn};

use super::{
    DoorId, EnemyId, FloorArena, FloorEvent, FloorHost, Room, RoomId, RoomState, SpawnRequest, WiringReport,
    wire_doors,
};
use crate::consts::ENCOUNTER_STREAM_SALT;
use crate::errors::{BuildError, TransitionError};
use crate::floor::{AuthoredFloor, FloorConfig, GeneratedFloorLayout, WorldPos, generate};
use crate::rng::{FloorRng, fresh_seed};

/// Builds floors and runs the rooms of the current one
///
/// One theme per floor index; indices past the last theme reuse it. When a
/// theme's catalog is empty the authored room list, if any, is placed
/// instead.
pub struct RoomManager<H> {
    host: H,
    themes: Vec<FloorConfig>,
    authored: Option<AuthoredFloor>,
    /// Catalog the current floor was built from
    config: FloorConfig,
    layout: GeneratedFloorLayout,
    arena: FloorArena,
    wiring: WiringReport,
    current: Option<RoomId>,
    floor_index: u32,
    epoch: u32,
    /// Encounter draws, kept apart from the layout stream
    encounter_rng: FloorRng,
    events: Vec<FloorEvent>,
}

impl<H: FloorHost> RoomManager<H> {
    pub fn new(host: H, themes: Vec<FloorConfig>) -> Self {
        Self {
            host,
            themes,
            authored: None,
            config: FloorConfig::default(),
            layout: GeneratedFloorLayout::default(),
            arena: FloorArena::new(0),
            wiring: WiringReport::default(),
            current: None,
            floor_index: 0,
            epoch: 0,
            encounter_rng: FloorRng::default(),
            events: Vec::new(),
        }
    }

    /// Rooms to place when a theme has nothing to generate from
    pub fn with_authored_floor(mut self, floor: AuthoredFloor) -> Self {
        self.authored = Some(floor);
        self
    }

    // ---- accessors ----

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &FloorConfig {
        &self.config
    }

    pub fn layout(&self) -> &GeneratedFloorLayout {
        &self.layout
    }

    pub fn arena(&self) -> &FloorArena {
        &self.arena
    }

    pub fn wiring_report(&self) -> &WiringReport {
        &self.wiring
    }

    pub fn floor_index(&self) -> u32 {
        self.floor_index
    }

    /// Seed of the current floor
    pub fn seed(&self) -> u64 {
        self.layout.seed
    }

    pub fn current_room_id(&self) -> Option<RoomId> {
        self.current
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.current.and_then(|id| self.arena.room(id))
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.arena.room(id)
    }

    /// Queued notifications, oldest first, without draining them
    pub fn pending_events(&self) -> &[FloorEvent] {
        &self.events
    }

    /// Drain queued notifications, oldest first
    pub fn take_events(&mut self) -> Vec<FloorEvent> {
        mem::take(&mut self.events)
    }

    // ---- floor building ----

    /// Build floor `floor_index` and put the player in its start room
    ///
    /// A seed of 0 picks a fresh random seed. Returns the seed used. On
    /// error the current floor is left untouched.
    pub fn build_floor(&mut self, floor_index: u32, seed: u64) -> Result<u64, BuildError> {
        let seed = if seed == 0 { fresh_seed() } else { seed };
        let (config, layout) = self.plan_floor(floor_index, seed)?;

        self.teardown();
        self.epoch += 1;

        let mut arena = FloorArena::assemble(self.epoch, &layout, &config);
        self.wiring = wire_doors(&mut arena);
        self.arena = arena;
        self.config = config;
        self.layout = layout;
        self.floor_index = floor_index;
        self.encounter_rng = FloorRng::new(seed).derive(ENCOUNTER_STREAM_SALT);

        info!(
            "built floor {} ('{}') from seed {}: {} rooms, {} door pairs",
            floor_index,
            self.config.name,
            seed,
            self.arena.room_count(),
            self.wiring.linked_pairs
        );
        self.events.push(FloorEvent::FloorBuilt {
            floor_index,
            seed,
            rooms: self.arena.room_count(),
        });

        if let Some(start) = self.start_room() {
            let spawn = self.arena.room(start).map_or(WorldPos::ZERO, |r| r.player_spawn);
            self.enter_room(start, spawn);
        }
        Ok(seed)
    }

    /// Pick the catalog and layout for a floor without touching live state
    fn plan_floor(&self, floor_index: u32, seed: u64) -> Result<(FloorConfig, GeneratedFloorLayout), BuildError> {
        let theme_index = (floor_index as usize).min(self.themes.len().saturating_sub(1));
        match self.themes.get(theme_index) {
            Some(config) if !config.is_empty() => {
                let layout = generate(config, seed);
                if layout.room_count() > 0 {
                    return Ok((config.clone(), layout));
                }
                warn!("floor {} ('{}') produced no rooms", floor_index, config.name);
            }
            _ => warn!("floor {} has an empty catalog; using the authored room list", floor_index),
        }

        if let Some(authored) = self.authored.as_ref().filter(|a| !a.is_empty()) {
            let layout = authored.layout(seed);
            if layout.room_count() > 0 {
                return Ok((authored.config.clone(), layout));
            }
        }
        Err(BuildError::NoPlayableRooms { floor_index })
    }

    /// Hand every live enemy back to the host
    fn teardown(&mut self) {
        for enemy in self.arena.live_enemies() {
            self.host.despawn_enemy(enemy);
        }
        self.current = None;
    }

    fn start_room(&self) -> Option<RoomId> {
        self.arena
            .room_at(self.layout.start)
            .or_else(|| self.arena.rooms().first().map(|r| r.id))
    }

    // ---- room lifecycle ----

    fn enter_room(&mut self, room_id: RoomId, arrival: WorldPos) {
        if let Some(previous) = self.current.take()
            && let Some(room) = self.arena.room_mut(previous)
        {
            room.state = RoomState::Inactive;
        }
        self.host.move_player_to(arrival);
        self.activate_room(room_id);
    }

    fn activate_room(&mut self, room_id: RoomId) {
        let Some(room) = self.arena.room_mut(room_id) else {
            return;
        };
        room.state = RoomState::Active;
        let spawn = room.category.spawns_encounter() && !room.encounter_spawned;
        if spawn {
            room.encounter_spawned = true;
        }
        debug!("activated {} ({}) at {}", room_id, room.category, room.pos);

        self.current = Some(room_id);
        self.events.push(FloorEvent::RoomActivated { room: room_id });
        if spawn {
            self.spawn_encounter(room_id);
        }
        self.refresh_locks(room_id);
    }

    /// Lock the room's doors while it has enemies, unlock them otherwise
    fn refresh_locks(&mut self, room_id: RoomId) {
        let Some(cleared) = self.arena.room(room_id).map(Room::is_cleared) else {
            return;
        };
        let doors = self.arena.set_room_locked(room_id, !cleared);
        if doors.is_empty() {
            return;
        }
        self.events.push(if cleared {
            FloorEvent::DoorsUnlocked { room: room_id, doors }
        } else {
            FloorEvent::DoorsLocked { room: room_id, doors }
        });
    }

    fn spawn_encounter(&mut self, room_id: RoomId) {
        let Some(room) = self.arena.room(room_id) else {
            return;
        };
        let Some(template) = self.config.template(room.template) else {
            return;
        };

        let count = self.config.enemy_count(template, room.depth, &mut self.encounter_rng);
        let difficulty = self.config.difficulty_for_depth(room.depth, Some(template));

        let mut requests = Vec::with_capacity(count as usize);
        for n in 0..count as usize {
            let Some(prefab) = self.config.enemy_for_difficulty(difficulty, &mut self.encounter_rng) else {
                warn!(
                    "no enemy fits difficulty {:.1} in {}; spawning {} of {}",
                    difficulty, room_id, n, count
                );
                break;
            };
            requests.push(SpawnRequest {
                room: room_id,
                prefab: prefab.to_string(),
                position: room.spawn_position(n),
                difficulty,
            });
        }

        let mut spawned = 0;
        for request in &requests {
            if let Some(enemy) = self.host.spawn_enemy(request)
                && let Some(room) = self.arena.room_mut(room_id)
                && room.add_enemy(enemy)
            {
                spawned += 1;
            }
        }
        debug!("{}: spawned {} of {} requested enemies", room_id, spawned, requests.len());
    }

    // ---- enemy tracking ----

    /// Track an enemy in a room. Returns false for unknown rooms and
    /// enemies already tracked.
    pub fn register_enemy(&mut self, room_id: RoomId, enemy: EnemyId) -> bool {
        let Some(room) = self.arena.room_mut(room_id) else {
            warn!("cannot register {} in unknown {}", enemy, room_id);
            return false;
        };
        let added = room.add_enemy(enemy);
        if added && self.current == Some(room_id) {
            self.refresh_locks(room_id);
        }
        added
    }

    /// Stop tracking an enemy. Removing the last one clears the room and
    /// unlocks its doors.
    pub fn unregister_enemy(&mut self, room_id: RoomId, enemy: EnemyId) -> bool {
        let Some(room) = self.arena.room_mut(room_id) else {
            return false;
        };
        if !room.remove_enemy(enemy) {
            return false;
        }
        if room.is_cleared() {
            info!("{} cleared", room_id);
            self.events.push(FloorEvent::RoomCleared { room: room_id });
            let doors = self.arena.set_room_locked(room_id, false);
            if !doors.is_empty() {
                self.events.push(FloorEvent::DoorsUnlocked { room: room_id, doors });
            }
        }
        true
    }

    /// An enemy died somewhere on the floor
    pub fn on_enemy_died(&mut self, enemy: EnemyId) -> bool {
        match self.arena.room_of_enemy(enemy) {
            Some(room) => self.unregister_enemy(room, enemy),
            None => false,
        }
    }

    // ---- transitions ----

    /// The player touched a door trigger in the active room
    pub fn on_door_entered(&mut self, door: DoorId) -> Result<RoomId, TransitionError> {
        let partner = self.arena.partner(door);
        let from = self.usable_door(door)?;
        let partner = partner.ok_or(TransitionError::NotLinked(from))?;
        self.traverse(from, partner)
    }

    /// Move through `from` into the room owning `to`; the doors must be
    /// linked to each other
    pub fn enter_connected_room(&mut self, from: DoorId, to: DoorId) -> Result<RoomId, TransitionError> {
        if self.arena.door(to).is_none() {
            return Err(TransitionError::UnknownDoor(to));
        }
        let from = self.usable_door(from)?;
        match self.arena.partner(from) {
            None => Err(TransitionError::NotLinked(from)),
            Some(linked) if linked != to => Err(TransitionError::WrongPartner { from, to, linked }),
            Some(_) => self.traverse(from, to),
        }
    }

    /// A door of the active room that is linked and unlocked
    fn usable_door(&self, door_id: DoorId) -> Result<DoorId, TransitionError> {
        let door = self.arena.door(door_id).ok_or(TransitionError::UnknownDoor(door_id))?;
        if self.current != Some(door.room) {
            return Err(TransitionError::InactiveRoom {
                door: door_id,
                room: door.room,
            });
        }
        if !self.arena.is_linked(door_id) {
            return Err(TransitionError::NotLinked(door_id));
        }
        if door.locked {
            return Err(TransitionError::Locked(door_id));
        }
        Ok(door_id)
    }

    fn traverse(&mut self, from: DoorId, to: DoorId) -> Result<RoomId, TransitionError> {
        let target = self.arena.door(to).ok_or(TransitionError::UnknownDoor(to))?;
        let (room, entry) = (target.room, target.entry_point);
        debug!("door {} -> {} into {}", from, to, room);
        self.enter_room(room, entry);
        Ok(room)
    }

    // ---- run control ----

    /// Rebuild the current floor from a fresh seed and respawn the player
    pub fn on_player_died(&mut self) -> Result<u64, BuildError> {
        info!("player died on floor {}; rebuilding", self.floor_index);
        self.build_floor(self.floor_index, 0)
    }

    /// Advance to the next room in placement order, wrapping to the start
    /// room after the last one
    pub fn load_next_room(&mut self) -> Option<RoomId> {
        let next = match self.current {
            Some(id) => id.index as usize + 1,
            None => 0,
        };
        let Some(room) = self.arena.rooms().get(next) else {
            info!("last room of floor {} reached; restarting the run", self.floor_index);
            return self.restart_run();
        };
        let (id, spawn) = (room.id, room.player_spawn);
        self.enter_room(id, spawn);
        Some(id)
    }

    /// Put the player back in the start room without rebuilding
    pub fn restart_run(&mut self) -> Option<RoomId> {
        let start = self.start_room()?;
        let spawn = self.arena.room(start).map_or(WorldPos::ZERO, |r| r.player_spawn);
        self.enter_room(start, spawn);
        Some(start)
    }
}
