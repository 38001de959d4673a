//! Room registry
//!
//! Maps room names to rooms using DashMap for thread-safe get-or-create.

use super::Room;
use dashmap::DashMap;
use std::sync::Arc;

/// All rooms known to this process
///
/// Rooms are created on first use and never removed, even once empty.
pub struct RoomRegistry {
    /// Rooms by name
    rooms: DashMap<String, Arc<Room>>,
}

impl RoomRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Create an empty registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Get the room called `name`, creating it if needed
    ///
    /// Uses `entry` so that racing callers with the same name all receive the
    /// one room that was inserted.
    pub fn get(&self, name: &str) -> Arc<Room> {
        if let Some(room) = self.rooms.get(name) {
            return room.value().clone();
        }

        self.rooms
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::info!(room = %name, "Room created");
                Arc::new(Room::new(name))
            })
            .value()
            .clone()
    }

    /// Check if a room exists
    pub fn contains(&self, name: &str) -> bool {
        self.rooms.contains_key(name)
    }

    /// Get the number of rooms
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Check if no room has been created yet
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Get all room names, sorted
    pub fn room_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rooms.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RoomRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomRegistry")
            .field("rooms", &self.rooms.len())
            .finish()
    }
}
