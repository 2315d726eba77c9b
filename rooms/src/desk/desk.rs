use jam_model::{
    id_set,
    notification::{Notification, Severity},
    room::{Position, Room, RoomStatus},
    user::User,
};
use rand::Rng;

use crate::{catalog::Catalog, config::JamConfig};

use super::{layout::Layout, notifications::NotificationCenter};

/// [Desk] is what a single signed-in user has in front of them: their open room windows,
/// notification history, liked rooms and last search.
///
/// Windows are copies of catalog rooms. Their position, size, status and z-index belong to
/// the desk, everything else is overwritten by [Desk::sync] whenever the catalog changes.
#[derive(Debug, Clone)]
pub struct Desk {
    user: User,
    windows: Vec<Room>,
    next_z: u32,
    liked_rooms: Vec<String>,
    notifications: NotificationCenter,
    panel_open: bool,
    search_query: String,
    layout: Layout,
}

impl Desk {
    pub fn new(user: User, config: &JamConfig) -> Self {
        Desk {
            user,
            windows: vec![],
            next_z: config.first_z_index,
            liked_rooms: vec![],
            notifications: NotificationCenter::new(config.notification_history),
            panel_open: false,
            search_query: String::new(),
            layout: Layout::new(&config.layout),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn set_user(&mut self, user: User) {
        self.user = user;
    }

    pub fn windows(&self) -> &[Room] {
        &self.windows
    }

    pub fn window(&self, room_id: &str) -> Option<&Room> {
        self.windows.iter().find(|w| w.id == room_id)
    }

    fn window_mut(&mut self, room_id: &str) -> Option<&mut Room> {
        self.windows.iter_mut().find(|w| w.id == room_id)
    }

    pub fn has_window(&self, room_id: &str) -> bool {
        self.window(room_id).is_some()
    }

    pub fn next_z(&self) -> u32 {
        self.next_z
    }

    fn take_z(&mut self) -> u32 {
        let z = self.next_z;
        self.next_z += 1;
        z
    }

    /// Opens a window copy of the room on top of the others. An already open window is kept as is.
    pub fn open_window<R: Rng>(&mut self, room: &Room, rng: &mut R) -> &Room {
        if let Some(index) = self.windows.iter().position(|w| w.id == room.id) {
            return &self.windows[index];
        }

        let window = Room {
            status: RoomStatus::Open,
            position: self.layout.place(rng),
            size: self.layout.window_size(),
            z_index: self.take_z(),
            ..room.clone()
        };
        self.windows.push(window);

        &self.windows[self.windows.len() - 1]
    }

    /// Brings the window to the front, a window which is already topmost keeps its z-index
    pub fn focus(&mut self, room_id: &str) -> bool {
        let top = self.next_z.saturating_sub(1);
        let raise = match self.window(room_id) {
            Some(window) => window.z_index < top,
            None => return false,
        };

        if raise {
            let z = self.take_z();
            if let Some(window) = self.window_mut(room_id) {
                window.z_index = z;
            }
        }

        true
    }

    pub fn minimize(&mut self, room_id: &str) -> bool {
        match self.window_mut(room_id) {
            Some(window) => {
                window.status = RoomStatus::Minimized;
                true
            }
            None => false,
        }
    }

    pub fn restore(&mut self, room_id: &str) -> bool {
        match self.window_mut(room_id) {
            Some(window) => window.status = RoomStatus::Open,
            None => return false,
        }

        self.focus(room_id)
    }

    pub fn close(&mut self, room_id: &str) -> Option<Room> {
        let index = self.windows.iter().position(|w| w.id == room_id)?;

        Some(self.windows.remove(index))
    }

    /// Returns the clamped position the window ended up at
    pub fn move_window(&mut self, room_id: &str, position: Position) -> Option<Position> {
        let position = self.layout.clamp(position);
        let window = self.window_mut(room_id)?;
        window.position = position;

        Some(position)
    }

    pub fn open_windows(&self) -> impl Iterator<Item = &Room> {
        self.windows
            .iter()
            .filter(|w| w.status == RoomStatus::Open)
    }

    pub fn minimized_windows(&self) -> impl Iterator<Item = &Room> {
        self.windows
            .iter()
            .filter(|w| w.status == RoomStatus::Minimized)
    }

    /// Drops windows of rooms which left the catalog and refreshes the shared fields of the rest
    pub fn sync(&mut self, catalog: &Catalog) {
        self.windows.retain(|w| catalog.contains(&w.id));

        for window in self.windows.iter_mut() {
            let Some(shared) = catalog.get(&window.id) else {
                continue;
            };

            *window = Room {
                status: window.status,
                position: window.position,
                size: window.size,
                z_index: window.z_index,
                ..shared.clone()
            };
        }
    }

    /// Returns whether the room is liked now
    pub fn toggle_liked_room(&mut self, room_id: &str) -> bool {
        id_set::toggle(&mut self.liked_rooms, room_id)
    }

    pub fn liked_room_ids(&self) -> &[String] {
        &self.liked_rooms
    }

    /// Liked rooms which are still in the catalog, in catalog order
    pub fn liked_rooms<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Room> {
        catalog
            .rooms()
            .iter()
            .filter(|r| id_set::contains(&self.liked_rooms, &r.id))
            .collect()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> Notification {
        self.notifications.push(message, severity)
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Opening the panel marks every notification as read. Returns whether it is open now.
    pub fn toggle_panel(&mut self) -> bool {
        self.panel_open = !self.panel_open;
        if self.panel_open {
            self.notifications.mark_all_read();
        }

        self.panel_open
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }
}
