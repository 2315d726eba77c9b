use jam_model::{
    room::{Message, Room, RoomSummary},
    user::User,
};
use rand::Rng;

use crate::ids::{self, now_millis, prefixed_id};

/// A system announcement stamped now
pub fn system_message(text: impl Into<String>) -> Message {
    Message {
        id: prefixed_id("msg"),
        user: User::system(),
        text: text.into(),
        timestamp: now_millis(),
    }
}

/// [Catalog] is the shared copy of every live room.
///
/// Desks hold window copies of these rooms and are resynchronized from here after each change,
/// so everything that several users see goes through the catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rooms: Vec<Room>,
}

impl Catalog {
    pub fn new(rooms: Vec<Room>) -> Self {
        Catalog { rooms }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Codes are matched case-insensitively
    pub fn get(&self, code: &str) -> Option<&Room> {
        let code = normalize_code(code);

        self.rooms.iter().find(|r| r.id == code)
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut Room> {
        let code = normalize_code(code);

        self.rooms.iter_mut().find(|r| r.id == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// New rooms go first in the lobby
    pub fn insert_front(&mut self, room: Room) {
        self.rooms.insert(0, room);
    }

    pub fn remove(&mut self, code: &str) -> Option<Room> {
        let code = normalize_code(code);
        let index = self.rooms.iter().position(|r| r.id == code)?;

        Some(self.rooms.remove(index))
    }

    /// A random room code which is not used by any room yet
    pub fn unused_code<R: Rng>(&self, rng: &mut R) -> String {
        loop {
            let code = ids::room_code(rng);

            if !self.contains(&code) {
                return code;
            }
        }
    }

    /// Adds the user to the room's members unless they are in already.
    /// Returns the updated room.
    pub fn add_member(&mut self, code: &str, user: &User) -> Option<&Room> {
        let room = self.get_mut(code)?;

        if !room.is_member(&user.id) {
            room.users.push(user.without_password());
        }

        Some(room)
    }

    pub fn post_message(&mut self, code: &str, message: Message) -> bool {
        match self.get_mut(code) {
            Some(room) => {
                room.messages.push(message);
                true
            }
            None => false,
        }
    }

    /// Replaces every snapshot of the user: in members, message authors and link submitters
    pub fn refresh_user(&mut self, user: &User) {
        let snapshot = user.without_password();

        for room in self.rooms.iter_mut() {
            room.users
                .iter_mut()
                .chain(room.messages.iter_mut().map(|m| &mut m.user))
                .chain(room.music_links.iter_mut().map(|l| &mut l.user))
                .filter(|u| u.id == snapshot.id)
                .for_each(|u| *u = snapshot.clone());
        }
    }

    pub fn search(&self, query: &str) -> Vec<&Room> {
        self.rooms.iter().filter(|r| r.matches(query)).collect()
    }

    pub fn summaries<'a>(rooms: impl IntoIterator<Item = &'a Room>) -> Vec<RoomSummary> {
        rooms.into_iter().map(Room::summary).collect()
    }
}

pub(crate) fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::seed;

    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = Catalog::new(seed::rooms());

        assert_eq!(catalog.get(" lofihive ").unwrap().name, "Lofi Hive");
        assert!(catalog.get("nope").is_none());
    }

    #[test]
    fn test_add_member_has_set_semantics() {
        let mut catalog = Catalog::new(seed::rooms());
        let user = seed::users()[0].clone();

        let before = catalog.get("CYBERPUNK").unwrap().users.len();
        catalog.add_member("CYBERPUNK", &user);
        assert_eq!(catalog.get("CYBERPUNK").unwrap().users.len(), before);

        catalog.add_member("METALFORGE", &user);
        assert!(catalog.get("METALFORGE").unwrap().is_member(&user.id));
    }

    #[test]
    fn test_unused_code_avoids_existing_rooms() {
        let catalog = Catalog::new(seed::rooms());
        let mut rng = StdRng::seed_from_u64(1);

        let code = catalog.unused_code(&mut rng);

        assert!(!catalog.contains(&code));
    }

    #[test]
    fn test_refresh_user_updates_every_snapshot() {
        let mut catalog = Catalog::new(seed::rooms());
        let mut user = seed::users()[0].clone();
        user.name = "Neon_Kid".into();
        catalog.post_message(
            "CYBERPUNK",
            Message {
                id: "m".into(),
                user: seed::users()[0].clone(),
                text: "hi".into(),
                timestamp: 0,
            },
        );

        catalog.refresh_user(&user);

        let room = catalog.get("CYBERPUNK").unwrap();
        assert!(room.users.iter().any(|u| u.name == "Neon_Kid"));
        assert_eq!(room.messages[0].user.name, "Neon_Kid");
        assert_eq!(room.music_links[0].user.name, "Neon_Kid");
    }

    #[test]
    fn test_search() {
        let catalog = Catalog::new(seed::rooms());

        let found: Vec<&str> = catalog
            .search("SYNTH")
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();

        assert_eq!(found, vec!["CYBERPUNK", "SYNTHRIDERS"]);
    }
}
