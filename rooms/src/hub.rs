use std::collections::HashMap;

use jam_model::{
    command::AdminAction,
    event::{FriendsEvent, ShareLinkEvent},
    notification::{Notification, Severity},
    room::{Message, MusicLink, Platform, Position, Room, RoomDetails, RoomStatus, RoomSummary},
    user::{ProfileUpdate, User},
};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use crate::{
    catalog::{normalize_code, system_message, AdminOutcome, Catalog},
    config::JamConfig,
    desk::Desk,
    directory::{UserDirectory, UserStore},
    error::{JamError, Result},
    ids::{now_millis, prefixed_id},
    links,
    metadata::LinkMetadata,
    seed,
};

const INVALID_ROOM_CODE: &str =
    "Invalid room code. The room may have been shut down or the code is incorrect.";

/// How a join request was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// A new window was opened
    Opened,
    /// The room was open on the desk already and got restored and focused
    Refocused,
}

/// A track which was added to a room and may still be enriched with metadata
#[derive(Debug, Clone, PartialEq)]
pub struct SharedTrack {
    pub room_id: String,
    pub link_id: String,
    pub url: String,
    pub platform: Platform,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Message,
    Track(SharedTrack),
    Ignored,
}

/// [Hub] owns all the state of a jam session: the users, the shared rooms and the desk of every
/// signed-in user.
///
/// Every mutation of the catalog is followed by a resync of all desks, so window copies never
/// drift from the rooms they show. Notifications are stored on the addressed desk and also queued
/// in an outbox which the caller drains to deliver them.
pub struct Hub {
    config: JamConfig,
    directory: UserDirectory,
    catalog: Catalog,
    desks: HashMap<String, Desk>,
    outbox: Vec<(String, Notification)>,
    rng: StdRng,
}

impl Hub {
    /// A hub with the built-in users and rooms, users rehydrated from the store
    pub fn new(config: JamConfig, store: Box<dyn UserStore>) -> Self {
        Self::with_rng(config, store, StdRng::from_entropy())
    }

    pub fn with_rng(config: JamConfig, store: Box<dyn UserStore>, rng: StdRng) -> Self {
        let directory = UserDirectory::open(store, seed::users());
        let catalog = Catalog::new(seed::rooms());

        info!(rooms = catalog.rooms().len(), "hub ready");

        Hub {
            config,
            directory,
            catalog,
            desks: HashMap::new(),
            outbox: Vec::new(),
            rng,
        }
    }

    pub fn config(&self) -> &JamConfig {
        &self.config
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn desk(&self, user_id: &str) -> Option<&Desk> {
        self.desks.get(user_id)
    }

    fn desk_mut(&mut self, user_id: &str) -> Result<&mut Desk> {
        self.desks
            .get_mut(user_id)
            .ok_or_else(|| JamError::NotSignedIn(user_id.to_string()))
    }

    /// The current snapshot of a signed-in user
    fn actor(&self, user_id: &str) -> Result<User> {
        if !self.desks.contains_key(user_id) {
            return Err(JamError::NotSignedIn(user_id.to_string()));
        }

        self.directory
            .get(user_id)
            .map(User::without_password)
            .ok_or(JamError::UserNotFound)
    }

    fn notify(&mut self, user_id: &str, message: impl Into<String>, severity: Severity) {
        if let Some(desk) = self.desks.get_mut(user_id) {
            let notification = desk.notify(message, severity);
            self.outbox.push((user_id.to_string(), notification));
        }
    }

    /// Notifications pushed since the last drain, with the id of the user they are addressed to
    pub fn drain_outbox(&mut self) -> Vec<(String, Notification)> {
        std::mem::take(&mut self.outbox)
    }

    fn sync_desks(&mut self) {
        for desk in self.desks.values_mut() {
            desk.sync(&self.catalog);
        }
    }

    fn open_desk(&mut self, user: &User) {
        let config = &self.config;
        self.desks
            .entry(user.id.clone())
            .or_insert_with(|| Desk::new(user.clone(), config));
    }

    pub fn login(&mut self, name: &str, password: &str) -> Result<User> {
        let user = self.directory.login(name, password)?;
        self.open_desk(&user);

        info!(user_id = %user.id, "user signed in");

        Ok(user)
    }

    pub fn signup(&mut self, name: &str, password: &str) -> Result<User> {
        let user = self.directory.signup(name, password)?;
        self.open_desk(&user);

        Ok(user)
    }

    /// Drops the user's desk with all of its windows
    pub fn logout(&mut self, user_id: &str) -> bool {
        let removed = self.desks.remove(user_id).is_some();
        if removed {
            info!(user_id, "user signed out");
        }

        removed
    }

    pub fn update_profile(&mut self, user_id: &str, update: &ProfileUpdate) -> Result<User> {
        self.actor(user_id)?;

        let user = match self.directory.update_profile(user_id, update) {
            Ok(user) => user,
            Err(JamError::HandleTaken) => {
                self.notify(user_id, "Username is already taken!", Severity::Error);
                return Err(JamError::HandleTaken);
            }
            Err(err) => return Err(err),
        };

        self.catalog.refresh_user(&user);
        self.desk_mut(user_id)?.set_user(user.clone());
        self.sync_desks();
        self.notify(user_id, "Profile updated!", Severity::Success);

        Ok(user)
    }

    pub fn send_friend_request(&mut self, user_id: &str, target_id: &str) -> Result<bool> {
        self.actor(user_id)?;

        let sent = self.directory.send_friend_request(user_id, target_id)?;
        if sent {
            self.notify(user_id, "Friend request sent!", Severity::Success);
        }

        Ok(sent)
    }

    pub fn accept_friend_request(&mut self, user_id: &str, requester_id: &str) -> Result<bool> {
        self.actor(user_id)?;

        let accepted = self.directory.accept_friend_request(user_id, requester_id)?;
        if accepted {
            self.notify(user_id, "Friend request accepted!", Severity::Success);
        }

        Ok(accepted)
    }

    pub fn reject_friend_request(&mut self, user_id: &str, requester_id: &str) -> Result<bool> {
        self.actor(user_id)?;

        let rejected = self.directory.reject_friend_request(user_id, requester_id)?;
        if rejected {
            self.notify(user_id, "Friend request rejected.", Severity::Info);
        }

        Ok(rejected)
    }

    pub fn remove_friend(&mut self, user_id: &str, friend_id: &str) -> Result<bool> {
        self.actor(user_id)?;

        let removed = self.directory.remove_friend(user_id, friend_id)?;
        if removed {
            self.notify(user_id, "Friend removed.", Severity::Info);
        }

        Ok(removed)
    }

    /// Pending requests and friends of the user, friends split by online status
    pub fn friends(&self, user_id: &str) -> Result<FriendsEvent> {
        let user = self.directory.get(user_id).ok_or(JamError::UserNotFound)?;
        let resolve = |ids: &[String]| -> Vec<User> {
            ids.iter()
                .filter_map(|id| self.directory.get(id))
                .map(User::without_password)
                .collect()
        };

        let (online, offline): (Vec<User>, Vec<User>) = resolve(&user.friend_ids)
            .into_iter()
            .partition(User::is_online);

        Ok(FriendsEvent {
            requests: resolve(&user.incoming_friend_requests),
            online,
            offline,
        })
    }

    pub fn profile(&self, user_id: &str) -> Result<User> {
        self.directory
            .get(user_id)
            .map(User::without_password)
            .ok_or(JamError::UserNotFound)
    }

    /// Creates a room owned by the user, lists it first in the catalog and opens it on their desk.
    /// Returns the window copy.
    pub fn create_room(&mut self, user_id: &str, details: RoomDetails) -> Result<Room> {
        let creator = self.actor(user_id)?;

        let name = details.name.trim();
        let description = details.description.trim();
        if name.is_empty() || description.is_empty() {
            return Err(JamError::MissingRoomDetails);
        }

        let code = self.catalog.unused_code(&mut self.rng);
        let mut announcement = format!("Room created by {}.", creator.name);
        if details.is_private {
            announcement.push_str(&format!(" The invite code is: {}", code));
        }

        let room = Room {
            id: code,
            name: name.to_string(),
            description: description.to_string(),
            tags: details
                .tags
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
            is_private: details.is_private,
            creator_id: creator.id.clone(),
            admin_ids: vec![creator.id.clone()],
            status: RoomStatus::Open,
            position: Position::default(),
            size: Default::default(),
            messages: vec![system_message(announcement)],
            music_links: vec![],
            users: vec![creator],
            z_index: 0,
        };

        info!(room = %room.id, user_id, private = room.is_private, "room created");

        self.catalog.insert_front(room.clone());

        let desk = self
            .desks
            .get_mut(user_id)
            .ok_or_else(|| JamError::NotSignedIn(user_id.to_string()))?;

        Ok(desk.open_window(&room, &mut self.rng).clone())
    }

    /// Opens the room on the user's desk, joining it when the user is not a member yet
    pub fn join_room(&mut self, user_id: &str, code: &str) -> Result<JoinOutcome> {
        let user = self.actor(user_id)?;
        let code = normalize_code(links::join_code(code));

        let desk = self.desk_mut(user_id)?;
        if desk.has_window(&code) {
            desk.restore(&code);
            return Ok(JoinOutcome::Refocused);
        }

        let Some(room) = self.catalog.add_member(&code, &user).cloned() else {
            debug!(user_id, %code, "join refused, unknown room");
            self.notify(user_id, INVALID_ROOM_CODE, Severity::Error);
            return Err(JamError::RoomNotFound(code));
        };

        let desk = self
            .desks
            .get_mut(user_id)
            .ok_or_else(|| JamError::NotSignedIn(user_id.to_string()))?;
        desk.open_window(&room, &mut self.rng);
        self.sync_desks();

        info!(user_id, room = %room.id, "room joined");

        Ok(JoinOutcome::Opened)
    }

    pub fn focus_room(&mut self, user_id: &str, room_id: &str) -> Result<bool> {
        Ok(self.desk_mut(user_id)?.focus(&normalize_code(room_id)))
    }

    pub fn minimize_room(&mut self, user_id: &str, room_id: &str) -> Result<bool> {
        Ok(self.desk_mut(user_id)?.minimize(&normalize_code(room_id)))
    }

    pub fn restore_room(&mut self, user_id: &str, room_id: &str) -> Result<bool> {
        Ok(self.desk_mut(user_id)?.restore(&normalize_code(room_id)))
    }

    pub fn move_room(
        &mut self,
        user_id: &str,
        room_id: &str,
        position: Position,
    ) -> Result<Option<Position>> {
        Ok(self
            .desk_mut(user_id)?
            .move_window(&normalize_code(room_id), position))
    }

    /// Closes the window on this desk only, the user stays a member of the room
    pub fn close_room(&mut self, user_id: &str, room_id: &str) -> Result<bool> {
        Ok(self
            .desk_mut(user_id)?
            .close(&normalize_code(room_id))
            .is_some())
    }

    /// Removes the room for everyone. Only its creator may do that, anyone else is ignored.
    pub fn shutdown_room(&mut self, user_id: &str, room_id: &str) -> Result<bool> {
        self.actor(user_id)?;

        match self.catalog.get(room_id) {
            Some(room) if room.is_creator(user_id) => {}
            Some(_) => {
                debug!(user_id, room_id, "shutdown refused, not the creator");
                return Ok(false);
            }
            None => return Ok(false),
        }

        let Some(room) = self.catalog.remove(room_id) else {
            return Ok(false);
        };
        self.sync_desks();

        info!(user_id, room = %room.id, "room shut down");
        self.notify(
            user_id,
            format!("Room \"{}\" has been shut down.", room.name),
            Severity::Success,
        );

        Ok(true)
    }

    /// Handles what the user typed into a room: a leading link is shared as a track,
    /// anything else is posted as a chat message
    pub fn submit(&mut self, user_id: &str, room_id: &str, input: &str) -> Result<Submission> {
        let user = self.actor(user_id)?;

        if input.trim().is_empty() {
            return Ok(Submission::Ignored);
        }

        let room = self
            .catalog
            .get(room_id)
            .ok_or_else(|| JamError::RoomNotFound(normalize_code(room_id)))?;
        if !room.is_member(user_id) {
            debug!(user_id, room = %room.id, "ignoring input of a non member");
            return Ok(Submission::Ignored);
        }

        if let Some(url) = links::extract_link(input) {
            let url = url.to_string();
            return self.share_track(user_id, room_id, &url).map(Submission::Track);
        }

        self.catalog.post_message(
            room_id,
            Message {
                id: prefixed_id("msg"),
                user,
                text: input.to_string(),
                timestamp: now_millis(),
            },
        );
        self.sync_desks();

        Ok(Submission::Message)
    }

    /// Adds a music link to the room. Invalid and unsupported links are refused with a
    /// notification to the user.
    pub fn share_track(&mut self, user_id: &str, room_id: &str, url: &str) -> Result<SharedTrack> {
        let user = self.actor(user_id)?;

        if let Err(err) = links::validate(url) {
            debug!(user_id, url, %err, "link refused");
            self.notify(user_id, err.to_string(), Severity::Error);
            return Err(err);
        }

        let platform = links::detect_platform(url);
        let link = MusicLink {
            id: prefixed_id("link"),
            user,
            url: url.to_string(),
            platform,
            title: links::fallback_title(url),
            thumbnail: None,
            timestamp: now_millis(),
            likes: vec![],
        };
        let link_id = link.id.clone();

        if !self.catalog.add_link(room_id, link) {
            return Err(JamError::RoomNotFound(normalize_code(room_id)));
        }
        self.sync_desks();

        info!(user_id, room_id, %link_id, ?platform, "track shared");

        Ok(SharedTrack {
            room_id: normalize_code(room_id),
            link_id,
            url: url.to_string(),
            platform,
        })
    }

    /// Returns whether the user likes the track now, `None` when there is no such track
    pub fn toggle_like(
        &mut self,
        user_id: &str,
        room_id: &str,
        link_id: &str,
    ) -> Result<Option<bool>> {
        self.actor(user_id)?;

        let liked = self.catalog.toggle_like(room_id, link_id, user_id);
        if liked.is_some() {
            self.sync_desks();
        }

        Ok(liked)
    }

    pub fn remove_track(&mut self, user_id: &str, room_id: &str, link_id: &str) -> Result<bool> {
        let user = self.actor(user_id)?;

        let removed = self.catalog.remove_link(room_id, link_id, &user);
        if removed {
            self.sync_desks();
        }

        Ok(removed)
    }

    pub fn reorder_tracks(
        &mut self,
        user_id: &str,
        room_id: &str,
        from: usize,
        to: usize,
    ) -> Result<bool> {
        self.actor(user_id)?;

        let moved = self.catalog.reorder_links(room_id, from, to, user_id);
        if moved {
            self.sync_desks();
        } else {
            debug!(user_id, room_id, from, to, "reorder ignored");
        }

        Ok(moved)
    }

    /// Promotes, demotes or kicks a member. Actions the user is not allowed to take are ignored.
    ///
    /// A kicked member keeps their window until [Hub::evict] is called for them.
    pub fn admin_action(
        &mut self,
        user_id: &str,
        room_id: &str,
        action: AdminAction,
        target_id: &str,
    ) -> Result<Option<AdminOutcome>> {
        let actor = self.actor(user_id)?;

        let target = self
            .catalog
            .get(room_id)
            .and_then(|room| room.users.iter().find(|u| u.id == target_id).cloned())
            .or_else(|| self.directory.get(target_id).map(User::without_password));
        let Some(target) = target else {
            return Ok(None);
        };

        let outcome = self.catalog.apply_admin_action(room_id, &actor, action, &target);

        if let Some(outcome) = outcome.as_ref() {
            info!(user_id, room = %outcome.room_id, target = target_id, ?action, "admin action applied");
            self.sync_desks();
        }

        Ok(outcome)
    }

    /// Takes the room away from a kicked user's desk. Users who joined again in the meantime,
    /// or who do not have the room open, are left alone.
    pub fn evict(&mut self, user_id: &str, room_id: &str, room_name: &str) -> bool {
        if self
            .catalog
            .get(room_id)
            .is_some_and(|room| room.is_member(user_id))
        {
            return false;
        }

        let closed = self
            .desks
            .get_mut(user_id)
            .and_then(|desk| desk.close(room_id))
            .is_some();

        if closed {
            info!(user_id, room_id, "kicked user evicted");
            self.notify(
                user_id,
                format!("You have been kicked from \"{}\".", room_name),
                Severity::Error,
            );
        }

        closed
    }

    pub fn apply_link_metadata(
        &mut self,
        room_id: &str,
        link_id: &str,
        metadata: LinkMetadata,
    ) -> bool {
        let applied = self.catalog.apply_link_metadata(room_id, link_id, metadata);
        if applied {
            self.sync_desks();
        }

        applied
    }

    pub fn toggle_liked_room(&mut self, user_id: &str, room_id: &str) -> Result<bool> {
        Ok(self
            .desk_mut(user_id)?
            .toggle_liked_room(&normalize_code(room_id)))
    }

    /// Remembers the query on the user's desk and returns the matching rooms
    pub fn search(&mut self, user_id: &str, query: &str) -> Result<Vec<RoomSummary>> {
        self.desk_mut(user_id)?.set_search_query(query.trim());

        Ok(Catalog::summaries(self.catalog.search(query.trim())))
    }

    /// Rooms matching the user's last search
    pub fn lobby(&self, user_id: &str) -> Result<Vec<RoomSummary>> {
        let desk = self
            .desk(user_id)
            .ok_or_else(|| JamError::NotSignedIn(user_id.to_string()))?;

        Ok(Catalog::summaries(self.catalog.search(desk.search_query())))
    }

    pub fn liked_rooms(&self, user_id: &str) -> Result<Vec<RoomSummary>> {
        let desk = self
            .desk(user_id)
            .ok_or_else(|| JamError::NotSignedIn(user_id.to_string()))?;

        Ok(Catalog::summaries(desk.liked_rooms(&self.catalog)))
    }

    /// The user's window copy of a room
    pub fn window(&self, user_id: &str, room_id: &str) -> Result<&Room> {
        self.desk(user_id)
            .ok_or_else(|| JamError::NotSignedIn(user_id.to_string()))?
            .window(&normalize_code(room_id))
            .ok_or_else(|| JamError::RoomNotFound(normalize_code(room_id)))
    }

    /// The invite link of a room the user has on their desk
    pub fn share_link(&self, user_id: &str, room_id: &str) -> Result<ShareLinkEvent> {
        let room = self.window(user_id, room_id)?;

        Ok(ShareLinkEvent {
            room: room.id.clone(),
            link: links::share_link(&self.config.share_origin, &room.id),
        })
    }

    /// Returns whether the panel is open now
    pub fn toggle_notification_panel(&mut self, user_id: &str) -> Result<bool> {
        Ok(self.desk_mut(user_id)?.toggle_panel())
    }

    pub fn clear_notifications(&mut self, user_id: &str) -> Result<()> {
        self.desk_mut(user_id)?.clear_notifications();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::directory::MemoryStore;

    use super::*;

    fn hub() -> Hub {
        Hub::with_rng(
            JamConfig::in_memory(),
            Box::new(MemoryStore::new()),
            StdRng::seed_from_u64(5),
        )
    }

    fn signed_up(hub: &mut Hub, name: &str) -> User {
        hub.signup(name, "secret1").unwrap()
    }

    fn details(name: &str, is_private: bool) -> RoomDetails {
        RoomDetails {
            name: format!("  {}  ", name),
            description: "late night tapes".into(),
            tags: vec![" tape ".into(), "  ".into()],
            is_private,
        }
    }

    #[test]
    fn test_create_room() {
        let mut hub = hub();
        let alice = signed_up(&mut hub, "alice");

        let window = hub.create_room(&alice.id, details("Tapes", true)).unwrap();

        assert_eq!(window.id.len(), 6);
        assert!(window
            .id
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert_eq!(window.z_index, 10);

        let room = &hub.catalog().rooms()[0];
        assert_eq!(room.id, window.id);
        assert_eq!(room.name, "Tapes");
        assert_eq!(room.tags, vec!["tape"]);
        assert_eq!(room.admin_ids, vec![alice.id.clone()]);
        assert_eq!(room.users.len(), 1);
        assert_eq!(room.users[0].id, alice.id);
        assert_eq!(
            room.messages[0].text,
            format!("Room created by alice. The invite code is: {}", room.id)
        );
    }

    #[test]
    fn test_create_room_requires_details() {
        let mut hub = hub();
        let alice = signed_up(&mut hub, "alice");

        let err = hub
            .create_room(
                &alice.id,
                RoomDetails {
                    name: " ".into(),
                    ..details("x", false)
                },
            )
            .unwrap_err();

        assert!(matches!(err, JamError::MissingRoomDetails));
    }

    #[test]
    fn test_join_twice_refocuses() {
        let mut hub = hub();
        let alice = signed_up(&mut hub, "alice");

        assert_eq!(hub.join_room(&alice.id, "lofihive").unwrap(), JoinOutcome::Opened);
        hub.join_room(&alice.id, "CYBERPUNK").unwrap();
        hub.minimize_room(&alice.id, "LOFIHIVE").unwrap();

        assert_eq!(hub.join_room(&alice.id, " LofiHive ").unwrap(), JoinOutcome::Refocused);

        let desk = hub.desk(&alice.id).unwrap();
        assert_eq!(desk.windows().len(), 2);
        let window = desk.window("LOFIHIVE").unwrap();
        assert_eq!(window.status, RoomStatus::Open);
        assert_eq!(window.z_index, 12);
        assert!(hub.catalog().get("LOFIHIVE").unwrap().is_member(&alice.id));
    }

    #[test]
    fn test_join_unknown_room_notifies() {
        let mut hub = hub();
        let alice = signed_up(&mut hub, "alice");

        let err = hub.join_room(&alice.id, "nope").unwrap_err();

        assert!(matches!(err, JamError::RoomNotFound(code) if code == "NOPE"));
        let outbox = hub.drain_outbox();
        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox[0].1.message, INVALID_ROOM_CODE);
        assert_eq!(outbox[0].1.severity, Severity::Error);
        assert!(hub.drain_outbox().is_empty());
    }

    #[test]
    fn test_share_link_joins_the_room() {
        let mut hub = hub();
        let alice = signed_up(&mut hub, "alice");
        let bob = signed_up(&mut hub, "bob");
        let room = hub.create_room(&alice.id, details("Tapes", true)).unwrap();

        let shared = hub.share_link(&alice.id, &room.id.to_lowercase()).unwrap();
        assert_eq!(shared.room, room.id);
        assert_eq!(shared.link, format!("http://localhost:5173/#join={}", room.id));

        // bob has no window for it yet
        assert!(matches!(
            hub.share_link(&bob.id, &room.id),
            Err(JamError::RoomNotFound(_))
        ));

        assert_eq!(hub.join_room(&bob.id, &shared.link).unwrap(), JoinOutcome::Opened);
        assert!(hub.catalog().get(&room.id).unwrap().is_member(&bob.id));
        assert_eq!(
            hub.join_room(&bob.id, &format!("#join={}", room.id.to_lowercase()))
                .unwrap(),
            JoinOutcome::Refocused
        );
    }

    #[test]
    fn test_shutdown_removes_the_room_everywhere() {
        let mut hub = hub();
        let alice = signed_up(&mut hub, "alice");
        let bob = signed_up(&mut hub, "bob");
        let room = hub.create_room(&alice.id, details("Tapes", false)).unwrap();
        hub.join_room(&bob.id, &room.id).unwrap();

        assert!(!hub.shutdown_room(&bob.id, &room.id).unwrap());
        assert!(hub.catalog().contains(&room.id));

        assert!(hub.shutdown_room(&alice.id, &room.id).unwrap());
        assert!(!hub.catalog().contains(&room.id));
        assert!(!hub.desk(&alice.id).unwrap().has_window(&room.id));
        assert!(!hub.desk(&bob.id).unwrap().has_window(&room.id));

        let outbox = hub.drain_outbox();
        assert_eq!(outbox.last().unwrap().0, alice.id);
        assert_eq!(
            outbox.last().unwrap().1.message,
            "Room \"Tapes\" has been shut down."
        );
    }

    #[test]
    fn test_kick_evicts_only_the_kicked_user() {
        let mut hub = hub();
        let alice = signed_up(&mut hub, "alice");
        let bob = signed_up(&mut hub, "bob");
        let carol = signed_up(&mut hub, "carol");
        let room = hub.create_room(&alice.id, details("Tapes", false)).unwrap();
        hub.join_room(&bob.id, &room.id).unwrap();
        hub.join_room(&carol.id, &room.id).unwrap();

        let outcome = hub
            .admin_action(&alice.id, &room.id, AdminAction::Kick, &bob.id)
            .unwrap()
            .unwrap();
        assert_eq!(outcome.kicked.as_deref(), Some(bob.id.as_str()));

        // the announcement reaches bob's window before the eviction
        let bob_window = hub.window(&bob.id, &room.id).unwrap();
        assert_eq!(
            bob_window.messages.last().unwrap().text,
            "bob was kicked from the room by alice."
        );

        assert!(hub.evict(&bob.id, &room.id, &outcome.room_name));
        assert!(!hub.desk(&bob.id).unwrap().has_window(&room.id));
        assert!(hub.desk(&carol.id).unwrap().has_window(&room.id));
        assert!(hub.desk(&alice.id).unwrap().has_window(&room.id));

        let (to, notification) = hub.drain_outbox().pop().unwrap();
        assert_eq!(to, bob.id);
        assert_eq!(notification.message, "You have been kicked from \"Tapes\".");
    }

    #[test]
    fn test_evict_spares_users_who_joined_again() {
        let mut hub = hub();
        let alice = signed_up(&mut hub, "alice");
        let bob = signed_up(&mut hub, "bob");
        let room = hub.create_room(&alice.id, details("Tapes", false)).unwrap();
        hub.join_room(&bob.id, &room.id).unwrap();
        hub.admin_action(&alice.id, &room.id, AdminAction::Kick, &bob.id)
            .unwrap();

        hub.close_room(&bob.id, &room.id).unwrap();
        hub.join_room(&bob.id, &room.id).unwrap();

        assert!(!hub.evict(&bob.id, &room.id, "Tapes"));
        assert!(hub.desk(&bob.id).unwrap().has_window(&room.id));
    }

    #[test]
    fn test_creator_cannot_be_kicked_or_demoted() {
        let mut hub = hub();
        let alice = signed_up(&mut hub, "alice");
        let bob = signed_up(&mut hub, "bob");
        let room = hub.create_room(&alice.id, details("Tapes", false)).unwrap();
        hub.join_room(&bob.id, &room.id).unwrap();
        hub.admin_action(&alice.id, &room.id, AdminAction::Promote, &bob.id)
            .unwrap();

        for action in [AdminAction::Kick, AdminAction::Demote] {
            assert_eq!(
                hub.admin_action(&bob.id, &room.id, action, &alice.id).unwrap(),
                None
            );
        }

        assert!(hub.catalog().get(&room.id).unwrap().is_admin(&alice.id));
        assert!(hub.catalog().get(&room.id).unwrap().is_member(&alice.id));
    }

    #[test]
    fn test_submit_routes_links_and_messages() {
        let mut hub = hub();
        let alice = signed_up(&mut hub, "alice");
        hub.join_room(&alice.id, "LOFIHIVE").unwrap();

        assert_eq!(hub.submit(&alice.id, "LOFIHIVE", "   ").unwrap(), Submission::Ignored);
        assert_eq!(
            hub.submit(&alice.id, "LOFIHIVE", "hello there").unwrap(),
            Submission::Message
        );

        let Submission::Track(track) = hub
            .submit(&alice.id, "LOFIHIVE", " https://soundcloud.com/artist/night-drive?in=x nice")
            .unwrap()
        else {
            panic!("expected a track");
        };
        assert_eq!(track.platform, Platform::SoundCloud);
        assert_eq!(track.url, "https://soundcloud.com/artist/night-drive?in=x");

        let window = hub.window(&alice.id, "LOFIHIVE").unwrap();
        assert_eq!(window.messages.last().unwrap().text, "hello there");
        let link = window.link(&track.link_id).unwrap();
        assert_eq!(link.title, "night-drive");
        assert_eq!(link.user.id, alice.id);
    }

    #[test]
    fn test_rejected_links_notify() {
        let mut hub = hub();
        let alice = signed_up(&mut hub, "alice");
        hub.join_room(&alice.id, "LOFIHIVE").unwrap();

        let err = hub
            .share_track(&alice.id, "LOFIHIVE", "https://evil.example.com/track")
            .unwrap_err();
        assert!(matches!(err, JamError::LinkRejected));

        let err = hub.submit(&alice.id, "LOFIHIVE", "https://").unwrap_err();
        assert!(matches!(err, JamError::InvalidUrl(_)));

        let messages: Vec<String> = hub
            .drain_outbox()
            .into_iter()
            .map(|(_, n)| n.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                JamError::LinkRejected.to_string(),
                "The URL you provided appears to be invalid.".to_string()
            ]
        );
    }

    #[test]
    fn test_double_like_restores_likers() {
        let mut hub = hub();
        let alice = signed_up(&mut hub, "alice");
        hub.join_room(&alice.id, "CYBERPUNK").unwrap();
        let before = hub.catalog().get("CYBERPUNK").unwrap().music_links[0].likes.clone();

        assert_eq!(hub.toggle_like(&alice.id, "CYBERPUNK", "link-1").unwrap(), Some(true));
        assert!(hub.window(&alice.id, "CYBERPUNK").unwrap().music_links[0].is_liked_by(&alice.id));
        assert_eq!(hub.toggle_like(&alice.id, "CYBERPUNK", "link-1").unwrap(), Some(false));

        assert_eq!(hub.catalog().get("CYBERPUNK").unwrap().music_links[0].likes, before);
    }

    #[test]
    fn test_profile_update_refreshes_rooms() {
        let mut hub = hub();
        let alice = signed_up(&mut hub, "alice");
        signed_up(&mut hub, "bob");
        hub.join_room(&alice.id, "LOFIHIVE").unwrap();

        let taken = hub.update_profile(
            &alice.id,
            &ProfileUpdate {
                name: Some("BOB".into()),
                ..ProfileUpdate::default()
            },
        );
        assert!(matches!(taken, Err(JamError::HandleTaken)));

        let user = hub
            .update_profile(
                &alice.id,
                &ProfileUpdate {
                    name: Some("alicia".into()),
                    ..ProfileUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(user.name, "alicia");
        assert_eq!(hub.desk(&alice.id).unwrap().user().name, "alicia");
        assert!(hub
            .window(&alice.id, "LOFIHIVE")
            .unwrap()
            .users
            .iter()
            .any(|u| u.name == "alicia"));

        let messages: Vec<String> = hub
            .drain_outbox()
            .into_iter()
            .map(|(_, n)| n.message)
            .collect();
        assert_eq!(messages, vec!["Username is already taken!", "Profile updated!"]);
    }

    #[test]
    fn test_friends() {
        let mut hub = hub();
        let alice = signed_up(&mut hub, "alice");
        let bob = signed_up(&mut hub, "bob");

        assert!(hub.send_friend_request(&alice.id, &bob.id).unwrap());
        assert_eq!(hub.friends(&bob.id).unwrap().requests[0].id, alice.id);

        // alice never got a request from bob
        assert!(!hub.accept_friend_request(&alice.id, &bob.id).unwrap());
        assert!(hub.friends(&alice.id).unwrap().online.is_empty());

        assert!(hub.accept_friend_request(&bob.id, &alice.id).unwrap());
        let friends = hub.friends(&bob.id).unwrap();
        assert!(friends.requests.is_empty());
        assert_eq!(friends.online.len(), 1);
        assert!(friends.online[0].password.is_none());

        assert!(hub.remove_friend(&alice.id, &bob.id).unwrap());
        assert!(hub.friends(&bob.id).unwrap().online.is_empty());
    }

    #[test]
    fn test_logout_drops_the_desk() {
        let mut hub = hub();
        let alice = signed_up(&mut hub, "alice");
        hub.join_room(&alice.id, "LOFIHIVE").unwrap();

        assert!(hub.logout(&alice.id));
        assert!(hub.desk(&alice.id).is_none());
        assert!(matches!(
            hub.join_room(&alice.id, "LOFIHIVE"),
            Err(JamError::NotSignedIn(_))
        ));

        let user = hub.login("ALICE", "secret1").unwrap();
        assert!(hub.desk(&user.id).unwrap().windows().is_empty());
    }

    #[test]
    fn test_search_is_remembered() {
        let mut hub = hub();
        let alice = signed_up(&mut hub, "alice");

        let found = hub.search(&alice.id, "  RETRO ").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "SYNTHRIDERS");

        assert_eq!(hub.lobby(&alice.id).unwrap(), found);
        assert_eq!(hub.desk(&alice.id).unwrap().search_query(), "RETRO");
    }
}
