use jam_model::{
    command::Command,
    event::{AuthFailedEvent, CatalogEvent, DeskEvent, Event, SignedInEvent, WindowSummary},
};
use jam_rooms::{metadata::LinkMetadata, Hub, JamError, SharedTrack, Submission};
use tracing::debug;

/// Side effects the store runs in the background once a command was applied
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Evict {
        user_id: String,
        room_id: String,
        room_name: String,
    },
    FetchMetadata(SharedTrack),
}

#[derive(Debug, Default)]
pub struct Reaction {
    pub events: Vec<Event>,
    pub effects: Vec<Effect>,
}

impl Reaction {
    fn events(events: Vec<Event>) -> Self {
        Reaction {
            events,
            effects: vec![],
        }
    }
}

/// [Session] is the console's view of the hub: whoever signed in last is the active user,
/// commands are applied on their behalf and events are addressed to them.
pub struct Session {
    hub: Hub,
    active_user: Option<String>,
}

impl Session {
    pub fn new(hub: Hub) -> Self {
        Session {
            hub,
            active_user: None,
        }
    }

    #[cfg(test)]
    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    #[cfg(test)]
    pub fn active_user(&self) -> Option<&str> {
        self.active_user.as_deref()
    }

    fn is_active(&self, user_id: &str) -> bool {
        self.active_user.as_deref() == Some(user_id)
    }

    pub fn apply(&mut self, command: Command) -> Reaction {
        let mut reaction = match command {
            Command::Login(credentials) => {
                let signed_in = self.hub.login(&credentials.name, &credentials.password);
                self.sign_in(signed_in)
            }
            Command::Signup(credentials) => {
                let signed_in = self.hub.signup(&credentials.name, &credentials.password);
                self.sign_in(signed_in)
            }
            command => match self.active_user.clone() {
                Some(user_id) => self.handle(&user_id, command).unwrap_or_else(|err| {
                    debug!(%err, %user_id, "command refused");
                    Reaction::default()
                }),
                None => Reaction::events(vec![Event::AuthFailed(AuthFailedEvent {
                    reason: "Sign in first.".into(),
                })]),
            },
        };

        reaction.events.extend(self.notifications());

        reaction
    }

    fn sign_in(&mut self, signed_in: jam_rooms::Result<jam_model::user::User>) -> Reaction {
        match signed_in {
            Ok(user) => {
                self.active_user = Some(user.id.clone());

                Reaction::events(
                    [
                        Some(Event::SignedIn(SignedInEvent { user: user.clone() })),
                        self.desk_event(&user.id),
                        self.catalog_event(&user.id),
                    ]
                    .into_iter()
                    .flatten()
                    .collect(),
                )
            }
            Err(err) => Reaction::events(vec![Event::AuthFailed(AuthFailedEvent {
                reason: err.to_string(),
            })]),
        }
    }

    fn handle(&mut self, user_id: &str, command: Command) -> jam_rooms::Result<Reaction> {
        let hub = &mut self.hub;
        let mut effects = vec![];

        let events = match command {
            Command::Login(_) | Command::Signup(_) | Command::Quit(_) => vec![],
            Command::Logout => {
                hub.logout(user_id);
                self.active_user = None;

                vec![Event::SignedOut]
            }
            Command::UpdateProfile(update) => {
                vec![Event::Profile(hub.update_profile(user_id, &update)?)]
            }
            Command::SendFriendRequest(c) => {
                hub.send_friend_request(user_id, &c.user)?;
                vec![Event::Friends(hub.friends(user_id)?)]
            }
            Command::AcceptFriendRequest(c) => {
                hub.accept_friend_request(user_id, &c.user)?;
                vec![Event::Friends(hub.friends(user_id)?)]
            }
            Command::RejectFriendRequest(c) => {
                hub.reject_friend_request(user_id, &c.user)?;
                vec![Event::Friends(hub.friends(user_id)?)]
            }
            Command::RemoveFriend(c) => {
                hub.remove_friend(user_id, &c.user)?;
                vec![Event::Friends(hub.friends(user_id)?)]
            }
            Command::ViewFriends => vec![Event::Friends(hub.friends(user_id)?)],
            Command::ViewProfile(c) => vec![Event::Profile(hub.profile(&c.user)?)],
            Command::CreateRoom(details) => {
                let room = hub.create_room(user_id, details)?;
                self.room_with_desk(user_id, &room.id, true)?
            }
            Command::JoinRoom(c) => {
                hub.join_room(user_id, &c.room)?;
                self.room_with_desk(user_id, &c.room, false)?
            }
            Command::ShareRoom(c) => vec![Event::ShareLink(hub.share_link(user_id, &c.room)?)],
            Command::FocusRoom(c) => {
                hub.focus_room(user_id, &c.room)?;
                self.desk_events(user_id)
            }
            Command::MinimizeRoom(c) => {
                hub.minimize_room(user_id, &c.room)?;
                self.desk_events(user_id)
            }
            Command::RestoreRoom(c) => {
                hub.restore_room(user_id, &c.room)?;
                self.desk_events(user_id)
            }
            Command::MoveRoom(c) => {
                hub.move_room(user_id, &c.room, c.position)?;
                self.desk_events(user_id)
            }
            Command::CloseRoom(c) => {
                hub.close_room(user_id, &c.room)?;
                self.desk_events(user_id)
            }
            Command::ShutdownRoom(c) => {
                hub.shutdown_room(user_id, &c.room)?;
                let mut events = self.desk_events(user_id);
                events.extend(self.catalog_event(user_id));
                events
            }
            Command::Submit(c) => {
                if let Submission::Track(track) = hub.submit(user_id, &c.room, &c.input)? {
                    effects.push(Effect::FetchMetadata(track));
                }
                self.room_events(user_id, &c.room)
            }
            Command::LikeTrack(c) => {
                hub.toggle_like(user_id, &c.room, &c.link)?;
                self.room_events(user_id, &c.room)
            }
            Command::RemoveTrack(c) => {
                hub.remove_track(user_id, &c.room, &c.link)?;
                self.room_events(user_id, &c.room)
            }
            Command::ReorderTracks(c) => {
                hub.reorder_tracks(user_id, &c.room, c.from, c.to)?;
                self.room_events(user_id, &c.room)
            }
            Command::Admin(c) => {
                let outcome = hub.admin_action(user_id, &c.room, c.action, &c.target)?;
                if let Some(outcome) = outcome {
                    if let Some(kicked) = outcome.kicked {
                        effects.push(Effect::Evict {
                            user_id: kicked,
                            room_id: outcome.room_id,
                            room_name: outcome.room_name,
                        });
                    }
                }
                self.room_events(user_id, &c.room)
            }
            Command::ViewRoom(c) => {
                let room = self.hub.window(user_id, &c.room)?;
                vec![Event::Room(Box::new(room.clone()))]
            }
            Command::ToggleLikedRoom(c) => {
                hub.toggle_liked_room(user_id, &c.room)?;
                self.catalog_event(user_id).into_iter().collect()
            }
            Command::Search(c) => {
                hub.search(user_id, &c.query)?;
                self.catalog_event(user_id).into_iter().collect()
            }
            Command::ToggleNotificationPanel => {
                hub.toggle_notification_panel(user_id)?;
                self.desk_events(user_id)
            }
            Command::ClearNotifications => {
                hub.clear_notifications(user_id)?;
                self.desk_events(user_id)
            }
        };

        Ok(Reaction { events, effects })
    }

    /// Applies the delayed removal of a kicked user
    pub fn evict(&mut self, user_id: &str, room_id: &str, room_name: &str) -> Reaction {
        let evicted = self.hub.evict(user_id, room_id, room_name);

        let mut events = self.notifications();
        if evicted && self.is_active(user_id) {
            events.extend(self.desk_events(user_id));
        }

        Reaction::events(events)
    }

    /// Applies fetched metadata, the active user sees the refreshed room if they have it open
    pub fn apply_link_metadata(
        &mut self,
        room_id: &str,
        link_id: &str,
        metadata: LinkMetadata,
    ) -> Reaction {
        if !self.hub.apply_link_metadata(room_id, link_id, metadata) {
            debug!(room_id, link_id, "metadata for a link which is gone");
            return Reaction::default();
        }

        let events = match self.active_user.clone() {
            Some(user_id) => self.room_events(&user_id, room_id),
            None => vec![],
        };

        Reaction::events(events)
    }

    fn notifications(&mut self) -> Vec<Event> {
        let mut events = vec![];

        for (user_id, notification) in self.hub.drain_outbox() {
            if self.is_active(&user_id) {
                events.push(Event::Notification(notification));
            } else {
                debug!(%user_id, message = %notification.message, "notification for an inactive user");
            }
        }

        events
    }

    fn room_with_desk(
        &self,
        user_id: &str,
        room_id: &str,
        with_catalog: bool,
    ) -> jam_rooms::Result<Vec<Event>> {
        let room = self.hub.window(user_id, room_id)?;

        let mut events = vec![Event::Room(Box::new(room.clone()))];
        events.extend(self.desk_events(user_id));
        if with_catalog {
            events.extend(self.catalog_event(user_id));
        }

        Ok(events)
    }

    /// The room as seen on the user's desk, nothing if it is not open there
    fn room_events(&self, user_id: &str, room_id: &str) -> Vec<Event> {
        match self.hub.window(user_id, room_id) {
            Ok(room) => vec![Event::Room(Box::new(room.clone()))],
            Err(JamError::RoomNotFound(_)) => vec![],
            Err(err) => {
                debug!(%err, user_id, room_id, "no room to show");
                vec![]
            }
        }
    }

    fn desk_events(&self, user_id: &str) -> Vec<Event> {
        self.desk_event(user_id).into_iter().collect()
    }

    fn desk_event(&self, user_id: &str) -> Option<Event> {
        let desk = self.hub.desk(user_id)?;
        let notifications = if desk.is_panel_open() {
            desk.notifications().iter().cloned().collect()
        } else {
            vec![]
        };

        Some(Event::Desk(DeskEvent {
            open: desk.open_windows().map(WindowSummary::from).collect(),
            minimized: desk.minimized_windows().map(WindowSummary::from).collect(),
            unread_notifications: desk.notifications().unread(),
            panel_open: desk.is_panel_open(),
            notifications,
        }))
    }

    fn catalog_event(&self, user_id: &str) -> Option<Event> {
        let desk = self.hub.desk(user_id)?;

        Some(Event::Catalog(CatalogEvent {
            query: desk.search_query().to_string(),
            rooms: self.hub.lobby(user_id).ok()?,
            liked: self.hub.liked_rooms(user_id).ok()?,
        }))
    }
}
