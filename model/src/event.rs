use serde::{Deserialize, Serialize};

use crate::{
    notification::Notification,
    room::{Position, Room, RoomStatus, RoomSummary},
    user::User,
};

/// The user has signed in, or signed up and got signed in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedInEvent {
    pub user: User,
}

/// Sign in or sign up was refused
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthFailedEvent {
    pub reason: String,
}

/// A window on the user's desk, without the room contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSummary {
    pub id: String,
    pub name: String,
    pub status: RoomStatus,
    pub position: Position,
    pub z_index: u32,
}

impl From<&Room> for WindowSummary {
    fn from(room: &Room) -> Self {
        WindowSummary {
            id: room.id.clone(),
            name: room.name.clone(),
            status: room.status,
            position: room.position,
            z_index: room.z_index,
        }
    }
}

/// The layout of the user's desk after a command was applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeskEvent {
    pub open: Vec<WindowSummary>,
    pub minimized: Vec<WindowSummary>,
    pub unread_notifications: usize,
    pub panel_open: bool,
    // Notification history, newest first. Only filled while the panel is open.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<Notification>,
}

/// A link which opens the app and joins the room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareLinkEvent {
    pub room: String,
    pub link: String,
}

/// Public rooms matching the current search, plus the ones the user liked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEvent {
    pub query: String,
    pub rooms: Vec<RoomSummary>,
    pub liked: Vec<RoomSummary>,
}

/// Friends and pending requests of the signed in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendsEvent {
    pub requests: Vec<User>,
    pub online: Vec<User>,
    pub offline: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
/// Events the console writes out.
/// Events are addressed to the signed in user of the console session
pub enum Event {
    SignedIn(SignedInEvent),
    AuthFailed(AuthFailedEvent),
    SignedOut,
    Notification(Notification),
    Desk(DeskEvent),
    Catalog(CatalogEvent),
    Room(Box<Room>),
    Profile(User),
    Friends(FriendsEvent),
    ShareLink(ShareLinkEvent),
}
