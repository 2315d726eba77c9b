use serde::{Deserialize, Serialize};

use crate::{id_set, user::User};

pub const DEFAULT_WINDOW_WIDTH: f64 = 800.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 600.0;

/// Window status of a room on a user's desk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Open,
    Minimized,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Default for Size {
    fn default() -> Self {
        Size {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// A chat line, or a room announcement when authored by [User::system]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub text: String,
    /// Milliseconds since the unix epoch
    pub timestamp: i64,
}

impl Message {
    pub fn is_system(&self) -> bool {
        self.user.is_system()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Spotify,
    YouTube,
    SoundCloud,
    #[serde(rename = "Apple Music")]
    AppleMusic,
    Bandcamp,
    Discogs,
    Other,
}

/// A track shared in a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicLink {
    pub id: String,
    /// The user who shared the link
    pub user: User,
    pub url: String,
    pub platform: Platform,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub timestamp: i64,
    /// Ids of the users who liked the link
    #[serde(default)]
    pub likes: Vec<String>,
}

impl MusicLink {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        id_set::contains(&self.likes, user_id)
    }
}

/// What a user fills in when creating a room
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetails {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_private: bool,
}

/// A room as held by the public catalog, or as a window copy on a desk.
///
/// Window copies carry their own `status`, `position`, `size` and `z_index`,
/// catalog copies only use the shared fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// The short uppercase code used to join the room
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub is_private: bool,
    pub creator_id: String,
    pub admin_ids: Vec<String>,
    pub status: RoomStatus,
    pub position: Position,
    pub size: Size,
    pub messages: Vec<Message>,
    pub music_links: Vec<MusicLink>,
    pub users: Vec<User>,
    pub z_index: u32,
}

impl Room {
    pub fn is_creator(&self, user_id: &str) -> bool {
        self.creator_id == user_id
    }

    /// The creator is privileged even when missing from the admin list
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.is_creator(user_id) || id_set::contains(&self.admin_ids, user_id)
    }

    pub fn is_member(&self, user_id: &str) -> bool {
        self.users.iter().any(|u| u.id == user_id)
    }

    pub fn link(&self, link_id: &str) -> Option<&MusicLink> {
        self.music_links.iter().find(|l| l.id == link_id)
    }

    pub fn link_mut(&mut self, link_id: &str) -> Option<&mut MusicLink> {
        self.music_links.iter_mut().find(|l| l.id == link_id)
    }

    /// Case-insensitive substring match against name, description and tags
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();

        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            is_private: self.is_private,
            member_count: self.users.len(),
            track_count: self.music_links.len(),
        }
    }
}

/// The lobby card of a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub is_private: bool,
    pub member_count: usize,
    pub track_count: usize,
}
