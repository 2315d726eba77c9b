use serde::{Deserialize, Serialize};

pub const SYSTEM_USER_ID: &str = "system";
const SYSTEM_USER_COLOR: &str = "#FFFF00";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnlineStatus {
    Online,
    Offline,
}

/// A member of the user directory.
///
/// The same struct is used for snapshots embedded in rooms, messages and links,
/// in which case the password is always stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Free form status text shown under the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_status: Option<OnlineStatus>,
    #[serde(default)]
    pub favorite_genres: Vec<String>,
    #[serde(default)]
    pub friend_ids: Vec<String>,
    /// Ids of users who sent a friend request which is not answered yet
    #[serde(default)]
    pub incoming_friend_requests: Vec<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        User {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            password: None,
            bio: None,
            status: None,
            online_status: None,
            favorite_genres: Vec::new(),
            friend_ids: Vec::new(),
            incoming_friend_requests: Vec::new(),
        }
    }

    /// The synthetic author of room announcements
    pub fn system() -> Self {
        User::new(SYSTEM_USER_ID, SYSTEM_USER_ID, SYSTEM_USER_COLOR)
    }

    pub fn is_system(&self) -> bool {
        self.id == SYSTEM_USER_ID
    }

    pub fn is_online(&self) -> bool {
        matches!(self.online_status, Some(OnlineStatus::Online))
    }

    /// Compares handles the way logins and signups do: trimmed and case-insensitive
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// A copy of the user which is safe to hand out or embed in rooms
    pub fn without_password(&self) -> Self {
        User {
            password: None,
            ..self.clone()
        }
    }

    /// Applies the fields present in the update
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(name) = update.name.as_ref() {
            self.name = name.trim().to_string();
        }
        if let Some(color) = update.color.as_ref() {
            self.color = color.clone();
        }
        if let Some(bio) = update.bio.as_ref() {
            self.bio = Some(bio.clone());
        }
        if let Some(status) = update.status.as_ref() {
            self.status = Some(status.clone());
        }
        if let Some(online_status) = update.online_status {
            self.online_status = Some(online_status);
        }
        if let Some(genres) = update.favorite_genres.as_ref() {
            self.favorite_genres = genres.clone();
        }
    }
}

/// A partial profile edit, absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_status: Option<OnlineStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_genres: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialization_uses_camel_case_and_skips_empty_options() {
        let mut user = User::new("user-1", "Neo", "#00FF41");
        user.online_status = Some(OnlineStatus::Online);
        user.friend_ids.push("mock-1".into());

        let serialized = serde_json::to_string(&user).unwrap();

        assert_eq!(
            serialized,
            r##"{"id":"user-1","name":"Neo","color":"#00FF41","onlineStatus":"online","favoriteGenres":[],"friendIds":["mock-1"],"incomingFriendRequests":[]}"##
        );
    }

    #[test]
    fn test_user_deserialization_defaults_missing_lists() {
        let user: User =
            serde_json::from_str(r##"{"id":"u","name":"n","color":"#fff","password":"secret"}"##)
                .unwrap();

        assert_eq!(user.password.as_deref(), Some("secret"));
        assert!(user.friend_ids.is_empty());
        assert!(user.incoming_friend_requests.is_empty());
        assert!(user.without_password().password.is_none());
    }

    #[test]
    fn test_has_name_is_case_insensitive_and_trimmed() {
        let user = User::new("u", "Glitch_Master", "#FF00FF");

        assert!(user.has_name("  glitch_master "));
        assert!(!user.has_name("glitch"));
    }

    #[test]
    fn test_apply_profile_update() {
        let mut user = User::new("u", "old", "#000");
        user.apply(&ProfileUpdate {
            name: Some(" new ".into()),
            bio: Some("hello".into()),
            ..Default::default()
        });

        assert_eq!(user.name, "new");
        assert_eq!(user.bio.as_deref(), Some("hello"));
        assert_eq!(user.color, "#000");
    }
}
