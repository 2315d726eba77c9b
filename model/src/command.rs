use serde::{Deserialize, Serialize};

use crate::{
    room::{Position, RoomDetails},
    user::ProfileUpdate,
};

/// Command for signing in or signing up with a handle and password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialsCommand {
    pub name: String,
    pub password: String,
}

/// Command addressing a single room by its code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomCommand {
    // The room code, matched case-insensitively.
    pub room: String,
}

/// Command for dragging a room window to a new position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRoomCommand {
    pub room: String,
    pub position: Position,
}

/// Command for typing into a room. Links are shared as tracks, anything else is a chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitCommand {
    pub room: String,
    pub input: String,
}

/// Command addressing a shared track inside a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackCommand {
    pub room: String,
    pub link: String,
}

/// Command for moving a track from one list index to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderTracksCommand {
    pub room: String,
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    Kick,
    Promote,
    Demote,
}

/// Command for a moderation action of a room admin against a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminCommand {
    pub room: String,
    pub action: AdminAction,
    // Id of the member the action is applied to.
    pub target: String,
}

/// Command addressing another user by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCommand {
    pub user: String,
}

/// Command for filtering the public catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCommand {
    pub query: String,
}

/// Command for quitting the console session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuitCommand;

/// A command which can be sent to the console.
/// All commands except the credential ones are applied on behalf of the signed in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_ct", rename_all = "snake_case")]
pub enum Command {
    Login(CredentialsCommand),
    Signup(CredentialsCommand),
    Logout,
    UpdateProfile(ProfileUpdate),
    SendFriendRequest(UserCommand),
    AcceptFriendRequest(UserCommand),
    RejectFriendRequest(UserCommand),
    RemoveFriend(UserCommand),
    CreateRoom(RoomDetails),
    // The room may also be given as a share link or a `#join=` fragment.
    JoinRoom(RoomCommand),
    ShareRoom(RoomCommand),
    FocusRoom(RoomCommand),
    MinimizeRoom(RoomCommand),
    RestoreRoom(RoomCommand),
    MoveRoom(MoveRoomCommand),
    CloseRoom(RoomCommand),
    ShutdownRoom(RoomCommand),
    Submit(SubmitCommand),
    LikeTrack(TrackCommand),
    RemoveTrack(TrackCommand),
    ReorderTracks(ReorderTracksCommand),
    Admin(AdminCommand),
    ToggleLikedRoom(RoomCommand),
    Search(SearchCommand),
    ViewRoom(RoomCommand),
    ViewProfile(UserCommand),
    ViewFriends,
    ToggleNotificationPanel,
    ClearNotifications,
    Quit(QuitCommand),
}
