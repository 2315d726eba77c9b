/// Shared copy of every live room, with the membership, moderation and track rules
pub mod catalog;
/// Layered configuration of the hub
pub mod config;
/// Per user window manager and notification history
pub mod desk;
/// Known users, their friendships and where they are persisted
pub mod directory;
pub mod error;
/// Entry point tying users, rooms and desks together
pub mod hub;
pub mod ids;
pub mod links;
pub mod metadata;
/// Built-in users and rooms every session starts with
pub mod seed;

pub use self::config::JamConfig;
pub use self::error::{JamError, Result};
pub use self::hub::{Hub, JoinOutcome, SharedTrack, Submission};
