/// Set of commands which the console can receive and apply to the rooms hub
pub mod command;
/// Set of events the console emits after applying commands
pub mod event;
/// Helpers giving ordered id lists set semantics
pub mod id_set;
/// Notification history entries
pub mod notification;
/// Rooms, messages and shared music links
pub mod room;
/// Newline delimited JSON transport of commands and events over any async byte stream.
/// Requires 'console' or 'driver' features to be enabled and will bring in tokio dependency alongside with other dependencies
pub mod transport;
/// Users and profile updates
pub mod user;
