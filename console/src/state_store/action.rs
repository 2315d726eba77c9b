use jam_model::command::Command;
use jam_rooms::metadata::LinkMetadata;

#[derive(Debug, Clone)]
pub enum Action {
    /// A command read from the console input
    Command(Command),
    /// Takes the room away from a kicked user, posted once the eviction delay passed
    EvictKicked {
        user_id: String,
        room_id: String,
        room_name: String,
    },
    /// Metadata found for a shared link
    LinkMetadata {
        room_id: String,
        link_id: String,
        metadata: LinkMetadata,
    },
    Exit,
}
