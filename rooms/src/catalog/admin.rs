use jam_model::{command::AdminAction, id_set, user::User};
use tracing::debug;

use super::catalog::{system_message, Catalog};

/// What a moderation action changed
#[derive(Debug, Clone, PartialEq)]
pub struct AdminOutcome {
    pub room_id: String,
    pub room_name: String,
    /// The announcement appended to the room
    pub announcement: String,
    /// Id of the user who was removed from the room, for kicks
    pub kicked: Option<String>,
}

impl Catalog {
    /// Applies a moderation action of `actor` against `target`.
    ///
    /// Returns `None` and changes nothing when the actor is not an admin of the room,
    /// when the target is the room's creator (for kick and demote), or when the action
    /// would not change anything.
    pub fn apply_admin_action(
        &mut self,
        room_id: &str,
        actor: &User,
        action: AdminAction,
        target: &User,
    ) -> Option<AdminOutcome> {
        let room = self.get_mut(room_id)?;

        if !room.is_admin(&actor.id) {
            debug!(room = %room.id, actor = %actor.id, ?action, "ignoring admin action of a non admin");
            return None;
        }

        let mut kicked = None;
        let announcement = match action {
            AdminAction::Kick => {
                if room.is_creator(&target.id) || !room.is_member(&target.id) {
                    return None;
                }

                room.users.retain(|u| u.id != target.id);
                id_set::remove(&mut room.admin_ids, &target.id);
                kicked = Some(target.id.clone());

                format!("{} was kicked from the room by {}.", target.name, actor.name)
            }
            AdminAction::Promote => {
                if room.is_admin(&target.id) || !room.is_member(&target.id) {
                    return None;
                }

                id_set::insert(&mut room.admin_ids, &target.id);

                format!("{} was promoted to admin by {}.", target.name, actor.name)
            }
            AdminAction::Demote => {
                if room.is_creator(&target.id)
                    || !id_set::remove(&mut room.admin_ids, &target.id)
                {
                    return None;
                }

                format!("{} was demoted by {}.", target.name, actor.name)
            }
        };

        room.messages.push(system_message(announcement.clone()));

        Some(AdminOutcome {
            room_id: room.id.clone(),
            room_name: room.name.clone(),
            announcement,
            kicked,
        })
    }
}
