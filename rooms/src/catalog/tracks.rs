use jam_model::{id_set, room::MusicLink, user::User};
use tracing::debug;

use crate::metadata::LinkMetadata;

use super::catalog::{system_message, Catalog};

impl Catalog {
    pub fn add_link(&mut self, room_id: &str, link: MusicLink) -> bool {
        match self.get_mut(room_id) {
            Some(room) => {
                room.music_links.push(link);
                true
            }
            None => false,
        }
    }

    /// Flips the user's like on a link. Returns whether the user likes it now,
    /// `None` if the room or link does not exist.
    pub fn toggle_like(&mut self, room_id: &str, link_id: &str, user_id: &str) -> Option<bool> {
        let link = self.get_mut(room_id)?.link_mut(link_id)?;

        Some(id_set::toggle(&mut link.likes, user_id))
    }

    /// Only the user who shared a link can remove it
    pub fn remove_link(&mut self, room_id: &str, link_id: &str, actor: &User) -> bool {
        let Some(room) = self.get_mut(room_id) else {
            return false;
        };

        match room.link(link_id) {
            Some(link) if link.user.id == actor.id => {}
            Some(_) => {
                debug!(room = %room.id, link_id, actor = %actor.id, "only the submitter can remove a link");
                return false;
            }
            None => return false,
        }

        room.music_links.retain(|l| l.id != link_id);
        room.messages
            .push(system_message(format!("{} removed a shared link.", actor.name)));

        true
    }

    /// Moves the link at `from` to `to`, shifting the ones in between. Admins only.
    pub fn reorder_links(&mut self, room_id: &str, from: usize, to: usize, actor_id: &str) -> bool {
        let Some(room) = self.get_mut(room_id) else {
            return false;
        };

        let len = room.music_links.len();
        if !room.is_admin(actor_id) || from >= len || to >= len {
            return false;
        }
        if from == to {
            return true;
        }

        let link = room.music_links.remove(from);
        room.music_links.insert(to, link);

        true
    }

    /// Fills in a fetched title and thumbnail, links removed in the meantime are skipped
    pub fn apply_link_metadata(
        &mut self,
        room_id: &str,
        link_id: &str,
        metadata: LinkMetadata,
    ) -> bool {
        let Some(link) = self
            .get_mut(room_id)
            .and_then(|room| room.link_mut(link_id))
        else {
            return false;
        };

        if let Some(title) = metadata.title {
            link.title = title;
        }
        if metadata.thumbnail.is_some() {
            link.thumbnail = metadata.thumbnail;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use crate::seed;

    use super::*;

    fn ids(catalog: &Catalog, room: &str) -> Vec<String> {
        catalog
            .get(room)
            .unwrap()
            .music_links
            .iter()
            .map(|l| l.id.clone())
            .collect()
    }

    #[test]
    fn test_double_like_toggle_restores_likers() {
        let mut catalog = Catalog::new(seed::rooms());
        let before = catalog.get("CYBERPUNK").unwrap().music_links[0].likes.clone();

        assert_eq!(catalog.toggle_like("CYBERPUNK", "link-1", "mock-4"), Some(true));
        assert_eq!(catalog.toggle_like("CYBERPUNK", "link-1", "mock-4"), Some(false));

        assert_eq!(catalog.get("CYBERPUNK").unwrap().music_links[0].likes, before);
        assert_eq!(catalog.toggle_like("CYBERPUNK", "missing", "mock-4"), None);
    }

    #[test]
    fn test_only_submitter_removes_links() {
        let mut catalog = Catalog::new(seed::rooms());
        let users = seed::users();

        assert!(!catalog.remove_link("CYBERPUNK", "link-1", &users[1]));
        assert_eq!(ids(&catalog, "CYBERPUNK"), vec!["link-1", "link-2"]);

        assert!(catalog.remove_link("CYBERPUNK", "link-1", &users[0]));
        assert_eq!(ids(&catalog, "CYBERPUNK"), vec!["link-2"]);
        assert_eq!(
            catalog.get("CYBERPUNK").unwrap().messages.last().unwrap().text,
            "Synthwave_Kid removed a shared link."
        );
    }

    #[test]
    fn test_reorder_is_a_splice_move_for_admins_only() {
        let mut catalog = Catalog::new(seed::rooms());
        let link = catalog.get("CYBERPUNK").unwrap().music_links[0].clone();
        catalog.add_link(
            "CYBERPUNK",
            MusicLink {
                id: "link-9".into(),
                ..link
            },
        );

        assert!(!catalog.reorder_links("CYBERPUNK", 0, 2, "mock-1"));
        assert!(catalog.reorder_links("CYBERPUNK", 0, 2, "system-user"));
        assert_eq!(ids(&catalog, "CYBERPUNK"), vec!["link-2", "link-9", "link-1"]);

        assert!(catalog.reorder_links("CYBERPUNK", 2, 0, "system-user"));
        assert_eq!(ids(&catalog, "CYBERPUNK"), vec!["link-1", "link-2", "link-9"]);

        assert!(!catalog.reorder_links("CYBERPUNK", 0, 3, "system-user"));
    }

    #[test]
    fn test_apply_link_metadata() {
        let mut catalog = Catalog::new(seed::rooms());

        assert!(catalog.apply_link_metadata(
            "LOFIHIVE",
            "link-3",
            LinkMetadata {
                title: Some("Aruarian Dance".into()),
                thumbnail: Some("https://i.ytimg.com/x.jpg".into()),
            }
        ));
        let link = &catalog.get("LOFIHIVE").unwrap().music_links[0];
        assert_eq!(link.title, "Aruarian Dance");
        assert_eq!(link.thumbnail.as_deref(), Some("https://i.ytimg.com/x.jpg"));

        assert!(!catalog.apply_link_metadata("LOFIHIVE", "gone", LinkMetadata::default()));
    }
}
