//! Built-in users and public rooms the hub starts with.

use jam_model::{
    room::{MusicLink, Platform, Position, Room, RoomStatus, Size},
    user::{OnlineStatus, User},
};

use crate::ids::now_millis;

fn mock_user(
    id: &str,
    name: &str,
    color: &str,
    online: bool,
    status: Option<&str>,
    bio: &str,
    genres: &[&str],
) -> User {
    User {
        online_status: Some(if online {
            OnlineStatus::Online
        } else {
            OnlineStatus::Offline
        }),
        status: status.map(String::from),
        bio: Some(String::from(bio)),
        favorite_genres: genres.iter().map(|g| g.to_string()).collect(),
        ..User::new(id, name, color)
    }
}

/// The directory entries every hub knows about, saved users with the same id win over these
#[rustfmt::skip]
pub fn users() -> Vec<User> {
    vec![
        mock_user("mock-1", "Synthwave_Kid", "#00FFFF", true, Some("Cruising the neon grid"), "Just a guy looking for the next best synth track.", &["synthwave", "retrowave"]),
        mock_user("mock-2", "Glitch_Master", "#FF00FF", true, Some("Deconstructing beats"), "If it doesn't glitch, it isn't music.", &["glitch", "idm", "experimental"]),
        mock_user("mock-3", "Beat_Prophet", "#FFFF00", false, Some("In the zone"), "Producer and DJ. All about that lofi life.", &["lofi hip-hop", "chillhop"]),
        mock_user("mock-4", "Rhythm_Rider", "#39FF14", true, None, "Riding the sound waves.", &["drum & bass", "jungle"]),
        mock_user("mock-5", "Echo_Drifter", "#FF5F1F", true, None, "Ambient soundscapes and dreamy vocals are my jam.", &["ambient", "dreampop", "shoegaze"]),
    ]
}

fn mock_link(
    id: &str,
    user: &User,
    url: &str,
    platform: Platform,
    title: &str,
    age_millis: i64,
    likes: &[&User],
) -> MusicLink {
    MusicLink {
        id: String::from(id),
        user: user.clone(),
        url: String::from(url),
        platform,
        title: String::from(title),
        thumbnail: None,
        timestamp: now_millis() - age_millis,
        likes: likes.iter().map(|u| u.id.clone()).collect(),
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_room(
    id: &str,
    name: &str,
    description: &str,
    tags: &[&str],
    is_private: bool,
    creator_id: &str,
    music_links: Vec<MusicLink>,
    users: Vec<User>,
) -> Room {
    Room {
        id: String::from(id),
        name: String::from(name),
        description: String::from(description),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        is_private,
        creator_id: String::from(creator_id),
        admin_ids: vec![String::from(creator_id)],
        status: RoomStatus::Open,
        position: Position::default(),
        size: Size::default(),
        messages: Vec::new(),
        music_links,
        users,
        z_index: 0,
    }
}

/// The public catalog the hub starts with
#[rustfmt::skip]
pub fn rooms() -> Vec<Room> {
    let u = users();
    let links = [
        mock_link("link-1", &u[0], "https://soundcloud.com/kavinsky/kavinsky-nightcall", Platform::SoundCloud, "Kavinsky - Nightcall", 200_000, &[&u[1], &u[4]]),
        mock_link("link-2", &u[1], "https://www.youtube.com/watch?v=5qap5aO4i9A", Platform::YouTube, "Aphex Twin - T69 Collapse", 150_000, &[]),
        mock_link("link-3", &u[2], "https://www.youtube.com/watch?v=jfKfPfyJRdk", Platform::YouTube, "Nujabes - Aruarian Dance", 100_000, &[&u[0], &u[3], &u[4]]),
    ];

    vec![
        seed_room("CYBERPUNK", "Cyberpunk Beats", "Synthwave, Darksynth, and Cyberpunk ambient. Drop your futuristic tracks.", &["synthwave", "darksynth", "cyberpunk"], false, "system-user", vec![links[0].clone(), links[1].clone()], vec![u[0].clone(), u[1].clone(), u[4].clone()]),
        seed_room("LOFIHIVE", "Lofi Hive", "Chill beats to relax/study to. Keep it mellow.", &["lofi", "chillhop", "instrumental"], false, "system-user-2", vec![links[2].clone()], vec![u[2].clone(), u[3].clone()]),
        seed_room("SYNTHRIDERS", "Synth Riders", "High-energy synthwave and retrowave for driving at night.", &["retrowave", "80s", "synthpop"], false, "system-user-3", vec![], vec![u[0].clone(), u[3].clone()]),
        seed_room("AMBIENTZONE", "Ambient Zone", "Deep, atmospheric, and immersive soundscapes.", &["ambient", "drone", "soundscape"], true, "system-user-4", vec![], vec![u[4].clone()]),
        seed_room("METALFORGE", "Metal Forge", "For all things heavy. From classic rock to modern metal.", &["metal", "rock", "heavy"], false, "system-user-5", vec![], vec![]),
    ]
}
