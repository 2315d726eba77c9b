//! Parsing of what users paste into a room: music links, share links.

use jam_model::room::Platform;
use url::Url;

use crate::error::{JamError, Result};

const ALLOWED_HOSTS: [&str; 7] = [
    "spotify.com",
    "youtube.com",
    "youtu.be",
    "soundcloud.com",
    "music.apple.com",
    "bandcamp.com",
    "discogs.com",
];

const JOIN_FRAGMENT: &str = "#join=";
const UNTITLED: &str = "Untitled";

/// Returns the leading link of a chat input, if the input starts with one
pub fn extract_link(input: &str) -> Option<&str> {
    let input = input.trim();

    if !(input.starts_with("http://") || input.starts_with("https://")) {
        return None;
    }

    input.split_whitespace().next()
}

pub fn detect_platform(url: &str) -> Platform {
    if url.contains("spotify.com") {
        Platform::Spotify
    } else if url.contains("youtube.com") || url.contains("youtu.be") {
        Platform::YouTube
    } else if url.contains("soundcloud.com") {
        Platform::SoundCloud
    } else if url.contains("music.apple.com") {
        Platform::AppleMusic
    } else if url.contains("bandcamp.com") {
        Platform::Bandcamp
    } else if url.contains("discogs.com") {
        Platform::Discogs
    } else {
        Platform::Other
    }
}

/// Parses the url and checks the host is one of the supported music platforms or a subdomain of one
pub fn validate(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)?;
    let host = parsed.host_str().unwrap_or_default();

    let allowed = ALLOWED_HOSTS
        .iter()
        .any(|allowed| host == *allowed || host.ends_with(&format!(".{}", allowed)));

    if allowed {
        Ok(parsed)
    } else {
        Err(JamError::LinkRejected)
    }
}

/// Title used until metadata is fetched: the last path segment without the query
pub fn fallback_title(url: &str) -> String {
    url.rsplit('/')
        .next()
        .and_then(|segment| segment.split('?').next())
        .filter(|segment| !segment.is_empty())
        .unwrap_or(UNTITLED)
        .to_string()
}

/// A link which opens the app and joins the room, e.g. `https://jam.example/#join=LOFIHIVE`
pub fn share_link(origin: &str, room_id: &str) -> String {
    format!("{}{}{}", origin, JOIN_FRAGMENT, room_id)
}

/// The room code of a join request. Accepts a bare code, a `#join=` fragment or a whole share link.
pub fn join_code(input: &str) -> &str {
    let input = input.trim();

    match input.split_once(JOIN_FRAGMENT) {
        Some((_, code)) => code.trim(),
        None => input,
    }
}
