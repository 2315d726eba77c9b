use chrono::Utc;
use nanoid::nanoid;
use rand::Rng;

const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const ROOM_CODE_LEN: usize = 6;

/// A short uppercase alphanumeric invite code
pub fn room_code<R: Rng>(rng: &mut R) -> String {
    (0..ROOM_CODE_LEN)
        .map(|_| ROOM_CODE_ALPHABET[rng.gen_range(0..ROOM_CODE_ALPHABET.len())] as char)
        .collect()
}

/// Ids for messages, links, notifications and users, e.g. `msg-V1StGXR8_Z`
pub fn prefixed_id(prefix: &str) -> String {
    format!("{}-{}", prefix, nanoid!(10))
}

/// Milliseconds since the unix epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
