//! Likes, friend lists and admin lists are kept as ordered vectors so they
//! serialize the same way they are displayed, but never hold duplicates.

/// Adds `id` to the list, returns true if it was not present yet
pub fn insert(ids: &mut Vec<String>, id: &str) -> bool {
    if ids.iter().any(|existing| existing == id) {
        return false;
    }

    ids.push(String::from(id));

    true
}

/// Removes every occurrence of `id`, returns true if anything was removed
pub fn remove(ids: &mut Vec<String>, id: &str) -> bool {
    let before = ids.len();
    ids.retain(|existing| existing != id);

    ids.len() != before
}

/// Flips the membership of `id`, returns true if the id is now present
pub fn toggle(ids: &mut Vec<String>, id: &str) -> bool {
    if remove(ids, id) {
        false
    } else {
        ids.push(String::from(id));
        true
    }
}

pub fn contains(ids: &[String], id: &str) -> bool {
    ids.iter().any(|existing| existing == id)
}
