use jam_model::{
    id_set,
    user::{OnlineStatus, ProfileUpdate, User},
};
use tracing::{debug, error, info, warn};

use crate::{
    error::{JamError, Result},
    ids::prefixed_id,
};

use super::persistence::UserStore;

const MIN_PASSWORD_LEN: usize = 6;
const NEW_USER_COLOR: &str = "#00FF41";

/// [UserDirectory] holds every known user and writes itself to its [UserStore] after each change
pub struct UserDirectory {
    users: Vec<User>,
    store: Box<dyn UserStore>,
}

impl UserDirectory {
    /// Rehydrates the directory from the store, layered over the seed users.
    /// A saved user replaces the seed user with the same id, new ids are appended.
    /// If the store cannot be read the seeds are used alone.
    pub fn open(store: Box<dyn UserStore>, seeds: Vec<User>) -> Self {
        let saved = store.load().unwrap_or_else(|err| {
            error!(%err, "failed to load users, falling back to the built-in ones");
            Vec::new()
        });

        let mut users = seeds;
        for user in saved {
            match users.iter_mut().find(|u| u.id == user.id) {
                Some(existing) => *existing = user,
                None => users.push(user),
            }
        }

        info!(count = users.len(), "user directory loaded");

        UserDirectory { users, store }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Handles are matched trimmed and case-insensitively
    pub fn find_by_name(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|u| u.has_name(name))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(JamError::UserNotFound)
    }

    /// Failures are logged only, the in-memory directory stays authoritative
    fn persist(&self) {
        if let Err(err) = self.store.save(&self.users) {
            warn!(%err, "failed to save users");
        }
    }

    /// Returns the matching user without their password
    pub fn login(&self, name: &str, password: &str) -> Result<User> {
        if name.trim().is_empty() || password.trim().is_empty() {
            return Err(JamError::MissingCredentials);
        }

        let user = self.find_by_name(name).ok_or(JamError::UserNotFound)?;

        if user.password.as_deref() != Some(password) {
            debug!(user_id = %user.id, "login refused, wrong password");
            return Err(JamError::InvalidPassword);
        }

        Ok(user.without_password())
    }

    /// Registers a new user and returns them without their password
    pub fn signup(&mut self, name: &str, password: &str) -> Result<User> {
        let name = name.trim();

        if name.is_empty() || password.trim().is_empty() {
            return Err(JamError::MissingCredentials);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(JamError::PasswordTooShort);
        }
        if self.find_by_name(name).is_some() {
            return Err(JamError::HandleTaken);
        }

        let user = User {
            password: Some(String::from(password)),
            online_status: Some(OnlineStatus::Online),
            bio: Some(String::new()),
            status: Some(String::new()),
            ..User::new(prefixed_id("user"), name, NEW_USER_COLOR)
        };

        info!(user_id = %user.id, name, "user signed up");

        let public = user.without_password();
        self.users.push(user);
        self.persist();

        Ok(public)
    }

    /// Applies a profile edit, renaming is refused when another user has the handle already
    pub fn update_profile(&mut self, user_id: &str, update: &ProfileUpdate) -> Result<User> {
        if let Some(name) = update.name.as_ref() {
            if name.trim().is_empty() {
                return Err(JamError::MissingCredentials);
            }
            if self
                .find_by_name(name)
                .is_some_and(|other| other.id != user_id)
            {
                return Err(JamError::HandleTaken);
            }
        }

        let user = self.get_mut(user_id)?;
        user.apply(update);
        let public = user.without_password();

        self.persist();

        Ok(public)
    }

    /// Records a pending request from `from` on the `to` user.
    /// Returns false when nothing changed, e.g. a request to oneself or a repeated request.
    pub fn send_friend_request(&mut self, from: &str, to: &str) -> Result<bool> {
        if from == to {
            return Ok(false);
        }
        self.get(from).ok_or(JamError::UserNotFound)?;

        let target = self.get_mut(to)?;
        if id_set::contains(&target.friend_ids, from) {
            return Ok(false);
        }
        let inserted = id_set::insert(&mut target.incoming_friend_requests, from);

        self.persist();

        Ok(inserted)
    }

    /// Makes both users friends and drops the pending request.
    /// Returns false when `requester_id` never asked.
    pub fn accept_friend_request(&mut self, user_id: &str, requester_id: &str) -> Result<bool> {
        if user_id == requester_id {
            return Ok(false);
        }
        self.get(requester_id).ok_or(JamError::UserNotFound)?;

        let user = self.get_mut(user_id)?;
        if !id_set::remove(&mut user.incoming_friend_requests, requester_id) {
            return Ok(false);
        }
        id_set::insert(&mut user.friend_ids, requester_id);

        let requester = self.get_mut(requester_id)?;
        id_set::insert(&mut requester.friend_ids, user_id);

        self.persist();

        Ok(true)
    }

    pub fn reject_friend_request(&mut self, user_id: &str, requester_id: &str) -> Result<bool> {
        let user = self.get_mut(user_id)?;
        let removed = id_set::remove(&mut user.incoming_friend_requests, requester_id);

        self.persist();

        Ok(removed)
    }

    /// Ends the friendship on both sides
    pub fn remove_friend(&mut self, user_id: &str, friend_id: &str) -> Result<bool> {
        let removed = id_set::remove(&mut self.get_mut(user_id)?.friend_ids, friend_id);

        if let Ok(friend) = self.get_mut(friend_id) {
            id_set::remove(&mut friend.friend_ids, user_id);
        }

        self.persist();

        Ok(removed)
    }
}
