use thiserror::Error;

/// Errors produced by the rooms hub.
///
/// The `Display` text of the user facing variants is shown to the user as is.
#[derive(Error, Debug)]
pub enum JamError {
    #[error("All fields are required.")]
    MissingCredentials,

    #[error("Password must be at least 6 characters long.")]
    PasswordTooShort,

    #[error("User not found.")]
    UserNotFound,

    #[error("Invalid password.")]
    InvalidPassword,

    #[error("Handle is already taken.")]
    HandleTaken,

    /// The acting user has no desk, e.g. they never signed in or signed out already.
    #[error("user '{0}' is not signed in")]
    NotSignedIn(String),

    #[error("A room needs a name and a description.")]
    MissingRoomDetails,

    #[error("room '{0}' not found")]
    RoomNotFound(String),

    #[error("The URL you provided appears to be invalid.")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Only links from SoundCloud, YouTube, Spotify, Apple Music, Bandcamp, and Discogs are currently allowed.")]
    LinkRejected,

    /// Reading or writing the user directory file failed.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("could not (de)serialize the user directory: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, JamError>;
