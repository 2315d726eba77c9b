mod persistence;
mod user_directory;

pub use self::persistence::{JsonFileStore, MemoryStore, UserStore};
pub use self::user_directory::UserDirectory;
