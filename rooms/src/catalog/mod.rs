pub use self::admin::AdminOutcome;
pub(crate) use self::catalog::normalize_code;
pub use self::catalog::{system_message, Catalog};

mod admin;
#[allow(clippy::module_inception)]
mod catalog;
mod tracks;
