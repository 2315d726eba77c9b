pub use self::desk::Desk;
pub use self::layout::Layout;
pub use self::notifications::NotificationCenter;

#[allow(clippy::module_inception)]
mod desk;
mod layout;
mod notifications;
