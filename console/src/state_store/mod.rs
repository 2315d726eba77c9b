pub use self::state_store::StateStore;

pub mod action;
pub mod session;
#[allow(clippy::module_inception)]
mod state_store;
