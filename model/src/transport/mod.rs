#[cfg(any(feature = "console", feature = "driver"))]
mod common;
/// Transport for the console side: reads [crate::command::Command]s and writes [crate::event::Event]s
#[cfg(feature = "console")]
pub mod console;
/// Transport for whatever drives a console: writes [crate::command::Command]s and reads [crate::event::Event]s
#[cfg(feature = "driver")]
pub mod driver;
