pub use self::console_manager::ConsoleManager;

mod console_manager;
