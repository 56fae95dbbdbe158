pub mod config_io;
pub mod file_io;
pub mod logging;
pub mod watcher;
