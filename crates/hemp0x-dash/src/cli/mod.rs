pub mod commands;
pub mod utils;
pub mod watch;
