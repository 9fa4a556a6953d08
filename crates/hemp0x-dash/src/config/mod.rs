mod dash;
mod logging;
mod types;

pub use dash::DashConfig;
pub use logging::LoggingConfig;
pub use types::LogLevel;
