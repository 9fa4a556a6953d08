//! Hemp0x Commander dashboard state.
//!
//! The registry in [`state`] is written by whatever polls the node (see
//! [`bridge`]) and read by whatever renders. Display strings come from
//! [`hemp0x_types::format`].

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod bridge;
pub mod config;
pub mod console;
pub mod state;
pub mod store;

pub use bridge::{
    acknowledge_transactions, apply_dashboard, apply_dashboard_json, apply_mining_info,
    apply_network_mode, apply_node_version, mark_backend_ready, record_error,
};
pub use config::{DashConfig, LogLevel, LoggingConfig};
pub use console::{ConsoleLevel, ConsoleLine, ConsoleLog};
pub use state::{DashboardState, StateSnapshot};
pub use store::{Listener, Store, Subscription};
