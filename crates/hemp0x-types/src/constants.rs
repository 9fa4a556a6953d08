pub const APP_VERSION: &str = "v1.3.0";

/// Asset creation fees, in HEMP.
pub const ASSET_CREATION_FEE: &str = "0.25";

pub const SUB_ASSET_CREATION_FEE: &str = "0.25";

pub const NFT_CREATION_FEE: &str = "0.25";

pub const DEFAULT_RPC_PORT: u16 = 42068;

pub const DEFAULT_P2P_PORT: u16 = 42069;

pub const EXPLORER_URL: &str = "https://explorer.hemp0x.com";

/// Dashboard polling intervals in milliseconds.
pub const DASHBOARD_POLL_INTERVAL: u64 = 5000;

pub const DASHBOARD_POLL_INTERVAL_SLOW: u64 = 8000;

pub const CONSOLE_MAX_LINES: usize = 1000;

/// Oldest node sub-version that is not flagged as outdated.
pub const MIN_NODE_VERSION: (u32, u32, u32) = (4, 7, 0);

/// Placeholder shown before the backend has reported a value.
pub const PLACEHOLDER: &str = "--";

pub const UNKNOWN_OS: &str = "unknown";
