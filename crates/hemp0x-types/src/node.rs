use crate::constants::{MIN_NODE_VERSION, PLACEHOLDER, UNKNOWN_OS};
use serde::{Deserialize, Serialize};

/// Availability of the native backend and the host environment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub backend_ready: bool,
    pub os: String,
}

impl Default for SystemStatus {
    fn default() -> Self {
        Self {
            backend_ready: false,
            os: UNKNOWN_OS.to_string(),
        }
    }
}

/// Connectivity and sync health of the local node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatus {
    pub online: bool,
    pub version: String,
    pub connections: u64,
    pub headers: u64,
    pub blocks: u64,
    /// Fraction in `[0, 1]`, as reported by the node. Not clamped.
    pub verification_progress: f64,
    pub error: Option<String>,
}

impl Default for NodeStatus {
    fn default() -> Self {
        Self {
            online: false,
            version: PLACEHOLDER.to_string(),
            connections: 0,
            headers: 0,
            blocks: 0,
            verification_progress: 0.0,
            error: None,
        }
    }
}

impl NodeStatus {
    pub fn is_synced(&self) -> bool {
        self.headers > 0 && self.blocks >= self.headers && self.verification_progress >= 0.999
    }

    pub fn sync_percent(&self) -> f64 {
        self.verification_progress * 100.0
    }
}

/// Chain parameters. `chain` and `testnet` are set independently and are
/// not cross-checked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub chain: String,
    pub difficulty: f64,
    pub network_hashps: f64,
    pub testnet: bool,
}

impl Default for NetworkInfo {
    fn default() -> Self {
        Self {
            chain: "mainnet".to_string(),
            difficulty: 0.0,
            network_hashps: 0.0,
            testnet: false,
        }
    }
}

/// Parses a `/Hemp0x:X.Y.Z/` node sub-version string.
pub fn parse_version(subversion: &str) -> Option<(u32, u32, u32)> {
    let stripped = subversion.trim_matches('/');
    let version = stripped.strip_prefix("Hemp0x:")?;
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts.next()?.parse().ok()?;
    Some((major, minor, patch))
}

/// True when the peer runs something older than [`MIN_NODE_VERSION`] or
/// reports a sub-version that cannot be parsed.
pub fn version_is_old(subversion: &str) -> bool {
    match parse_version(subversion) {
        Some(version) => version < MIN_NODE_VERSION,
        None => true,
    }
}
