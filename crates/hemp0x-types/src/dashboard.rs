//! Payload returned by the native backend's dashboard command.

use crate::constants::PLACEHOLDER;
use crate::wallet::TxItem;
use serde::{Deserialize, Serialize};

pub const NODE_STATE_RUNNING: &str = "RUNNING";
pub const NODE_STATE_OFFLINE: &str = "OFFLINE";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub state: String,
    pub blocks: u64,
    pub headers: u64,
    pub peers: u64,
    pub diff: String,
    pub synced: bool,
}

impl NodeInfo {
    pub fn offline() -> Self {
        Self {
            state: NODE_STATE_OFFLINE.to_string(),
            blocks: 0,
            headers: 0,
            peers: 0,
            diff: PLACEHOLDER.to_string(),
            synced: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == NODE_STATE_RUNNING
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSummary {
    pub balance: String,
    pub pending: String,
    pub staked: String,
    pub status: String,
}

impl WalletSummary {
    pub fn unavailable() -> Self {
        Self {
            balance: PLACEHOLDER.to_string(),
            pending: PLACEHOLDER.to_string(),
            staked: PLACEHOLDER.to_string(),
            status: PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    pub node: NodeInfo,
    pub wallet: WalletSummary,
    #[serde(default)]
    pub tx: Vec<TxItem>,
}

impl DashboardData {
    /// What the backend reports when the daemon process is not running.
    pub fn offline() -> Self {
        Self {
            node: NodeInfo::offline(),
            wallet: WalletSummary::unavailable(),
            tx: Vec::new(),
        }
    }
}
