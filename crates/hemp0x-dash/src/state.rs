//! The dashboard's state registry.
//!
//! One [`DashboardState`] is created at startup and handed to whatever polls
//! the backend and whatever renders. Each record lives in its own [`Store`],
//! so writers of different records never coordinate with each other.

use crate::store::Store;
use hemp0x_types::{
    DashResult, NetworkInfo, NodeStatus, SystemStatus, Toast, ToastKind, UiState, WalletInfo,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct DashboardState {
    pub system: Store<SystemStatus>,
    pub node: Store<NodeStatus>,
    pub network: Store<NetworkInfo>,
    pub wallet: Store<WalletInfo>,
    pub ui: Store<UiState>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of every record, for serialisation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub system: SystemStatus,
    pub node: NodeStatus,
    pub network: NetworkInfo,
    pub wallet: WalletInfo,
    pub ui: UiState,
}

impl StateSnapshot {
    pub fn to_json_pretty(&self) -> DashResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(raw: &str) -> DashResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            system: Store::new("system", SystemStatus::default()),
            node: Store::new("node", NodeStatus::default()),
            network: Store::new("network", NetworkInfo::default()),
            wallet: Store::new("wallet", WalletInfo::default()),
            ui: Store::new("ui", UiState::default()),
        }
    }

    /// Reads each record in turn. Records written concurrently by other
    /// callers may be from different polls.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            system: self.system.get(),
            node: self.node.get(),
            network: self.network.get(),
            wallet: self.wallet.get(),
            ui: self.ui.get(),
        }
    }

    /// Replaces any active toast. Returns the new toast's id.
    pub fn show_toast(&self, kind: ToastKind, message: impl Into<String>) -> Uuid {
        let toast = Toast::new(kind, message);
        let id = toast.id;
        debug!(%id, %kind, "showing toast");
        self.ui.set(UiState { toast: Some(toast) });
        id
    }

    /// Clears the toast only if `id` is still the active one, so a late
    /// dismiss timer cannot remove a newer toast.
    pub fn dismiss_toast(&self, id: Uuid) -> bool {
        if !self.ui.with(|ui| ui.toast.as_ref().is_some_and(|t| t.id == id)) {
            return false;
        }
        self.ui.update(|ui| match &ui.toast {
            Some(t) if t.id == id => UiState { toast: None },
            _ => ui.clone(),
        });
        true
    }

    pub fn clear_toast(&self) {
        self.ui.set(UiState::default());
    }
}
