//! Writes backend results into the registry.
//!
//! Each function touches a record with a single `update`, so listeners never
//! see a half-applied poll.

use crate::state::DashboardState;
use hemp0x_types::{
    BalanceInput, DashError, DashResult, DashboardData, NetworkInfo, NodeStatus, SystemStatus,
    ToastKind, TxItem, WalletInfo,
};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Applies one dashboard poll to the node, network and wallet records.
pub fn apply_dashboard(state: &DashboardState, data: DashboardData) {
    let DashboardData { node, wallet, tx } = data;

    if !node.is_running() {
        debug!(state = %node.state, "node reported not running");
        state.node.update(|n| NodeStatus {
            online: false,
            connections: 0,
            ..n.clone()
        });
        state.wallet.update(|w| WalletInfo {
            balance: wallet.balance.clone(),
            status: wallet.status.clone(),
            ..w.clone()
        });
        return;
    }

    debug!(blocks = node.blocks, headers = node.headers, peers = node.peers, "applying dashboard poll");

    let progress = if node.synced {
        1.0
    } else if node.headers > 0 {
        (node.blocks as f64 / node.headers as f64).min(1.0)
    } else {
        0.0
    };
    state.node.update(|n| NodeStatus {
        online: true,
        version: n.version.clone(),
        connections: node.peers,
        headers: node.headers,
        blocks: node.blocks,
        verification_progress: progress,
        error: None,
    });

    if let Ok(difficulty) = BalanceInput::from(node.diff.as_str()).parse() {
        state.network.update(|net| NetworkInfo {
            difficulty,
            ..net.clone()
        });
    }

    state.wallet.update(|w| {
        let added = count_new_transactions(&w.transactions, &tx);
        WalletInfo {
            balance: wallet.balance.clone(),
            unconfirmed: parse_or(&wallet.pending, w.unconfirmed),
            immature: parse_or(&wallet.staked, w.immature),
            transactions: tx.clone(),
            new_tx_count: w.new_tx_count + added,
            status: wallet.status.clone(),
        }
    });
}

pub fn apply_dashboard_json(state: &DashboardState, raw: &str) -> DashResult<()> {
    let data: DashboardData = serde_json::from_str(raw)
        .map_err(|e| DashError::Bridge(format!("Invalid dashboard payload: {}", e)))?;
    apply_dashboard(state, data);
    Ok(())
}

/// Sets `chain` and `testnet` together so they cannot disagree.
pub fn apply_network_mode(state: &DashboardState, testnet: bool) {
    let chain = if testnet { "testnet" } else { "mainnet" };
    state.network.update(|net| NetworkInfo {
        chain: chain.to_string(),
        testnet,
        ..net.clone()
    });
}

pub fn apply_mining_info(state: &DashboardState, difficulty: f64, network_hashps: f64) {
    state.network.update(|net| NetworkInfo {
        difficulty,
        network_hashps,
        ..net.clone()
    });
}

pub fn apply_node_version(state: &DashboardState, version: impl Into<String>) {
    let version = version.into();
    state.node.update(|n| NodeStatus {
        version: version.clone(),
        ..n.clone()
    });
}

pub fn mark_backend_ready(state: &DashboardState, os: impl Into<String>) {
    state.system.set(SystemStatus {
        backend_ready: true,
        os: os.into(),
    });
}

/// Stores a node fault and raises it as an error toast.
pub fn record_error(state: &DashboardState, message: impl Into<String>) {
    let message = message.into();
    warn!("node error: {}", message);
    state.node.update(|n| NodeStatus {
        error: Some(message.clone()),
        ..n.clone()
    });
    state.show_toast(ToastKind::Error, message);
}

/// Resets the unseen transaction counter once the history has been viewed.
pub fn acknowledge_transactions(state: &DashboardState) {
    state.wallet.update(|w| WalletInfo {
        new_tx_count: 0,
        ..w.clone()
    });
}

/// Transactions in `incoming` whose txid was not in `known`. A first load
/// (nothing known yet) counts as zero.
fn count_new_transactions(known: &[TxItem], incoming: &[TxItem]) -> u64 {
    if known.is_empty() {
        return 0;
    }
    let seen: HashSet<&str> = known.iter().map(|t| t.txid.as_str()).collect();
    incoming
        .iter()
        .filter(|t| !seen.contains(t.txid.as_str()))
        .count() as u64
}

fn parse_or(raw: &str, fallback: f64) -> f64 {
    BalanceInput::from(raw).parse().unwrap_or(fallback)
}
