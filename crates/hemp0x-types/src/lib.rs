#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod constants;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod input;
pub mod node;
pub mod ui;
pub mod wallet;

pub use constants::*;
pub use dashboard::{DashboardData, NodeInfo, WalletSummary, NODE_STATE_OFFLINE, NODE_STATE_RUNNING};
pub use error::{DashError, DashResult, ParseError};
pub use format::{
    explorer_address_url, explorer_tx_url, format_amount, format_balance, format_difficulty,
    format_size, try_format_amount, try_format_balance,
};
pub use input::BalanceInput;
pub use node::{parse_version, version_is_old, NetworkInfo, NodeStatus, SystemStatus};
pub use ui::{Toast, ToastKind, UiState};
pub use wallet::{TxItem, WalletInfo};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_status_default() {
        let status = NodeStatus::default();
        assert!(!status.online);
        assert_eq!(status.version, "--");
        assert_eq!(status.connections, 0);
        assert_eq!(status.headers, 0);
        assert_eq!(status.blocks, 0);
        assert_eq!(status.verification_progress, 0.0);
        assert_eq!(status.error, None);
    }

    #[test]
    fn test_node_status_wire_shape() {
        let json = serde_json::to_value(NodeStatus::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "online": false,
                "version": "--",
                "connections": 0,
                "headers": 0,
                "blocks": 0,
                "verificationProgress": 0.0,
                "error": null
            })
        );
    }

    #[test]
    fn test_other_defaults() {
        let system = SystemStatus::default();
        assert!(!system.backend_ready);
        assert_eq!(system.os, "unknown");

        let network = NetworkInfo::default();
        assert_eq!(network.chain, "mainnet");
        assert!(!network.testnet);

        let wallet = WalletInfo::default();
        assert_eq!(wallet.balance, "--");
        assert_eq!(wallet.status, "--");
        assert!(wallet.transactions.is_empty());
        assert!(!wallet.has_balance());

        assert!(UiState::default().toast.is_none());
    }

    #[test]
    fn test_is_synced() {
        let mut status = NodeStatus {
            online: true,
            headers: 100,
            blocks: 100,
            verification_progress: 0.9995,
            ..NodeStatus::default()
        };
        assert!(status.is_synced());

        status.blocks = 99;
        assert!(!status.is_synced());

        status.blocks = 100;
        status.verification_progress = 0.5;
        assert!(!status.is_synced());

        assert!(!NodeStatus::default().is_synced());
    }

    #[test]
    fn test_version_check() {
        assert_eq!(parse_version("/Hemp0x:4.7.1/"), Some((4, 7, 1)));
        assert_eq!(parse_version("/Satoshi:0.21.0/"), None);
        assert_eq!(parse_version("/Hemp0x:4.7/"), None);

        assert!(!version_is_old("/Hemp0x:4.7.0/"));
        assert!(!version_is_old("/Hemp0x:5.0.0/"));
        assert!(version_is_old("/Hemp0x:4.6.9/"));
        assert!(version_is_old("/Hemp0x:3.9.9/"));
        assert!(version_is_old("garbage"));
    }

    #[test]
    fn test_tx_item_wire_type_field() {
        let item = TxItem {
            date: "01/02 03:04".into(),
            tx_type: "receive".into(),
            amount: "1.0000000".into(),
            conf: 3,
            txid: "ab".into(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "receive");
    }

    #[test]
    fn test_dashboard_payload_parses_backend_json() {
        let raw = r#"{
            "node": {"state": "RUNNING", "blocks": 10, "headers": 12, "peers": 4, "diff": "1.2500", "synced": false},
            "wallet": {"balance": "12.500", "pending": "0.000", "staked": "1.000", "status": "UNLOCKED"},
            "tx": [{"date": "05/01 10:00", "type": "send", "amount": "-1.0000000", "conf": 1, "txid": "t1"}]
        }"#;
        let data: DashboardData = serde_json::from_str(raw).unwrap();
        assert!(data.node.is_running());
        assert_eq!(data.tx.len(), 1);
        assert_eq!(data.tx[0].tx_type, "send");

        assert!(!DashboardData::offline().node.is_running());
    }

    #[test]
    fn test_toast_new() {
        let a = Toast::new(ToastKind::Error, "boom");
        let b = Toast::new(ToastKind::Error, "boom");
        assert_ne!(a.id, b.id);
        assert_eq!(a.kind.to_string(), "error");
    }
}
