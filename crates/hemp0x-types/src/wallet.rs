use crate::constants::PLACEHOLDER;
use serde::{Deserialize, Serialize};

/// One wallet transaction row, as rendered by the history table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxItem {
    pub date: String,
    #[serde(rename = "type")]
    pub tx_type: String,
    pub amount: String,
    pub conf: u64,
    pub txid: String,
}

/// Financial data for the open wallet.
///
/// `balance` is text so the placeholder can be shown before the first poll.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    pub balance: String,
    pub unconfirmed: f64,
    pub immature: f64,
    pub transactions: Vec<TxItem>,
    pub new_tx_count: u64,
    pub status: String,
}

impl Default for WalletInfo {
    fn default() -> Self {
        Self {
            balance: PLACEHOLDER.to_string(),
            unconfirmed: 0.0,
            immature: 0.0,
            transactions: Vec::new(),
            new_tx_count: 0,
            status: PLACEHOLDER.to_string(),
        }
    }
}

impl WalletInfo {
    pub fn has_balance(&self) -> bool {
        self.balance != PLACEHOLDER
    }
}
