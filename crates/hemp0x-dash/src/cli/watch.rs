use anyhow::Result;
use hemp0x_dash::{
    apply_dashboard_json, mark_backend_ready, record_error, ConsoleLevel, ConsoleLog, DashConfig,
    DashboardState, Subscription,
};
use hemp0x_types::{format_amount, format_balance, NodeStatus, TxItem, WalletInfo};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub fn node_line(n: &NodeStatus) -> String {
    if !n.online {
        return match &n.error {
            Some(err) => format!("node    OFFLINE ({})", err),
            None => "node    OFFLINE".to_string(),
        };
    }
    // last poll failed, the counters below are stale
    if let Some(err) = &n.error {
        return format!("node    ERROR   ({})", err);
    }
    format!(
        "node    ONLINE  blocks {}/{}  peers {}  sync {:.1}%",
        n.blocks,
        n.headers,
        n.connections,
        n.sync_percent()
    )
}

pub fn wallet_line(w: &WalletInfo) -> String {
    let mut line = format!(
        "wallet  {}  balance {}  pending {}  immature {}",
        w.status,
        format_balance(&w.balance),
        format_amount(w.unconfirmed),
        format_amount(w.immature)
    );
    if w.new_tx_count > 0 {
        line.push_str(&format!("  ({} new tx)", w.new_tx_count));
    }
    line
}

pub fn tx_line(tx: &TxItem, config: &DashConfig) -> String {
    format!(
        "tx      {} {}  conf {}  {}",
        tx.tx_type,
        format_amount(tx.amount.as_str()),
        tx.conf,
        config.explorer_tx_url(&tx.txid)
    )
}

/// Appends to the scroll-back and echoes to the terminal.
fn emit(console: &Mutex<ConsoleLog>, level: ConsoleLevel, text: &str) {
    console.lock().push(level, text);
    match level {
        ConsoleLevel::Error => eprintln!("{}", text),
        _ => println!("{}", text),
    }
}

/// Emits `render(value)` whenever it differs from the last emitted line.
fn printer<T, F>(console: Arc<Mutex<ConsoleLog>>, render: F) -> impl Fn(&T) + Send + Sync
where
    F: Fn(&T) -> String + Send + Sync,
{
    let last = Mutex::new(String::new());
    move |value: &T| {
        let line = render(value);
        let mut last = last.lock();
        if *last != line {
            emit(&console, ConsoleLevel::Output, &line);
            *last = line;
        }
    }
}

/// A dashboard state wired to terminal output. Every printed line is also
/// kept in a console scroll-back capped by `console_max_lines`.
pub struct WatchSession {
    state: DashboardState,
    console: Arc<Mutex<ConsoleLog>>,
    _subscriptions: Vec<Subscription>,
}

impl WatchSession {
    pub fn new(config: &DashConfig) -> Self {
        let state = DashboardState::new();
        let console = Arc::new(Mutex::new(ConsoleLog::new(config.console_max_lines)));
        mark_backend_ready(&state, std::env::consts::OS);

        let seen_tx = Mutex::new(HashSet::new());
        let tx_console = console.clone();
        let tx_config = config.clone();
        let toast_console = console.clone();

        let subscriptions = vec![
            state.node.subscribe(printer(console.clone(), node_line)),
            state.wallet.subscribe(printer(console.clone(), wallet_line)),
            state.wallet.subscribe(move |w: &WalletInfo| {
                let mut seen = seen_tx.lock();
                for tx in &w.transactions {
                    if seen.insert(tx.txid.clone()) {
                        emit(&tx_console, ConsoleLevel::Output, &tx_line(tx, &tx_config));
                    }
                }
            }),
            state.ui.subscribe(move |ui| {
                if let Some(toast) = &ui.toast {
                    emit(
                        &toast_console,
                        ConsoleLevel::Error,
                        &format!("[{}] {}", toast.kind, toast.message),
                    );
                }
            }),
        ];

        Self {
            state,
            console,
            _subscriptions: subscriptions,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Applies one read of the payload file.
    pub fn apply(&self, read: std::io::Result<String>, path: &Path) {
        match read {
            Ok(raw) => {
                if let Err(e) = apply_dashboard_json(&self.state, &raw) {
                    record_error(&self.state, e.to_string());
                }
            }
            Err(e) => record_error(&self.state, format!("Failed to read {}: {}", path.display(), e)),
        }
    }

    pub fn console_text(&self) -> String {
        self.console.lock().to_text()
    }

    pub fn console_len(&self) -> usize {
        self.console.lock().len()
    }
}

pub async fn run_watch(path: &Path, once: bool, config: &DashConfig) -> Result<()> {
    let session = WatchSession::new(config);

    info!("Watching {}", path.display());
    loop {
        session.apply(tokio::fs::read_to_string(path).await, path);

        if once {
            break;
        }

        let delay = config.poll_interval(session.state().node.with(|n| n.online));
        debug!(?delay, "next poll");
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping watch");
                break;
            }
        }
    }
    debug!(lines = session.console_len(), "console scroll-back at exit");
    Ok(())
}
