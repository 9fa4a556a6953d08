use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hemp0x-dash")]
#[command(about = "Hemp0x Commander - dashboard state and display formatting")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file [default: <config dir>/hemp0x/dash.toml]
    #[arg(long, env = "HEMP0X_DASH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Format a balance in compact K/M/B form
    Balance {
        value: String,
    },

    /// Format an amount with thousands separators
    Amount {
        value: String,
    },

    /// Format a byte count
    Size {
        bytes: u64,
    },

    /// Print the initial dashboard state as JSON
    Snapshot,

    /// Print the effective configuration
    Config,

    /// Poll a dashboard payload file and print state changes
    Watch {
        /// JSON file holding the backend's dashboard payload
        #[arg(long)]
        file: PathBuf,

        /// Apply the file once and exit
        #[arg(long)]
        once: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_file_help_names_stderr() {
        let cmd = Cli::command();
        let help = cmd
            .get_arguments()
            .find(|a| a.get_id() == "log_file")
            .and_then(|a| a.get_help())
            .map(|h| h.to_string())
            .unwrap();
        assert!(help.contains("stderr"));
    }

    #[test]
    fn test_watch_args() {
        let cli = Cli::parse_from(["hemp0x-dash", "-vv", "watch", "--file", "dash.json", "--once"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Watch { file, once } => {
                assert_eq!(file, PathBuf::from("dash.json"));
                assert!(once);
            }
            _ => panic!("expected watch"),
        }
    }
}
