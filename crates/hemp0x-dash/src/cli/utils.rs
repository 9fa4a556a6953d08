use super::commands::Cli;
use hemp0x_dash::{DashConfig, LoggingConfig};
use hemp0x_types::DashResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn load_config(cli: &Cli) -> DashResult<DashConfig> {
    let path = cli.config.clone().unwrap_or_else(DashConfig::default_path);
    DashConfig::load(path)
}

/// Command line flags win over the config file; RUST_LOG wins over both.
pub fn init_logging(cli: &Cli, logging: &LoggingConfig) -> anyhow::Result<()> {
    let configured = logging.level.to_string();
    let level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => configured.as_str(),
            1 => "info,hemp0x_dash=debug",
            2 => "debug",
            _ => "trace",
        }
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    let log_file = cli.log_file.as_ref().or(logging.file.as_ref());
    if let Some(log_file) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;
        let file_layer = fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false);
        subscriber.with(file_layer).try_init()?;
    } else if logging.json {
        subscriber.with(fmt::layer().json().with_writer(std::io::stderr)).try_init()?;
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(cli.verbose >= 2);
        subscriber.with(stderr_layer).try_init()?;
    }
    Ok(())
}
