use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lootspin_core::SpinSettings;
use lootspin_engine::{ClientSettings, InputPaths, DEFAULT_ENDPOINT, DEFAULT_RAW_LOG};
use lootspin_logging::{LogDestination, DEFAULT_LOG_FILE};

#[derive(Debug, Parser)]
#[command(
    name = "lootspin",
    about = "Spin a loot box for many wallets concurrently, each through its own proxy"
)]
pub struct Cli {
    /// Wallet list, one per line
    #[arg(long, default_value = "./wallet.txt")]
    pub wallets: PathBuf,
    /// Bearer tokens, one per wallet, same order
    #[arg(long, default_value = "./token.txt")]
    pub tokens: PathBuf,
    /// Proxies as username:password@host:port, at least one per wallet
    #[arg(long, default_value = "./proxy.txt")]
    pub proxies: PathBuf,
    /// File receiving raw successful responses
    #[arg(long, default_value = DEFAULT_RAW_LOG)]
    pub raw_log: PathBuf,
    /// Do not write raw responses
    #[arg(long)]
    pub no_raw_log: bool,
    /// Milliseconds between attempts
    #[arg(long, default_value_t = SpinSettings::default().spin_interval.as_millis() as u64)]
    pub interval_ms: u64,
    #[arg(long, default_value_t = SpinSettings::default().max_spins)]
    pub max_spins: u32,
    /// Items requested per spin
    #[arg(long, default_value_t = SpinSettings::default().quantity)]
    pub quantity: u32,
    /// Price per item
    #[arg(long, default_value_t = SpinSettings::default().price)]
    pub price: u32,
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
    #[arg(long, value_enum, default_value_t = LogTarget::Both)]
    pub log_destination: LogTarget,
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    pub fn input_paths(&self) -> InputPaths {
        InputPaths {
            wallets: self.wallets.clone(),
            tokens: self.tokens.clone(),
            proxies: self.proxies.clone(),
        }
    }

    pub fn spin_settings(&self) -> SpinSettings {
        SpinSettings {
            spin_interval: Duration::from_millis(self.interval_ms),
            max_spins: self.max_spins,
            quantity: self.quantity,
            price: self.price,
            log_results: !self.no_raw_log,
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            ..ClientSettings::default()
        }
    }
}
