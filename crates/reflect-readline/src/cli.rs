//! CLI argument definitions for the `reflect` binary.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use reflect_core::ClientConfig;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser, Debug)]
#[command(
    name = "reflect",
    version,
    about = "Emotion Reflection - share your thoughts and discover the emotions behind your words",
    long_about = None
)]
pub struct Cli {
    /// Base URL of the analysis service (overrides config file and REFLECT_API_URL).
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Request timeout in seconds (default: none).
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Config file to read instead of ~/.config/reflect/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Analyze TEXT once and exit instead of starting the REPL.
    #[arg(long, value_name = "TEXT")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

impl Cli {
    pub fn log_config(&self) -> LogConfig {
        LogConfig::from_verbosity(self.verbose)
            .with_format(self.log_format.into())
            .with_ansi(!self.no_color)
            .with_log_file(self.log_file.clone())
    }

    /// Resolves the client configuration: file, then environment, then flags.
    pub fn client_config(&self) -> reflect_core::Result<ClientConfig> {
        let config = match &self.config {
            Some(path) => ClientConfig::load_from(path)?
                .with_env_overrides(|key| std::env::var(key).ok())?,
            None => ClientConfig::load()?,
        };
        self.apply_overrides(config)
    }

    fn apply_overrides(&self, mut config: ClientConfig) -> reflect_core::Result<ClientConfig> {
        if let Some(url) = &self.url {
            config = config.with_base_url(url.clone())?;
        }
        if let Some(secs) = self.timeout {
            config = config.with_request_timeout_secs(secs);
        }
        Ok(config)
    }
}
