//! CLI argument definitions and report formatting for the check harness.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use webshare_core::{AccountTier, DownloadOutcome, HostCodes, HostConfig};

/// Check Webshare credentials and resolve a link into a direct download URL.
///
/// Runs `Verify` and then `GetDownloadInfo` against the live API with a single
/// client instance, printing a pass/fail line for each.
#[derive(Parser)]
#[command(name = "webshare-check")]
#[command(author, version, about)]
pub struct Args {
    /// Account username or email
    pub username: String,

    /// Account password
    pub password: String,

    /// Webshare file page or direct download link
    pub link: String,

    /// JSON host configuration (codes, user agent, network policy)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the User-Agent header
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Request timeout in seconds (1-300)
    #[arg(short = 't', long, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Increase log verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Builds the host configuration: file (if any), then CLI overrides.
    pub fn host_config(&self) -> Result<HostConfig> {
        let mut config = match &self.config {
            Some(path) => HostConfig::from_json_file(path)
                .with_context(|| format!("Failed to load host config '{}'", path.display()))?,
            None => HostConfig::default(),
        };

        if let Some(user_agent) = &self.user_agent {
            config.user_agent.clone_from(user_agent);
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if self.insecure {
            config.accept_invalid_certs = true;
        }

        config.validate().context("Invalid host configuration")?;
        Ok(config)
    }

    /// Default log filter derived from the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

/// Header printed before the checks run. The password is masked.
pub fn banner(args: &Args) -> String {
    [
        "Running test script".to_string(),
        "-------------------".to_string(),
        format!("user: {}", args.username),
        format!("pass: {}", "*".repeat(args.password.chars().count())),
        format!("link: {}", args.link),
    ]
    .join("\n")
}

pub fn login_report(tier: AccountTier) -> &'static str {
    match tier {
        AccountTier::LoginFailed => "Failed",
        AccountTier::Free => "Passed - regular",
        AccountTier::Premium => "Passed - vip",
    }
}

pub fn link_report(outcome: &DownloadOutcome, codes: &HostCodes) -> String {
    match outcome {
        DownloadOutcome::Url(_) => "Passed".to_string(),
        DownloadOutcome::Failed(kind) => format!("Failed - {} ({kind})", kind.host_code(codes)),
    }
}
