use crate::config::Config;
use crate::errors::AppResult;
use crate::security;
use crate::tools::run::{resolve_binary, run_bounded, RunOutput};
use std::path::PathBuf;
use tokio::time::Duration;

pub struct Pinger {
    binary: PathBuf,
    count: u32,
    timeout: Duration,
    stdout_cap: usize,
    stderr_cap: usize,
}

impl Pinger {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            binary: resolve_binary(&cfg.ping.binary)?,
            count: cfg.ping.count,
            timeout: Duration::from_secs(cfg.ping.timeout_s),
            stdout_cap: cfg.limits.stdout_cap,
            stderr_cap: cfg.limits.stderr_cap,
        })
    }

    /// Validates the host, then runs the pinned ping binary with the host as
    /// a discrete argv token. Rejected hosts never reach a spawn.
    pub async fn ping(&self, host: &str) -> AppResult<RunOutput> {
        security::validate_host(host)?;
        let args = vec![
            "-c".to_string(),
            self.count.to_string(),
            host.to_string(),
        ];
        run_bounded(
            &self.binary,
            &args,
            self.timeout,
            self.stdout_cap,
            self.stderr_cap,
        )
        .await
    }
}
