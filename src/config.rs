use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "GATEHOUSE_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: Server,
    pub sandbox: Sandbox,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub ping: Ping,
    #[serde(skip)]
    pub api_key: ApiKey,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    pub bind_addr: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Sandbox {
    pub root_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Limits {
    #[serde(default = "default_read_cap")]
    pub read_cap: usize,
    #[serde(default = "default_stdout_cap")]
    pub stdout_cap: usize,
    #[serde(default = "default_stderr_cap")]
    pub stderr_cap: usize,
    #[serde(default = "default_max_request_kb")]
    pub max_request_kb: usize,
    #[serde(default = "default_exec_timeout_s")]
    pub exec_timeout_s: u64,
}

fn default_read_cap() -> usize { 10_000 }
fn default_stdout_cap() -> usize { 2_000 }
fn default_stderr_cap() -> usize { 1_000 }
fn default_max_request_kb() -> usize { 64 }
fn default_exec_timeout_s() -> u64 { 5 }

impl Default for Limits {
    fn default() -> Self {
        Self {
            read_cap: default_read_cap(),
            stdout_cap: default_stdout_cap(),
            stderr_cap: default_stderr_cap(),
            max_request_kb: default_max_request_kb(),
            exec_timeout_s: default_exec_timeout_s(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Ping {
    #[serde(default = "default_ping_binary")]
    pub binary: String,
    #[serde(default = "default_ping_count")]
    pub count: u32,
    #[serde(default = "default_ping_timeout_s")]
    pub timeout_s: u64,
}

fn default_ping_binary() -> String { "ping".to_string() }
fn default_ping_count() -> u32 { 1 }
fn default_ping_timeout_s() -> u64 { 5 }

impl Default for Ping {
    fn default() -> Self {
        Self {
            binary: default_ping_binary(),
            count: default_ping_count(),
            timeout_s: default_ping_timeout_s(),
        }
    }
}

/// Secret loaded from the environment once at startup. Redacted in Debug so
/// it cannot leak through logs or error context.
#[derive(Clone, Default)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn from_env(var: &str) -> anyhow::Result<Self> {
        let val = std::env::var(var)
            .map_err(|_| anyhow::anyhow!("required environment variable {var} is not set"))?;
        if val.trim().is_empty() {
            anyhow::bail!("required environment variable {var} is empty");
        }
        Ok(Self(val))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)?;
        let mut cfg: Config = toml::from_str(&raw)?;
        cfg.api_key = ApiKey::from_env(API_KEY_ENV)?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.sandbox.root_dir.is_dir() {
            anyhow::bail!(
                "root_dir does not exist or is not a directory: {}",
                self.sandbox.root_dir.display()
            );
        }
        if self.limits.read_cap == 0 { anyhow::bail!("read_cap must be > 0"); }
        if self.limits.stdout_cap == 0 { anyhow::bail!("stdout_cap must be > 0"); }
        if self.limits.stderr_cap == 0 { anyhow::bail!("stderr_cap must be > 0"); }
        if self.limits.max_request_kb == 0 { anyhow::bail!("max_request_kb must be > 0"); }
        if self.limits.exec_timeout_s == 0 { anyhow::bail!("exec_timeout_s must be > 0"); }
        if self.ping.timeout_s == 0 { anyhow::bail!("ping timeout_s must be > 0"); }
        if self.ping.count == 0 { anyhow::bail!("ping count must be > 0"); }
        Ok(())
    }
}
