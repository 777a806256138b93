use crate::actions::Action;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::tools::run::{resolve_binary, run_bounded};
use tokio::time::Duration;

pub struct ActionRunner {
    timeout: Duration,
    stdout_cap: usize,
    stderr_cap: usize,
}

impl ActionRunner {
    pub fn new(cfg: &Config) -> Self {
        Self {
            timeout: Duration::from_secs(cfg.limits.exec_timeout_s),
            stdout_cap: cfg.limits.stdout_cap,
            stderr_cap: cfg.limits.stderr_cap,
        }
    }

    /// Runs the fixed argument vector carried by the action. The binary is
    /// resolved from the vector itself; nothing request-derived is passed.
    pub async fn run(&self, action: Action) -> AppResult<String> {
        let argv = action.argv();
        let program = resolve_binary(argv[0]).map_err(|e| {
            tracing::warn!(action = action.name(), error = %e, "action binary unavailable");
            AppError::ExecFailure
        })?;
        let args: Vec<String> = argv[1..].iter().map(|s| s.to_string()).collect();
        let out = run_bounded(&program, &args, self.timeout, self.stdout_cap, self.stderr_cap)
            .await?;
        if out.returncode != 0 {
            tracing::warn!(
                action = action.name(),
                returncode = out.returncode,
                "action exited nonzero"
            );
            return Err(AppError::ExecFailure);
        }
        Ok(out.stdout)
    }
}
