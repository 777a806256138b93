//! Bounded subprocess runner shared by the ping and exec tools. Commands are
//! always spawned from a resolved path with discrete argument tokens; no
//! shell is ever involved.

use crate::errors::{AppError, AppResult};
use crate::tools::truncate_chars;
use std::{path::Path, process::Stdio, time::Instant};
use tokio::{
    io::AsyncReadExt,
    process::Command,
    time::{timeout, Duration},
};

// Capture slack beyond the caps so truncation happens on complete reads.
const READ_SLACK: usize = 4096;

#[derive(Debug)]
pub struct RunOutput {
    pub returncode: i32,
    pub stdout: String,
    pub stderr: String,
    pub truncated: bool,
    pub duration_ms: u64,
}

pub async fn run_bounded(
    program: &Path,
    args: &[String],
    run_timeout: Duration,
    stdout_cap: usize,
    stderr_cap: usize,
) -> AppResult<RunOutput> {
    let mut command = Command::new(program);
    command.args(args);
    command.stdin(Stdio::null());
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());
    command.env_clear();

    let start = Instant::now();
    let mut child = command.spawn().map_err(|e| {
        tracing::warn!(program = %program.display(), error = %e, "spawn failed");
        AppError::ExecFailure
    })?;

    let mut stdout = child.stdout.take().ok_or(AppError::ExecFailure)?;
    let mut stderr = child.stderr.take().ok_or(AppError::ExecFailure)?;

    let max_out = stdout_cap + READ_SLACK;
    let max_err = stderr_cap + READ_SLACK;
    let mut out = Vec::new();
    let mut err = Vec::new();

    let read_fut = async {
        let mut buf_out = [0u8; 8192];
        let mut buf_err = [0u8; 8192];
        loop {
            tokio::select! {
                r = stdout.read(&mut buf_out) => {
                    let n = r.unwrap_or(0);
                    if n == 0 { break; }
                    out.extend_from_slice(&buf_out[..n]);
                    if out.len() > max_out { let _ = child.kill().await; break; }
                }
                r = stderr.read(&mut buf_err) => {
                    let n = r.unwrap_or(0);
                    if n == 0 { continue; }
                    err.extend_from_slice(&buf_err[..n]);
                    if err.len() > max_err { let _ = child.kill().await; break; }
                }
            }
        }
    };

    let timed_out = timeout(run_timeout, read_fut).await.is_err();
    if timed_out {
        let _ = child.kill().await;
        let _ = child.wait().await;
        tracing::warn!(program = %program.display(), "timed out");
        return Err(AppError::ExecFailure);
    }

    let status = match timeout(run_timeout, child.wait()).await {
        Ok(Ok(s)) => s,
        _ => {
            let _ = child.kill().await;
            tracing::warn!(program = %program.display(), "wait timed out");
            return Err(AppError::ExecFailure);
        }
    };

    let (stdout, out_trunc) = truncate_chars(&String::from_utf8_lossy(&out), stdout_cap);
    let (stderr, err_trunc) = truncate_chars(&String::from_utf8_lossy(&err), stderr_cap);

    Ok(RunOutput {
        returncode: status.code().unwrap_or(-1),
        stdout,
        stderr,
        truncated: out_trunc || err_trunc,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Resolves a configured binary name to a canonical path, using PATH lookup
/// for bare names. Resolution happens once, at startup.
pub fn resolve_binary(name: &str) -> anyhow::Result<std::path::PathBuf> {
    let path = if name.contains('/') {
        std::path::PathBuf::from(name)
    } else {
        which::which(name)?
    };
    Ok(dunce::canonicalize(path)?)
}
