pub mod exec;
pub mod ping;
pub mod read_file;
pub mod run;

use crate::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Resolves `candidate` against `root` and requires the canonical result to
/// stay inside the canonical root. Containment uses `Path::starts_with`,
/// which compares whole segments, so `/safe2` is never treated as inside
/// `/safe`. Fails closed: any resolution error other than a missing final
/// component is a denial.
pub fn confine_to_root(root: &Path, candidate: &Path) -> AppResult<PathBuf> {
    let canon_root = dunce::canonicalize(root)
        .map_err(|e| AppError::Internal(format!("canonicalize root: {e}")))?;
    let joined = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        canon_root.join(candidate)
    };
    match dunce::canonicalize(&joined) {
        Ok(p) if p.starts_with(&canon_root) => Ok(p),
        Ok(_) => Err(AppError::PathOutsideRoot),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            // Distinguish a missing file inside the root from an escape
            // attempt: the parent must still resolve under the root.
            let parent_ok = joined
                .parent()
                .and_then(|p| dunce::canonicalize(p).ok())
                .map(|p| p.starts_with(&canon_root))
                .unwrap_or(false);
            if parent_ok {
                Err(AppError::NotFound)
            } else {
                Err(AppError::PathOutsideRoot)
            }
        }
        Err(_) => Err(AppError::PathOutsideRoot),
    }
}

/// Caps `s` at `cap` characters. Returns the (possibly shortened) string and
/// whether anything was dropped.
pub fn truncate_chars(s: &str, cap: usize) -> (String, bool) {
    match s.char_indices().nth(cap) {
        Some((idx, _)) => (s[..idx].to_string(), true),
        None => (s.to_string(), false),
    }
}
