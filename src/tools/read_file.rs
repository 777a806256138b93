use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::security;
use crate::tools::{confine_to_root, truncate_chars};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub struct FileReader {
    root: PathBuf,
    read_cap: usize,
}

impl FileReader {
    pub fn new(cfg: &Config) -> Self {
        Self {
            root: cfg.sandbox.root_dir.clone(),
            read_cap: cfg.limits.read_cap,
        }
    }

    /// Validates the name, confines it to the sandbox root, and reads at
    /// most `read_cap` bytes of the file. The preview never exceeds
    /// `read_cap` characters.
    pub fn read(&self, name: &str) -> AppResult<String> {
        security::validate_filename(name)?;
        let full = confine_to_root(&self.root, Path::new(name))?;
        let meta = full.metadata().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::NotFound
            } else {
                AppError::Internal(format!("stat {}: {e}", full.display()))
            }
        })?;
        if !meta.is_file() {
            return Err(AppError::NotFound);
        }
        let mut buf = Vec::with_capacity(self.read_cap.min(64 * 1024));
        let file = File::open(&full).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::NotFound
            } else {
                AppError::Internal(format!("open {}: {e}", full.display()))
            }
        })?;
        file.take(self.read_cap as u64)
            .read_to_end(&mut buf)
            .map_err(|e| AppError::Internal(format!("read {}: {e}", full.display())))?;
        let (preview, _) = truncate_chars(&String::from_utf8_lossy(&buf), self.read_cap);
        Ok(preview)
    }
}
