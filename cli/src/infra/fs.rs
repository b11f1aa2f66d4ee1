//! Filesystem infrastructure — implements the `InstallFs` port.
//!
//! Files are written atomically: content lands in a temp file in the target
//! directory, then renames over the destination, so a crashed install never
//! leaves a half-written `.env` behind.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::InstallFs;

/// Production implementation backed by `std::fs`.
pub struct LocalInstallFs;

impl LocalInstallFs {
    fn write_atomic(path: &Path, contents: &str, mode: Option<u32>) -> Result<()> {
        let dir = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("no parent directory for {}", path.display()))?;
        let mut file = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("cannot create temp file in {}", dir.display()))?;

        use std::io::Write as _;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("cannot write {}", path.display()))?;

        #[cfg(unix)]
        if let Some(mode) = mode {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(std::fs::Permissions::from_mode(mode))
                .with_context(|| format!("cannot set permissions on {}", path.display()))?;
        }
        #[cfg(not(unix))]
        let _ = mode;

        file.persist(path)
            .map_err(|e| anyhow::anyhow!("cannot persist {}: {e}", path.display()))?;
        Ok(())
    }
}

impl InstallFs for LocalInstallFs {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).with_context(|| format!("cannot create {}", path.display()))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_writable(&self, path: &Path) -> bool {
        let probe = path.join(".write_test");
        let ok = std::fs::write(&probe, b"test").is_ok();
        if ok {
            let _ = std::fs::remove_file(&probe);
        }
        ok
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        Self::write_atomic(path, contents, None)
    }

    fn write_private(&self, path: &Path, contents: &str) -> Result<()> {
        Self::write_atomic(path, contents, Some(0o600))
    }
}
