//! File system operations (create, remove, permissions).

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn create_dir_all_impl(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).context("Failed to create directory")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn remove_file_impl(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).context("Failed to remove file")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn exists_impl(&self, path: &Path) -> bool {
        path.exists()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_file_impl(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>> {
        let file = fs::File::create(path).context("Failed to create file")?;
        Ok(Box::new(file))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn set_permissions_impl(&self, path: &Path, mode: u32) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(mode);
            fs::set_permissions(path, permissions).context("Failed to set permissions")?;
        }
        #[cfg(not(unix))]
        {
            let _ = (path, mode);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_file_ops() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("rip-linux-x64");

        assert!(!runtime.exists(&file_path));

        {
            let mut writer = runtime.create_file(&file_path).unwrap();
            writer.write_all(b"streamed content").unwrap();
        }
        assert!(runtime.exists(&file_path));
        assert_eq!(
            std::fs::read_to_string(&file_path).unwrap(),
            "streamed content"
        );

        runtime.remove_file(&file_path).unwrap();
        assert!(!runtime.exists(&file_path));
    }

    #[test]
    fn test_real_runtime_create_dir_all() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let bin_dir = dir.path().join("nested/root/bin");

        runtime.create_dir_all(&bin_dir).unwrap();
        assert!(bin_dir.is_dir());

        // Already present is fine
        runtime.create_dir_all(&bin_dir).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_real_runtime_set_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tool");
        std::fs::write(&file_path, "#!/bin/sh\n").unwrap();

        runtime.set_permissions(&file_path, 0o755).unwrap();

        let mode = std::fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_real_runtime_errors() {
        let runtime = RealRuntime;

        let result = runtime.remove_file(std::path::Path::new("/nonexistent/path/file.txt"));
        assert!(result.is_err());

        let result = runtime.create_file(std::path::Path::new("/nonexistent/path/file.txt"));
        assert!(result.is_err());
    }
}
