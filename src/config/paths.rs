use std::fs;
use std::path::PathBuf;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::error::Result;

/// Manages paths for tcat configuration
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root configuration directory (~/.tcat)
    pub root: PathBuf,
    /// Configuration file path (~/.tcat/config.toml)
    pub config_file: PathBuf,
}

impl Paths {
    /// Create a new Paths instance using the user's home directory
    pub fn new() -> Result<Self> {
        let home = std::env::var("HOME")?;
        Ok(Self::in_dir(PathBuf::from(home).join(".tcat")))
    }

    /// Paths rooted at an explicit directory
    pub fn in_dir(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.toml"),
            root,
        }
    }

    /// Ensure the configuration directory exists with owner-only permissions
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o700);
            fs::set_permissions(&self.root, perms)?;
        }

        Ok(())
    }

    /// Check if the config file exists
    pub fn config_exists(&self) -> bool {
        self.config_file.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_dir() {
        let paths = Paths::in_dir(PathBuf::from("/tmp/x"));
        assert_eq!(paths.config_file, PathBuf::from("/tmp/x/config.toml"));
    }

    #[test]
    fn test_ensure_dirs_creates_root() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::in_dir(temp_dir.path().join("nested").join(".tcat"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.is_dir());
        assert!(!paths.config_exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_dirs_sets_owner_only_mode() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::in_dir(temp_dir.path().join(".tcat"));
        paths.ensure_dirs().unwrap();

        let mode = fs::metadata(&paths.root).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o700);
    }
}
