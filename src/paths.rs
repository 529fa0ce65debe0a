/// Centralized platform-specific path computation
///
/// Follows the XDG Base Directory specification on Unix-like systems.
use std::path::PathBuf;

const APP_DIR_NAME: &str = "codebase-qa";

/// Platform-agnostic path utilities
pub struct PlatformPaths;

impl PlatformPaths {
    /// Get the appropriate data directory for the current platform
    ///
    /// - Windows: %LOCALAPPDATA%
    /// - macOS: ~/Library/Application Support
    /// - Linux/Unix: $XDG_DATA_HOME or ~/.local/share
    pub fn data_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            std::env::var("LOCALAPPDATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        } else if cfg!(target_os = "macos") {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join("Library/Application Support"))
                .unwrap_or_else(|_| PathBuf::from("."))
        } else {
            std::env::var("XDG_DATA_HOME")
                .map(PathBuf::from)
                .or_else(|_| {
                    std::env::var("HOME").map(|home| PathBuf::from(home).join(".local/share"))
                })
                .unwrap_or_else(|_| PathBuf::from("."))
        }
    }

    /// Get the appropriate config directory for the current platform
    ///
    /// - Windows: %APPDATA%
    /// - macOS: ~/Library/Application Support
    /// - Linux/Unix: $XDG_CONFIG_HOME or ~/.config
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            std::env::var("APPDATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        } else if cfg!(target_os = "macos") {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join("Library/Application Support"))
                .unwrap_or_else(|_| PathBuf::from("."))
        } else {
            std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .or_else(|_| std::env::var("HOME").map(|home| PathBuf::from(home).join(".config")))
                .unwrap_or_else(|_| PathBuf::from("."))
        }
    }

    /// Returns: {data_dir}/codebase-qa
    pub fn project_data_dir() -> PathBuf {
        Self::data_dir().join(APP_DIR_NAME)
    }

    /// Returns: {config_dir}/codebase-qa
    pub fn project_config_dir() -> PathBuf {
        Self::config_dir().join(APP_DIR_NAME)
    }

    /// Get default persisted index path
    ///
    /// Returns: {data_dir}/codebase-qa/codebase-index.json
    pub fn default_index_path() -> PathBuf {
        Self::project_data_dir().join("codebase-index.json")
    }

    /// Get default summary path
    ///
    /// Returns: {data_dir}/codebase-qa/codebase-summary.md
    pub fn default_summary_path() -> PathBuf {
        Self::project_data_dir().join("codebase-summary.md")
    }

    /// Get default config file path
    ///
    /// Returns: {config_dir}/codebase-qa/config.toml
    pub fn default_config_path() -> PathBuf {
        Self::project_config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_not_empty() {
        assert!(!PlatformPaths::data_dir().as_os_str().is_empty());
    }

    #[test]
    fn test_config_dir_not_empty() {
        assert!(!PlatformPaths::config_dir().as_os_str().is_empty());
    }

    #[test]
    fn test_project_paths_contain_app_name() {
        assert!(
            PlatformPaths::project_data_dir()
                .to_string_lossy()
                .contains(APP_DIR_NAME)
        );
        assert!(
            PlatformPaths::project_config_dir()
                .to_string_lossy()
                .contains(APP_DIR_NAME)
        );
    }

    #[test]
    fn test_specific_file_paths() {
        let index_path = PlatformPaths::default_index_path();
        let summary_path = PlatformPaths::default_summary_path();
        let config_path = PlatformPaths::default_config_path();

        for path in [&index_path, &summary_path, &config_path] {
            assert!(
                path.to_string_lossy().contains(APP_DIR_NAME),
                "Path {:?} should contain '{}'",
                path,
                APP_DIR_NAME
            );
        }

        assert!(index_path.ends_with("codebase-index.json"));
        assert!(summary_path.ends_with("codebase-summary.md"));
        assert!(config_path.ends_with("config.toml"));
    }

    #[test]
    fn test_project_dirs_are_subdirectories() {
        let data_dir = PlatformPaths::data_dir();
        assert!(PlatformPaths::project_data_dir().starts_with(&data_dir));

        let config_dir = PlatformPaths::config_dir();
        assert!(PlatformPaths::project_config_dir().starts_with(&config_dir));
    }
}
