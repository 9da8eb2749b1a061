use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where the tracing log goes; the terminal itself belongs to the UI.
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("spelltiles");
            Some(state_dir.join("spelltiles.log"))
        } else {
            ProjectDirs::from("", "", "spelltiles")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("spelltiles.log"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_is_named_after_the_app() {
        if let Some(path) = AppDirs::log_path() {
            assert_eq!(path.file_name().unwrap(), "spelltiles.log");
            assert!(path.to_string_lossy().contains("spelltiles"));
        }
    }
}
