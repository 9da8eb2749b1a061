use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::controller::GameSettings;
use crate::feedback::{SoundAssets, SpeechSettings};
use crate::selection::NoRepeatPolicy;
use crate::words::{WordList, DEFAULT_WORDS};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub words: Vec<String>,
    pub policy: NoRepeatPolicy,
    pub auto_advance_ms: u64,
    pub speech: SpeechSettings,
    pub speech_enabled: bool,
    pub speech_program: String,
    pub sound_enabled: bool,
    /// External player and assets; the terminal bell is used when absent
    pub sound: Option<SoundAssets>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
            policy: NoRepeatPolicy::default(),
            auto_advance_ms: 2000,
            speech: SpeechSettings::default(),
            speech_enabled: true,
            speech_program: "espeak".to_string(),
            sound_enabled: true,
            sound: None,
        }
    }
}

impl Config {
    pub fn word_list(&self) -> WordList {
        WordList::new(&self.words)
    }

    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            policy: self.policy,
            auto_advance: Duration::from_millis(self.auto_advance_ms),
            speech: self.speech.clone(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "spelltiles") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("spelltiles_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            words: vec!["apple".into(), "banana".into()],
            policy: NoRepeatPolicy::NoRepeatUntilExhausted,
            auto_advance_ms: 500,
            speech: SpeechSettings {
                locale: "en-GB".into(),
                rate: 1.0,
            },
            speech_enabled: false,
            speech_program: "say".into(),
            sound_enabled: true,
            sound: Some(SoundAssets {
                program: "aplay".into(),
                success: "/tmp/yay.wav".into(),
                failure: "/tmp/nope.wav".into(),
            }),
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "policy": "no-repeat-until-exhausted" }"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.policy, NoRepeatPolicy::NoRepeatUntilExhausted);
        assert_eq!(cfg.words, vec!["happy", "pretty", "funny"]);
        assert_eq!(cfg.auto_advance_ms, 2000);
    }

    #[test]
    fn game_settings_follow_config() {
        let cfg = Config {
            auto_advance_ms: 750,
            ..Config::default()
        };
        let settings = cfg.game_settings();
        assert_eq!(settings.auto_advance, Duration::from_millis(750));
        assert_eq!(settings.speech, SpeechSettings::default());
    }

    #[test]
    fn word_list_drops_blank_entries() {
        let cfg = Config {
            words: vec![" cat ".into(), "".into()],
            ..Config::default()
        };
        assert_eq!(cfg.word_list().words(), &["cat"]);
    }
}
