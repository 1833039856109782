//! Configuration for lpath-player
//!
//! The config file is the shared bootstrap file from lpath-common with an
//! extra `[player]` table:
//!
//! ```toml
//! api_url = "http://localhost:8000"
//! course_id = 1
//!
//! [logging]
//! level = "info"
//!
//! [player]
//! progress_poll_interval_ms = 1000
//! controls_hide_delay_ms = 3000
//! seek_policy = "clamp"
//! autoplay = true
//! initial_volume = 100
//! ```

use crate::error::{Error, Result};
use lpath_common::config::{load_toml, TomlConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// How `seek` treats targets outside `[0, duration]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeekPolicy {
    /// Pull the target into range
    #[default]
    Clamp,
    /// Refuse the seek with `Error::SeekOutOfRange`
    Reject,
}

/// Playback tuning for the video modal
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Position sampling period while playing
    pub progress_poll_interval_ms: u64,

    /// Pointer inactivity before controls hide during playback
    pub controls_hide_delay_ms: u64,

    pub seek_policy: SeekPolicy,

    /// Issue `play` as soon as the player reports ready
    pub autoplay: bool,

    /// Volume slider position for a new session (0-100)
    pub initial_volume: u8,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            progress_poll_interval_ms: 1000,
            controls_hide_delay_ms: 3000,
            seek_policy: SeekPolicy::Clamp,
            autoplay: true,
            initial_volume: 100,
        }
    }
}

impl PlayerSettings {
    pub fn progress_poll_interval(&self) -> Duration {
        Duration::from_millis(self.progress_poll_interval_ms)
    }

    pub fn controls_hide_delay(&self) -> Duration {
        Duration::from_millis(self.controls_hide_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.progress_poll_interval_ms == 0 {
            return Err(Error::Config(
                "progress_poll_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.controls_hide_delay_ms == 0 {
            return Err(Error::Config(
                "controls_hide_delay_ms must be greater than 0".to_string(),
            ));
        }
        if self.initial_volume > 100 {
            return Err(Error::Config(format!(
                "initial_volume must be 0-100, got {}",
                self.initial_volume
            )));
        }
        Ok(())
    }
}

/// Complete config file: shared bootstrap settings plus `[player]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlayerConfigFile {
    #[serde(flatten)]
    pub common: TomlConfig,

    #[serde(default)]
    pub player: PlayerSettings,
}

impl PlayerConfigFile {
    /// Load and validate; a missing file yields defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = load_toml(path)?;
        config.player.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_modal_behavior() {
        let settings = PlayerSettings::default();
        assert_eq!(settings.progress_poll_interval(), Duration::from_secs(1));
        assert_eq!(settings.controls_hide_delay(), Duration::from_secs(3));
        assert_eq!(settings.seek_policy, SeekPolicy::Clamp);
        assert!(settings.autoplay);
        assert_eq!(settings.initial_volume, 100);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_player_table_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
course_id = 3

[player]
seek_policy = "reject"
controls_hide_delay_ms = 1500
"#
        )
        .unwrap();

        let config = PlayerConfigFile::load(Some(file.path())).unwrap();
        assert_eq!(config.common.course_id, Some(3));
        assert_eq!(config.player.seek_policy, SeekPolicy::Reject);
        assert_eq!(config.player.controls_hide_delay_ms, 1500);
        // Untouched keys keep defaults
        assert_eq!(config.player.progress_poll_interval_ms, 1000);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = PlayerSettings {
            initial_volume: 150,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(Error::Config(_))));

        let settings = PlayerSettings {
            progress_poll_interval_ms: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = PlayerConfigFile::load(None).unwrap();
        assert_eq!(config, PlayerConfigFile::default());
    }
}
