//! Runtime configuration for the terminal host.

use crate::constants::DEFAULT_FPS;
use std::path::PathBuf;

/// Host configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Where records and the log file live (None = `~/.flipping-bird/`)
    pub data_dir: Option<PathBuf>,
    /// Keep records in memory only
    pub ephemeral: bool,
    /// Target frame rate of the host loop
    pub fps: u32,
    /// `tracing-subscriber` filter directive
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            ephemeral: false,
            fps: DEFAULT_FPS,
            log_filter: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("FLIPPING_BIRD_DATA_DIR") {
            if dir.trim().is_empty() {
                tracing::warn!("FLIPPING_BIRD_DATA_DIR is empty, using default");
            } else {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Some(fps) = lookup("FLIPPING_BIRD_FPS") {
            match fps.parse::<u32>() {
                Ok(parsed) if (10..=240).contains(&parsed) => config.fps = parsed,
                Ok(_) => tracing::warn!("FLIPPING_BIRD_FPS must be 10-240, using default"),
                Err(_) => tracing::warn!("Invalid FLIPPING_BIRD_FPS '{}', using default", fps),
            }
        }

        if let Some(filter) = lookup("FLIPPING_BIRD_LOG") {
            config.log_filter = filter;
        }

        config
    }

    /// Frame period in milliseconds.
    pub fn frame_interval_ms(&self) -> u64 {
        1000 / self.fps.max(1) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GameConfig::from_lookup(lookup(&[]));
        assert_eq!(config.fps, DEFAULT_FPS);
        assert!(config.data_dir.is_none());
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.frame_interval_ms(), 16);
    }

    #[test]
    fn test_overrides() {
        let config = GameConfig::from_lookup(lookup(&[
            ("FLIPPING_BIRD_DATA_DIR", "/tmp/birds"),
            ("FLIPPING_BIRD_FPS", "30"),
            ("FLIPPING_BIRD_LOG", "debug"),
        ]));
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/birds")));
        assert_eq!(config.fps, 30);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_invalid_fps_falls_back() {
        let config = GameConfig::from_lookup(lookup(&[("FLIPPING_BIRD_FPS", "fast")]));
        assert_eq!(config.fps, DEFAULT_FPS);
        let config = GameConfig::from_lookup(lookup(&[("FLIPPING_BIRD_FPS", "1000")]));
        assert_eq!(config.fps, DEFAULT_FPS);
    }
}
