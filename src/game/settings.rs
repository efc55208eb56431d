use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

const ENV_SETTINGS_PATH: &str = "FPUZZLES_LINES_SETTINGS";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default = "default_max_search_nodes")]
    pub max_search_nodes: usize,

    /// How many solutions the solver looks for before stopping; 2 is enough
    /// to tell a unique puzzle from an ambiguous one.
    #[serde(default = "default_solution_limit")]
    pub solution_limit: usize,

    #[serde(default)]
    pub seed: Option<u64>,
}

// Helper functions for default values
fn default_version() -> u32 {
    2
}
fn default_max_search_nodes() -> usize {
    1_000_000
}
fn default_solution_limit() -> usize {
    2
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            max_search_nodes: default_max_search_nodes(),
            solution_limit: default_solution_limit(),
            seed: None,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults when the file is
    /// missing or unreadable, then applies environment overrides.
    pub fn load(path: &Path) -> Self {
        let mut settings = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Settings>(&contents) {
                Ok(mut settings) => {
                    settings.migrate();
                    settings
                }
                Err(err) => {
                    warn!(target: "settings", "Ignoring malformed {}: {}", path.display(), err);
                    Settings::default()
                }
            },
            Err(_) => Settings::default(),
        };
        settings.apply_env();
        settings
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn settings_path() -> PathBuf {
        std::env::var(ENV_SETTINGS_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("fpuzzles-lines.json"))
    }

    fn migrate(&mut self) {
        match self.version {
            // version 1 had no solution limit and stopped at the first solution
            0 | 1 => {
                self.solution_limit = default_solution_limit();
                self.version = default_version();
            }
            _ => (),
        }
    }

    fn apply_env(&mut self) {
        if let Some(seed) = Self::seed_from_env() {
            self.seed = Some(seed);
        }
        if let Ok(value) = std::env::var("MAX_SEARCH_NODES") {
            match value.parse::<usize>() {
                Ok(nodes) => self.max_search_nodes = nodes,
                Err(_) => warn!(target: "settings", "Ignoring MAX_SEARCH_NODES={}", value),
            }
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse::<u64>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_missing_file_gives_defaults() {
        env::remove_var("SEED");
        env::remove_var("MAX_SEARCH_NODES");
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    #[serial]
    fn test_save_then_load() {
        env::remove_var("SEED");
        env::remove_var("MAX_SEARCH_NODES");
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings {
            max_search_nodes: 500,
            seed: Some(3),
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    #[serial]
    fn test_partial_file_uses_field_defaults_and_migrates() {
        env::remove_var("SEED");
        env::remove_var("MAX_SEARCH_NODES");
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"version": 1, "seed": 8, "solution_limit": 1}"#).unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.seed, Some(8));
        assert_eq!(settings.solution_limit, 2);
        assert_eq!(settings.max_search_nodes, 1_000_000);
        assert_eq!(settings.version, 2);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        let dir = TempDir::new().unwrap();
        env::set_var("SEED", "1234");
        env::set_var("MAX_SEARCH_NODES", "77");
        let settings = Settings::load(&dir.path().join("none.json"));
        env::remove_var("SEED");
        env::remove_var("MAX_SEARCH_NODES");

        assert_eq!(settings.seed, Some(1234));
        assert_eq!(settings.max_search_nodes, 77);
    }

    #[test]
    #[serial]
    fn test_unknown_keys_are_ignored() {
        env::remove_var("SEED");
        env::remove_var("MAX_SEARCH_NODES");
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"version": 2, "default_size": 25, "solution_limit": 5}"#).unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.solution_limit, 5);
        assert_eq!(settings.max_search_nodes, 1_000_000);
    }
}
