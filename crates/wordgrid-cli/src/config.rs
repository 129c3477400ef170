use std::env;
use std::path::PathBuf;

use anyhow::Context;

/// Autoplay configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Word list used to build grids; the built-in list when unset
    pub placement_dict: Option<PathBuf>,
    /// Word list used to accept finds; the built-in list when unset
    pub validation_dict: Option<PathBuf>,
    /// JSON object of word definitions
    pub definitions: Option<PathBuf>,
    /// Snapshot file read at start and written at exit
    pub save_path: PathBuf,
    /// Fixed seed for a reproducible run
    pub seed: Option<u64>,
    /// Words the bot tries to find in the normal world
    pub turns: u32,
    /// Also play one simulated speed round
    pub speed_round: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let path = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        let save_path =
            path("WORDGRID_SAVE_PATH").unwrap_or_else(|| PathBuf::from("wordgrid-save.json"));
        let seed = lookup("WORDGRID_SEED")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("WORDGRID_SEED must be an unsigned integer")?;
        let turns = lookup("WORDGRID_TURNS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .context("WORDGRID_TURNS must be an unsigned integer")?;
        let speed_round = match lookup("WORDGRID_SPEED_ROUND") {
            Some(v) => parse_bool(&v)
                .with_context(|| format!("WORDGRID_SPEED_ROUND must be a boolean, got {:?}", v))?,
            None => false,
        };

        Ok(Self {
            placement_dict: path("WORDGRID_PLACEMENT_DICT"),
            validation_dict: path("WORDGRID_VALIDATION_DICT"),
            definitions: path("WORDGRID_DEFINITIONS"),
            save_path,
            seed,
            turns,
            speed_round,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.save_path, PathBuf::from("wordgrid-save.json"));
        assert_eq!(config.turns, 10);
        assert_eq!(config.seed, None);
        assert!(!config.speed_round);
        assert!(config.placement_dict.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("WORDGRID_PLACEMENT_DICT", "words/common.txt"),
            ("WORDGRID_VALIDATION_DICT", ""),
            ("WORDGRID_SAVE_PATH", "/tmp/grid.json"),
            ("WORDGRID_SEED", "42"),
            ("WORDGRID_TURNS", "3"),
            ("WORDGRID_SPEED_ROUND", "Yes"),
        ])
        .unwrap();
        assert_eq!(config.placement_dict, Some(PathBuf::from("words/common.txt")));
        assert!(config.validation_dict.is_none());
        assert_eq!(config.save_path, PathBuf::from("/tmp/grid.json"));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.turns, 3);
        assert!(config.speed_round);
    }

    #[test]
    fn test_invalid_values() {
        assert!(config_from(&[("WORDGRID_SEED", "-1")]).is_err());
        assert!(config_from(&[("WORDGRID_TURNS", "many")]).is_err());
        assert!(config_from(&[("WORDGRID_SPEED_ROUND", "maybe")]).is_err());
    }
}
