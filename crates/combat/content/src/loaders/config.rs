//! Combat configuration loader.

use std::path::Path;

use anyhow::Context;
use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
///
/// Missing sections and fields keep their defaults, so a file only needs to
/// name what it changes.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse and validate config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate().context("Invalid combat config")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use combat_core::{GameMode, Ruleset};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = ConfigLoader::parse("").unwrap();
        assert_eq!(config, CombatConfig::default());
    }

    #[test]
    fn partial_sections_override_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [rules]
            mode = "clan_arena"
            ruleset = "quake3_arena"

            [damage]
            friendly_fire_scale = 0.5

            [arena]
            self_armor = true
            "#,
        )
        .unwrap();

        assert_eq!(config.rules.mode, GameMode::ClanArena);
        assert_eq!(config.rules.ruleset, Ruleset::Quake3Arena);
        assert!(config.rules.self_damage);
        assert_eq!(config.damage.friendly_fire_scale, 0.5);
        assert_eq!(config.damage.player_scale, 1.0);
        assert!(config.arena.self_armor);
        assert_eq!(config.arena.damage_per_point, 100);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ConfigLoader::parse(
            r#"
            [vampiric]
            percentile = 1.5
            "#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("vampiric.percentile"));
    }

    #[test]
    fn loads_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("combat.toml");
        fs::write(
            &path,
            r#"
            [rules]
            mode = "duel"
            instagib = true
            "#,
        )
        .unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.rules.mode, GameMode::Duel);
        assert!(config.rules.instagib);
    }

    #[test]
    fn missing_file_names_the_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");

        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn bundled_server_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/combat.toml");
        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.rules.mode, GameMode::TeamDeathmatch);
    }
}
