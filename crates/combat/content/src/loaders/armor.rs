//! Armor table loader.

use std::path::Path;

use anyhow::Context;
use combat_core::{ArmorRules, CombatConfig};

use crate::loaders::{LoadResult, read_file};

/// Loader for per-ruleset armor tables from TOML files.
///
/// Rulesets missing from the file keep their stock tables.
pub struct ArmorTableLoader;

impl ArmorTableLoader {
    pub fn load(path: &Path) -> LoadResult<ArmorRules> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<ArmorRules> {
        let armor: ArmorRules = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse armor TOML: {}", e))?;

        // Validation lives on the full config.
        let config = CombatConfig {
            armor,
            ..CombatConfig::default()
        };
        config.validate().context("Invalid armor table")?;
        Ok(config.armor)
    }

    /// Loads a table file into an existing config.
    pub fn apply(path: &Path, config: &mut CombatConfig) -> LoadResult<()> {
        config.armor = Self::load(path)?;
        Ok(())
    }
}
