//! Manager settings loader.

use std::path::Path;

use hero_core::HeroConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`HeroConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`HeroConfig::default`].
    pub fn load(path: &Path) -> LoadResult<HeroConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<HeroConfig> {
        let config: HeroConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if !(config.base_revive_time.is_finite() && config.base_revive_time >= 0.0) {
            anyhow::bail!(
                "base_revive_time must be a non-negative number, got {}",
                config.base_revive_time
            );
        }

        Ok(config)
    }
}
