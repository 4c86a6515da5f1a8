//! Enhancement configuration loader.

use std::path::Path;

use item_core::EnhancementConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for enhancement configuration from TOML files.
///
/// Missing fields fall back to [`EnhancementConfig::default`]. Decimals are
/// written as strings so they stay exact:
///
/// ```toml
/// max_enhancement_level = 20
///
/// [curve]
/// base_growth = "1.1"
/// option_growth = "1.3"
///
/// [ratio_policy]
/// kind = "bounded"
/// min = "0"
/// max = "1"
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing EnhancementConfig
    ///
    /// # Returns
    ///
    /// Returns a validated EnhancementConfig.
    pub fn load(path: &Path) -> LoadResult<EnhancementConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<EnhancementConfig> {
        let config: EnhancementConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid enhancement config: {}", e))?;

        tracing::debug!(
            base_growth = %config.curve.base_growth,
            option_growth = %config.curve.option_growth,
            max_level = config.max_enhancement_level,
            "loaded enhancement config"
        );
        Ok(config)
    }
}
