//! Content factory for loading item content from a data directory.

use std::path::{Path, PathBuf};

use item_core::EnhancementConfig;

use crate::loaders::{ConfigLoader, ItemCatalog, ItemLoader, LoadResult};

/// Content factory that loads all item content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── enhancement.toml
/// └── items.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load enhancement configuration from `enhancement.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<EnhancementConfig> {
        let path = self.data_dir.join("enhancement.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no enhancement config, using defaults");
            return Ok(EnhancementConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn test_missing_config_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), EnhancementConfig::default());
        assert!(factory.load_items().is_err());
    }
}
