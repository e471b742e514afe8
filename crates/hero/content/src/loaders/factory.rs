//! Content factory for building the class oracle and settings from data files.

use std::path::{Path, PathBuf};

use hero_core::{ClassCatalog, HeroConfig};

use crate::loaders::{ClassCatalogLoader, ConfigLoader, LoadResult};

/// Content factory that loads all hero content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── classes.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data files shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load manager settings from `config.toml`.
    pub fn load_config(&self) -> LoadResult<HeroConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the class catalog from `classes.ron`.
    pub fn load_classes(&self) -> LoadResult<ClassCatalog> {
        let path = self.data_dir.join("classes.ron");
        ClassCatalogLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
