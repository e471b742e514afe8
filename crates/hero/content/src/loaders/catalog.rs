//! Class catalog loader.
//!
//! Loads class entries from RON files into a validated [`ClassCatalog`].

use std::path::Path;

use hero_core::{ClassCatalog, ClassData};

use crate::loaders::{LoadResult, read_file};

/// Loader for the class catalog from RON files.
pub struct ClassCatalogLoader;

impl ClassCatalogLoader {
    /// Load the class catalog from a RON file.
    ///
    /// RON format: `Vec<ClassData>`. Each class may appear once; every entry
    /// is validated (matching kit, usable level curves) before insertion.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file
    pub fn load(path: &Path) -> LoadResult<ClassCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid class catalog {}: {}", path.display(), e))
    }

    /// Parse a class catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<ClassCatalog> {
        let entries: Vec<ClassData> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse class catalog RON: {}", e))?;

        let mut catalog = ClassCatalog::new();
        for entry in entries {
            let class = entry.class;
            let previous = catalog
                .insert(entry)
                .map_err(|e| anyhow::anyhow!("Rejected class entry '{}': {}", class, e))?;
            if previous.is_some() {
                anyhow::bail!("Duplicate class entry '{}'", class);
            }
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_core::{CharacterClass, ClassBehavior, ClassKit, ClassOracle};

    const ROGUE_ONLY: &str = r#"[
        (
            class: Rogue,
            display_name: "Shade",
            stats: (
                health: (base: 100.0, per_level: 10.0),
                mana: (base: 50.0, per_level: 5.0),
                attack_power: (base: 22.0, per_level: 3.0),
            ),
            kit: Rogue((stealth_dodge_chance: 0.75)),
        ),
    ]"#;

    #[test]
    fn kit_fields_default_when_omitted() {
        let catalog = ClassCatalogLoader::parse(ROGUE_ONLY).unwrap();
        let rogue = catalog.require(CharacterClass::Rogue).unwrap();

        assert_eq!(rogue.display_name, "Shade");
        assert_eq!(rogue.revive_time(3), None);
        let ClassKit::Rogue(kit) = &rogue.kit else {
            panic!("expected rogue kit");
        };
        assert_eq!(kit.stealth_dodge_chance, 0.75);
        assert_eq!(kit.quick_step_cost, 20.0);
        assert_eq!(rogue.kit.cooldown(), 5.0);
        assert_eq!(catalog.available_classes(), vec![CharacterClass::Rogue]);
    }

    #[test]
    fn mismatched_kit_is_rejected() {
        let text = ROGUE_ONLY.replace("kit: Rogue(", "kit: Mage(");
        let err = ClassCatalogLoader::parse(&text).unwrap_err();
        assert!(err.to_string().contains("rogue"));
    }

    #[test]
    fn duplicate_class_is_rejected() {
        let body = ROGUE_ONLY.trim().trim_start_matches('[').trim_end_matches(']');
        let text = format!("[{body}{body}]");
        let err = ClassCatalogLoader::parse(&text).unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }
}
