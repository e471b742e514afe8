use std::sync::Arc;

use hero_core::{ClassCatalog, ClassOracle, HeroConfig, PcgRng, RngOracle};

use super::PlayerCharacterManager;
use crate::collaborators::{Floor, Shelter};
use crate::events::EventBus;

/// Builder for [`PlayerCharacterManager`].
///
/// Defaults: the built-in class catalog, [`HeroConfig::default`], the PCG
/// RNG oracle and a fresh event bus.
pub struct ManagerBuilder {
    catalog: Option<Arc<dyn ClassOracle>>,
    config: HeroConfig,
    rng: Option<Arc<dyn RngOracle>>,
    events: Option<EventBus>,
}

impl ManagerBuilder {
    pub fn new() -> Self {
        Self {
            catalog: None,
            config: HeroConfig::default(),
            rng: None,
            events: None,
        }
    }

    /// Set the class catalog.
    pub fn catalog(mut self, catalog: Arc<dyn ClassOracle>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the manager configuration.
    pub fn config(mut self, config: HeroConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the RNG oracle used for every character's rolls.
    pub fn rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Share an existing event bus instead of creating one.
    pub fn event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Build the manager around its shelter and floor collaborators.
    pub fn build<S: Shelter, F: Floor>(
        self,
        shelter: S,
        floor: F,
    ) -> PlayerCharacterManager<S, F> {
        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(ClassCatalog::builtin()) as Arc<dyn ClassOracle>);
        let rng = self
            .rng
            .unwrap_or_else(|| Arc::new(PcgRng) as Arc<dyn RngOracle>);
        let events = self.events.unwrap_or_default();
        PlayerCharacterManager::from_parts(catalog, self.config, rng, events, shelter, floor)
    }
}

impl Default for ManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
