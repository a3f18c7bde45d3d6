//! Gearhead Game Engine
//!
//! Platform-agnostic core for a turn-based car-tuning game: procedural parts,
//! a tunable vehicle, randomized competitions and a lossy save format. The
//! crate performs no I/O; configuration and persistence come in through the
//! [`ConfigSource`] and [`GameStorage`] seams.

pub mod config;
pub mod constants;
pub mod dice;
pub mod error;
pub mod event;
pub mod generator;
pub mod inventory;
pub mod modifier;
pub mod numbers;
pub mod part;
pub mod rarity;
pub mod session;
pub mod stats;
pub mod vehicle;

// Re-export commonly used types
pub use config::{ConfigError, EventSpec, GameConfig};
pub use dice::{CountingRng, RandomSource, RngBundle, ScriptedDice};
pub use error::GameError;
pub use event::{
    Event, EventSummary, RaceOutcome, RaceReport, RewardWeights, reward_weights,
    roll_damage, roll_reward_rarity, success_chance, weighted_pick,
};
pub use generator::PartGenerator;
pub use inventory::Inventory;
pub use modifier::{EventModifier, ModifierCatalog};
pub use part::Part;
pub use rarity::{Rarity, RarityTable, RarityTier};
pub use session::{GameSession, SaveData, SessionSummary, TurnReport};
pub use stats::{StatKind, Stats};
pub use vehicle::{Vehicle, VehicleSnapshot};

/// Trait for abstracting where game tables come from.
/// Platform-specific implementations should provide this
pub trait ConfigSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the catalogs a session is built from.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config(&self) -> Result<GameConfig, Self::Error>;
}

/// Built-in tables.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    config: GameConfig,
}

impl StaticConfig {
    #[must_use]
    pub const fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl ConfigSource for StaticConfig {
    type Error = std::convert::Infallible;

    fn load_config(&self) -> Result<GameConfig, Self::Error> {
        Ok(self.config.clone())
    }
}

/// Trait for abstracting save/load operations.
/// Platform-specific implementations should provide this
pub trait GameStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save a session snapshot under `save_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    fn save_game(&self, save_name: &str, data: &SaveData) -> Result<(), Self::Error>;

    /// Load the snapshot stored under `save_name`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be loaded.
    fn load_game(&self, save_name: &str) -> Result<Option<SaveData>, Self::Error>;

    /// Delete saved game
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error>;
}

/// Main game engine for managing game sessions
pub struct GameEngine<C, S>
where
    C: ConfigSource,
    S: GameStorage,
{
    config_source: C,
    storage: S,
}

impl<C, S> GameEngine<C, S>
where
    C: ConfigSource,
    S: GameStorage,
{
    /// Create a new game engine with the provided config source and storage
    pub const fn new(config_source: C, storage: S) -> Self {
        Self {
            config_source,
            storage,
        }
    }

    /// Start a fresh session with the loaded tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the tables cannot be loaded or fail validation.
    pub fn create_session(&self, seed: u64) -> anyhow::Result<GameSession>
    where
        C::Error: Into<anyhow::Error>,
    {
        let config = self.config_source.load_config().map_err(Into::into)?;
        Ok(GameSession::new(config, seed)?)
    }

    /// Save a session
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be saved.
    pub fn save_session(&self, save_name: &str, session: &GameSession) -> Result<(), S::Error> {
        self.storage.save_game(save_name, &session.save_data())
    }

    /// Load a session: a fresh board for `seed` with the saved car and
    /// inventory applied on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the save or the tables cannot be loaded.
    pub fn load_session(&self, save_name: &str, seed: u64) -> anyhow::Result<Option<GameSession>>
    where
        C::Error: Into<anyhow::Error>,
        S::Error: Into<anyhow::Error>,
    {
        if let Some(data) = self.storage.load_game(save_name).map_err(Into::into)? {
            let mut session = self.create_session(seed)?;
            session.load(&data);
            Ok(Some(session))
        } else {
            Ok(None)
        }
    }

    /// Delete a save
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    pub fn delete_session(&self, save_name: &str) -> Result<(), S::Error> {
        self.storage.delete_save(save_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryStorage {
        saves: Rc<RefCell<HashMap<String, SaveData>>>,
    }

    impl GameStorage for MemoryStorage {
        type Error = Infallible;

        fn save_game(&self, save_name: &str, data: &SaveData) -> Result<(), Self::Error> {
            self.saves
                .borrow_mut()
                .insert(save_name.to_string(), data.clone());
            Ok(())
        }

        fn load_game(&self, save_name: &str) -> Result<Option<SaveData>, Self::Error> {
            Ok(self.saves.borrow().get(save_name).cloned())
        }

        fn delete_save(&self, save_name: &str) -> Result<(), Self::Error> {
            self.saves.borrow_mut().remove(save_name);
            Ok(())
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("config unavailable")]
    struct Unavailable;

    struct BrokenConfig;

    impl ConfigSource for BrokenConfig {
        type Error = Unavailable;

        fn load_config(&self) -> Result<GameConfig, Self::Error> {
            Err(Unavailable)
        }
    }

    #[test]
    fn engine_round_trips_sessions_through_storage() {
        let storage = MemoryStorage::default();
        let engine = GameEngine::new(StaticConfig::default(), storage.clone());
        let mut session = engine.create_session(7).unwrap();
        session.play_turn(0).unwrap();

        engine.save_session("slot1", &session).unwrap();
        assert!(storage.saves.borrow().contains_key("slot1"));

        let loaded = engine.load_session("slot1", 7).unwrap().unwrap();
        assert_eq!(loaded.save_data(), session.save_data());
        assert_eq!(loaded.vehicle().stats(), session.vehicle().stats());

        engine.delete_session("slot1").unwrap();
        assert!(engine.load_session("slot1", 7).unwrap().is_none());
    }

    #[test]
    fn config_failures_surface_through_anyhow() {
        let engine = GameEngine::new(BrokenConfig, MemoryStorage::default());
        let err = engine.create_session(1).unwrap_err();
        assert_eq!(err.to_string(), "config unavailable");
    }

    #[test]
    fn invalid_static_tables_fail_session_creation() {
        let config = GameConfig {
            part_types: Vec::new(),
            ..GameConfig::default()
        };
        let engine = GameEngine::new(StaticConfig::new(config), MemoryStorage::default());
        assert!(engine.create_session(1).is_err());
    }
}
