//! One playthrough: a car, its inventory, and the event board.
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::constants::LOG_TARGET_SESSION;
use crate::dice::{RandomSource, RngBundle};
use crate::error::GameError;
use crate::event::{Event, RaceReport};
use crate::generator::PartGenerator;
use crate::inventory::Inventory;
use crate::modifier::ModifierCatalog;
use crate::part::Part;
use crate::stats::Stats;
use crate::vehicle::{Vehicle, VehicleSnapshot};

/// Persisted session. Only names survive for parts, so loading is lossy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub car: VehicleSnapshot,
    #[serde(default)]
    pub inventory: Vec<String>,
}

/// Result of one [`GameSession::play_turn`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: u32,
    pub race: RaceReport,
    pub reward: Option<Part>,
    pub durability: i32,
    pub destroyed: bool,
}

/// Final performance summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub stats: Stats,
    pub installed: Vec<String>,
    pub inventory: Vec<String>,
    pub turns: u32,
    pub wins: u32,
    pub losses: u32,
    pub destroyed: bool,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    generator: PartGenerator,
    modifiers: ModifierCatalog,
    board: Vec<Event>,
    vehicle: Vehicle,
    inventory: Inventory,
    rng: Rc<RngBundle>,
    seed: u64,
    turns: u32,
    wins: u32,
    losses: u32,
    game_over: bool,
}

impl GameSession {
    /// Start a session whose board and races draw from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] when `config` fails validation.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        let rng = Rc::new(RngBundle::from_user_seed(seed));
        let bundle = Rc::clone(&rng);
        let mut forge = bundle.forge();
        Self::assemble(config, seed, rng, &mut *forge)
    }

    /// Start a session whose board is staged from `source`. Races played
    /// through [`GameSession::play_turn`] use the seed-0 streams.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] when `config` fails validation.
    pub fn with_source<S: RandomSource + ?Sized>(
        config: GameConfig,
        source: &mut S,
    ) -> Result<Self, GameError> {
        Self::assemble(config, 0, Rc::new(RngBundle::from_user_seed(0)), source)
    }

    fn assemble<S: RandomSource + ?Sized>(
        config: GameConfig,
        seed: u64,
        rng: Rc<RngBundle>,
        source: &mut S,
    ) -> Result<Self, GameError> {
        let generator = PartGenerator::from_config(&config)?;
        let modifiers = ModifierCatalog::new(config.modifiers.clone())?;
        let board = config
            .events
            .iter()
            .map(|spec| Event::new(&spec.name, spec.difficulty, &modifiers, &generator, source))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            target: LOG_TARGET_SESSION,
            "session seed {seed} staged {} events",
            board.len()
        );
        Ok(Self {
            config,
            generator,
            modifiers,
            board,
            vehicle: Vehicle::new(),
            inventory: Inventory::new(),
            rng,
            seed,
            turns: 0,
            wins: 0,
            losses: 0,
            game_over: false,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn generator(&self) -> &PartGenerator {
        &self.generator
    }

    #[must_use]
    pub const fn modifiers(&self) -> &ModifierCatalog {
        &self.modifiers
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.board
    }

    #[must_use]
    pub const fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn turns(&self) -> u32 {
        self.turns
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.game_over
    }

    /// Shared handle to the session's RNG streams.
    #[must_use]
    pub fn rng_bundle(&self) -> Rc<RngBundle> {
        Rc::clone(&self.rng)
    }

    /// Race event `index` using the session's race stream.
    ///
    /// # Errors
    ///
    /// See [`GameSession::play_turn_with`].
    pub fn play_turn(&mut self, index: usize) -> Result<TurnReport, GameError> {
        let bundle = Rc::clone(&self.rng);
        let mut race = bundle.race();
        self.play_turn_with(index, &mut *race)
    }

    /// Race event `index`, drawing from `rng`. The reward goes into the
    /// inventory only after the race resolves; destruction is checked after
    /// damage lands.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionOver`] once the vehicle is destroyed and
    /// [`GameError::IndexOutOfRange`] for a bad event index.
    pub fn play_turn_with<S: RandomSource + ?Sized>(
        &mut self,
        index: usize,
        rng: &mut S,
    ) -> Result<TurnReport, GameError> {
        if self.game_over {
            return Err(GameError::SessionOver);
        }
        let event = self
            .board
            .get(index)
            .ok_or_else(|| GameError::out_of_range(index, self.board.len()))?;

        let race = event.compete(&mut self.vehicle, rng);
        let reward = if race.succeeded() {
            let part = event.claim_reward();
            self.inventory.add(part.clone());
            self.wins += 1;
            Some(part)
        } else {
            self.losses += 1;
            None
        };
        self.turns += 1;

        if self.vehicle.is_destroyed() {
            self.game_over = true;
            log::debug!(
                target: LOG_TARGET_SESSION,
                "vehicle destroyed on turn {} ({})",
                self.turns,
                self.vehicle.stats()
            );
        }

        Ok(TurnReport {
            turn: self.turns,
            race,
            reward,
            durability: self.vehicle.durability(),
            destroyed: self.game_over,
        })
    }

    /// Move inventory part `index` onto the car. Both containers are left
    /// untouched when the part cannot be installed.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IndexOutOfRange`] or [`GameError::InvalidPart`].
    pub fn install_from_inventory(&mut self, index: usize) -> Result<(), GameError> {
        self.vehicle.check_install(self.inventory.peek(index)?)?;
        let part = self.inventory.remove(index)?;
        if let Err(err) = self.vehicle.install(part.clone()) {
            self.inventory.restore(index, part);
            return Err(err);
        }
        Ok(())
    }

    /// Move installed part `index` back into the inventory.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IndexOutOfRange`] or [`GameError::StatOverflow`].
    pub fn uninstall_to_inventory(&mut self, index: usize) -> Result<(), GameError> {
        let part = self.vehicle.uninstall(index)?;
        self.inventory.add(part);
        Ok(())
    }

    #[must_use]
    pub fn save_data(&self) -> SaveData {
        SaveData {
            car: self.vehicle.export_state(),
            inventory: self.inventory.names(),
        }
    }

    /// Replace vehicle and inventory with `data`. Parts come back by name
    /// only, with zero deltas. Turn, win and loss counters restart at zero
    /// since a save does not carry them.
    pub fn load(&mut self, data: &SaveData) {
        self.vehicle.import_state(&data.car);
        self.inventory = Inventory::from_names(data.inventory.iter().cloned());
        self.turns = 0;
        self.wins = 0;
        self.losses = 0;
        self.game_over = self.vehicle.is_destroyed();
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.seed,
            stats: self.vehicle.stats(),
            installed: self.vehicle.parts().iter().map(|p| p.name().to_string()).collect(),
            inventory: self.inventory.names(),
            turns: self.turns,
            wins: self.wins,
            losses: self.losses,
            destroyed: self.vehicle.is_destroyed(),
        }
    }
}
