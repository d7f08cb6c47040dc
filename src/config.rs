//! Configuration for the wagering engine and the round simulator
//!
//! The game toggle and treasury wiring are deliberately plain data: the host
//! injects them into every round invocation instead of the engine reading
//! ambient global state. Loading supports a TOML file with `RANGEDICE_*`
//! environment overrides on top, followed by validation.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Top-level configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiceConfig {
    pub game: GameConfig,
    pub simulation: SimulationConfig,
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

/// Per-round game state injected into the engine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    /// Rounds are rejected while the game is switched off.
    pub active: bool,
    /// Treasury label used for the stake-forwarding audit leg.
    pub treasury_address: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            active: true,
            treasury_address: "treasury".to_string(),
        }
    }
}

/// Settings for the simulator binary.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of rounds to play.
    pub rounds: u64,
    /// Starting treasury balance in whole tokens (scaled by 10^18).
    pub starting_reserve_tokens: u64,
    /// Fixed RNG seed for reproducible simulations; entropy when absent.
    pub rng_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rounds: 100,
            starting_reserve_tokens: 1_000_000,
            rng_seed: None,
        }
    }
}

/// Configuration loader with environment variable support.
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path.
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and environment variables.
    pub fn load(&self) -> Result<DiceConfig, ConfigError> {
        let mut config = if let Some(ref path) = self.config_path {
            self.load_from_file(path)?
        } else {
            DiceConfig::default()
        };

        self.apply_env_overrides(&mut config)?;
        self.validate(&config)?;

        Ok(config)
    }

    fn load_from_file(&self, path: &str) -> Result<DiceConfig, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("failed to read {}: {}", path, e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::LoadFailed(format!("failed to parse TOML: {}", e)))
    }

    fn apply_env_overrides(&self, config: &mut DiceConfig) -> Result<(), ConfigError> {
        if let Ok(active) = env::var("RANGEDICE_GAME_ACTIVE") {
            config.game.active = active.parse().map_err(|_| ConfigError::InvalidValue {
                field: "RANGEDICE_GAME_ACTIVE".to_string(),
                value: active,
                reason: "invalid boolean value".to_string(),
            })?;
        }
        if let Ok(address) = env::var("RANGEDICE_TREASURY_ADDRESS") {
            config.game.treasury_address = address;
        }
        if let Ok(rounds) = env::var("RANGEDICE_SIM_ROUNDS") {
            config.simulation.rounds = rounds.parse().map_err(|_| ConfigError::InvalidValue {
                field: "RANGEDICE_SIM_ROUNDS".to_string(),
                value: rounds,
                reason: "invalid round count".to_string(),
            })?;
        }
        if let Ok(reserve) = env::var("RANGEDICE_SIM_RESERVE_TOKENS") {
            config.simulation.starting_reserve_tokens =
                reserve.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "RANGEDICE_SIM_RESERVE_TOKENS".to_string(),
                    value: reserve,
                    reason: "invalid token amount".to_string(),
                })?;
        }
        if let Ok(seed) = env::var("RANGEDICE_SIM_RNG_SEED") {
            config.simulation.rng_seed =
                Some(seed.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "RANGEDICE_SIM_RNG_SEED".to_string(),
                    value: seed,
                    reason: "invalid seed".to_string(),
                })?);
        }

        Ok(())
    }

    fn validate(&self, config: &DiceConfig) -> Result<(), ConfigError> {
        if config.game.treasury_address.is_empty() {
            return Err(ConfigError::MissingRequired("game.treasury_address".to_string()));
        }

        if config.simulation.rounds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "simulation.rounds".to_string(),
                value: "0".to_string(),
                reason: "round count cannot be zero".to_string(),
            });
        }

        if config.simulation.starting_reserve_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "simulation.starting_reserve_tokens".to_string(),
                value: "0".to_string(),
                reason: "the treasury cannot start empty".to_string(),
            });
        }

        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, config: &DiceConfig, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(config)
            .map_err(|e| ConfigError::SaveFailed(format!("failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::SaveFailed(format!("failed to write to {}: {}", path, e)))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder pattern for creating configurations.
pub struct ConfigBuilder {
    config: DiceConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: DiceConfig::default(),
        }
    }

    pub fn game(mut self, game: GameConfig) -> Self {
        self.config.game = game;
        self
    }

    pub fn simulation(mut self, simulation: SimulationConfig) -> Self {
        self.config.simulation = simulation;
        self
    }

    pub fn build(self) -> DiceConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a sample configuration file.
pub fn generate_sample_config(path: &str) -> Result<(), ConfigError> {
    let config = DiceConfig::default();
    ConfigLoader::new().save(&config, path)
}
