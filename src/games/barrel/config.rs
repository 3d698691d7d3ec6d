//! Balance configuration: catalogs, starting stats and progression rules.
//!
//! The shipped balance lives in `assets/balance.json` and is embedded at
//! build time. `GameConfig::default()` mirrors it so a bad file never leaves
//! the player without a game.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::state::{BarrelTier, Durability, PlayerStats};

const BUNDLED_BALANCE: &str = include_str!("../../../assets/balance.json");

/// How a level-up treats XP beyond the threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelUpPolicy {
    /// One level per XP grant; XP resets to zero and overshoot is lost.
    #[default]
    SingleStep,
    /// Keep leveling while XP covers the threshold, carrying the remainder.
    CarryOver,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Destroying a barrel grants `max_hp / xp_divisor` XP.
    pub xp_divisor: u64,
    /// Threshold multiplier applied on every level-up (floored).
    pub xp_growth: f64,
    #[serde(default)]
    pub level_up: LevelUpPolicy,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            xp_divisor: 100,
            xp_growth: 1.5,
            level_up: LevelUpPolicy::SingleStep,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarrelSpec {
    pub tier: BarrelTier,
    pub name: String,
    pub max_hp: u64,
    pub scrap_reward: u64,
    pub fuel_reward: u64,
    pub skin_chance: f64,
    pub unlock_level: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub id: String,
    pub name: String,
    pub damage: u64,
    pub max_durability: Durability,
    pub price: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed balance file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("barrel catalog is empty")]
    NoBarrels,

    #[error("weapon catalog has no unbounded starter weapon")]
    NoStarterWeapon,

    #[error("duplicate weapon id {0:?}")]
    DuplicateWeapon(String),

    #[error("barrel {name:?}: {reason}")]
    InvalidBarrel { name: String, reason: &'static str },

    #[error("weapon {id:?}: {reason}")]
    InvalidWeapon { id: String, reason: &'static str },

    #[error("invalid rules: {0}")]
    InvalidRules(&'static str),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub starting_stats: PlayerStats,
    pub barrels: Vec<BarrelSpec>,
    pub weapons: Vec<WeaponSpec>,
    #[serde(default)]
    pub rules: Rules,
}

impl Default for GameConfig {
    fn default() -> Self {
        let barrel = |tier, name: &str, max_hp, scrap_reward, fuel_reward, skin_chance, unlock_level| {
            BarrelSpec {
                tier,
                name: name.into(),
                max_hp,
                scrap_reward,
                fuel_reward,
                skin_chance,
                unlock_level,
            }
        };
        let weapon = |id: &str, name: &str, damage, max_durability, price| WeaponSpec {
            id: id.into(),
            name: name.into(),
            damage,
            max_durability,
            price,
        };

        Self {
            starting_stats: PlayerStats::default(),
            barrels: vec![
                barrel(BarrelTier::Green, "Green Barrel", 1_000, 10, 0, 5.0, 1),
                barrel(BarrelTier::Blue, "Blue Barrel", 5_000, 50, 0, 10.0, 5),
                barrel(BarrelTier::Red, "Red Barrel", 10_000, 0, 5, 15.0, 10),
                barrel(BarrelTier::Gold, "Gold Barrel", 50_000, 500, 20, 30.0, 20),
            ],
            weapons: vec![
                weapon("fist", "Fist", 1, Durability::Unbounded, 0),
                weapon("axe", "Axe", 10, Durability::Finite(100), 50),
                weapon("pickaxe", "Pickaxe", 25, Durability::Finite(150), 200),
                weapon("drill", "Drill", 100, Durability::Finite(200), 800),
            ],
            rules: Rules::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON balance file.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The embedded balance file, or the built-in catalog if it is unusable.
    pub fn bundled() -> Self {
        match Self::from_json(BUNDLED_BALANCE) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Falling back to built-in balance: {}", e);
                Self::default()
            }
        }
    }

    /// Index of the starter weapon: the first one that never breaks.
    pub fn starter_index(&self) -> Option<usize> {
        self.weapons
            .iter()
            .position(|w| w.max_durability.is_unbounded())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let first = self.barrels.first().ok_or(ConfigError::NoBarrels)?;
        if first.unlock_level > self.starting_stats.level {
            return Err(ConfigError::InvalidBarrel {
                name: first.name.clone(),
                reason: "first barrel must be unlocked at the starting level",
            });
        }
        for b in &self.barrels {
            let bad = |reason| ConfigError::InvalidBarrel {
                name: b.name.clone(),
                reason,
            };
            if b.max_hp == 0 {
                return Err(bad("max_hp must be positive"));
            }
            if !(0.0..=100.0).contains(&b.skin_chance) {
                return Err(bad("skin_chance must be within 0-100"));
            }
        }

        let mut seen = HashSet::new();
        for w in &self.weapons {
            if !seen.insert(w.id.as_str()) {
                return Err(ConfigError::DuplicateWeapon(w.id.clone()));
            }
            if w.damage == 0 {
                return Err(ConfigError::InvalidWeapon {
                    id: w.id.clone(),
                    reason: "damage must be positive",
                });
            }
        }
        if self.starter_index().is_none() {
            return Err(ConfigError::NoStarterWeapon);
        }

        if self.rules.xp_divisor == 0 {
            return Err(ConfigError::InvalidRules("xp_divisor must be positive"));
        }
        if self.rules.xp_growth.is_nan() || self.rules.xp_growth < 1.0 {
            return Err(ConfigError::InvalidRules("xp_growth must be at least 1.0"));
        }
        if self.starting_stats.xp_to_next == 0 || self.starting_stats.level == 0 {
            return Err(ConfigError::InvalidRules(
                "starting level and xp_to_next must be positive",
            ));
        }
        Ok(())
    }
}
