//! Barrel Clicker game state definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::{BarrelSpec, GameConfig, Rules, WeaponSpec};
use super::events::GameEvent;

/// Undrained notifications kept before the oldest is dropped.
const MAX_PENDING_EVENTS: usize = 64;

/// Barrel tiers, weakest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarrelTier {
    Green,
    Blue,
    Red,
    Gold,
}

impl BarrelTier {
    /// Tier number, 1 for Green up to 4 for Gold.
    pub fn number(&self) -> u8 {
        match self {
            BarrelTier::Green => 1,
            BarrelTier::Blue => 2,
            BarrelTier::Red => 3,
            BarrelTier::Gold => 4,
        }
    }

    /// Rarity of skins dropped by this tier.
    pub fn skin_rarity(&self) -> Rarity {
        match self {
            BarrelTier::Green => Rarity::Common,
            BarrelTier::Blue => Rarity::Rare,
            BarrelTier::Red => Rarity::Epic,
            BarrelTier::Gold => Rarity::Legendary,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// All rarities in ascending order.
    pub fn all() -> &'static [Rarity] {
        &[Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary]
    }

    pub fn name(&self) -> &str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// Remaining uses of a weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Durability {
    Unbounded,
    Finite(u32),
}

impl Durability {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Durability::Unbounded)
    }

    /// A finite weapon at zero uses cannot hit anything.
    pub fn is_depleted(&self) -> bool {
        matches!(self, Durability::Finite(0))
    }

    /// Durability after one more hit.
    pub fn worn(self) -> Self {
        match self {
            Durability::Unbounded => Durability::Unbounded,
            Durability::Finite(n) => Durability::Finite(n.saturating_sub(1)),
        }
    }

    /// Fraction of `max` remaining, 1.0 for unbounded weapons.
    pub fn ratio(&self, max: Durability) -> f64 {
        match (self, max) {
            (Durability::Finite(cur), Durability::Finite(max)) if max > 0 => {
                *cur as f64 / max as f64
            }
            (Durability::Finite(_), _) => 0.0,
            (Durability::Unbounded, _) => 1.0,
        }
    }
}

impl fmt::Display for Durability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Durability::Unbounded => write!(f, "∞"),
            Durability::Finite(n) => write!(f, "{}", n),
        }
    }
}

/// Player progression and wallet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub level: u32,
    pub xp: u64,
    /// XP needed for the next level.
    pub xp_to_next: u64,
    /// Primary currency, spent on weapons.
    pub scrap: u64,
    pub fuel: u64,
    pub barrels_destroyed: u64,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            xp_to_next: 100,
            scrap: 100,
            fuel: 10,
            barrels_destroyed: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    pub id: String,
    pub name: String,
    /// Damage dealt per click.
    pub damage: u64,
    pub durability: Durability,
    pub max_durability: Durability,
    /// Cost in scrap.
    pub price: u64,
}

impl Weapon {
    /// A freshly bought weapon at full durability.
    pub fn from_spec(spec: &WeaponSpec) -> Self {
        Self {
            id: spec.id.clone(),
            name: spec.name.clone(),
            damage: spec.damage,
            durability: spec.max_durability,
            max_durability: spec.max_durability,
            price: spec.price,
        }
    }

    pub fn is_broken(&self) -> bool {
        self.durability.is_depleted()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Barrel {
    pub tier: BarrelTier,
    pub name: String,
    pub max_hp: u64,
    /// Current health, always within `0..=max_hp`.
    pub hp: u64,
    pub scrap_reward: u64,
    pub fuel_reward: u64,
    /// Percent chance (0-100) of a skin drop per destruction.
    pub skin_chance: f64,
    /// Minimum player level required to select this barrel.
    pub unlock_level: u32,
}

impl Barrel {
    /// A barrel at full health.
    pub fn from_spec(spec: &BarrelSpec) -> Self {
        Self {
            tier: spec.tier,
            name: spec.name.clone(),
            max_hp: spec.max_hp,
            hp: spec.max_hp,
            scrap_reward: spec.scrap_reward,
            fuel_reward: spec.fuel_reward,
            skin_chance: spec.skin_chance,
            unlock_level: spec.unlock_level,
        }
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f64 / self.max_hp as f64
        }
    }
}

/// A collected cosmetic. Never removed once in the inventory.
#[derive(Clone, Debug, PartialEq)]
pub struct Skin {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    /// Name of the barrel it dropped from.
    pub from: String,
}

/// Full state of a Barrel Clicker session.
///
/// Mutated only through the commands in [`super::logic`]; everything else
/// reads it.
pub struct BarrelState {
    pub stats: PlayerStats,
    /// Barrel catalog, the source of truth for each barrel's health.
    pub barrels: Vec<Barrel>,
    pub active_index: usize,
    /// Weapon catalog, the source of truth for each weapon's durability.
    pub weapons: Vec<Weapon>,
    /// Catalog index of the equipped weapon.
    pub equipped_index: usize,
    pub inventory: Vec<Skin>,
    pub rules: Rules,
    /// Serial for the next skin id.
    pub skin_serial: u64,
    /// Pending notifications for the presentation layer.
    pub events: Vec<GameEvent>,
}

impl BarrelState {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    /// Build a fresh session from a validated config.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            stats: config.starting_stats.clone(),
            barrels: config.barrels.iter().map(Barrel::from_spec).collect(),
            active_index: 0,
            weapons: config.weapons.iter().map(Weapon::from_spec).collect(),
            equipped_index: config.starter_index().unwrap_or(0),
            inventory: Vec::new(),
            rules: config.rules.clone(),
            skin_serial: 0,
            events: Vec::new(),
        }
    }

    pub fn active_barrel(&self) -> &Barrel {
        &self.barrels[self.active_index]
    }

    pub fn equipped_weapon(&self) -> &Weapon {
        &self.weapons[self.equipped_index]
    }

    pub fn weapon(&self, id: &str) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.id == id)
    }

    /// Whether the player's level allows selecting barrel `index`.
    pub fn is_unlocked(&self, index: usize) -> bool {
        self.barrels
            .get(index)
            .is_some_and(|b| self.stats.level >= b.unlock_level)
    }

    pub fn rarity_count(&self, rarity: Rarity) -> usize {
        self.inventory.iter().filter(|s| s.rarity == rarity).count()
    }

    /// Progress toward the next level in `0.0..=1.0`.
    pub fn xp_progress(&self) -> f64 {
        if self.stats.xp_to_next == 0 {
            return 0.0;
        }
        (self.stats.xp as f64 / self.stats.xp_to_next as f64).min(1.0)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
        if self.events.len() > MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
    }

    /// Take all pending notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state() {
        let s = BarrelState::new();
        assert_eq!(s.stats, PlayerStats::default());
        assert_eq!(s.stats.scrap, 100);
        assert_eq!(s.stats.fuel, 10);
        assert_eq!(s.barrels.len(), 4);
        assert_eq!(s.weapons.len(), 4);
        assert_eq!(s.active_index, 0);
        assert_eq!(s.equipped_weapon().id, "fist");
        assert!(s.inventory.is_empty());
        assert!(s.barrels.iter().all(|b| b.hp == b.max_hp));
    }

    #[test]
    fn tier_maps_to_rarity() {
        assert_eq!(BarrelTier::Green.skin_rarity(), Rarity::Common);
        assert_eq!(BarrelTier::Blue.skin_rarity(), Rarity::Rare);
        assert_eq!(BarrelTier::Red.skin_rarity(), Rarity::Epic);
        assert_eq!(BarrelTier::Gold.skin_rarity(), Rarity::Legendary);
        assert_eq!(BarrelTier::Gold.number(), 4);
    }

    #[test]
    fn durability_wear() {
        assert_eq!(Durability::Finite(2).worn(), Durability::Finite(1));
        assert_eq!(Durability::Finite(0).worn(), Durability::Finite(0));
        assert_eq!(Durability::Unbounded.worn(), Durability::Unbounded);
        assert!(Durability::Finite(0).is_depleted());
        assert!(!Durability::Unbounded.is_depleted());
    }

    #[test]
    fn durability_ratio() {
        let max = Durability::Finite(200);
        assert!((Durability::Finite(50).ratio(max) - 0.25).abs() < 1e-9);
        assert!((Durability::Unbounded.ratio(Durability::Unbounded) - 1.0).abs() < 1e-9);
        assert_eq!(Durability::Finite(3).to_string(), "3");
        assert_eq!(Durability::Unbounded.to_string(), "∞");
    }

    #[test]
    fn unlock_follows_level() {
        let mut s = BarrelState::new();
        assert!(s.is_unlocked(0));
        assert!(!s.is_unlocked(1));
        s.stats.level = 5;
        assert!(s.is_unlocked(1));
        assert!(!s.is_unlocked(2));
        assert!(!s.is_unlocked(99));
    }

    #[test]
    fn xp_progress_fraction() {
        let mut s = BarrelState::new();
        s.stats.xp = 25;
        assert!((s.xp_progress() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn weapon_lookup_by_id() {
        let s = BarrelState::new();
        assert_eq!(s.weapon("drill").map(|w| w.damage), Some(100));
        assert!(s.weapon("chainsaw").is_none());
    }

    #[test]
    fn event_queue_is_capped() {
        let mut s = BarrelState::new();
        for level in 0..100 {
            s.push_event(GameEvent::LevelUp { level });
        }
        assert_eq!(s.events.len(), MAX_PENDING_EVENTS);
        let drained = s.drain_events();
        assert_eq!(drained.last(), Some(&GameEvent::LevelUp { level: 99 }));
        assert!(s.events.is_empty());
    }
}
