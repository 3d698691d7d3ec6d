//! Barrel Clicker game logic: pure functions over `BarrelState`.
//!
//! These are the only functions that mutate the state. Each one checks its
//! guard before touching anything, so a refused command changes nothing but
//! the notification queue.

use log::{debug, info, warn};

use super::config::LevelUpPolicy;
use super::error::GameError;
use super::events::GameEvent;
use super::rng::RandomSource;
use super::state::{Barrel, BarrelState, Skin};

/// Result of a successful click.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickOutcome {
    pub damage: u64,
    /// Barrel health right after the hit (0 when it was destroyed).
    pub hp_after: u64,
    pub destruction: Option<DestructionReport>,
}

/// What a destroyed barrel paid out.
#[derive(Clone, Debug, PartialEq)]
pub struct DestructionReport {
    pub barrel: String,
    pub scrap: u64,
    pub fuel: u64,
    pub xp: u64,
    pub skin: Option<Skin>,
    /// Level reached if the XP grant caused a level-up.
    pub new_level: Option<u32>,
}

/// Report a refused command and hand the error back to the caller.
fn reject(state: &mut BarrelState, err: GameError) -> GameError {
    warn!("{}", err);
    state.push_event(GameEvent::Rejected(err.clone()));
    err
}

/// Hit the active barrel with the equipped weapon.
pub fn apply_click(
    state: &mut BarrelState,
    rng: &mut dyn RandomSource,
) -> Result<ClickOutcome, GameError> {
    let weapon = state.equipped_weapon();
    if weapon.is_broken() {
        let err = GameError::WeaponBroken {
            weapon: weapon.name.clone(),
        };
        return Err(reject(state, err));
    }
    let damage = weapon.damage;

    let index = state.active_index;
    let barrel = &mut state.barrels[index];
    barrel.hp = barrel.hp.saturating_sub(damage);
    let hp_after = barrel.hp;

    let weapon = &mut state.weapons[state.equipped_index];
    weapon.durability = weapon.durability.worn();
    debug!(
        "hit {} for {} (hp {}, {} durability {})",
        state.barrels[index].name, damage, hp_after, weapon.name, weapon.durability
    );

    let destruction = if hp_after == 0 {
        Some(resolve_barrel_destruction(state, index, rng))
    } else {
        None
    };

    Ok(ClickOutcome {
        damage,
        hp_after,
        destruction,
    })
}

/// Pay out a barrel that just hit zero, roll for a skin, and reset it.
fn resolve_barrel_destruction(
    state: &mut BarrelState,
    index: usize,
    rng: &mut dyn RandomSource,
) -> DestructionReport {
    let barrel = state.barrels[index].clone();
    let xp = barrel.max_hp / state.rules.xp_divisor.max(1);

    state.stats.scrap = state.stats.scrap.saturating_add(barrel.scrap_reward);
    state.stats.fuel = state.stats.fuel.saturating_add(barrel.fuel_reward);
    state.stats.xp = state.stats.xp.saturating_add(xp);
    state.stats.barrels_destroyed += 1;

    let roll = rng.roll_percent();
    let skin = if roll < barrel.skin_chance {
        Some(drop_skin(state, &barrel))
    } else {
        None
    };

    state.barrels[index].hp = barrel.max_hp;

    info!(
        "{} destroyed: +{} scrap, +{} fuel, +{} XP (skin roll {:.2} vs {}%)",
        barrel.name, barrel.scrap_reward, barrel.fuel_reward, xp, roll, barrel.skin_chance
    );
    state.push_event(GameEvent::BarrelDestroyed {
        barrel: barrel.name.clone(),
        tier: barrel.tier,
        scrap: barrel.scrap_reward,
        fuel: barrel.fuel_reward,
        xp,
    });
    if let Some(skin) = &skin {
        state.push_event(GameEvent::SkinDropped(skin.clone()));
    }

    let new_level = check_level_up(state);

    DestructionReport {
        barrel: barrel.name,
        scrap: barrel.scrap_reward,
        fuel: barrel.fuel_reward,
        xp,
        skin,
        new_level,
    }
}

/// Create the skin for a successful drop roll and add it to the inventory.
fn drop_skin(state: &mut BarrelState, barrel: &Barrel) -> Skin {
    state.skin_serial += 1;
    let skin = Skin {
        id: format!("skin-{}", state.skin_serial),
        name: format!("{} Skin #{}", barrel.name, state.inventory.len() + 1),
        rarity: barrel.tier.skin_rarity(),
        from: barrel.name.clone(),
    };
    info!("skin dropped: {} ({})", skin.name, skin.rarity.name());
    state.inventory.push(skin.clone());
    skin
}

/// Apply any level-up the current XP earns. Returns the new level, if any.
///
/// Under `SingleStep` a single XP grant yields at most one level: XP resets
/// to zero and anything past the threshold is discarded.
pub fn check_level_up(state: &mut BarrelState) -> Option<u32> {
    let before = state.stats.level;
    match state.rules.level_up {
        LevelUpPolicy::SingleStep => {
            if state.stats.xp >= state.stats.xp_to_next {
                state.stats.xp = 0;
                advance_level(state);
            }
        }
        LevelUpPolicy::CarryOver => {
            while state.stats.xp >= state.stats.xp_to_next {
                state.stats.xp -= state.stats.xp_to_next;
                advance_level(state);
            }
        }
    }
    (state.stats.level > before).then_some(state.stats.level)
}

fn advance_level(state: &mut BarrelState) {
    state.stats.level += 1;
    state.stats.xp_to_next = next_threshold(state.stats.xp_to_next, state.rules.xp_growth);
    info!(
        "level up: {} (next at {} XP)",
        state.stats.level, state.stats.xp_to_next
    );
    let level = state.stats.level;
    state.push_event(GameEvent::LevelUp { level });
}

/// Next XP threshold: `floor(current * growth)`, never below 1.
fn next_threshold(current: u64, growth: f64) -> u64 {
    ((current as f64 * growth).floor() as u64).max(1)
}

/// Buy (or re-buy) a weapon: pay its price, restore it to full, equip it.
pub fn purchase_weapon(state: &mut BarrelState, weapon_id: &str) -> Result<(), GameError> {
    let Some(index) = state.weapons.iter().position(|w| w.id == weapon_id) else {
        return Err(reject(state, GameError::UnknownWeapon(weapon_id.to_string())));
    };
    let weapon = &state.weapons[index];
    if state.stats.scrap < weapon.price {
        let err = GameError::InsufficientFunds {
            weapon: weapon.name.clone(),
            price: weapon.price,
            available: state.stats.scrap,
        };
        return Err(reject(state, err));
    }

    let price = weapon.price;
    state.stats.scrap -= price;
    let weapon = &mut state.weapons[index];
    weapon.durability = weapon.max_durability;
    state.equipped_index = index;

    let name = weapon.name.clone();
    info!("bought {} for {} scrap", name, price);
    state.push_event(GameEvent::WeaponPurchased {
        weapon: name,
        price,
    });
    Ok(())
}

/// Make barrel `index` the click target.
pub fn select_barrel(state: &mut BarrelState, index: usize) -> Result<(), GameError> {
    let Some(barrel) = state.barrels.get(index) else {
        return Err(reject(state, GameError::UnknownBarrel(index)));
    };
    if state.stats.level < barrel.unlock_level {
        let err = GameError::LevelTooLow {
            barrel: barrel.name.clone(),
            required: barrel.unlock_level,
            current: state.stats.level,
        };
        return Err(reject(state, err));
    }

    let name = barrel.name.clone();
    state.active_index = index;
    debug!("selected {}", name);
    state.push_event(GameEvent::BarrelSelected { barrel: name });
    Ok(())
}

/// Format an amount with thousands separators (e.g. 50000 → "50,000").
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
