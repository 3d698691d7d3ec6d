//! Notifications emitted by the engine for the presentation layer.
//!
//! Payloads carry the values a renderer needs (amounts, names, rarity);
//! wording is left to the renderer.

use super::error::GameError;
use super::state::{BarrelTier, Skin};

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A barrel hit zero and paid out.
    BarrelDestroyed {
        barrel: String,
        tier: BarrelTier,
        scrap: u64,
        fuel: u64,
        xp: u64,
    },
    SkinDropped(Skin),
    LevelUp { level: u32 },
    WeaponPurchased { weapon: String, price: u64 },
    BarrelSelected { barrel: String },
    /// A command was refused; state is unchanged.
    Rejected(GameError),
}

impl GameEvent {
    /// Whether the renderer should highlight this notification.
    pub fn is_important(&self) -> bool {
        matches!(
            self,
            GameEvent::SkinDropped(_) | GameEvent::LevelUp { .. } | GameEvent::Rejected(_)
        )
    }
}
