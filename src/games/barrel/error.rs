//! Recoverable command failures.
//!
//! Every variant leaves the game state untouched; the session reports it to
//! the player and carries on.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("{weapon} is broken! Buy a new one or switch back to your fist")]
    WeaponBroken { weapon: String },

    #[error("Not enough scrap for {weapon}: costs {price}, you have {available}")]
    InsufficientFunds {
        weapon: String,
        price: u64,
        available: u64,
    },

    #[error("{barrel} unlocks at level {required} (you are level {current})")]
    LevelTooLow {
        barrel: String,
        required: u32,
        current: u32,
    },

    #[error("No weapon with id {0:?}")]
    UnknownWeapon(String),

    #[error("No barrel in slot {0}")]
    UnknownBarrel(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_payload_values() {
        let err = GameError::InsufficientFunds {
            weapon: "Drill".into(),
            price: 800,
            available: 120,
        };
        let msg = err.to_string();
        assert!(msg.contains("Drill"));
        assert!(msg.contains("800"));
        assert!(msg.contains("120"));

        let err = GameError::LevelTooLow {
            barrel: "Gold Barrel".into(),
            required: 20,
            current: 3,
        };
        assert_eq!(
            err.to_string(),
            "Gold Barrel unlocks at level 20 (you are level 3)"
        );
    }
}
