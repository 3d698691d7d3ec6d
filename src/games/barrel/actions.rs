//! Semantic action IDs for Barrel Clicker click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Core actions ────────────────────────────────────────────────
pub const HIT_BARREL: u16 = 0;

// ── Tab navigation ──────────────────────────────────────────────
pub const TAB_BARRELS: u16 = 10;
pub const TAB_ARMORY: u16 = 11;
pub const TAB_SKINS: u16 = 12;

// ── Barrel selection (base + catalog index) ─────────────────────
pub const SELECT_BARREL_BASE: u16 = 100;

// ── Weapon purchase (base + catalog index) ──────────────────────
pub const BUY_WEAPON_BASE: u16 = 200;

/// Width of each indexed action range.
pub const RANGE: u16 = 100;
