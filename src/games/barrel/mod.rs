//! Barrel Clicker: smash barrels, collect skins, level up.

pub mod actions;
pub mod config;
pub mod error;
pub mod events;
pub mod logic;
pub mod render;
pub mod rng;
pub mod state;

mod simulator;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::games::Game;
use crate::input::{ClickState, InputEvent};

use config::GameConfig;
use events::GameEvent;
use logic::format_number;
use rng::{PcgRolls, RandomSource};
use state::BarrelState;

/// Ticks the barrel shakes after a hit (0.5s at 10 ticks/sec).
pub const HIT_PULSE_TICKS: u32 = 5;
/// Ticks a toast stays on screen.
pub const TOAST_TICKS: u32 = 30;
const MAX_LOG: usize = 50;

/// Keys that buy weapons, by catalog index.
pub const WEAPON_KEYS: [char; 6] = ['q', 'w', 'e', 'r', 't', 'y'];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tab {
    Barrels,
    Armory,
    Skins,
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// The latest notification, shown above the tabs for a few seconds.
#[derive(Clone, Debug)]
pub struct Toast {
    pub text: String,
    pub is_important: bool,
    pub ticks_left: u32,
}

/// A play session: the engine state, its random source, and UI-only state.
pub struct BarrelGame {
    pub state: BarrelState,
    rng: Box<dyn RandomSource>,
    pub tab: Tab,
    pub log: Vec<LogEntry>,
    pub toast: Option<Toast>,
    /// Ticks left on the shake pulse after a successful hit.
    pub hit_pulse: u32,
    pub anim_frame: u32,
}

impl BarrelGame {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, Box::new(PcgRolls::seeded(seed)))
    }

    pub fn with_rng(config: &GameConfig, rng: Box<dyn RandomSource>) -> Self {
        let mut game = Self {
            state: BarrelState::from_config(config),
            rng,
            tab: Tab::Barrels,
            log: Vec::new(),
            toast: None,
            hit_pulse: 0,
            anim_frame: 0,
        };
        game.add_log("Smash barrels, collect skins, level up!", true);
        game
    }

    pub fn hit(&mut self) {
        if logic::apply_click(&mut self.state, self.rng.as_mut()).is_ok() {
            self.hit_pulse = HIT_PULSE_TICKS;
        }
        self.flush_events();
    }

    /// Buy the weapon at catalog slot `index`.
    pub fn buy(&mut self, index: usize) {
        let Some(id) = self.state.weapons.get(index).map(|w| w.id.clone()) else {
            return;
        };
        let _ = logic::purchase_weapon(&mut self.state, &id);
        self.flush_events();
    }

    pub fn select(&mut self, index: usize) {
        let _ = logic::select_barrel(&mut self.state, index);
        self.flush_events();
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }

    /// Move engine notifications into the log and toast.
    fn flush_events(&mut self) {
        for event in self.state.drain_events() {
            let text = describe(&event);
            let is_important = event.is_important();
            self.add_log(&text, is_important);
            self.toast = Some(Toast {
                text,
                is_important,
                ticks_left: TOAST_TICKS,
            });
        }
    }

    fn dispatch_click(&mut self, action_id: u16) -> bool {
        use actions::*;
        match action_id {
            HIT_BARREL => self.hit(),
            TAB_BARRELS => self.tab = Tab::Barrels,
            TAB_ARMORY => self.tab = Tab::Armory,
            TAB_SKINS => self.tab = Tab::Skins,
            id if (SELECT_BARREL_BASE..SELECT_BARREL_BASE + RANGE).contains(&id) => {
                self.select((id - SELECT_BARREL_BASE) as usize)
            }
            id if (BUY_WEAPON_BASE..BUY_WEAPON_BASE + RANGE).contains(&id) => {
                self.buy((id - BUY_WEAPON_BASE) as usize)
            }
            _ => return false,
        }
        true
    }

    fn dispatch_key(&mut self, key: char) -> bool {
        match key {
            'c' | ' ' => self.hit(),
            'b' => self.tab = Tab::Barrels,
            'a' => self.tab = Tab::Armory,
            's' => self.tab = Tab::Skins,
            '1'..='9' => self.select(key as usize - '1' as usize),
            _ => match WEAPON_KEYS.iter().position(|&k| k == key) {
                Some(slot) => self.buy(slot),
                None => return false,
            },
        }
        true
    }
}

/// Player-facing wording for a notification.
pub fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::BarrelDestroyed {
            barrel,
            scrap,
            fuel,
            xp,
            ..
        } => format!(
            "{} smashed: +{} scrap, +{} fuel, +{} XP",
            barrel,
            format_number(*scrap),
            format_number(*fuel),
            format_number(*xp)
        ),
        GameEvent::SkinDropped(skin) => {
            format!("🎉 Skin drop: {} ({})", skin.name, skin.rarity.name())
        }
        GameEvent::LevelUp { level } => format!("🎊 Level {}!", level),
        GameEvent::WeaponPurchased { weapon, price } => {
            format!("Bought {} for {} scrap", weapon, format_number(*price))
        }
        GameEvent::BarrelSelected { barrel } => format!("Now smashing the {}", barrel),
        GameEvent::Rejected(err) => err.to_string(),
    }
}

impl Game for BarrelGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => self.dispatch_key(*c),
            InputEvent::Click(id) => self.dispatch_click(*id),
        }
    }

    fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }
        self.anim_frame = self.anim_frame.wrapping_add(delta_ticks);
        self.hit_pulse = self.hit_pulse.saturating_sub(delta_ticks);
        if let Some(toast) = &mut self.toast {
            toast.ticks_left = toast.ticks_left.saturating_sub(delta_ticks);
            if toast.ticks_left == 0 {
                self.toast = None;
            }
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }
}
