//! Barrel Clicker rendering.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::logic::format_number;
use super::state::{BarrelTier, Rarity};
use super::{BarrelGame, Tab, WEAPON_KEYS};

/// Barrel art, 5 lines × 10 chars. `#` is replaced by the fill glyph.
const BARREL_ART: &[&str] = &[
    " ╭──────╮ ",
    " │######│ ",
    " ├──────┤ ",
    " │######│ ",
    " ╰──────╯ ",
];

/// Fill glyphs from healthy to nearly destroyed.
const FILL_STAGES: &[char] = &['≡', '=', '-', '╳'];

pub fn render(game: &BarrelGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    // Log panel on the right when wide enough
    let (main_area, log_area) = if area.width >= 80 {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h_chunks[0], Some(h_chunks[1]))
    } else {
        (area, None)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // stats
            Constraint::Length(9), // barrel
            Constraint::Length(1), // toast
            Constraint::Length(3), // tabs
            Constraint::Min(4),    // tab content
        ])
        .split(main_area);

    render_stats(game, f, chunks[0]);
    render_barrel(game, f, chunks[1], click_state);
    render_toast(game, f, chunks[2]);
    render_tab_bar(game, f, chunks[3], click_state);
    match game.tab {
        Tab::Barrels => render_barrel_list(game, f, chunks[4], click_state),
        Tab::Armory => render_armory(game, f, chunks[4], click_state),
        Tab::Skins => render_skins(game, f, chunks[4]),
    }

    if let Some(log_area) = log_area {
        render_log(game, f, log_area);
    }
}

fn tier_color(tier: BarrelTier) -> Color {
    match tier {
        BarrelTier::Green => Color::Green,
        BarrelTier::Blue => Color::Blue,
        BarrelTier::Red => Color::Red,
        BarrelTier::Gold => Color::Yellow,
    }
}

fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::White,
        Rarity::Rare => Color::Blue,
        Rarity::Epic => Color::Magenta,
        Rarity::Legendary => Color::Yellow,
    }
}

/// `width`-cell progress bar for a 0.0..=1.0 ratio.
fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    "█".repeat(filled) + &"░".repeat(width - filled)
}

fn borders_for(width: u16) -> Borders {
    if is_narrow_layout(width) {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    }
}

fn render_stats(game: &BarrelGame, f: &mut Frame, area: Rect) {
    let stats = &game.state.stats;
    let bar_width = (area.width.saturating_sub(30) as usize).clamp(6, 24);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" Lv {} ", stats.level),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" XP "),
            Span::styled(
                progress_bar(game.state.xp_progress(), bar_width),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(format!(
                " {}/{}",
                format_number(stats.xp),
                format_number(stats.xp_to_next)
            )),
        ]),
        Line::from(vec![
            Span::styled(
                format!(" ⚙ {} scrap", format_number(stats.scrap)),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ⛽ {} fuel", format_number(stats.fuel)),
                Style::default().fg(Color::LightRed),
            ),
            Span::styled(
                format!("  ✖ {} smashed", format_number(stats.barrels_destroyed)),
                Style::default().fg(Color::Gray),
            ),
        ]),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(borders_for(area.width))
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Barrel Clicker "),
    );
    f.render_widget(widget, area);
}

fn render_barrel(
    game: &BarrelGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let barrel = game.state.active_barrel();
    let weapon = game.state.equipped_weapon();
    let color = tier_color(barrel.tier);
    let hp_ratio = barrel.hp_ratio();

    let stage = ((1.0 - hp_ratio) * FILL_STAGES.len() as f64) as usize;
    let fill = FILL_STAGES[stage.min(FILL_STAGES.len() - 1)];
    let shaking = game.hit_pulse > 0;
    let shift = if shaking && game.hit_pulse % 2 == 1 { " " } else { "" };
    let art_style = if shaking {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };

    let mut lines: Vec<Line> = BARREL_ART
        .iter()
        .map(|row| {
            let row = row.replace('#', &fill.to_string());
            Line::from(Span::styled(format!("{}{}", shift, row), art_style))
        })
        .collect();

    let bar_width = (area.width.saturating_sub(24) as usize).clamp(6, 30);
    lines.push(Line::from(vec![
        Span::raw(" HP "),
        Span::styled(progress_bar(hp_ratio, bar_width), Style::default().fg(color)),
        Span::raw(format!(
            " {}/{}",
            format_number(barrel.hp),
            format_number(barrel.max_hp)
        )),
    ]));

    let weapon_style = if weapon.is_broken() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    // Blink the hint until the first barrel is smashed
    let hint_color = if game.state.stats.barrels_destroyed == 0 && (game.anim_frame / 5) % 2 == 0 {
        Color::White
    } else {
        Color::DarkGray
    };
    let durability = if weapon.durability.is_unbounded() {
        "∞".to_string()
    } else {
        format!("{}/{}", weapon.durability, weapon.max_durability)
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!(" {} ({} dmg, {})", weapon.name, weapon.damage, durability),
            weapon_style,
        ),
        Span::styled("  tap or C to smash", Style::default().fg(hint_color)),
    ]));

    let border_color = if shaking { Color::White } else { color };
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(borders_for(area.width))
            .border_style(Style::default().fg(border_color))
            .title(format!(" {} · tier {} ", barrel.name, barrel.tier.number())),
    );
    f.render_widget(widget, area);

    click_state
        .borrow_mut()
        .add_click_target(area, HIT_BARREL);
}

fn render_toast(game: &BarrelGame, f: &mut Frame, area: Rect) {
    let Some(toast) = &game.toast else {
        return;
    };
    let style = if toast.is_important {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {}", toast.text), style))),
        area,
    );
}

fn render_tab_bar(
    game: &BarrelGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let tab_style = |tab: Tab, color: Color| -> Style {
        if game.tab == tab {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        }
    };

    let skins_label = format!("Skins ({})", game.state.inventory.len());
    let mut cs = click_state.borrow_mut();
    TabBar::new(" │ ")
        .tab("Barrels", tab_style(Tab::Barrels, Color::Green), TAB_BARRELS)
        .tab("Armory", tab_style(Tab::Armory, Color::Cyan), TAB_ARMORY)
        .tab(skins_label, tab_style(Tab::Skins, Color::Magenta), TAB_SKINS)
        .block(
            Block::default()
                .borders(borders_for(area.width))
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(f, area, &mut cs);
}

fn render_barrel_list(
    game: &BarrelGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let state = &game.state;
    let mut cl = ClickableList::new();

    for (i, barrel) in state.barrels.iter().enumerate() {
        let unlocked = state.is_unlocked(i);
        let active = i == state.active_index;
        let marker = if active { "▶" } else { " " };

        let key_style = if unlocked {
            Style::default()
                .fg(tier_color(barrel.tier))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text_style = if active {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else if unlocked {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let detail = if unlocked {
            let mut reward = format!("+{} scrap", format_number(barrel.scrap_reward));
            if barrel.fuel_reward > 0 {
                reward.push_str(&format!(" +{} fuel", format_number(barrel.fuel_reward)));
            }
            format!(
                "{} HP  {}  {}% skin",
                format_number(barrel.max_hp),
                reward,
                barrel.skin_chance
            )
        } else {
            format!("🔒 level {}", barrel.unlock_level)
        };

        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!("{}[{}] ", marker, i + 1), key_style),
                Span::styled(format!("{:<13}", barrel.name), text_style),
                Span::styled(detail, text_style),
            ]),
            SELECT_BARREL_BASE + i as u16,
        );
    }

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1);

    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Barrels "),
    );
    f.render_widget(widget, area);
}

fn render_armory(
    game: &BarrelGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let state = &game.state;
    let mut cl = ClickableList::new();

    for (i, weapon) in state.weapons.iter().enumerate() {
        let Some(key) = WEAPON_KEYS.get(i) else {
            break;
        };
        let equipped = i == state.equipped_index;
        let affordable = state.stats.scrap >= weapon.price;

        let key_style = if affordable {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text_style = if affordable {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let durability_span = if weapon.durability.is_unbounded() {
            Span::styled("∞        ", Style::default().fg(Color::Cyan))
        } else {
            let ratio = weapon.durability.ratio(weapon.max_durability);
            let color = if weapon.is_broken() {
                Color::Red
            } else if ratio < 0.25 {
                Color::LightRed
            } else {
                Color::Cyan
            };
            Span::styled(
                format!("{:<9}", format!("{}/{}", weapon.durability, weapon.max_durability)),
                Style::default().fg(color),
            )
        };

        let price = if weapon.price == 0 {
            "free".to_string()
        } else {
            format!("{} scrap", format_number(weapon.price))
        };

        let mut spans = vec![
            Span::styled(format!("[{}] ", key.to_ascii_uppercase()), key_style),
            Span::styled(format!("{:<8} {:>4} dmg  ", weapon.name, weapon.damage), text_style),
            durability_span,
            Span::styled(format!(" {}", price), text_style),
        ];
        if equipped {
            spans.push(Span::styled(
                " ◀ equipped",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ));
        }
        if weapon.is_broken() {
            spans.push(Span::styled(
                " BROKEN",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }

        cl.push_clickable(Line::from(spans), BUY_WEAPON_BASE + i as u16);
    }

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1);

    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Armory: buying repairs and equips "),
    );
    f.render_widget(widget, area);
}

fn render_skins(game: &BarrelGame, f: &mut Frame, area: Rect) {
    let state = &game.state;

    let mut summary: Vec<Span> = vec![Span::raw(" ")];
    for &rarity in Rarity::all() {
        summary.push(Span::styled(
            format!("{} {}  ", rarity.name(), state.rarity_count(rarity)),
            Style::default().fg(rarity_color(rarity)),
        ));
    }

    let mut lines = vec![Line::from(summary)];
    let visible = area.height.saturating_sub(3) as usize;
    if state.inventory.is_empty() {
        lines.push(Line::from(Span::styled(
            " No skins yet. Keep smashing!",
            Style::default().fg(Color::DarkGray),
        )));
    }
    // Newest first
    for skin in state.inventory.iter().rev().take(visible) {
        lines.push(Line::from(vec![
            Span::styled(" ✦ ", Style::default().fg(rarity_color(skin.rarity))),
            Span::styled(skin.name.clone(), Style::default().fg(Color::White)),
            Span::styled(
                format!(" ({})", skin.rarity.name()),
                Style::default().fg(rarity_color(skin.rarity)),
            ),
        ]));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Skins "),
    );
    f.render_widget(widget, area);
}

fn render_log(game: &BarrelGame, f: &mut Frame, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;

    // Newest entries first
    let log_lines: Vec<Line> = game
        .log
        .iter()
        .rev()
        .take(visible_height)
        .enumerate()
        .map(|(i, entry)| {
            let style = match (entry.is_important, i < 3) {
                (true, true) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                (true, false) => Style::default().fg(Color::Yellow),
                (false, true) => Style::default().fg(Color::White),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(log_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Log "),
    );
    f.render_widget(widget, area);
}
