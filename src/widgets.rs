//! Clickable UI components: each one renders and registers its own click
//! targets, so row math never drifts from what is on screen.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// One row of tab labels.
///
/// Each tab's target spans its label and the separator after it; the last
/// tab runs to the right edge, so the whole row is tappable.
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        let sep_width = Line::from(self.separator).width() as u16;

        let mut spans: Vec<Span> = Vec::new();
        let mut starts: Vec<(u16, u16)> = Vec::new(); // (column offset, action)
        let mut cursor: u16 = 0;
        for (i, (label, style, action_id)) in self.tabs.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, Style::default().fg(Color::DarkGray)));
                cursor += sep_width;
            }
            let padded = format!(" {} ", label);
            starts.push((cursor, action_id));
            cursor += Line::from(padded.as_str()).width() as u16;
            spans.push(Span::styled(padded, style));
        }

        let paragraph = match self.block {
            Some(block) => Paragraph::new(Line::from(spans)).block(block),
            None => Paragraph::new(Line::from(spans)),
        };
        f.render_widget(paragraph, area);

        register_tab_spans(&starts, inner, cs);
    }
}

/// Turn tab start offsets into click targets covering `inner`'s full row.
fn register_tab_spans(starts: &[(u16, u16)], inner: Rect, cs: &mut ClickState) {
    for (i, &(start, action_id)) in starts.iter().enumerate() {
        if start >= inner.width {
            break;
        }
        let end = match starts.get(i + 1) {
            Some(&(next, _)) => next.min(inner.width),
            None => inner.width,
        };
        if end > start {
            cs.add_click_target(
                Rect::new(inner.x + start, inner.y, end - start, inner.height.max(1)),
                action_id,
            );
        }
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with optional click actions.
///
/// Targets follow their lines: inserting a header above a clickable row moves
/// its target down with it.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register one full-width row target per clickable line.
    ///
    /// `top_offset`/`bottom_offset` are the rows taken by borders. Lines are
    /// assumed not to wrap.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
    ) {
        let first_row = area.y + top_offset;
        let end_row = area.y + area.height.saturating_sub(bottom_offset);
        for &(line_idx, action_id) in &self.actions {
            let row = first_row + line_idx;
            if row >= end_row {
                break;
            }
            cs.add_row_target(area, row, action_id);
        }
    }
}
