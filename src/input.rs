//! Input plumbing shared by the browser loop and the game: event types,
//! click target registration, and pixel → cell conversion.

use ratzilla::ratatui::layout::Rect;

/// Keyboard and pointer input, normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(char),
    /// A tap on a registered target, carrying its semantic action ID.
    Click(u16),
}

/// A tappable screen region in terminal cell coordinates.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Click targets registered by the last render, plus the terminal size the
/// pointer handler needs to map pixels to cells.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    /// Forget every target. Called at the start of each frame.
    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register the full width of `area` at `row`; rows outside `area` are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Action under the cell `(col, row)`. Later targets sit on top.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets
            .iter()
            .rev()
            .find(|t| {
                let r = t.rect;
                col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
            })
            .map(|t| t.action_id)
    }
}

/// Narrow screens stack panels vertically and hide the log.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Row under a pixel offset from the top of the grid, if inside it.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// Column under a pixel offset from the left of the grid, if inside it.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}

fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_finds_row_target() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 4, 40, 1), 100);
        cs.add_click_target(Rect::new(0, 5, 40, 1), 101);
        assert_eq!(cs.hit_test(3, 4), Some(100));
        assert_eq!(cs.hit_test(39, 5), Some(101));
        assert_eq!(cs.hit_test(40, 5), None);
        assert_eq!(cs.hit_test(3, 6), None);
    }

    #[test]
    fn hit_test_multi_row_button() {
        let mut cs = ClickState::new();
        // The barrel panel is one big hit button
        cs.add_click_target(Rect::new(2, 3, 30, 6), 0);
        assert_eq!(cs.hit_test(2, 3), Some(0));
        assert_eq!(cs.hit_test(31, 8), Some(0));
        assert_eq!(cs.hit_test(1, 3), None);
        assert_eq!(cs.hit_test(2, 9), None);
    }

    #[test]
    fn later_target_wins_on_overlap() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 80, 10), 0);
        cs.add_click_target(Rect::new(0, 2, 80, 1), 200);
        assert_eq!(cs.hit_test(10, 2), Some(200));
        assert_eq!(cs.hit_test(10, 3), Some(0));
    }

    #[test]
    fn row_target_clipped_to_area() {
        let mut cs = ClickState::new();
        let area = Rect::new(4, 10, 20, 3);
        cs.add_row_target(area, 9, 1);
        cs.add_row_target(area, 13, 2);
        assert!(cs.targets.is_empty());
        cs.add_row_target(area, 12, 3);
        assert_eq!(cs.hit_test(4, 12), Some(3));
        assert_eq!(cs.hit_test(3, 12), None);
    }

    #[test]
    fn clear_drops_everything() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 10, 10), 7);
        cs.clear_targets();
        assert_eq!(cs.hit_test(1, 1), None);
    }

    #[test]
    fn narrow_threshold() {
        assert!(is_narrow_layout(40));
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
        assert!(!is_narrow_layout(120));
    }

    #[test]
    fn pixel_rows() {
        // 30 rows over 450px → 15px per row
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(14.9, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
    }

    #[test]
    fn pixel_cols() {
        assert_eq!(pixel_x_to_col(0.0, 800.0, 80), Some(0));
        assert_eq!(pixel_x_to_col(25.0, 800.0, 80), Some(2));
        assert_eq!(pixel_x_to_col(799.0, 800.0, 80), Some(79));
    }

    #[test]
    fn pixel_conversion_rejects_bad_input() {
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_x_to_col(10.0, 800.0, 0), None);
    }

    #[test]
    fn tap_centers_land_on_their_rows() {
        let rows: u16 = 40;
        let grid_height = rows as f64 * 15.0;
        let mut cs = ClickState::new();
        for row in 0..rows {
            cs.add_click_target(Rect::new(0, row, 37, 1), 100 + row);
        }
        for row in 0..rows {
            let y = row as f64 * 15.0 + 7.5;
            let hit = pixel_y_to_row(y, grid_height, rows).and_then(|r| cs.hit_test(0, r));
            assert_eq!(hit, Some(100 + row));
        }
    }
}
