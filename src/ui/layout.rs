//! Single-column layout with inner margin for content.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{
    DROPDOWN_MAX_ROWS, HEADER_HEIGHT, HISTORY_HEIGHT, INPUT_HEIGHT, MARGIN_X, MIN_RESULT_LINES,
    STATUS_HEIGHT,
};

#[derive(Clone, Debug)]
pub struct LayoutRegions {
    pub header: Rect,
    pub results: Rect,
    pub history: Rect,
    pub input: Rect,
    pub status: Rect,
}

/// Dropdown rect anchored to the bottom of the result pane, just above the input.
pub fn dropdown_rect(results: Rect, rows: usize) -> Rect {
    let wanted = (rows as u16).min(DROPDOWN_MAX_ROWS) + 2;
    let height = wanted.min(results.height);
    Rect {
        x: results.x,
        y: results.y + results.height.saturating_sub(height),
        width: results.width,
        height,
    }
}

pub fn compute(area: Rect) -> LayoutRegions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(MIN_RESULT_LINES),
            Constraint::Length(HISTORY_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);
    let results = Rect {
        x: area.x + MARGIN_X,
        y: chunks[1].y,
        width: area.width.saturating_sub(2 * MARGIN_X),
        height: chunks[1].height,
    };
    LayoutRegions {
        header: chunks[0],
        results,
        history: chunks[2],
        input: chunks[3],
        status: chunks[4],
    }
}

/// Text rows inside the bordered result pane.
pub fn results_viewport(area: Rect) -> usize {
    compute(area).results.height.saturating_sub(2) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_vertically() {
        let r = compute(Rect::new(0, 0, 80, 24));
        assert_eq!(r.header.height, HEADER_HEIGHT);
        assert_eq!(r.results.height, 24 - 1 - 1 - 2 - 1);
        assert_eq!(r.results.x, MARGIN_X);
        assert_eq!(r.status.y, 23);
        assert_eq!(results_viewport(Rect::new(0, 0, 80, 24)), 17);
    }

    #[test]
    fn dropdown_sits_on_pane_bottom() {
        let pane = Rect::new(1, 1, 78, 18);
        let d = dropdown_rect(pane, 3);
        assert_eq!(d.height, 5);
        assert_eq!(d.y + d.height, pane.y + pane.height);
        assert_eq!(dropdown_rect(pane, 50).height, DROPDOWN_MAX_ROWS + 2);
        assert_eq!(dropdown_rect(Rect::new(0, 0, 10, 4), 50).height, 4);
    }
}
