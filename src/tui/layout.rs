use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the bordered header block (three text rows)
const HEADER_HEIGHT: u16 = 5;

/// Screen layout configuration
pub struct AppLayout {
    pub header_area: Rect,
    pub body_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Create the page layout:
    /// - Header: entry position, id, tags and filters
    /// - Body: the entry or comparison page
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(3),    // Body (at least 3 rows)
                Constraint::Length(1), // Status bar (1 row)
            ])
            .split(area);

        Self { header_area: chunks[0], body_area: chunks[1], status_area: chunks[2] }
    }
}

/// Split the entry page into chat (60%) and raw JSON (40%) when the raw pane is shown
pub fn split_entry_body(area: Rect, show_raw: bool) -> (Rect, Option<Rect>) {
    if !show_raw {
        return (area, None);
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    (chunks[0], Some(chunks[1]))
}

/// 2x2 comparison grid: `[original content, revised content, original reasoning, revised reasoning]`
pub fn comparison_grid(area: Rect) -> [Rect; 4] {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let columns = |row: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(row)
    };

    let top = columns(rows[0]);
    let bottom = columns(rows[1]);
    [top[0], top[1], bottom[0], bottom[1]]
}
