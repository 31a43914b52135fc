use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cmp::Ordering;

/// How a cell is drawn; the renderer keeps one style per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Plain,
    Strong,
    Mono,
    /// Colored by value (status, type)
    Badge,
    /// Right-aligned number
    Count,
    Muted,
}

/// One column of a table schema
pub struct Column<R> {
    pub header: &'static str,
    /// 0 fills the remaining width
    pub width: u16,
    pub value: fn(&R) -> String,
    pub kind: CellKind,
}

impl<R> Column<R> {
    pub fn new(header: &'static str, width: u16, value: fn(&R) -> String, kind: CellKind) -> Self {
        Self {
            header,
            width,
            value,
            kind,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn indicator(&self) -> &'static str {
        match self {
            SortOrder::Ascending => " \u{25B2}",
            SortOrder::Descending => " \u{25BC}",
        }
    }

    fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Table display state
#[derive(Debug)]
pub struct TableState {
    pub selected: Option<usize>,
    pub scroll_offset: usize,
    pub visible_rows: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            visible_rows: 20,
        }
    }
}

impl TableState {
    pub fn select_next(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) => (i + 1).min(total - 1),
            None => 0,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn select_prev(&mut self) {
        let i = match self.selected {
            Some(0) | None => 0,
            Some(i) => i - 1,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn page_down(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let jump = self.visible_rows.saturating_sub(1);
        let i = match self.selected {
            Some(i) => (i + jump).min(total - 1),
            None => jump.min(total - 1),
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn page_up(&mut self) {
        let jump = self.visible_rows.saturating_sub(1);
        let i = match self.selected {
            Some(i) => i.saturating_sub(jump),
            None => 0,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn select_first(&mut self) {
        self.selected = Some(0);
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        self.selected = Some(total - 1);
        self.ensure_visible(total - 1);
    }

    /// Keep selection and scroll inside `total` rows
    pub fn clamp(&mut self, total: usize) {
        if total == 0 {
            self.selected = None;
            self.scroll_offset = 0;
            return;
        }
        if let Some(i) = self.selected {
            if i >= total {
                self.selected = Some(total - 1);
            }
        }
        self.scroll_offset = self.scroll_offset.min(total - 1);
        if let Some(i) = self.selected {
            self.ensure_visible(i);
        }
    }

    fn ensure_visible(&mut self, index: usize) {
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if self.visible_rows > 0 && index >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = index - self.visible_rows + 1;
        }
    }
}

/// Numbers compare as numbers, everything else case-insensitively
pub fn compare_values(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// A page table: column schema plus filter, sort and selection over a row
/// source owned by someone else.
pub struct TableView<R> {
    pub title: &'static str,
    pub columns: Vec<Column<R>>,
    pub state: TableState,
    pub filter_focused: bool,
    filter: String,
    sort: Option<(usize, SortOrder)>,
    /// Indices into the row source, filtered and sorted
    order: Vec<usize>,
}

impl<R> TableView<R> {
    pub fn new(title: &'static str, columns: Vec<Column<R>>) -> Self {
        Self {
            title,
            columns,
            state: TableState::default(),
            filter_focused: false,
            filter: String::new(),
            sort: None,
            order: Vec::new(),
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort(&self) -> Option<(usize, SortOrder)> {
        self.sort
    }

    /// Row-source indices currently shown, in display order
    pub fn visible(&self) -> &[usize] {
        &self.order
    }

    /// Selection state together with the number of visible rows
    pub fn cursor(&mut self) -> (&mut TableState, usize) {
        (&mut self.state, self.order.len())
    }

    pub fn cell(&self, column: usize, row: &R) -> String {
        self.columns
            .get(column)
            .map(|c| (c.value)(row))
            .unwrap_or_default()
    }

    fn row_matches(&self, row: &R, needle: &str) -> bool {
        self.columns
            .iter()
            .any(|c| (c.value)(row).to_lowercase().contains(needle))
    }

    /// Recompute the visible order from `rows`
    pub fn refresh(&mut self, rows: &[R]) {
        let needle = self.filter.trim().to_lowercase();
        let mut order: Vec<usize> = (0..rows.len())
            .filter(|&i| needle.is_empty() || self.row_matches(&rows[i], &needle))
            .collect();

        if let Some((column, direction)) = self.sort {
            if let Some(col) = self.columns.get(column) {
                let value = col.value;
                order.sort_by(|&a, &b| {
                    let cmp = compare_values(&value(&rows[a]), &value(&rows[b]));
                    match direction {
                        SortOrder::Ascending => cmp,
                        SortOrder::Descending => cmp.reverse(),
                    }
                });
            }
        }

        self.order = order;
        self.state.clamp(self.order.len());
    }

    pub fn set_filter(&mut self, text: &str, rows: &[R]) {
        self.filter = text.to_string();
        self.state.selected = None;
        self.state.scroll_offset = 0;
        self.refresh(rows);
    }

    /// Sort by `column`; picking the same column again flips the order
    pub fn sort_by(&mut self, column: usize, rows: &[R]) {
        if column >= self.columns.len() {
            return;
        }
        self.sort = match self.sort {
            Some((c, order)) if c == column => Some((column, order.flipped())),
            _ => Some((column, SortOrder::Ascending)),
        };
        self.refresh(rows);
    }

    pub fn selected_row<'a>(&self, rows: &'a [R]) -> Option<&'a R> {
        let logical = self.state.selected?;
        rows.get(*self.order.get(logical)?)
    }

    /// Keyboard handling for a focused table. Returns true if consumed.
    pub fn handle_key(&mut self, key: KeyEvent, rows: &[R]) -> bool {
        if self.filter_focused {
            return self.handle_filter_key(key, rows);
        }

        let total = self.order.len();
        match key.code {
            KeyCode::Up => self.state.select_prev(),
            KeyCode::Down => self.state.select_next(total),
            KeyCode::PageUp => self.state.page_up(),
            KeyCode::PageDown => self.state.page_down(total),
            KeyCode::Home => self.state.select_first(),
            KeyCode::End => self.state.select_last(total),
            KeyCode::Char('f') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter_focused = true;
            }
            KeyCode::F(n) if (1..=self.columns.len() as u8).contains(&n) => {
                self.sort_by(n as usize - 1, rows);
            }
            _ => return false,
        }
        true
    }

    fn handle_filter_key(&mut self, key: KeyEvent, rows: &[R]) -> bool {
        match key.code {
            KeyCode::Enter => self.filter_focused = false,
            KeyCode::Esc => {
                self.filter_focused = false;
                self.set_filter("", rows);
            }
            KeyCode::Backspace => {
                let mut text = self.filter.clone();
                text.pop();
                self.set_filter(&text, rows);
            }
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut text = self.filter.clone();
                text.push(c);
                self.set_filter(&text, rows);
            }
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Door {
        name: &'static str,
        count: u32,
    }

    fn doors() -> Vec<Door> {
        vec![
            Door { name: "Lobby", count: 12 },
            Door { name: "annex", count: 3 },
            Door { name: "Vault", count: 100 },
            Door { name: "Lobby East", count: 3 },
        ]
    }

    fn view() -> TableView<Door> {
        TableView::new(
            "Doors",
            vec![
                Column::new("Name", 0, |d: &Door| d.name.to_string(), CellKind::Strong),
                Column::new("Count", 8, |d: &Door| d.count.to_string(), CellKind::Count),
            ],
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn refresh_shows_all_rows_in_source_order() {
        let rows = doors();
        let mut v = view();
        v.refresh(&rows);
        assert_eq!(v.visible(), &[0, 1, 2, 3]);
    }

    #[test]
    fn filter_matches_any_column_case_insensitively() {
        let rows = doors();
        let mut v = view();
        v.set_filter("LOBBY", &rows);
        assert_eq!(v.visible(), &[0, 3]);
        v.set_filter("100", &rows);
        assert_eq!(v.visible(), &[2]);
    }

    #[test]
    fn numeric_sort_and_flip_are_stable() {
        let rows = doors();
        let mut v = view();
        v.sort_by(1, &rows);
        assert_eq!(v.visible(), &[1, 3, 0, 2]);
        v.sort_by(1, &rows);
        assert_eq!(v.sort(), Some((1, SortOrder::Descending)));
        assert_eq!(v.visible(), &[2, 0, 1, 3]);
    }

    #[test]
    fn text_sort_ignores_case() {
        let rows = doors();
        let mut v = view();
        v.handle_key(key(KeyCode::F(1)), &rows);
        assert_eq!(v.visible(), &[1, 0, 3, 2]);
    }

    #[test]
    fn selection_is_clamped_after_filtering() {
        let rows = doors();
        let mut v = view();
        v.refresh(&rows);
        v.state.select_last(4);
        assert_eq!(v.selected_row(&rows).map(|d| d.name), Some("Lobby East"));

        v.set_filter("vault", &rows);
        assert_eq!(v.state.selected, None);
        v.handle_key(key(KeyCode::Down), &rows);
        assert_eq!(v.selected_row(&rows).map(|d| d.name), Some("Vault"));
        v.handle_key(key(KeyCode::Down), &rows);
        assert_eq!(v.state.selected, Some(0));
    }

    #[test]
    fn filter_editing_via_keys() {
        let rows = doors();
        let mut v = view();
        v.refresh(&rows);
        assert!(!v.handle_key(key(KeyCode::Char('f')), &rows));
        assert!(v.handle_key(KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL), &rows));
        assert!(v.filter_focused);
        for c in "vau".chars() {
            v.handle_key(key(KeyCode::Char(c)), &rows);
        }
        assert_eq!(v.visible(), &[2]);
        v.handle_key(key(KeyCode::Backspace), &rows);
        assert_eq!(v.filter(), "va");
        v.handle_key(key(KeyCode::Esc), &rows);
        assert!(!v.filter_focused);
        assert_eq!(v.visible().len(), 4);
    }

    #[test]
    fn unknown_function_keys_fall_through() {
        let rows = doors();
        let mut v = view();
        assert!(!v.handle_key(key(KeyCode::F(9)), &rows));
        assert_eq!(v.sort(), None);
    }

    #[test]
    fn paging_respects_visible_rows() {
        let mut state = TableState {
            visible_rows: 5,
            ..Default::default()
        };
        state.page_down(30);
        assert_eq!(state.selected, Some(4));
        state.page_down(30);
        assert_eq!(state.selected, Some(8));
        assert_eq!(state.scroll_offset, 4);
        state.page_up();
        assert_eq!(state.selected, Some(4));
    }
}
