use super::debounce::Debouncer;
use super::matcher::{group_by_category, ResultGroup, Search, SearchResult};
use crate::nav::{Navigator, Route};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

/// Where the palette currently is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PalettePhase {
    Closed,
    /// Open with nothing to show (blank query, or first search still pending)
    OpenEmpty,
    OpenWithResults,
    OpenNoMatches,
}

/// What a pointer event landed on, as resolved by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Input,
    Row(usize),
    /// Inside the dropdown but not on a row (headers, footer, padding)
    Panel,
    Outside,
}

/// Global search palette: query editing, debounced matching, result cursor
/// and the open/closed lifecycle.
///
/// `selected` always stays below `max(1, results.len())`.
#[derive(Debug)]
pub struct Palette {
    query: String,
    cursor_pos: usize,
    is_open: bool,
    focused: bool,
    selected: usize,
    results: Vec<SearchResult>,
    /// Trimmed query the current `results` answer
    answered: Option<String>,
    debounce: Debouncer<String>,
}

impl Palette {
    pub fn new(debounce: Duration) -> Self {
        Self {
            query: String::new(),
            cursor_pos: 0,
            is_open: false,
            focused: false,
            selected: 0,
            results: Vec::new(),
            answered: None,
            debounce: Debouncer::new(debounce),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Byte offset of the text cursor
    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.results.get(self.selected)
    }

    /// Results regrouped by category for display
    pub fn groups(&self) -> Vec<ResultGroup<'_>> {
        group_by_category(&self.results)
    }

    pub fn is_search_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn phase(&self) -> PalettePhase {
        if !self.is_open {
            PalettePhase::Closed
        } else if self.query.trim().is_empty() {
            PalettePhase::OpenEmpty
        } else if !self.results.is_empty() {
            PalettePhase::OpenWithResults
        } else if self.answered.as_deref() == Some(self.query.trim()) {
            // Only an empty answer to the query on screen counts as no matches
            PalettePhase::OpenNoMatches
        } else {
            PalettePhase::OpenEmpty
        }
    }

    // --- Lifecycle ---

    /// Focus moved into the search input
    pub fn focus(&mut self) {
        self.focused = true;
        if !self.is_open {
            tracing::debug!(target: "palette", "opened on focus");
        }
        self.is_open = true;
    }

    /// Reserved shortcut: open and focus from anywhere
    pub fn open(&mut self) {
        tracing::debug!(target: "palette", was_open = self.is_open, "open shortcut");
        self.focused = true;
        self.is_open = true;
    }

    /// Hide the dropdown and drop focus; typed text stays
    pub fn close(&mut self) {
        if self.is_open {
            tracing::debug!(target: "palette", query = %self.query, "closed");
        }
        self.is_open = false;
        self.focused = false;
    }

    /// Escape: close and forget the query
    pub fn dismiss(&mut self) {
        self.close();
        self.reset_query();
    }

    /// Clear button: empty the query and the results at once, stay open
    pub fn clear(&mut self) {
        self.reset_query();
    }

    fn reset_query(&mut self) {
        self.query.clear();
        self.cursor_pos = 0;
        self.results.clear();
        self.answered = None;
        self.selected = 0;
        self.debounce.cancel();
    }

    // --- Query editing ---

    fn query_changed(&mut self, now: Instant) {
        self.is_open = true;
        self.debounce.schedule(self.query.clone(), now);
    }

    /// Replace the whole query (paste)
    pub fn set_query(&mut self, text: &str, now: Instant) {
        self.query = text.to_string();
        self.cursor_pos = self.query.len();
        self.query_changed(now);
    }

    pub fn insert_char(&mut self, c: char, now: Instant) {
        self.query.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
        self.query_changed(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        if self.cursor_pos == 0 {
            return;
        }
        let prev = self.query[..self.cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.query.remove(prev);
        self.cursor_pos = prev;
        self.query_changed(now);
    }

    pub fn delete(&mut self, now: Instant) {
        if self.cursor_pos < self.query.len() {
            self.query.remove(self.cursor_pos);
            self.query_changed(now);
        }
    }

    pub fn cursor_left(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos = self.query[..self.cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_pos < self.query.len() {
            self.cursor_pos = self.query[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(self.query.len());
        }
    }

    // --- Searching ---

    /// Run the debounced search if its quiet period is over.
    /// Returns true when a new result set was installed.
    pub fn tick(&mut self, now: Instant, source: &dyn Search) -> bool {
        let Some(query) = self.debounce.poll(now) else {
            return false;
        };
        self.results = source.search(&query);
        self.answered = Some(query.trim().to_string());
        self.selected = 0;
        tracing::debug!(
            target: "palette",
            query = %query,
            results = self.results.len(),
            "debounced search"
        );
        true
    }

    // --- Result cursor ---

    fn navigable(&self) -> bool {
        self.is_open && !self.results.is_empty()
    }

    pub fn select_next(&mut self) {
        if self.navigable() {
            self.selected = (self.selected + 1).min(self.results.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        if self.navigable() {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    /// Pointer over a row moves the shared cursor
    pub fn hover(&mut self, index: usize) {
        if index < self.results.len() {
            self.selected = index;
        }
    }

    /// Pick a result: navigate to its page, then close and clear.
    /// Returns the route taken, or `None` if `index` is out of range.
    pub fn choose(&mut self, index: usize, navigator: &mut dyn Navigator) -> Option<Route> {
        let result = self.results.get(index)?;
        let route = result.route;
        tracing::info!(target: "palette", id = %result.id, route = %route, "result chosen");
        navigator.navigate(route);
        self.dismiss();
        Some(route)
    }

    // --- Input wiring ---

    /// Feed a key press. Returns true when the palette consumed it.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        now: Instant,
        navigator: &mut dyn Navigator,
    ) -> bool {
        let platform_mod = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);

        // Reserved shortcut wins everywhere.
        if platform_mod && matches!(key.code, KeyCode::Char('k') | KeyCode::Char('K')) {
            self.open();
            return true;
        }

        if key.code == KeyCode::Esc && (self.is_open || self.focused || !self.query.is_empty()) {
            self.dismiss();
            return true;
        }

        if !self.focused {
            return false;
        }

        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => self.clear(),
            KeyCode::Char(_) if platform_mod || key.modifiers.contains(KeyModifiers::ALT) => {
                return false
            }
            KeyCode::Char(c) => self.insert_char(c, now),
            KeyCode::Backspace => self.backspace(now),
            KeyCode::Delete => self.delete(now),
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Home => self.cursor_pos = 0,
            KeyCode::End => self.cursor_pos = self.query.len(),
            KeyCode::Down => self.select_next(),
            KeyCode::Up => self.select_prev(),
            KeyCode::Enter => {
                if self.is_open {
                    self.choose(self.selected, navigator);
                }
            }
            // Focus leaving the input behaves like clicking elsewhere.
            KeyCode::Tab | KeyCode::BackTab => self.close(),
            _ => return false,
        }
        true
    }

    /// Mouse button pressed on `target`
    pub fn pointer_down(&mut self, target: PointerTarget, navigator: &mut dyn Navigator) {
        match target {
            PointerTarget::Input => self.focus(),
            PointerTarget::Row(index) if self.is_open => {
                self.choose(index, navigator);
            }
            PointerTarget::Row(_) | PointerTarget::Panel => {}
            PointerTarget::Outside => self.close(),
        }
    }

    /// Mouse moved over `target`
    pub fn pointer_move(&mut self, target: PointerTarget) {
        if let PointerTarget::Row(index) = target {
            if self.is_open {
                self.hover(index);
            }
        }
    }
}
