use crate::config::AppConfig;
use crate::feed::{EventFeed, EventGenerator, FeedEvent, FeedProducer, SharedFeed};
use crate::model::Dataset;
use crate::nav::{Navigator, Route, Router};
use crate::search::{Matcher, Palette, PointerTarget};
use crate::tui::pages::Pages;
use crate::tui::ui;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::prelude::*;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Screen regions from the last draw, used to resolve mouse events
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    pub search_input: Rect,
    /// Dropdown panel while the palette is drawn
    pub palette_panel: Option<Rect>,
    /// One entry per drawn result row, with its flat result index
    pub palette_rows: Vec<(Rect, usize)>,
    pub sidebar: Vec<(Rect, Route)>,
    /// First body row of the page table and the body area
    pub table_body: Rect,
}

impl HitMap {
    pub fn pointer_target(&self, column: u16, row: u16) -> PointerTarget {
        let at = Position::new(column, row);
        if self.search_input.contains(at) {
            return PointerTarget::Input;
        }
        if let Some((_, index)) = self.palette_rows.iter().find(|(r, _)| r.contains(at)) {
            return PointerTarget::Row(*index);
        }
        if self.palette_panel.is_some_and(|p| p.contains(at)) {
            return PointerTarget::Panel;
        }
        PointerTarget::Outside
    }

    pub fn sidebar_route(&self, column: u16, row: u16) -> Option<Route> {
        let at = Position::new(column, row);
        self.sidebar
            .iter()
            .find(|(r, _)| r.contains(at))
            .map(|(_, route)| *route)
    }

    pub fn table_offset(&self, column: u16, row: u16) -> Option<usize> {
        self.table_body
            .contains(Position::new(column, row))
            .then(|| (row - self.table_body.y) as usize)
    }
}

/// Feed values copied out of the shared buffer once per tick
#[derive(Debug, Default, Clone, Copy)]
pub struct FeedStatus {
    pub live: bool,
    pub unseen: usize,
    pub latest: Option<Instant>,
}

pub struct App {
    pub config: AppConfig,
    pub data: Arc<Dataset>,

    // Search
    pub matcher: Matcher,
    pub palette: Palette,

    // Pages
    pub router: Router,
    pub pages: Pages,

    // Dashboard feed
    pub feed: SharedFeed,
    pub events: Vec<FeedEvent>,
    pub feed_status: FeedStatus,
    producer: Option<FeedProducer>,

    pub hits: HitMap,
    pub status_message: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, data: Arc<Dataset>) -> Self {
        let mut feed = EventFeed::seeded(config.feed_capacity, &data.recent_actions);
        feed.set_live(config.feed_live);
        let feed = feed.into_shared();

        let names = data.users.iter().map(|u| u.name.clone()).collect();
        let producer =
            FeedProducer::spawn(feed.clone(), config.feed_interval(), EventGenerator::new(names));

        let events: Vec<FeedEvent> = feed.lock().events().cloned().collect();
        let pages = Pages::new(&data, &events);

        let mut app = Self {
            matcher: Matcher::new(data.clone(), config.caps),
            palette: Palette::new(config.debounce()),
            router: Router::new(Route::Dashboard),
            pages,
            feed,
            events,
            feed_status: FeedStatus::default(),
            producer: Some(producer),
            hits: HitMap::default(),
            status_message: "Ready".to_string(),
            should_quit: false,
            config,
            data,
        };
        app.sync_feed();
        app
    }

    pub fn route(&self) -> Route {
        self.router.current()
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> crate::Result<()> {
        let tick_rate = self.config.tick_rate();
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                let ev = event::read()?;
                self.handle_event(ev, Instant::now());
            }

            if last_tick.elapsed() >= tick_rate {
                self.on_tick(Instant::now());
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Periodic work: fire the debounced search and pull in feed changes
    pub fn on_tick(&mut self, now: Instant) {
        if self.palette.tick(now, &self.matcher) {
            self.status_message = format!("{} results", self.palette.results().len());
        }
        self.sync_feed();
    }

    fn sync_feed(&mut self) {
        {
            let feed = self.feed.lock();
            self.events.clear();
            self.events.extend(feed.events().cloned());
            self.feed_status = FeedStatus {
                live: feed.is_live(),
                unseen: feed.unseen(),
                latest: feed.latest_arrival(),
            };
        }
        self.pages.events.refresh(&self.events);
    }

    pub fn handle_event(&mut self, ev: Event, now: Instant) {
        match ev {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Paste(text) if self.palette.is_focused() => {
                let mut query = self.palette.query().to_string();
                query.push_str(text.trim_end_matches(['\r', '\n']));
                self.palette.set_query(&query, now);
            }
            _ => {}
        }
    }

    fn navigate(&mut self, route: Route) {
        if route != self.router.current() {
            self.palette.close();
            self.pages.blur_filters();
            self.router.navigate(route);
            self.status_message = route.title().to_string();
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Global keys
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        let route = self.router.current();
        if self.palette.handle_key(key, now, &mut self.router) {
            if self.router.current() != route {
                self.pages.blur_filters();
                self.status_message = self.router.current().title().to_string();
            }
            return;
        }

        if self.pages.filter_focused(route) {
            // Text goes to the filter; only navigation keys fall through.
            if self.pages.handle_key(route, key, &self.data, &self.events)
                || (matches!(key.code, KeyCode::Char(_)) && !has_command_modifier(key))
            {
                return;
            }
        }

        // Plain printable chars always belong to the search input, so the
        // first keystroke opens the palette with that char already typed.
        if let KeyCode::Char(c) = key.code {
            if !has_command_modifier(key) {
                self.palette.focus();
                if c != '/' {
                    self.palette.insert_char(c, now);
                }
                return;
            }
        }

        if self.handle_page_key(key) {
            return;
        }

        self.pages.handle_key(route, key, &self.data, &self.events);
    }

    /// Keys that belong to the console rather than a table
    fn handle_page_key(&mut self, key: KeyEvent) -> bool {
        let route = self.router.current();
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Tab => {
                let next = Route::ALL[(route.index() + 1) % Route::ALL.len()];
                self.navigate(next);
            }
            KeyCode::BackTab => {
                let len = Route::ALL.len();
                let prev = Route::ALL[(route.index() + len - 1) % len];
                self.navigate(prev);
            }
            KeyCode::Char(c @ '1'..='5') if alt => {
                let index = c as usize - '1' as usize;
                self.navigate(Route::ALL[index]);
            }
            KeyCode::Backspace => {
                if let Some(back) = self.router.back() {
                    self.pages.blur_filters();
                    self.status_message = back.title().to_string();
                }
            }
            KeyCode::Char('p') if alt && route == Route::Dashboard => {
                let live = self.feed.lock().toggle_live();
                tracing::info!(target: "feed", live, "feed toggled");
                self.status_message = if live {
                    "Feed resumed".to_string()
                } else {
                    "Feed paused".to_string()
                };
                self.sync_feed();
            }
            KeyCode::Char('c') if alt && route == Route::Dashboard => {
                self.feed.lock().clear_unseen();
                self.sync_feed();
            }
            _ => return false,
        }
        true
    }

    // --- Mouse handling ---

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let target = self.hits.pointer_target(column, row);
                let route = self.router.current();
                self.palette.pointer_down(target, &mut self.router);
                if self.router.current() != route {
                    self.pages.blur_filters();
                    self.status_message = self.router.current().title().to_string();
                    return;
                }
                if target != PointerTarget::Outside {
                    return;
                }
                if let Some(clicked) = self.hits.sidebar_route(column, row) {
                    self.navigate(clicked);
                } else if let Some(offset) = self.hits.table_offset(column, row) {
                    self.pages.click_row(route, offset);
                }
            }
            MouseEventKind::Moved => {
                let target = self.hits.pointer_target(column, row);
                self.palette.pointer_move(target);
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                let down = mouse.kind == MouseEventKind::ScrollDown;
                if self.palette.is_open() && self.hits.palette_panel.is_some() {
                    if down {
                        self.palette.select_next();
                    } else {
                        self.palette.select_prev();
                    }
                } else {
                    self.pages.scroll(self.router.current(), down);
                }
            }
            _ => {}
        }
    }

    /// Time since the producer last pushed an event
    pub fn since_last_event(&self, now: Instant) -> Option<Duration> {
        self.feed_status
            .latest
            .map(|at| now.saturating_duration_since(at))
    }
}

/// Ctrl, Alt or Super: the key is a command, not text
fn has_command_modifier(key: KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(mut producer) = self.producer.take() {
            producer.stop();
        }
    }
}
