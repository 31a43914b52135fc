use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sentinel::{
    CategoryCaps, Dataset, Matcher, Palette, PalettePhase, PointerTarget, Route, Router, Search,
    SearchResult, User,
};
use std::cell::RefCell;
use std::sync::Arc;
use std::time::{Duration, Instant};

const DEBOUNCE: Duration = Duration::from_millis(200);

/// Records every query that reaches the matcher
struct Counting {
    inner: Matcher,
    calls: RefCell<Vec<String>>,
}

impl Counting {
    fn new(inner: Matcher) -> Self {
        Self {
            inner,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Search for Counting {
    fn search(&self, query: &str) -> Vec<SearchResult> {
        self.calls.borrow_mut().push(query.to_string());
        self.inner.search(query)
    }
}

fn sample_matcher() -> Matcher {
    Matcher::new(Arc::new(Dataset::sample()), CategoryCaps::default())
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn user(id: &str, name: &str) -> User {
    User {
        id: id.into(),
        user_type: "Regular".into(),
        name: name.into(),
        visible_id: format!("77{}", id),
        credential_type: String::new(),
        valid_period_start: String::new(),
        valid_period_end: String::new(),
        status: "Active".into(),
        user_group: "Night Shift".into(),
        access_level: String::new(),
        floor_level: String::new(),
        avatar: None,
    }
}

#[test]
fn typing_a_word_fires_one_search_for_the_whole_word() {
    let source = Counting::new(sample_matcher());
    let mut palette = Palette::new(DEBOUNCE);
    let mut nav = Router::default();
    let t0 = Instant::now();

    palette.focus();
    let word: Vec<char> = "james".chars().collect();
    for step in 0..=20u32 {
        let now = t0 + Duration::from_millis(50) * step;
        // One keystroke every 100 ms, the loop ticks every 50 ms.
        if step % 2 == 0 {
            if let Some(c) = word.get((step / 2) as usize) {
                palette.handle_key(key(KeyCode::Char(*c)), now, &mut nav);
            }
        }
        palette.tick(now, &source);
    }

    assert_eq!(*source.calls.borrow(), vec!["james".to_string()]);
    assert_eq!(palette.phase(), PalettePhase::OpenWithResults);
    assert_eq!(palette.results()[0].title, "James Wilson");
}

#[test]
fn ten_downs_with_three_results_stop_at_the_last() {
    let data = Dataset {
        users: vec![user("1", "Alpha One"), user("2", "Alpha Two"), user("3", "Alpha Three")],
        ..Default::default()
    };
    let matcher = Matcher::new(Arc::new(data), CategoryCaps::default());
    let mut palette = Palette::new(DEBOUNCE);
    let mut nav = Router::default();
    let t0 = Instant::now();

    palette.focus();
    palette.set_query("alpha", t0);
    palette.tick(t0 + DEBOUNCE, &matcher);
    assert_eq!(palette.results().len(), 3);

    for _ in 0..10 {
        palette.handle_key(key(KeyCode::Down), t0, &mut nav);
    }
    assert_eq!(palette.selected(), 2);

    palette.handle_key(key(KeyCode::Enter), t0, &mut nav);
    assert_eq!(nav.current(), Route::Users);
    assert_eq!(palette.phase(), PalettePhase::Closed);
    assert!(palette.query().is_empty());
}

#[test]
fn room_finds_the_server_room_reader() {
    let matcher = sample_matcher();
    let mut palette = Palette::new(DEBOUNCE);
    let mut nav = Router::default();
    let t0 = Instant::now();

    for c in "room".chars() {
        palette.focus();
        palette.handle_key(key(KeyCode::Char(c)), t0, &mut nav);
    }
    palette.tick(t0 + DEBOUNCE, &matcher);

    let groups = palette.groups();
    assert_eq!(groups[0].category, sentinel::Category::Device);
    assert!(palette
        .results()
        .iter()
        .any(|r| r.title == "Server Room Access" && r.subtitle == "Fingerprint • Server Room"));
    assert!(palette
        .results()
        .iter()
        .all(|r| r.category != sentinel::Category::CardTemplate));
}

#[test]
fn unknown_number_is_no_matches_not_empty() {
    let matcher = sample_matcher();
    let mut palette = Palette::new(DEBOUNCE);
    let mut nav = Router::default();
    let t0 = Instant::now();

    palette.focus();
    for c in "112233".chars() {
        palette.handle_key(key(KeyCode::Char(c)), t0, &mut nav);
    }
    assert_eq!(palette.phase(), PalettePhase::OpenEmpty);
    palette.tick(t0 + DEBOUNCE, &matcher);
    assert_eq!(palette.phase(), PalettePhase::OpenNoMatches);
    assert_eq!(palette.selected(), 0);
}

#[test]
fn selection_stays_in_range_under_any_arrow_sequence() {
    let matcher = sample_matcher();
    let mut nav = Router::default();
    let t0 = Instant::now();

    for query in ["e", "a", "lobby", "james", "112233", ""] {
        let mut palette = Palette::new(DEBOUNCE);
        palette.focus();
        palette.set_query(query, t0);
        palette.tick(t0 + DEBOUNCE, &matcher);

        // A fixed but irregular mix of ups and downs
        for i in 0..40u32 {
            let code = if (i * 7 + 3) % 5 < 3 { KeyCode::Down } else { KeyCode::Up };
            palette.handle_key(key(code), t0, &mut nav);
            let bound = palette.results().len().max(1);
            assert!(palette.selected() < bound, "query {:?} step {}", query, i);
        }
    }
}

#[test]
fn outside_click_then_escape() {
    let matcher = sample_matcher();
    let mut palette = Palette::new(DEBOUNCE);
    let mut nav = Router::default();
    let t0 = Instant::now();

    palette.pointer_down(PointerTarget::Input, &mut nav);
    palette.set_query("lobby", t0);
    palette.tick(t0 + DEBOUNCE, &matcher);

    palette.pointer_down(PointerTarget::Panel, &mut nav);
    assert!(palette.is_open());

    palette.pointer_down(PointerTarget::Outside, &mut nav);
    assert_eq!(palette.phase(), PalettePhase::Closed);
    assert_eq!(palette.query(), "lobby");

    // Escape still clears text left behind by an outside click.
    assert!(palette.handle_key(key(KeyCode::Esc), t0, &mut nav));
    assert!(palette.query().is_empty());
    assert!(nav.trail().is_empty());
}

#[test]
fn tab_closes_like_focus_leaving() {
    let matcher = sample_matcher();
    let mut palette = Palette::new(DEBOUNCE);
    let mut nav = Router::default();
    let t0 = Instant::now();

    palette.focus();
    palette.set_query("lobby", t0);
    palette.tick(t0 + DEBOUNCE, &matcher);
    assert!(palette.handle_key(key(KeyCode::Tab), t0, &mut nav));
    assert_eq!(palette.phase(), PalettePhase::Closed);
    assert!(!palette.is_focused());
    assert_eq!(palette.query(), "lobby");
}
