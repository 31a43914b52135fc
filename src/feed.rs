//! Live dashboard event feed
//!
//! A bounded ring buffer of recent access events, newest first, and a
//! producer thread that invents a new event on a fixed interval. Nothing in
//! the search core depends on this.

use crate::model::{AccessEvent, RecentAction};
use chrono::{DateTime, Local};
use crossbeam_channel::{select, Sender};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How long a freshly pushed event is highlighted
pub const NEW_HIGHLIGHT: Duration = Duration::from_secs(3);

/// Timestamp format used by the event table
pub const EVENT_TIME_FORMAT: &str = "%Y/%m/%d - %H:%M:%S";

/// One row of the feed
#[derive(Debug, Clone)]
pub struct FeedEvent {
    pub action: RecentAction,
    /// When the producer pushed it; `None` for seeded history
    pub arrived: Option<Instant>,
}

impl FeedEvent {
    pub fn is_new(&self, now: Instant) -> bool {
        self.arrived
            .is_some_and(|at| now.saturating_duration_since(at) < NEW_HIGHLIGHT)
    }
}

/// Bounded newest-first event buffer
#[derive(Debug)]
pub struct EventFeed {
    capacity: usize,
    events: VecDeque<FeedEvent>,
    unseen: usize,
    next_id: u64,
    live: bool,
}

pub type SharedFeed = Arc<Mutex<EventFeed>>;

impl EventFeed {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: VecDeque::with_capacity(capacity),
            unseen: 0,
            next_id: 0,
            live: true,
        }
    }

    /// Start from existing history (newest first), trimmed to capacity
    pub fn seeded(capacity: usize, history: &[RecentAction]) -> Self {
        let mut feed = Self::new(capacity);
        feed.events.extend(
            history
                .iter()
                .take(feed.capacity)
                .cloned()
                .map(|action| FeedEvent { action, arrived: None }),
        );
        feed
    }

    pub fn into_shared(self) -> SharedFeed {
        Arc::new(Mutex::new(self))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Newest first
    pub fn events(&self) -> impl Iterator<Item = &FeedEvent> {
        self.events.iter()
    }

    /// Add an event at the front, evicting the oldest when full
    pub fn push(&mut self, action: RecentAction, now: Instant) -> Option<RecentAction> {
        let evicted = if self.events.len() >= self.capacity {
            self.events.pop_back().map(|e| e.action)
        } else {
            None
        };
        self.events.push_front(FeedEvent {
            action,
            arrived: Some(now),
        });
        self.unseen += 1;
        evicted
    }

    /// Events pushed since the counter was last cleared
    pub fn unseen(&self) -> usize {
        self.unseen
    }

    pub fn clear_unseen(&mut self) {
        self.unseen = 0;
    }

    pub fn latest_arrival(&self) -> Option<Instant> {
        self.events.iter().find_map(|e| e.arrived)
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn set_live(&mut self, live: bool) {
        self.live = live;
    }

    pub fn toggle_live(&mut self) -> bool {
        self.live = !self.live;
        self.live
    }

    /// Next id for a generated event (`new-0`, `new-1`, ...)
    pub fn next_id(&mut self) -> String {
        let id = format!("new-{}", self.next_id);
        self.next_id += 1;
        id
    }
}

const DEFAULT_DEVICES: [&str; 10] = [
    "Main Entrance",
    "Server Room",
    "Front Door",
    "Executive Floor",
    "Parking Gate",
    "Data Center",
    "Lobby Turnstile",
    "Meeting Room A",
    "Back Entrance",
    "HR Office",
];

/// Random event source for the demo feed
#[derive(Debug)]
pub struct EventGenerator {
    rng: StdRng,
    user_names: Vec<String>,
    devices: Vec<String>,
}

impl EventGenerator {
    /// Draw names from `user_names`; falls back to "Unknown" when empty
    pub fn new(user_names: Vec<String>) -> Self {
        Self::with_rng(user_names, StdRng::from_entropy())
    }

    pub fn seeded(user_names: Vec<String>, seed: u64) -> Self {
        Self::with_rng(user_names, StdRng::seed_from_u64(seed))
    }

    fn with_rng(user_names: Vec<String>, rng: StdRng) -> Self {
        Self {
            rng,
            user_names,
            devices: DEFAULT_DEVICES.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn generate(&mut self, id: String, at: DateTime<Local>) -> RecentAction {
        let event = *AccessEvent::ALL
            .choose(&mut self.rng)
            .unwrap_or(&AccessEvent::AccessGranted);
        let user_name = self
            .user_names
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string());
        let device = self
            .devices
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default();

        RecentAction {
            id,
            event_time: at.format(EVENT_TIME_FORMAT).to_string(),
            event,
            user_id: self.rng.gen_range(10_000..100_000).to_string(),
            user_name,
            device,
        }
    }
}

/// Background thread pushing generated events into a shared feed.
/// Stops when `stop` is called or the producer is dropped.
pub struct FeedProducer {
    shutdown: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl FeedProducer {
    pub fn spawn(feed: SharedFeed, interval: Duration, mut generator: EventGenerator) -> Self {
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(0);
        let ticker = crossbeam_channel::tick(interval);

        let handle = thread::spawn(move || {
            tracing::debug!(target: "feed", interval_ms = interval.as_millis() as u64, "producer started");
            loop {
                select! {
                    recv(ticker) -> _ => {
                        let mut feed = feed.lock();
                        if feed.is_live() {
                            let id = feed.next_id();
                            let action = generator.generate(id, Local::now());
                            tracing::trace!(target: "feed", event = action.event.label(), device = %action.device, "event generated");
                            feed.push(action, Instant::now());
                        }
                    }
                    // Closed when the producer handle is stopped or dropped.
                    recv(shutdown_rx) -> _ => break,
                }
            }
            tracing::debug!(target: "feed", "producer stopped");
        });

        Self {
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn stop(&mut self) {
        self.shutdown.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for FeedProducer {
    fn drop(&mut self) {
        self.stop();
    }
}
