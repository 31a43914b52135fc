//! Column schemas for every page table, and the per-page table state.

use crate::feed::FeedEvent;
use crate::model::{CardTemplate, Dataset, Device, User, UserGroup};
use crate::nav::Route;
use crate::tui::table::{CellKind, Column, TableState, TableView};
use crossterm::event::KeyEvent;

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

pub fn user_columns() -> Vec<Column<User>> {
    vec![
        Column::new("Type", 10, |u: &User| u.user_type.clone(), CellKind::Badge),
        Column::new("Name", 0, |u: &User| u.name.clone(), CellKind::Strong),
        Column::new("ID", 8, |u: &User| u.visible_id.clone(), CellKind::Mono),
        Column::new("Credential", 12, |u: &User| u.credential_type.clone(), CellKind::Plain),
        Column::new(
            "Valid Period",
            24,
            |u: &User| format!("{} - {}", u.valid_period_start, u.valid_period_end),
            CellKind::Muted,
        ),
        Column::new("Status", 10, |u: &User| u.status.clone(), CellKind::Badge),
        Column::new("Group", 12, |u: &User| u.user_group.clone(), CellKind::Plain),
        Column::new("Access", 10, |u: &User| u.access_level.clone(), CellKind::Plain),
        Column::new("Floor", 8, |u: &User| u.floor_level.clone(), CellKind::Plain),
    ]
}

pub fn device_columns() -> Vec<Column<Device>> {
    vec![
        Column::new("Name", 0, |d: &Device| d.name.clone(), CellKind::Strong),
        Column::new("Type", 14, |d: &Device| d.device_type.clone(), CellKind::Plain),
        Column::new("Model", 12, |d: &Device| d.model.clone(), CellKind::Plain),
        Column::new("Serial", 14, |d: &Device| d.serial_number.clone(), CellKind::Mono),
        Column::new("Location", 14, |d: &Device| d.location.clone(), CellKind::Plain),
        Column::new("Floor", 6, |d: &Device| d.floor.clone(), CellKind::Plain),
        Column::new(
            "IP Address",
            15,
            |d: &Device| or_dash(d.ip_address.as_deref().unwrap_or_default()),
            CellKind::Mono,
        ),
        Column::new("Firmware", 9, |d: &Device| d.firmware_version.clone(), CellKind::Muted),
        Column::new("Last Sync", 20, |d: &Device| d.last_sync.clone(), CellKind::Muted),
        Column::new("Status", 12, |d: &Device| d.status.clone(), CellKind::Badge),
        Column::new("Group", 12, |d: &Device| d.device_group.clone(), CellKind::Plain),
    ]
}

pub fn user_group_columns() -> Vec<Column<UserGroup>> {
    vec![
        Column::new("Name", 18, |g: &UserGroup| g.name.clone(), CellKind::Strong),
        Column::new(
            "Description",
            0,
            |g: &UserGroup| or_dash(g.description.as_deref().unwrap_or_default()),
            CellKind::Muted,
        ),
        Column::new("Members", 8, |g: &UserGroup| g.member_count.to_string(), CellKind::Count),
        Column::new("Access", 14, |g: &UserGroup| g.access_level.clone(), CellKind::Plain),
        Column::new("Created", 12, |g: &UserGroup| g.created_at.clone(), CellKind::Muted),
        Column::new("Status", 10, |g: &UserGroup| g.status.clone(), CellKind::Badge),
    ]
}

pub fn card_template_columns() -> Vec<Column<CardTemplate>> {
    vec![
        Column::new("Name", 20, |t: &CardTemplate| t.name.clone(), CellKind::Strong),
        Column::new(
            "Description",
            0,
            |t: &CardTemplate| or_dash(t.description.as_deref().unwrap_or_default()),
            CellKind::Muted,
        ),
        Column::new("Type", 10, |t: &CardTemplate| t.card_type.clone(), CellKind::Badge),
        Column::new("Validity", 10, |t: &CardTemplate| t.validity_period.clone(), CellKind::Plain),
        Column::new(
            "Zones",
            24,
            |t: &CardTemplate| t.access_zones.join(", "),
            CellKind::Plain,
        ),
        Column::new("Used", 6, |t: &CardTemplate| t.usage_count.to_string(), CellKind::Count),
        Column::new("Created", 12, |t: &CardTemplate| t.created_at.clone(), CellKind::Muted),
        Column::new("Status", 10, |t: &CardTemplate| t.status.clone(), CellKind::Badge),
    ]
}

pub fn event_columns() -> Vec<Column<FeedEvent>> {
    vec![
        Column::new("Time", 21, |e: &FeedEvent| e.action.event_time.clone(), CellKind::Mono),
        Column::new("Event", 16, |e: &FeedEvent| e.action.event.label().to_string(), CellKind::Badge),
        Column::new("User ID", 8, |e: &FeedEvent| e.action.user_id.clone(), CellKind::Mono),
        Column::new("User", 0, |e: &FeedEvent| e.action.user_name.clone(), CellKind::Strong),
        Column::new("Device", 18, |e: &FeedEvent| e.action.device.clone(), CellKind::Plain),
    ]
}

/// One table per page
pub struct Pages {
    pub users: TableView<User>,
    pub devices: TableView<Device>,
    pub user_groups: TableView<UserGroup>,
    pub card_templates: TableView<CardTemplate>,
    /// Recent events on the dashboard
    pub events: TableView<FeedEvent>,
}

impl Pages {
    pub fn new(data: &Dataset, events: &[FeedEvent]) -> Self {
        let mut pages = Self {
            users: TableView::new("Users", user_columns()),
            devices: TableView::new("Devices", device_columns()),
            user_groups: TableView::new("User Groups", user_group_columns()),
            card_templates: TableView::new("Card Templates", card_template_columns()),
            events: TableView::new("Recent Events", event_columns()),
        };
        pages.users.refresh(&data.users);
        pages.devices.refresh(&data.devices);
        pages.user_groups.refresh(&data.user_groups);
        pages.card_templates.refresh(&data.card_templates);
        pages.events.refresh(events);
        pages
    }

    /// True while the page's filter input has the keyboard
    pub fn filter_focused(&self, route: Route) -> bool {
        match route {
            Route::Dashboard => self.events.filter_focused,
            Route::Users => self.users.filter_focused,
            Route::Devices => self.devices.filter_focused,
            Route::UserGroups => self.user_groups.filter_focused,
            Route::CardTemplates => self.card_templates.filter_focused,
        }
    }

    /// Release every page filter
    pub fn blur_filters(&mut self) {
        self.users.filter_focused = false;
        self.devices.filter_focused = false;
        self.user_groups.filter_focused = false;
        self.card_templates.filter_focused = false;
        self.events.filter_focused = false;
    }

    pub fn handle_key(
        &mut self,
        route: Route,
        key: KeyEvent,
        data: &Dataset,
        events: &[FeedEvent],
    ) -> bool {
        match route {
            Route::Dashboard => self.events.handle_key(key, events),
            Route::Users => self.users.handle_key(key, &data.users),
            Route::Devices => self.devices.handle_key(key, &data.devices),
            Route::UserGroups => self.user_groups.handle_key(key, &data.user_groups),
            Route::CardTemplates => self.card_templates.handle_key(key, &data.card_templates),
        }
    }

    /// Selection state and visible row count of one page
    fn table_state(&mut self, route: Route) -> (&mut TableState, usize) {
        match route {
            Route::Dashboard => self.events.cursor(),
            Route::Users => self.users.cursor(),
            Route::Devices => self.devices.cursor(),
            Route::UserGroups => self.user_groups.cursor(),
            Route::CardTemplates => self.card_templates.cursor(),
        }
    }

    /// Move the selection one row (mouse wheel)
    pub fn scroll(&mut self, route: Route, down: bool) {
        let (state, total) = self.table_state(route);
        if down {
            state.select_next(total);
        } else {
            state.select_prev();
        }
    }

    /// Select the `offset`-th row currently on screen
    pub fn click_row(&mut self, route: Route, offset: usize) {
        let (state, total) = self.table_state(route);
        let index = state.scroll_offset + offset;
        if index < total {
            state.selected = Some(index);
        }
    }

    /// Tell a page how many body rows fit on screen
    pub fn set_visible_rows(&mut self, route: Route, rows: usize) {
        self.table_state(route).0.visible_rows = rows;
    }
}
