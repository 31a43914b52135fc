use crate::model::{AccessEvent, Category};
use crate::nav::Route;
use ratatui::style::Color;

pub const HEADER_BG: Color = Color::Rgb(0, 95, 135);
pub const SELECTED_BG: Color = Color::Rgb(60, 60, 80);
pub const STRIPE_BG: Color = Color::Rgb(25, 25, 35);
pub const NEW_EVENT_BG: Color = Color::Rgb(20, 60, 40);
pub const PANEL_BG: Color = Color::Rgb(30, 30, 40);

pub fn color_for_category(category: Category) -> Color {
    match category {
        Category::User => Color::Blue,
        Category::Device => Color::Cyan,
        Category::UserGroup => Color::Magenta,
        Category::CardTemplate => Color::Rgb(255, 165, 0),
    }
}

pub fn icon_for_category(category: Category) -> &'static str {
    match category {
        Category::User => "\u{1F464}",         // bust in silhouette
        Category::Device => "\u{1F5A5}\u{FE0F}", // desktop computer
        Category::UserGroup => "\u{1F465}",    // busts in silhouette
        Category::CardTemplate => "\u{1F4B3}", // credit card
    }
}

pub fn icon_for_route(route: Route) -> &'static str {
    match route {
        Route::Dashboard => "\u{1F4CA}", // bar chart
        Route::Users => icon_for_category(Category::User),
        Route::Devices => icon_for_category(Category::Device),
        Route::UserGroups => icon_for_category(Category::UserGroup),
        Route::CardTemplates => icon_for_category(Category::CardTemplate),
    }
}

/// Color for a status, type or event badge cell
pub fn color_for_badge(value: &str) -> Color {
    if let Some(event) = AccessEvent::ALL
        .iter()
        .find(|e| e.label().eq_ignore_ascii_case(value))
    {
        return color_for_event(*event);
    }
    match value.to_ascii_lowercase().as_str() {
        "active" | "online" | "connected" => Color::Green,
        "inactive" | "offline" | "disconnected" | "revoked" => Color::Red,
        "pending" | "suspended" | "maintenance" | "expired" => Color::Yellow,
        "visitor" | "guest" | "contractor" | "temporary" => Color::LightMagenta,
        "employee" | "permanent" => Color::LightBlue,
        "admin" => Color::LightRed,
        "" => Color::DarkGray,
        _ => Color::Gray,
    }
}

pub fn color_for_event(event: AccessEvent) -> Color {
    match event {
        AccessEvent::UserActivated | AccessEvent::AccessGranted => Color::Green,
        AccessEvent::DoorOpened => Color::Cyan,
        AccessEvent::UserSuspended => Color::Yellow,
        AccessEvent::UserRevoked | AccessEvent::FailedAttempt => Color::Red,
    }
}
