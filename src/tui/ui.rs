use crate::feed::FeedEvent;
use crate::nav::Route;
use crate::search::{Badge, PalettePhase};
use crate::tui::app::{App, HitMap};
use crate::tui::colors;
use crate::tui::table::{CellKind, TableView};
use chrono::Local;
use indicatif::HumanDuration;
use ratatui::prelude::*;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, Paragraph, Row, Table};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

const SIDEBAR_WIDTH: u16 = 22;
const SEARCH_PREFIX: &str = " \u{1F50D} ";
const PALETTE_MAX_WIDTH: u16 = 64;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let now = Instant::now();
    app.hits = HitMap::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with search
            Constraint::Min(5),    // Sidebar + page
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(chunks[1]);

    draw_sidebar(frame, app, body[0]);
    match app.route() {
        Route::Dashboard => draw_dashboard(frame, app, body[1], now),
        _ => draw_entity_page(frame, app, body[1]),
    }
    draw_status_bar(frame, app, chunks[2]);

    // Overlay last so it sits above the page
    draw_palette(frame, app, area);

    if app.palette.is_focused() {
        let input = app.hits.search_input;
        let typed = &app.palette.query()[..app.palette.cursor_pos()];
        let cursor_x = input.x + 1 + SEARCH_PREFIX.width() as u16 + typed.width() as u16;
        let cursor_x = cursor_x.min(input.right().saturating_sub(2));
        frame.set_cursor_position(Position::new(cursor_x, input.y + 1));
    }
}

fn draw_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH),
            Constraint::Min(20),
            Constraint::Length(18),
        ])
        .split(area);

    let brand = Paragraph::new(Line::from(vec![
        Span::styled(" \u{1F6E1}\u{FE0F} ", Style::default().fg(Color::Cyan)),
        Span::styled(
            "Sentinel",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(brand, parts[0]);

    let focused = app.palette.is_focused();
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search ")
        .title_bottom(Line::from(" Ctrl+K ").right_aligned());

    let text = if app.palette.query().is_empty() && !focused {
        Line::from(vec![
            Span::raw(SEARCH_PREFIX),
            Span::styled(
                "Search users, devices, groups...",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        let mut spans = vec![Span::raw(SEARCH_PREFIX), Span::raw(app.palette.query().to_string())];
        if app.palette.is_search_pending() {
            spans.push(Span::styled(" \u{2026}", Style::default().fg(Color::DarkGray)));
        }
        Line::from(spans)
    };
    frame.render_widget(
        Paragraph::new(text).block(block).style(Style::default().fg(Color::White)),
        parts[1],
    );
    app.hits.search_input = parts[1];

    let date = Local::now().format("%a %d %b %Y").to_string();
    frame.render_widget(
        Paragraph::new(date)
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(Color::DarkGray))),
        parts[2],
    );
}

fn draw_sidebar(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let current = app.route();
    for (i, route) in Route::ALL.iter().enumerate() {
        let y = inner.y + 1 + i as u16;
        if y >= inner.bottom() {
            break;
        }
        let item_area = Rect::new(inner.x, y, inner.width, 1);
        let style = if *route == current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let text = format!(" {} {} {}", i + 1, colors::icon_for_route(*route), route.title());
        frame.render_widget(Paragraph::new(text).style(style), item_area);
        app.hits.sidebar.push((item_area, *route));
    }
}

// --- Pages ---

fn draw_dashboard(frame: &mut Frame, app: &mut App, area: Rect, now: Instant) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Stat cards
            Constraint::Length(10), // Usage chart
            Constraint::Min(5),     // Recent events
        ])
        .split(area);

    draw_stat_cards(frame, app, rows[0]);
    draw_usage_chart(frame, app, rows[1]);

    let status = app.feed_status;
    let mut title = vec![Span::styled(
        " Recent Events ",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    if status.live {
        title.push(Span::styled("\u{25CF} LIVE ", Style::default().fg(Color::Green)));
    } else {
        title.push(Span::styled("\u{23F8} PAUSED ", Style::default().fg(Color::Yellow)));
    }
    if status.unseen > 0 {
        title.push(Span::styled(
            format!("{} new ", status.unseen),
            Style::default().fg(Color::Black).bg(Color::Green),
        ));
    }
    if let Some(elapsed) = app.since_last_event(now) {
        title.push(Span::styled(
            format!(" last event {} ago ", HumanDuration(elapsed)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let events = &app.events;
    let body = draw_table_view(
        frame,
        &mut app.pages.events,
        events,
        rows[2],
        Line::from(title),
        |e: &FeedEvent| e.is_new(now),
    );
    app.hits.table_body = body;
}

fn draw_stat_cards(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.data.stats;
    let cards = [
        (
            "Attendance",
            format!("{}%", stats.attendance_percentage),
            format!("{} users today", stats.users_today),
            Color::Green,
        ),
        (
            "Active Users",
            stats.active_users.to_string(),
            format!("{} pending", stats.pending_users),
            Color::Blue,
        ),
        (
            "Devices",
            stats.devices.to_string(),
            format!("{} device groups", stats.device_groups),
            Color::Cyan,
        ),
        (
            "Credit Status",
            stats.credits.to_string(),
            format!("{} this month", stats.credits_monthly),
            Color::Rgb(255, 165, 0),
        ),
    ];

    draw_cards(frame, area, &cards);
}

/// Summary strip for the devices page
fn draw_device_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary = app.data.device_summary();
    let cards = [
        (
            "Total Devices",
            summary.total.to_string(),
            format!("{} device groups", app.data.device_groups.len()),
            Color::White,
        ),
        ("Online", summary.online.to_string(), "connected".to_string(), Color::Green),
        ("Offline", summary.offline.to_string(), "not responding".to_string(), Color::Red),
        (
            "Maintenance",
            summary.maintenance.to_string(),
            "under service".to_string(),
            Color::Yellow,
        ),
    ];
    draw_cards(frame, area, &cards);
}

/// A row of equal-width cards: title, big value, one detail line
fn draw_cards(frame: &mut Frame, area: Rect, cards: &[(&str, String, String, Color)]) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);

    for ((title, value, detail, color), column) in cards.iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", title));
        let text = vec![
            Line::from(Span::styled(
                value.as_str(),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(detail.as_str(), Style::default().fg(Color::Gray))),
        ];
        frame.render_widget(Paragraph::new(text).block(block), *column);
    }
}

fn draw_usage_chart(frame: &mut Frame, app: &App, area: Rect) {
    let bars: Vec<Bar> = app
        .data
        .usage
        .iter()
        .map(|p| {
            Bar::default()
                .value(p.value)
                .label(Line::from(format!("{:02}", p.hour)))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Access by Hour "),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(3)
        .bar_gap(1)
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));

    frame.render_widget(chart, area);
}

fn draw_entity_page(frame: &mut Frame, app: &mut App, area: Rect) {
    let area = if app.route() == Route::Devices {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(4)])
            .split(area);
        draw_device_summary(frame, app, split[0]);
        split[1]
    } else {
        area
    };
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let data = app.data.clone();
    let route = app.route();
    let (filter, focused, columns) = match route {
        Route::Users => filter_state(&app.pages.users),
        Route::Devices => filter_state(&app.pages.devices),
        Route::UserGroups => filter_state(&app.pages.user_groups),
        Route::CardTemplates => filter_state(&app.pages.card_templates),
        Route::Dashboard => return,
    };
    draw_filter_line(frame, parts[0], &filter, focused, columns);

    let title = |view_title: &str, shown: usize, total: usize| {
        Line::from(Span::styled(
            format!(" {} ({}/{}) ", view_title, shown, total),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
    };

    let body = match route {
        Route::Users => {
            let t = title("Users", app.pages.users.visible().len(), data.users.len());
            draw_table_view(frame, &mut app.pages.users, &data.users, parts[1], t, |_| false)
        }
        Route::Devices => {
            let t = title("Devices", app.pages.devices.visible().len(), data.devices.len());
            draw_table_view(frame, &mut app.pages.devices, &data.devices, parts[1], t, |_| false)
        }
        Route::UserGroups => {
            let t = title(
                "User Groups",
                app.pages.user_groups.visible().len(),
                data.user_groups.len(),
            );
            draw_table_view(
                frame,
                &mut app.pages.user_groups,
                &data.user_groups,
                parts[1],
                t,
                |_| false,
            )
        }
        Route::CardTemplates => {
            let t = title(
                "Card Templates",
                app.pages.card_templates.visible().len(),
                data.card_templates.len(),
            );
            draw_table_view(
                frame,
                &mut app.pages.card_templates,
                &data.card_templates,
                parts[1],
                t,
                |_| false,
            )
        }
        Route::Dashboard => return,
    };
    app.hits.table_body = body;

    if focused {
        let x = parts[0].x + " Filter: ".width() as u16 + filter.width() as u16;
        frame.set_cursor_position(Position::new(x.min(parts[0].right().saturating_sub(1)), parts[0].y));
    }
}

fn filter_state<R>(view: &TableView<R>) -> (String, bool, usize) {
    (view.filter().to_string(), view.filter_focused, view.columns.len())
}

fn draw_filter_line(frame: &mut Frame, area: Rect, filter: &str, focused: bool, columns: usize) {
    let line = if focused || !filter.is_empty() {
        let style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        Line::from(vec![
            Span::styled(" Filter: ", style.add_modifier(Modifier::BOLD)),
            Span::styled(filter.to_string(), Style::default().fg(Color::White)),
        ])
    } else {
        Line::from(Span::styled(
            format!(" f:Filter  F1-F{}:Sort  \u{2191}\u{2193}:Select", columns),
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw a page table; returns the area holding its body rows
fn draw_table_view<R>(
    frame: &mut Frame,
    view: &mut TableView<R>,
    rows: &[R],
    area: Rect,
    title: Line,
    highlight: impl Fn(&R) -> bool,
) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title);
    let inner = block.inner(area);

    // Header takes the first inner line
    let body = Rect::new(
        inner.x,
        inner.y.saturating_add(1),
        inner.width,
        inner.height.saturating_sub(1),
    );
    view.state.visible_rows = body.height as usize;
    view.state.clamp(view.visible().len());

    let sort = view.sort();
    let header = Row::new(view.columns.iter().enumerate().map(|(i, col)| {
        let text = match sort {
            Some((c, order)) if c == i => format!("{}{}", col.header, order.indicator()),
            _ => col.header.to_string(),
        };
        Cell::from(text).style(
            Style::default()
                .fg(Color::White)
                .bg(colors::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .height(1);

    let start = view.state.scroll_offset;
    let end = (start + body.height as usize).min(view.visible().len());

    let table_rows: Vec<Row> = (start..end)
        .enumerate()
        .filter_map(|(visual_idx, logical_idx)| {
            let record = rows.get(*view.visible().get(logical_idx)?)?;
            let is_selected = view.state.selected == Some(logical_idx);

            // Alternating row background
            let bg = if is_selected {
                colors::SELECTED_BG
            } else if highlight(record) {
                colors::NEW_EVENT_BG
            } else if visual_idx % 2 == 1 {
                colors::STRIPE_BG
            } else {
                Color::Reset
            };

            let cells = view
                .columns
                .iter()
                .map(|col| render_cell((col.value)(record), col.kind, is_selected));
            Some(Row::new(cells).style(Style::default().bg(bg)))
        })
        .collect();

    let widths: Vec<Constraint> = view
        .columns
        .iter()
        .map(|c| {
            if c.width == 0 {
                Constraint::Fill(1)
            } else {
                Constraint::Length(c.width)
            }
        })
        .collect();

    let empty = table_rows.is_empty();
    let table = Table::new(table_rows, widths).header(header).block(block);
    frame.render_widget(table, area);

    if empty && body.height > 0 {
        let message = if view.filter().is_empty() {
            "Nothing to show".to_string()
        } else {
            format!("No rows match \"{}\"", view.filter())
        };
        frame.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            Rect::new(body.x, body.y, body.width, 1),
        );
    }

    body
}

fn render_cell(text: String, kind: CellKind, selected: bool) -> Cell<'static> {
    let emphasis = if selected { Modifier::BOLD } else { Modifier::empty() };
    match kind {
        CellKind::Plain => Cell::from(text).style(Style::default().fg(Color::White).add_modifier(emphasis)),
        CellKind::Strong => Cell::from(text).style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        CellKind::Mono => Cell::from(text).style(Style::default().fg(Color::LightCyan).add_modifier(emphasis)),
        CellKind::Badge => {
            let color = colors::color_for_badge(&text);
            Cell::from(text).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        }
        CellKind::Count => Cell::from(Line::from(text).alignment(Alignment::Right))
            .style(Style::default().fg(Color::Green).add_modifier(emphasis)),
        CellKind::Muted => Cell::from(text).style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC)),
    }
}

// --- Search palette ---

fn draw_palette(frame: &mut Frame, app: &mut App, area: Rect) {
    let phase = app.palette.phase();
    if matches!(phase, PalettePhase::Closed | PalettePhase::OpenEmpty) {
        return;
    }

    let input = app.hits.search_input;
    let width = input.width.clamp(30, PALETTE_MAX_WIDTH).min(area.width);
    let x = input.x.min(area.right().saturating_sub(width));
    let y = input.bottom();

    // (line, result index) pairs; headers and hints have no index
    let mut lines: Vec<(Line, Option<usize>)> = Vec::new();
    if phase == PalettePhase::OpenNoMatches {
        lines.push((Line::from(""), None));
        lines.push((
            Line::from(format!("No results found for \"{}\"", app.palette.query().trim()))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::White)),
            None,
        ));
        lines.push((
            Line::from("Try searching for users, devices, or groups")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            None,
        ));
        lines.push((Line::from(""), None));
    } else {
        let selected = app.palette.selected();
        for group in app.palette.groups() {
            lines.push((
                Line::from(Span::styled(
                    format!(" {}", group.category.label().to_uppercase()),
                    Style::default()
                        .fg(colors::color_for_category(group.category))
                        .add_modifier(Modifier::BOLD),
                )),
                None,
            ));
            for (index, result) in group.items {
                let badge = match &result.badge {
                    Badge::Avatar { initials, .. } => Span::styled(
                        format!(" {:<2} ", initials),
                        Style::default()
                            .fg(Color::Black)
                            .bg(colors::color_for_category(result.category)),
                    ),
                    Badge::Icon { category } => Span::styled(
                        format!(" {} ", colors::icon_for_category(*category)),
                        Style::default().fg(colors::color_for_category(*category)),
                    ),
                };
                let mut style = Style::default();
                if index == selected {
                    style = style.bg(colors::SELECTED_BG);
                }
                let line = Line::from(vec![
                    Span::raw("  "),
                    badge,
                    Span::raw(" "),
                    Span::styled(
                        result.title.clone(),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", result.subtitle),
                        Style::default().fg(Color::Gray),
                    ),
                ])
                .style(style);
                lines.push((line, Some(index)));
            }
        }
        lines.push((
            Line::from(" \u{2191}\u{2193} navigate  \u{21B5} open  esc close")
                .style(Style::default().fg(Color::DarkGray)),
            None,
        ));
    }

    let height = (lines.len() as u16 + 2).min(area.bottom().saturating_sub(y));
    if height < 3 {
        return;
    }
    let panel = Rect::new(x, y, width, height);
    frame.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(colors::PANEL_BG));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);
    app.hits.palette_panel = Some(panel);

    let selected = app.palette.selected();
    for (i, (line, index)) in lines.into_iter().enumerate() {
        if i as u16 >= inner.height {
            break;
        }
        let line_area = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
        frame.render_widget(Paragraph::new(line), line_area);

        if let Some(index) = index {
            if index == selected && line_area.width > 2 {
                frame.render_widget(
                    Paragraph::new("\u{203A} ").style(
                        Style::default()
                            .fg(Color::Cyan)
                            .bg(colors::SELECTED_BG)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Rect::new(line_area.right() - 2, line_area.y, 2, 1),
                );
            }
            app.hits.palette_rows.push((line_area, index));
        }
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = format!(
        " {} | {} users | {} devices | {} groups | {} templates",
        app.status_message,
        app.data.users.len(),
        app.data.devices.len(),
        app.data.user_groups.len(),
        app.data.card_templates.len(),
    );

    let right_text = match app.route() {
        Route::Dashboard => " /:Search  Tab:Page  Alt+P:Pause  Alt+C:Clear new  Ctrl+Q:Quit ",
        _ => " /:Search  Tab:Page  Ctrl+F:Filter  Bksp:Back  Ctrl+Q:Quit ",
    };

    // Build the status line: left-aligned text + padding + right-aligned text
    let available_width = area.width as usize;
    let left_len = left_text.width();
    let right_len = right_text.width();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        // Not enough space, just show left text
        format!("{:width$}", left_text, width = available_width)
    };

    let status = Paragraph::new(status_str)
        .style(Style::default().fg(Color::White).bg(colors::HEADER_BG));

    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::model::Dataset;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn app() -> App {
        let config = AppConfig {
            feed_interval_secs: 3600,
            ..Default::default()
        };
        App::new(config, Arc::new(Dataset::sample()))
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn dashboard_renders_cards_and_feed() {
        let mut app = app();
        let screen = render(&mut app);
        assert!(screen.contains("Attendance"));
        assert!(screen.contains("Recent Events"));
        assert!(screen.contains("LIVE"));
        assert_eq!(app.hits.sidebar.len(), Route::ALL.len());
    }

    #[test]
    fn palette_rows_are_recorded_for_hit_testing() {
        let mut app = app();
        let t0 = Instant::now();
        app.palette.focus();
        app.palette.set_query("e", t0);
        app.on_tick(t0 + app.config.debounce());
        let screen = render(&mut app);

        assert!(screen.contains("USERS"));
        assert!(screen.contains("DEVICES"));
        assert_eq!(app.hits.palette_rows.len(), app.palette.results().len());
        assert!(app.hits.palette_panel.is_some());
    }

    #[test]
    fn no_matches_message_is_shown() {
        let mut app = app();
        let t0 = Instant::now();
        app.palette.focus();
        app.palette.set_query("112233", t0);
        app.on_tick(t0 + app.config.debounce());
        let screen = render(&mut app);
        assert!(screen.contains("No results found for \"112233\""));
        assert!(app.hits.palette_rows.is_empty());
    }

    #[test]
    fn devices_page_shows_status_summary() {
        let mut app = app();
        app.handle_key(
            crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char('3'),
                crossterm::event::KeyModifiers::ALT,
            ),
            Instant::now(),
        );
        assert_eq!(app.route(), Route::Devices);
        let screen = render(&mut app);
        assert!(screen.contains(" Total Devices "));
        assert!(screen.contains("Devices (10/10)"));
    }

    #[test]
    fn device_summary_counts_sample_statuses() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 4)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_device_summary(frame, &app, area);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let row = |y: u16| -> String { (0..80).map(|x| buffer[(x, y)].symbol()).collect() };

        // Sample site: ten devices, eight online, one offline, one in service.
        let values: Vec<String> = row(1)
            .split(|c: char| !c.is_ascii_digit())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        assert_eq!(values, vec!["10", "8", "1", "1"]);
        assert!(row(0).contains("Online"));
        assert!(row(2).contains("8 device groups"));
    }

    #[test]
    fn other_pages_have_no_device_summary() {
        let mut app = app();
        let screen = render(&mut app);
        assert!(!screen.contains("Total Devices"));
    }

    #[test]
    fn open_empty_draws_no_panel() {
        let mut app = app();
        app.palette.focus();
        render(&mut app);
        assert!(app.hits.palette_panel.is_none());
    }

    #[test]
    fn entity_page_shows_counts_and_records_body() {
        let mut app = app();
        app.handle_key(
            crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char('2'),
                crossterm::event::KeyModifiers::ALT,
            ),
            Instant::now(),
        );
        let screen = render(&mut app);
        let expected = format!("Users ({}/{})", app.data.users.len(), app.data.users.len());
        assert!(screen.contains(&expected));
        assert!(app.hits.table_body.height > 0);
    }
}
