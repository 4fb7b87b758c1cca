//! Frame layout: map and stats side by side, the message log below,
//! a one-line footer with key hints.
use game_core::progression::progress;
use game_core::{GameState, MessageCategory, MessageEntry, TurnPhase};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListDirection, ListItem, Paragraph},
};

use crate::app::App;
use crate::presentation::MapSurface;

const STATS_PANEL_WIDTH: u16 = 28;
const KEY_HINTS: &str =
    "arrows/hjkl move  e end turn  p potion  t trap  s save  r restore  > next level  n new run  q quit";

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(app.ui().message_panel_height),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let state = app.engine().state();
    let map_width = u16::try_from(state.grid.width())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(map_width),
            Constraint::Length(STATS_PANEL_WIDTH),
            Constraint::Min(0),
        ])
        .split(chunks[0]);

    render_map(frame, columns[0], app);
    render_stats(frame, columns[1], app);
    render_messages(frame, chunks[1], state, app.ui().visible_messages());
    render_footer(frame, chunks[2], app);
}

fn render_map(frame: &mut Frame, area: Rect, app: &App) {
    let grid = &app.engine().state().grid;
    let mut surface = MapSurface::new(grid.width(), grid.height());
    app.engine().render(&mut surface);

    let title = if app.engine().is_defeated() {
        "Dungeon (defeated)"
    } else {
        "Dungeon"
    };
    let map = Paragraph::new(surface.into_lines())
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(map, area);
}

fn render_stats(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.engine().state();
    let player = &state.player;
    let level = progress(app.engine().config(), player.experience);

    let mut lines = vec![
        stat_line(
            "HP",
            format!("{}/{}", player.health.current, player.health.maximum),
            health_color(player.health.current, player.health.maximum),
        ),
        stat_line(
            "MP",
            format!("{}/{}", player.mana.current, player.mana.maximum),
            Color::Blue,
        ),
        stat_line("Level", player.level.to_string(), Color::Cyan),
        stat_line(
            "EXP",
            format!("{} ({}/{})", player.experience, level.into_level, level.level_cost),
            Color::Green,
        ),
        stat_line("Gold", player.gold.to_string(), Color::Yellow),
        stat_line(
            "Turn",
            format!("{} ({})", state.turn.turn, state.turn.phase),
            phase_color(state.turn.phase),
        ),
        stat_line(
            "Enemies",
            state.entities.enemies.len().to_string(),
            Color::Red,
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Inventory",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    lines.extend(
        player
            .inventory
            .items
            .iter()
            .map(|slot| Line::from(format!("  {} x{}", slot.name, slot.count))),
    );

    let stats = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Player"));
    frame.render_widget(stats, area);
}

/// Newest entry at the bottom.
fn render_messages(frame: &mut Frame, area: Rect, state: &GameState, visible: usize) {
    let items: Vec<ListItem> = state
        .log
        .recent(visible)
        .map(|entry| ListItem::new(entry.text.clone()).style(message_style(entry)))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Messages"))
        .direction(ListDirection::BottomToTop);
    frame.render_widget(list, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = match app.status() {
        Some(status) => Line::from(Span::styled(
            status.to_owned(),
            Style::default().fg(Color::LightCyan),
        )),
        None => Line::from(Span::styled(
            KEY_HINTS,
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn stat_line(label: &'static str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{label:<8}")),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn health_color(current: u32, maximum: u32) -> Color {
    match current.saturating_mul(4) {
        value if value <= maximum => Color::Red,
        value if value <= maximum.saturating_mul(2) => Color::Yellow,
        _ => Color::Green,
    }
}

fn phase_color(phase: TurnPhase) -> Color {
    match phase {
        TurnPhase::Player => Color::White,
        TurnPhase::Resolution => Color::Yellow,
        TurnPhase::Defeated => Color::Red,
    }
}

fn message_style(entry: &MessageEntry) -> Style {
    let color = match entry.category {
        MessageCategory::Normal => Color::Gray,
        MessageCategory::Action => Color::White,
        MessageCategory::Info => Color::LightBlue,
        MessageCategory::Combat => Color::LightRed,
        MessageCategory::Success => Color::LightGreen,
        MessageCategory::Error => Color::Red,
    };
    Style::default().fg(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_color_thresholds() {
        assert_eq!(health_color(100, 100), Color::Green);
        assert_eq!(health_color(50, 100), Color::Yellow);
        assert_eq!(health_color(25, 100), Color::Red);
        assert_eq!(health_color(0, 0), Color::Red);
    }
}
