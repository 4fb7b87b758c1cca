//! Ratatui-backed drawing target for the engine's render hook.
use game_core::render::tile_symbol;
use game_core::{EnemyKind, Glyph, ItemKind, Position, Surface, TileKind};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Styled character grid filled by [`game_core::GameEngine::render`].
#[derive(Clone, Debug)]
pub struct MapSurface {
    width: usize,
    height: usize,
    cells: Vec<(char, Style)>,
}

impl MapSurface {
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            cells: vec![(' ', Style::default()); width * height],
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    fn put(&mut self, position: Position, symbol: char, style: Style) {
        if let Some(index) = self.index(position) {
            self.cells[index] = (symbol, style);
        }
    }

    pub fn symbol_at(&self, position: Position) -> Option<char> {
        self.index(position).map(|index| self.cells[index].0)
    }

    /// One line per map row.
    pub fn into_lines(self) -> Vec<Line<'static>> {
        if self.width == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.width)
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|(symbol, style)| Span::styled(symbol.to_string(), *style))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

impl Surface for MapSurface {
    fn draw_tile(&mut self, position: Position, tile: TileKind) {
        let style = match tile {
            TileKind::Floor => Style::default().fg(Color::DarkGray),
            TileKind::Wall => Style::default().fg(Color::Gray),
        };
        self.put(position, tile_symbol(tile), style);
    }

    fn draw_glyph(&mut self, position: Position, glyph: Glyph) {
        self.put(position, glyph.symbol(), glyph_style(glyph));
    }
}

fn glyph_style(glyph: Glyph) -> Style {
    match glyph {
        Glyph::Player => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Glyph::Enemy(EnemyKind::Orc) => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
        Glyph::Enemy(EnemyKind::Skeleton) => Style::default().fg(Color::White),
        Glyph::Enemy(EnemyKind::Goblin) => Style::default().fg(Color::LightRed),
        Glyph::Item(ItemKind::Gold) => Style::default().fg(Color::LightYellow),
        Glyph::Item(ItemKind::Potion) => Style::default().fg(Color::Magenta),
        Glyph::Item(ItemKind::Treasure) => Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD),
        Glyph::Npc(_) => Style::default().fg(Color::Cyan),
        Glyph::Trap(_) => Style::default().fg(Color::LightMagenta),
    }
}
