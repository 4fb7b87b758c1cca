//! Read-only rendering hook.
//!
//! The engine never draws. [`render`] walks a [`GameState`] and forwards
//! every tile and entity to a host-supplied [`Surface`], bottom layer first.

use std::fmt;

use crate::env::EnemyKind;
use crate::state::{GameState, ItemKind, NpcKind, Position, TileKind, TrapKind};

/// Something drawable standing on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    Player,
    Enemy(EnemyKind),
    Item(ItemKind),
    Npc(NpcKind),
    Trap(TrapKind),
}

impl Glyph {
    /// Single-character form used by text surfaces.
    pub fn symbol(self) -> char {
        match self {
            Glyph::Player => '@',
            Glyph::Enemy(EnemyKind::Goblin) => 'g',
            Glyph::Enemy(EnemyKind::Orc) => 'o',
            Glyph::Enemy(EnemyKind::Skeleton) => 's',
            Glyph::Item(ItemKind::Gold) => '$',
            Glyph::Item(ItemKind::Potion) => '!',
            Glyph::Item(ItemKind::Treasure) => '*',
            Glyph::Npc(NpcKind::Merchant) => 'M',
            Glyph::Npc(NpcKind::Guard) => 'G',
            Glyph::Trap(_) => '^',
        }
    }
}

pub fn tile_symbol(tile: TileKind) -> char {
    match tile {
        TileKind::Floor => '.',
        TileKind::Wall => '#',
    }
}

/// Drawing target supplied by the host.
pub trait Surface {
    fn draw_tile(&mut self, position: Position, tile: TileKind);
    fn draw_glyph(&mut self, position: Position, glyph: Glyph);
}

/// Draws `state` in layer order: tiles, items, traps, NPCs, enemies, player.
pub fn render<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    for (position, tile) in state.grid.positions().zip(state.grid.tiles().iter().copied()) {
        surface.draw_tile(position, tile);
    }

    let entities = &state.entities;
    for item in entities.items.values() {
        surface.draw_glyph(item.position, Glyph::Item(item.kind));
    }
    for trap in entities.traps.values() {
        surface.draw_glyph(trap.position, Glyph::Trap(trap.kind));
    }
    for npc in entities.npcs.values() {
        surface.draw_glyph(npc.position, Glyph::Npc(npc.kind));
    }
    for enemy in entities.enemies.values() {
        surface.draw_glyph(enemy.position, Glyph::Enemy(enemy.kind));
    }
    surface.draw_glyph(state.player.position, Glyph::Player);
}

/// Character-grid surface. Later draws overwrite earlier ones; positions
/// outside the surface are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSurface {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl TextSurface {
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    /// Convenience for rendering a whole state in one call.
    pub fn from_state(state: &GameState) -> Self {
        let mut surface = Self::new(state.grid.width(), state.grid.height());
        render(state, &mut surface);
        surface
    }

    pub fn char_at(&self, position: Position) -> Option<char> {
        self.index(position).map(|index| self.cells[index])
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().collect())
    }

    fn put(&mut self, position: Position, symbol: char) {
        if let Some(index) = self.index(position) {
            self.cells[index] = symbol;
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }
}

impl Surface for TextSurface {
    fn draw_tile(&mut self, position: Position, tile: TileKind) {
        self.put(position, tile_symbol(tile));
    }

    fn draw_glyph(&mut self, position: Position, glyph: Glyph) {
        self.put(position, glyph.symbol());
    }
}

impl fmt::Display for TextSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    struct Recorder(Vec<Glyph>);

    impl Surface for Recorder {
        fn draw_tile(&mut self, _position: Position, _tile: TileKind) {}

        fn draw_glyph(&mut self, _position: Position, glyph: Glyph) {
            self.0.push(glyph);
        }
    }

    fn state() -> GameState {
        let mut state = GameState::new(&GameConfig::default(), 3);
        state.spawn_enemy(EnemyKind::Orc, Position::new(4, 4)).unwrap();
        state
            .spawn_npc("Merchant", NpcKind::Merchant, Position::new(8, 2))
            .unwrap();
        state
            .spawn_item(ItemKind::Treasure, 100, Position::new(4, 4))
            .unwrap();
        state
            .add_trap(TrapKind::Ice, Position::new(6, 6), 20)
            .unwrap();
        state
    }

    #[test]
    fn draws_layers_bottom_up() {
        let mut recorder = Recorder(Vec::new());
        render(&state(), &mut recorder);
        assert_eq!(
            recorder.0,
            [
                Glyph::Item(ItemKind::Treasure),
                Glyph::Trap(TrapKind::Ice),
                Glyph::Npc(NpcKind::Merchant),
                Glyph::Enemy(EnemyKind::Orc),
                Glyph::Player,
            ]
        );
    }

    #[test]
    fn text_surface_shows_topmost_glyph() {
        let surface = TextSurface::from_state(&state());
        assert_eq!(surface.char_at(Position::new(0, 0)), Some('#'));
        assert_eq!(surface.char_at(Position::new(1, 1)), Some('.'));
        assert_eq!(surface.char_at(Position::new(4, 4)), Some('o'));
        assert_eq!(surface.char_at(Position::new(8, 8)), Some('@'));
        assert_eq!(surface.char_at(Position::new(6, 6)), Some('^'));
        assert_eq!(surface.rows().count(), 16);
    }
}
