// Letter board: the tiles the player picks from and the slots they fill.
// One layout per frame serves both rendering and pointer hit-testing.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

pub const TILE_WIDTH: u16 = 5;
pub const TILE_HEIGHT: u16 = 3;
pub const MAX_TILES_PER_ROW: u16 = 13;
const MIN_SLOT_WIDTH: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCommand {
    Place { slot: usize, letter: char },
    Clear { slot: usize },
}

/// A tile being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drag {
    pub letter: char,
    pub hover_slot: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    pub header: Rect,
    pub tiles: Vec<Rect>,
    pub slots: Vec<Rect>,
    pub result: Rect,
    pub legend: Rect,
}

impl BoardLayout {
    pub fn compute(area: Rect, tile_count: usize, slot_count: usize) -> Self {
        let per_row = (area.width.saturating_sub(2) / TILE_WIDTH).clamp(1, MAX_TILES_PER_ROW);
        let tile_rows = (tile_count as u16).div_ceil(per_row);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),                        // score and round
                Constraint::Length(tile_rows * TILE_HEIGHT),  // tiles
                Constraint::Length(1),                        // padding
                Constraint::Length(TILE_HEIGHT),              // slots
                Constraint::Length(2),                        // result
                Constraint::Min(0),
                Constraint::Length(2),                        // legend
            ])
            .split(area);

        Self {
            header: chunks[0],
            tiles: tile_rects(chunks[1], tile_count, per_row),
            slots: slot_rects(chunks[3], slot_count),
            result: chunks[4],
            legend: chunks[6],
        }
    }

    pub fn tile_at(&self, column: u16, row: u16) -> Option<usize> {
        hit(&self.tiles, column, row)
    }

    pub fn slot_at(&self, column: u16, row: u16) -> Option<usize> {
        hit(&self.slots, column, row)
    }
}

fn hit(rects: &[Rect], column: u16, row: u16) -> Option<usize> {
    let pos = Position::new(column, row);
    rects.iter().position(|r| !r.is_empty() && r.contains(pos))
}

fn tile_rects(section: Rect, count: usize, per_row: u16) -> Vec<Rect> {
    let per_row = per_row as usize;
    (0..count)
        .map(|i| {
            let row = i / per_row;
            let col = i % per_row;
            let in_this_row = per_row.min(count - row * per_row) as u16;
            let offset = section.width.saturating_sub(in_this_row * TILE_WIDTH) / 2;
            Rect::new(
                section.x + offset + col as u16 * TILE_WIDTH,
                section.y + row as u16 * TILE_HEIGHT,
                TILE_WIDTH,
                TILE_HEIGHT,
            )
            .intersection(section)
        })
        .collect()
}

fn slot_rects(section: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return vec![];
    }
    let width = (section.width / count as u16).clamp(MIN_SLOT_WIDTH, TILE_WIDTH + 1);
    let offset = section.width.saturating_sub(width * count as u16) / 2;
    (0..count)
        .map(|i| {
            Rect::new(
                section.x + offset + i as u16 * width,
                section.y,
                width,
                TILE_HEIGHT,
            )
            .intersection(section)
        })
        .collect()
}

/// Interaction state of the board between frames
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterBoard {
    tiles: Vec<char>,
    cursor: usize,
    drag: Option<Drag>,
}

impl LetterBoard {
    pub fn new(tiles: Vec<char>) -> Self {
        Self {
            tiles,
            cursor: 0,
            drag: None,
        }
    }

    pub fn tiles(&self) -> &[char] {
        &self.tiles
    }

    pub fn set_tiles(&mut self, tiles: Vec<char>) {
        self.tiles = tiles;
        self.drag = None;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn drag(&self) -> Option<Drag> {
        self.drag
    }

    /// Called when a new word comes up
    pub fn new_round(&mut self) {
        self.cursor = 0;
        self.drag = None;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self, slot_count: usize) {
        if self.cursor + 1 < slot_count {
            self.cursor += 1;
        }
    }

    /// Places a typed character at the cursor and steps right. Characters
    /// without a tile are ignored.
    pub fn type_char(&mut self, c: char, slot_count: usize) -> Option<BoardCommand> {
        let letter = c.to_uppercase().next().unwrap_or(c);
        if slot_count == 0 || !self.tiles.contains(&letter) {
            return None;
        }
        let slot = self.cursor.min(slot_count - 1);
        self.move_right(slot_count);
        Some(BoardCommand::Place { slot, letter })
    }

    /// Clears the slot under the cursor
    pub fn delete(&self, slot_count: usize) -> Option<BoardCommand> {
        (self.cursor < slot_count).then_some(BoardCommand::Clear { slot: self.cursor })
    }

    /// Clears the slot under the cursor, or the one before it when the cursor
    /// slot is already empty.
    pub fn backspace(&mut self, filled: &[bool]) -> Option<BoardCommand> {
        let slot_count = filled.len();
        if slot_count == 0 {
            return None;
        }
        self.cursor = self.cursor.min(slot_count - 1);
        if !filled[self.cursor] && self.cursor > 0 {
            self.cursor -= 1;
        }
        Some(BoardCommand::Clear { slot: self.cursor })
    }

    /// Mouse button pressed: pick up a tile, or clear a clicked slot.
    pub fn pointer_down(&mut self, layout: &BoardLayout, column: u16, row: u16) -> Option<BoardCommand> {
        if let Some(i) = layout.tile_at(column, row) {
            if let Some(&letter) = self.tiles.get(i) {
                self.drag = Some(Drag {
                    letter,
                    hover_slot: None,
                });
            }
            return None;
        }

        layout.slot_at(column, row).map(|slot| {
            self.cursor = slot;
            BoardCommand::Clear { slot }
        })
    }

    pub fn pointer_moved(&mut self, layout: &BoardLayout, column: u16, row: u16) {
        if let Some(drag) = self.drag.as_mut() {
            drag.hover_slot = layout.slot_at(column, row);
        }
    }

    /// Mouse button released: drop the dragged tile if it is over a slot.
    pub fn pointer_up(&mut self, layout: &BoardLayout, column: u16, row: u16) -> Option<BoardCommand> {
        let drag = self.drag.take()?;
        layout.slot_at(column, row).map(|slot| BoardCommand::Place {
            slot,
            letter: drag.letter,
        })
    }
}
