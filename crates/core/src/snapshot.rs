use crate::piece::Piece;
use blockfall_types::{ItemKind, PieceKind, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePieceSnapshot {
    pub kind: PieceKind,
    pub item: Option<ItemKind>,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl From<&Piece> for ActivePieceSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind,
            item: value.item,
            rotation: value.rotation(),
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineSnapshot {
    pub board: [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub active: Option<ActivePieceSnapshot>,
    pub next_kind: PieceKind,
    pub next_item: Option<ItemKind>,
    pub lines_cleared: u32,
    pub pieces_placed: u32,
    pub piece_seq: u32,
    pub level: u32,
    pub landed: bool,
    pub game_over: bool,
}

impl EngineSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        self.active = None;
        self.next_kind = PieceKind::I;
        self.next_item = None;
        self.lines_cleared = 0;
        self.pieces_placed = 0;
        self.piece_seq = 0;
        self.level = 0;
        self.landed = false;
        self.game_over = false;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: None,
            next_kind: PieceKind::I,
            next_item: None,
            lines_cleared: 0,
            pieces_placed: 0,
            piece_seq: 0,
            level: 0,
            landed: false,
            game_over: false,
        }
    }
}
