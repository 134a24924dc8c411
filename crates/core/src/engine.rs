//! Engine module - the complete simulation state machine
//!
//! The engine owns the grid, the active and next pieces, the RNG, and
//! the progress counters. Callers steer it through commands: shift,
//! rotate, step down, hard drop, clear lines, spawn. The active piece's
//! visible cells always live inside the grid; a command erases them,
//! probes the target position, and commits again whether or not the
//! move was legal.
//!
//! Landing is where items fire. A step down that cannot advance runs
//! the piece's landing behavior exactly once, retires the piece, and
//! leaves the engine in the landed state until the caller sweeps full
//! rows and spawns the next piece.

use arrayvec::ArrayVec;

use crate::grid::{ClearedRows, Grid, RowCells};
use crate::items;
use crate::piece::{Markers, Piece};
use crate::rng::SimpleRng;
use crate::scoring;
use crate::shape::base_shape;
use crate::snapshot::{ActivePieceSnapshot, EngineSnapshot};
use blockfall_types::{ItemKind, PieceKind, ITEM_LINE_INTERVAL, SPAWN_BUFFER_ROWS};

/// Result of a single gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece descended one row
    Moved,
    /// The piece could not descend and has landed
    Landed,
}

/// Engine construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Whether item pieces spawn at all
    pub items_enabled: bool,
    /// Cleared lines between forced item pieces
    pub item_interval: u32,
    /// RNG seed for the piece and item streams
    pub seed: u64,
}

impl EngineConfig {
    /// Items disabled, plain falling-block rules
    pub fn classic() -> Self {
        Self {
            items_enabled: false,
            ..Self::default()
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            items_enabled: true,
            item_interval: ITEM_LINE_INTERVAL,
            seed: 0,
        }
    }
}

/// Contents of the next-piece preview slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPiece {
    pub kind: PieceKind,
    pub item: Option<ItemKind>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Engine {
    grid: Grid,
    active: Option<Piece>,
    next: NextPiece,
    rng: SimpleRng,
    config: EngineConfig,
    lines_cleared: u32,
    pieces_placed: u32,
    /// Cleared lines since the last item piece was queued
    lines_since_item: u32,
    /// Monotonic id, increments on every successful spawn
    piece_seq: u32,
    landed: bool,
    game_over: bool,
    started: bool,
}

impl Engine {
    /// Create a new engine. No piece is in play until `start`.
    pub fn new(config: EngineConfig) -> Self {
        let mut engine = Self {
            grid: Grid::new(),
            active: None,
            next: NextPiece {
                kind: PieceKind::I,
                item: None,
            },
            rng: SimpleRng::new(config.seed),
            config,
            lines_cleared: 0,
            pieces_placed: 0,
            lines_since_item: 0,
            piece_seq: 0,
            landed: false,
            game_over: false,
            started: false,
        };
        engine.next = engine.draw_next();
        engine
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_next();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Whether the last piece has landed and the next spawn is pending
    pub fn landed(&self) -> bool {
        self.landed
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    pub fn lines_since_item(&self) -> u32 {
        self.lines_since_item
    }

    pub fn piece_seq(&self) -> u32 {
        self.piece_seq
    }

    pub fn level(&self) -> u32 {
        scoring::calculate_level(self.lines_cleared)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next(&self) -> NextPiece {
        self.next
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access, for seeding scenarios and attack tooling
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Replace the preview slot with a standard piece
    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = NextPiece { kind, item: None };
    }

    /// Replace the preview slot with an item piece. Marker cells are
    /// drawn from the RNG when the piece spawns.
    pub fn set_next_item(&mut self, kind: PieceKind, item: ItemKind) {
        self.next = NextPiece {
            kind,
            item: Some(item),
        };
    }

    /// Reseed the RNG. Takes effect from the next draw; combine with
    /// `reset` for a fully reproducible restart.
    pub fn set_seed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng.reseed(seed);
    }

    /// Restart from an empty grid with the configured seed
    pub fn reset(&mut self) {
        let config = self.config;
        *self = Self::new(config);
        self.start();
    }

    /// Whether the active piece accepts movement commands
    fn can_act(&self) -> bool {
        self.active.is_some() && !self.landed && !self.game_over
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, dx: i8) -> bool {
        if !self.can_act() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        piece.erase_from(&mut self.grid);
        let moved = self.grid.can_place(piece.shape(), piece.x + dx, piece.y);
        if moved {
            piece.x += dx;
        }
        piece.commit_to(&mut self.grid);
        moved
    }

    /// Rotate the active piece one quarter-turn clockwise. The rotation
    /// is probed on a copy, so a rejected turn leaves the piece exactly
    /// as it was.
    pub fn rotate(&mut self) -> bool {
        if !self.can_act() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        piece.erase_from(&mut self.grid);
        let rotated = piece.rotated_cw();
        let ok = rotated.fits(&self.grid);
        if ok {
            *piece = rotated;
        }
        piece.commit_to(&mut self.grid);
        ok
    }

    /// Step the active piece down one row. On a blocked step the piece
    /// lands: its item behavior (or plain commit) runs once and the
    /// engine waits for `clear_lines` plus `spawn_next`.
    pub fn move_down(&mut self) -> DropOutcome {
        if !self.can_act() {
            return DropOutcome::Landed;
        }
        let Some(piece) = self.active.as_mut() else {
            return DropOutcome::Landed;
        };
        piece.erase_from(&mut self.grid);
        if self.grid.can_place(piece.shape(), piece.x, piece.y + 1) {
            piece.y += 1;
            piece.commit_to(&mut self.grid);
            return DropOutcome::Moved;
        }
        if !piece.effect_done() {
            items::apply_landing(&mut self.grid, piece);
            piece.mark_effect_done();
        }
        self.active = None;
        self.landed = true;
        self.pieces_placed += 1;
        DropOutcome::Landed
    }

    /// Drop the active piece until it lands, returning the rows fallen
    pub fn hard_drop(&mut self) -> u32 {
        let mut rows = 0;
        while self.move_down() == DropOutcome::Moved {
            rows += 1;
        }
        rows
    }

    /// Sweep every full row and return their contents, bottom-up.
    /// Cleared lines advance the level and the item cadence. Calling
    /// this with a piece still in flight lifts the piece out first and
    /// reseats it afterwards.
    pub fn clear_lines(&mut self) -> ClearedRows {
        let in_flight = self.can_act();
        if in_flight {
            if let Some(piece) = self.active.as_ref() {
                piece.erase_from(&mut self.grid);
            }
        }
        let cleared = self.grid.clear_full_rows();
        self.lines_cleared += cleared.len() as u32;
        self.lines_since_item += cleared.len() as u32;
        if in_flight {
            self.reseat_active();
        }
        cleared
    }

    /// Splice attack rows under the stack. An in-flight piece is lifted
    /// out and reseated; cells pushed past the top edge are lost.
    pub fn inject_attack_rows(&mut self, rows: &[RowCells]) {
        if self.game_over || rows.is_empty() {
            return;
        }
        let in_flight = self.can_act();
        if in_flight {
            if let Some(piece) = self.active.as_ref() {
                piece.erase_from(&mut self.grid);
            }
        }
        self.grid.inject_rows(rows);
        if in_flight {
            self.reseat_active();
        }
    }

    /// Put a lifted-out piece back into the grid, climbing row by row
    /// if the stack moved under it. A piece pushed past the buffer top
    /// ends the game.
    fn reseat_active(&mut self) {
        if self.active.is_none() {
            return;
        }
        let min_y = -(SPAWN_BUFFER_ROWS as i8);
        let mut seated = false;
        if let Some(piece) = self.active.as_mut() {
            while piece.y >= min_y {
                if piece.fits(&self.grid) {
                    piece.commit_to(&mut self.grid);
                    seated = true;
                    break;
                }
                piece.y -= 1;
            }
        }
        if !seated {
            self.active = None;
            self.game_over = true;
        }
    }

    /// Promote the preview piece into play and draw a new preview.
    /// Returns false without consuming the preview when a piece is
    /// still in flight, and flags game over when the spawn position is
    /// blocked.
    pub fn spawn_next(&mut self) -> bool {
        if self.game_over || !self.started {
            return false;
        }
        if self.active.is_some() {
            return false;
        }
        let piece = self.make_piece(self.next);
        if !piece.fits(&self.grid) {
            self.game_over = true;
            return false;
        }
        piece.commit_to(&mut self.grid);
        self.active = Some(piece);
        self.next = self.draw_next();
        self.landed = false;
        self.piece_seq = self.piece_seq.wrapping_add(1);
        true
    }

    /// Draw the next preview piece, promoting it to an item piece when
    /// the cleared-line cadence is due
    fn draw_next(&mut self) -> NextPiece {
        let kind = self.rng.piece_kind();
        let item = if self.config.items_enabled
            && self.lines_since_item >= self.config.item_interval
        {
            self.lines_since_item = 0;
            Some(self.rng.item_kind())
        } else {
            None
        };
        NextPiece { kind, item }
    }

    /// Build the piece for a preview slot, drawing marker cells for
    /// item pieces from the RNG
    fn make_piece(&mut self, next: NextPiece) -> Piece {
        let Some(item) = next.item else {
            return Piece::spawn(next.kind);
        };
        let cells: ArrayVec<(u8, u8), 4> = base_shape(next.kind).cells().collect();
        let mut markers = Markers::new();
        match item.marker_count() {
            0 => {}
            1 => {
                let pick = self.rng.next_range(cells.len() as u32) as usize;
                markers.push(cells[pick]);
            }
            _ => {
                let first = self.rng.next_range(cells.len() as u32) as usize;
                let step = 1 + self.rng.next_range(cells.len() as u32 - 1) as usize;
                let second = (first + step) % cells.len();
                markers.push(cells[first]);
                markers.push(cells[second]);
            }
        }
        Piece::spawn_item(next.kind, Some(item), markers)
    }

    /// Fill a snapshot in place without allocating
    pub fn snapshot_into(&self, out: &mut EngineSnapshot) {
        self.grid.write_codes(&mut out.board);
        out.active = self.active.as_ref().map(ActivePieceSnapshot::from);
        out.next_kind = self.next.kind;
        out.next_item = self.next.item;
        out.lines_cleared = self.lines_cleared;
        out.pieces_placed = self.pieces_placed;
        out.piece_seq = self.piece_seq;
        out.level = self.level();
        out.landed = self.landed;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let mut s = EngineSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
