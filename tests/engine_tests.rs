//! Engine tests - simulation lifecycle through the facade

use blockfall::core::{Engine, EngineConfig};
use blockfall::types::{CellTag, PieceKind, GRID_WIDTH};

fn engine_with(kind: PieceKind) -> Engine {
    let mut engine = Engine::new(EngineConfig::classic());
    engine.set_next(kind);
    engine.start();
    engine
}

#[test]
fn test_engine_lifecycle() {
    let mut engine = Engine::new(EngineConfig::with_seed(12345));
    assert!(!engine.started());
    assert!(engine.active().is_none());

    engine.start();
    assert!(engine.started());
    assert!(engine.active().is_some());
    assert!(!engine.game_over());
    assert_eq!(engine.piece_seq(), 1);
}

#[test]
fn test_commands_steer_the_piece() {
    let mut engine = engine_with(PieceKind::T);
    let piece = engine.active().unwrap();
    assert_eq!((piece.x, piece.y), (3, -1));

    assert!(engine.move_left());
    assert_eq!(engine.active().unwrap().x, 2);

    assert!(engine.move_right());
    assert_eq!(engine.active().unwrap().x, 3);

    assert!(engine.rotate());
    assert_eq!(engine.active().unwrap().rotation(), 1);

    engine.move_down();
    assert_eq!(engine.active().unwrap().y, 0);
}

#[test]
fn test_hard_drop_lands_and_retires_the_piece() {
    let mut engine = engine_with(PieceKind::O);
    let rows = engine.hard_drop();
    assert_eq!(rows, 19);

    assert!(engine.active().is_none());
    assert!(engine.landed());
    assert_eq!(engine.pieces_placed(), 1);
    assert!(engine.grid().is_occupied(4, 18));
    assert!(engine.grid().is_occupied(5, 19));
}

#[test]
fn test_four_bars_clear_the_bottom_row() {
    let mut engine = engine_with(PieceKind::I);

    // Flat bar on the left wall
    engine.set_next(PieceKind::I);
    for _ in 0..3 {
        assert!(engine.move_left());
    }
    engine.hard_drop();
    assert_eq!(engine.clear_lines().len(), 0);
    assert!(engine.spawn_next());

    // Flat bar next to it
    engine.set_next(PieceKind::I);
    assert!(engine.move_right());
    engine.hard_drop();
    assert_eq!(engine.clear_lines().len(), 0);
    assert!(engine.spawn_next());

    // Upright bar in column 8
    engine.set_next(PieceKind::I);
    assert!(engine.rotate());
    for _ in 0..5 {
        assert!(engine.move_right());
    }
    engine.hard_drop();
    assert_eq!(engine.clear_lines().len(), 0);
    assert!(engine.spawn_next());

    // Upright bar in column 9 completes the row
    assert!(engine.rotate());
    for _ in 0..6 {
        assert!(engine.move_right());
    }
    engine.hard_drop();
    let cleared = engine.clear_lines();
    assert_eq!(cleared.len(), 1);
    assert_eq!(engine.lines_cleared(), 1);

    // The upright bars' remainders slide down one row
    assert!(engine.grid().is_occupied(8, 19));
    assert!(engine.grid().is_occupied(9, 17));
    assert!(engine.grid().is_open(8, 16));
    assert!(engine.grid().is_open(0, 19));
}

#[test]
fn test_same_seed_runs_in_lockstep() {
    let mut a = Engine::new(EngineConfig::with_seed(4242));
    let mut b = Engine::new(EngineConfig::with_seed(4242));
    a.start();
    b.start();

    for step in 0..25u32 {
        for engine in [&mut a, &mut b] {
            match step % 3 {
                0 => {
                    engine.move_left();
                }
                1 => {
                    engine.rotate();
                    engine.move_right();
                }
                _ => {}
            }
            engine.hard_drop();
            engine.clear_lines();
            engine.spawn_next();
        }
        assert_eq!(a.snapshot(), b.snapshot(), "diverged at step {}", step);
        if a.game_over() {
            break;
        }
    }
    assert_eq!(a.grid().render_ascii(), b.grid().render_ascii());
    assert_eq!(a.piece_seq(), b.piece_seq());
}

#[test]
fn test_hundred_spawns_share_the_piece_stream() {
    let mut a = Engine::new(EngineConfig::with_seed(99));
    let mut b = Engine::new(EngineConfig::with_seed(99));
    a.start();
    b.start();

    for spawn in 0..100u32 {
        assert_eq!(a.active(), b.active(), "spawn {} diverged", spawn);
        assert_eq!(a.next(), b.next());

        // Land, sweep and blank the field so no spawn is ever blocked
        for engine in [&mut a, &mut b] {
            engine.hard_drop();
            engine.clear_lines();
            engine.grid_mut().clear();
            assert!(engine.spawn_next());
        }
    }
    assert_eq!(a.piece_seq(), 101);
    assert_eq!(a.piece_seq(), b.piece_seq());
}

#[test]
fn test_item_cadence_queues_a_marker_piece() {
    let config = EngineConfig {
        items_enabled: true,
        item_interval: 1,
        seed: 11,
    };
    let mut engine = Engine::new(config);
    engine.set_next(PieceKind::O);
    engine.start();
    for x in 0..GRID_WIDTH as i8 {
        if x != 4 && x != 5 {
            engine.grid_mut().set(x, 19, Some(CellTag::Garbage));
        }
    }

    engine.hard_drop();
    assert_eq!(engine.clear_lines().len(), 1);
    assert!(engine.spawn_next());

    // One line cleared at interval one, so the fresh preview is an item
    assert!(engine.next().item.is_some());
    assert_eq!(engine.lines_since_item(), 0);
}

#[test]
fn test_attack_rows_reseat_the_active_piece() {
    let mut engine = engine_with(PieceKind::O);
    engine.grid_mut().set(0, 19, Some(CellTag::Garbage));

    let mut row = [Some(CellTag::Garbage); GRID_WIDTH as usize];
    row[6] = None;
    engine.inject_attack_rows(&[row]);

    assert!(engine.grid().is_occupied(0, 18));
    assert!(engine.grid().is_occupied(0, 19));
    assert!(engine.grid().is_open(6, 19));
    assert!(engine.active().is_some());
    assert!(!engine.game_over());
}

#[test]
fn test_reset_restores_a_fresh_game() {
    let mut engine = Engine::new(EngineConfig::with_seed(7));
    engine.start();
    engine.hard_drop();
    engine.clear_lines();
    engine.spawn_next();
    engine.reset();

    let mut fresh = Engine::new(EngineConfig::with_seed(7));
    fresh.start();
    assert_eq!(engine.snapshot(), fresh.snapshot());
}

#[test]
fn test_snapshot_reflects_the_engine() {
    let mut engine = engine_with(PieceKind::T);
    engine.hard_drop();

    let snap = engine.snapshot();
    assert_eq!(snap.pieces_placed, 1);
    assert!(snap.landed);
    assert!(snap.active.is_none());
    assert!(snap.playable());
    assert_eq!(snap.piece_seq, engine.piece_seq());

    // Landed cells show up as nonzero codes on the board image
    assert_ne!(snap.board[19][4], 0);
}
