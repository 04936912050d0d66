//! Engine scenarios - spawn, movement, locking, scoring and game over

use russian_blocks::core::{ActivePiece, Board, DropResult, GameEngine, LockEvent};
use russian_blocks::types::{PieceKind, GRID_COLS, GRID_ROWS, LINE_BONUS, LOCK_BONUS};

fn engine_with(kind: PieceKind) -> GameEngine {
    let mut engine = GameEngine::new(12345);
    engine.start_new_game();
    engine.set_active(ActivePiece::spawn(kind));
    engine
}

#[test]
fn test_game_lifecycle() {
    let mut engine = GameEngine::new(12345);
    assert!(!engine.is_running());
    assert!(engine.active().is_none());

    engine.start_new_game();
    assert!(engine.is_running());
    assert!(engine.active().is_some());
    assert!(!engine.game_over());
    assert_eq!(engine.score(), 0);

    engine.stop();
    assert!(!engine.is_running());
    assert!(!engine.try_move(1, 0));
    assert_eq!(engine.soft_drop(), DropResult::Idle);
}

#[test]
fn test_spawn_is_centred_at_top() {
    for (kind, x) in [
        (PieceKind::I, 3),
        (PieceKind::O, 4),
        (PieceKind::T, 4),
        (PieceKind::S, 4),
        (PieceKind::Z, 4),
        (PieceKind::J, 4),
        (PieceKind::L, 4),
    ] {
        let piece = ActivePiece::spawn(kind);
        assert_eq!((piece.x, piece.y, piece.rotation), (x, 0, 0), "{kind:?}");
    }
}

#[test]
fn test_next_piece_is_promoted_on_spawn() {
    let mut engine = GameEngine::new(99);
    engine.start_new_game();
    for _ in 0..20 {
        let next = engine.next();
        engine.hard_drop();
        if engine.game_over() {
            break;
        }
        assert_eq!(engine.active().unwrap().kind, next);
    }
}

#[test]
fn test_same_seed_same_sequence() {
    let mut a = GameEngine::new(2024);
    let mut b = GameEngine::new(2024);
    a.start_new_game();
    b.start_new_game();
    for _ in 0..30 {
        assert_eq!(a.active(), b.active());
        assert_eq!(a.next(), b.next());
        a.hard_drop();
        b.hard_drop();
    }
    assert_eq!(a.board(), b.board());
    assert_eq!(a.score(), b.score());
}

#[test]
fn test_o_piece_hard_drop_on_empty_board() {
    let mut engine = engine_with(PieceKind::O);

    assert_eq!(engine.hard_drop(), GRID_ROWS as u32 - 2);

    let board = engine.board();
    assert_eq!(board.occupied_count(), 4);
    let id = PieceKind::O.id();
    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        assert_eq!(board.get(x, y), Some(id));
    }
    assert_eq!(engine.score(), LOCK_BONUS);
    assert_eq!(engine.lines(), 0);
    assert_eq!(
        engine.last_event(),
        Some(LockEvent {
            kind: PieceKind::O,
            lines_cleared: 0,
            score_gained: LOCK_BONUS,
        })
    );
}

#[test]
fn test_filling_the_gap_clears_one_line() {
    let mut engine = engine_with(PieceKind::I);
    *engine.board_mut() = Board::from_rows(&[
        "......T...",
        "IIIIIIIII.",
    ]);
    engine.set_active(ActivePiece {
        kind: PieceKind::I,
        rotation: 1,
        x: GRID_COLS as i8 - 1,
        y: 0,
    });

    engine.hard_drop();

    assert_eq!(engine.lines(), 1);
    assert_eq!(engine.score(), LOCK_BONUS + LINE_BONUS);
    // Ten cells before, four locked, one full row removed
    assert_eq!(engine.board().occupied_count(), 10 + 4 - 10);
    let expected = Board::from_rows(&[
        ".........I",
        ".........I",
        "......T..I",
    ]);
    assert_eq!(engine.board(), &expected);
}

#[test]
fn test_tetris_clears_four_lines() {
    let mut engine = engine_with(PieceKind::I);
    *engine.board_mut() = Board::from_rows(&[
        "ZZZZZZZZZ.",
        "SSSSSSSSS.",
        "JJJJJJJJJ.",
        "LLLLLLLLL.",
    ]);
    engine.set_active(ActivePiece {
        kind: PieceKind::I,
        rotation: 1,
        x: 9,
        y: 0,
    });
    engine.hard_drop();
    assert_eq!(engine.lines(), 4);
    assert_eq!(engine.score(), LOCK_BONUS + 4 * LINE_BONUS);
    assert_eq!(engine.board().occupied_count(), 0);
}

#[test]
fn test_soft_drop_moves_then_locks() {
    let mut engine = engine_with(PieceKind::O);
    engine.set_active(ActivePiece {
        y: GRID_ROWS as i8 - 3,
        ..ActivePiece::spawn(PieceKind::O)
    });
    assert_eq!(engine.soft_drop(), DropResult::Moved);
    assert_eq!(engine.gravity_tick(), DropResult::Locked);
    assert_eq!(engine.pieces_locked(), 1);
    assert_eq!(engine.board().occupied_count(), 4);
}

#[test]
fn test_blocked_move_changes_nothing() {
    let mut engine = engine_with(PieceKind::O);
    for _ in 0..GRID_COLS {
        engine.try_move(-1, 0);
    }
    let before = engine.active();
    assert_eq!(before.unwrap().x, 0);
    assert!(!engine.try_move(-1, 0));
    assert_eq!(engine.active(), before);
}

#[test]
fn test_rotation_blocked_by_wall_is_noop() {
    let mut engine = engine_with(PieceKind::I);
    engine.set_active(ActivePiece {
        kind: PieceKind::I,
        rotation: 1,
        x: GRID_COLS as i8 - 1,
        y: 5,
    });
    // Horizontal I at x=9 would stick out three columns; no kick is tried
    let before = engine.active();
    assert!(!engine.try_rotate());
    assert_eq!(engine.active(), before);
}

#[test]
fn test_rotation_blocked_by_stack_is_noop() {
    let mut engine = engine_with(PieceKind::T);
    engine.set_active(ActivePiece {
        kind: PieceKind::T,
        rotation: 0,
        x: 4,
        y: 10,
    });
    // T rotation 1 occupies (4, 12); fill it
    engine.board_mut().set(4, 12, 3);
    let before = engine.active();
    assert!(!engine.try_rotate());
    assert_eq!(engine.active(), before);
}

#[test]
fn test_four_rotations_return_to_start() {
    for kind in [PieceKind::T, PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::I] {
        let mut engine = engine_with(kind);
        engine.set_active(ActivePiece { y: 8, ..ActivePiece::spawn(kind) });
        let start = engine.active();
        for _ in 0..4 {
            assert!(engine.try_rotate(), "{kind:?}");
        }
        assert_eq!(engine.active(), start, "{kind:?}");
    }
}

#[test]
fn test_failed_spawn_leaves_board_unchanged() {
    let mut engine = engine_with(PieceKind::T);
    // Top two rows filled except the last column
    let mut top = Board::new();
    for x in 0..GRID_COLS as i8 {
        if x != 9 {
            top.set(x, 0, 1);
            top.set(x, 1, 1);
        }
    }
    *engine.board_mut() = top.clone();

    assert!(!engine.spawn());
    assert!(engine.game_over());
    assert!(!engine.is_running());
    assert!(engine.active().is_none());
    assert_eq!(engine.board(), &top);

    // Nothing moves after game over
    assert_eq!(engine.hard_drop(), 0);
    assert_eq!(engine.board(), &top);
}

#[test]
fn test_lock_into_blocked_spawn_ends_game() {
    let mut engine = engine_with(PieceKind::O);
    let mut board = Board::new();
    for x in 3..7 {
        board.set(x, 0, 1);
    }
    *engine.board_mut() = board;
    engine.set_active(ActivePiece {
        kind: PieceKind::O,
        rotation: 0,
        x: 0,
        y: GRID_ROWS as i8 - 2,
    });
    let locked = engine.pieces_locked();

    assert_eq!(engine.soft_drop(), DropResult::Locked);
    // The lock itself is scored; the game ends at the following spawn
    assert_eq!(engine.pieces_locked(), locked + 1);
    assert_eq!(engine.score(), LOCK_BONUS);
    assert!(engine.game_over());
}

#[test]
fn test_new_game_resets_everything() {
    let mut engine = GameEngine::new(5);
    engine.start_new_game();
    for _ in 0..5 {
        engine.hard_drop();
    }
    assert!(engine.score() > 0);

    engine.start_new_game();
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.lines(), 0);
    assert_eq!(engine.pieces_locked(), 0);
    assert_eq!(engine.board().occupied_count(), 0);
    assert!(engine.last_event().is_none());
    assert!(engine.is_running());
}

#[test]
fn test_ghost_matches_hard_drop() {
    let mut engine = engine_with(PieceKind::L);
    let ghost = engine.ghost_y().unwrap();
    let active = engine.active().unwrap();
    let distance = engine.hard_drop();
    assert_eq!(ghost, active.y + distance as i8);
}

#[test]
fn test_snapshot_reflects_engine() {
    let mut engine = engine_with(PieceKind::O);
    engine.hard_drop();
    let snap = engine.snapshot();
    assert_eq!(snap.score, engine.score());
    assert_eq!(snap.next, engine.next());
    assert_eq!(snap.occupied_count(), 4);
    assert_eq!(snap.board[19][4], PieceKind::O.id());
    assert_eq!(snap.active.map(|a| a.kind), engine.active().map(|a| a.kind));
    assert!(snap.running);
    assert!(!snap.game_over);
}
