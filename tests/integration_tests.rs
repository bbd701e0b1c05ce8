//! Integration tests for the reset/step contract

use tetris_engine::core::{Engine, EngineConfig, PieceCatalog};
use tetris_engine::types::{Action, Color};

fn square_engine() -> Engine {
    Engine::new(10, 20, PieceCatalog::square_only(), 12345).unwrap()
}

#[test]
fn test_square_lands_and_clears_bottom_row() {
    let mut engine = square_engine();
    assert_eq!(
        engine.active_piece().shape(),
        &[(-1, 4), (-1, 5), (0, 4), (0, 5)]
    );

    for _ in 0..19 {
        assert!(!engine.move_down());
        for &(row, col) in engine.active_piece().shape() {
            assert!(row < 20);
            assert!((0..10).contains(&col));
        }
    }
    // Base is on row 19; the next move lands it.
    assert!(engine
        .active_piece()
        .shape()
        .iter()
        .any(|&(row, _)| row == 19));
    assert!(engine.move_down());

    let yellow = Color::Yellow.cell();
    for (row, col) in [(18, 4), (18, 5), (19, 4), (19, 5)] {
        assert_eq!(engine.board().cell(row, col), Ok(yellow));
    }

    for col in (0..4).chain(6..10) {
        engine.board_mut().set_cell(19, col, 1).unwrap();
    }
    let rows_before = engine.board().to_rows();

    assert_eq!(engine.clear_filled_lines(), 1);

    let rows_after = engine.board().to_rows();
    assert!(rows_after[0].iter().all(|&c| c == 0));
    // Rows 0-18 shifted down by one.
    assert_eq!(&rows_after[1..20], &rows_before[0..19]);
    assert_eq!(engine.board().cell(19, 4), Ok(yellow));
    assert_eq!(engine.board().cell(19, 0), Ok(0));
}

#[test]
fn test_move_left_at_wall_is_noop() {
    let mut engine = square_engine();
    engine.move_down();
    while engine.move_left() {}

    assert!(engine.active_piece().shape().iter().any(|&(_, c)| c == 0));
    let shape = engine.active_piece().shape().to_vec();
    let board = engine.board().clone();

    assert!(!engine.move_left());
    assert_eq!(engine.active_piece().shape(), shape.as_slice());
    assert_eq!(engine.board(), &board);

    let outcome = engine.step(Action::Left);
    assert!(!outcome.moved);
    assert_eq!(outcome.board, board);
}

#[test]
fn test_move_right_reaches_wall_in_four_moves() {
    let mut engine = square_engine();
    let mut moved = 0;
    while engine.move_right() {
        moved += 1;
    }
    assert_eq!(moved, 4);
    assert!(engine.active_piece().shape().iter().all(|&(_, c)| c <= 9));
}

#[test]
fn test_game_over_only_reported_on_landing() {
    let mut engine = square_engine();
    // Column stack two rows below the top.
    for row in 2..20 {
        engine.board_mut().set_cell(row, 4, 1).unwrap();
    }

    let first = engine.step(Action::Down);
    assert!(first.moved);
    assert!(!first.game_over);
    // The falling square now occupies row 0, but nothing has landed.
    assert!(engine.is_game_over());

    let second = engine.step(Action::Down);
    assert!(second.landed);
    assert!(second.game_over);
    assert_eq!(second.lines_cleared_bonus, 0);
}

#[test]
fn test_reset_is_repeatable() {
    let mut engine = square_engine();
    for _ in 0..3 {
        for _ in 0..30 {
            engine.step(Action::Down);
        }
        engine.reset();
        assert_eq!(engine.board().occupied_count(), 0);
        assert!(!engine.is_game_over());
        assert_eq!(engine.pieces_spawned(), 1);
    }
    assert_eq!(engine.episode_id(), 4);
}

#[test]
fn test_next_piece_is_promoted_on_landing() {
    let mut engine = Engine::new(10, 20, PieceCatalog::classic(), 99).unwrap();
    let next = engine.next_piece().clone();
    while !engine.move_down() {}

    assert_eq!(engine.active_piece(), &next.at_spawn(10));
    // The preview keeps template coordinates.
    assert_eq!(engine.next_piece().shape().iter().map(|&(r, _)| r).min(), Some(0));
}

#[test]
fn test_active_piece_does_not_alias_catalog() {
    let mut engine = square_engine();
    engine.move_down();
    engine.move_right();
    assert_eq!(
        engine.catalog().templates()[0].shape(),
        &[(0, 0), (0, 1), (1, 0), (1, 1)]
    );
    assert_eq!(
        engine.next_piece().shape(),
        &[(0, 0), (0, 1), (1, 0), (1, 1)]
    );
}

#[test]
fn test_from_config_seeded_engines_match() {
    let config = EngineConfig {
        catalog: tetris_engine::core::CatalogPreset::Classic,
        seed: Some(314),
        ..EngineConfig::default()
    };
    let mut a = Engine::from_config(&config).unwrap();
    let mut b = Engine::from_config(&config).unwrap();

    let actions = [Action::Up, Action::Left, Action::Down, Action::Right, Action::Down];
    for i in 0..400 {
        let action = actions[i % actions.len()];
        assert_eq!(a.step(action), b.step(action));
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_score_heuristic_after_landing() {
    let mut engine = square_engine();
    while !engine.move_down() {}
    // Square at columns 4-5 of rows 18-19 leaves 8 holes in each row.
    assert_eq!(engine.gaps_in_lines(), 16);
    assert_eq!(engine.clear_and_score(), -160);
}
