use tetris_engine::core::{BoardSnapshot, Engine, EngineConfig, GameSnapshot, PieceCatalog};
use tetris_engine::types::{Action, Color};

#[test]
fn snapshot_json_has_expected_fields() {
    let mut engine = Engine::new(10, 20, PieceCatalog::square_only(), 1).unwrap();
    engine.step(Action::Down);

    let json = engine.snapshot().to_json().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(v["board"]["width"], 10);
    assert_eq!(v["board"]["height"], 20);
    assert_eq!(v["board"]["cells"].as_array().map(|rows| rows.len()), Some(20));
    assert_eq!(v["active"]["color"], "yellow");
    assert_eq!(v["active"]["rotatable"], false);
    assert_eq!(v["episode_id"], 1);
    assert_eq!(v["game_over"], false);
    // After one move the square covers rows 0 and 1.
    assert_eq!(v["board"]["cells"][0][4], Color::Yellow.cell());
    assert_eq!(v["board"]["cells"][1][5], Color::Yellow.cell());
}

#[test]
fn snapshot_roundtrips_through_json() {
    let mut engine = Engine::new(10, 20, PieceCatalog::classic(), 77).unwrap();
    for action in [Action::Down, Action::Up, Action::Left, Action::Down] {
        engine.step(action);
    }
    let snap = engine.snapshot();
    let back: GameSnapshot = serde_json::from_str(&snap.to_json().unwrap()).unwrap();
    assert_eq!(back, snap);
}

#[test]
fn snapshot_into_reuses_buffers() {
    let mut engine = Engine::new(10, 20, PieceCatalog::square_only(), 5).unwrap();
    let mut snap = GameSnapshot::default();
    engine.snapshot_into(&mut snap);
    let rows_ptr = snap.board.cells.as_ptr();

    engine.step(Action::Down);
    engine.snapshot_into(&mut snap);

    assert_eq!(snap.board.cells.as_ptr(), rows_ptr);
    assert_eq!(snap, engine.snapshot());
}

#[test]
fn occupancy_is_binary() {
    let mut engine = Engine::new(4, 6, PieceCatalog::square_only(), 5).unwrap();
    while !engine.move_down() {}

    let occupancy = BoardSnapshot::from(engine.board()).occupancy();
    assert_eq!(occupancy[5], vec![0, 1, 1, 0]);
    assert_eq!(occupancy[4], vec![0, 1, 1, 0]);
    assert!(occupancy[..4].iter().flatten().all(|&c| c == 0));
}

#[test]
fn config_json_selects_classic_catalog() {
    let json = r#"{"board_width":8,"catalog":"classic","seed":9}"#;
    let config = EngineConfig::from_json(json).unwrap();
    assert_eq!(config.board_width, 8);
    assert_eq!(config.board_height, 20);

    let engine = Engine::from_config(&config).unwrap();
    assert_eq!(engine.catalog().templates().len(), 7);
    assert_eq!(engine.width(), 8);
}
