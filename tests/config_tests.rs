use solo_battleship::{
    max_board_size, ConfigError, GameConfig, GameEngine, Orientation, PlacementError,
    SunkDetection, BoardError, BOARD_SIZE, FLEET, MISSES_PER_STRIKE, STRIKES_TO_LOSE,
};

#[test]
fn default_rules() {
    let config = GameConfig::default();
    assert_eq!(config.board_size, BOARD_SIZE);
    assert_eq!(config.fleet, FLEET.to_vec());
    assert_eq!(config.misses_per_strike, MISSES_PER_STRIKE);
    assert_eq!(config.strikes_to_lose, STRIKES_TO_LOSE);
    assert_eq!(config.sunk_detection, SunkDetection::PerShip);
    assert_eq!(config.total_ship_cells(), 16);
    assert!(config.validate().is_ok());
}

#[test]
fn validate_rejects_unplayable_configs() {
    assert_eq!(GameConfig::new(&[1], 0).validate(), Err(ConfigError::BoardTooSmall));
    assert_eq!(max_board_size(), 11);
    assert_eq!(
        GameConfig::new(&[1], 12).validate(),
        Err(ConfigError::BoardTooLarge { size: 12, max: 11 })
    );
    assert_eq!(GameConfig::new(&[], 5).validate(), Err(ConfigError::EmptyFleet));
    assert_eq!(
        GameConfig::new(&[2, 0], 5).validate(),
        Err(ConfigError::ZeroLengthShip { index: 1 })
    );
    assert_eq!(
        GameConfig::new(&[6], 5).validate(),
        Err(ConfigError::ShipTooLong {
            length: 6,
            board_size: 5
        })
    );
    assert_eq!(
        GameConfig::new(&[2, 2, 2], 2).validate(),
        Err(ConfigError::FleetTooLarge {
            cells: 6,
            capacity: 4
        })
    );
    let mut config = GameConfig::default();
    config.strikes_to_lose = 0;
    assert_eq!(config.validate(), Err(ConfigError::ZeroThreshold));
}

#[test]
fn engine_refuses_invalid_config() {
    assert!(matches!(
        GameEngine::new_game(&[3], 2),
        Err(ConfigError::ShipTooLong { .. })
    ));
    let engine = GameEngine::new_game(&[2, 3], 6).unwrap();
    assert_eq!(engine.board_size(), 6);
    assert_eq!(engine.fleet(), &[2, 3]);
    assert_eq!(engine.board().ship_map().count_ones(), 5);
}

#[test]
fn explicit_layout_errors() {
    let config = GameConfig::new(&[3, 2], 5);
    assert_eq!(
        GameEngine::with_layout(config.clone(), &[(0, 0, Orientation::Horizontal)]).err(),
        Some(ConfigError::LayoutMismatch {
            expected: 2,
            got: 1
        })
    );
    assert_eq!(
        GameEngine::with_layout(
            config.clone(),
            &[(0, 0, Orientation::Horizontal), (0, 1, Orientation::Vertical)]
        )
        .err(),
        Some(ConfigError::Placement(PlacementError::Board(BoardError::ShipOverlaps)))
    );
    assert_eq!(
        GameEngine::with_layout(
            config,
            &[(0, 3, Orientation::Horizontal), (4, 0, Orientation::Horizontal)]
        )
        .err(),
        Some(ConfigError::Placement(PlacementError::Board(BoardError::ShipOutOfBounds)))
    );
}

#[test]
fn exhausted_placement_surfaces_as_config_error() {
    let mut config = GameConfig::new(&[2, 2, 1], 2);
    config.placement_restarts = 4;
    assert_eq!(
        GameEngine::new(config).err(),
        Some(ConfigError::Placement(PlacementError::Exhausted { restarts: 4 }))
    );
}

#[test]
fn config_from_json_fills_defaults() {
    let config: GameConfig = serde_json::from_str(
        r#"{ "board_size": 8, "fleet": [2, 3], "sunk_detection": "length-scan", "seed": 7 }"#,
    )
    .unwrap();
    assert_eq!(config.board_size, 8);
    assert_eq!(config.fleet, vec![2, 3]);
    assert_eq!(config.sunk_detection, SunkDetection::LengthScan);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.misses_per_strike, MISSES_PER_STRIKE);
    assert_eq!(config.strikes_to_lose, STRIKES_TO_LOSE);

    let empty: GameConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, GameConfig::default());
}

#[test]
fn errors_display_readably() {
    let err = ConfigError::BoardTooLarge { size: 12, max: 11 };
    assert_eq!(err.to_string(), "Board size 12 exceeds the maximum of 11");
}

#[test]
fn largest_board_fits_the_cell_type() {
    let size = max_board_size();
    assert_eq!(size, 11);
    let engine = GameEngine::new_game(&FLEET, size).unwrap();
    assert_eq!(engine.board().ship_map().count_ones(), 16);
    assert!(matches!(
        GameEngine::new_game(&FLEET, size + 1),
        Err(ConfigError::BoardTooLarge { size: 12, max: 11 })
    ));
}
