use solo_battleship::{
    Counters, Event, GameConfig, GameEngine, GameStatus, Orientation, Outcome, ReplayDecision,
    RoundControl, ShotError, SunkDetection, BOARD_SIZE,
};

/// Empty cells of the engine's current board, row-major.
fn empty_cells(engine: &GameEngine) -> Vec<(usize, usize)> {
    let ships = engine.board().ship_map();
    let mut cells = Vec::new();
    for r in 0..engine.board_size() {
        for c in 0..engine.board_size() {
            if !ships.get(r, c).unwrap() {
                cells.push((r, c));
            }
        }
    }
    cells
}

fn seeded(seed: u64) -> GameEngine {
    GameEngine::new(GameConfig::default().with_seed(seed)).unwrap()
}

#[test]
fn single_ship_sunk_in_five_hits_wins() {
    for mode in [SunkDetection::PerShip, SunkDetection::LengthScan] {
        let config = GameConfig::new(&[5], BOARD_SIZE).with_sunk_detection(mode);
        let mut engine =
            GameEngine::with_layout(config, &[(0, 0, Orientation::Horizontal)]).unwrap();

        for c in 0..4 {
            let res = engine.fire(0, c).unwrap();
            assert_eq!(res.outcome, Outcome::Hit);
            assert!(res.events.is_empty());
        }
        let last = engine.fire(0, 4).unwrap();
        assert_eq!(last.outcome, Outcome::Hit);
        assert_eq!(last.events, vec![Event::ShipSunk { length: 5 }, Event::GameWon]);
        assert_eq!(last.counters.ships_sunk, 1);
        assert_eq!(last.counters.total_hits, 5);
        assert_eq!(engine.status(), GameStatus::Won);
    }
}

#[test]
fn five_misses_record_a_strike() {
    let mut engine = seeded(3);
    let empty = empty_cells(&engine);

    for (i, &(r, c)) in empty.iter().take(4).enumerate() {
        let res = engine.fire(r, c).unwrap();
        assert_eq!(res.outcome, Outcome::Miss);
        assert_eq!(res.counters.consecutive_misses, i + 1);
        assert!(res.events.is_empty());
    }
    let (r, c) = empty[4];
    let res = engine.fire(r, c).unwrap();
    assert_eq!(res.events, vec![Event::StrikeRecorded]);
    assert_eq!(engine.strikes(), 1);
    assert_eq!(engine.consecutive_misses(), 0);
    assert_eq!(engine.total_misses(), 5);
    assert_eq!(engine.status(), GameStatus::InProgress);
}

#[test]
fn fifteen_misses_lose_and_block_further_shots() {
    let mut engine = seeded(11);
    let empty = empty_cells(&engine);

    let mut last = None;
    for &(r, c) in empty.iter().take(15) {
        last = Some(engine.fire(r, c).unwrap());
    }
    let last = last.unwrap();
    assert_eq!(last.events, vec![Event::StrikeRecorded, Event::GameLost]);
    assert_eq!(engine.strikes(), 3);
    assert_eq!(engine.status(), GameStatus::Lost);

    let before = engine.counters();
    let (r, c) = empty[15];
    assert_eq!(
        engine.fire(r, c).unwrap_err(),
        ShotError::InvalidTerminalOperation(GameStatus::Lost)
    );
    assert_eq!(engine.counters(), before);
    assert!(!engine.board().fired().get(r, c).unwrap());
}

#[test]
fn hit_resets_miss_streak() {
    let config = GameConfig::new(&[2], 6);
    let mut engine =
        GameEngine::with_layout(config, &[(5, 0, Orientation::Horizontal)]).unwrap();
    for c in 0..4 {
        engine.fire(0, c).unwrap();
    }
    assert_eq!(engine.consecutive_misses(), 4);
    let hit = engine.fire(5, 0).unwrap();
    assert_eq!(hit.counters.consecutive_misses, 0);
    let miss = engine.fire(1, 0).unwrap();
    assert!(miss.events.is_empty());
    assert_eq!(engine.strikes(), 0);
}

#[test]
fn reset_after_terminal_round_clears_everything() {
    let config = GameConfig::new(&[1], BOARD_SIZE).with_seed(5);
    let mut engine = GameEngine::with_layout(config, &[(9, 9, Orientation::Vertical)]).unwrap();
    engine.fire(0, 0).unwrap();
    engine.fire(9, 9).unwrap();
    assert_eq!(engine.status(), GameStatus::Won);

    engine.reset();
    assert_eq!(engine.status(), GameStatus::InProgress);
    assert!(!engine.is_terminal());
    assert_eq!(engine.counters(), Counters::default());
    assert!(engine.board().fired().is_empty());
    assert_eq!(engine.board().ship_map().count_ones(), 1);
    assert_eq!(engine.remaining_lengths(), vec![1]);
    assert_eq!(engine.round(), 2);
}

#[test]
fn reset_mid_round_is_allowed() {
    let mut engine = seeded(21);
    let (r, c) = empty_cells(&engine)[0];
    engine.fire(r, c).unwrap();
    engine.reset();
    assert_eq!(engine.counters(), Counters::default());
    assert_eq!(engine.board().ship_map().count_ones(), 16);
}

#[test]
fn replay_decision_drives_round_transitions() {
    let mut engine = seeded(8);
    assert_eq!(
        engine.decide_replay(ReplayDecision::PlayAgain).unwrap_err(),
        ShotError::RoundInProgress
    );

    for &(r, c) in empty_cells(&engine).iter().take(15) {
        engine.fire(r, c).unwrap();
    }
    assert_eq!(engine.status(), GameStatus::Lost);

    assert_eq!(
        engine.decide_replay(ReplayDecision::Quit).unwrap(),
        RoundControl::Exit
    );
    assert_eq!(engine.status(), GameStatus::Lost);

    assert_eq!(
        engine.decide_replay(ReplayDecision::PlayAgain).unwrap(),
        RoundControl::NewRound
    );
    assert_eq!(engine.status(), GameStatus::InProgress);
    assert_eq!(engine.counters(), Counters::default());
}

#[test]
fn rejected_shots_leave_state_untouched() {
    let mut engine = seeded(2);
    assert_eq!(
        engine.fire(10, 0).unwrap_err(),
        ShotError::OutOfBounds {
            row: 10,
            col: 0,
            size: BOARD_SIZE
        }
    );
    let (r, c) = empty_cells(&engine)[0];
    engine.fire(r, c).unwrap();
    let before = engine.counters();
    assert_eq!(
        engine.fire(r, c).unwrap_err(),
        ShotError::AlreadyFired { row: r, col: c }
    );
    assert_eq!(engine.counters(), before);
}

#[test]
fn remaining_lengths_track_sunk_ships() {
    let config = GameConfig::new(&[1, 3, 3], 6);
    let mut engine = GameEngine::with_layout(
        config,
        &[
            (0, 0, Orientation::Horizontal),
            (2, 0, Orientation::Horizontal),
            (4, 0, Orientation::Horizontal),
        ],
    )
    .unwrap();
    for c in 0..3 {
        engine.fire(2, c).unwrap();
    }
    let mut remaining = engine.remaining_lengths();
    remaining.sort();
    assert_eq!(remaining, vec![1, 3]);
}

#[test]
fn same_seed_same_layout() {
    let a = seeded(1234);
    let b = seeded(1234);
    assert_eq!(a.board().ship_map(), b.board().ship_map());
}
