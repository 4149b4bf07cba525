use rand::rngs::SmallRng;
use rand::SeedableRng;
use solo_battleship::{
    ai, run_round, Action, AiPlayer, BitBoard, Cells, GameApi, GameConfig, GameEngine,
    GameStatus, Player, RandomPlayer, ReplayDecision, RoundControl, ShotError, TargetView,
};

fn play<P: Player>(player: &mut P, seed: u64) -> (GameEngine, solo_battleship::RoundSummary) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut engine = GameEngine::new(GameConfig::default().with_seed(seed)).unwrap();
    let summary = run_round(player, &mut engine, &mut rng).unwrap();
    (engine, summary)
}

#[test]
fn ai_player_finishes_a_round() {
    for seed in 0..8 {
        let (engine, summary) = play(&mut AiPlayer::new(), seed);
        assert!(engine.is_terminal());
        assert!(!summary.quit);
        assert_eq!(summary.status, engine.status());
        assert_eq!(
            summary.counters.total_hits + summary.counters.total_misses,
            summary.shots
        );
        assert_eq!(engine.board().fired().count_ones(), summary.shots);
    }
}

#[test]
fn random_player_finishes_a_round() {
    let (engine, summary) = play(&mut RandomPlayer::new(), 99);
    assert!(matches!(engine.status(), GameStatus::Won | GameStatus::Lost));
    assert_eq!(
        summary.counters.total_hits + summary.counters.total_misses,
        summary.shots
    );
}

#[test]
fn ai_player_wins_on_a_crowded_board() {
    // one empty cell: a single strike of five misses is impossible
    let config = GameConfig::new(&[3, 3, 2], 3).with_seed(4);
    let mut engine = GameEngine::new(config).unwrap();
    let mut rng = SmallRng::seed_from_u64(4);
    let summary = run_round(&mut AiPlayer::new(), &mut engine, &mut rng).unwrap();
    assert_eq!(summary.status, GameStatus::Won);
    assert!(summary.shots <= 9);
}

#[test]
fn ai_player_never_repeats_a_cell() {
    struct Recording {
        inner: AiPlayer,
        shots: Vec<(usize, usize)>,
    }
    impl Player for Recording {
        fn select_action(&mut self, rng: &mut SmallRng, view: &TargetView) -> Action {
            let action = self.inner.select_action(rng, view);
            if let Action::Fire(r, c) = action {
                assert!(!view.is_fired(r, c), "({}, {}) fired twice", r, c);
                self.shots.push((r, c));
            }
            action
        }
    }

    let mut player = Recording {
        inner: AiPlayer::new(),
        shots: Vec::new(),
    };
    let (_, summary) = play(&mut player, 17);
    assert_eq!(player.shots.len(), summary.shots);
}

#[test]
fn quitting_player_leaves_round_open() {
    struct Quitter;
    impl Player for Quitter {
        fn select_action(&mut self, _rng: &mut SmallRng, _view: &TargetView) -> Action {
            Action::Quit
        }
    }
    let (mut engine, summary) = play(&mut Quitter, 1);
    assert!(summary.quit);
    assert_eq!(summary.shots, 0);
    assert_eq!(summary.status, GameStatus::InProgress);
    assert_eq!(
        engine.decide_replay(ReplayDecision::Quit),
        Err(ShotError::RoundInProgress)
    );
}

#[test]
fn rejected_shot_aborts_unless_player_recovers() {
    struct OutOfRange;
    impl Player for OutOfRange {
        fn select_action(&mut self, _rng: &mut SmallRng, view: &TargetView) -> Action {
            Action::Fire(view.size(), 0)
        }
    }
    let mut rng = SmallRng::seed_from_u64(0);
    let mut engine = GameEngine::new(GameConfig::default().with_seed(0)).unwrap();
    let err = run_round(&mut OutOfRange, &mut engine, &mut rng).unwrap_err();
    assert!(matches!(err, ShotError::OutOfBounds { row: 10, .. }));
}

#[test]
fn new_round_action_resets_and_continues() {
    struct Restarter {
        restarted: bool,
    }
    impl Player for Restarter {
        fn select_action(&mut self, rng: &mut SmallRng, view: &TargetView) -> Action {
            if !self.restarted && view.counters.total_misses + view.counters.total_hits == 3 {
                self.restarted = true;
                return Action::NewRound;
            }
            RandomPlayer::new().select_action(rng, view)
        }
    }
    let mut player = Restarter { restarted: false };
    let (engine, summary) = play(&mut player, 6);
    assert!(player.restarted);
    assert_eq!(engine.round(), 2);
    assert_eq!(engine.board().fired().count_ones(), summary.shots);
}

#[test]
fn game_api_drives_a_boxed_engine() {
    let mut game: Box<dyn GameApi> =
        Box::new(GameEngine::new(GameConfig::default().with_seed(12)).unwrap());
    let mut rng = SmallRng::seed_from_u64(12);
    let summary = run_round(&mut AiPlayer::new(), game.as_mut(), &mut rng).unwrap();
    assert!(summary.status.is_terminal());
    assert_eq!(
        game.decide_replay(ReplayDecision::PlayAgain),
        Ok(RoundControl::NewRound)
    );
    assert_eq!(game.status(), GameStatus::InProgress);
    assert!(game.hits().is_empty() && game.misses().is_empty());
}

#[test]
fn pdf_favours_cells_next_to_hits() {
    let mut hits = BitBoard::<Cells>::new(10).unwrap();
    hits.set(5, 5).unwrap();
    let misses = BitBoard::<Cells>::new(10).unwrap();
    let pdf = ai::calc_pdf(&hits, &misses, &[3]);

    let total: f64 = pdf.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert_eq!(pdf[5 * 10 + 5], 0.0);
    assert!(pdf[5 * 10 + 6] > pdf[0]);
    assert!(pdf[4 * 10 + 5] > pdf[9 * 10 + 9]);
}

#[test]
fn pdf_falls_back_to_uniform_and_sampling_stops_when_full() {
    let size = 3;
    let mut misses = BitBoard::<Cells>::new(size).unwrap();
    misses.set(1, 0).unwrap();
    misses.set(1, 1).unwrap();
    misses.set(1, 2).unwrap();
    misses.set(0, 1).unwrap();
    misses.set(2, 1).unwrap();
    let hits = BitBoard::<Cells>::new(size).unwrap();
    // no run of three survives, so each of the four corners gets a quarter
    let pdf = ai::calc_pdf(&hits, &misses, &[3]);
    for (r, c) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
        assert!((pdf[r * size + c] - 0.25).abs() < 1e-9);
    }

    let mut rng = SmallRng::seed_from_u64(3);
    let all = !BitBoard::<Cells>::new(size).unwrap();
    let pdf = ai::calc_pdf(&hits, &all, &[3]);
    assert!(pdf.iter().all(|&p| p == 0.0));
    assert_eq!(ai::sample_pdf(&pdf, size, &mut rng), None);
}

#[test]
fn sampling_only_picks_weighted_cells() {
    let size = 4;
    let mut pdf = vec![0.0; size * size];
    pdf[2 * size + 3] = 0.9;
    pdf[1] = 0.1;
    let mut rng = SmallRng::seed_from_u64(8);
    let mut peak = 0;
    for _ in 0..200 {
        let pick = ai::sample_pdf(&pdf, size, &mut rng).unwrap();
        assert!(pick == (2, 3) || pick == (0, 1));
        if pick == (2, 3) {
            peak += 1;
        }
    }
    // squaring 0.9 vs 0.1 weights the peak 81:1
    assert!(peak > 180);
}
