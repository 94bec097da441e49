use rand::rngs::SmallRng;
use rand::SeedableRng;
use twenty48::{
    evaluate_move, BoardError, Direction, GameEngine, GameState, GameStatus, Grid,
    MoveEfficiency, MAX_TILE, NUM_CELLS,
};

fn engine_with(rows: [[u32; 4]; 4]) -> GameEngine {
    let state = GameState {
        grid: Grid::from_rows(rows).unwrap(),
        score: 0,
        max_tile: 0,
    };
    GameEngine::from_state(state, SmallRng::seed_from_u64(7)).unwrap()
}

fn distinct_rows() -> [[u32; 4]; 4] {
    let mut rows = [[0u32; 4]; 4];
    for r in 0..4 {
        for c in 0..4 {
            rows[r][c] = 1 << (1 + 4 * r + c);
        }
    }
    rows
}

fn tile_count(grid: &Grid) -> usize {
    NUM_CELLS - grid.empty_count()
}

#[test]
fn test_new_game_has_two_tiles() {
    let engine = GameEngine::new(SmallRng::seed_from_u64(1));
    assert_eq!(tile_count(engine.grid()), 2);
    assert!(engine
        .grid()
        .rows()
        .iter()
        .flatten()
        .all(|&v| v == 0 || v == 2 || v == 4));
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.max_tile(), 0);
    assert_eq!(engine.history_len(), 0);
    assert_eq!(engine.status(), GameStatus::InProgress);
}

#[test]
fn test_reproducible_with_seed() {
    let mut e1 = GameEngine::new(SmallRng::seed_from_u64(42));
    let mut e2 = GameEngine::new(SmallRng::seed_from_u64(42));
    assert_eq!(e1.grid(), e2.grid());
    for _ in 0..50 {
        let (d1, _) = e1.random_move();
        let (d2, _) = e2.random_move();
        assert_eq!(d1, d2);
        assert_eq!(e1.state(), e2.state());
    }
}

#[test]
fn test_move_merges_and_spawns_once() {
    let mut engine = engine_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    let outcome = engine.left();
    assert!(outcome.changed);
    assert_eq!(outcome.reward, 4);
    assert_eq!(engine.score(), 4);
    assert_eq!(engine.max_tile(), 4);
    assert_eq!(engine.grid().get(0, 0), 4);

    let (r, c, value) = outcome.spawned.expect("a tile should spawn");
    assert_eq!(engine.grid().get(r, c), value);
    assert_eq!(tile_count(engine.grid()), 2);
    assert_eq!(engine.history_len(), 1);
}

#[test]
fn test_score_and_max_tile_accumulate() {
    let mut engine = engine_with([[8, 8, 0, 0], [2, 2, 0, 0], [0; 4], [0; 4]]);
    engine.left();
    assert_eq!(engine.score(), 16 + 4);
    assert_eq!(engine.max_tile(), 16);
}

#[test]
fn test_noop_move_spawns_nothing() {
    let mut engine = engine_with([[2, 0, 0, 0], [4, 0, 0, 0], [0; 4], [0; 4]]);
    let before = engine.state();

    let first = engine.left();
    assert!(!first.changed);
    assert_eq!(first.spawned, None);
    assert_eq!(engine.state(), before);

    let second = engine.left();
    assert!(!second.changed);
    assert_eq!(engine.state(), before);

    // each call still records a snapshot
    assert_eq!(engine.history_len(), 2);
}

#[test]
fn test_every_direction_pushes_one_snapshot() {
    let mut engine = GameEngine::new(SmallRng::seed_from_u64(5));
    for (i, dir) in Direction::ALL.iter().enumerate() {
        engine.apply(*dir);
        assert_eq!(engine.history_len(), i + 1);
    }
    engine.down();
    engine.up();
    engine.right();
    engine.left();
    assert_eq!(engine.history_len(), 8);
}

#[test]
fn test_rollback_restores_grid_and_score() {
    let mut engine = engine_with([[2, 2, 4, 4], [0, 0, 2, 0], [0; 4], [0; 4]]);
    engine.left();
    let before = engine.state();
    engine.down();
    assert_ne!(engine.state().grid, before.grid);

    assert!(engine.rollback());
    assert_eq!(*engine.grid(), before.grid);
    assert_eq!(engine.score(), before.score);
    assert_eq!(engine.history_len(), 1);
}

#[test]
fn test_rollback_keeps_max_tile() {
    let mut engine = engine_with([[8, 8, 0, 0], [0; 4], [0; 4], [0; 4]]);
    engine.left();
    assert!(engine.rollback());
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.max_tile(), 16);
}

#[test]
fn test_rollback_on_empty_history_is_noop() {
    let mut engine = GameEngine::new(SmallRng::seed_from_u64(9));
    let before = engine.state();
    assert!(!engine.rollback());
    assert_eq!(engine.state(), before);
}

#[test]
fn test_rollback_then_move_snapshots_again() {
    let mut engine = engine_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    engine.left();
    engine.rollback();
    assert_eq!(engine.history_len(), 0);
    engine.right();
    assert_eq!(engine.history_len(), 1);
    assert!(engine.rollback());
    assert_eq!(engine.grid().rows()[0], [2, 2, 0, 0]);
}

#[test]
fn test_reset_keeps_history() {
    let mut engine = engine_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    engine.left();
    assert_eq!(engine.score(), 4);

    engine.reset();
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.max_tile(), 0);
    assert_eq!(tile_count(engine.grid()), 2);
    assert_eq!(engine.history_len(), 1);

    // rolls back across the reset to the board saved before the move
    assert!(engine.rollback());
    assert_eq!(engine.grid().rows()[0], [2, 2, 0, 0]);
}

#[test]
fn test_history_limit() {
    let mut engine = GameEngine::with_history_limit(SmallRng::seed_from_u64(11), 2);
    for _ in 0..6 {
        engine.random_move();
    }
    assert_eq!(engine.history_len(), 2);
    assert!(engine.rollback());
    assert!(engine.rollback());
    assert!(!engine.rollback());
}

#[test]
fn test_advise_does_not_touch_board() {
    let mut engine = GameEngine::new(SmallRng::seed_from_u64(13));
    engine.random_move();
    let before = engine.state();
    let history = engine.history_len();
    let advice = engine.advise();
    assert!(!advice.is_noop());
    assert_eq!(engine.state(), before);
    assert_eq!(engine.history_len(), history);
}

#[test]
fn test_auto_move_prefers_most_empty_cells() {
    // left and right both clear two cells; left wins the tie, up is a no-op
    let mut engine = engine_with([[2, 2, 0, 0], [4, 4, 0, 0], [0; 4], [0; 4]]);
    let (eff, outcome) = engine.auto_move();
    assert_eq!(
        eff,
        MoveEfficiency {
            direction: Direction::Left,
            empty_tiles: Some(13),
            score: 12,
        }
    );
    assert!(outcome.changed);
    assert_eq!(engine.score(), 12);
    assert_eq!(engine.grid().get(0, 0), 4);
    assert_eq!(engine.grid().get(1, 0), 8);
    assert_eq!(tile_count(engine.grid()), 3);
    assert_eq!(engine.history_len(), 1);
}

#[test]
fn test_auto_move_breaks_ties_on_score() {
    // every direction leaves twelve empty cells; horizontal moves merge the 4s
    let mut engine = engine_with([[0, 0, 0, 2], [0, 0, 0, 2], [0; 4], [4, 4, 0, 0]]);
    let ranked = twenty48::rank_moves(engine.grid(), engine.score());
    let order: Vec<_> = ranked.iter().map(|e| e.direction).collect();
    assert_eq!(
        order,
        vec![Direction::Left, Direction::Right, Direction::Up, Direction::Down]
    );
    assert!(ranked.iter().all(|e| e.empty_tiles == Some(12)));

    let (eff, _) = engine.auto_move();
    assert_eq!(eff.direction, Direction::Left);
    assert_eq!(eff.score, 8);
    assert_eq!(engine.score(), 8);
}

#[test]
fn test_auto_move_on_dead_board() {
    let mut engine = engine_with(distinct_rows());
    assert!(!engine.can_move());
    assert_eq!(engine.status(), GameStatus::Over);

    let before = engine.state();
    let (eff, outcome) = engine.auto_move();
    assert!(eff.is_noop());
    assert!(!outcome.changed);
    assert_eq!(engine.state(), before);
}

#[test]
fn test_status_won() {
    let engine = engine_with([[2048, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
    assert_eq!(engine.status(), GameStatus::Won);
}

#[test]
fn test_from_state_rejects_bad_tiles() {
    let bad: Grid = serde_json::from_str("{\"cells\":[[3,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]}")
        .unwrap();
    let state = GameState {
        grid: bad,
        score: 0,
        max_tile: 0,
    };
    let err = GameEngine::from_state(state, SmallRng::seed_from_u64(0))
        .err()
        .unwrap();
    assert_eq!(
        err,
        BoardError::InvalidTileValue {
            row: 0,
            col: 0,
            value: 3
        }
    );
}

#[test]
fn test_from_rows_rejects_tiles_above_max() {
    for value in [MAX_TILE * 2, 1 << 31] {
        let err = Grid::from_rows([[value, value, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap_err();
        assert_eq!(
            err,
            BoardError::InvalidTileValue {
                row: 0,
                col: 0,
                value
            }
        );
    }
    assert!(Grid::from_rows([[MAX_TILE, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_ok());
}

#[test]
fn test_from_state_rejects_bad_max_tile() {
    let state = GameState {
        grid: Grid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap(),
        score: 0,
        max_tile: 3,
    };
    let err = GameEngine::from_state(state, SmallRng::seed_from_u64(0))
        .err()
        .unwrap();
    assert_eq!(err, BoardError::InvalidMaxTile { value: 3 });
}

#[test]
fn test_largest_tiles_merge_and_score_saturates() {
    let state = GameState {
        grid: Grid::from_rows([[MAX_TILE, MAX_TILE, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap(),
        score: u32::MAX - 1,
        max_tile: MAX_TILE,
    };
    let mut engine = GameEngine::from_state(state, SmallRng::seed_from_u64(3)).unwrap();
    let outcome = engine.left();
    assert!(outcome.changed);
    assert_eq!(outcome.reward, MAX_TILE * 2);
    assert_eq!(engine.grid().get(0, 0), MAX_TILE * 2);
    assert_eq!(engine.max_tile(), MAX_TILE * 2);
    assert_eq!(engine.score(), u32::MAX);

    assert!(engine.rollback());
    assert_eq!(engine.score(), u32::MAX - 1);
}

#[test]
fn test_evaluation_score_saturates() {
    let grid = Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    let eff = evaluate_move(&grid, u32::MAX, Direction::Left);
    assert_eq!(eff.score, u32::MAX);
    assert_eq!(eff.empty_tiles, Some(14));

    let mut engine = GameEngine::from_state(
        GameState {
            grid,
            score: u32::MAX,
            max_tile: 0,
        },
        SmallRng::seed_from_u64(5),
    )
    .unwrap();
    assert_eq!(engine.advise().score, u32::MAX);
    engine.auto_move();
    assert_eq!(engine.score(), u32::MAX);
}

#[test]
fn test_random_game_runs_to_completion() {
    let mut engine = GameEngine::new(SmallRng::seed_from_u64(123));
    let mut last_score = 0;
    let mut turns = 0;
    while engine.can_move() {
        engine.random_move();
        assert!(engine.score() >= last_score);
        last_score = engine.score();
        turns += 1;
        if turns > 100_000 {
            panic!("game took too many turns");
        }
    }
    assert_eq!(engine.status(), GameStatus::Over);
}
