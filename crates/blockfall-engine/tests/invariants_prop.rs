//! Rollout properties of the game state machine over generated seeds, board
//! sizes and action sequences.

use blockfall_engine::{
    GameConfig, GameState, GameStats, MoveDirection, PieceSeed, Placement, SpawnRotation,
    reward,
};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Action {
    Tick,
    Move(MoveDirection),
    Rotate,
    HardDrop,
    Place(usize),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => Just(Action::Tick),
        2 => prop_oneof![
            Just(MoveDirection::Left),
            Just(MoveDirection::Right),
            Just(MoveDirection::Down),
        ]
        .prop_map(Action::Move),
        1 => Just(Action::Rotate),
        1 => Just(Action::HardDrop),
        1 => any::<usize>().prop_map(Action::Place),
    ]
}

fn config() -> impl Strategy<Value = GameConfig> {
    (4usize..=22, 4usize..=12, any::<bool>()).prop_map(|(rows, cols, zero)| GameConfig {
        rows,
        cols,
        spawn_rotation: if zero {
            SpawnRotation::Zero
        } else {
            SpawnRotation::Random
        },
    })
}

fn counters(stats: &GameStats) -> [usize; 15] {
    let [c0, c1, c2, c3, c4] = *stats.line_cleared_counter();
    [
        stats.score(),
        stats.left_moves(),
        stats.right_moves(),
        stats.rotations(),
        stats.soft_drops(),
        stats.soft_drop_distance(),
        stats.hard_drops(),
        stats.hard_drop_distance(),
        stats.completed_pieces(),
        stats.total_cleared_lines(),
        c0,
        c1,
        c2,
        c3,
        c4,
    ]
}

fn apply(state: &mut GameState, action: Action) {
    match action {
        Action::Tick => state.tick(),
        Action::Move(direction) => {
            state.apply_move(direction);
        }
        Action::Rotate => {
            state.apply_rotate();
        }
        Action::HardDrop => {
            state.apply_hard_drop();
        }
        Action::Place(code) => {
            let cols = state.col_count();
            let placement = Placement::from_action_code(code % Placement::action_count(cols), cols)
                .expect("code reduced into range");
            state.apply_placement(placement);
        }
    }
}

fn frozen_cell_count(state: &GameState) -> usize {
    state.board().rows().flatten().filter(|b| b.is_frozen()).count()
}

proptest! {
    #[test]
    fn rollout_keeps_invariants(
        seed in any::<[u8; 16]>(),
        config in config(),
        actions in prop::collection::vec(action(), 1..400),
    ) {
        let mut state = GameState::with_seed(config, PieceSeed::from_bytes(seed)).unwrap();
        let rows = i32::try_from(config.rows).unwrap();
        let cols = i32::try_from(config.cols).unwrap();

        for action in actions {
            let before = state.clone();
            apply(&mut state, action);

            // Building the view panics if the falling piece overlaps frozen cells.
            let view = state.view();
            prop_assert_eq!(view.row_count(), config.rows);
            prop_assert_eq!(view.col_count(), config.cols);
            if let Some(falling) = state.falling_piece() {
                for (row, col) in falling.cells() {
                    prop_assert!((0..rows).contains(&row) && (0..cols).contains(&col));
                }
            }

            let (old, new) = (counters(before.stats()), counters(state.stats()));
            for (i, (o, n)) in old.iter().zip(&new).enumerate() {
                prop_assert!(n >= o, "counter {} decreased: {} -> {}", i, o, n);
            }
            prop_assert!(reward(before.stats(), state.stats()) >= 0);

            // Every landing adds four cells and every cleared row removes a row's worth.
            let stats = state.stats();
            prop_assert_eq!(
                frozen_cell_count(&state) + stats.total_cleared_lines() * config.cols,
                4 * stats.completed_pieces()
            );

            if before.status().is_terminated() {
                prop_assert!(state.status().is_terminated());
                prop_assert_eq!(state.stats(), before.stats());
                prop_assert_eq!(state.board(), before.board());
            }
            if state.stats().completed_pieces() > before.stats().completed_pieces() {
                prop_assert_eq!(state.stats().completed_pieces(), before.stats().completed_pieces() + 1);
                if let Some(falling) = state.falling_piece() {
                    prop_assert_eq!(falling.piece(), before.next_piece());
                }
            }
        }
    }

    #[test]
    fn same_seed_same_game(
        seed in any::<[u8; 16]>(),
        actions in prop::collection::vec(action(), 1..200),
    ) {
        let seed = PieceSeed::from_bytes(seed);
        let mut a = GameState::with_seed(GameConfig::default(), seed).unwrap();
        let mut b = GameState::with_seed(GameConfig::default(), seed).unwrap();
        for action in actions {
            apply(&mut a, action);
            apply(&mut b, action);
            prop_assert_eq!(a.board(), b.board());
            prop_assert_eq!(a.falling_piece(), b.falling_piece());
            prop_assert_eq!(a.next_piece(), b.next_piece());
            prop_assert_eq!(a.stats(), b.stats());
        }
    }

    #[test]
    fn observation_mirrors_view(
        seed in any::<[u8; 16]>(),
        actions in prop::collection::vec(action(), 1..200),
    ) {
        let mut state = GameState::with_seed(GameConfig::default(), PieceSeed::from_bytes(seed)).unwrap();
        for action in actions {
            apply(&mut state, action);
        }
        let view = state.view();
        let obs = state.observation();
        prop_assert_eq!(obs.shape(), [2, view.row_count(), view.col_count()]);
        for (row, cells) in view.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                prop_assert_eq!(obs.frozen(row, col) > 0.5, cell.is_frozen());
                prop_assert_eq!(obs.falling(row, col) > 0.5, cell.is_falling());
            }
        }
    }
}

#[test]
fn random_placements_terminate_once() {
    let seed: PieceSeed = "00000000000000000000000000000042".parse().unwrap();
    let mut state = GameState::with_seed(GameConfig::default(), seed).unwrap();
    let cols = state.col_count();
    let mut terminations = 0;
    for step in 0..10_000 {
        let was_running = state.status().is_running();
        let code = (step * 7) % Placement::action_count(cols);
        state.apply_placement(Placement::from_action_code(code, cols).unwrap());
        state.tick();
        if was_running && state.status().is_terminated() {
            terminations += 1;
        }
    }
    assert_eq!(terminations, 1);
}
