//! Invariants that hold over arbitrary input sequences.

use std::time::Duration;

use proptest::prelude::*;
use quadris_engine::{Command, Engine, EngineConfig, PieceSeed};

#[derive(Debug, Clone, Copy)]
enum Input {
    Command(Command),
    Tick(u64),
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        3 => (0..Command::ALL.len()).prop_map(|i| Input::Command(Command::ALL[i])),
        1 => (0u64..2000).prop_map(Input::Tick),
    ]
}

fn config() -> impl Strategy<Value = EngineConfig> {
    (4usize..12, 4usize..24).prop_map(|(columns, rows)| EngineConfig {
        columns,
        rows,
        ..EngineConfig::default()
    })
}

proptest! {
    #[test]
    fn generated_games_respect_core_invariants(
        seed in any::<[u8; 16]>(),
        config in config(),
        inputs in prop::collection::vec(input(), 1..300),
    ) {
        let mut engine = Engine::with_seed(config, PieceSeed::from_bytes(seed)).unwrap();
        let mut last_score = 0;
        let mut last_pieces = 0;

        for input in inputs {
            let was_game_over = engine.is_game_over();
            let before = engine.snapshot();
            match input {
                Input::Command(command) => {
                    engine.apply(command);
                }
                Input::Tick(ms) => engine.tick(Duration::from_millis(ms)),
            }

            let grid = engine.grid();
            prop_assert_eq!(grid.width(), config.columns);
            prop_assert_eq!(grid.height(), config.rows);
            prop_assert!((0..grid.height()).all(|y| !grid.is_row_filled(y)));

            prop_assert!(engine.score() >= last_score);
            prop_assert!(engine.stats().completed_pieces() >= last_pieces);
            prop_assert_eq!(engine.level(), 1 + engine.lines() / 10);
            last_score = engine.score();
            last_pieces = engine.stats().completed_pieces();

            if engine.is_game_over() {
                if was_game_over {
                    prop_assert_eq!(engine.snapshot(), before);
                }
            } else {
                let active = *engine.active_piece();
                prop_assert!(!engine.collides(&active, 0, 0));
                let ghost = engine.ghost_piece();
                prop_assert!(engine.collides(&ghost, 0, 1));
                prop_assert_eq!(ghost.position().x(), active.position().x());
            }
        }
    }

    #[test]
    fn moves_are_undone_exactly(
        seed in any::<[u8; 16]>(),
        dx in -3i32..=3,
    ) {
        let mut engine =
            Engine::with_seed(EngineConfig::default(), PieceSeed::from_bytes(seed)).unwrap();
        let start = *engine.active_piece();
        if engine.try_move(dx, 0) {
            prop_assert_eq!(engine.active_piece().position().x(), start.position().x() + dx);
            prop_assert!(engine.try_move(-dx, 0));
            prop_assert_eq!(engine.active_piece(), &start);
        } else {
            prop_assert_eq!(engine.active_piece(), &start);
        }
    }

    #[test]
    fn full_rotation_cycle_in_open_space_returns_to_start(seed in any::<[u8; 16]>()) {
        let mut engine =
            Engine::with_seed(EngineConfig::default(), PieceSeed::from_bytes(seed)).unwrap();
        for _ in 0..5 {
            engine.try_move(0, 1);
        }
        let start = *engine.active_piece();
        for _ in 0..start.kind().rotation_count() {
            prop_assert!(engine.try_rotate());
        }
        prop_assert_eq!(engine.active_piece(), &start);
    }
}
