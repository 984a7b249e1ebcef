//! Integration tests for the game loop: setup, moves, scoring and terminal states

use std::cell::RefCell;
use std::rc::Rc;

use twenty48::core::{
    GameConfig, GameManager, GameViewInfo, Grid, ScriptedSpawner, TransitionPolicy,
};
use twenty48::types::{Direction, Position, PositionTransition, TransitionKind};

fn scripted_game(
    config: GameConfig,
    rows: &[Vec<u32>],
    script: &[(i32, i32, u32)],
) -> GameManager<ScriptedSpawner> {
    let spawner = ScriptedSpawner::new(script.iter().map(|&(x, y, v)| (Position::new(x, y), v)));
    let mut game = GameManager::with_spawner(config, spawner).unwrap();
    game.set_grid(Grid::from_rows(rows).unwrap()).unwrap();
    game
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameManager::new(GameConfig::default(), 12345).unwrap();
    game.setup();

    assert_eq!(game.grid().tile_count(), 2);
    assert_eq!(game.score(), 0);
    assert!(!game.is_game_terminated());
}

#[test]
fn test_setup_never_terminated() {
    for size in 2..=6 {
        for seed in 0..20 {
            let mut game = GameManager::new(GameConfig::with_size(size), seed).unwrap();
            game.setup();
            assert!(!game.is_game_terminated(), "size {} seed {}", size, seed);
        }
    }
}

#[test]
fn test_two_twos_merge_left() {
    let mut game = scripted_game(
        GameConfig::default(),
        &[vec![2, 2, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]],
        &[(2, 3, 2)],
    );

    let view = game.make_move(Direction::Left);
    assert_eq!(view.score, 4);
    assert_eq!(view.grid.to_rows()[0], vec![4, 0, 0, 0]);
    assert_eq!(view.grid.tile_count(), 2);

    let merged = view.grid.cell_content(Position::new(0, 0)).unwrap();
    assert!(merged.is_merge_result());
    let (a, b) = merged.merged_from().unwrap();
    let retired: Vec<_> = game.retired_tiles().iter().map(|t| t.id()).collect();
    assert!(retired.contains(&a) && retired.contains(&b));
}

#[test]
fn test_checkerboard_is_over_after_next_move() {
    let mut game = scripted_game(
        GameConfig::default(),
        &[
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
        ],
        &[],
    );
    for dir in Direction::ALL {
        game.make_move(dir);
        assert!(game.is_game_terminated());
    }
    assert_eq!(game.score(), 0);
}

#[test]
fn test_merged_tile_blocks_second_merge_in_same_move() {
    // 8+8 merges and the spawn refills the row; 16+16 is still available
    let mut game = scripted_game(
        GameConfig::default(),
        &[
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
            vec![2, 4, 2, 4],
            vec![8, 8, 16, 32],
        ],
        &[(3, 3, 2)],
    );
    let view = game.make_move(Direction::Left);
    // the new 16 does not absorb the old 16 sliding in behind it
    assert_eq!(view.grid.to_rows()[3], vec![16, 16, 32, 2]);
    assert_eq!(view.score, 16);
    assert!(!game.over());

    let view = game.make_move(Direction::Left);
    assert_eq!(view.score, 16 + 32);
}

#[test]
fn test_win_then_keep_playing() {
    let config = GameConfig {
        win_value: 16,
        ..GameConfig::default()
    };
    let mut game = scripted_game(
        config,
        &[vec![8, 8, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]],
        &[(3, 3, 2), (3, 2, 2)],
    );

    let view = game.make_move(Direction::Left);
    assert!(view.won);
    assert!(view.terminated);

    let ignored = game.make_move(Direction::Right);
    assert!(ignored.transitions.is_empty());
    assert_eq!(ignored.grid, view.grid);

    let view = game.continue_playing();
    assert!(!view.terminated);
    assert!(view.won);

    let view = game.make_move(Direction::Right);
    assert_eq!(view.grid.to_rows()[0], vec![0, 0, 0, 16]);
    assert!(!view.terminated);
}

#[test]
fn test_random_play_invariants() {
    for seed in 0..10u64 {
        let mut game = GameManager::new(GameConfig::default(), seed).unwrap();
        game.setup();
        let mut last_score = 0;

        for step in 0..2000 {
            let dir = Direction::ALL[(step * 7 + seed as usize) % 4];
            let before = game.grid().to_rows();
            let view = game.make_move(dir);

            assert!(view.score >= last_score, "score went down");
            last_score = view.score;

            let grid = game.grid();
            assert_eq!(
                grid.available_cells().len() + grid.occupied_cells().len(),
                grid.size() * grid.size()
            );
            for tile in grid.tiles() {
                let at_cell = grid.cell_content(tile.position()).map(|t| t.id());
                assert_eq!(at_cell, Some(tile.id()));
            }

            if game.grid().to_rows() == before {
                assert!(view.transitions.is_empty());
            }
            if view.terminated {
                break;
            }
        }
    }
}

#[test]
fn test_noop_move_has_empty_log_and_no_spawn() {
    let mut game = scripted_game(
        GameConfig::default(),
        &[vec![2, 4, 0, 0], vec![8, 0, 0, 0], vec![0; 4], vec![0; 4]],
        &[(3, 3, 2)],
    );
    let view = game.make_move(Direction::Left);
    assert!(view.transitions.is_empty());
    assert_eq!(view.grid.tile_count(), 3);
    assert_eq!(game.spawner().remaining(), 1);
}

#[test]
fn test_transition_policies_differ() {
    let rows = vec![vec![0, 2, 0, 0], vec![4, 8, 0, 0], vec![0; 4], vec![0; 4]];

    let mut per_tile = scripted_game(GameConfig::default(), &rows, &[]);
    let view = per_tile.make_move(Direction::Left);
    assert_eq!(
        view.transitions,
        vec![PositionTransition::moved(Position::new(1, 0), Position::new(0, 0))]
    );

    let legacy_config = GameConfig {
        transitions: TransitionPolicy::Legacy,
        ..GameConfig::default()
    };
    let mut legacy = scripted_game(legacy_config, &rows, &[]);
    let view = legacy.make_move(Direction::Left);
    assert!(view.transitions.len() > 1);
    assert!(view.transitions.iter().all(|t| t.kind == TransitionKind::Moved));
    assert!(view.transitions.iter().any(PositionTransition::is_stationary));
}

#[test]
fn test_observer_sees_every_operation() {
    let seen: Rc<RefCell<Vec<GameViewInfo>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut game = GameManager::new(GameConfig::default(), 3).unwrap();
    game.set_observer(Box::new(move |info: &GameViewInfo| {
        sink.borrow_mut().push(info.clone())
    }));

    game.setup();
    let view = game.make_move(Direction::Up);
    game.continue_playing();
    game.restart();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[1], view);
    assert_eq!(seen[3].score, 0);
}

#[test]
fn test_move_codes() {
    let mut game = GameManager::new(GameConfig::default(), 9).unwrap();
    game.setup();
    for code in 0..4u8 {
        assert!(game.move_code(code).is_ok());
    }
    assert!(game.move_code(7).is_err());
}
