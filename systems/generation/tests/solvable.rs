use gridwalk_core::{GameStatus, RulesConfig};
use gridwalk_system_generation::{CountRange, GenerationConfig, Generator};
use gridwalk_system_pathfinding::{find_winning_path, winning_path_exists};
use gridwalk_world::{apply_move, query, Game};

fn dense() -> GenerationConfig {
    GenerationConfig::new(16, 16)
        .with_walls(CountRange::new(30, 60))
        .with_traps(CountRange::new(20, 40))
        .with_bonuses(CountRange::new(10, 20))
        .with_hazards(CountRange::new(20, 40))
}

#[test]
fn solvable_boards_admit_a_winning_route() {
    let generator = Generator::new(dense());
    let rules = RulesConfig::new(60, 40);

    for seed in 0..8 {
        let board = generator
            .generate_solvable(seed, &rules, 64)
            .expect("board generated");
        assert!(winning_path_exists(
            &board,
            &rules,
            board.start(),
            rules.initial_resources()
        ));
    }
}

#[test]
fn generated_route_wins_when_played() {
    let generator = Generator::new(dense());
    let rules = RulesConfig::new(60, 40);
    let board = generator
        .generate_solvable(11, &rules, 64)
        .expect("board generated");
    let route = find_winning_path(&board, &rules, board.start(), rules.initial_resources())
        .expect("solvable board");

    let mut game = Game::new(board, rules).expect("valid rules");
    for direction in route.directions() {
        let _ = apply_move(&mut game, *direction).expect("move accepted");
    }

    assert_eq!(query::status(&game), GameStatus::Won);
}

#[test]
fn exhausted_retries_keep_the_last_board() {
    let generator = Generator::new(dense());
    // A single move can never cross a sixteen-column board.
    let rules = RulesConfig::new(1, 1);

    let board = generator
        .generate_solvable(5, &rules, 3)
        .expect("board generated");

    assert!(!winning_path_exists(
        &board,
        &rules,
        board.start(),
        rules.initial_resources()
    ));
    assert_eq!(board.width(), 16);
}
