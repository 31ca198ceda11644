//! Turn resolution and lifecycle of the game engine, driven by scripted dice.

use snakes_ladders_rs::board::{Adornment, Board};
use snakes_ladders_rs::config::GameConfig;
use snakes_ladders_rs::dice::ScriptedDice;
use snakes_ladders_rs::game::{Game, GameError, GameSettings, Player};
use snakes_ladders_rs::types::GameStatus;

fn settings() -> GameSettings {
    GameSettings {
        min_players: 1,
        max_players: 10,
        max_adornment_chain_length: 5,
    }
}

fn game_with(
    size: u32,
    adornments: Vec<Adornment>,
    rolls: Vec<u32>,
    settings: GameSettings,
) -> Game<ScriptedDice> {
    let board = Board::new(size, adornments).unwrap();
    let dice = ScriptedDice::new(rolls).unwrap();
    Game::new(board, dice, settings).unwrap()
}

/// Single-player game already started.
fn solo(size: u32, adornments: Vec<Adornment>, rolls: Vec<u32>) -> (Game<ScriptedDice>, Player) {
    let mut game = game_with(size, adornments, rolls, settings());
    let player = Player::new("Player");
    game.add_player(player.clone()).unwrap();
    game.start().unwrap();
    (game, player)
}

#[test]
fn test_player_starts_at_position_one() {
    let mut game = game_with(100, Vec::new(), vec![1], settings());
    let player = Player::new("Player");
    game.add_player(player.clone()).unwrap();
    assert_eq!(game.position_of(&player), Some(1));
    assert_eq!(game.status(), GameStatus::NotStarted);
}

#[test]
fn test_roll_three_from_start() {
    let (mut game, player) = solo(100, Vec::new(), vec![3]);
    let result = game.next_move().unwrap();

    assert_eq!(result.player, player);
    assert_eq!(result.previous_position, 1);
    assert_eq!(result.position_after_roll, 4);
    assert_eq!(result.final_position, 4);
    assert_eq!(result.rolled_value, 3);
    assert!(result.adornments_traversed.is_empty());
    assert_eq!(game.position_of(&player), Some(4));
    assert!(!game.is_over());
}

#[test]
fn test_two_moves_accumulate() {
    let (mut game, player) = solo(100, Vec::new(), vec![3, 4]);
    game.next_move().unwrap();
    assert_eq!(game.position_of(&player), Some(4));
    game.next_move().unwrap();
    assert_eq!(game.position_of(&player), Some(8));
    assert_eq!(game.turn(), 2);
}

#[test]
fn test_exact_landing_on_last_cell_wins() {
    let (mut game, player) = solo(100, Vec::new(), vec![96, 3]);
    game.next_move().unwrap();
    assert_eq!(game.position_of(&player), Some(97));
    assert!(game.winner().is_none());

    let result = game.next_move().unwrap();
    assert_eq!(result.final_position, 100);
    assert!(game.is_over());
    assert_eq!(game.status(), GameStatus::Finished);
    assert_eq!(game.winner(), Some(&player));
}

#[test]
fn test_overshoot_wastes_the_turn() {
    let (mut game, player) = solo(100, Vec::new(), vec![96, 4]);
    game.next_move().unwrap();
    let result = game.next_move().unwrap();

    assert_eq!(result.previous_position, 97);
    assert_eq!(result.position_after_roll, 97);
    assert_eq!(result.final_position, 97);
    assert!(result.was_wasted());
    assert_eq!(game.position_of(&player), Some(97));
    assert!(!game.is_over());
    assert!(game.winner().is_none());
}

#[test]
fn test_single_adornment_hop() {
    let (mut game, player) = solo(100, vec![Adornment::shortcut(5, 20)], vec![4]);
    let result = game.next_move().unwrap();

    assert_eq!(result.position_after_roll, 5);
    assert_eq!(result.final_position, 20);
    assert_eq!(
        result.adornments_traversed.as_slice(),
        &[Adornment::shortcut(5, 20)]
    );
    assert_eq!(game.position_of(&player), Some(20));
}

#[test]
fn test_chained_adornments_resolve_in_order() {
    let (mut game, _) = solo(
        100,
        vec![Adornment::shortcut(5, 20), Adornment::shortcut(20, 40)],
        vec![4],
    );
    let result = game.next_move().unwrap();

    assert_eq!(result.final_position, 40);
    assert_eq!(
        result.adornments_traversed.as_slice(),
        &[Adornment::shortcut(5, 20), Adornment::shortcut(20, 40)]
    );
}

#[test]
fn test_mixed_chain_with_setback() {
    let (mut game, _) = solo(
        100,
        vec![Adornment::setback(30, 12), Adornment::shortcut(12, 25)],
        vec![29],
    );
    let result = game.next_move().unwrap();
    assert_eq!(result.position_after_roll, 30);
    assert_eq!(result.final_position, 25);
    assert_eq!(result.adornments_traversed.len(), 2);
}

#[test]
fn test_chain_stops_silently_at_cap() {
    let cycle = vec![
        Adornment::shortcut(5, 20),
        Adornment::shortcut(20, 30),
        Adornment::setback(30, 5),
    ];
    let mut game = game_with(
        100,
        cycle,
        vec![4],
        GameSettings {
            max_adornment_chain_length: 2,
            ..settings()
        },
    );
    let player = Player::new("Player");
    game.add_player(player.clone()).unwrap();
    game.start().unwrap();

    let result = game.next_move().unwrap();
    // Another adornment starts on 30, but the cap of two hops is spent.
    assert_eq!(result.adornments_traversed.len(), 2);
    assert_eq!(result.final_position, 30);
    assert!(game.board().adornment_at(30).is_some());
    assert_eq!(game.position_of(&player), Some(30));
    assert_eq!(game.status(), GameStatus::InProgress);
}

#[test]
fn test_cycle_terminates_at_cap() {
    let cycle = vec![
        Adornment::shortcut(5, 20),
        Adornment::shortcut(20, 30),
        Adornment::setback(30, 5),
    ];
    let mut game = game_with(100, cycle, vec![4], settings());
    game.add_player(Player::new("Player")).unwrap();
    game.start().unwrap();

    let result = game.next_move().unwrap();
    // 5 -> 20 -> 30 -> 5 -> 20 -> 30 with a cap of five.
    assert_eq!(result.adornments_traversed.len(), 5);
    assert_eq!(result.final_position, 30);
}

#[test]
fn test_add_player_beyond_capacity() {
    let mut game = game_with(
        100,
        Vec::new(),
        vec![1],
        GameSettings {
            min_players: 1,
            max_players: 2,
            max_adornment_chain_length: 5,
        },
    );
    game.add_player(Player::new("A")).unwrap();
    game.add_player(Player::new("B")).unwrap();

    let err = game.add_player(Player::new("C")).unwrap_err();
    assert_eq!(err, GameError::CapacityExceeded { max: 2 });
    assert_eq!(game.players().len(), 2);
}

#[test]
fn test_invalid_player_leaves_turn_order_untouched() {
    let mut game = game_with(100, Vec::new(), vec![1], settings());
    game.add_player(Player::new("A")).unwrap();

    assert!(matches!(
        game.add_player(Player::new("A")),
        Err(GameError::InvalidPlayer { .. })
    ));
    assert!(matches!(
        game.add_player(Player::new("")),
        Err(GameError::InvalidPlayer { .. })
    ));
    assert_eq!(game.turn_order().count(), 1);
}

#[test]
fn test_start_requires_player_count_in_range() {
    let mut game = game_with(
        100,
        Vec::new(),
        vec![1],
        GameSettings {
            min_players: 2,
            max_players: 4,
            max_adornment_chain_length: 5,
        },
    );
    game.add_player(Player::new("Lonely")).unwrap();

    assert_eq!(
        game.start(),
        Err(GameError::InvalidPlayerCount {
            min: 2,
            max: 4,
            actual: 1
        })
    );
    assert_eq!(game.status(), GameStatus::NotStarted);

    game.add_player(Player::new("Friend")).unwrap();
    assert!(game.start().is_ok());
}

#[test]
fn test_start_twice_fails() {
    let (mut game, _) = solo(100, Vec::new(), vec![1]);
    assert_eq!(game.start(), Err(GameError::AlreadyStarted));
    assert_eq!(game.status(), GameStatus::InProgress);
}

#[test]
fn test_start_after_finish_fails() {
    let (mut game, _) = solo(10, Vec::new(), vec![9]);
    game.next_move().unwrap();
    assert!(game.is_over());
    assert_eq!(game.start(), Err(GameError::AlreadyStarted));
}

#[test]
fn test_move_before_start_fails_without_rolling() {
    let mut game = game_with(100, Vec::new(), vec![3, 5], settings());
    let player = Player::new("Player");
    game.add_player(player.clone()).unwrap();

    assert_eq!(
        game.next_move(),
        Err(GameError::NotInProgress {
            status: GameStatus::NotStarted
        })
    );
    assert_eq!(game.position_of(&player), Some(1));

    // The rejected call must not have consumed the first scripted roll.
    game.start().unwrap();
    assert_eq!(game.next_move().unwrap().rolled_value, 3);
}

#[test]
fn test_move_after_finish_fails() {
    let (mut game, player) = solo(10, Vec::new(), vec![9]);
    game.next_move().unwrap();
    assert_eq!(
        game.next_move(),
        Err(GameError::NotInProgress {
            status: GameStatus::Finished
        })
    );
    assert_eq!(game.position_of(&player), Some(10));
    assert_eq!(game.turn(), 1);
}

#[test]
fn test_current_player_on_empty_game() {
    let game = game_with(100, Vec::new(), vec![1], settings());
    assert_eq!(game.current_player(), Err(GameError::EmptyQueue));
}

#[test]
fn test_turns_rotate_in_join_order() {
    let mut game = game_with(100, Vec::new(), vec![1], settings());
    let names = ["A", "B", "C"];
    for name in names {
        game.add_player(Player::new(name)).unwrap();
    }
    game.start().unwrap();

    let mut seen = Vec::new();
    for _ in 0..6 {
        seen.push(game.current_player().unwrap().name.clone());
        let result = game.next_move().unwrap();
        assert_eq!(&result.player.name, seen.last().unwrap());
    }
    assert_eq!(seen, vec!["A", "B", "C", "A", "B", "C"]);
}

#[test]
fn test_player_joining_mid_game_moves_after_existing_players() {
    let mut game = game_with(100, Vec::new(), vec![1], settings());
    game.add_player(Player::new("A")).unwrap();
    game.add_player(Player::new("B")).unwrap();
    game.start().unwrap();

    // A has moved, so the queue is B, A before the late player joins.
    game.next_move().unwrap();
    let late = Player::new("Late");
    game.add_player(late.clone()).unwrap();
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(game.position_of(&late), Some(1));
    let order: Vec<&str> = game.turn_order().map(|p| p.name.as_str()).collect();
    assert_eq!(order, vec!["B", "A", "Late"]);

    let movers: Vec<String> = (0..4)
        .map(|_| game.next_move().unwrap().player.name)
        .collect();
    assert_eq!(movers, vec!["B", "A", "Late", "B"]);
    assert_eq!(game.position_of(&late), Some(2));
}

#[test]
fn test_settings_are_unchanged_by_play() {
    let custom = GameSettings {
        min_players: 1,
        max_players: 3,
        max_adornment_chain_length: 2,
    };
    let cycle = vec![
        Adornment::shortcut(5, 20),
        Adornment::shortcut(20, 30),
        Adornment::setback(30, 5),
    ];
    let mut game = game_with(100, cycle, vec![4, 6], custom.clone());
    game.add_player(Player::new("A")).unwrap();
    game.start().unwrap();

    let result = game.next_move().unwrap();
    assert_eq!(result.adornments_traversed.len(), 2);
    assert_eq!(game.settings(), &custom);
    game.next_move().unwrap();
    assert_eq!(game.settings(), &custom);
}

#[test]
fn test_wasted_turn_still_rotates() {
    let mut game = game_with(5, Vec::new(), vec![6], settings());
    game.add_player(Player::new("A")).unwrap();
    game.add_player(Player::new("B")).unwrap();
    game.start().unwrap();

    let result = game.next_move().unwrap();
    assert!(result.was_wasted());
    assert_eq!(game.current_player().unwrap().name, "B");
}

#[test]
fn test_winner_is_mover_in_multiplayer_game() {
    let mut game = game_with(10, Vec::new(), vec![2, 9], settings());
    let a = Player::new("A");
    let b = Player::new("B");
    game.add_player(a.clone()).unwrap();
    game.add_player(b.clone()).unwrap();
    game.start().unwrap();

    game.next_move().unwrap();
    assert!(!game.is_over());
    game.next_move().unwrap();
    assert!(game.is_over());
    assert_eq!(game.winner(), Some(&b));
    assert_eq!(game.position_of(&a), Some(3));
}

#[test]
fn test_ladder_onto_last_cell_wins() {
    let (mut game, player) = solo(20, vec![Adornment::shortcut(4, 20)], vec![3]);
    let result = game.next_move().unwrap();
    assert_eq!(result.final_position, 20);
    assert!(game.is_over());
    assert_eq!(game.winner(), Some(&player));
}

#[test]
fn test_invalid_settings_rejected() {
    let board = Board::new(10, Vec::new()).unwrap();
    let dice = ScriptedDice::new(vec![1]).unwrap();
    let result = Game::new(
        board,
        dice,
        GameSettings {
            min_players: 1,
            max_players: 2,
            max_adornment_chain_length: 0,
        },
    );
    assert!(matches!(
        result,
        Err(GameError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_seeded_standard_game_plays_to_completion() {
    let config = GameConfig {
        seed: Some(2024),
        ..GameConfig::default()
    };
    let mut game = config.build().unwrap();
    game.add_player(Player::new("Ada")).unwrap();
    game.add_player(Player::new("Bo")).unwrap();

    let winner = game.play(100_000).unwrap().cloned();
    let winner = winner.expect("a seeded game should finish well before the limit");
    assert_eq!(game.position_of(&winner), Some(100));
    assert!(game.is_over());
}
