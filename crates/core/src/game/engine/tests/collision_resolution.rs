//! Contact between the player and enemies, resolved per enemy.

use super::support::*;

fn two_ghosts(lives: u32) -> (Game, EntityId, EntityId) {
    let settings = GameSettings { lives, ..quick_settings() };
    let game = game_from_rows(&["#######", "#G P G#", "#######"], &settings);
    let ids = enemy_ids(&game);
    (game, ids[0], ids[1])
}

#[test]
fn normal_enemy_costs_a_life_and_sends_the_player_home() {
    let (mut game, ghost, _) = two_ghosts(3);
    let player = game.state.player_id();
    place(&mut game, player, Point::new(1, 4));
    place(&mut game, ghost, Point::new(1, 4));

    let mut events = Vec::new();
    game.resolve_collisions(&mut events);

    assert_eq!(events, vec![GameEvent::PlayerCaught { enemy: ghost, lives_left: 2 }]);
    assert_eq!(game.state.player().pos, Point::new(1, 3));
    assert_eq!(game.state.entities[ghost].pos(), Point::new(1, 4), "a normal enemy stays put");
}

#[test]
fn frightened_enemy_is_eaten_and_respawned() {
    let (mut game, ghost, other) = two_ghosts(3);
    game.modes.frighten_all(Duration::from_secs(30));
    place(&mut game, ghost, Point::new(1, 3));

    let mut events = Vec::new();
    game.resolve_collisions(&mut events);

    assert_eq!(events, vec![GameEvent::EnemyEaten { enemy: ghost }]);
    assert_eq!(game.state.entities[ghost].pos(), Point::new(1, 1));
    assert_eq!(game.mode(ghost), Mode::Normal);
    assert_eq!(game.mode(other), Mode::Frightened, "only the eaten enemy reverts");
    let player = game.state.player();
    assert_eq!(player.lives, 3);
    assert_eq!(player.score, 0);
    assert_eq!(player.pos, Point::new(1, 3));
}

#[test]
fn two_normal_enemies_on_one_cell_each_take_a_life() {
    let (mut game, first, second) = two_ghosts(3);
    place(&mut game, first, Point::new(1, 3));
    place(&mut game, second, Point::new(1, 3));

    let mut events = Vec::new();
    game.resolve_collisions(&mut events);

    assert_eq!(
        events,
        vec![
            GameEvent::PlayerCaught { enemy: first, lives_left: 2 },
            GameEvent::PlayerCaught { enemy: second, lives_left: 1 },
        ]
    );
}

#[test]
fn mixed_modes_on_one_cell_resolve_independently() {
    let (mut game, first, second) = two_ghosts(3);
    game.modes.frighten_all(Duration::from_secs(30));
    assert_eq!(game.modes.resolve_contact(second), Mode::Frightened);
    place(&mut game, first, Point::new(1, 3));
    place(&mut game, second, Point::new(1, 3));

    let mut events = Vec::new();
    game.resolve_collisions(&mut events);

    assert_eq!(
        events,
        vec![
            GameEvent::EnemyEaten { enemy: first },
            GameEvent::PlayerCaught { enemy: second, lives_left: 2 },
        ]
    );
    assert_eq!(game.state.entities[first].pos(), Point::new(1, 1));
}

#[test]
fn losing_the_last_life_leaves_the_player_where_they_fell() {
    let (mut game, ghost, _) = two_ghosts(1);
    let player = game.state.player_id();
    place(&mut game, player, Point::new(1, 2));
    place(&mut game, ghost, Point::new(1, 2));

    let mut events = Vec::new();
    game.resolve_collisions(&mut events);

    assert_eq!(game.state.player().lives, 0);
    assert_eq!(game.state.player().pos, Point::new(1, 2));
}

#[test]
fn caught_on_the_last_dot_is_still_a_loss() {
    let settings = GameSettings { lives: 1, ..quick_settings() };
    let mut game = game_from_rows(&["######", "#P.C #", "######"], &settings);

    let result = game.tick(Command::Right);

    assert_eq!(game.state.dots_remaining, 0);
    assert_eq!(result.status, TickStatus::GameOver(Outcome::Loss));
    assert_eq!(game.outcome(), Some(Outcome::Loss));
}

#[test]
fn chaser_arriving_on_the_player_ends_a_one_life_game() {
    let settings = GameSettings { lives: 1, ..quick_settings() };
    let mut game = game_from_rows(&["######", "#P C.#", "######"], &settings);
    let chaser = enemy_ids(&game)[0];

    let result = game.tick(Command::Right);

    assert_eq!(game.state.entities[chaser].pos(), Point::new(1, 2));
    assert_eq!(
        result.events,
        vec![
            GameEvent::PlayerCaught { enemy: chaser, lives_left: 0 },
            GameEvent::GameOver { outcome: Outcome::Loss },
        ]
    );
}
