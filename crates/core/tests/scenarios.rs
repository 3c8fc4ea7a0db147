use std::thread;
use std::time::Duration;

use chase_core::{
    Command, Game, GameEvent, GameSettings, Glyph, MazeOptions, Mode, Outcome, Point, TickStatus,
    parse_maze,
};

fn game(maze: &str, settings: GameSettings) -> Game {
    let layout = parse_maze(maze, &MazeOptions::default()).expect("scenario maze");
    Game::new(layout, &settings).expect("scenario game")
}

fn settings() -> GameSettings {
    GameSettings { workers: 2, seed: 99, ..GameSettings::default() }
}

#[test]
fn eating_the_only_dot_wins_immediately() {
    let mut game = game("#####\n#P. #\n#####", settings());

    let result = game.tick(Command::Right);

    assert_eq!(result.status, TickStatus::GameOver(Outcome::Win));
    let snapshot = game.snapshot();
    assert_eq!(snapshot.score, 1);
    assert_eq!(snapshot.dots_remaining, 0);
    assert_eq!(snapshot.outcome, Some(Outcome::Win));
}

#[test]
fn chaser_takes_the_last_life() {
    let mut game = game("######\n#P C.#\n######", GameSettings { lives: 1, ..settings() });

    let result = game.tick(Command::Right);

    assert_eq!(result.status, TickStatus::GameOver(Outcome::Loss));
    assert_eq!(game.snapshot().lives, 0);
    assert!(game.log().contains(&GameEvent::GameOver { outcome: Outcome::Loss }));
}

#[test]
fn chaser_catches_an_idle_player_in_an_open_field() {
    let mut game = game("C....\n.....\n..P..\n.....\n.....", settings());
    let chaser = game.state().enemy_ids()[0];

    let mut caught_at = None;
    for tick in 1..=8 {
        let result = game.tick(Command::Idle);
        if result.events.contains(&GameEvent::PlayerCaught { enemy: chaser, lives_left: 2 }) {
            caught_at = Some(tick);
            break;
        }
    }

    assert_eq!(caught_at, Some(4), "shortest route is four steps");
    assert_eq!(game.snapshot().lives, 2);
}

#[test]
fn power_pill_frightens_then_wears_off() {
    let settings = GameSettings { power_duration: Duration::from_millis(150), ..settings() };
    let mut game = game("#########\n#PX....G#\n#########", settings);
    let ghost = game.state().enemy_ids()[0];

    game.tick(Command::Right);
    assert_eq!(game.mode(ghost), Mode::Frightened);
    assert_eq!(game.snapshot().sprites[1].glyph, Glyph::Frightened);

    thread::sleep(Duration::from_millis(600));
    assert_eq!(game.mode(ghost), Mode::Normal);
    assert_eq!(game.snapshot().sprites[1].glyph, Glyph::Ghost);
}

#[test]
fn huge_pill_duration_keeps_enemies_frightened() {
    let settings = GameSettings { power_duration: Duration::from_secs(u64::MAX), ..settings() };
    let mut game = game("#######\n#PX..G#\n#######", settings);
    let ghost = game.state().enemy_ids()[0];

    let result = game.tick(Command::Right);

    assert_eq!(result.status, TickStatus::Running);
    assert_eq!(game.mode(ghost), Mode::Frightened);
    assert!(game.is_power_active());
}

#[test]
fn frightened_chaser_is_sent_home_without_costing_a_life() {
    let mut game = game("######\n#PXC.#\n######", settings());

    game.tick(Command::Right);

    let snapshot = game.snapshot();
    assert_eq!(snapshot.lives, 3);
    assert_eq!(snapshot.sprites[1].pos, Point::new(1, 3));
    assert_eq!(snapshot.sprites[1].glyph, Glyph::Chaser);
}

#[test]
fn exit_ends_the_game_as_a_loss() {
    let mut game = game("#####\n#P..#\n#####", settings());

    let result = game.tick(Command::Exit);

    assert_eq!(result.status, TickStatus::GameOver(Outcome::Loss));
    assert_eq!(game.outcome(), Some(Outcome::Loss));
}
