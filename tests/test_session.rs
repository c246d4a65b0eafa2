use pipe_runner::config::{ConfigError, GameConfig};
use pipe_runner::entities::PairId;
use pipe_runner::score::ScoreBoard;
use pipe_runner::{Command, GameStatus, Session, TickOutcome};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_session(config: GameConfig) -> Session {
    Session::with_rng(config, StdRng::seed_from_u64(42)).unwrap()
}

/// No gravity and a bird parked where every gap fits around it:
/// gaps span at least y 150..450, the bird spans 200..250.
fn hover_config() -> GameConfig {
    GameConfig {
        gravity: 0.0,
        jump_impulse: 10.0,
        bird_start_y: 200.0,
        gap: 400,
        pipe_min_height: 50,
        ..GameConfig::default()
    }
}

fn playing(config: GameConfig) -> Session {
    let mut s = make_session(config);
    s.handle(Command::Start);
    assert_eq!(s.status(), GameStatus::Playing);
    s
}

fn run(session: &mut Session, ticks: u32) -> u32 {
    (0..ticks).map(|_| session.tick().scored).sum()
}

// ── State machine ─────────────────────────────────────────────────────────────

#[test]
fn starts_in_menu_and_does_not_simulate() {
    let mut s = make_session(GameConfig::default());
    assert_eq!(s.status(), GameStatus::Menu);
    let y = s.bird().y;
    assert_eq!(s.tick(), TickOutcome::default());
    assert_eq!(s.bird().y, y);
    assert_eq!(s.frame(), 0);
}

#[test]
fn exit_from_menu_asks_first() {
    let mut s = make_session(GameConfig::default());
    s.handle(Command::Exit);
    assert_eq!(s.status(), GameStatus::ConfirmExitFromMenu);
    s.handle(Command::ConfirmNo);
    assert_eq!(s.status(), GameStatus::Menu);
    s.handle(Command::Exit);
    s.handle(Command::ConfirmYes);
    assert!(s.is_exited());
}

#[test]
fn commands_that_do_not_apply_are_ignored() {
    let mut s = make_session(GameConfig::default());
    for cmd in [Command::Jump, Command::Restart, Command::ConfirmYes, Command::ConfirmNo] {
        s.handle(cmd);
        assert_eq!(s.status(), GameStatus::Menu);
    }
    assert_eq!(s.bird().velocity, 0.0);

    let mut s = playing(GameConfig::default());
    for cmd in [Command::Start, Command::Exit, Command::ConfirmYes] {
        s.handle(cmd);
        assert_eq!(s.status(), GameStatus::Playing);
    }
}

#[test]
fn quit_stops_from_any_state() {
    let mut s = playing(GameConfig::default());
    s.handle(Command::Quit);
    assert!(s.is_exited());
    // Nothing brings it back
    s.handle(Command::Start);
    assert!(s.is_exited());
}

#[test]
fn jump_lands_after_the_tick_integrates() {
    let mut s = playing(GameConfig::default());
    s.handle(Command::Jump);
    assert_eq!(s.bird().velocity, 0.0); // nothing moves until the tick

    // The jumping tick still falls under gravity, then takes the impulse
    s.tick();
    assert_eq!(s.bird().y, 90.5);
    assert_eq!(s.bird().velocity, -7.0);

    // The bird starts rising on the following tick
    s.tick();
    assert_eq!(s.bird().velocity, -6.5);
    assert_eq!(s.bird().y, 84.0);
}

#[test]
fn jump_outside_playing_is_not_queued() {
    let mut s = playing(GameConfig::default());
    while s.status() == GameStatus::Playing {
        s.tick();
    }
    s.handle(Command::Jump); // ignored outside Playing
    s.handle(Command::Restart);
    s.tick();
    assert_eq!(s.bird().velocity, 0.5);
    assert_eq!(s.bird().y, 90.5);
}

// ── Per-tick simulation ───────────────────────────────────────────────────────

#[test]
fn first_tick_applies_gravity_from_rest() {
    let mut s = playing(GameConfig::default());
    s.tick();
    assert_eq!(s.bird().velocity, 0.5);
    assert_eq!(s.bird().y, 90.5);
    assert_eq!(s.frame(), 1);
}

#[test]
fn falling_bird_crashes_into_the_first_bottom_pipe() {
    let mut s = playing(GameConfig::default());
    // The first pair reaches the bird's right edge (x=120) after 196 ticks;
    // by then the bird rests on the floor, below every gap.
    for _ in 0..195 {
        assert!(!s.tick().crashed);
    }
    assert_eq!(s.bird().y, 550.0);
    let outcome = s.tick();
    assert!(outcome.crashed);
    assert_eq!(s.status(), GameStatus::GameOver);
    assert_eq!(s.score().score(), 0);
}

#[test]
fn bird_inside_every_gap_scores_each_pair_once() {
    let mut s = playing(hover_config());
    // Pair 0 trailing edge 980 - 4n drops below x=70 at n=228
    assert_eq!(run(&mut s, 227), 0);
    assert_eq!(s.tick().scored, 1);
    let first = s.last_passed().unwrap();

    // Staying past it for many ticks adds nothing
    assert_eq!(run(&mut s, 74), 0);
    assert_eq!(s.score().score(), 1);
    assert_eq!(s.last_passed(), Some(first));

    // Pair 1 (1280 - 4n) follows at n=303
    assert_eq!(s.tick().scored, 1);
    assert_eq!(s.score().score(), 2);
    assert!(s.last_passed().unwrap() > first);
    assert_eq!(s.status(), GameStatus::Playing);
}

#[test]
fn crash_commits_high_score_and_restart_resets_the_run() {
    let mut s = playing(hover_config());
    run(&mut s, 228);
    assert_eq!(s.score().score(), 1);

    // Dive onto the floor; the next pair's bottom pipe ends the run
    s.handle(Command::Jump);
    let mut ticks = 228;
    while s.status() == GameStatus::Playing {
        s.tick();
        ticks += 1;
    }
    assert_eq!(ticks, 271);
    assert_eq!(s.status(), GameStatus::GameOver);
    assert_eq!(s.score().score(), 1);
    assert_eq!(s.score().high_score(), 1);

    // Game over is frozen
    let y = s.bird().y;
    s.tick();
    assert_eq!(s.bird().y, y);

    s.handle(Command::Restart);
    assert_eq!(s.status(), GameStatus::Playing);
    assert_eq!(s.score().score(), 0);
    assert_eq!(s.score().high_score(), 1);
    assert_eq!(s.last_passed(), None);
    assert_eq!((s.bird().x, s.bird().y, s.bird().velocity), (70.0, 200.0, 0.0));
    assert_eq!(s.stream().len(), 3);
    assert_eq!(s.frame(), 0);
    assert!(s.stream().marks().iter().all(|m| m.id > PairId(2)));
}

#[test]
fn marker_from_the_previous_run_does_not_leak_into_the_next() {
    let mut s = playing(hover_config());
    run(&mut s, 228);
    assert_eq!(s.last_passed(), Some(PairId(0)));

    s.handle(Command::Jump);
    while s.status() == GameStatus::Playing {
        s.tick();
    }
    // The crash leaves the old marker in place until the next run begins
    assert_eq!(s.last_passed(), Some(PairId(0)));

    s.handle(Command::Restart);
    assert_eq!(s.last_passed(), None);
    let first_of_new_run = s.stream().marks()[0].id;

    assert_eq!(run(&mut s, 227), 0);
    assert_eq!(s.tick().scored, 1);
    assert_eq!(s.score().score(), 1);
    assert_eq!(s.last_passed(), Some(first_of_new_run));
}

#[test]
fn exit_from_game_over_returns_there_on_decline() {
    let mut s = playing(GameConfig::default());
    while s.status() == GameStatus::Playing {
        s.tick();
    }
    s.handle(Command::Exit);
    assert_eq!(s.status(), GameStatus::ConfirmExitFromGameOver);
    s.handle(Command::ConfirmNo);
    assert_eq!(s.status(), GameStatus::GameOver);
    s.handle(Command::Exit);
    s.handle(Command::ConfirmYes);
    assert!(s.is_exited());
}

// ── Scores ────────────────────────────────────────────────────────────────────

#[test]
fn high_score_survives_score_reset() {
    let mut board = ScoreBoard::new();
    for _ in 0..5 {
        board.increment();
    }
    board.update_high_score();
    assert_eq!(board.high_score(), 5);
    board.reset_score();
    assert_eq!(board.score(), 0);
    assert_eq!(board.high_score(), 5);

    // Lower score never lowers the best
    for _ in 0..3 {
        board.increment();
    }
    board.update_high_score();
    assert_eq!(board.high_score(), 5);
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[test]
fn unsatisfiable_gap_is_rejected_at_startup() {
    let config = GameConfig {
        gap: 400,
        ..GameConfig::default()
    };
    let err = Session::new(config).err().unwrap();
    assert!(matches!(err, ConfigError::GapTooLarge { gap: 400, .. }));
}

#[test]
fn seeded_sessions_lay_out_identical_pipes() {
    let config = GameConfig {
        seed: Some(7),
        ..GameConfig::default()
    };
    let a = Session::new(config.clone()).unwrap();
    let b = Session::new(config).unwrap();
    let heights = |s: &Session| s.stream().pairs().map(|p| p.top.height).collect::<Vec<_>>();
    assert_eq!(heights(&a), heights(&b));
}
