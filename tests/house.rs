use pretty_assertions::assert_eq;
use speculoos::prelude::*;

use pacman_core::events::GameEvent;
use pacman_core::map::tile::Tile;
use pacman_core::systems::components::{GhostName, GhostState};
use pacman_core::systems::controller::GameStage;
use pacman_core::systems::house::Doorman;

mod common;
use common::*;

fn feed_dot(game: &mut pacman_core::game::Game) {
    inject_event(
        game,
        GameEvent::FoodFound {
            tile: Tile::new(1, 8),
            energizer: false,
        },
    );
    advance(game, 2);
}

fn locked(game: &mut pacman_core::game::Game, name: GhostName) -> bool {
    ghost_view(game.snapshot(), name).state == GhostState::Locked
}

#[test]
fn test_inky_released_after_thirty_dots() {
    let mut game = new_game();
    start_playing(&mut game);
    advance(&mut game, 2);
    assert_that(&locked(&mut game, GhostName::Inky)).is_true();

    // Feed steadily so the starvation timer never fires.
    for _ in 0..29 {
        feed_dot(&mut game);
    }
    assert_that(&locked(&mut game, GhostName::Inky)).is_true();

    feed_dot(&mut game);
    advance(&mut game, 2);
    assert_that(&locked(&mut game, GhostName::Inky)).is_false();
    // Clyde needs his own sixty on top.
    assert_that(&locked(&mut game, GhostName::Clyde)).is_true();

    for _ in 0..60 {
        feed_dot(&mut game);
    }
    advance(&mut game, 2);
    assert_that(&locked(&mut game, GhostName::Clyde)).is_false();
}

#[test]
fn test_starvation_timer_releases_in_order() {
    let mut game = new_game();
    start_playing(&mut game);
    // Pin the scatter phase so roaming ghosts keep circling their corners
    // for the whole starvation window.
    game.world.resource_mut::<pacman_core::systems::attack::AttackWave>().suspended = true;
    advance(&mut game, 2);

    // Pinky's dot limit is zero: he walks out as play begins.
    assert_that(&locked(&mut game, GhostName::Pinky)).is_false();
    assert_that(&locked(&mut game, GhostName::Inky)).is_true();

    // Four starved seconds on level 1 release the next ghost in line.
    advance(&mut game, 4 * 60 + 5);
    assert_that(&locked(&mut game, GhostName::Inky)).is_false();
    assert_that(&locked(&mut game, GhostName::Clyde)).is_true();

    advance(&mut game, 4 * 60 + 5);
    assert_that(&locked(&mut game, GhostName::Clyde)).is_false();
}

#[test]
fn test_global_counter_after_death() {
    let mut game = new_game();
    start_playing(&mut game);
    advance(&mut game, 2);

    inject_event(&mut game, GameEvent::PacManKilled { by: GhostName::Blinky });
    advance(&mut game, 1);
    assert!(matches!(game.snapshot().stage, GameStage::PacDying { .. }));
    assert_that(&game.world.resource::<Doorman>().global_enabled).is_true();

    // Sit out the death sequence.
    advance_until(&mut game, 400, |snapshot| snapshot.stage == GameStage::Playing).expect("round restarts");
    advance(&mut game, 2);

    // Personal limits no longer apply: Pinky waits for seven global dots.
    assert_that(&locked(&mut game, GhostName::Pinky)).is_true();
    for _ in 0..7 {
        feed_dot(&mut game);
    }
    advance(&mut game, 2);
    assert_that(&locked(&mut game, GhostName::Pinky)).is_false();
    assert_that(&locked(&mut game, GhostName::Inky)).is_true();

    // Ten more reach Inky's seventeen.
    for _ in 0..10 {
        feed_dot(&mut game);
    }
    advance(&mut game, 2);
    assert_that(&locked(&mut game, GhostName::Inky)).is_false();
    assert_that(&locked(&mut game, GhostName::Clyde)).is_true();

    // Fifteen more reach Clyde's thirty-two; the global counter retires.
    for _ in 0..15 {
        feed_dot(&mut game);
    }
    advance(&mut game, 2);
    assert_that(&locked(&mut game, GhostName::Clyde)).is_false();
    assert_that(&game.world.resource::<Doorman>().global_enabled).is_false();
}

#[test]
fn test_blinky_re_released_after_death() {
    let mut game = new_game();
    start_playing(&mut game);
    advance(&mut game, 2);
    assert_eq!(ghost_view(game.snapshot(), GhostName::Blinky).state, GhostState::Scattering);

    inject_event(&mut game, GameEvent::PacManKilled { by: GhostName::Blinky });
    advance(&mut game, 1);
    advance_until(&mut game, 400, |snapshot| snapshot.stage == GameStage::Playing).expect("round restarts");

    // Back on his outside seat, Blinky is unlocked again right away.
    let snapshot = advance(&mut game, 3);
    assert_eq!(ghost_view(&snapshot, GhostName::Blinky).state, GhostState::Scattering);
}
