use pretty_assertions::assert_eq;
use speculoos::prelude::*;

use pacman_core::map::direction::Direction;
use pacman_core::map::tile::Tile;
use pacman_core::snapshot::AudioCue;
use pacman_core::systems::components::PacManState;

mod common;
use common::*;

#[test]
fn test_first_pellet_to_the_left() {
    let mut game = new_game();
    start_playing(&mut game);
    disable_ghosts(&mut game);
    game.set_direction_intent(Some(Direction::Left));

    let snapshot = advance_until(&mut game, 20, |snapshot| snapshot.score > 0).expect("pellet within 20 ticks");
    // The first pellet to Pac-Man's left sits at (13,26).
    assert_eq!(snapshot.pacman.actor.tile, Tile::new(13, 26));
    assert_eq!(snapshot.score, 10);
    assert_eq!(snapshot.food_remaining, 243);
    assert_that(&snapshot.cues.contains(&AudioCue::AtePellet)).is_true();
}

#[test]
fn test_pacman_starts_on_seat_facing_left() {
    let mut game = new_game();
    let snapshot = start_playing(&mut game);
    assert_eq!(snapshot.pacman.actor.tile, Tile::new(14, 26));
    assert_eq!(snapshot.pacman.actor.direction, Direction::Left);
    assert_eq!(snapshot.pacman.state, PacManState::Awake);
}

#[test]
fn test_energizer_opens_power_window() {
    let mut game = new_game();
    start_playing(&mut game);
    disable_ghosts(&mut game);

    // Walk up column 1: a pellet at (1,7), then the energizer at (1,6).
    place_pacman(&mut game, Tile::new(1, 8), Direction::Up);
    let snapshot = advance_until(&mut game, 60, |snapshot| snapshot.score >= 60).expect("energizer eaten");
    assert_that(&snapshot.cues.contains(&AudioCue::AteEnergizer)).is_true();
    assert_eq!(snapshot.pacman.state, PacManState::Awake);

    // The energizer takes effect on the following tick: six seconds of power.
    let snapshot = advance(&mut game, 1);
    assert_eq!(snapshot.pacman.state, PacManState::Powerful);
    assert_eq!(snapshot.pacman.power_ticks, 6 * 60);

    // The countdown runs once per playing tick.
    let snapshot = advance(&mut game, 10);
    assert_eq!(snapshot.pacman.power_ticks, 6 * 60 - 10);
}

#[test]
fn test_power_expires_back_to_awake() {
    let mut game = new_game();
    start_playing(&mut game);
    disable_ghosts(&mut game);

    place_pacman(&mut game, Tile::new(1, 8), Direction::Up);
    advance_until(&mut game, 60, |snapshot| snapshot.score >= 60).expect("energizer eaten");
    let snapshot = advance(&mut game, 1);
    assert_eq!(snapshot.pacman.state, PacManState::Powerful);

    set_pac_power(&mut game, 3);
    let snapshot = advance_until(&mut game, 10, |snapshot| snapshot.pacman.state == PacManState::Awake)
        .expect("power should expire");
    assert_eq!(snapshot.pacman.power_ticks, 0);
}

#[test]
fn test_food_count_is_conserved() {
    let mut game = new_game();
    start_playing(&mut game);
    disable_ghosts(&mut game);
    game.set_direction_intent(Some(Direction::Left));

    // Food remaining in the snapshot always matches the maze occupancy and
    // never increases while playing.
    let mut previous = game.snapshot().food_remaining;
    for _ in 0..120 {
        let snapshot = game.tick();
        assert_that(&(snapshot.food_remaining <= previous)).is_true();
        previous = snapshot.food_remaining;
        let maze = game.world.resource::<pacman_core::map::builder::Maze>();
        assert_eq!(maze.food_tiles().count() as u32, snapshot.food_remaining);
    }
}
