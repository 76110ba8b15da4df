use pretty_assertions::assert_eq;
use speculoos::prelude::*;

use pacman_core::events::GameEvent;
use pacman_core::map::direction::Direction;
use pacman_core::map::tile::Tile;
use pacman_core::systems::components::{GhostName, GhostState, Regime};

mod common;
use common::*;

#[test]
fn test_blinky_is_out_scattering_at_level_start() {
    let mut game = new_game();
    start_playing(&mut game);
    let snapshot = advance(&mut game, 3);
    let blinky = ghost_view(&snapshot, GhostName::Blinky);
    assert_eq!(blinky.state, GhostState::Scattering);
    // Scatter target is his corner above the maze.
    assert_eq!(blinky.target, Some(Tile::new(25, 0)));
}

#[test]
fn test_pinky_leaves_the_house_immediately() {
    let mut game = new_game();
    start_playing(&mut game);
    let snapshot = advance(&mut game, 3);
    let pinky = ghost_view(&snapshot, GhostName::Pinky);
    assert_that(&(pinky.state != GhostState::Locked)).is_true();

    // Inky and Clyde stay behind until their dot counters say otherwise.
    assert_eq!(ghost_view(&snapshot, GhostName::Inky).state, GhostState::Locked);
    assert_eq!(ghost_view(&snapshot, GhostName::Clyde).state, GhostState::Locked);
}

#[test]
fn test_fright_reverses_hostile_ghosts_once() {
    let mut game = new_game();
    start_playing(&mut game);
    // Walled corridor segment: no decision point for several ticks, so the
    // direction is pinned when the energizer hits.
    place_ghost(
        &mut game,
        GhostName::Blinky,
        GhostState::Scattering,
        Tile::new(16, 8),
        Direction::Left,
    );
    let before = advance(&mut game, 1);
    assert_eq!(ghost_view(&before, GhostName::Blinky).actor.direction, Direction::Left);

    inject_event(&mut game, GameEvent::PacManGainsPower);
    let after = advance(&mut game, 1);
    let blinky = ghost_view(&after, GhostName::Blinky);
    assert_eq!(blinky.state, GhostState::Frightened);
    assert_eq!(blinky.actor.direction, Direction::Right);
}

#[test]
fn test_frightened_ignores_wave_switches() {
    let mut game = new_game();
    start_playing(&mut game);
    advance(&mut game, 10);
    inject_event(&mut game, GameEvent::PacManGainsPower);
    advance(&mut game, 1);

    inject_event(&mut game, GameEvent::StartChasing);
    let snapshot = advance(&mut game, 1);
    assert_eq!(ghost_view(&snapshot, GhostName::Blinky).state, GhostState::Frightened);
}

#[test]
fn test_attack_timer_pauses_during_power() {
    let mut game = new_game();
    start_playing(&mut game);
    let before = advance(&mut game, 10);
    assert_eq!(before.regime, Regime::Scattering);
    let remaining = before.regime_ticks;

    inject_event(&mut game, GameEvent::PacManGainsPower);
    let suspended = advance(&mut game, 1);
    let frozen = advance(&mut game, 5);
    // The phase clock holds its breath while Pac-Man is powerful.
    assert_eq!(frozen.regime_ticks, suspended.regime_ticks);
    assert_that(&(suspended.regime_ticks <= remaining)).is_true();

    // And resumes once the power window closes.
    set_pac_power(&mut game, 2);
    advance(&mut game, 3);
    let resumed = advance(&mut game, 5);
    assert_that(&(resumed.regime_ticks < frozen.regime_ticks)).is_true();
}

#[test]
fn test_wave_switches_regime_after_first_scatter() {
    let mut game = new_game();
    start_playing(&mut game);
    disable_ghosts(&mut game);
    let snapshot =
        advance_until(&mut game, 7 * 60 + 10, |snapshot| snapshot.regime == Regime::Chasing).expect("chase phase");
    assert_that(&snapshot.regime_ticks.is_some()).is_true();
}

#[test]
fn test_eaten_ghost_returns_home_and_re_emerges() {
    let mut game = new_game();
    start_playing(&mut game);
    disable_ghost(&mut game, GhostName::Pinky);
    disable_ghost(&mut game, GhostName::Inky);
    disable_ghost(&mut game, GhostName::Clyde);

    // Park Pac-Man against the corner wall so he stays put.
    place_pacman(&mut game, Tile::new(1, 4), Direction::Up);
    place_ghost(
        &mut game,
        GhostName::Blinky,
        GhostState::Frightened,
        Tile::new(1, 4),
        Direction::Down,
    );

    let snapshot = advance(&mut game, 1);
    assert_eq!(ghost_view(&snapshot, GhostName::Blinky).state, GhostState::Dying);

    // Dying pause, then the eyes head for the house entry.
    let snapshot = advance_until(&mut game, 120, |snapshot| {
        ghost_view(snapshot, GhostName::Blinky).state == GhostState::Dead
    })
    .expect("ghost should die into eyes");
    assert_eq!(ghost_view(&snapshot, GhostName::Blinky).target, Some(Tile::new(13, 14)));

    // Connected maze: the eyes always make it home, descend to the
    // bed, and come back out hostile.
    advance_until(&mut game, 1800, |snapshot| {
        ghost_view(snapshot, GhostName::Blinky).state == GhostState::EnteringHouse
    })
    .expect("eyes should reach the door");
    advance_until(&mut game, 600, |snapshot| {
        let state = ghost_view(snapshot, GhostName::Blinky).state;
        state == GhostState::Chasing || state == GhostState::Scattering
    })
    .expect("ghost should re-emerge");
}

#[test]
fn test_pinky_targets_four_ahead_with_overflow() {
    let mut game = new_game();
    start_playing(&mut game);
    disable_ghost(&mut game, GhostName::Blinky);
    disable_ghost(&mut game, GhostName::Inky);
    disable_ghost(&mut game, GhostName::Clyde);

    // Pac-Man faces up in the corridor above the door; Pinky chases from
    // the bottom half of the maze.
    place_pacman(&mut game, Tile::new(14, 14), Direction::Up);
    place_ghost(
        &mut game,
        GhostName::Pinky,
        GhostState::Chasing,
        Tile::new(6, 23),
        Direction::Up,
    );

    let snapshot = advance(&mut game, 1);
    // Overflow bug on (the default): four ahead of (14,14) plus four left.
    assert_eq!(ghost_view(&snapshot, GhostName::Pinky).target, Some(Tile::new(10, 10)));
}

#[test]
fn test_blinky_chases_pacman_tile() {
    let mut game = new_game();
    start_playing(&mut game);
    place_pacman(&mut game, Tile::new(6, 8), Direction::Left);
    place_ghost(
        &mut game,
        GhostName::Blinky,
        GhostState::Chasing,
        Tile::new(21, 8),
        Direction::Left,
    );
    let snapshot = advance(&mut game, 1);
    assert_eq!(
        ghost_view(&snapshot, GhostName::Blinky).target,
        Some(snapshot.pacman.actor.tile)
    );
}
