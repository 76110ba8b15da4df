#![allow(dead_code)]

use bevy_ecs::event::Events;
use glam::Vec2;

use pacman_core::config::Config;
use pacman_core::events::GameEvent;
use pacman_core::game::Game;
use pacman_core::map::direction::Direction;
use pacman_core::map::tile::Tile;
use pacman_core::snapshot::Snapshot;
use pacman_core::systems::components::{Ghost, GhostName, GhostState, PacMan};
use pacman_core::systems::controller::GameStage;
use pacman_core::systems::movement::Actor;

pub fn test_config() -> Config {
    Config {
        skip_intro: true,
        seed: 0,
        ..Config::default()
    }
}

pub fn new_game() -> Game {
    Game::new(test_config()).expect("simulation should build")
}

/// Advances `ticks` ticks, returning the last snapshot.
pub fn advance(game: &mut Game, ticks: u32) -> Snapshot {
    let mut snapshot = game.snapshot().clone();
    for _ in 0..ticks {
        snapshot = game.tick();
    }
    snapshot
}

/// Ticks until the predicate holds, up to `max` ticks.
pub fn advance_until(game: &mut Game, max: u32, predicate: impl Fn(&Snapshot) -> bool) -> Option<Snapshot> {
    for _ in 0..max {
        let snapshot = game.tick();
        if predicate(&snapshot) {
            return Some(snapshot);
        }
    }
    None
}

/// Runs the intro and ready sequence until the main loop is live.
pub fn start_playing(game: &mut Game) -> Snapshot {
    advance_until(game, 600, |snapshot| snapshot.stage == GameStage::Playing).expect("game should reach PLAYING")
}

/// Puts Pac-Man on an exact tile, facing `dir`.
pub fn place_pacman(game: &mut Game, tile: Tile, dir: Direction) {
    let mut query = game.world.query::<(&PacMan, &mut Actor)>();
    let (_, mut actor) = query.single_mut(&mut game.world).expect("one Pac-Man");
    actor.place_at(tile, Vec2::ZERO, dir);
    game.set_direction_intent(Some(dir));
}

/// Puts a ghost into a state on an exact tile.
pub fn place_ghost(game: &mut Game, name: GhostName, state: GhostState, tile: Tile, dir: Direction) {
    let mut query = game.world.query::<(&mut Ghost, &mut Actor)>();
    for (mut ghost, mut actor) in query.iter_mut(&mut game.world) {
        if ghost.name == name {
            actor.place_at(tile, Vec2::ZERO, dir);
            ghost.enter_state(state);
        }
    }
}

/// Removes all ghosts from play so feeding tests run undisturbed.
pub fn disable_ghosts(game: &mut Game) {
    let mut query = game.world.query::<(&Ghost, &mut Actor)>();
    for (_, mut actor) in query.iter_mut(&mut game.world) {
        actor.enabled = false;
        actor.visible = false;
    }
}

/// Removes a single ghost from play.
pub fn disable_ghost(game: &mut Game, name: GhostName) {
    let mut query = game.world.query::<(&Ghost, &mut Actor)>();
    for (ghost, mut actor) in query.iter_mut(&mut game.world) {
        if ghost.name == name {
            actor.enabled = false;
            actor.visible = false;
        }
    }
}

/// Teleports a ghost without touching its machine state.
pub fn move_ghost_to(game: &mut Game, name: GhostName, tile: Tile) {
    let mut query = game.world.query::<(&Ghost, &mut Actor)>();
    for (ghost, mut actor) in query.iter_mut(&mut game.world) {
        if ghost.name == name {
            let dir = actor.move_dir;
            actor.place_at(tile, Vec2::ZERO, dir);
        }
    }
}

/// Pre-eats `count` food tiles straight off the maze, skipping `except`.
pub fn eat_food_directly(game: &mut Game, count: usize, except: &[Tile]) {
    let mut maze = game.world.resource_mut::<pacman_core::map::builder::Maze>();
    let victims: Vec<Tile> = maze
        .food_tiles()
        .filter(|tile| !except.contains(tile))
        .take(count)
        .collect();
    assert_eq!(victims.len(), count, "not enough food left to pre-eat");
    for tile in victims {
        maze.eat_food_at(tile);
    }
}

/// Shortens Pac-Man's remaining power window.
pub fn set_pac_power(game: &mut Game, ticks: u32) {
    let mut query = game.world.query::<&mut PacMan>();
    let mut pac = query.single_mut(&mut game.world).expect("one Pac-Man");
    pac.power = ticks;
}

/// Injects an event as if an earlier system had written it this tick.
pub fn inject_event(game: &mut Game, event: GameEvent) {
    game.world.resource_mut::<Events<GameEvent>>().send(event);
}

pub fn ghost_view(snapshot: &Snapshot, name: GhostName) -> &pacman_core::snapshot::GhostView {
    snapshot
        .ghosts
        .iter()
        .find(|view| view.name == name)
        .expect("ghost in snapshot")
}
