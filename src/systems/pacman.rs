//! Pac-Man's state machine: steering, feeding and the power window.

use bevy_ecs::event::EventWriter;
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::{debug, trace};

use crate::commands::InputIntent;
use crate::constants::{speed, DIGEST_ENERGIZER_TICKS, DIGEST_PELLET_TICKS, FRIGHT_FLASH_TICKS};
use crate::events::GameEvent;
use crate::level::level_params;
use crate::map::builder::{Food, Maze};
use crate::map::direction::Direction;
use crate::map::tile::Tile;
use crate::systems::bonus::Bonus;
use crate::systems::components::{GameData, PacMan, PacManState};
use crate::systems::controller::GameStage;
use crate::systems::movement::{move_actor, Actor, MoveState};

/// Pac-Man may walk anywhere accessible except through the house door.
fn pacman_can_enter(maze: &Maze, tile: Tile) -> bool {
    maze.is_accessible(tile) && !maze.is_door(tile)
}

pub fn pacman_system(
    stage: Res<GameStage>,
    data: Res<GameData>,
    intent: Res<InputIntent>,
    bonus: Res<Bonus>,
    mut maze: ResMut<Maze>,
    mut pacman: Query<(&mut PacMan, &mut Actor)>,
    mut events: EventWriter<GameEvent>,
) {
    if !stage.is_playing() {
        return;
    }
    let Ok((mut pac, mut actor)) = pacman.single_mut() else {
        return;
    };

    let powerful = match pac.state {
        PacManState::Awake => false,
        PacManState::Powerful => true,
        PacManState::InBed | PacManState::Sleeping | PacManState::Dead => return,
    };

    if powerful {
        pac.power -= 1;
        if pac.power == FRIGHT_FLASH_TICKS {
            events.write(GameEvent::PacManGettingWeaker);
        }
        if pac.power == 0 {
            debug!("Power window closed");
            pac.state = PacManState::Awake;
            events.write(GameEvent::PacManLostPower);
            return;
        }
    }

    // Swallowing pauses movement for a tick or three.
    if pac.digestion > 0 {
        pac.digestion -= 1;
        return;
    }

    if let Some(dir) = intent.0 {
        actor.wish_dir = dir;
    }
    let params = level_params(data.level);
    let fraction = if powerful {
        params.pacman_power_speed
    } else {
        params.pacman_speed
    };
    move_actor(&mut actor, &maze, speed(fraction), &|tile| pacman_can_enter(&maze, tile));

    // Look for something interesting on the new tile.
    if actor.move_state == MoveState::Teleporting {
        return;
    }
    let tile = actor.tile();
    let on_bonus_seat = tile == maze.bonus_seat || tile == maze.bonus_seat.towards(Direction::Right, 1);
    if bonus.is_active() && on_bonus_seat {
        events.write(GameEvent::BonusFound { tile });
        return;
    }
    if let Some(food) = maze.eat_food_at(tile) {
        pac.digestion = match food {
            Food::Pellet => DIGEST_PELLET_TICKS,
            Food::Energizer => DIGEST_ENERGIZER_TICKS,
        };
        trace!(%tile, ?food, remaining = maze.food_remaining(), "Food found");
        events.write(GameEvent::FoodFound {
            tile,
            energizer: food == Food::Energizer,
        });
    }
}
