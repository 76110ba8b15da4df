//! Tile-equality collision between Pac-Man and the ghosts.

use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res};
use tracing::trace;

use crate::events::GameEvent;
use crate::systems::components::{Ghost, GhostState, PacMan};
use crate::systems::controller::GameStage;
use crate::systems::movement::Actor;

/// Checks every on-stage ghost against Pac-Man's tile and enqueues the
/// consequence; the scoring drain resolves it at the end of the tick.
pub fn collision_system(
    stage: Res<GameStage>,
    pacman: Query<&Actor, With<PacMan>>,
    ghosts: Query<(&Ghost, &Actor), Without<PacMan>>,
    mut events: EventWriter<GameEvent>,
) {
    if !stage.is_playing() {
        return;
    }
    let Ok(pac_actor) = pacman.single() else {
        return;
    };
    let pac_tile = pac_actor.tile();

    for (ghost, actor) in ghosts.iter() {
        if !actor.enabled || actor.tile() != pac_tile {
            continue;
        }
        if ghost.state.is_hostile() {
            trace!(ghost = ghost.name.as_ref(), tile = %pac_tile, "Ghost caught Pac-Man");
            events.write(GameEvent::PacManKilled { by: ghost.name });
        } else if ghost.state == GhostState::Frightened {
            trace!(ghost = ghost.name.as_ref(), tile = %pac_tile, "Pac-Man caught ghost");
            events.write(GameEvent::GhostKilled { ghost: ghost.name });
        }
    }
}
