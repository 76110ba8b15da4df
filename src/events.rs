//! The typed event bus.
//!
//! Every cross-component fact travels as a [`GameEvent`] through the
//! double-buffered `bevy_ecs` event queue. Systems that run after a writer in
//! the tick order observe its events the same tick; events written while the
//! scoring drain is running surface on the next tick, so no state machine is
//! ever re-entered within a tick.

use bevy_ecs::event::Event;

use crate::map::tile::Tile;
use crate::systems::components::GhostName;

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// Pac-Man found food at a tile.
    FoodFound { tile: Tile, energizer: bool },
    /// Pac-Man found the active bonus.
    BonusFound { tile: Tile },
    /// An energizer takes effect: Pac-Man powers up, ghosts frighten.
    PacManGainsPower,
    /// The power window is about to close; frightened ghosts start flashing.
    PacManGettingWeaker,
    /// The power window closed.
    PacManLostPower,
    /// A hostile ghost caught Pac-Man.
    PacManKilled { by: GhostName },
    /// Pac-Man caught a frightened ghost.
    GhostKilled { ghost: GhostName },
    /// The doorman released a ghost from the house.
    GhostUnlocked { ghost: GhostName },
    /// The attack-wave timer switched to a chase phase.
    StartChasing,
    /// The attack-wave timer switched to a scatter phase.
    StartScattering,
    /// The last food was eaten.
    LevelCompleted,
}
