//! One-shot commands from the outside world, applied at tick boundaries.

use bevy_ecs::resource::Resource;

use crate::map::direction::Direction;

/// A command issued by the driving collaborator (keyboard adapter, test
/// harness, attract script). Commands queue up between ticks and are applied
/// once, in order, at the start of the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Update Pac-Man's direction intent. `None` releases all keys.
    SetDirection(Option<Direction>),
    /// Finish the intro cinematic (the view owns its timing).
    CompleteIntro,
    ToggleMute,
    ToggleStateLogging,
    /// Select an exact clock frequency (the arcade-style 60/70/80 keys).
    SetFrequency(u32),
    /// Nudge the clock frequency up or down by five ticks per second.
    BumpFrequency(i32),
    ToggleOverflowFix,
    /// Switch frightened ghosts between random movement and corner fleeing.
    ToggleFrightenedBehavior,
    ToggleImmortal,
    /// Cheat: kill every ghost currently on stage.
    KillAllGhosts,
    /// Cheat: eat every plain pellet (energizers stay).
    EatAllPellets,
    /// Cheat: complete the current level immediately.
    NextLevel,
}

/// Queue of pending commands, drained once per tick.
#[derive(Resource, Debug, Default)]
pub struct CommandQueue(pub Vec<GameCommand>);

/// Pac-Man's current direction intent, as supplied by the input collaborator.
/// Persists until replaced, like a held key.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputIntent(pub Option<Direction>);
