//! Runtime configuration flags for the simulation.

use bevy_ecs::resource::Resource;

use crate::constants::TICKS_PER_SECOND;

/// Configuration flags, all togglable at tick boundaries.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Config {
    /// Skip the intro and go straight to the ready sequence.
    pub skip_intro: bool,
    /// When false, frightened ghosts flee towards the safest corner instead
    /// of wandering randomly. Random is the arcade behavior.
    pub flee_randomly: bool,
    /// Repair the arcade's "n tiles ahead while facing up" overflow bug.
    /// Off by default: the bug is part of faithful behavior.
    pub fix_overflow_bug: bool,
    /// Pac-Man dies but never loses a life.
    pub immortal_pacman: bool,
    /// Mute flag surfaced to the audio collaborator.
    pub muted: bool,
    /// Emit state machine transition logs.
    pub log_state_machines: bool,
    /// Clock frequency in ticks per second, surfaced to the driving loop.
    pub frequency: u32,
    /// Seed for every random draw the simulation makes.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            skip_intro: false,
            flee_randomly: true,
            fix_overflow_bug: false,
            immortal_pacman: false,
            muted: false,
            log_state_machines: false,
            frequency: TICKS_PER_SECOND,
            seed: 0,
        }
    }
}
