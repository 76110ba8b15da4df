//! The ghost house doorman: dot counters, starvation timer and the release
//! protocol.

use bevy_ecs::event::{EventCursor, Events};
use bevy_ecs::query::Without;
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Local, Query, Res, ResMut};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::constants::sec;
use crate::events::GameEvent;
use crate::systems::components::{Ghost, GhostName, GhostState, PacMan};
use crate::systems::controller::GameStage;

/// Release order of the housed ghosts. Blinky never waits.
const RELEASE_ORDER: [GhostName; 3] = [GhostName::Pinky, GhostName::Inky, GhostName::Clyde];

/// Doorman bookkeeping. Per-ghost dot counters live on the ghosts
/// themselves; this resource holds the shared state.
#[derive(Resource, Debug)]
pub struct Doorman {
    /// The global counter takes over after Pac-Man loses a life.
    pub global_enabled: bool,
    pub global_count: u32,
    /// Ticks since Pac-Man last ate anything.
    pub starving_ticks: u32,
    level: u32,
}

impl Doorman {
    pub fn new(level: u32) -> Doorman {
        Doorman {
            global_enabled: false,
            global_count: 0,
            starving_ticks: 0,
            level,
        }
    }

    /// Fresh level: counters cleared, global counter off.
    pub fn reset(&mut self, level: u32) {
        *self = Doorman::new(level);
    }

    /// Called when Pac-Man dies; dots now feed the global counter.
    pub fn enable_global_counter(&mut self) {
        self.global_enabled = true;
        self.global_count = 0;
        self.starving_ticks = 0;
    }

    /// How long Pac-Man may starve before the doorman forces a release.
    fn starvation_limit(&self) -> u32 {
        if self.level <= 4 {
            sec(4.0)
        } else {
            sec(3.0)
        }
    }

    /// Personal dot-counter threshold for a housed ghost at this level.
    fn personal_limit(&self, ghost: GhostName) -> u32 {
        match (ghost, self.level) {
            (GhostName::Inky, 1) => 30,
            (GhostName::Clyde, 1) => 60,
            (GhostName::Clyde, 2) => 50,
            _ => 0,
        }
    }

    /// Global-counter threshold for a housed ghost.
    fn global_limit(&self, ghost: GhostName) -> u32 {
        match ghost {
            GhostName::Pinky => 7,
            GhostName::Inky => 17,
            GhostName::Clyde => 32,
            GhostName::Blinky => 0,
        }
    }
}

/// The first ghost in release order still locked in the house.
fn preferred_locked(ghosts: &Query<&mut Ghost, Without<PacMan>>) -> Option<GhostName> {
    RELEASE_ORDER.into_iter().find(|name| {
        ghosts
            .iter()
            .any(|ghost| ghost.name == *name && ghost.state == GhostState::Locked)
    })
}

/// Runs the release protocol once per playing tick.
pub fn doorman_system(
    stage: Res<GameStage>,
    mut doorman: ResMut<Doorman>,
    mut cursor: Local<EventCursor<GameEvent>>,
    mut events: ResMut<Events<GameEvent>>,
    mut ghosts: Query<&mut Ghost, Without<PacMan>>,
) {
    if !stage.is_playing() {
        // Keep the cursor drained so stale food events never count twice.
        cursor.clear(&events);
        return;
    }

    let dots_eaten = cursor
        .read(&events)
        .filter(|event| matches!(event, GameEvent::FoodFound { .. }))
        .count() as u32;

    let mut released: SmallVec<[GhostName; 4]> = SmallVec::new();

    for _ in 0..dots_eaten {
        doorman.starving_ticks = 0;
        if doorman.global_enabled {
            doorman.global_count += 1;
            for name in RELEASE_ORDER {
                if doorman.global_count == doorman.global_limit(name) && !released.contains(&name) {
                    let locked = ghosts
                        .iter()
                        .any(|ghost| ghost.name == name && ghost.state == GhostState::Locked);
                    if locked {
                        released.push(name);
                    }
                }
            }
            if doorman.global_count >= doorman.global_limit(GhostName::Clyde) {
                debug!("Global dot counter exhausted, reverting to personal counters");
                doorman.global_enabled = false;
                doorman.global_count = 0;
            }
        } else if let Some(preferred) = preferred_locked(&ghosts) {
            for mut ghost in ghosts.iter_mut() {
                if ghost.name == preferred {
                    ghost.dot_counter += 1;
                }
            }
        }
    }

    // Blinky never waits for the protocol.
    if ghosts
        .iter()
        .any(|ghost| ghost.name == GhostName::Blinky && ghost.state == GhostState::Locked)
    {
        released.push(GhostName::Blinky);
    }

    // Personal counter release for the preferred ghost. Suspended while the
    // global counter is in charge.
    if !doorman.global_enabled {
        if let Some(preferred) = preferred_locked(&ghosts) {
            let counter = ghosts
                .iter()
                .find(|ghost| ghost.name == preferred)
                .map(|ghost| ghost.dot_counter)
                .unwrap_or(0);
            if counter >= doorman.personal_limit(preferred) && !released.contains(&preferred) {
                released.push(preferred);
            }
        }
    }

    // Starvation release.
    doorman.starving_ticks += 1;
    if doorman.starving_ticks >= doorman.starvation_limit() {
        doorman.starving_ticks = 0;
        if let Some(preferred) = preferred_locked(&ghosts) {
            if !released.contains(&preferred) {
                info!(ghost = preferred.as_ref(), "Starvation timer released ghost");
                released.push(preferred);
            }
        }
    }

    for name in released {
        if name == GhostName::Clyde && doorman.global_enabled {
            doorman.global_enabled = false;
            doorman.global_count = 0;
        }
        debug!(ghost = name.as_ref(), "Ghost unlocked");
        events.send(GameEvent::GhostUnlocked { ghost: name });
    }
}
