//! Components and bookkeeping resources shared across systems.

use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use strum_macros::{AsRefStr, EnumIter};

use crate::constants::INITIAL_LIVES;
use crate::map::tile::Tile;
use crate::systems::movement::Actor;

/// Ghost identity, in release-protocol order after Blinky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum GhostName {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostName {
    pub const ALL: [GhostName; 4] = [GhostName::Blinky, GhostName::Pinky, GhostName::Inky, GhostName::Clyde];

    pub const fn as_usize(self) -> usize {
        match self {
            GhostName::Blinky => 0,
            GhostName::Pinky => 1,
            GhostName::Inky => 2,
            GhostName::Clyde => 3,
        }
    }

    /// A distinct bit per ghost, mixed into the frightened-steering seed.
    pub const fn bit(self) -> u64 {
        1 << self.as_usize()
    }

    /// The ghost's body color, for the rendering collaborator.
    pub const fn color(self) -> (u8, u8, u8) {
        match self {
            GhostName::Blinky => (255, 0, 0),
            GhostName::Pinky => (255, 184, 255),
            GhostName::Inky => (0, 255, 255),
            GhostName::Clyde => (255, 184, 81),
        }
    }
}

/// The attack regime ghosts return to when nothing else is going on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Scattering,
    Chasing,
}

/// Ghost finite-state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum GhostState {
    /// Waiting in the house, bouncing on the bed.
    Locked,
    /// Walking the scripted route out of the house.
    LeavingHouse,
    Chasing,
    Scattering,
    Frightened,
    /// Kill pause; the view shows the score number where the ghost stood.
    Dying,
    /// Eyes returning to the house entry.
    Dead,
    /// Scripted descent from the door to the assigned bed.
    EnteringHouse,
}

impl GhostState {
    /// States in which touching Pac-Man kills him.
    pub const fn is_hostile(self) -> bool {
        matches!(self, GhostState::Chasing | GhostState::Scattering | GhostState::LeavingHouse)
    }

    /// States in which the ghost sits in or around the house.
    pub const fn in_house_regime(self) -> bool {
        matches!(self, GhostState::Locked | GhostState::LeavingHouse | GhostState::EnteringHouse)
    }
}

/// One ghost: identity plus all per-ghost machine state.
#[derive(Component, Debug, Clone)]
pub struct Ghost {
    pub name: GhostName,
    pub state: GhostState,
    /// Ticks spent in the current state.
    pub state_ticks: u32,
    /// Regime to adopt after leaving the house or losing fright.
    pub next_state: Regime,
    /// Personal dot counter for the release protocol.
    pub dot_counter: u32,
    /// Set once the doorman has released this ghost; a returning ghost
    /// leaves again without a new release.
    pub released: bool,
    /// Current steering target, surfaced in snapshots.
    pub target: Option<Tile>,
    /// Cached path for path-following behaviors.
    pub path: Vec<Tile>,
    /// Forces a fresh steering decision on the next tick.
    pub forced: bool,
}

impl Ghost {
    pub fn new(name: GhostName) -> Ghost {
        Ghost {
            name,
            state: GhostState::Locked,
            state_ticks: 0,
            next_state: Regime::Scattering,
            dot_counter: 0,
            released: false,
            target: None,
            path: Vec::new(),
            forced: false,
        }
    }

    /// Switches state, resetting the per-state tick counter and steering
    /// scratch data.
    pub fn enter_state(&mut self, state: GhostState) {
        self.state = state;
        self.state_ticks = 0;
        self.path.clear();
        self.forced = true;
    }
}

/// Pac-Man finite-state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum PacManState {
    InBed,
    Sleeping,
    Awake,
    Powerful,
    Dead,
}

#[derive(Component, Debug, Clone)]
pub struct PacMan {
    pub state: PacManState,
    /// Remaining ticks of the power window.
    pub power: u32,
    /// Ticks to stand still after swallowing food.
    pub digestion: u32,
}

impl PacMan {
    pub fn new() -> PacMan {
        PacMan {
            state: PacManState::InBed,
            power: 0,
            digestion: 0,
        }
    }
}

impl Default for PacMan {
    fn default() -> Self {
        PacMan::new()
    }
}

#[derive(Bundle)]
pub struct PacManBundle {
    pub pacman: PacMan,
    pub actor: Actor,
}

#[derive(Bundle)]
pub struct GhostBundle {
    pub ghost: Ghost,
    pub actor: Actor,
}

/// The high score record persisted by a collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HiscoreRecord {
    pub points: u32,
    pub level: u32,
}

/// Game-wide bookkeeping: score, lives, level and the tick counter.
#[derive(Resource, Debug, Clone)]
pub struct GameData {
    pub tick: u64,
    pub level: u32,
    pub score: u32,
    pub hiscore: HiscoreRecord,
    pub lives: u32,
    /// Kills within the current energizer window, 0..=4.
    pub ghosts_killed_by_energizer: u32,
    /// The extra life is granted exactly once per game.
    pub extra_life_granted: bool,
}

impl GameData {
    pub fn new() -> GameData {
        GameData {
            tick: 0,
            level: 1,
            score: 0,
            hiscore: HiscoreRecord::default(),
            lives: INITIAL_LIVES,
            ghosts_killed_by_energizer: 0,
            extra_life_granted: false,
        }
    }

    /// Starts a fresh game, keeping the hiscore record.
    pub fn start(&mut self) {
        self.level = 1;
        self.score = 0;
        self.lives = INITIAL_LIVES;
        self.ghosts_killed_by_energizer = 0;
        self.extra_life_granted = false;
    }

    /// Adds points, tracking the hiscore. Returns true when this crossing of
    /// the extra-life threshold grants the bonus life.
    pub fn score_points(&mut self, points: u32) -> bool {
        use crate::constants::EXTRA_LIFE_SCORE;

        let previous = self.score;
        self.score += points;
        if self.score > self.hiscore.points {
            self.hiscore = HiscoreRecord {
                points: self.score,
                level: self.level,
            };
        }
        if !self.extra_life_granted && previous < EXTRA_LIFE_SCORE && self.score >= EXTRA_LIFE_SCORE {
            self.extra_life_granted = true;
            self.lives += 1;
            return true;
        }
        false
    }
}

impl Default for GameData {
    fn default() -> Self {
        GameData::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ghost_release_order() {
        assert_eq!(
            GhostName::ALL,
            [GhostName::Blinky, GhostName::Pinky, GhostName::Inky, GhostName::Clyde]
        );
    }

    #[test]
    fn test_hostile_states() {
        assert!(GhostState::Chasing.is_hostile());
        assert!(GhostState::Scattering.is_hostile());
        assert!(GhostState::LeavingHouse.is_hostile());
        assert!(!GhostState::Frightened.is_hostile());
        assert!(!GhostState::Dead.is_hostile());
        assert!(!GhostState::Dying.is_hostile());
    }

    #[test]
    fn test_extra_life_granted_once() {
        let mut data = GameData::new();
        assert!(!data.score_points(9_990));
        assert!(data.score_points(20));
        assert_eq!(data.lives, INITIAL_LIVES + 1);
        // Crossing again (after a hypothetical reset) must not grant another
        assert!(!data.score_points(10_000));
        assert_eq!(data.lives, INITIAL_LIVES + 1);
    }

    #[test]
    fn test_hiscore_tracks_score() {
        let mut data = GameData::new();
        data.level = 3;
        data.score_points(1_240);
        assert_eq!(data.hiscore, HiscoreRecord { points: 1_240, level: 3 });
        data.start();
        assert_eq!(data.hiscore.points, 1_240);
    }
}
